//! In-memory grid source for tests: every cell of a block holds its day offset
//! on the time axis, and every requested window is recorded.

use crate::source::error::FetchError;
use crate::source::{Block, GridHandle, GridSource, Hyperslab};
use crate::types::data_source::VariableDescriptor;
use chrono::NaiveDate;
use ndarray::Array3;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[derive(Debug, Default)]
pub(crate) struct FixtureSource {
    opened: AtomicUsize,
    requests: Arc<Mutex<Vec<Hyperslab>>>,
    fail_reads: bool,
    missing_lat_rows: usize,
}

impl FixtureSource {
    /// Every read fails like an unreachable server would.
    pub(crate) fn failing() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Blocks come back with fewer latitude rows than requested.
    pub(crate) fn short_latitude(rows: usize) -> Self {
        Self {
            missing_lat_rows: rows,
            ..Self::default()
        }
    }

    pub(crate) fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<Hyperslab> {
        self.requests.lock().unwrap().clone()
    }
}

pub(crate) struct FixtureHandle {
    requests: Arc<Mutex<Vec<Hyperslab>>>,
    fail_reads: bool,
    missing_lat_rows: usize,
}

impl GridSource for FixtureSource {
    type Handle = FixtureHandle;

    fn open(&self, _descriptor: &VariableDescriptor) -> Result<FixtureHandle, FetchError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(FixtureHandle {
            requests: Arc::clone(&self.requests),
            fail_reads: self.fail_reads,
            missing_lat_rows: self.missing_lat_rows,
        })
    }
}

impl GridHandle for FixtureHandle {
    fn read(&self, slab: &Hyperslab) -> Result<Block, FetchError> {
        self.requests.lock().unwrap().push(*slab);
        if self.fail_reads {
            return Err(FetchError::Read {
                url: "fixture".to_string(),
                variable: "fixture".to_string(),
                window: slab.to_string(),
                source: netcdf::Error::Str("connection reset".to_string()),
            });
        }
        let (time, lat, lon) = slab.shape();
        let lat = lat.saturating_sub(self.missing_lat_rows);
        let first_day = slab.time.start;
        let values = Array3::from_shape_fn((time, lat, lon), |(t, _, _)| (first_day + t) as f64);
        Ok(Block {
            values,
            fill_value: Some(-999.0),
        })
    }
}
