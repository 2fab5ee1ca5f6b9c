//! A single climate variable bound to a remote grid: windowed fetches and
//! reductions along the time axis.

use crate::error::ClimGridError;
use crate::grid::axis::{AxisKind, GridAxis, LATITUDE, LONGITUDE};
use crate::grid::interval::Interval;
use crate::grid::validators::{is_valid_date, validate_area, validate_window};
use crate::indexer::coordinate::{axis_vector_len, coordinate_to_index, date_to_index};
use crate::source::error::FetchError;
use crate::source::{Block, GridHandle, GridSource, Hyperslab, IndexWindow};
use crate::types::data_source::{ClimateVariable, VariableDescriptor};
use crate::types::epoch::iso_to_epoch_seconds;
use crate::types::statistic::Statistic;
use crate::types::time_label::TimeLabel;
use crate::types::traits::period::date_period::DatePeriod;
use chrono::NaiveDate;
use log::{debug, info};
use ndarray::{s, Array2};
use std::cell::OnceCell;
use std::sync::Arc;

/// One [`ClimateVariable`] bound to a [`GridSource`].
///
/// The remote handle is opened on the first fetch and kept for the lifetime
/// of the measure.
pub struct Measure<S: GridSource> {
    variable: ClimateVariable,
    descriptor: VariableDescriptor,
    source: Arc<S>,
    handle: OnceCell<S::Handle>,
}

impl<S: GridSource> Measure<S> {
    pub fn new(variable: ClimateVariable, source: Arc<S>) -> Self {
        Self {
            variable,
            descriptor: variable.descriptor(),
            source,
            handle: OnceCell::new(),
        }
    }

    pub fn variable(&self) -> ClimateVariable {
        self.variable
    }

    /// Header of this measure's report column.
    pub fn column_name(&self) -> &'static str {
        self.descriptor.column_name
    }

    fn handle(&self) -> Result<&S::Handle, FetchError> {
        if let Some(handle) = self.handle.get() {
            return Ok(handle);
        }
        let handle = self.source.open(&self.descriptor)?;
        Ok(self.handle.get_or_init(|| handle))
    }

    /// Fetches every day of `time` over the given area.
    ///
    /// # Errors
    ///
    /// [`ClimGridError::InvalidWindow`] when any range fails validation,
    /// [`ClimGridError::DataFetch`] when an index cannot be resolved or the
    /// remote read fails.
    pub fn fetch_slice(
        &self,
        time: &Interval<NaiveDate>,
        lat: &Interval<f64>,
        lon: &Interval<f64>,
    ) -> Result<Block, ClimGridError> {
        validate_window(time, lat, lon).map_err(|axis| ClimGridError::InvalidWindow { axis })?;
        Ok(self.read_window(time.lo, time.hi, lat, lon)?.0)
    }

    /// Fetches a single day over the given area.
    pub fn fetch_day(
        &self,
        date: NaiveDate,
        lat: &Interval<f64>,
        lon: &Interval<f64>,
    ) -> Result<Block, ClimGridError> {
        validate_day(date, lat, lon)?;
        Ok(self.read_window(date, date, lat, lon)?.0)
    }

    fn read_window(
        &self,
        first: NaiveDate,
        last: NaiveDate,
        lat: &Interval<f64>,
        lon: &Interval<f64>,
    ) -> Result<(Block, Hyperslab), ClimGridError> {
        let slab = hyperslab(first, last, lat, lon)?;
        debug!("{} window {} -> {}", self.variable, first, slab);
        let block = self.handle()?.read(&slab)?;
        Ok((block, slab))
    }

    /// Reduces one calendar unit to a `lat x lon` grid shaped like the axis
    /// vectors of `lat` and `lon`.
    ///
    /// Vector values past the southern or eastern edge of the grid have no
    /// cells to read; their rows and columns are NaN.
    pub fn reduce_by_unit(
        &self,
        label: TimeLabel,
        lat: &Interval<f64>,
        lon: &Interval<f64>,
        statistic: Statistic,
    ) -> Result<Array2<f64>, ClimGridError> {
        let (first, last) = match label {
            TimeLabel::Day(date) => {
                validate_day(date, lat, lon)?;
                (date, date)
            }
            _ => {
                let span = label.get_date_period().ok_or_else(|| {
                    ClimGridError::invalid_parameters(format!("reduce_by_unit({})", label))
                })?;
                validate_window(&Interval::new(span.start, span.end), lat, lon)
                    .map_err(|axis| ClimGridError::InvalidWindow { axis })?;
                (span.start, span.end)
            }
        };
        let (block, slab) = self.read_window(first, last, lat, lon)?;
        let grid = statistic.reduce(&block.values, block.fill_value);
        Ok(pad_past_edges(grid, &slab, lat, lon))
    }

    /// Reduces each label in turn and concatenates the row-major grids.
    ///
    /// The result has `labels.len() * lat_rows * lon_cols` values: label
    /// slowest, then latitude, then longitude.
    pub fn reduce_labels(
        &self,
        labels: &[TimeLabel],
        lat: &Interval<f64>,
        lon: &Interval<f64>,
        statistic: Statistic,
    ) -> Result<Vec<f64>, ClimGridError> {
        info!(
            "Reducing {} {} units of {} with {}",
            labels.len(),
            labels.first().map(|l| l.granularity().to_string()).unwrap_or_default(),
            self.variable,
            statistic
        );
        let mut values = Vec::new();
        for label in labels {
            let grid = self.reduce_by_unit(*label, lat, lon, statistic)?;
            values.extend(grid.iter().copied());
        }
        Ok(values)
    }
}

/// Index window for a day range over an area.
///
/// Time is inclusive on both days. Latitude starts at the upper (equator side)
/// bound because the remote axis descends; both spatial windows span as many
/// cells as the axis vectors of the same ranges, clamped to the axis.
pub(crate) fn hyperslab(
    first: NaiveDate,
    last: NaiveDate,
    lat: &Interval<f64>,
    lon: &Interval<f64>,
) -> Result<Hyperslab, FetchError> {
    let day_index = |date: NaiveDate| {
        date_to_index(date).ok_or(FetchError::IndexOutOfRange {
            axis: AxisKind::Time,
            value: iso_to_epoch_seconds(date) as f64,
        })
    };
    let time = IndexWindow::new(day_index(first)?, day_index(last)?);

    let lat_hi = index_of(lat.hi, AxisKind::Latitude)?;
    index_of(lat.lo, AxisKind::Latitude)?;
    let lat_stop = spanned_stop(lat_hi, lat, &LATITUDE);

    let lon_lo = index_of(lon.lo, AxisKind::Longitude)?;
    index_of(lon.hi, AxisKind::Longitude)?;
    let lon_stop = spanned_stop(lon_lo, lon, &LONGITUDE);

    Ok(Hyperslab {
        time,
        lat: IndexWindow::new(lat_hi, lat_stop),
        lon: IndexWindow::new(lon_lo, lon_stop),
    })
}

fn validate_day(
    date: NaiveDate,
    lat: &Interval<f64>,
    lon: &Interval<f64>,
) -> Result<(), ClimGridError> {
    if !is_valid_date(date) {
        return Err(ClimGridError::InvalidWindow {
            axis: AxisKind::Time,
        });
    }
    validate_area(lat, lon).map_err(|axis| ClimGridError::InvalidWindow { axis })
}

/// Grows `grid` with NaN rows and columns for the vector values the clamped
/// window of `slab` could not cover.
fn pad_past_edges(
    grid: Array2<f64>,
    slab: &Hyperslab,
    lat: &Interval<f64>,
    lon: &Interval<f64>,
) -> Array2<f64> {
    let (rows, cols) = grid.dim();
    let missing_rows = axis_vector_len(lat, &LATITUDE).saturating_sub(slab.lat.len());
    let missing_cols = axis_vector_len(lon, &LONGITUDE).saturating_sub(slab.lon.len());
    if missing_rows == 0 && missing_cols == 0 {
        return grid;
    }
    let mut padded = Array2::from_elem((rows + missing_rows, cols + missing_cols), f64::NAN);
    padded.slice_mut(s![..rows, ..cols]).assign(&grid);
    padded
}

fn index_of(value: f64, kind: AxisKind) -> Result<usize, FetchError> {
    coordinate_to_index(value, kind.axis()).ok_or(FetchError::IndexOutOfRange { axis: kind, value })
}

fn spanned_stop(start: usize, range: &Interval<f64>, axis: &GridAxis) -> usize {
    let stop = start + axis_vector_len(range, axis).saturating_sub(1);
    stop.min(axis.idx_max)
}
