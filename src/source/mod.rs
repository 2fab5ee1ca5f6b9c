//! The remote array source contract and its netCDF/OPeNDAP implementation.
//!
//! A [`GridSource`] opens one variable of one dataset and hands back a
//! [`GridHandle`]; the handle reads dense `time x lat x lon` [`Block`]s for
//! inclusive index windows ([`Hyperslab`]).

pub mod error;
pub mod opendap;

use crate::source::error::FetchError;
use crate::types::data_source::VariableDescriptor;
use ndarray::Array3;
use std::fmt;

/// Opens remote gridded variables.
pub trait GridSource {
    type Handle: GridHandle;

    fn open(&self, descriptor: &VariableDescriptor) -> Result<Self::Handle, FetchError>;
}

/// An opened remote variable.
pub trait GridHandle {
    fn read(&self, slab: &Hyperslab) -> Result<Block, FetchError>;
}

/// An inclusive `start..=stop` window of storage offsets on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexWindow {
    pub start: usize,
    pub stop: usize,
}

impl IndexWindow {
    pub fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }

    pub fn len(&self) -> usize {
        if self.stop < self.start {
            0
        } else {
            self.stop - self.start + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stop < self.start
    }
}

/// The index window requested from a remote variable.
///
/// The latitude window starts at the offset of the range's upper (equator
/// side) bound: the remote latitude axis is stored descending from the equator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hyperslab {
    pub time: IndexWindow,
    pub lat: IndexWindow,
    pub lon: IndexWindow,
}

impl Hyperslab {
    /// `(time, lat, lon)` extent of the block this window selects.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.time.len(), self.lat.len(), self.lon.len())
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty() || self.lat.is_empty() || self.lon.is_empty()
    }
}

/// Formats as a DAP2 constraint, e.g. `[0:30][1800:1901][3710:3810]`.
impl fmt::Display for Hyperslab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}:{}][{}:{}][{}:{}]",
            self.time.start,
            self.time.stop,
            self.lat.start,
            self.lat.stop,
            self.lon.start,
            self.lon.stop
        )
    }
}

/// Dense values of one hyperslab.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// `time x lat x lon` values.
    pub values: Array3<f64>,
    /// The dataset's `_FillValue` / `missing_value`, if it declares one.
    pub fill_value: Option<f64>,
}
