//! The three regular axes backing the ANUClimate 0.01 degree daily grid.
//!
//! Every axis is strictly linear: a physical value maps onto a storage offset
//! with `round((value - min) / delta)`. Latitude bounds are kept as positive
//! magnitudes; callers pass signed (southern) latitudes and the indexer folds
//! them with `abs` before doing any arithmetic.

use crate::grid::interval::Interval;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one of the grid's dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKind {
    Latitude,
    Longitude,
    Time,
}

impl AxisKind {
    pub(crate) fn short_name(&self) -> &'static str {
        match self {
            AxisKind::Latitude => "lat",
            AxisKind::Longitude => "lon",
            AxisKind::Time => "time",
        }
    }

    /// The grid constants of this axis.
    pub fn axis(&self) -> &'static GridAxis {
        match self {
            AxisKind::Latitude => &LATITUDE,
            AxisKind::Longitude => &LONGITUDE,
            AxisKind::Time => &TIME,
        }
    }
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Physical and index bounds of a regular axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridAxis {
    pub kind: AxisKind,
    /// Lowest physical value (magnitude for latitude, epoch seconds for time).
    pub min: f64,
    /// Highest physical value.
    pub max: f64,
    pub idx_min: usize,
    pub idx_max: usize,
    /// Uniform cell width.
    pub delta: f64,
    /// Added to the cell count when a range is expanded into an explicit vector.
    pub vector_padding: usize,
}

impl GridAxis {
    /// Number of stored cells along this axis.
    pub fn len(&self) -> usize {
        self.idx_max - self.idx_min + 1
    }

    pub fn is_empty(&self) -> bool {
        self.idx_max < self.idx_min
    }
}

pub const LATITUDE: GridAxis = GridAxis {
    kind: AxisKind::Latitude,
    min: 9.005,
    max: 43.735,
    idx_min: 0,
    idx_max: 3473,
    delta: 0.01,
    vector_padding: 2,
};

pub const LONGITUDE: GridAxis = GridAxis {
    kind: AxisKind::Longitude,
    min: 112.905,
    max: 153.995,
    idx_min: 0,
    idx_max: 4109,
    delta: 0.01,
    vector_padding: 1,
};

/// Daily time steps, in seconds since 1970-01-01.
pub const TIME: GridAxis = GridAxis {
    kind: AxisKind::Time,
    min: 0.0,
    max: 1_419_984_000.0,
    idx_min: 0,
    idx_max: 16435,
    delta: 86_400.0,
    vector_padding: 1,
};

/// First and last calendar day covered by the grid, ISO formatted.
pub const FIRST_DAY: &str = "1970-01-01";
pub const LAST_DAY: &str = "2014-12-31";

pub const YEAR_BOUNDS: Interval<i32> = Interval::new(1970, 2014);
pub const MONTH_BOUNDS: Interval<u32> = Interval::new(1, 12);
pub const QUARTER_BOUNDS: Interval<u32> = Interval::new(1, 4);
