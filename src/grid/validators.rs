//! Bound checks run before any index arithmetic or remote fetch.
//!
//! All predicates are pure. A `false` result fails the whole request: nothing
//! downstream clamps or repairs an out-of-bound range.

use crate::grid::axis::{AxisKind, LATITUDE, LONGITUDE, MONTH_BOUNDS, QUARTER_BOUNDS, YEAR_BOUNDS};
use crate::grid::interval::Interval;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Which bound table a range is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeKind {
    Time,
    Lat,
    Lon,
    Month,
}

/// A value type that has bounds for some [`RangeKind`]s.
///
/// A kind without bounds for the type (a date checked as a longitude, say)
/// is never valid.
pub trait Boundary: PartialOrd + Copy {
    fn bounds(kind: RangeKind) -> Option<Interval<Self>>;
}

impl Boundary for NaiveDate {
    fn bounds(kind: RangeKind) -> Option<Interval<Self>> {
        match kind {
            RangeKind::Time => Some(Interval::new(
                NaiveDate::from_ymd_opt(YEAR_BOUNDS.lo, 1, 1)?,
                NaiveDate::from_ymd_opt(YEAR_BOUNDS.hi, 12, 31)?,
            )),
            _ => None,
        }
    }
}

impl Boundary for f64 {
    fn bounds(kind: RangeKind) -> Option<Interval<Self>> {
        match kind {
            RangeKind::Lat => Some(Interval::new(-LATITUDE.max, -LATITUDE.min)),
            RangeKind::Lon => Some(Interval::new(LONGITUDE.min, LONGITUDE.max)),
            _ => None,
        }
    }
}

impl Boundary for u32 {
    fn bounds(kind: RangeKind) -> Option<Interval<Self>> {
        match kind {
            RangeKind::Month => Some(MONTH_BOUNDS),
            _ => None,
        }
    }
}

/// `true` iff `min <= lo < hi <= max` for the bounds of `kind`.
///
/// # Example
///
/// ```
/// use climgrid::{is_valid_range, Interval, RangeKind};
///
/// assert!(is_valid_range(&Interval::new(-28.0, -27.0), RangeKind::Lat));
/// assert!(!is_valid_range(&Interval::new(-9.0, -43.0), RangeKind::Lat));
/// assert!(!is_valid_range(&Interval::new(3u32, 3u32), RangeKind::Month));
/// ```
pub fn is_valid_range<T: Boundary>(range: &Interval<T>, kind: RangeKind) -> bool {
    match T::bounds(kind) {
        Some(bounds) => range.is_within(&bounds),
        None => false,
    }
}

pub fn is_valid_year(year: i32) -> bool {
    YEAR_BOUNDS.contains(&year)
}

pub fn is_valid_month(month: u32) -> bool {
    MONTH_BOUNDS.contains(&month)
}

pub fn is_valid_quarter(quarter: u32) -> bool {
    QUARTER_BOUNDS.contains(&quarter)
}

/// Both endpoints are valid years and `lo < hi`.
pub fn is_valid_year_range(years: &Interval<i32>) -> bool {
    years.is_ordered() && is_valid_year(years.lo) && is_valid_year(years.hi)
}

/// The grid spans whole years, so a day is valid when its year is.
pub fn is_valid_date(date: NaiveDate) -> bool {
    is_valid_year(date.year())
}

pub fn is_valid_latitude(lat: f64) -> bool {
    f64::bounds(RangeKind::Lat).is_some_and(|b| b.contains(&lat))
}

pub fn is_valid_longitude(lon: f64) -> bool {
    f64::bounds(RangeKind::Lon).is_some_and(|b| b.contains(&lon))
}

/// Checks a full fetch window and reports the first axis that fails.
pub fn validate_window(
    time: &Interval<NaiveDate>,
    lat: &Interval<f64>,
    lon: &Interval<f64>,
) -> Result<(), AxisKind> {
    if !is_valid_range(time, RangeKind::Time) {
        return Err(AxisKind::Time);
    }
    validate_area(lat, lon)
}

/// Checks the spatial half of a window.
pub fn validate_area(lat: &Interval<f64>, lon: &Interval<f64>) -> Result<(), AxisKind> {
    if !is_valid_range(lat, RangeKind::Lat) {
        return Err(AxisKind::Latitude);
    }
    if !is_valid_range(lon, RangeKind::Lon) {
        return Err(AxisKind::Longitude);
    }
    Ok(())
}
