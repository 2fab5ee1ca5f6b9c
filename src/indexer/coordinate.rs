//! Physical value to grid offset, and physical range to explicit axis values.

use crate::grid::axis::{AxisKind, GridAxis, TIME};
use crate::grid::interval::Interval;
use crate::types::epoch::iso_to_epoch_seconds;
use chrono::NaiveDate;
use ndarray::Array1;

/// Storage offset of `value` on `axis`, or `None` when it lies outside the axis.
///
/// Latitude is looked up by magnitude, so `-27.47` and `27.47` land on the
/// same row. Time values are epoch seconds (see [`date_to_index`]). Offsets
/// round half to even.
///
/// # Example
///
/// ```
/// use climgrid::{coordinate_to_index, LATITUDE, LONGITUDE};
///
/// assert_eq!(coordinate_to_index(-9.005, &LATITUDE), Some(0));
/// assert_eq!(coordinate_to_index(-43.735, &LATITUDE), Some(3473));
/// assert_eq!(coordinate_to_index(100.0, &LONGITUDE), None);
/// ```
pub fn coordinate_to_index(value: f64, axis: &GridAxis) -> Option<usize> {
    let value = match axis.kind {
        AxisKind::Latitude => value.abs(),
        AxisKind::Longitude | AxisKind::Time => value,
    };
    if !(axis.min..=axis.max).contains(&value) {
        return None;
    }
    if value == axis.min {
        return Some(axis.idx_min);
    }
    if value == axis.max {
        return Some(axis.idx_max);
    }
    let offset = ((value - axis.min) / axis.delta).round_ties_even() as usize;
    Some((axis.idx_min + offset).min(axis.idx_max))
}

/// Time-axis offset of a calendar day.
pub fn date_to_index(date: NaiveDate) -> Option<usize> {
    coordinate_to_index(iso_to_epoch_seconds(date) as f64, &TIME)
}

/// Number of values [`range_to_axis_vector`] produces for `range`.
pub fn axis_vector_len(range: &Interval<f64>, axis: &GridAxis) -> usize {
    let cells = ((range.hi - range.lo) / axis.delta).round_ties_even();
    cells.max(0.0) as usize + axis.vector_padding
}

/// Expands `range` into explicit axis values rounded to three decimals.
///
/// Latitudes come out nearest the equator first: the vector is spaced over
/// the magnitudes `[-hi, -lo]` and negated, so `(-28.0, -27.0)` starts at
/// `-27.0` and ends at `-28.0`. Other axes are plain ascending.
pub fn range_to_axis_vector(range: &Interval<f64>, axis: &GridAxis) -> Vec<f64> {
    let n = axis_vector_len(range, axis);
    match axis.kind {
        AxisKind::Latitude => Array1::linspace(-range.hi, -range.lo, n)
            .into_iter()
            .map(|magnitude| round3(-magnitude))
            .collect(),
        AxisKind::Longitude | AxisKind::Time => Array1::linspace(range.lo, range.hi, n)
            .into_iter()
            .map(round3)
            .collect(),
    }
}

fn round3(value: f64) -> f64 {
    let rounded = (value * 1000.0).round_ties_even() / 1000.0;
    // Keep -0.0 out of the output.
    rounded + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::axis::{LATITUDE, LONGITUDE};

    #[test]
    fn test_axis_ends_map_to_index_bounds() {
        for axis in [LATITUDE, LONGITUDE, TIME] {
            assert_eq!(coordinate_to_index(axis.min, &axis), Some(axis.idx_min));
            assert_eq!(coordinate_to_index(axis.max, &axis), Some(axis.idx_max));
        }
        assert_eq!(coordinate_to_index(-LATITUDE.max, &LATITUDE), Some(LATITUDE.idx_max));
    }

    #[test]
    fn test_out_of_range_is_not_found() {
        assert_eq!(coordinate_to_index(-8.0, &LATITUDE), None);
        assert_eq!(coordinate_to_index(-44.0, &LATITUDE), None);
        assert_eq!(coordinate_to_index(112.0, &LONGITUDE), None);
        assert_eq!(coordinate_to_index(154.0, &LONGITUDE), None);
        assert_eq!(coordinate_to_index(-86_400.0, &TIME), None);
        assert_eq!(coordinate_to_index(f64::NAN, &TIME), None);
    }

    #[test]
    fn test_index_is_monotonic() {
        let mut previous = 0;
        let mut lon = LONGITUDE.min;
        while lon <= LONGITUDE.max {
            let idx = coordinate_to_index(lon, &LONGITUDE).unwrap();
            assert!(idx >= previous);
            assert!(idx <= LONGITUDE.idx_max);
            previous = idx;
            lon += 0.137;
        }
    }

    #[test]
    fn test_date_index_counts_days() {
        let first = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let leap_day = NaiveDate::from_ymd_opt(1972, 2, 29).unwrap();
        let last = NaiveDate::from_ymd_opt(2014, 12, 31).unwrap();
        let after = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        assert_eq!(date_to_index(first), Some(0));
        assert_eq!(date_to_index(leap_day), Some(365 + 365 + 31 + 28));
        assert_eq!(date_to_index(last), Some(16435));
        assert_eq!(date_to_index(after), None);
    }

    #[test]
    fn test_latitude_vector_is_equator_first() {
        let values = range_to_axis_vector(&Interval::new(-28.0, -27.0), &LATITUDE);
        assert_eq!(values.len(), 102);
        assert_eq!(values.first(), Some(&-27.0));
        assert_eq!(values.last(), Some(&-28.0));
        assert!(values.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_longitude_vector_steps_by_delta() {
        let range = Interval::new(150.0, 151.0);
        let values = range_to_axis_vector(&range, &LONGITUDE);
        assert_eq!(values.len(), 101);
        assert_eq!(values[0], 150.0);
        assert_eq!(values[100], 151.0);
        for pair in values.windows(2) {
            assert!(((pair[1] - pair[0]) - LONGITUDE.delta).abs() < 1e-9);
        }
        for value in &values {
            assert!(coordinate_to_index(*value, &LONGITUDE).is_some());
        }
    }
}
