//! Expansion of calendar selections into ordered [`TimeLabel`] sequences.
//!
//! Every function returns labels in ascending chronological order. Inputs are
//! expected to be validated already; an inverted range simply yields nothing.

use crate::grid::interval::Interval;
use crate::types::time_label::TimeLabel;
use crate::types::traits::types::{Month, Quarter, Year};
use chrono::NaiveDate;
use std::iter;

/// The 12 months of `year`.
pub fn year_months(year: i32) -> Vec<TimeLabel> {
    year_month_range(year, Interval::new(1, 12))
}

/// Months `months.lo..=months.hi` of `year`.
pub fn year_month_range(year: i32, months: Interval<u32>) -> Vec<TimeLabel> {
    (months.lo..=months.hi)
        .map(|month| TimeLabel::Month(Month(year, month)))
        .collect()
}

/// Every month of every year in `years`.
pub fn years_months(years: Interval<i32>) -> Vec<TimeLabel> {
    (years.lo..=years.hi).flat_map(year_months).collect()
}

/// One fixed month in every year of `years`.
pub fn years_month(years: Interval<i32>, month: u32) -> Vec<TimeLabel> {
    (years.lo..=years.hi)
        .map(|year| TimeLabel::Month(Month(year, month)))
        .collect()
}

/// The 4 quarters of `year`.
pub fn year_quarters(year: i32) -> Vec<TimeLabel> {
    (1..=4)
        .map(|quarter| TimeLabel::Quarter(Quarter(year, quarter)))
        .collect()
}

/// Every quarter of every year in `years`.
pub fn years_quarters(years: Interval<i32>) -> Vec<TimeLabel> {
    (years.lo..=years.hi).flat_map(year_quarters).collect()
}

/// One fixed quarter in every year of `years`.
pub fn years_quarter(years: Interval<i32>, quarter: u32) -> Vec<TimeLabel> {
    (years.lo..=years.hi)
        .map(|year| TimeLabel::Quarter(Quarter(year, quarter)))
        .collect()
}

/// Every month from `from` to `to`, both included, across year boundaries.
///
/// The first year contributes its months from `from` onwards, intermediate
/// years all 12, and the last year its months up to `to`.
///
/// # Example
///
/// ```
/// use climgrid::{month_span, Month};
///
/// let labels: Vec<String> = month_span(Month(1990, 10), Month(1991, 3))
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(labels, ["1990-10", "1990-11", "1990-12", "1991-01", "1991-02", "1991-03"]);
/// ```
pub fn month_span(from: Month, to: Month) -> Vec<TimeLabel> {
    iter::successors(Some(from), |month| Some(month.succ()))
        .take_while(|month| *month <= to)
        .map(TimeLabel::Month)
        .collect()
}

/// One year label per year in `years`.
pub fn years(years: Interval<i32>) -> Vec<TimeLabel> {
    (years.lo..=years.hi)
        .map(|year| TimeLabel::Year(Year(year)))
        .collect()
}

/// One day label per calendar day in `days`, both ends included.
pub fn day_span(days: Interval<NaiveDate>) -> Vec<TimeLabel> {
    days.lo
        .iter_days()
        .take_while(|day| *day <= days.hi)
        .map(TimeLabel::Day)
        .collect()
}
