//! Calendar units that identify one row group of a report.

use crate::types::epoch::format_iso;
use crate::types::traits::types::{Month, Quarter, Year};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar resolution of a report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Month,
    Quarter,
    Year,
}

impl Granularity {
    /// Header of the label column in a report.
    pub fn label_field(&self) -> &'static str {
        match self {
            Granularity::Day => "date",
            Granularity::Month => "year-month",
            Granularity::Quarter => "year-quarter",
            Granularity::Year => "year",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
        };
        write!(f, "{}", name)
    }
}

/// One calendar unit: `1995-07-14`, `1995-07`, `1995-q3` or `1995`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeLabel {
    Day(NaiveDate),
    Month(Month),
    Quarter(Quarter),
    Year(Year),
}

impl TimeLabel {
    pub fn granularity(&self) -> Granularity {
        match self {
            TimeLabel::Day(_) => Granularity::Day,
            TimeLabel::Month(_) => Granularity::Month,
            TimeLabel::Quarter(_) => Granularity::Quarter,
            TimeLabel::Year(_) => Granularity::Year,
        }
    }
}

impl fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeLabel::Day(date) => write!(f, "{}", format_iso(*date)),
            TimeLabel::Month(month) => write!(f, "{}", month),
            TimeLabel::Quarter(quarter) => write!(f, "{}", quarter),
            TimeLabel::Year(year) => write!(f, "{}", year),
        }
    }
}

impl From<Month> for TimeLabel {
    fn from(month: Month) -> Self {
        TimeLabel::Month(month)
    }
}

impl From<Quarter> for TimeLabel {
    fn from(quarter: Quarter) -> Self {
        TimeLabel::Quarter(quarter)
    }
}

impl From<Year> for TimeLabel {
    fn from(year: Year) -> Self {
        TimeLabel::Year(year)
    }
}

impl From<NaiveDate> for TimeLabel {
    fn from(date: NaiveDate) -> Self {
        TimeLabel::Day(date)
    }
}
