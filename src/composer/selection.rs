//! Temporal selections: a grouping (day, month, quarter, year) combined with
//! an extent (a single unit, a year's units, a year range, ...).

use crate::grid::interval::Interval;
use crate::grid::validators::{
    is_valid_month, is_valid_quarter, is_valid_range, is_valid_year, is_valid_year_range,
    RangeKind,
};
use crate::indexer::labels;
use crate::types::time_label::{Granularity, TimeLabel};
use crate::types::traits::types::{Month, Quarter, Year};
use chrono::NaiveDate;

/// How far a selection reaches in time, independent of its grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extent {
    /// Exactly one unit.
    Single(TimeLabel),
    /// Every unit of one year.
    WithinYear(i32),
    /// Every unit of every year in a range.
    AcrossYears(Interval<i32>),
    /// One fixed unit (month or quarter number) in every year of a range.
    UnitAcrossYears { years: Interval<i32>, unit: u32 },
    /// A range of unit numbers within one year.
    SubRange { year: i32, units: Interval<u32> },
    /// Every unit from one label to another, across year boundaries.
    Span { from: TimeLabel, to: TimeLabel },
}

/// A validated pairing of [`Granularity`] and [`Extent`].
///
/// Only 13 pairings are meaningful; each has a named constructor and
/// [`Selection::new`] rejects the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    grouping: Granularity,
    extent: Extent,
}

impl Selection {
    /// Pairs a grouping with an extent, or `None` when the pairing is not
    /// one of the supported report shapes.
    pub fn new(grouping: Granularity, extent: Extent) -> Option<Self> {
        let supported = match (grouping, &extent) {
            (Granularity::Month, Extent::Single(TimeLabel::Month(_))) => true,
            (Granularity::Quarter, Extent::Single(TimeLabel::Quarter(_))) => true,
            (Granularity::Year, Extent::Single(TimeLabel::Year(_))) => true,
            (Granularity::Month | Granularity::Quarter, Extent::WithinYear(_)) => true,
            (Granularity::Month | Granularity::Quarter | Granularity::Year, Extent::AcrossYears(_)) => {
                true
            }
            (Granularity::Month | Granularity::Quarter, Extent::UnitAcrossYears { .. }) => true,
            (Granularity::Month, Extent::SubRange { .. }) => true,
            (
                Granularity::Month,
                Extent::Span {
                    from: TimeLabel::Month(_),
                    to: TimeLabel::Month(_),
                },
            ) => true,
            (
                Granularity::Day,
                Extent::Span {
                    from: TimeLabel::Day(_),
                    to: TimeLabel::Day(_),
                },
            ) => true,
            _ => false,
        };
        supported.then_some(Self { grouping, extent })
    }

    fn of(grouping: Granularity, extent: Extent) -> Self {
        Self { grouping, extent }
    }

    pub fn one_year_one_month(year: i32, month: u32) -> Self {
        Self::of(Granularity::Month, Extent::Single(Month(year, month).into()))
    }

    pub fn one_year_all_months(year: i32) -> Self {
        Self::of(Granularity::Month, Extent::WithinYear(year))
    }

    pub fn years_all_months(years: Interval<i32>) -> Self {
        Self::of(Granularity::Month, Extent::AcrossYears(years))
    }

    pub fn years_one_month(years: Interval<i32>, month: u32) -> Self {
        Self::of(Granularity::Month, Extent::UnitAcrossYears { years, unit: month })
    }

    pub fn one_year_month_range(year: i32, months: Interval<u32>) -> Self {
        Self::of(Granularity::Month, Extent::SubRange { year, units: months })
    }

    /// Every month from `from` to `to`, both included.
    pub fn fromto(from: Month, to: Month) -> Self {
        Self::of(
            Granularity::Month,
            Extent::Span {
                from: from.into(),
                to: to.into(),
            },
        )
    }

    pub fn one_year_one_quarter(year: i32, quarter: u32) -> Self {
        Self::of(Granularity::Quarter, Extent::Single(Quarter(year, quarter).into()))
    }

    pub fn one_year_all_quarters(year: i32) -> Self {
        Self::of(Granularity::Quarter, Extent::WithinYear(year))
    }

    pub fn years_all_quarters(years: Interval<i32>) -> Self {
        Self::of(Granularity::Quarter, Extent::AcrossYears(years))
    }

    pub fn years_one_quarter(years: Interval<i32>, quarter: u32) -> Self {
        Self::of(
            Granularity::Quarter,
            Extent::UnitAcrossYears {
                years,
                unit: quarter,
            },
        )
    }

    pub fn one_year(year: i32) -> Self {
        Self::of(Granularity::Year, Extent::Single(Year(year).into()))
    }

    pub fn years(years: Interval<i32>) -> Self {
        Self::of(Granularity::Year, Extent::AcrossYears(years))
    }

    /// One row group per calendar day of `days`.
    pub fn days(days: Interval<NaiveDate>) -> Self {
        Self::of(
            Granularity::Day,
            Extent::Span {
                from: days.lo.into(),
                to: days.hi.into(),
            },
        )
    }

    pub fn grouping(&self) -> Granularity {
        self.grouping
    }

    pub fn extent(&self) -> &Extent {
        &self.extent
    }

    /// Name of the report operation this selection corresponds to.
    pub fn operation_name(&self) -> &'static str {
        match (self.grouping, &self.extent) {
            (Granularity::Month, Extent::Single(_)) => "one_year_one_month",
            (Granularity::Month, Extent::WithinYear(_)) => "one_year_all_months",
            (Granularity::Month, Extent::AcrossYears(_)) => "years_all_months",
            (Granularity::Month, Extent::UnitAcrossYears { .. }) => "years_one_month",
            (Granularity::Month, Extent::SubRange { .. }) => "one_year_month_range",
            (Granularity::Month, Extent::Span { .. }) => "fromto",
            (Granularity::Quarter, Extent::Single(_)) => "one_year_one_quarter",
            (Granularity::Quarter, Extent::WithinYear(_)) => "one_year_all_quarters",
            (Granularity::Quarter, Extent::AcrossYears(_)) => "years_all_quarters",
            (Granularity::Quarter, _) => "years_one_quarter",
            (Granularity::Year, Extent::Single(_)) => "one_year",
            (Granularity::Year, _) => "years",
            (Granularity::Day, _) => "days",
        }
    }

    /// Header of the label column, or `None` when the selection covers a
    /// single month or quarter and the report carries coordinates only.
    pub fn label_field(&self) -> Option<&'static str> {
        match (self.grouping, &self.extent) {
            (Granularity::Month | Granularity::Quarter, Extent::Single(_)) => None,
            (grouping, _) => Some(grouping.label_field()),
        }
    }

    /// `true` when every year, unit number and date of the selection lies on
    /// the grid and ranges are ordered.
    pub fn is_valid(&self) -> bool {
        let unit_ok = |unit: u32| match self.grouping {
            Granularity::Quarter => is_valid_quarter(unit),
            _ => is_valid_month(unit),
        };
        match &self.extent {
            Extent::Single(TimeLabel::Month(month)) => {
                is_valid_year(month.year()) && is_valid_month(month.month())
            }
            Extent::Single(TimeLabel::Quarter(quarter)) => {
                is_valid_year(quarter.year()) && is_valid_quarter(quarter.quarter())
            }
            Extent::Single(TimeLabel::Year(year)) => is_valid_year(year.get()),
            Extent::Single(TimeLabel::Day(_)) => false,
            Extent::WithinYear(year) => is_valid_year(*year),
            Extent::AcrossYears(years) => is_valid_year_range(years),
            Extent::UnitAcrossYears { years, unit } => is_valid_year_range(years) && unit_ok(*unit),
            Extent::SubRange { year, units } => {
                is_valid_year(*year) && is_valid_range(units, RangeKind::Month)
            }
            Extent::Span {
                from: TimeLabel::Month(from),
                to: TimeLabel::Month(to),
            } => {
                is_valid_year(from.year())
                    && is_valid_year(to.year())
                    && is_valid_month(from.month())
                    && is_valid_month(to.month())
                    && from <= to
            }
            Extent::Span {
                from: TimeLabel::Day(from),
                to: TimeLabel::Day(to),
            } => is_valid_range(&Interval::new(*from, *to), RangeKind::Time),
            Extent::Span { .. } => false,
        }
    }

    /// The ordered time labels this selection covers.
    pub fn labels(&self) -> Vec<TimeLabel> {
        match (self.grouping, &self.extent) {
            (_, Extent::Single(label)) => vec![*label],
            (Granularity::Quarter, Extent::WithinYear(year)) => labels::year_quarters(*year),
            (_, Extent::WithinYear(year)) => labels::year_months(*year),
            (Granularity::Quarter, Extent::AcrossYears(years)) => labels::years_quarters(*years),
            (Granularity::Year, Extent::AcrossYears(years)) => labels::years(*years),
            (_, Extent::AcrossYears(years)) => labels::years_months(*years),
            (Granularity::Quarter, Extent::UnitAcrossYears { years, unit }) => {
                labels::years_quarter(*years, *unit)
            }
            (_, Extent::UnitAcrossYears { years, unit }) => labels::years_month(*years, *unit),
            (_, Extent::SubRange { year, units }) => labels::year_month_range(*year, *units),
            (
                _,
                Extent::Span {
                    from: TimeLabel::Month(from),
                    to: TimeLabel::Month(to),
                },
            ) => labels::month_span(*from, *to),
            (
                _,
                Extent::Span {
                    from: TimeLabel::Day(from),
                    to: TimeLabel::Day(to),
                },
            ) => labels::day_span(Interval::new(*from, *to)),
            (_, Extent::Span { .. }) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    fn all_operations() -> Vec<Selection> {
        let years = Interval::new(1990, 1992);
        vec![
            Selection::one_year_one_month(1990, 3),
            Selection::one_year_all_months(1990),
            Selection::years_all_months(years),
            Selection::years_one_month(years, 7),
            Selection::one_year_month_range(1990, Interval::new(2, 4)),
            Selection::fromto(Month(1990, 10), Month(1991, 3)),
            Selection::one_year_one_quarter(1990, 2),
            Selection::one_year_all_quarters(1990),
            Selection::years_all_quarters(years),
            Selection::years_one_quarter(years, 3),
            Selection::one_year(1990),
            Selection::years(years),
            Selection::days(Interval::new(date(1990, 1, 1), date(1990, 1, 10))),
        ]
    }

    #[test]
    fn test_thirteen_distinct_operations() {
        let operations = all_operations();
        let mut names: Vec<_> = operations.iter().map(Selection::operation_name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 13);
        for selection in &operations {
            assert!(selection.is_valid(), "{} should be valid", selection.operation_name());
            assert_eq!(
                Selection::new(selection.grouping(), *selection.extent()),
                Some(*selection)
            );
        }
    }

    #[test]
    fn test_unsupported_pairings_are_rejected() {
        assert!(Selection::new(Granularity::Year, Extent::WithinYear(1990)).is_none());
        assert!(Selection::new(
            Granularity::Quarter,
            Extent::SubRange {
                year: 1990,
                units: Interval::new(1, 2)
            }
        )
        .is_none());
        assert!(Selection::new(Granularity::Day, Extent::AcrossYears(Interval::new(1990, 1991))).is_none());
        assert!(Selection::new(Granularity::Month, Extent::Single(Year(1990).into())).is_none());
    }

    #[test]
    fn test_label_counts_and_fields() {
        let expected = [
            (1, None),
            (12, Some("year-month")),
            (36, Some("year-month")),
            (3, Some("year-month")),
            (3, Some("year-month")),
            (6, Some("year-month")),
            (1, None),
            (4, Some("year-quarter")),
            (12, Some("year-quarter")),
            (3, Some("year-quarter")),
            (1, Some("year")),
            (3, Some("year")),
            (10, Some("date")),
        ];
        for (selection, (count, field)) in all_operations().iter().zip(expected) {
            assert_eq!(selection.labels().len(), count, "{}", selection.operation_name());
            assert_eq!(selection.label_field(), field, "{}", selection.operation_name());
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let invalid = [
            Selection::one_year_one_month(1969, 3),
            Selection::one_year_one_month(1990, 13),
            Selection::years_all_months(Interval::new(2010, 2005)),
            Selection::years_one_month(Interval::new(1990, 1991), 0),
            Selection::one_year_month_range(1990, Interval::new(5, 5)),
            Selection::fromto(Month(1991, 3), Month(1990, 10)),
            Selection::fromto(Month(1990, 3), Month(2015, 1)),
            Selection::one_year_one_quarter(1990, 5),
            Selection::years_one_quarter(Interval::new(1990, 1991), 0),
            Selection::one_year(2015),
            Selection::years(Interval::new(1990, 1990)),
            Selection::days(Interval::new(date(1990, 1, 2), date(1990, 1, 1))),
        ];
        for selection in invalid {
            assert!(!selection.is_valid(), "{:?} should be invalid", selection);
        }
        assert!(Selection::fromto(Month(1990, 4), Month(1990, 4)).is_valid());
    }
}
