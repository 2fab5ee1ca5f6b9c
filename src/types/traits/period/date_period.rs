use crate::types::time_label::TimeLabel;
use crate::types::traits::types::{Month, Quarter, StartEndDate, Year};
use crate::types::traits::utils::{days_in_month, quarter_months};
use chrono::NaiveDate;

/// Resolves a calendar unit into its inclusive first and last day.
///
/// Returns `None` when the unit does not name a real calendar period
/// (month 13, quarter 0, a year chrono cannot represent).
pub trait DatePeriod {
    fn get_date_period(self) -> Option<StartEndDate>;
}

impl DatePeriod for Year {
    fn get_date_period(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: NaiveDate::from_ymd_opt(self.0, 1, 1)?,
            end: NaiveDate::from_ymd_opt(self.0, 12, 31)?,
        })
    }
}

impl DatePeriod for Month {
    fn get_date_period(self) -> Option<StartEndDate> {
        let year = self.year();
        let month = self.month();
        Some(StartEndDate {
            start: NaiveDate::from_ymd_opt(year, month, 1)?,
            end: NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?)?,
        })
    }
}

impl DatePeriod for Quarter {
    fn get_date_period(self) -> Option<StartEndDate> {
        let (first, last) = quarter_months(self.quarter())?;
        Some(StartEndDate {
            start: Month(self.year(), first).get_date_period()?.start,
            end: Month(self.year(), last).get_date_period()?.end,
        })
    }
}

impl DatePeriod for NaiveDate {
    fn get_date_period(self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: self,
            end: self,
        })
    }
}

impl DatePeriod for TimeLabel {
    fn get_date_period(self) -> Option<StartEndDate> {
        match self {
            TimeLabel::Day(date) => date.get_date_period(),
            TimeLabel::Month(month) => month.get_date_period(),
            TimeLabel::Quarter(quarter) => quarter.get_date_period(),
            TimeLabel::Year(year) => year.get_date_period(),
        }
    }
}

/// First and last day of `month` in `year`.
pub fn year_month_to_date_range(year: i32, month: u32) -> Option<StartEndDate> {
    Month(year, month).get_date_period()
}

/// `YYYY-01-01` to `YYYY-12-31`.
pub fn year_to_date_range(year: i32) -> Option<StartEndDate> {
    Year(year).get_date_period()
}

/// Fixed quarter boundaries: Q1 Jan-Mar, Q2 Apr-Jun, Q3 Jul-Sep, Q4 Oct-Dec.
pub fn year_quarter_to_date_range(year: i32, quarter: u32) -> Option<StartEndDate> {
    Quarter(year, quarter).get_date_period()
}
