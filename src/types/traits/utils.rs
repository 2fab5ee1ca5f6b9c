use chrono::{Datelike, Duration, NaiveDate};

pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_month_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_day_of_next_month = NaiveDate::from_ymd_opt(next_month_year, next_month, 1)?;
    let last_day_of_current_month = first_day_of_next_month - Duration::days(1);
    Some(last_day_of_current_month.day())
}

/// First and last month of a calendar quarter.
pub(crate) fn quarter_months(quarter: u32) -> Option<(u32, u32)> {
    match quarter {
        1 => Some((1, 3)),
        2 => Some((4, 6)),
        3 => Some((7, 9)),
        4 => Some((10, 12)),
        _ => None,
    }
}
