//! ISO calendar dates and the grid's day-offset timestamps.
//!
//! The reference grid was built in Brisbane local time (UTC+10, no daylight
//! saving). A date is taken at local midnight and shifted forward by the same
//! ten hours, which lands every date exactly on `days_since_epoch * 86400`.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};

const ISO_FORMAT: &str = "%Y-%m-%d";

/// Offset of the grid's reference zone from UTC, in seconds.
pub const GRID_UTC_OFFSET_SECS: i32 = 10 * 3600;

pub fn parse_iso(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, ISO_FORMAT)
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Seconds offset of `date` on the time axis.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use climgrid::iso_to_epoch_seconds;
///
/// let last = NaiveDate::from_ymd_opt(2014, 12, 31).unwrap();
/// assert_eq!(iso_to_epoch_seconds(last), 1_419_984_000);
/// ```
pub fn iso_to_epoch_seconds(date: NaiveDate) -> i64 {
    // Brisbane midnight plus the ten hour correction is UTC midnight of the same date.
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Calendar date of a time-axis offset, evaluated in the grid's reference zone.
pub fn epoch_seconds_to_iso(seconds: i64) -> Option<NaiveDate> {
    let zone = FixedOffset::east_opt(GRID_UTC_OFFSET_SECS)?;
    let instant = DateTime::from_timestamp(seconds, 0)?;
    Some(instant.with_timezone(&zone).date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::error::Error;

    #[test]
    fn test_grid_day_zero_and_last_day() -> Result<(), Box<dyn Error>> {
        let first = parse_iso("1970-01-01")?;
        let last = parse_iso("2014-12-31")?;
        assert_eq!(iso_to_epoch_seconds(first), 0);
        assert_eq!(iso_to_epoch_seconds(last), 1_419_984_000);
        assert_eq!(epoch_seconds_to_iso(0), Some(first));
        assert_eq!(epoch_seconds_to_iso(1_419_984_000), Some(last));
        Ok(())
    }

    #[test]
    fn test_every_date_is_a_whole_day_offset() -> Result<(), Box<dyn Error>> {
        let start = parse_iso("1999-12-25")?;
        for (i, date) in start.iter_days().take(20).enumerate() {
            let seconds = iso_to_epoch_seconds(date);
            assert_eq!(seconds % 86_400, 0);
            assert_eq!(seconds, iso_to_epoch_seconds(start) + i as i64 * 86_400);
            assert_eq!(epoch_seconds_to_iso(seconds), Some(date));
        }
        Ok(())
    }

    #[test]
    fn test_matches_brisbane_midnight_plus_offset() -> Result<(), Box<dyn Error>> {
        let zone = FixedOffset::east_opt(GRID_UTC_OFFSET_SECS).ok_or("bad offset")?;
        for iso in ["1970-01-01", "1988-06-30", "2000-02-29", "2014-12-31"] {
            let date = parse_iso(iso)?;
            let brisbane_midnight = zone
                .from_local_datetime(&date.and_time(NaiveTime::MIN))
                .single()
                .ok_or("ambiguous local time")?;
            assert_eq!(
                iso_to_epoch_seconds(date),
                brisbane_midnight.timestamp() + i64::from(GRID_UTC_OFFSET_SECS)
            );
        }
        Ok(())
    }

    #[test]
    fn test_iso_format_round_trip() -> Result<(), Box<dyn Error>> {
        let date = parse_iso("2008-02-29")?;
        assert_eq!(format_iso(date), "2008-02-29");
        assert!(parse_iso("2008-13-01").is_err());
        Ok(())
    }
}
