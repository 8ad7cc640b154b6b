// Parsing of user-typed values (estimates, dates, ids) into what the API
// expects, plus the inverse formatting used when printing tasks.

use crate::error::{Error, Result};
use chrono::{Local, NaiveDate, TimeZone};

const MS_PER_MINUTE: u64 = 60_000;

/// Parse `2h`, `30m` or `1h30m` into milliseconds.
pub fn parse_time_estimate(value: &str) -> Result<u64> {
    let invalid = || {
        Error::Validation(format!(
            "Invalid time estimate '{value}'. Use format like '2h', '30m', or '1h30m'."
        ))
    };

    let mut rest = value;
    let mut hours = None;
    let mut minutes = None;

    if let Some((digits, tail)) = take_unit(rest, 'h') {
        hours = Some(digits.parse::<u64>().map_err(|_| invalid())?);
        rest = tail;
    }
    if let Some((digits, tail)) = take_unit(rest, 'm') {
        minutes = Some(digits.parse::<u64>().map_err(|_| invalid())?);
        rest = tail;
    }
    if !rest.is_empty() || (hours.is_none() && minutes.is_none()) {
        return Err(invalid());
    }

    let total_minutes = hours
        .unwrap_or(0)
        .checked_mul(60)
        .and_then(|m| m.checked_add(minutes.unwrap_or(0)))
        .ok_or_else(invalid)?;
    total_minutes.checked_mul(MS_PER_MINUTE).ok_or_else(invalid)
}

/// Split a leading run of ASCII digits followed by `unit`.
fn take_unit(input: &str, unit: char) -> Option<(&str, &str)> {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    let tail = input[end..].strip_prefix(unit)?;
    Some((&input[..end], tail))
}

/// Parse `YYYY-MM-DD` as local midnight, in epoch milliseconds.
pub fn parse_due_date(value: &str) -> Result<i64> {
    let invalid = || Error::Validation(format!("Invalid due date '{value}'. Use YYYY-MM-DD."));
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(invalid)
}

pub fn parse_assignee(value: &str) -> Result<i64> {
    value.trim().parse::<i64>().map_err(|_| {
        Error::Validation(format!(
            "Invalid assignee '{value}'. Use the numeric ClickUp user id."
        ))
    })
}

pub fn format_time_estimate(ms: Option<u64>) -> String {
    let total_minutes = match ms {
        Some(ms) if ms > 0 => ms / MS_PER_MINUTE,
        _ => return "-".to_string(),
    };
    let (hours, minutes) = (total_minutes / 60, total_minutes % 60);
    match (hours, minutes) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h{m}m"),
    }
}

/// Render an epoch-millisecond string as local `MM-DD HH:MM`. Values that
/// are not numbers are shown as-is.
pub fn format_due_date(due_date: Option<&str>) -> String {
    let Some(raw) = due_date.filter(|d| !d.is_empty()) else {
        return "-".to_string();
    };
    raw.parse::<i64>()
        .ok()
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|dt| dt.format("%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_estimates() {
        assert_eq!(parse_time_estimate("2h").unwrap(), 7_200_000);
        assert_eq!(parse_time_estimate("30m").unwrap(), 1_800_000);
        assert_eq!(parse_time_estimate("1h30m").unwrap(), 5_400_000);
        assert_eq!(parse_time_estimate("0h5m").unwrap(), 300_000);
    }

    #[test]
    fn bad_time_estimates() {
        for input in ["abc", "", "h", "30", "30m2h", "1h30", "1d", " 2h", "2h "] {
            assert!(
                matches!(parse_time_estimate(input), Err(Error::Validation(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn due_date_is_local_midnight() {
        let ms = parse_due_date("2026-03-14").unwrap();
        let dt = Local.timestamp_millis_opt(ms).single().unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2026-03-14 00:00");
        assert!(parse_due_date("14/03/2026").is_err());
        assert!(parse_due_date("2026-02-30").is_err());
    }

    #[test]
    fn assignee_ids() {
        assert_eq!(parse_assignee("12345").unwrap(), 12345);
        assert!(parse_assignee("ana").is_err());
    }

    #[test]
    fn format_estimates() {
        assert_eq!(format_time_estimate(None), "-");
        assert_eq!(format_time_estimate(Some(0)), "-");
        assert_eq!(format_time_estimate(Some(1_800_000)), "30m");
        assert_eq!(format_time_estimate(Some(7_200_000)), "2h");
        assert_eq!(format_time_estimate(Some(5_400_000)), "1h30m");
    }

    #[test]
    fn format_due_dates() {
        assert_eq!(format_due_date(None), "-");
        assert_eq!(format_due_date(Some("soon")), "soon");
        let ms = parse_due_date("2026-07-01").unwrap().to_string();
        assert_eq!(format_due_date(Some(&ms)), "07-01 00:00");
    }
}
