use crate::error::{Result, TimesheetError};
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use std::fmt::Display;

/// ISO calendar day of a timestamp in its own offset, the key used for
/// daily buckets.
pub fn day_key<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    timestamp.format("%Y-%m-%d").to_string()
}

/// Parse a `--since` / `--until` value relative to `now`.
///
/// Returns `None` for `always`. Accepts the keywords `today`, `yesterday`,
/// `thisweek`, `lastweek`, `thismonth`, `lastmonth`, a `YYYY-MM-DD` date,
/// an RFC3339 instant, or a duration such as `2weeks` or `3 days ago`.
/// Keywords and plain dates start at midnight in the time zone of `now`.
pub fn parse_date_input<Tz: TimeZone>(
    input: &str,
    now: &DateTime<Tz>,
) -> Result<Option<DateTime<Utc>>> {
    let input = input.trim();
    let lowered = input.to_lowercase();
    if matches!(lowered.as_str(), "" | "always") {
        return Ok(None);
    }

    if let Some(date) = keyword_date(&lowered, now.date_naive()) {
        return start_of_day(&now.timezone(), date).map(Some);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return start_of_day(&now.timezone(), date).map(Some);
    }

    if let Some(ago) = parse_relative(input) {
        let overflow = || TimesheetError::InvalidDate(format!("Duration overflow for '{input}'"));
        let ago = Duration::from_std(ago).map_err(|_| overflow())?;
        return now
            .clone()
            .checked_sub_signed(ago)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .ok_or_else(overflow);
    }

    Err(TimesheetError::InvalidDate(format!(
        "'{input}' is not one of always, today, yesterday, thisweek, lastweek, thismonth, lastmonth, YYYY-MM-DD, RFC3339 or a duration like '2weeks'"
    )))
}

fn keyword_date(keyword: &str, today: NaiveDate) -> Option<NaiveDate> {
    let week_start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let month_start = today.with_day(1)?;
    match keyword {
        "today" => Some(today),
        "yesterday" => today.pred_opt(),
        "thisweek" => Some(week_start),
        "lastweek" => Some(week_start - Duration::weeks(1)),
        "thismonth" => Some(month_start),
        "lastmonth" => month_start.checked_sub_months(Months::new(1)),
        _ => None,
    }
}

fn parse_relative(input: &str) -> Option<std::time::Duration> {
    let lowered = input.to_lowercase();
    let trimmed = lowered.strip_suffix("ago").unwrap_or(&lowered);
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }
    humantime::parse_duration(&compact).ok()
}

/// First instant of `date` in `tz`, skipping forward over a DST gap at midnight.
fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Result<DateTime<Utc>> {
    (0..=2)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .find_map(|time| tz.from_local_datetime(&date.and_time(time)).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| TimesheetError::InvalidDate(format!("No local midnight on {date}")))
}
