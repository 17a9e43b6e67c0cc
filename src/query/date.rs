// src/query/date.rs

//! Parsing for the backend's `DD-MM-YYYY hh:mm AM|PM` timestamps.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{AppError, Result};

/// Parse a record timestamp such as `22-04-2025 12:31 PM`.
///
/// The meridian is optional; without one the hour is taken as-is.
pub fn parse_custom_date(input: &str) -> Result<NaiveDateTime> {
    let mut parts = input.split_whitespace();
    let date_part = parts
        .next()
        .ok_or_else(|| AppError::malformed(input, "missing date"))?;
    let time_part = parts
        .next()
        .ok_or_else(|| AppError::malformed(input, "missing time"))?;
    let meridian = parts.next();

    let date =
        parse_day_month_year(date_part).map_err(|reason| AppError::malformed(input, reason))?;

    let (hour, minute) = time_part
        .split_once(':')
        .ok_or_else(|| AppError::malformed(input, "time is not hh:mm"))?;
    let mut hour: u32 = hour
        .parse()
        .map_err(|_| AppError::malformed(input, "invalid hour"))?;
    let minute: u32 = minute
        .parse()
        .map_err(|_| AppError::malformed(input, "invalid minute"))?;

    match meridian.map(str::to_ascii_uppercase).as_deref() {
        Some("PM") if hour != 12 => hour += 12,
        Some("AM") if hour == 12 => hour = 0,
        Some("AM") | Some("PM") | None => {}
        Some(other) => {
            return Err(AppError::malformed(
                input,
                format!("unknown meridian '{}'", other),
            ));
        }
    }

    date.and_hms_opt(hour, minute, 0)
        .ok_or_else(|| AppError::malformed(input, "time out of range"))
}

/// Parse a filter bound.
///
/// Accepts `YYYY-MM-DD` and `DD-MM-YYYY` (both at midnight) as well as the
/// full record format.
pub fn parse_filter_date(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    if trimmed.contains(' ') {
        return parse_custom_date(trimmed);
    }

    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_day_month_year(trimmed).ok())
        .ok_or_else(|| AppError::malformed(input, "expected YYYY-MM-DD"))?;

    date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::malformed(input, "time out of range"))
}

fn parse_day_month_year(s: &str) -> std::result::Result<NaiveDate, &'static str> {
    let mut fields = s.split('-');
    let (Some(day), Some(month), Some(year), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err("date is not DD-MM-YYYY");
    };

    let day: u32 = day.parse().map_err(|_| "invalid day")?;
    let month: u32 = month.parse().map_err(|_| "invalid month")?;
    let year: i32 = year.parse().map_err(|_| "invalid year")?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or("date out of range")
}
