//! # Feature: Time Parsing
//!
//! Resolves free-form reminder time expressions ("at 5pm", "tomorrow",
//! weekday names) into an absolute local datetime. Times already in the
//! past roll forward so a resolved reminder is always in the future.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release with clock, tomorrow, and weekday resolution

use chrono::{Datelike, Days, NaiveDateTime, NaiveTime, Weekday};
use regex::Regex;

const WEEKDAYS: &[(&str, Weekday)] = &[
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

/// Resolve a time expression relative to `now`.
///
/// Rules, in order:
/// - "tomorrow" advances the date one day and pins it there.
/// - A weekday name advances to the next occurrence of that weekday.
/// - A clock time ("at 5", "9:30 pm") sets the time of day; without one the
///   current time of day is kept.
/// - A result that is not in the future rolls forward (one day, or a full
///   week when the expression named today's weekday).
pub fn resolve(expression: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let lowercase_expr = expression.to_lowercase();

    let explicit_tomorrow = lowercase_expr.contains("tomorrow");
    let named_weekday = if explicit_tomorrow {
        None
    } else {
        find_weekday(&lowercase_expr)
    };

    let mut date = now.date();
    if explicit_tomorrow {
        date = date.checked_add_days(Days::new(1))?;
    } else if let Some(weekday) = named_weekday {
        let today = now.date().weekday().num_days_from_monday();
        let target = weekday.num_days_from_monday();
        let days_ahead = (target + 7 - today) % 7;
        date = date.checked_add_days(Days::new(u64::from(days_ahead)))?;
    }

    let time = extract_clock(&lowercase_expr).unwrap_or_else(|| now.time());
    let mut resolved = date.and_time(time);

    if resolved <= now && !explicit_tomorrow {
        // A weekday expression naming today means the next occurrence a week
        // out; anything else rolls to the same time tomorrow.
        let bump = if named_weekday.is_some() { 7 } else { 1 };
        resolved = date.checked_add_days(Days::new(bump))?.and_time(time);
    }

    Some(resolved)
}

/// Format a resolved datetime as an ISO-8601 local timestamp.
pub fn to_iso(datetime: &NaiveDateTime) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Format a resolved datetime for display in a reply.
pub fn humanize(datetime: &NaiveDateTime) -> String {
    datetime.format("%A, %b %-d at %-I:%M %p").to_string()
}

fn find_weekday(lowercase_expr: &str) -> Option<Weekday> {
    WEEKDAYS
        .iter()
        .find(|(name, _)| lowercase_expr.contains(name))
        .map(|&(_, weekday)| weekday)
}

/// Extract hour/minute/meridiem from the expression.
///
/// PM adds 12 unless the hour is already >= 12; 12 AM maps to hour 0.
fn extract_clock(lowercase_expr: &str) -> Option<NaiveTime> {
    let clock = Regex::new(r"(\d{1,2})(?::([0-5]\d))?\s*(am|pm|a\.m\.|p\.m\.)?").unwrap();
    let captures = clock.captures(lowercase_expr)?;

    let mut hour: u32 = captures.get(1)?.as_str().parse().ok()?;
    let minute: u32 = captures
        .get(2)
        .map(|m| m.as_str().parse().unwrap_or(0))
        .unwrap_or(0);
    let meridiem = captures.get(3).map(|m| m.as_str());

    match meridiem {
        Some(m) if m.starts_with('p') => {
            if hour < 12 {
                hour += 12;
            }
        }
        Some(m) if m.starts_with('a') => {
            if hour == 12 {
                hour = 0;
            }
        }
        _ => {}
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}
