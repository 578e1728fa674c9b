//! Shared helper functions for CLI commands

use chrono::{DateTime, TimeDelta, Utc};

/// Describe `then` relative to `now`, e.g. "an hour ago" or "3 days from now"
pub fn natural_time(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(then);
    let future = delta < TimeDelta::zero();
    let text = natural_delta(delta.abs());

    if text == "a moment" {
        "now".to_string()
    } else if future {
        format!("{} from now", text)
    } else {
        format!("{} ago", text)
    }
}

/// Describe a duration in words ("a minute", "5 hours", "1 year, 2 months")
///
/// Months are 30.5 days and years 365 days.
pub fn natural_delta(delta: TimeDelta) -> String {
    let seconds = delta.num_seconds().abs();
    let days = seconds / 86_400;
    let years = days / 365;
    let days_in_year = days % 365;
    let months = (days_in_year as f64 / 30.5) as i64;

    if years == 0 && days < 1 {
        return match seconds {
            0 => "a moment".to_string(),
            1 => "a second".to_string(),
            2..=59 => format!("{} seconds", seconds),
            60..=119 => "a minute".to_string(),
            120..=3_599 => format!("{} minutes", seconds / 60),
            3_600..=7_199 => "an hour".to_string(),
            _ => format!("{} hours", seconds / 3_600),
        };
    }

    match (years, months, days_in_year) {
        (0, _, 1) => "a day".to_string(),
        (0, 0, d) => format!("{} days", d),
        (0, 1, _) => "a month".to_string(),
        (0, m, _) => format!("{} months", m),
        (1, 0, 0) => "a year".to_string(),
        (1, 0, 1) => "1 year, 1 day".to_string(),
        (1, 0, d) => format!("1 year, {} days", d),
        (1, 1, _) => "1 year, 1 month".to_string(),
        (1, m, _) => format!("1 year, {} months", m),
        (y, _, _) => format!("{} years", y),
    }
}
