// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/metrics/time.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file contains the time and duration formatters for pool-stats. The
// current time is always passed in; the Clock trait supplies it to the
// dashboards and the web server so tests can pin it.
//
// Tree Location:
// - src/metrics/time.rs (time-ago and duration formatting, clocks)
// - Depends on: chrono, utils::format

use crate::utils::format::{FormatUtils, NOT_AVAILABLE};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Minutes below which a timestamp renders as "Recently"
pub const DEFAULT_RECENT_THRESHOLD_MINUTES: i64 = 1;

/// Durations above this many seconds render as "~∞"
pub const DURATION_INFINITY_SECONDS: f64 = 8e12;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// A point in time in any of the shapes the pool hands out
#[derive(Debug, Clone, PartialEq)]
pub enum Timestamp {
    At(DateTime<Utc>),
    EpochMillis(i64),
    EpochSeconds(i64),
    Text(String),
}

impl Timestamp {
    /// Resolve to a UTC instant; `None` when the value is not a valid time
    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::At(at) => Some(*at),
            Timestamp::EpochMillis(millis) => DateTime::from_timestamp_millis(*millis),
            Timestamp::EpochSeconds(seconds) => DateTime::from_timestamp(*seconds, 0),
            Timestamp::Text(text) => parse_time_text(text.trim()),
        }
    }
}

fn parse_time_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    // Zone-less forms are read as UTC
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc())
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Timestamp::At(at)
    }
}

impl From<&str> for Timestamp {
    fn from(text: &str) -> Self {
        Timestamp::Text(text.to_string())
    }
}

impl From<String> for Timestamp {
    fn from(text: String) -> Self {
        Timestamp::Text(text)
    }
}

/// Source of "now"
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Describe how long ago `timestamp` was, relative to `now`.
///
/// Whole minutes are floored. Anything under the threshold, including
/// timestamps in the future, is "Recently".
pub fn format_time_ago(
    timestamp: impl Into<Timestamp>,
    now: DateTime<Utc>,
    recent_threshold_minutes: i64,
) -> String {
    let Some(at) = timestamp.into().resolve() else {
        return NOT_AVAILABLE.to_string();
    };

    let minutes = (now - at).num_milliseconds().div_euclid(60_000);
    if minutes < recent_threshold_minutes {
        return "Recently".to_string();
    }

    let unit = |count: i64, name: &str| format!("{} {}", count, FormatUtils::pluralize(count, name));

    if minutes < 60 {
        format!("{} ago", unit(minutes, "min"))
    } else if minutes < 1_440 {
        format!("{} {} ago", unit(minutes / 60, "hour"), unit(minutes % 60, "min"))
    } else {
        format!(
            "{} {} {} ago",
            unit(minutes / 1_440, "day"),
            unit((minutes % 1_440) / 60, "hour"),
            unit(minutes % 60, "min")
        )
    }
}

/// Compose a duration as `1y 2d 3h 4m`.
///
/// Minutes are dropped once the duration reaches a year.
pub fn format_duration(seconds: f64) -> String {
    if seconds.is_nan() {
        return NOT_AVAILABLE.to_string();
    }
    if seconds > DURATION_INFINITY_SECONDS {
        return "~∞".to_string();
    }

    let total = seconds.max(0.0).floor() as u64;
    let years = total / SECONDS_PER_YEAR;
    let days = (total % SECONDS_PER_YEAR) / SECONDS_PER_DAY;
    let hours = (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;

    let mut parts = Vec::with_capacity(4);
    if years > 0 {
        parts.push(format!("{}y", years));
    }
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 && years == 0 {
        parts.push(format!("{}m", minutes));
    }

    if parts.is_empty() {
        "0m".to_string()
    } else {
        parts.join(" ")
    }
}


// Changelog:
// - v1.0.0 (2025-07-02): Initial time-ago and duration formatters with an
//   injected clock.
