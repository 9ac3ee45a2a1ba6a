// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/metrics/kind.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file maps each kind of statistic to exactly one formatter. Dashboards
// tag their values with a kind instead of guessing from field names.
//
// Tree Location:
// - src/metrics/kind.rs (value kinds and rendering)
// - Depends on: metrics::{format, time}, core::{magnitude, types}, chrono

use crate::core::magnitude::U256;
use crate::core::types::{DisplayConfig, SuffixScheme};
use crate::metrics::format::{format_hashrate, format_number_with};
use crate::metrics::time::{Timestamp, format_duration, format_time_ago};
use crate::utils::format::{FormatUtils, NOT_AVAILABLE};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    Count,
    Hashrate,
    Percentage,
    Timestamp,
    Duration,
}

/// Everything a formatter needs besides the value itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub now: DateTime<Utc>,
    pub suffix_scheme: SuffixScheme,
    pub recent_threshold_minutes: i64,
}

impl RenderContext {
    pub fn new(now: DateTime<Utc>, config: &DisplayConfig) -> Self {
        Self {
            now,
            suffix_scheme: config.suffix_scheme,
            recent_threshold_minutes: config.recent_threshold_minutes,
        }
    }

    /// Same context with a different recency threshold
    pub fn with_recent_threshold(self, minutes: i64) -> Self {
        Self {
            recent_threshold_minutes: minutes,
            ..self
        }
    }
}

/// A statistic tagged with its kind
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    Count(f64),
    Hashrate(U256),
    Percentage(f64),
    Timestamp(Timestamp),
    /// Seconds
    Duration(f64),
}

impl StatValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            StatValue::Count(_) => ValueKind::Count,
            StatValue::Hashrate(_) => ValueKind::Hashrate,
            StatValue::Percentage(_) => ValueKind::Percentage,
            StatValue::Timestamp(_) => ValueKind::Timestamp,
            StatValue::Duration(_) => ValueKind::Duration,
        }
    }

    pub fn render(&self, ctx: &RenderContext) -> String {
        match self {
            StatValue::Count(value) => format_number_with(*value, ctx.suffix_scheme),
            StatValue::Hashrate(value) => format_hashrate(value),
            StatValue::Percentage(value) if value.is_finite() => {
                format!("{}%", FormatUtils::trim_fraction(&format!("{:.2}", value)))
            }
            StatValue::Percentage(_) => NOT_AVAILABLE.to_string(),
            StatValue::Timestamp(at) => format_time_ago(at.clone(), ctx.now, ctx.recent_threshold_minutes),
            StatValue::Duration(seconds) => format_duration(*seconds),
        }
    }
}


// Changelog:
// - v1.0.0 (2025-07-03): Initial kind table, replacing field-name checks.
