// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/metrics/trend.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file contains the trend calculator for pool-stats: percentage change
// between two observations and the colour tone a change is shown in.
//
// Tree Location:
// - src/metrics/trend.rs (percentage change and tone)
// - Depends on: core::types, serde

use crate::core::types::ZeroChangePolicy;
use crate::utils::format::{FormatUtils, NOT_AVAILABLE};
use serde::{Serialize, Serializer};
use std::fmt;

/// Result of comparing a value against a baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentChange {
    /// Change in percent, rounded to two decimals
    Value(f64),
    /// Baseline was zero or the result was not finite
    NotApplicable,
}

impl PercentChange {
    pub fn value(self) -> Option<f64> {
        match self {
            PercentChange::Value(value) => Some(value),
            PercentChange::NotApplicable => None,
        }
    }
}

impl fmt::Display for PercentChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercentChange::Value(value) => {
                write!(f, "{}%", FormatUtils::trim_fraction(&format!("{:.2}", value)))
            }
            PercentChange::NotApplicable => f.write_str(NOT_AVAILABLE),
        }
    }
}

// A number, or the literal "N/A"
impl Serialize for PercentChange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PercentChange::Value(value) => serializer.serialize_f64(*value),
            PercentChange::NotApplicable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// Colour a change is rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeTone {
    #[serde(rename = "text-success")]
    Positive,
    #[serde(rename = "text-error")]
    Negative,
    #[serde(rename = "text-base-content")]
    Neutral,
}

impl ChangeTone {
    /// CSS token understood by the dashboard front end
    pub const fn css_class(self) -> &'static str {
        match self {
            ChangeTone::Positive => "text-success",
            ChangeTone::Negative => "text-error",
            ChangeTone::Neutral => "text-base-content",
        }
    }
}

/// `((current - past) / past) * 100`, rounded to two decimals
pub fn calculate_percentage_change(current: f64, past: f64) -> PercentChange {
    if past == 0.0 {
        return PercentChange::NotApplicable;
    }
    let change = ((current - past) / past) * 100.0;
    if !change.is_finite() {
        return PercentChange::NotApplicable;
    }
    let rounded = (change * 100.0).round() / 100.0;
    // Avoid reporting -0 for tiny negative changes
    PercentChange::Value(if rounded == 0.0 { 0.0 } else { rounded })
}

pub fn percentage_change_tone(change: PercentChange, zero: ZeroChangePolicy) -> ChangeTone {
    match change {
        PercentChange::NotApplicable => ChangeTone::Neutral,
        PercentChange::Value(value) if value > 0.0 => ChangeTone::Positive,
        PercentChange::Value(value) if value < 0.0 => ChangeTone::Negative,
        PercentChange::Value(_) => match zero {
            ZeroChangePolicy::Neutral => ChangeTone::Neutral,
            ZeroChangePolicy::Negative => ChangeTone::Negative,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_change_display() {
        assert_eq!(PercentChange::Value(10.0).to_string(), "10%");
        assert_eq!(PercentChange::Value(-3.25).to_string(), "-3.25%");
        assert_eq!(PercentChange::NotApplicable.to_string(), "N/A");
    }

    #[test]
    fn test_percent_change_serialization() {
        assert_eq!(serde_json::to_string(&PercentChange::Value(12.5)).unwrap(), "12.5");
        assert_eq!(serde_json::to_string(&PercentChange::NotApplicable).unwrap(), "\"N/A\"");
        assert_eq!(serde_json::to_string(&ChangeTone::Positive).unwrap(), "\"text-success\"");
    }

    #[test]
    fn test_tiny_negative_change_is_zero() {
        assert_eq!(calculate_percentage_change(99.9999, 100.0), PercentChange::Value(0.0));
    }
}

// Changelog:
// - v1.1.0 (2025-07-05): Zero change colour follows ZeroChangePolicy.
// - v1.0.0 (2025-07-02): Initial trend calculator.
