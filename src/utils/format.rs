// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/format.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file provides small text helpers shared by the metric formatters:
// fraction trimming, thousands grouping and English pluralisation.
//
// Tree Location:
// - src/utils/format.rs (text helpers)
// - Depends on: std

/// Placeholder shown wherever a value cannot be computed
pub const NOT_AVAILABLE: &str = "N/A";

/// Utility functions for formatting display text
pub struct FormatUtils;

impl FormatUtils {
    /// Drop trailing fraction zeros and a dangling point ("1.10" -> "1.1", "2.00" -> "2")
    pub fn trim_fraction(text: &str) -> String {
        let trimmed = if text.contains('.') {
            text.trim_end_matches('0').trim_end_matches('.')
        } else {
            text
        };
        // "-0.001" printed at 2 decimals trims down to "-0"
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Insert thousands separators into the integer part ("1234567.5" -> "1,234,567.5")
    pub fn group_thousands(text: &str) -> String {
        let (sign, unsigned) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text),
        };
        let (integer, fraction) = match unsigned.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (unsigned, None),
        };

        let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        match fraction {
            Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
            None => format!("{}{}", sign, grouped),
        }
    }

    /// Append "s" when the count is greater than one ("0 min", "1 min", "2 mins")
    pub fn pluralize(count: i64, unit: &str) -> String {
        if count > 1 {
            format!("{}s", unit)
        } else {
            unit.to_string()
        }
    }
}


// Changelog:
// - v1.1.0 (2025-07-03): Narrowed to shared text helpers.
//   - Hashrate and number scaling moved to metrics::format with the unit table.
//   - Added thousands grouping and the count > 1 pluralisation rule.
// - v1.0.0 (2025-06-14): Extracted from monolithic main.rs.
