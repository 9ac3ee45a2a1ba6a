// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/metrics/parse.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file contains the magnitude parser for pool-stats. The pool reports
// hashrates as suffixed strings such as "12.5T" or "3.2e2G"; these are turned
// into exact integers using decimal arithmetic on U256, rounding half-up.
//
// Tree Location:
// - src/metrics/parse.rs (suffixed hashrate parsing)
// - Depends on: core::magnitude, core::error, log

use crate::core::error::MetricsError;
use crate::core::magnitude::{U256, UnitPrefix, pow10};
use log::debug;

const LOG_TARGET: &str = "pool_stats::metrics::parse";

/// Exponents beyond this cannot produce a finite 256-bit magnitude
const MAX_EXPONENT: i64 = 1_000;

/// A decimal literal as `digits × 10^exponent`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DecimalLiteral {
    digits: U256,
    exponent: i64,
}

impl DecimalLiteral {
    /// Parse `<digits>[.<digits>][e[+-]<digits>]`
    fn parse(text: &str) -> Result<Self, MetricsError> {
        let (mantissa, exponent) = match text.find(['e', 'E']) {
            Some(at) => (&text[..at], Some(&text[at + 1..])),
            None => (text, None),
        };

        let (integer, fraction) = match mantissa.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (mantissa, ""),
        };

        if integer.is_empty() || !integer.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MetricsError::parse(text, "expected leading digits"));
        }
        if mantissa.contains('.') && (fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit())) {
            return Err(MetricsError::parse(text, "expected digits after the decimal point"));
        }

        let mut exponent_value = match exponent {
            None => 0,
            Some(exp) => {
                let unsigned = exp.strip_prefix(['+', '-']).unwrap_or(exp);
                if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(MetricsError::parse(text, "malformed exponent"));
                }
                let magnitude = unsigned
                    .parse::<i64>()
                    .ok()
                    .filter(|value| *value <= MAX_EXPONENT)
                    .ok_or_else(|| MetricsError::parse(text, "exponent out of range"))?;
                if exp.starts_with('-') { -magnitude } else { magnitude }
            }
        };
        exponent_value -= fraction.len() as i64;

        let joined = format!("{}{}", integer, fraction);
        let digits = U256::from_dec_str(&joined)
            .map_err(|_| MetricsError::parse(text, "coefficient does not fit in 256 bits"))?;

        Ok(Self {
            digits,
            exponent: exponent_value,
        })
    }

    /// Exact integer value, rounded half-up
    fn to_magnitude(self, source: &str) -> Result<U256, MetricsError> {
        if self.digits.is_zero() {
            return Ok(U256::zero());
        }

        if self.exponent >= 0 {
            let scale = u32::try_from(self.exponent)
                .ok()
                .and_then(pow10)
                .ok_or_else(|| MetricsError::parse(source, "value does not fit in 256 bits"))?;
            return self
                .digits
                .checked_mul(scale)
                .ok_or_else(|| MetricsError::parse(source, "value does not fit in 256 bits"));
        }

        let divisor = match u32::try_from(-self.exponent).ok().and_then(pow10) {
            Some(divisor) => divisor,
            // The divisor exceeds any 256-bit coefficient: the value is below one half
            None => return Ok(U256::zero()),
        };
        let quotient = self.digits / divisor;
        let remainder = self.digits % divisor;
        // remainder >= divisor / 2, without doubling the remainder
        if remainder >= divisor - remainder {
            Ok(quotient + U256::one())
        } else {
            Ok(quotient)
        }
    }
}

/// Convert a suffixed hashrate string into an exact magnitude.
///
/// Accepts `<coefficient><unit>` with the unit in `K M G T P E Z` (any case),
/// or a plain decimal integer. Surrounding whitespace is ignored.
pub fn convert_hashrate(text: &str) -> Result<U256, MetricsError> {
    let trimmed = text.trim();
    let last = trimmed
        .chars()
        .last()
        .ok_or_else(|| MetricsError::parse(text, "empty value"))?;

    if last.is_ascii_digit() {
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MetricsError::parse(text, "plain values must be whole numbers"));
        }
        return U256::from_dec_str(trimmed)
            .map_err(|_| MetricsError::parse(text, "value does not fit in 256 bits"));
    }

    let unit = UnitPrefix::from_letter(last)
        .ok_or_else(|| MetricsError::parse(text, format!("unknown unit {:?}", last)))?;
    let coefficient = &trimmed[..trimmed.len() - last.len_utf8()];

    let literal = DecimalLiteral::parse(coefficient).map_err(|_| {
        MetricsError::parse(text, "expected <digits>[.<digits>][e[+-]<digits>] before the unit")
    })?;
    let scaled = DecimalLiteral {
        exponent: literal.exponent + i64::from(unit.exponent()),
        ..literal
    };
    let magnitude = scaled.to_magnitude(text)?;

    debug!(target: LOG_TARGET, "Parsed hashrate {:?} as {} H/s", text, magnitude);
    Ok(magnitude)
}


// Changelog:
// - v1.0.0 (2025-07-02): Initial parser with exact decimal scaling.
