// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/metrics/format.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file contains the magnitude formatter for pool-stats: plain counts
// with a configurable suffix alphabet and hashrates with H/s units. Both
// walk the shared unit table in core::magnitude and never fail; values that
// cannot be read render as N/A.
//
// Tree Location:
// - src/metrics/format.rs (magnitude formatting)
// - Depends on: core::magnitude, core::types, utils::format

use crate::core::magnitude::{U256, UnitPrefix, magnitude_to_f64};
use crate::core::types::SuffixScheme;
use crate::utils::format::{FormatUtils, NOT_AVAILABLE};
use std::fmt;

/// Anything the formatters can turn into a display float.
///
/// `None` means the value cannot be read (malformed text).
pub trait DisplayValue {
    fn display_value(&self) -> Option<f64>;
}

macro_rules! impl_display_value_lossy {
    ($($ty:ty),*) => {
        $(
            impl DisplayValue for $ty {
                fn display_value(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

impl_display_value_lossy!(f64, f32, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl DisplayValue for U256 {
    fn display_value(&self) -> Option<f64> {
        Some(magnitude_to_f64(self))
    }
}

impl DisplayValue for str {
    fn display_value(&self) -> Option<f64> {
        self.trim().parse::<f64>().ok()
    }
}

impl DisplayValue for String {
    fn display_value(&self) -> Option<f64> {
        self.as_str().display_value()
    }
}

impl<T: DisplayValue + ?Sized> DisplayValue for &T {
    fn display_value(&self) -> Option<f64> {
        (**self).display_value()
    }
}

impl SuffixScheme {
    /// Suffix printed after a scaled count
    pub const fn label(self, unit: UnitPrefix) -> &'static str {
        match (self, unit) {
            (SuffixScheme::ShortScale, UnitPrefix::Kilo) => "K",
            (SuffixScheme::ShortScale, UnitPrefix::Mega) => "M",
            (SuffixScheme::ShortScale, UnitPrefix::Giga) => "B",
            (SuffixScheme::ShortScale, UnitPrefix::Tera) => "T",
            (SuffixScheme::ShortScale, UnitPrefix::Peta) => "Q",
            (SuffixScheme::ShortScale, UnitPrefix::Exa) => "Qi",
            (SuffixScheme::ShortScale, UnitPrefix::Zetta) => "S",
            (SuffixScheme::Metric, UnitPrefix::Kilo) => "k",
            (SuffixScheme::Metric, UnitPrefix::Mega) => "M",
            (SuffixScheme::Metric, UnitPrefix::Giga) => "G",
            (SuffixScheme::Metric, UnitPrefix::Tera) => "T",
            (SuffixScheme::Metric, UnitPrefix::Peta) => "P",
            (SuffixScheme::Metric, UnitPrefix::Exa) => "E",
            (SuffixScheme::Metric, UnitPrefix::Zetta) => "Z",
        }
    }
}

/// What a scaled value measures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Count(SuffixScheme),
    Hashrate,
}

/// A float divided down to its display unit. Display only, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledValue {
    pub value: f64,
    pub unit: Option<UnitPrefix>,
    pub kind: ScaleKind,
}

impl ScaledValue {
    /// Pick the largest unit whose threshold |raw| reaches and divide by it
    pub fn scale(raw: f64, kind: ScaleKind) -> Self {
        match UnitPrefix::select(raw.abs()) {
            Some(unit) => Self {
                value: raw / unit.threshold(),
                unit: Some(unit),
                kind,
            },
            None => Self {
                value: raw,
                unit: None,
                kind,
            },
        }
    }

    /// Unit label, empty for unscaled counts
    pub fn label(&self) -> &'static str {
        match (self.kind, self.unit) {
            (ScaleKind::Count(scheme), Some(unit)) => scheme.label(unit),
            (ScaleKind::Count(_), None) => "",
            (ScaleKind::Hashrate, Some(unit)) => unit.hashrate_suffix(),
            (ScaleKind::Hashrate, None) => "H/s",
        }
    }
}

impl fmt::Display for ScaledValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.unit) {
            (ScaleKind::Count(_), Some(_)) => write!(f, "{:.2} {}", self.value, self.label()),
            (ScaleKind::Count(_), None) => {
                let plain = FormatUtils::trim_fraction(&format!("{:.3}", self.value));
                write!(f, "{}", FormatUtils::group_thousands(&plain))
            }
            (ScaleKind::Hashrate, _) => {
                let number = FormatUtils::trim_fraction(&format!("{:.2}", self.value));
                write!(f, "{} {}", FormatUtils::group_thousands(&number), self.label())
            }
        }
    }
}

fn render(value: Option<f64>, kind: ScaleKind) -> String {
    match value {
        None => NOT_AVAILABLE.to_string(),
        Some(v) if v.is_nan() => NOT_AVAILABLE.to_string(),
        Some(v) if v.is_infinite() => {
            if v > 0.0 {
                "∞".to_string()
            } else {
                "-∞".to_string()
            }
        }
        Some(v) => ScaledValue::scale(v, kind).to_string(),
    }
}

/// Format a count with the default short-scale suffixes ("1.00 K", "999")
pub fn format_number<V: DisplayValue>(value: V) -> String {
    format_number_with(value, SuffixScheme::default())
}

/// Format a count with an explicit suffix alphabet
pub fn format_number_with<V: DisplayValue>(value: V, scheme: SuffixScheme) -> String {
    render(value.display_value(), ScaleKind::Count(scheme))
}

/// Format a hashrate in H/s with at most two fraction digits ("1 TH/s", "1.01 TH/s")
pub fn format_hashrate<V: DisplayValue>(value: V) -> String {
    render(value.display_value(), ScaleKind::Hashrate)
}


// Changelog:
// - v1.1.0 (2025-07-04): Added the metric suffix alphabet behind SuffixScheme.
// - v1.0.0 (2025-07-02): Initial formatter, replacing the miner's hashrate
//   helpers with the shared unit table and N/A handling.
