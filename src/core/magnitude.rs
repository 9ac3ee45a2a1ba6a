// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/magnitude.rs
// Version: 1.1.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines the exact integer magnitude type used for hashrates, share
// counters and difficulties, together with the SI-like unit table shared by
// the formatter and the parser. Pool counters routinely exceed 2^53, so all
// stored magnitudes are 256-bit unsigned integers.
//
// Tree Location:
// - src/core/magnitude.rs (magnitude type and unit table)
// - Depends on: uint, serde

use serde::{Deserialize, Serialize};
use uint::construct_uint;

construct_uint! {
    /// Exact non-negative quantity: hashrate in H/s, share count or difficulty
    pub struct U256(4);
}

/// 2^64 as a float, used when folding limbs into an `f64`
const LIMB_BASE: f64 = 18_446_744_073_709_551_616.0;

/// SI-like unit prefixes, one per power of one thousand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitPrefix {
    Kilo,
    Mega,
    Giga,
    Tera,
    Peta,
    Exa,
    Zetta,
}

impl UnitPrefix {
    /// Largest threshold first; selection walks this table top-down
    pub const DESCENDING: [UnitPrefix; 7] = [
        UnitPrefix::Zetta,
        UnitPrefix::Exa,
        UnitPrefix::Peta,
        UnitPrefix::Tera,
        UnitPrefix::Giga,
        UnitPrefix::Mega,
        UnitPrefix::Kilo,
    ];

    /// Power of ten this prefix stands for
    pub const fn exponent(self) -> u32 {
        match self {
            UnitPrefix::Kilo => 3,
            UnitPrefix::Mega => 6,
            UnitPrefix::Giga => 9,
            UnitPrefix::Tera => 12,
            UnitPrefix::Peta => 15,
            UnitPrefix::Exa => 18,
            UnitPrefix::Zetta => 21,
        }
    }

    /// Threshold as a float for display scaling
    pub const fn threshold(self) -> f64 {
        match self {
            UnitPrefix::Kilo => 1e3,
            UnitPrefix::Mega => 1e6,
            UnitPrefix::Giga => 1e9,
            UnitPrefix::Tera => 1e12,
            UnitPrefix::Peta => 1e15,
            UnitPrefix::Exa => 1e18,
            UnitPrefix::Zetta => 1e21,
        }
    }

    /// Threshold as an exact integer
    pub fn multiplier(self) -> U256 {
        // 10^21 fits comfortably in 256 bits
        pow10(self.exponent()).unwrap_or(U256::max_value())
    }

    /// Upstream unit letter (`K`, `M`, `G`, `T`, `P`, `E`, `Z`)
    pub const fn letter(self) -> char {
        match self {
            UnitPrefix::Kilo => 'K',
            UnitPrefix::Mega => 'M',
            UnitPrefix::Giga => 'G',
            UnitPrefix::Tera => 'T',
            UnitPrefix::Peta => 'P',
            UnitPrefix::Exa => 'E',
            UnitPrefix::Zetta => 'Z',
        }
    }

    /// Case-insensitive lookup of an upstream unit letter
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'K' => Some(UnitPrefix::Kilo),
            'M' => Some(UnitPrefix::Mega),
            'G' => Some(UnitPrefix::Giga),
            'T' => Some(UnitPrefix::Tera),
            'P' => Some(UnitPrefix::Peta),
            'E' => Some(UnitPrefix::Exa),
            'Z' => Some(UnitPrefix::Zetta),
            _ => None,
        }
    }

    /// Hashrate unit label, e.g. `TH/s`
    pub const fn hashrate_suffix(self) -> &'static str {
        match self {
            UnitPrefix::Kilo => "KH/s",
            UnitPrefix::Mega => "MH/s",
            UnitPrefix::Giga => "GH/s",
            UnitPrefix::Tera => "TH/s",
            UnitPrefix::Peta => "PH/s",
            UnitPrefix::Exa => "EH/s",
            UnitPrefix::Zetta => "ZH/s",
        }
    }

    /// Largest prefix whose threshold `abs_value` meets or exceeds
    pub fn select(abs_value: f64) -> Option<Self> {
        Self::DESCENDING
            .into_iter()
            .find(|unit| abs_value >= unit.threshold())
    }
}

/// 10^exp, or `None` when it does not fit in 256 bits
pub fn pow10(exp: u32) -> Option<U256> {
    let ten = U256::from(10u64);
    let mut value = U256::one();
    for _ in 0..exp {
        value = value.checked_mul(ten)?;
    }
    Some(value)
}

/// Lossy conversion for display and for the final float division
pub fn magnitude_to_f64(value: &U256) -> f64 {
    let U256(ref words) = *value;
    words
        .iter()
        .rev()
        .fold(0.0, |acc, word| acc * LIMB_BASE + *word as f64)
}

/// Exact conversion from a 128-bit integer
pub fn magnitude_from_u128(value: u128) -> U256 {
    U256([value as u64, (value >> 64) as u64, 0, 0])
}

/// Rounds a float to the nearest magnitude.
///
/// Negative, NaN and infinite inputs have no magnitude.
pub fn magnitude_from_f64(value: f64) -> Option<U256> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let rounded = value.round();
    if rounded < u128::MAX as f64 {
        return Some(magnitude_from_u128(rounded as u128));
    }
    // Beyond 128 bits go through the exact decimal expansion of the float
    U256::from_dec_str(&format!("{:.0}", rounded)).ok()
}

/// Serde adapter that stores magnitudes as decimal strings.
///
/// Accepts strings or JSON integers on the way in.
pub mod as_decimal {
    use super::U256;
    use serde::{Deserialize, Deserializer, Serializer, de};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(U256::from(value)),
            Repr::Text(text) => U256::from_dec_str(text.trim())
                .map_err(|e| de::Error::custom(format!("invalid magnitude {:?}: {:?}", text, e))),
        }
    }
}


// Changelog:
// - v1.1.1 (2025-07-09): Dropped the unused Magnitude alias; U256 carries its doc.
// - v1.1.0 (2025-07-04): Added the serde decimal adapter for JSON output.
// - v1.0.0 (2025-07-02): Initial magnitude module, replacing the U256 that
//   lived in the difficulty module.
