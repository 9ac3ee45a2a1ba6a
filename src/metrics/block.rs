// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/metrics/block.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file contains the block-discovery estimator for pool-stats. One unit
// of difficulty costs 2^32 hashes on average; the expected number of blocks
// over a horizon is hashrate * seconds / (difficulty * 2^32) and the chance
// of at least one block follows from the Poisson model.
//
// All products are computed exactly on U256. Only the final division and
// the exponential run in f64.
//
// Tree Location:
// - src/metrics/block.rs (average time to block, block chances)
// - Depends on: core::magnitude, metrics::parse, log, serde

use crate::core::magnitude::{U256, UnitPrefix, magnitude_to_f64};
use crate::metrics::parse::convert_hashrate;
use log::debug;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

const LOG_TARGET: &str = "pool_stats::metrics::block";

/// Average number of hashes needed per unit of difficulty
pub const HASHES_PER_DIFFICULTY: u64 = 1 << 32;

/// Chances at or below this percentage render as "<0.001%"
pub const CHANCE_FLOOR_PERCENT: f64 = 0.001;

/// A difficulty either as an exact integer or as a float with a unit prefix
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Difficulty {
    Exact(U256),
    Scaled { value: f64, unit: UnitPrefix },
}

impl Difficulty {
    /// Exact magnitude; `None` for negative or non-finite scaled values
    pub fn to_magnitude(&self) -> Option<U256> {
        match *self {
            Difficulty::Exact(value) => Some(value),
            Difficulty::Scaled { value, unit } => {
                if !value.is_finite() || value < 0.0 {
                    return None;
                }
                // f64 Display is the shortest exact decimal and never uses exponents
                convert_hashrate(&format!("{}{}", value, unit.letter())).ok()
            }
        }
    }
}

impl From<U256> for Difficulty {
    fn from(value: U256) -> Self {
        Difficulty::Exact(value)
    }
}

/// difficulty * 2^32 as an exact integer, or a float when it overflows 256 bits
fn work_for(difficulty: U256) -> f64 {
    match difficulty.checked_mul(U256::from(HASHES_PER_DIFFICULTY)) {
        Some(work) => magnitude_to_f64(&work),
        None => magnitude_to_f64(&difficulty) * HASHES_PER_DIFFICULTY as f64,
    }
}

/// Expected seconds until a block at `hashrate` H/s.
///
/// Zero hashrate yields `+∞`; an unusable scaled difficulty yields NaN.
pub fn calculate_average_time_to_block(hashrate: U256, difficulty: Difficulty) -> f64 {
    if hashrate.is_zero() {
        return f64::INFINITY;
    }
    let Some(difficulty) = difficulty.to_magnitude() else {
        return f64::NAN;
    };
    let seconds = work_for(difficulty) / magnitude_to_f64(&hashrate);
    debug!(
        target: LOG_TARGET,
        "Average time to block at {} H/s, difficulty {}: {:.0}s",
        hashrate,
        difficulty,
        seconds
    );
    seconds
}

/// Network difficulty implied by the pool's accepted shares and their share
/// of network difficulty in percent: `accepted * 10000 / round(percent * 100)`.
///
/// Zero, negative or non-finite percentages yield zero.
pub fn implied_network_difficulty(accepted: U256, difficulty_percent: f64) -> U256 {
    if !difficulty_percent.is_finite() || difficulty_percent <= 0.0 {
        return U256::zero();
    }
    let basis_points = (difficulty_percent * 100.0).round();
    if basis_points < 1.0 || basis_points >= u64::MAX as f64 {
        return U256::zero();
    }
    let basis_points = U256::from(basis_points as u64);
    let scale = U256::from(10_000u64);
    match accepted.checked_mul(scale) {
        Some(scaled) => scaled / basis_points,
        None => (accepted / basis_points) * scale,
    }
}

/// Forecast windows for block odds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizon {
    OneHour,
    OneDay,
    OneWeek,
    OneMonth,
    OneYear,
}

impl Horizon {
    pub const ALL: [Horizon; 5] = [
        Horizon::OneHour,
        Horizon::OneDay,
        Horizon::OneWeek,
        Horizon::OneMonth,
        Horizon::OneYear,
    ];

    pub const fn seconds(self) -> u64 {
        match self {
            Horizon::OneHour => 3_600,
            Horizon::OneDay => 86_400,
            Horizon::OneWeek => 7 * 86_400,
            Horizon::OneMonth => 30 * 86_400,
            Horizon::OneYear => 365 * 86_400,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Horizon::OneHour => "1h",
            Horizon::OneDay => "1d",
            Horizon::OneWeek => "1w",
            Horizon::OneMonth => "1m",
            Horizon::OneYear => "1y",
        }
    }

    const fn index(self) -> usize {
        match self {
            Horizon::OneHour => 0,
            Horizon::OneDay => 1,
            Horizon::OneWeek => 2,
            Horizon::OneMonth => 3,
            Horizon::OneYear => 4,
        }
    }
}

/// Chance of finding at least one block, per horizon, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockChances {
    percent: [f64; 5],
}

impl BlockChances {
    fn none() -> Self {
        Self { percent: [0.0; 5] }
    }

    /// Raw percentage for a horizon
    pub fn percent(&self, horizon: Horizon) -> f64 {
        self.percent[horizon.index()]
    }

    /// `{:.3}%`, floored to "<0.001%"
    pub fn render(&self, horizon: Horizon) -> String {
        let percent = self.percent(horizon);
        if percent <= CHANCE_FLOOR_PERCENT {
            format!("<{}%", CHANCE_FLOOR_PERCENT)
        } else {
            format!("{:.3}%", percent)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Horizon, String)> + '_ {
        Horizon::ALL.into_iter().map(move |horizon| (horizon, self.render(horizon)))
    }
}

impl Serialize for BlockChances {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Horizon::ALL.len()))?;
        for (horizon, rendered) in self.iter() {
            map.serialize_entry(horizon.label(), &rendered)?;
        }
        map.end()
    }
}

/// Block odds when the network difficulty is known
pub fn block_chances_for_network_difficulty(hashrate: U256, network_difficulty: U256) -> BlockChances {
    if hashrate.is_zero() || network_difficulty.is_zero() {
        return BlockChances::none();
    }

    let work = work_for(network_difficulty);
    let mut chances = BlockChances::none();
    for horizon in Horizon::ALL {
        let hashes = match hashrate.checked_mul(U256::from(horizon.seconds())) {
            Some(hashes) => magnitude_to_f64(&hashes),
            None => magnitude_to_f64(&hashrate) * horizon.seconds() as f64,
        };
        let expected_blocks = hashes / work;
        chances.percent[horizon.index()] = -(-expected_blocks).exp_m1() * 100.0;
    }

    debug!(
        target: LOG_TARGET,
        "Block chances at {} H/s against difficulty {}: 1d {:.6}%",
        hashrate,
        network_difficulty,
        chances.percent(Horizon::OneDay)
    );
    chances
}

/// Block odds from the pool's accepted shares and diff percentage
pub fn calculate_block_chances(hashrate: U256, difficulty_percent: f64, accepted: U256) -> BlockChances {
    block_chances_for_network_difficulty(
        hashrate,
        implied_network_difficulty(accepted, difficulty_percent),
    )
}


// Changelog:
// - v1.1.0 (2025-07-04): Network difficulty can be given directly.
// - v1.0.0 (2025-07-02): Initial estimator, adapted from the share difficulty
//   arithmetic of the mining core.
