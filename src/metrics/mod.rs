// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/metrics/mod.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for the metrics core of pool-stats.
// Everything here is pure: no I/O, no clock reads, no shared state.
//
// Tree Location:
// - src/metrics/mod.rs (metrics module entry point)
// - Submodules: block, format, kind, parse, time, trend

pub mod block;
pub mod format;
pub mod kind;
pub mod parse;
pub mod time;
pub mod trend;

pub use block::{
    BlockChances, Difficulty, HASHES_PER_DIFFICULTY, Horizon, block_chances_for_network_difficulty,
    calculate_average_time_to_block, calculate_block_chances, implied_network_difficulty,
};
pub use format::{DisplayValue, ScaleKind, ScaledValue, format_hashrate, format_number, format_number_with};
pub use kind::{RenderContext, StatValue, ValueKind};
pub use parse::convert_hashrate;
pub use time::{
    Clock, DEFAULT_RECENT_THRESHOLD_MINUTES, FixedClock, SystemClock, Timestamp, format_duration,
    format_time_ago,
};
pub use trend::{ChangeTone, PercentChange, calculate_percentage_change, percentage_change_tone};
