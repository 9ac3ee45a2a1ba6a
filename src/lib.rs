// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/lib.rs
// Version: 1.2.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file serves as the main library entry point for pool-stats, located at
// the root of the source tree. It exports all public modules and types that
// the binary and the integration tests use.
//
// Tree Location:
// - src/lib.rs (root library file)
// - Exports modules: core, metrics, pool, stats, utils

pub mod core;
pub mod metrics;
pub mod pool;
pub mod stats;
pub mod utils;

// Re-export commonly used types at the crate root for convenience
pub use crate::core::{Args, DisplayConfig, MetricsError, SuffixScheme, U256, ZeroChangePolicy};
pub use crate::metrics::{
    calculate_average_time_to_block, calculate_block_chances, calculate_percentage_change, convert_hashrate,
    format_duration, format_hashrate, format_number, format_time_ago, percentage_change_tone,
};
pub use crate::pool::{ApiDirectory, PoolSnapshot, UserSnapshot};
pub use crate::stats::{LeaderboardRow, PoolDashboard, StatsCollector, UserDashboard, WorkerDashboard};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

// Changelog:
// - v1.2.0 (2025-07-09): Exported the leaderboard and worker dashboard;
//   dropped the Magnitude alias from the root exports.
// - v1.1.0 (2025-07-04): Library now exports the pool-stats modules.
//   - Added metrics and stats modules; pool now reads API documents.
// - v1.0.0 (2025-06-14): Initial modular breakout from monolithic main.rs.
