// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/stats/mod.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file is the module declaration for snapshot histories and dashboards,
// located in the stats subdirectory.
//
// Tree Location:
// - src/stats/mod.rs (stats module entry point)
// - Submodules: collector, dashboard, history, retention

pub mod collector;
pub mod dashboard;
pub mod history;
pub mod retention;

pub use collector::{DEFAULT_LEADERBOARD_LIMIT, HISTORICAL_DATA_POINTS, StatsCollector, UserSeries};
pub use dashboard::{
    LeaderboardRow, PoolDashboard, PoolStatField, Tile, TileGroup, TrendBadge, UserDashboard, WorkerDashboard, WorkerRow,
};
pub use history::{DEFAULT_TREND_WINDOW_HOURS, Timestamped, trend_over_window};
pub use retention::{RetentionPolicy, SeriesKind};

// Changelog:
// - v1.1.0 (2025-07-09): Exported leaderboards and the worker dashboard.
// - v1.0.0 (2025-07-04): Replaced miner statistics with pool snapshot
//   histories and dashboards.
