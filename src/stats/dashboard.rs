// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/stats/dashboard.rs
// Version: 1.3.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file builds the pool, user and worker dashboards and the user
// leaderboards from snapshots: every tile is
// a label, a value kind and the rendered text. Dashboards serialize to JSON
// for the web API and can log themselves as a tree.
//
// Tree Location:
// - src/stats/dashboard.rs (pool, user and worker dashboards, leaderboards)
// - Depends on: metrics, pool::snapshot, stats::history, core::types, serde, log

use crate::core::magnitude::{U256, magnitude_to_f64};
use crate::core::types::DisplayConfig;
use crate::metrics::block::{BlockChances, Difficulty, Horizon, calculate_average_time_to_block, calculate_block_chances, implied_network_difficulty};
use crate::metrics::format::{format_hashrate, format_number_with};
use crate::metrics::kind::{RenderContext, StatValue, ValueKind};
use crate::metrics::time::{Timestamp, format_time_ago};
use crate::metrics::trend::{ChangeTone, PercentChange, percentage_change_tone};
use crate::pool::snapshot::{HashrateWindow, PoolSnapshot, UserHashrates, UserSnapshot, WorkerSnapshot};
use crate::stats::history::trend_over_window;
use crate::utils::format::NOT_AVAILABLE;
use chrono::{DateTime, Duration, Utc};
use log::info;
use serde::Serialize;

const LOG_TARGET: &str = "pool_stats::stats::dashboard";

/// Trend shown under a tile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendBadge {
    pub change: PercentChange,
    pub text: String,
    pub tone: ChangeTone,
}

/// One labelled statistic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tile {
    pub label: String,
    pub kind: ValueKind,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendBadge>,
}

impl Tile {
    pub fn new(label: impl Into<String>, value: &StatValue, ctx: &RenderContext) -> Self {
        Self::text(label, value.kind(), value.render(ctx))
    }

    pub fn text(label: impl Into<String>, kind: ValueKind, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind,
            value: value.into(),
            detail: None,
            trend: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_trend(mut self, trend: TrendBadge) -> Self {
        self.trend = Some(trend);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileGroup {
    pub title: String,
    pub tiles: Vec<Tile>,
}

/// The pool statistics shown as tiles, each with a fixed value kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolStatField {
    Users,
    Idle,
    Disconnected,
    Workers,
    Accepted,
    Rejected,
    BestShare,
    Diff,
    Sps1m,
    Sps5m,
    Sps15m,
    Sps1h,
    Hashrate(HashrateWindow),
}

impl PoolStatField {
    pub fn label(self) -> String {
        match self {
            PoolStatField::Users => "Users".to_string(),
            PoolStatField::Idle => "Idle".to_string(),
            PoolStatField::Disconnected => "Disconnected".to_string(),
            PoolStatField::Workers => "Workers".to_string(),
            PoolStatField::Accepted => "Accepted".to_string(),
            PoolStatField::Rejected => "Rejected".to_string(),
            PoolStatField::BestShare => "Best Diff".to_string(),
            PoolStatField::Diff => "Network Diff".to_string(),
            PoolStatField::Sps1m => "1M".to_string(),
            PoolStatField::Sps5m => "5M".to_string(),
            PoolStatField::Sps15m => "15M".to_string(),
            PoolStatField::Sps1h => "1H".to_string(),
            PoolStatField::Hashrate(window) => window.label().to_uppercase(),
        }
    }

    pub fn kind(self) -> ValueKind {
        match self {
            PoolStatField::Diff => ValueKind::Percentage,
            PoolStatField::Hashrate(_) => ValueKind::Hashrate,
            _ => ValueKind::Count,
        }
    }

    pub fn value(self, snapshot: &PoolSnapshot) -> StatValue {
        match self {
            PoolStatField::Users => StatValue::Count(snapshot.users as f64),
            PoolStatField::Idle => StatValue::Count(snapshot.idle as f64),
            PoolStatField::Disconnected => StatValue::Count(snapshot.disconnected as f64),
            PoolStatField::Workers => StatValue::Count(snapshot.workers as f64),
            PoolStatField::Accepted => StatValue::Count(magnitude_to_f64(&snapshot.accepted)),
            PoolStatField::Rejected => StatValue::Count(magnitude_to_f64(&snapshot.rejected)),
            PoolStatField::BestShare => StatValue::Count(magnitude_to_f64(&snapshot.bestshare)),
            PoolStatField::Diff => StatValue::Percentage(snapshot.diff),
            PoolStatField::Sps1m => StatValue::Count(snapshot.sps1m),
            PoolStatField::Sps5m => StatValue::Count(snapshot.sps5m),
            PoolStatField::Sps15m => StatValue::Count(snapshot.sps15m),
            PoolStatField::Sps1h => StatValue::Count(snapshot.sps1h),
            PoolStatField::Hashrate(window) => StatValue::Hashrate(snapshot.hashrates.get(window)),
        }
    }

    fn tile(self, snapshot: &PoolSnapshot, ctx: &RenderContext) -> Tile {
        Tile::new(self.label(), &self.value(snapshot), ctx)
    }
}

/// Tile groups in display order
pub const POOL_GROUPS: [(&str, &[PoolStatField]); 4] = [
    (
        "Users",
        &[PoolStatField::Users, PoolStatField::Disconnected, PoolStatField::Workers],
    ),
    (
        "Shares",
        &[
            PoolStatField::Accepted,
            PoolStatField::Rejected,
            PoolStatField::BestShare,
            PoolStatField::Diff,
        ],
    ),
    (
        "Shares Per Second",
        &[
            PoolStatField::Sps1m,
            PoolStatField::Sps5m,
            PoolStatField::Sps15m,
            PoolStatField::Sps1h,
        ],
    ),
    (
        "Hashrates",
        &[
            PoolStatField::Hashrate(HashrateWindow::OneMinute),
            PoolStatField::Hashrate(HashrateWindow::FiveMinutes),
            PoolStatField::Hashrate(HashrateWindow::FifteenMinutes),
            PoolStatField::Hashrate(HashrateWindow::OneHour),
            PoolStatField::Hashrate(HashrateWindow::SixHours),
            PoolStatField::Hashrate(HashrateWindow::OneDay),
            PoolStatField::Hashrate(HashrateWindow::SevenDays),
        ],
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolDashboard {
    pub captured_at: DateTime<Utc>,
    /// Decimal string; zero when the pool reports no diff percentage
    pub network_difficulty: String,
    pub general: Vec<Tile>,
    pub groups: Vec<TileGroup>,
}

impl PoolDashboard {
    pub fn build(snapshot: &PoolSnapshot, now: DateTime<Utc>, config: &DisplayConfig) -> Self {
        let ctx = RenderContext::new(now, config);
        let network_difficulty = implied_network_difficulty(snapshot.accepted, snapshot.diff);

        let average_time = if snapshot.hashrates.hashrate1hr.is_zero() || network_difficulty.is_zero() {
            Tile::text("Avg Time to Find a Block", ValueKind::Duration, NOT_AVAILABLE)
        } else {
            let seconds = calculate_average_time_to_block(
                snapshot.hashrates.hashrate6hr,
                Difficulty::Exact(network_difficulty),
            );
            Tile::new("Avg Time to Find a Block", &StatValue::Duration(seconds), &ctx)
        };

        let general = vec![
            Tile::new("Runtime", &StatValue::Duration(snapshot.runtime as f64), &ctx),
            Tile::new(
                "Last Update",
                &StatValue::Timestamp(Timestamp::At(snapshot.captured_at)),
                &ctx,
            ),
            Tile::new(
                "Network Difficulty",
                &StatValue::Count(magnitude_to_f64(&network_difficulty)),
                &ctx,
            ),
            average_time,
        ];

        let groups = POOL_GROUPS
            .iter()
            .map(|(title, fields)| TileGroup {
                title: title.to_string(),
                tiles: fields
                    .iter()
                    .map(|field| {
                        let tile = field.tile(snapshot, &ctx);
                        if *field == PoolStatField::Users {
                            let idle = PoolStatField::Idle.value(snapshot).render(&ctx);
                            tile.with_detail(format!("Idle: {}", idle))
                        } else {
                            tile
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            captured_at: snapshot.captured_at,
            network_difficulty: network_difficulty.to_string(),
            general,
            groups,
        }
    }

    /// Log the dashboard as a tree
    pub fn display_dashboard(&self) {
        info!(target: LOG_TARGET, "📊 POOL DASHBOARD - {}", self.captured_at.format("%Y-%m-%d %H:%M:%S UTC"));
        for tile in &self.general {
            info!(target: LOG_TARGET, "├─ {}: {}", tile.label, tile.value);
        }
        log_groups(&self.groups);
    }
}

fn log_groups(groups: &[TileGroup]) {
    for (i, group) in groups.iter().enumerate() {
        let last_group = i + 1 == groups.len();
        info!(target: LOG_TARGET, "{} {}", if last_group { "└─" } else { "├─" }, group.title);
        let indent = if last_group { "   " } else { "│  " };
        for (j, tile) in group.tiles.iter().enumerate() {
            let branch = if j + 1 == group.tiles.len() { "└─" } else { "├─" };
            let mut line = format!("{}{} {}: {}", indent, branch, tile.label, tile.value);
            if let Some(detail) = &tile.detail {
                line.push_str(&format!(" ({})", detail));
            }
            if let Some(trend) = &tile.trend {
                line.push_str(&format!(" [{}]", trend.text));
            }
            info!(target: LOG_TARGET, "{}", line);
        }
    }
}

/// One row of the worker table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerRow {
    pub name: String,
    pub hashrate5m: String,
    pub hashrate1hr: String,
    pub hashrate1d: String,
    pub best_share: String,
    pub best_ever: String,
    pub last_update: String,
}

impl WorkerRow {
    fn build(worker: &WorkerSnapshot, ctx: &RenderContext, last_share_threshold: i64) -> Self {
        Self {
            name: worker.name.clone(),
            hashrate5m: format_hashrate(&worker.hashrates.hashrate5m),
            hashrate1hr: format_hashrate(&worker.hashrates.hashrate1hr),
            hashrate1d: format_hashrate(&worker.hashrates.hashrate1d),
            best_share: format_number_with(worker.best_share, ctx.suffix_scheme),
            best_ever: format_number_with(&worker.best_ever, ctx.suffix_scheme),
            last_update: match worker.last_share {
                Some(at) => format_time_ago(at, ctx.now, last_share_threshold),
                None => NOT_AVAILABLE.to_string(),
            },
        }
    }
}

/// User hashrate tiles that carry a trend, in display order
const USER_TREND_WINDOWS: [HashrateWindow; 4] = [
    HashrateWindow::FiveMinutes,
    HashrateWindow::OneHour,
    HashrateWindow::OneDay,
    HashrateWindow::SevenDays,
];

/// Block odds tiles on the user page
const USER_BLOCK_HORIZONS: [(Horizon, &str); 4] = [
    (Horizon::OneDay, "1 Day"),
    (Horizon::OneWeek, "1 Week"),
    (Horizon::OneMonth, "1 Month"),
    (Horizon::OneYear, "1 Year"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDashboard {
    pub address: String,
    pub active: bool,
    pub captured_at: DateTime<Utc>,
    pub summary: Vec<Tile>,
    pub shares: Vec<Tile>,
    pub hashrates: Vec<Tile>,
    pub block_odds: Vec<Tile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_chances: Option<BlockChances>,
    pub workers: Vec<WorkerRow>,
}

fn user_hashrate(snapshot: &UserSnapshot, window: HashrateWindow) -> U256 {
    snapshot.hashrates.get(window).unwrap_or_default()
}

fn trend_badge(change: PercentChange, config: &DisplayConfig) -> TrendBadge {
    TrendBadge {
        change,
        text: change.to_string(),
        tone: percentage_change_tone(change, config.zero_change),
    }
}

impl UserDashboard {
    /// Build from the latest snapshot, the user's history (which may include
    /// the latest snapshot) and the latest pool snapshot for block odds
    pub fn build(
        latest: &UserSnapshot,
        history: &[UserSnapshot],
        pool: Option<&PoolSnapshot>,
        now: DateTime<Utc>,
        config: &DisplayConfig,
    ) -> Self {
        let ctx = RenderContext::new(now, config);
        let last_share_ctx = ctx.with_recent_threshold(config.last_share_threshold_minutes);

        let authorised = latest
            .authorised
            .map_or_else(|| NOT_AVAILABLE.to_string(), |at| at.format("%Y-%m-%d").to_string());
        let last_share = match latest.last_share {
            Some(at) => StatValue::Timestamp(Timestamp::At(at)).render(&last_share_ctx),
            None => NOT_AVAILABLE.to_string(),
        };
        let summary = vec![
            Tile::new("Worker Count", &StatValue::Count(latest.worker_count as f64), &ctx),
            Tile::text("Authorised", ValueKind::Timestamp, authorised),
            Tile::text("Last Share", ValueKind::Timestamp, last_share),
        ];

        let shares = vec![
            Tile::new("Total Shares", &StatValue::Count(magnitude_to_f64(&latest.shares)), &ctx),
            Tile::new("Best Share", &StatValue::Count(latest.best_share), &ctx),
            Tile::new("Best Ever", &StatValue::Count(magnitude_to_f64(&latest.best_ever)), &ctx),
        ];

        // The latest snapshot always takes part in the trend
        let mut samples: Vec<UserSnapshot> = history.to_vec();
        if !samples.iter().any(|sample| sample.captured_at == latest.captured_at) {
            samples.push(latest.clone());
        }
        let window = Duration::hours(config.trend_window_hours);
        let hashrates = USER_TREND_WINDOWS
            .iter()
            .map(|&window_kind| {
                let change = trend_over_window(&samples, window, |sample| {
                    magnitude_to_f64(&user_hashrate(sample, window_kind))
                });
                Tile::new(
                    format!("Hashrate ({})", window_kind.label()),
                    &StatValue::Hashrate(user_hashrate(latest, window_kind)),
                    &ctx,
                )
                .with_trend(trend_badge(change, config))
            })
            .collect();

        let block_chances = pool
            .filter(|pool| !latest.hashrates.hashrate1hr.is_zero() && pool.diff > 0.0)
            .map(|pool| calculate_block_chances(latest.hashrates.hashrate1hr, pool.diff, pool.accepted));
        let block_odds = USER_BLOCK_HORIZONS
            .iter()
            .map(|(horizon, label)| {
                let value = block_chances
                    .as_ref()
                    .map_or_else(|| NOT_AVAILABLE.to_string(), |chances| chances.render(*horizon));
                Tile::text(*label, ValueKind::Percentage, value)
            })
            .collect();

        let mut sorted: Vec<&WorkerSnapshot> = latest.workers.iter().collect();
        sorted.sort_by(|a, b| b.hashrates.hashrate5m.cmp(&a.hashrates.hashrate5m));
        let workers = sorted
            .into_iter()
            .map(|worker| WorkerRow::build(worker, &ctx, config.last_share_threshold_minutes))
            .collect();

        Self {
            address: latest.address.clone(),
            active: true,
            captured_at: latest.captured_at,
            summary,
            shares,
            hashrates,
            block_odds,
            block_chances,
            workers,
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Log the dashboard as a tree
    pub fn display_dashboard(&self) {
        info!(
            target: LOG_TARGET,
            "👤 USER DASHBOARD - {}{}",
            self.address,
            if self.active { "" } else { " (inactive)" }
        );
        let worker_tiles = self
            .workers
            .iter()
            .map(|row| {
                Tile::text(row.name.clone(), ValueKind::Hashrate, row.hashrate5m.clone())
                    .with_detail(format!("last share {}", row.last_update))
            })
            .collect();
        let groups = [
            TileGroup { title: "Summary".to_string(), tiles: self.summary.clone() },
            TileGroup { title: "Shares".to_string(), tiles: self.shares.clone() },
            TileGroup { title: "Hashrates".to_string(), tiles: self.hashrates.clone() },
            TileGroup { title: "Block Odds".to_string(), tiles: self.block_odds.clone() },
            TileGroup { title: "Workers".to_string(), tiles: worker_tiles },
        ];
        log_groups(&groups);
    }
}

/// Detail page of one worker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerDashboard {
    pub address: String,
    pub name: String,
    pub captured_at: DateTime<Utc>,
    pub hashrates: Vec<Tile>,
    pub shares: Vec<Tile>,
}

impl WorkerDashboard {
    /// Build from one worker's history; `None` when the history is empty
    pub fn build(
        address: &str,
        history: &[WorkerSnapshot],
        now: DateTime<Utc>,
        config: &DisplayConfig,
    ) -> Option<Self> {
        let latest = history.iter().max_by_key(|sample| sample.captured_at)?;
        let ctx = RenderContext::new(now, config);
        let last_share_ctx = ctx.with_recent_threshold(config.last_share_threshold_minutes);
        let window = Duration::hours(config.trend_window_hours);

        let hashrates = UserHashrates::WINDOWS
            .iter()
            .map(|&window_kind| {
                let current = latest.hashrates.get(window_kind).unwrap_or_default();
                let change = trend_over_window(history, window, |sample| {
                    magnitude_to_f64(&sample.hashrates.get(window_kind).unwrap_or_default())
                });
                Tile::new(format!("Hashrate ({})", window_kind.label()), &StatValue::Hashrate(current), &ctx)
                    .with_trend(trend_badge(change, config))
            })
            .collect();

        let last_share = match latest.last_share {
            Some(at) => StatValue::Timestamp(Timestamp::At(at)).render(&last_share_ctx),
            None => NOT_AVAILABLE.to_string(),
        };
        let shares = vec![
            Tile::new("Shares", &StatValue::Count(magnitude_to_f64(&latest.shares)), &ctx),
            Tile::new("Best Share", &StatValue::Count(latest.best_share), &ctx),
            Tile::new("Best Ever", &StatValue::Count(magnitude_to_f64(&latest.best_ever)), &ctx),
            Tile::text("Last Share", ValueKind::Timestamp, last_share),
        ];

        Some(Self {
            address: address.to_string(),
            name: latest.name.clone(),
            captured_at: latest.captured_at,
            hashrates,
            shares,
        })
    }

    /// Log the dashboard as a tree
    pub fn display_dashboard(&self) {
        info!(target: LOG_TARGET, "⛏️ WORKER DASHBOARD - {} / {}", self.address, self.name);
        let groups = [
            TileGroup { title: "Hashrates".to_string(), tiles: self.hashrates.clone() },
            TileGroup { title: "Shares".to_string(), tiles: self.shares.clone() },
        ];
        log_groups(&groups);
    }
}

/// One row of a user leaderboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    /// Starts at 1
    pub rank: usize,
    pub address: String,
    pub worker_count: u64,
    pub hashrate1hr: String,
    pub hashrate1d: String,
    pub hashrate7d: String,
    /// Best share of the current session
    pub best_share: String,
    pub best_ever: String,
}

impl LeaderboardRow {
    /// Rows for already-ranked users, keeping their order
    pub fn rank_all(ranked: &[&UserSnapshot], config: &DisplayConfig) -> Vec<Self> {
        ranked
            .iter()
            .enumerate()
            .map(|(i, user)| Self {
                rank: i + 1,
                address: user.address.clone(),
                worker_count: user.worker_count,
                hashrate1hr: format_hashrate(&user.hashrates.hashrate1hr),
                hashrate1d: format_hashrate(&user.hashrates.hashrate1d),
                hashrate7d: format_hashrate(&user.hashrates.hashrate7d),
                best_share: format_number_with(user.best_share, config.suffix_scheme),
                best_ever: format_number_with(&user.best_ever, config.suffix_scheme),
            })
            .collect()
    }
}


// Changelog:
// - v1.3.0 (2025-07-09): Added the worker dashboard and leaderboard rows;
//   Worker Count reads the pool-reported count.
// - v1.2.0 (2025-07-05): User dashboard trends follow ZeroChangePolicy.
// - v1.1.0 (2025-07-04): Added the user dashboard and worker table.
// - v1.0.0 (2025-07-03): Pool dashboard adapted from the miner dashboard log.
