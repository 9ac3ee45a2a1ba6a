// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/stats/collector.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file keeps the in-memory snapshot histories: pool-wide, per user and
// per worker. Each source batch is appended and expired samples are pruned
// according to the retention policy.
//
// Tree Location:
// - src/stats/collector.rs (snapshot histories)
// - Depends on: pool::{snapshot, source}, stats::retention, log

use crate::pool::snapshot::{PoolSnapshot, UserSnapshot, WorkerSnapshot};
use crate::pool::source::SourceBatch;
use crate::stats::retention::{RetentionPolicy, SeriesKind};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::cmp::Ordering;
use std::collections::BTreeMap;

const LOG_TARGET: &str = "pool_stats::stats::collector";

/// Leaderboard length when the caller does not ask for one
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Most pool samples a historical query returns (one day at 30 second polls)
pub const HISTORICAL_DATA_POINTS: usize = 2880;

/// History of one user
#[derive(Debug, Clone, Default)]
pub struct UserSeries {
    pub history: Vec<UserSnapshot>,
    /// Keyed by worker display name
    pub workers: BTreeMap<String, Vec<WorkerSnapshot>>,
    /// False once the latest refresh of this user failed
    pub active: bool,
}

impl UserSeries {
    pub fn latest(&self) -> Option<&UserSnapshot> {
        self.history.iter().max_by_key(|snapshot| snapshot.captured_at)
    }

    /// History of one worker; the name is matched after trimming whitespace
    pub fn worker(&self, name: &str) -> Option<&[WorkerSnapshot]> {
        self.workers.get(name.trim()).map(Vec::as_slice)
    }
}

#[derive(Debug, Default)]
pub struct StatsCollector {
    retention: RetentionPolicy,
    pool_history: Vec<PoolSnapshot>,
    users: BTreeMap<String, UserSeries>,
}

impl StatsCollector {
    pub fn new(retention: RetentionPolicy) -> Self {
        Self {
            retention,
            ..Self::default()
        }
    }

    /// Append a batch and prune expired samples
    pub fn absorb(&mut self, batch: SourceBatch, now: DateTime<Utc>) {
        if let Some(pool) = batch.pool {
            self.pool_history.push(pool);
        }

        for snapshot in batch.users.accepted {
            let series = self.users.entry(snapshot.address.clone()).or_default();
            for worker in &snapshot.workers {
                series
                    .workers
                    .entry(worker.name.clone())
                    .or_default()
                    .push(worker.clone());
            }
            series.active = true;
            series.history.push(snapshot);
        }

        for rejected in &batch.users.rejected {
            if let Some(series) = self.users.get_mut(&rejected.address) {
                debug!(target: LOG_TARGET, "Marking user {} inactive", rejected.address);
                series.active = false;
            }
        }

        self.prune(now);
    }

    /// Drop samples older than the retention policy allows
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let mut removed = self
            .retention
            .retain(SeriesKind::Pool, &mut self.pool_history, now);

        for series in self.users.values_mut() {
            removed += self.retention.retain(SeriesKind::User, &mut series.history, now);
            for history in series.workers.values_mut() {
                removed += self.retention.retain(SeriesKind::Worker, history, now);
            }
            series.workers.retain(|_, history| !history.is_empty());
        }
        self.users.retain(|_, series| !series.history.is_empty());

        if removed > 0 {
            info!(target: LOG_TARGET, "🧹 Pruned {} expired snapshots", removed);
        }
        removed
    }

    pub fn latest_pool(&self) -> Option<&PoolSnapshot> {
        self.pool_history.iter().max_by_key(|snapshot| snapshot.captured_at)
    }

    pub fn pool_history(&self) -> &[PoolSnapshot] {
        &self.pool_history
    }

    pub fn user(&self, address: &str) -> Option<&UserSeries> {
        self.users.get(address)
    }

    pub fn user_history(&self, address: &str) -> &[UserSnapshot] {
        self.users
            .get(address)
            .map(|series| series.history.as_slice())
            .unwrap_or_default()
    }

    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Pool samples newest first, at most `limit` of them
    pub fn pool_series(&self, limit: usize) -> Vec<&PoolSnapshot> {
        let mut series: Vec<&PoolSnapshot> = self.pool_history.iter().collect();
        series.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
        series.truncate(limit);
        series
    }

    /// Latest snapshot of each user, highest 1hr hashrate first
    pub fn top_users_by_hashrate(&self, limit: usize) -> Vec<&UserSnapshot> {
        self.rank_latest(limit, |a, b| b.hashrates.hashrate1hr.cmp(&a.hashrates.hashrate1hr))
    }

    /// Latest snapshot of each user, highest best-ever difficulty first
    pub fn top_users_by_best_ever(&self, limit: usize) -> Vec<&UserSnapshot> {
        self.rank_latest(limit, |a, b| b.best_ever.cmp(&a.best_ever))
    }

    fn rank_latest<F>(&self, limit: usize, order: F) -> Vec<&UserSnapshot>
    where
        F: Fn(&UserSnapshot, &UserSnapshot) -> Ordering,
    {
        let mut ranked: Vec<&UserSnapshot> = self.users.values().filter_map(UserSeries::latest).collect();
        // Stable sort: ties keep address order
        ranked.sort_by(|a, b| order(a, b));
        ranked.truncate(limit);
        debug!(target: LOG_TARGET, "Ranked {} of {} users", ranked.len(), self.users.len());
        ranked
    }
}

// Changelog:
// - v1.1.0 (2025-07-09): Added leaderboards, the newest-first pool series
//   and worker lookup by trimmed name.
// - v1.0.0 (2025-07-04): Initial in-memory collector with retention.
