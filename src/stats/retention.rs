// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/stats/retention.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines how long each snapshot series is kept.
//
// Tree Location:
// - src/stats/retention.rs (retention policy)
// - Depends on: stats::history, chrono, serde

use crate::stats::history::Timestamped;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesKind {
    Pool,
    User,
    Worker,
}

/// Maximum sample age per series, in days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionPolicy {
    pub pool_days: i64,
    pub user_days: i64,
    pub worker_days: i64,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            pool_days: 7,
            user_days: 3,
            worker_days: 1,
        }
    }
}

impl RetentionPolicy {
    pub fn max_age(&self, kind: SeriesKind) -> Duration {
        let days = match kind {
            SeriesKind::Pool => self.pool_days,
            SeriesKind::User => self.user_days,
            SeriesKind::Worker => self.worker_days,
        };
        Duration::days(days)
    }

    /// Samples captured before this instant are expired
    pub fn cutoff(&self, kind: SeriesKind, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.max_age(kind)
    }

    /// Drop expired samples, returning how many were removed
    pub fn retain<T: Timestamped>(&self, kind: SeriesKind, samples: &mut Vec<T>, now: DateTime<Utc>) -> usize {
        let cutoff = self.cutoff(kind, now);
        let before = samples.len();
        samples.retain(|sample| sample.captured_at() >= cutoff);
        before - samples.len()
    }
}

// Changelog:
// - v1.0.0 (2025-07-04): Initial retention policy (pool 7d, user 3d, worker 1d).
