// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/stats/history.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file computes trends over snapshot histories. The newest sample is
// compared with the newest sample at least one window older.
//
// Tree Location:
// - src/stats/history.rs (time-window trends)
// - Depends on: metrics::trend, pool::snapshot, chrono

use crate::metrics::trend::{PercentChange, calculate_percentage_change};
use crate::pool::snapshot::{PoolSnapshot, UserSnapshot, WorkerSnapshot};
use chrono::{DateTime, Duration, Utc};

/// Trend window used by the dashboards
pub const DEFAULT_TREND_WINDOW_HOURS: i64 = 24;

/// A sample with a capture time
pub trait Timestamped {
    fn captured_at(&self) -> DateTime<Utc>;
}

impl Timestamped for PoolSnapshot {
    fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

impl Timestamped for UserSnapshot {
    fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

impl Timestamped for WorkerSnapshot {
    fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}

/// Percentage change of `extract` between the newest sample and the newest
/// sample captured at least `window` before it. Order of `samples` does not
/// matter; `NotApplicable` when the history is too short.
pub fn trend_over_window<T, F>(samples: &[T], window: Duration, extract: F) -> PercentChange
where
    T: Timestamped,
    F: Fn(&T) -> f64,
{
    let Some(latest) = samples.iter().max_by_key(|sample| sample.captured_at()) else {
        return PercentChange::NotApplicable;
    };
    let cutoff = latest.captured_at() - window;
    samples
        .iter()
        .filter(|sample| sample.captured_at() <= cutoff)
        .max_by_key(|sample| sample.captured_at())
        .map_or(PercentChange::NotApplicable, |baseline| {
            calculate_percentage_change(extract(latest), extract(baseline))
        })
}


// Changelog:
// - v1.0.0 (2025-07-04): Time-based trend window, replacing a fixed sample
//   count lookback.
