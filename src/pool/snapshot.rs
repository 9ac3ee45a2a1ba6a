// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/pool/snapshot.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file converts upstream pool documents into typed snapshots with exact
// magnitudes and a capture time. User documents are converted in batches; a
// bad document is logged and reported without stopping the batch.
//
// Tree Location:
// - src/pool/snapshot.rs (pool, user and worker snapshots)
// - Depends on: pool::{messages, address}, core::magnitude, chrono, serde, log

use crate::core::error::MetricsError;
use crate::core::magnitude::{U256, as_decimal};
use crate::pool::address::{is_path_safe_address, validate_bitcoin_address};
use crate::pool::messages::{PoolStatusRecord, RawValue, UserRecord, WorkerRecord, parse_user_record};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;

const LOG_TARGET: &str = "pool_stats::pool::snapshot";

/// Averaging windows the pool reports hashrates over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashrateWindow {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    OneHour,
    SixHours,
    OneDay,
    SevenDays,
}

impl HashrateWindow {
    pub const fn label(self) -> &'static str {
        match self {
            HashrateWindow::OneMinute => "1m",
            HashrateWindow::FiveMinutes => "5m",
            HashrateWindow::FifteenMinutes => "15m",
            HashrateWindow::OneHour => "1hr",
            HashrateWindow::SixHours => "6hr",
            HashrateWindow::OneDay => "1d",
            HashrateWindow::SevenDays => "7d",
        }
    }
}

fn magnitude(field: &'static str, value: &RawValue) -> Result<U256, MetricsError> {
    value.to_magnitude().map_err(|e| e.in_field(field))
}

fn float(field: &'static str, value: &RawValue) -> Result<f64, MetricsError> {
    value.to_f64().map_err(|e| e.in_field(field))
}

fn whole(field: &'static str, value: &RawValue) -> Result<u64, MetricsError> {
    value.to_u64().map_err(|e| e.in_field(field))
}

/// Epoch seconds; zero means never
fn epoch(field: &'static str, value: &RawValue) -> Result<Option<DateTime<Utc>>, MetricsError> {
    let seconds = whole(field, value)?;
    if seconds == 0 {
        return Ok(None);
    }
    let seconds = i64::try_from(seconds)
        .map_err(|_| MetricsError::parse(&seconds.to_string(), "timestamp out of range").in_field(field))?;
    DateTime::from_timestamp(seconds, 0)
        .map(Some)
        .ok_or_else(|| MetricsError::parse(&seconds.to_string(), "timestamp out of range").in_field(field))
}

/// Pool-wide hashrates in H/s
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolHashrates {
    #[serde(with = "as_decimal")]
    pub hashrate1m: U256,
    #[serde(with = "as_decimal")]
    pub hashrate5m: U256,
    #[serde(with = "as_decimal")]
    pub hashrate15m: U256,
    #[serde(with = "as_decimal")]
    pub hashrate1hr: U256,
    #[serde(with = "as_decimal")]
    pub hashrate6hr: U256,
    #[serde(with = "as_decimal")]
    pub hashrate1d: U256,
    #[serde(with = "as_decimal")]
    pub hashrate7d: U256,
}

impl PoolHashrates {
    pub fn get(&self, window: HashrateWindow) -> U256 {
        match window {
            HashrateWindow::OneMinute => self.hashrate1m,
            HashrateWindow::FiveMinutes => self.hashrate5m,
            HashrateWindow::FifteenMinutes => self.hashrate15m,
            HashrateWindow::OneHour => self.hashrate1hr,
            HashrateWindow::SixHours => self.hashrate6hr,
            HashrateWindow::OneDay => self.hashrate1d,
            HashrateWindow::SevenDays => self.hashrate7d,
        }
    }
}

/// User and worker hashrates in H/s
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserHashrates {
    #[serde(with = "as_decimal")]
    pub hashrate1m: U256,
    #[serde(with = "as_decimal")]
    pub hashrate5m: U256,
    #[serde(with = "as_decimal")]
    pub hashrate1hr: U256,
    #[serde(with = "as_decimal")]
    pub hashrate1d: U256,
    #[serde(with = "as_decimal")]
    pub hashrate7d: U256,
}

impl UserHashrates {
    pub const WINDOWS: [HashrateWindow; 5] = [
        HashrateWindow::OneMinute,
        HashrateWindow::FiveMinutes,
        HashrateWindow::OneHour,
        HashrateWindow::OneDay,
        HashrateWindow::SevenDays,
    ];

    /// `None` for windows users are not reported over
    pub fn get(&self, window: HashrateWindow) -> Option<U256> {
        match window {
            HashrateWindow::OneMinute => Some(self.hashrate1m),
            HashrateWindow::FiveMinutes => Some(self.hashrate5m),
            HashrateWindow::OneHour => Some(self.hashrate1hr),
            HashrateWindow::OneDay => Some(self.hashrate1d),
            HashrateWindow::SevenDays => Some(self.hashrate7d),
            HashrateWindow::FifteenMinutes | HashrateWindow::SixHours => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub captured_at: DateTime<Utc>,
    /// Seconds since the pool started
    pub runtime: u64,
    pub users: u64,
    pub workers: u64,
    pub idle: u64,
    pub disconnected: u64,
    pub hashrates: PoolHashrates,
    /// Accepted work as a percentage of network difficulty
    pub diff: f64,
    #[serde(with = "as_decimal")]
    pub accepted: U256,
    #[serde(with = "as_decimal")]
    pub rejected: U256,
    #[serde(with = "as_decimal")]
    pub bestshare: U256,
    pub sps1m: f64,
    pub sps5m: f64,
    pub sps15m: f64,
    pub sps1h: f64,
}

impl PoolSnapshot {
    pub fn from_record(record: &PoolStatusRecord, captured_at: DateTime<Utc>) -> Result<Self, MetricsError> {
        Ok(Self {
            captured_at,
            runtime: whole("runtime", &record.runtime)?,
            users: whole("Users", &record.users)?,
            workers: whole("Workers", &record.workers)?,
            idle: whole("Idle", &record.idle)?,
            disconnected: whole("Disconnected", &record.disconnected)?,
            hashrates: PoolHashrates {
                hashrate1m: magnitude("hashrate1m", &record.hashrate1m)?,
                hashrate5m: magnitude("hashrate5m", &record.hashrate5m)?,
                hashrate15m: magnitude("hashrate15m", &record.hashrate15m)?,
                hashrate1hr: magnitude("hashrate1hr", &record.hashrate1hr)?,
                hashrate6hr: magnitude("hashrate6hr", &record.hashrate6hr)?,
                hashrate1d: magnitude("hashrate1d", &record.hashrate1d)?,
                hashrate7d: magnitude("hashrate7d", &record.hashrate7d)?,
            },
            diff: float("diff", &record.diff)?,
            accepted: magnitude("accepted", &record.accepted)?,
            rejected: magnitude("rejected", &record.rejected)?,
            bestshare: magnitude("bestshare", &record.bestshare)?,
            sps1m: float("SPS1m", &record.sps1m)?,
            sps5m: float("SPS5m", &record.sps5m)?,
            sps15m: float("SPS15m", &record.sps15m)?,
            sps1h: float("SPS1h", &record.sps1h)?,
        })
    }
}

/// Short worker name: the segment after the first '.', else after the
/// first '_', else the whole name ("addr.rig1" -> "rig1")
pub fn worker_display_name(workername: &str) -> &str {
    for separator in ['.', '_'] {
        if workername.contains(separator) {
            return workername.split(separator).nth(1).unwrap_or(workername);
        }
    }
    workername
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerSnapshot {
    pub name: String,
    pub workername: String,
    pub captured_at: DateTime<Utc>,
    pub hashrates: UserHashrates,
    pub last_share: Option<DateTime<Utc>>,
    #[serde(with = "as_decimal")]
    pub shares: U256,
    pub best_share: f64,
    #[serde(with = "as_decimal")]
    pub best_ever: U256,
}

impl WorkerSnapshot {
    pub fn from_record(record: &WorkerRecord, captured_at: DateTime<Utc>) -> Result<Self, MetricsError> {
        Ok(Self {
            name: worker_display_name(&record.workername).to_string(),
            workername: record.workername.clone(),
            captured_at,
            hashrates: UserHashrates {
                hashrate1m: magnitude("hashrate1m", &record.hashrate1m)?,
                hashrate5m: magnitude("hashrate5m", &record.hashrate5m)?,
                hashrate1hr: magnitude("hashrate1hr", &record.hashrate1hr)?,
                hashrate1d: magnitude("hashrate1d", &record.hashrate1d)?,
                hashrate7d: magnitude("hashrate7d", &record.hashrate7d)?,
            },
            last_share: epoch("lastshare", &record.lastshare)?,
            shares: magnitude("shares", &record.shares)?,
            best_share: float("bestshare", &record.bestshare)?,
            best_ever: magnitude("bestever", &record.bestever)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub address: String,
    pub captured_at: DateTime<Utc>,
    pub authorised: Option<DateTime<Utc>>,
    pub hashrates: UserHashrates,
    pub last_share: Option<DateTime<Utc>>,
    pub worker_count: u64,
    #[serde(with = "as_decimal")]
    pub shares: U256,
    pub best_share: f64,
    #[serde(with = "as_decimal")]
    pub best_ever: U256,
    pub workers: Vec<WorkerSnapshot>,
}

impl UserSnapshot {
    pub fn from_record(
        address: &str,
        record: &UserRecord,
        captured_at: DateTime<Utc>,
    ) -> Result<Self, MetricsError> {
        let workers = record
            .worker
            .iter()
            .map(|worker| WorkerSnapshot::from_record(worker, captured_at))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.in_field("worker"))?;

        Ok(Self {
            address: address.to_string(),
            captured_at,
            authorised: epoch("authorised", &record.authorised)?,
            hashrates: UserHashrates {
                hashrate1m: magnitude("hashrate1m", &record.hashrate1m)?,
                hashrate5m: magnitude("hashrate5m", &record.hashrate5m)?,
                hashrate1hr: magnitude("hashrate1hr", &record.hashrate1hr)?,
                hashrate1d: magnitude("hashrate1d", &record.hashrate1d)?,
                hashrate7d: magnitude("hashrate7d", &record.hashrate7d)?,
            },
            last_share: epoch("lastshare", &record.lastshare)?,
            worker_count: whole("workers", &record.workers)?,
            shares: magnitude("shares", &record.shares)?,
            best_share: float("bestshare", &record.bestshare)?,
            best_ever: magnitude("bestever", &record.bestever)?,
            workers,
        })
    }
}

/// A user document that could not be converted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedUser {
    pub address: String,
    pub reason: String,
}

/// Outcome of converting a batch of user documents
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestReport {
    pub accepted: Vec<UserSnapshot>,
    pub rejected: Vec<RejectedUser>,
}

impl IngestReport {
    /// Record a failed user, logging the full error chain
    pub fn reject(&mut self, address: &str, error: &MetricsError) {
        let mut reason = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            reason.push_str(": ");
            reason.push_str(&cause.to_string());
            source = cause.source();
        }
        warn!(target: LOG_TARGET, "⚠️ Rejected user {}: {}", address, reason);
        self.rejected.push(RejectedUser {
            address: address.to_string(),
            reason,
        });
    }
}

fn ingest_user(address: &str, body: &str, captured_at: DateTime<Utc>) -> Result<UserSnapshot, MetricsError> {
    if !is_path_safe_address(address) || !validate_bitcoin_address(address) {
        return Err(MetricsError::InvalidAddress {
            address: address.to_string(),
        });
    }
    let record = parse_user_record(body)?;
    UserSnapshot::from_record(address, &record, captured_at)
}

/// Convert `(address, document)` pairs; failures never abort the batch
pub fn ingest_users<I, A, B>(documents: I, captured_at: DateTime<Utc>) -> IngestReport
where
    I: IntoIterator<Item = (A, B)>,
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut report = IngestReport::default();
    for (address, body) in documents {
        let address = address.as_ref();
        match ingest_user(address, body.as_ref(), captured_at) {
            Ok(snapshot) => report.accepted.push(snapshot),
            Err(e) => report.reject(address, &e),
        }
    }
    debug!(
        target: LOG_TARGET,
        "Ingested {} users, rejected {}",
        report.accepted.len(),
        report.rejected.len()
    );
    report
}


// Changelog:
// - v1.1.0 (2025-07-04): Batch ingestion reports rejected users.
// - v1.0.0 (2025-07-02): Initial snapshot conversion.
