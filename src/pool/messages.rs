// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/pool/messages.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines the documents published by the pool, located in the pool
// subdirectory. The pool status is newline-delimited JSON whose objects are
// merged into one record; user documents are single JSON objects with a
// nested worker list. Numeric fields arrive as numbers or as strings,
// sometimes with a unit suffix, so they are kept raw until conversion.
//
// Tree Location:
// - src/pool/messages.rs (upstream pool documents)
// - Depends on: serde, serde_json, metrics::parse

use crate::core::error::MetricsError;
use crate::core::magnitude::{U256, magnitude_from_f64};
use crate::metrics::parse::convert_hashrate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A numeric field as the pool sent it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Unsigned(0)
    }
}

impl RawValue {
    /// Exact magnitude; text may carry a unit suffix ("1.2T")
    pub fn to_magnitude(&self) -> Result<U256, MetricsError> {
        match self {
            RawValue::Unsigned(value) => Ok(U256::from(*value)),
            RawValue::Float(value) => magnitude_from_f64(*value)
                .ok_or_else(|| MetricsError::parse(&value.to_string(), "not a non-negative finite number")),
            RawValue::Text(text) => convert_hashrate(text),
        }
    }

    pub fn to_f64(&self) -> Result<f64, MetricsError> {
        match self {
            RawValue::Unsigned(value) => Ok(*value as f64),
            RawValue::Float(value) => Ok(*value),
            RawValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|e| MetricsError::parse(text, e.to_string())),
        }
    }

    pub fn to_u64(&self) -> Result<u64, MetricsError> {
        match self {
            RawValue::Unsigned(value) => Ok(*value),
            RawValue::Float(value) if value.fract() == 0.0 && *value >= 0.0 && *value < u64::MAX as f64 => {
                Ok(*value as u64)
            }
            RawValue::Float(value) => Err(MetricsError::parse(&value.to_string(), "expected a whole number")),
            RawValue::Text(text) => text
                .trim()
                .parse::<u64>()
                .map_err(|e| MetricsError::parse(text, e.to_string())),
        }
    }
}

/// Merged `pool/pool.status` document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolStatusRecord {
    pub runtime: RawValue,
    #[serde(rename = "Users")]
    pub users: RawValue,
    #[serde(rename = "Workers")]
    pub workers: RawValue,
    #[serde(rename = "Idle")]
    pub idle: RawValue,
    #[serde(rename = "Disconnected")]
    pub disconnected: RawValue,
    pub hashrate1m: RawValue,
    pub hashrate5m: RawValue,
    pub hashrate15m: RawValue,
    pub hashrate1hr: RawValue,
    pub hashrate6hr: RawValue,
    pub hashrate1d: RawValue,
    pub hashrate7d: RawValue,
    /// Accepted work as a percentage of network difficulty
    pub diff: RawValue,
    pub accepted: RawValue,
    pub rejected: RawValue,
    pub bestshare: RawValue,
    #[serde(rename = "SPS1m")]
    pub sps1m: RawValue,
    #[serde(rename = "SPS5m")]
    pub sps5m: RawValue,
    #[serde(rename = "SPS15m")]
    pub sps15m: RawValue,
    #[serde(rename = "SPS1h")]
    pub sps1h: RawValue,
}

/// One entry of a user's `worker` list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerRecord {
    pub workername: String,
    pub hashrate1m: RawValue,
    pub hashrate5m: RawValue,
    pub hashrate1hr: RawValue,
    pub hashrate1d: RawValue,
    pub hashrate7d: RawValue,
    /// Epoch seconds
    pub lastshare: RawValue,
    pub shares: RawValue,
    pub bestshare: RawValue,
    pub bestever: RawValue,
}

/// `users/<address>` document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRecord {
    /// Epoch seconds
    pub authorised: RawValue,
    pub hashrate1m: RawValue,
    pub hashrate5m: RawValue,
    pub hashrate1hr: RawValue,
    pub hashrate1d: RawValue,
    pub hashrate7d: RawValue,
    /// Epoch seconds
    pub lastshare: RawValue,
    pub workers: RawValue,
    pub shares: RawValue,
    pub bestshare: RawValue,
    pub bestever: RawValue,
    pub worker: Vec<WorkerRecord>,
}

/// Merge every JSON line of the status document, later keys winning
pub fn parse_pool_status(text: &str) -> Result<PoolStatusRecord, MetricsError> {
    let mut merged = Map::new();
    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let object: Map<String, Value> = serde_json::from_str(line)?;
        merged.extend(object);
    }
    Ok(serde_json::from_value(Value::Object(merged))?)
}

pub fn parse_user_record(text: &str) -> Result<UserRecord, MetricsError> {
    Ok(serde_json::from_str(text)?)
}


// Changelog:
// - v1.1.0 (2025-07-03): Numeric fields accept numbers or strings.
// - v1.0.0 (2025-07-02): Replaced stratum messages with pool API documents.
