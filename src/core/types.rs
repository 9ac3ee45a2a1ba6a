// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/types.rs
// Version: 1.1.1
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file defines core configuration structures for pool-stats, located in
// the core subdirectory. It includes the command-line arguments, the display
// conventions (suffix alphabet, zero-change colour, recency thresholds) and
// the configuration derived from them.
//
// Tree Location:
// - src/core/types.rs (arguments and display configuration)
// - Depends on: clap, serde

use crate::stats::history::DEFAULT_TREND_WINDOW_HOURS;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Suffix alphabet used by the plain number formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuffixScheme {
    /// K, M, B, T, Q, Qi, S
    #[default]
    ShortScale,
    /// k, M, G, T, P, E, Z
    Metric,
}

/// How an exactly-zero percentage change is coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroChangePolicy {
    #[default]
    Neutral,
    Negative,
}

/// Command-line arguments for the pool-stats service
#[derive(Parser, Debug)]
#[command(
    name = "pool-stats",
    author = "Pool Stats Team",
    version = "1.0.0",
    about = "Mining pool statistics dashboard: hashrates, trends and block odds",
    long_about = "Pool Stats reads the pool.status and users/<address> documents written by the\n\
                  pool (or mirrored from its HTTP API) and turns them into formatted dashboards.\n\n\
                  Examples:\n\
                    Log dashboards once: pool-stats --api-dir /var/log/ckpool\n\
                    Serve the JSON API: pool-stats --api-dir /var/log/ckpool --web --listen 0.0.0.0:8080\n\
                    Metric suffixes:    pool-stats --api-dir ./data --suffix-scheme metric"
)]
pub struct Args {
    /// Directory laid out like the pool API: pool/pool.status and users/<address>
    #[arg(
        short = 'd',
        long = "api-dir",
        value_name = "DIR",
        help = "Directory containing pool/pool.status and users/<address>"
    )]
    pub api_dir: PathBuf,

    /// Suffix alphabet for counts (hashrates always use H/s units)
    #[arg(
        long,
        value_enum,
        default_value = "short-scale",
        help = "Count suffixes [short-scale=K/M/B/T, metric=k/M/G/T]"
    )]
    pub suffix_scheme: SuffixScheme,

    /// Colour applied to a 0% change
    #[arg(
        long,
        value_enum,
        default_value = "neutral",
        help = "Colour for an exactly zero percentage change"
    )]
    pub zero_change: ZeroChangePolicy,

    /// Minutes below which a timestamp renders as "Recently"
    #[arg(
        long,
        default_value = "1",
        value_name = "MINUTES",
        help = "Recency threshold for generic timestamps"
    )]
    pub recent_threshold: i64,

    /// Users are refreshed every 10 minutes, so last share gets a wider window
    #[arg(
        long,
        default_value = "11",
        value_name = "MINUTES",
        help = "Recency threshold for a user's last share"
    )]
    pub last_share_threshold: i64,

    /// Serve the JSON API
    #[arg(long, default_value = "false", help = "Serve the JSON API")]
    pub web: bool,

    /// Listen address for the JSON API
    #[arg(
        long,
        default_value = "0.0.0.0:8080",
        value_name = "HOST:PORT",
        help = "Listen address for the JSON API"
    )]
    pub listen: String,

    /// Seconds between snapshot reloads while serving
    #[arg(
        long,
        default_value = "60",
        value_name = "SECONDS",
        help = "Seconds between snapshot reloads"
    )]
    pub reload_interval: u64,

    #[arg(
        long,
        default_value = "info",
        value_name = "LEVEL",
        help = "Log level [error, warn, info, debug, trace]"
    )]
    pub log_level: String,

    /// log4rs YAML configuration; overrides --log-level
    #[arg(long, value_name = "FILE", help = "log4rs configuration file")]
    pub log_config: Option<PathBuf>,
}

impl Args {
    /// Validate arguments that clap cannot check on its own
    pub fn validate(&self) -> Result<(), String> {
        if !self.api_dir.is_dir() {
            return Err(format!(
                "API directory {:?} does not exist. Use --api-dir DIR",
                self.api_dir
            ));
        }

        if self.recent_threshold < 0 || self.last_share_threshold < 0 {
            return Err("Recency thresholds must not be negative".to_string());
        }

        if self.web {
            if !self.listen.contains(':') {
                return Err("Listen address must be in format HOST:PORT (e.g., 0.0.0.0:8080)".to_string());
            }
            if self.reload_interval == 0 {
                return Err("Reload interval must be at least 1 second".to_string());
            }
        }

        if self.log_config.is_none() && self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(format!("Unknown log level '{}'", self.log_level));
        }

        Ok(())
    }
}

/// Display conventions shared by every formatter and dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub suffix_scheme: SuffixScheme,
    pub zero_change: ZeroChangePolicy,
    pub recent_threshold_minutes: i64,
    pub last_share_threshold_minutes: i64,
    pub trend_window_hours: i64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            suffix_scheme: SuffixScheme::ShortScale,
            zero_change: ZeroChangePolicy::Neutral,
            recent_threshold_minutes: 1,
            last_share_threshold_minutes: 11,
            trend_window_hours: DEFAULT_TREND_WINDOW_HOURS,
        }
    }
}

impl From<&Args> for DisplayConfig {
    fn from(args: &Args) -> Self {
        Self {
            suffix_scheme: args.suffix_scheme,
            zero_change: args.zero_change,
            recent_threshold_minutes: args.recent_threshold,
            last_share_threshold_minutes: args.last_share_threshold,
            ..Self::default()
        }
    }
}


// Changelog:
// - v1.1.1 (2025-07-09): Default trend window reads DEFAULT_TREND_WINDOW_HOURS.
// - v1.1.0 (2025-07-05): Added the zero-change colour policy.
// - v1.0.0 (2025-07-02): Replaced miner arguments with pool-stats arguments.
//   - Args now point at a pool API directory instead of a pool connection.
//   - Added DisplayConfig, built from Args, for the formatters and dashboards.
