// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/main.rs
// Version: 1.1.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// Entry point: load the pool API documents once, log the dashboards, and
// optionally keep serving them over HTTP while reloading in the background.

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, error, info};
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use pool_stats::{
    core::types::{Args, DisplayConfig},
    metrics::time::{Clock, SystemClock},
    pool::source::ApiDirectory,
    stats::{PoolDashboard, RetentionPolicy, StatsCollector, UserDashboard, WorkerDashboard},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

// JSON API for the dashboards
mod web_server;

use web_server::AppState;

const LOG_TARGET: &str = "pool_stats::main";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Validate arguments
    if let Err(err) = args.validate() {
        eprintln!("❌ Error: {}", err);
        std::process::exit(1);
    }

    init_logging(&args)?;

    let config = DisplayConfig::from(&args);
    let source = ApiDirectory::new(&args.api_dir);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    info!(target: LOG_TARGET, "🚀 Pool Stats v{}", env!("CARGO_PKG_VERSION"));
    info!(target: LOG_TARGET, "📁 API directory: {:?}", source.root());

    let mut collector = StatsCollector::new(RetentionPolicy::default());
    let now = clock.now();
    collector.absorb(source.fetch(now).await, now);
    log_dashboards(&collector, now, &config);

    if !args.web {
        return Ok(());
    }

    let state = Arc::new(AppState {
        collector: RwLock::new(collector),
        config,
        clock,
    });

    tokio::spawn(reload_loop(
        state.clone(),
        source,
        Duration::from_secs(args.reload_interval),
    ));

    web_server::start_web_server(state, &args.listen)
        .await
        .context("Web server stopped")
}

/// log4rs from a YAML file, or a console appender at the requested level
fn init_logging(args: &Args) -> Result<()> {
    if let Some(path) = &args.log_config {
        log4rs::init_file(path, Default::default())
            .with_context(|| format!("Failed to load log configuration {:?}", path))?;
        return Ok(());
    }

    let level: LevelFilter = args
        .log_level
        .parse()
        .with_context(|| format!("Unknown log level '{}'", args.log_level))?;
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}",
        )))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))
        .context("Invalid logging configuration")?;
    log4rs::init_config(config).context("Failed to initialise logging")?;
    Ok(())
}

fn log_dashboards(collector: &StatsCollector, now: chrono::DateTime<chrono::Utc>, config: &DisplayConfig) {
    match collector.latest_pool() {
        Some(pool) => PoolDashboard::build(pool, now, config).display_dashboard(),
        None => error!(target: LOG_TARGET, "❌ No pool status loaded"),
    }

    for address in collector.addresses() {
        let Some(series) = collector.user(address) else {
            continue;
        };
        if let Some(latest) = series.latest() {
            UserDashboard::build(latest, &series.history, collector.latest_pool(), now, config)
                .with_active(series.active)
                .display_dashboard();
        }
        for history in series.workers.values() {
            if let Some(dashboard) = WorkerDashboard::build(address, history, now, config) {
                dashboard.display_dashboard();
            }
        }
    }
}

/// Re-read the API directory on a fixed interval
async fn reload_loop(state: Arc<AppState>, source: ApiDirectory, period: Duration) {
    let mut interval = tokio::time::interval(period);
    // The first tick completes immediately and the initial load already happened
    interval.tick().await;
    loop {
        interval.tick().await;
        let now = state.clock.now();
        let batch = source.fetch(now).await;
        state.collector.write().await.absorb(batch, now);
        info!(target: LOG_TARGET, "🔄 Snapshots reloaded");
    }
}

// Changelog:
// - v1.1.0 (2025-07-09): Log a dashboard per worker after each user.
// - v1.0.0 (2025-07-05): Replaced the feature-gated miner entry points with
//   the pool-stats loader and API server.
