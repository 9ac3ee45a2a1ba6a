// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/web_server.rs
// Version: 1.2.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements the JSON API for the pool-stats dashboards. Handlers
// read the shared collector and build dashboards on request.
//
// Tree Location:
// - src/web_server.rs (JSON API)
// - Depends on: axum, tokio, serde_json, stats

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use log::{debug, error, info};
use pool_stats::{
    core::types::DisplayConfig,
    metrics::time::Clock,
    pool::{
        PoolSnapshot,
        address::{is_path_safe_address, validate_bitcoin_address},
    },
    stats::{
        DEFAULT_LEADERBOARD_LIMIT, HISTORICAL_DATA_POINTS, LeaderboardRow, PoolDashboard, StatsCollector,
        UserDashboard, WorkerDashboard,
    },
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::RwLock;

const LOG_TARGET: &str = "pool_stats::web_server";

/// Longest leaderboard a request may ask for
const MAX_LEADERBOARD_LIMIT: usize = 100;

/// State shared by the handlers and the reload task
pub struct AppState {
    pub collector: RwLock<StatsCollector>,
    pub config: DisplayConfig,
    pub clock: Arc<dyn Clock>,
}

/// Error responses, rendered as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/stats", get(stats_handler))
        .route("/api/stats/historical", get(historical_handler))
        .route("/api/users/:address", get(user_handler))
        .route("/api/users/:address/workers/:name", get(worker_handler))
        .route("/api/top/hashrates", get(top_hashrates_handler))
        .route("/api/top/difficulties", get(top_difficulties_handler))
        .route("/api/health", get(health_handler))
        .with_state(state)
}

/// Serve the API until the listener fails
pub async fn start_web_server(state: Arc<AppState>, listen: &str) -> anyhow::Result<()> {
    let listener = match tokio::net::TcpListener::bind(listen).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(target: LOG_TARGET, "❌ Failed to bind web server to {}: {}", listen, e);
            error!(target: LOG_TARGET, "💡 Make sure the port is not already in use");
            return Err(e.into());
        }
    };

    info!(target: LOG_TARGET, "🌐 Pool stats API available at: http://{}/api/stats", listen);
    info!(target: LOG_TARGET, "👤 User stats at: http://{}/api/users/<address>", listen);
    info!(target: LOG_TARGET, "🏆 Leaderboards at: http://{}/api/top/hashrates", listen);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Pool dashboard built from the latest pool snapshot
async fn stats_handler(State(state): State<Arc<AppState>>) -> Result<Json<PoolDashboard>, ApiError> {
    debug!(target: LOG_TARGET, "📄 Serving pool stats");
    let collector = state.collector.read().await;
    let snapshot = collector
        .latest_pool()
        .ok_or_else(|| ApiError::NotFound("No pool stats loaded yet".to_string()))?;
    Ok(Json(PoolDashboard::build(snapshot, state.clock.now(), &state.config)))
}

/// Pool samples, newest first
async fn historical_handler(State(state): State<Arc<AppState>>) -> Json<Vec<PoolSnapshot>> {
    let collector = state.collector.read().await;
    let series: Vec<PoolSnapshot> = collector
        .pool_series(HISTORICAL_DATA_POINTS)
        .into_iter()
        .cloned()
        .collect();
    debug!(target: LOG_TARGET, "📄 Serving {} historical pool samples", series.len());
    Json(series)
}

fn check_address(address: &str) -> Result<(), ApiError> {
    if !is_path_safe_address(address) || !validate_bitcoin_address(address) {
        return Err(ApiError::BadRequest(format!("Invalid Bitcoin address: {}", address)));
    }
    Ok(())
}

async fn user_handler(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<UserDashboard>, ApiError> {
    check_address(&address)?;

    let collector = state.collector.read().await;
    let series = collector
        .user(&address)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown user: {}", address)))?;
    let latest = series
        .latest()
        .ok_or_else(|| ApiError::NotFound(format!("No stats available yet for {}", address)))?;

    debug!(target: LOG_TARGET, "📄 Serving user stats for {}", address);
    let dashboard = UserDashboard::build(
        latest,
        &series.history,
        collector.latest_pool(),
        state.clock.now(),
        &state.config,
    )
    .with_active(series.active);
    Ok(Json(dashboard))
}

async fn worker_handler(
    State(state): State<Arc<AppState>>,
    Path((address, name)): Path<(String, String)>,
) -> Result<Json<WorkerDashboard>, ApiError> {
    check_address(&address)?;

    let collector = state.collector.read().await;
    let history = collector
        .user(&address)
        .and_then(|series| series.worker(&name))
        .ok_or_else(|| ApiError::NotFound(format!("Unknown worker {} for {}", name.trim(), address)))?;
    let dashboard = WorkerDashboard::build(&address, history, state.clock.now(), &state.config)
        .ok_or_else(|| ApiError::NotFound(format!("No stats available yet for worker {}", name.trim())))?;

    debug!(target: LOG_TARGET, "📄 Serving worker stats for {} / {}", address, dashboard.name);
    Ok(Json(dashboard))
}

#[derive(Debug, Default, Deserialize)]
struct LeaderboardQuery {
    limit: Option<usize>,
}

impl LeaderboardQuery {
    fn limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_LEADERBOARD_LIMIT)
            .clamp(1, MAX_LEADERBOARD_LIMIT)
    }
}

async fn top_hashrates_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<Vec<LeaderboardRow>> {
    let collector = state.collector.read().await;
    let ranked = collector.top_users_by_hashrate(query.limit());
    Json(LeaderboardRow::rank_all(&ranked, &state.config))
}

async fn top_difficulties_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<Vec<LeaderboardRow>> {
    let collector = state.collector.read().await;
    let ranked = collector.top_users_by_best_ever(query.limit());
    Json(LeaderboardRow::rank_all(&ranked, &state.config))
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    let collector = state.collector.read().await;
    Json(json!({
        "status": "ok",
        "users": collector.user_count(),
        "pool_loaded": collector.latest_pool().is_some(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pool_stats::metrics::time::FixedClock;
    use pool_stats::pool::source::SourceBatch;
    use pool_stats::pool::{IngestReport, parse_pool_status};

    const ADDRESS: &str = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq";

    fn state_with(batch: Option<SourceBatch>) -> Arc<AppState> {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut collector = StatsCollector::default();
        if let Some(batch) = batch {
            collector.absorb(batch, now);
        }
        Arc::new(AppState {
            collector: RwLock::new(collector),
            config: DisplayConfig::default(),
            clock: Arc::new(FixedClock(now)),
        })
    }

    fn loaded_batch() -> SourceBatch {
        let captured_at = Utc.with_ymd_and_hms(2024, 3, 1, 11, 59, 0).unwrap();
        let record = parse_pool_status(r#"{"runtime": 3600, "Users": 2}
{"hashrate1hr": "1.5P", "hashrate6hr": "1.2P"}
{"diff": 0.5, "accepted": 400000000000}"#)
        .unwrap();
        let users = pool_stats::pool::ingest_users(
            [(
                ADDRESS,
                r#"{"hashrate1hr": "100T", "hashrate5m": "90T", "workers": 1, "bestever": 5000,
                    "worker": [{"workername": "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq.rig1",
                                "hashrate1hr": "100T", "shares": 42, "bestever": 5000}]}"#,
            )],
            captured_at,
        );
        SourceBatch {
            captured_at,
            pool: Some(PoolSnapshot::from_record(&record, captured_at).unwrap()),
            users,
        }
    }

    #[tokio::test]
    async fn test_stats_not_found_before_first_load() {
        let state = state_with(None);
        let result = stats_handler(State(state)).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_stats_and_user_after_load() {
        let state = state_with(Some(loaded_batch()));

        let Json(pool) = stats_handler(State(state.clone())).await.unwrap();
        assert_eq!(pool.network_difficulty, "80000000000000");

        let Json(user) = user_handler(State(state.clone()), Path(ADDRESS.to_string()))
            .await
            .unwrap();
        assert_eq!(user.address, ADDRESS);
        assert!(user.active);
        assert!(user.block_chances.is_some());
    }

    #[tokio::test]
    async fn test_user_errors() {
        let state = state_with(Some(SourceBatch {
            captured_at: Utc::now(),
            pool: None,
            users: IngestReport::default(),
        }));

        let result = user_handler(State(state.clone()), Path("../etc/passwd".to_string())).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));

        let result = user_handler(State(state.clone()), Path(ADDRESS.to_string())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));

        let response = ApiError::BadRequest("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_historical_newest_first() {
        let state = state_with(Some(loaded_batch()));
        {
            let mut collector = state.collector.write().await;
            let mut later = loaded_batch();
            let captured_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
            later.captured_at = captured_at;
            if let Some(pool) = later.pool.as_mut() {
                pool.captured_at = captured_at;
            }
            collector.absorb(later, captured_at);
        }

        let Json(series) = historical_handler(State(state)).await;
        assert_eq!(series.len(), 2);
        assert!(series[0].captured_at > series[1].captured_at);

        let Json(empty) = historical_handler(State(state_with(None))).await;
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_worker_detail() {
        let state = state_with(Some(loaded_batch()));

        let Json(worker) = worker_handler(State(state.clone()), Path((ADDRESS.to_string(), " rig1 ".to_string())))
            .await
            .unwrap();
        assert_eq!(worker.name, "rig1");
        assert_eq!(worker.hashrates.len(), 5);

        let result = worker_handler(State(state.clone()), Path((ADDRESS.to_string(), "rig9".to_string()))).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));

        let result = worker_handler(State(state), Path(("nope".to_string(), "rig1".to_string()))).await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_leaderboards() {
        let state = state_with(Some(loaded_batch()));

        let Json(rows) = top_hashrates_handler(State(state.clone()), Query(LeaderboardQuery::default())).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].hashrate1hr, "100 TH/s");

        let Json(rows) = top_difficulties_handler(State(state), Query(LeaderboardQuery { limit: Some(0) })).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].best_ever, "5.00 K");

        assert_eq!(LeaderboardQuery { limit: Some(5_000) }.limit(), MAX_LEADERBOARD_LIMIT);
        assert_eq!(LeaderboardQuery::default().limit(), DEFAULT_LEADERBOARD_LIMIT);
    }

    #[tokio::test]
    async fn test_health() {
        let state = state_with(Some(loaded_batch()));
        let Json(body) = health_handler(State(state)).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["users"], 1);
    }
}

// Changelog:
// - v1.2.0 (2025-07-09): Added the historical pool series, worker detail and
//   leaderboard routes.
// - v1.1.0 (2025-07-05): Replaced the miner dashboard and WebSocket stream
//   with the pool-stats JSON API.
//   - Routes /api/stats, /api/users/:address and /api/health.
// - v1.0.0 (2025-06-22): Initial web server implementation.
