// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: tests/dashboard_test.rs
// Version: 1.1.0
// Developer: Test Implementation
//
// This file contains tests for snapshot collection and the dashboards built
// from it: pool tiles, user trends, worker ordering, block odds, inactivity,
// retention, leaderboards and worker detail.

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use pool_stats::core::{DisplayConfig, ZeroChangePolicy};
    use pool_stats::metrics::{ChangeTone, PercentChange};
    use pool_stats::pool::{IngestReport, PoolSnapshot, SourceBatch, ingest_users, parse_pool_status};
    use pool_stats::stats::{
        HISTORICAL_DATA_POINTS, LeaderboardRow, PoolDashboard, RetentionPolicy, StatsCollector, Tile, UserDashboard,
        WorkerDashboard,
    };

    const ADDRESS: &str = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq";
    const P2PKH: &str = "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2";
    const P2SH: &str = "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy";

    const POOL_STATUS: &str = r#"{"runtime": 86400, "Users": 12, "Workers": 30, "Idle": 2, "Disconnected": 1}
{"hashrate1m": "1.2P", "hashrate5m": "1.1P", "hashrate15m": "1P", "hashrate1hr": "950T", "hashrate6hr": "900T", "hashrate1d": "875T", "hashrate7d": "800T"}
{"diff": 0.5, "accepted": 400000000000, "rejected": 1200000, "bestshare": 98765432100, "SPS1m": 12.5, "SPS5m": 12.1, "SPS15m": 11.9, "SPS1h": 11.7}"#;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    // Helper function to create a user document with the given 5m hashrate
    fn user_document(hashrate5m: &str, lastshare: i64) -> String {
        format!(
            r#"{{"hashrate1m": "{rate}", "hashrate5m": "{rate}", "hashrate1hr": "100T", "hashrate1d": "100T",
                "hashrate7d": "100T", "workers": 2, "shares": 1500000, "bestshare": 2500000.0,
                "bestever": 1000, "lastshare": {lastshare}, "authorised": 1709000000,
                "worker": [
                    {{"workername": "{address}.slow", "hashrate5m": "40T", "lastshare": {lastshare}}},
                    {{"workername": "{address}.fast", "hashrate5m": "70T", "lastshare": {lastshare}}}
                ]}}"#,
            address = ADDRESS,
            rate = hashrate5m,
            lastshare = lastshare,
        )
    }

    // Helper function to create a batch with the pool status and one user
    fn batch_at(captured_at: DateTime<Utc>, hashrate5m: &str) -> SourceBatch {
        let record = parse_pool_status(POOL_STATUS).unwrap();
        let document = user_document(hashrate5m, captured_at.timestamp());
        SourceBatch {
            captured_at,
            pool: Some(PoolSnapshot::from_record(&record, captured_at).unwrap()),
            users: ingest_users([(ADDRESS, document.as_str())], captured_at),
        }
    }

    // Helper function to create a user document for leaderboard ranking
    fn ranked_document(hashrate1hr: &str, bestever: u64) -> String {
        format!(
            r#"{{"hashrate1hr": "{rate}", "hashrate1d": "{rate}", "hashrate7d": "{rate}", "workers": 1,
                "bestshare": 10.0, "bestever": {best}, "worker": []}}"#,
            rate = hashrate1hr,
            best = bestever,
        )
    }

    fn users_batch(captured_at: DateTime<Utc>, users: &[(&str, String)]) -> SourceBatch {
        SourceBatch {
            captured_at,
            pool: None,
            users: ingest_users(users.iter().map(|(address, body)| (*address, body.as_str())), captured_at),
        }
    }

    fn empty_batch(captured_at: DateTime<Utc>) -> SourceBatch {
        SourceBatch {
            captured_at,
            pool: None,
            users: IngestReport::default(),
        }
    }

    fn tile<'a>(tiles: &'a [Tile], label: &str) -> &'a Tile {
        tiles
            .iter()
            .find(|tile| tile.label == label)
            .unwrap_or_else(|| panic!("missing tile {}", label))
    }

    #[test]
    fn test_pool_dashboard_tiles() {
        let captured_at = now() - Duration::minutes(1);
        let batch = batch_at(captured_at, "100T");
        let pool = batch.pool.unwrap();

        let dashboard = PoolDashboard::build(&pool, now(), &DisplayConfig::default());
        assert_eq!(dashboard.network_difficulty, "80000000000000");

        assert_eq!(tile(&dashboard.general, "Runtime").value, "1d");
        assert_eq!(tile(&dashboard.general, "Last Update").value, "1 min ago");
        assert_eq!(tile(&dashboard.general, "Network Difficulty").value, "80.00 T");
        assert_eq!(tile(&dashboard.general, "Avg Time to Find a Block").value, "12y 38d 16h");

        let titles: Vec<&str> = dashboard.groups.iter().map(|group| group.title.as_str()).collect();
        assert_eq!(titles, ["Users", "Shares", "Shares Per Second", "Hashrates"]);

        let users = tile(&dashboard.groups[0].tiles, "Users");
        assert_eq!(users.value, "12");
        assert_eq!(users.detail.as_deref(), Some("Idle: 2"));

        let shares = &dashboard.groups[1].tiles;
        assert_eq!(tile(shares, "Accepted").value, "400.00 B");
        assert_eq!(tile(shares, "Network Diff").value, "0.5%");
        assert_eq!(tile(&dashboard.groups[2].tiles, "1M").value, "12.5");
        assert_eq!(tile(&dashboard.groups[3].tiles, "1HR").value, "950 TH/s");
        assert_eq!(tile(&dashboard.groups[3].tiles, "1M").value, "1.2 PH/s");
    }

    #[test]
    fn test_pool_dashboard_without_diff() {
        let record = parse_pool_status(r#"{"runtime": 30, "hashrate1hr": "1P"}"#).unwrap();
        let pool = PoolSnapshot::from_record(&record, now()).unwrap();

        let dashboard = PoolDashboard::build(&pool, now(), &DisplayConfig::default());
        assert_eq!(dashboard.network_difficulty, "0");
        assert_eq!(tile(&dashboard.general, "Avg Time to Find a Block").value, "N/A");
        assert_eq!(tile(&dashboard.general, "Runtime").value, "0m");
        assert_eq!(tile(&dashboard.general, "Last Update").value, "Recently");
    }

    #[test]
    fn test_user_dashboard_trends_and_workers() {
        let mut collector = StatsCollector::new(RetentionPolicy::default());
        let earlier = now() - Duration::hours(25);
        collector.absorb(batch_at(earlier, "100T"), earlier);
        collector.absorb(batch_at(now(), "110T"), now());

        let series = collector.user(ADDRESS).unwrap();
        assert_eq!(series.history.len(), 2);
        let latest = series.latest().unwrap();
        assert_eq!(latest.captured_at, now());

        let dashboard = UserDashboard::build(
            latest,
            &series.history,
            collector.latest_pool(),
            now(),
            &DisplayConfig::default(),
        );
        assert!(dashboard.active);
        assert_eq!(tile(&dashboard.summary, "Worker Count").value, "2");
        assert_eq!(tile(&dashboard.summary, "Authorised").value, "2024-02-27");
        assert_eq!(tile(&dashboard.summary, "Last Share").value, "Recently");
        assert_eq!(tile(&dashboard.shares, "Total Shares").value, "1.50 M");

        let five_minutes = tile(&dashboard.hashrates, "Hashrate (5m)");
        assert_eq!(five_minutes.value, "110 TH/s");
        let trend = five_minutes.trend.as_ref().unwrap();
        assert_eq!(trend.change, PercentChange::Value(10.0));
        assert_eq!(trend.text, "10%");
        assert_eq!(trend.tone, ChangeTone::Positive);

        let one_hour = tile(&dashboard.hashrates, "Hashrate (1hr)").trend.as_ref().unwrap();
        assert_eq!(one_hour.change, PercentChange::Value(0.0));
        assert_eq!(one_hour.tone, ChangeTone::Neutral);

        let names: Vec<&str> = dashboard.workers.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, ["fast", "slow"]);
        assert_eq!(dashboard.workers[0].hashrate5m, "70 TH/s");

        let chances = dashboard.block_chances.unwrap();
        assert_eq!(tile(&dashboard.block_odds, "1 Year").value, chances.render(pool_stats::metrics::Horizon::OneYear));
        assert_ne!(tile(&dashboard.block_odds, "1 Year").value, "N/A");
    }

    #[test]
    fn test_zero_change_policy_reaches_user_trends() {
        let mut collector = StatsCollector::default();
        let earlier = now() - Duration::hours(25);
        collector.absorb(batch_at(earlier, "100T"), earlier);
        collector.absorb(batch_at(now(), "100T"), now());

        let config = DisplayConfig {
            zero_change: ZeroChangePolicy::Negative,
            ..DisplayConfig::default()
        };
        let series = collector.user(ADDRESS).unwrap();
        let dashboard = UserDashboard::build(series.latest().unwrap(), &series.history, None, now(), &config);

        let trend = tile(&dashboard.hashrates, "Hashrate (5m)").trend.as_ref().unwrap();
        assert_eq!(trend.change, PercentChange::Value(0.0));
        assert_eq!(trend.tone, ChangeTone::Negative);

        // No pool snapshot means no block odds
        assert!(dashboard.block_chances.is_none());
        assert!(dashboard.block_odds.iter().all(|tile| tile.value == "N/A"));
    }

    #[test]
    fn test_short_history_has_no_trend() {
        let mut collector = StatsCollector::default();
        collector.absorb(batch_at(now(), "100T"), now());

        let series = collector.user(ADDRESS).unwrap();
        let dashboard = UserDashboard::build(
            series.latest().unwrap(),
            &series.history,
            collector.latest_pool(),
            now(),
            &DisplayConfig::default(),
        );
        let trend = tile(&dashboard.hashrates, "Hashrate (5m)").trend.as_ref().unwrap();
        assert_eq!(trend.change, PercentChange::NotApplicable);
        assert_eq!(trend.text, "N/A");
    }

    #[test]
    fn test_failed_refresh_marks_user_inactive() {
        let mut collector = StatsCollector::default();
        collector.absorb(batch_at(now(), "100T"), now());
        assert!(collector.user(ADDRESS).unwrap().active);

        let later = now() + Duration::minutes(1);
        let rejected = SourceBatch {
            captured_at: later,
            pool: None,
            users: ingest_users([(ADDRESS, "{broken")], later),
        };
        collector.absorb(rejected, later);

        let series = collector.user(ADDRESS).unwrap();
        assert!(!series.active);
        assert_eq!(series.history.len(), 1);

        let dashboard = UserDashboard::build(
            series.latest().unwrap(),
            &series.history,
            collector.latest_pool(),
            later,
            &DisplayConfig::default(),
        )
        .with_active(series.active);
        assert!(!dashboard.active);

        collector.absorb(batch_at(later, "100T"), later);
        assert!(collector.user(ADDRESS).unwrap().active);
    }

    #[test]
    fn test_retention_per_series() {
        let mut collector = StatsCollector::new(RetentionPolicy::default());
        collector.absorb(batch_at(now(), "100T"), now());
        assert_eq!(collector.user(ADDRESS).unwrap().workers.len(), 2);

        // Workers keep one day
        let two_days = now() + Duration::days(2);
        collector.absorb(empty_batch(two_days), two_days);
        assert_eq!(collector.user_history(ADDRESS).len(), 1);
        assert!(collector.user(ADDRESS).unwrap().workers.is_empty());

        // Users keep three days
        let four_days = now() + Duration::days(4);
        collector.absorb(empty_batch(four_days), four_days);
        assert!(collector.user(ADDRESS).is_none());
        assert!(collector.user_history(ADDRESS).is_empty());
        assert_eq!(collector.user_count(), 0);
        assert_eq!(collector.pool_history().len(), 1);

        // The pool keeps seven days
        let eight_days = now() + Duration::days(8);
        assert_eq!(collector.prune(eight_days), 1);
        assert!(collector.latest_pool().is_none());
    }

    #[test]
    fn test_worker_count_tile_uses_reported_count() {
        let document = user_document("100T", now().timestamp()).replace(r#""workers": 2"#, r#""workers": 5"#);
        let report = ingest_users([(ADDRESS, document.as_str())], now());
        let latest = &report.accepted[0];
        assert_eq!(latest.workers.len(), 2);

        let dashboard = UserDashboard::build(latest, &[], None, now(), &DisplayConfig::default());
        assert_eq!(tile(&dashboard.summary, "Worker Count").value, "5");
    }

    #[test]
    fn test_leaderboards_rank_latest_snapshots() {
        let mut collector = StatsCollector::default();
        let earlier = now() - Duration::hours(1);
        collector.absorb(users_batch(earlier, &[(ADDRESS, ranked_document("900T", 1))]), earlier);
        collector.absorb(
            users_batch(
                now(),
                &[
                    (P2PKH, ranked_document("300T", 10)),
                    (P2SH, ranked_document("200T", 3_000)),
                    (ADDRESS, ranked_document("100T", 2_000_000)),
                ],
            ),
            now(),
        );

        let by_hashrate: Vec<&str> = collector
            .top_users_by_hashrate(10)
            .iter()
            .map(|user| user.address.as_str())
            .collect();
        assert_eq!(by_hashrate, [P2PKH, P2SH, ADDRESS]);
        assert_eq!(collector.top_users_by_hashrate(2).len(), 2);

        let by_best_ever = collector.top_users_by_best_ever(10);
        let addresses: Vec<&str> = by_best_ever.iter().map(|user| user.address.as_str()).collect();
        assert_eq!(addresses, [ADDRESS, P2SH, P2PKH]);

        let rows = LeaderboardRow::rank_all(&by_best_ever, &DisplayConfig::default());
        let ranks: Vec<usize> = rows.iter().map(|row| row.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
        assert_eq!(rows[0].best_ever, "2.00 M");
        assert_eq!(rows[0].hashrate1hr, "100 TH/s");
        assert_eq!(rows[0].worker_count, 1);
        assert_eq!(rows[2].best_share, "10");
    }

    #[test]
    fn test_pool_series_newest_first() {
        let mut collector = StatsCollector::default();
        for minutes in [2, 0, 1] {
            let at = now() - Duration::minutes(minutes);
            collector.absorb(batch_at(at, "100T"), now());
        }

        let series = collector.pool_series(HISTORICAL_DATA_POINTS);
        let times: Vec<DateTime<Utc>> = series.iter().map(|pool| pool.captured_at).collect();
        assert_eq!(times, [now(), now() - Duration::minutes(1), now() - Duration::minutes(2)]);

        let capped = collector.pool_series(2);
        assert_eq!(capped.len(), 2);
        assert_eq!(capped[0].captured_at, now());
        assert_eq!(HISTORICAL_DATA_POINTS, 2880);
    }

    #[test]
    fn test_worker_dashboard() {
        let mut collector = StatsCollector::default();
        // Worker samples are kept for one day
        let earlier = now() - Duration::hours(23);
        collector.absorb(batch_at(earlier, "100T"), earlier);
        collector.absorb(batch_at(now(), "110T"), now());

        let series = collector.user(ADDRESS).unwrap();
        let history = series.worker(" fast ").unwrap();
        assert_eq!(history.len(), 2);
        assert!(series.worker("missing").is_none());

        let config = DisplayConfig {
            trend_window_hours: 12,
            ..DisplayConfig::default()
        };
        let dashboard = WorkerDashboard::build(ADDRESS, history, now(), &config).unwrap();
        assert_eq!(dashboard.name, "fast");
        assert_eq!(dashboard.captured_at, now());

        let labels: Vec<&str> = dashboard.hashrates.iter().map(|tile| tile.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Hashrate (1m)", "Hashrate (5m)", "Hashrate (1hr)", "Hashrate (1d)", "Hashrate (7d)"]
        );
        let five_minutes = tile(&dashboard.hashrates, "Hashrate (5m)");
        assert_eq!(five_minutes.value, "70 TH/s");
        assert_eq!(five_minutes.trend.as_ref().unwrap().change, PercentChange::Value(0.0));

        assert_eq!(tile(&dashboard.shares, "Last Share").value, "Recently");
        assert_eq!(tile(&dashboard.shares, "Best Ever").value, "0");

        assert!(WorkerDashboard::build(ADDRESS, &[], now(), &DisplayConfig::default()).is_none());
    }

    #[test]
    fn test_dashboards_serialize_for_the_api() {
        let mut collector = StatsCollector::default();
        collector.absorb(batch_at(now(), "100T"), now());

        let pool = PoolDashboard::build(collector.latest_pool().unwrap(), now(), &DisplayConfig::default());
        let json = serde_json::to_value(&pool).unwrap();
        assert_eq!(json["network_difficulty"], "80000000000000");
        assert_eq!(json["groups"][0]["tiles"][0]["kind"], "count");

        let series = collector.user(ADDRESS).unwrap();
        let user = UserDashboard::build(
            series.latest().unwrap(),
            &series.history,
            collector.latest_pool(),
            now(),
            &DisplayConfig::default(),
        );
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["hashrates"][0]["trend"]["change"], "N/A");
        assert_eq!(json["hashrates"][0]["trend"]["tone"], "text-base-content");
        assert!(json["block_chances"]["1d"].is_string());
    }
}

// Changelog:
// - v1.1.0 (2025-07-09): Leaderboard, pool series, worker detail and
//   reported worker count tests.
// - v1.0.0 (2025-07-05): Initial collector and dashboard tests.
