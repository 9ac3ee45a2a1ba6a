// Pool Stats - Free and Open Source Software Statement
//
// This project, pool-stats, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: tests/metrics_test.rs
// Version: 1.0.0
// Developer: Test Implementation
//
// This file contains tests for the metric formatters and estimators through
// the public API: magnitude display and parsing, percentage trends, durations,
// relative times and block odds.

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use pool_stats::core::{SuffixScheme, U256, ZeroChangePolicy};
    use pool_stats::metrics::{
        BlockChances, ChangeTone, Difficulty, Horizon, PercentChange, RenderContext, StatValue, Timestamp,
        block_chances_for_network_difficulty, calculate_average_time_to_block, calculate_block_chances,
        calculate_percentage_change, convert_hashrate, format_duration, format_hashrate, format_number,
        format_number_with, format_time_ago, percentage_change_tone,
    };
    use pool_stats::{DisplayConfig, MetricsError};

    fn pow10(exp: usize) -> U256 {
        U256::from_dec_str(&format!("1{}", "0".repeat(exp))).unwrap()
    }

    // Helper to turn "1.5 MH/s" back into the "1.5M" shape the parser reads
    fn hashrate_text_to_literal(text: &str) -> String {
        text.trim_end_matches("H/s").replace([' ', ','], "")
    }

    fn assert_all_chances(chances: &BlockChances, expected: &str) {
        for horizon in Horizon::ALL {
            assert_eq!(chances.render(horizon), expected, "{:?}", horizon);
        }
    }

    #[test]
    fn test_format_then_parse_stays_within_display_rounding() {
        let magnitudes = [
            U256::zero(),
            U256::from(999u64),
            U256::from(1_000u64),
            U256::from(1_500_000u64),
            pow10(15),
            pow10(21),
        ];

        for magnitude in magnitudes {
            let text = format_hashrate(&magnitude);
            let parsed = convert_hashrate(&hashrate_text_to_literal(&text)).unwrap();

            let original = magnitude.low_u128() as f64;
            let back = parsed.low_u128() as f64;
            if original == 0.0 {
                assert_eq!(back, 0.0);
            } else {
                let relative = ((back - original) / original).abs();
                assert!(relative <= 0.005, "{} -> {} -> {}", magnitude, text, parsed);
            }
        }
    }

    #[test]
    fn test_number_threshold_boundary() {
        assert_eq!(format_number(999u64), "999");
        assert_eq!(format_number(1_000u64), "1.00 K");
        assert_eq!(format_number(1_500_000u64), "1.50 M");
        assert_eq!(format_number(2_000_000_000u64), "2.00 B");
        assert_eq!(format_number_with(2_000_000_000u64, SuffixScheme::Metric), "2.00 G");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number("0"), "0");
    }

    #[test]
    fn test_hashrate_suffix_table() {
        assert_eq!(format_hashrate("1000000000000"), "1 TH/s");
        assert_eq!(format_hashrate("1010000000000"), "1.01 TH/s");
        assert_eq!(format_hashrate(999u64), "999 H/s");
        assert_eq!(format_hashrate(0u64), "0 H/s");
        assert_eq!(format_hashrate("2.5P"), "N/A");
    }

    #[test]
    fn test_convert_hashrate_inverse() {
        assert_eq!(convert_hashrate("1K").unwrap(), U256::from(1_000u64));
        assert_eq!(convert_hashrate("1P").unwrap(), pow10(15));
        assert_eq!(convert_hashrate("1").unwrap(), U256::one());
        assert_eq!(convert_hashrate("1.5e3K").unwrap(), U256::from(1_500_000u64));
        assert_eq!(convert_hashrate("123456789012345678901234567890").unwrap(), {
            U256::from_dec_str("123456789012345678901234567890").unwrap()
        });
    }

    #[test]
    fn test_convert_hashrate_rejects_malformed_input() {
        for input in ["", "K", "abc", "1.5X", "1.2.3M", "-5"] {
            let result = convert_hashrate(input);
            assert!(
                matches!(result, Err(MetricsError::Parse { .. })),
                "{:?} gave {:?}",
                input,
                result
            );
        }
    }

    #[test]
    fn test_percentage_change() {
        assert_eq!(calculate_percentage_change(110.0, 100.0), PercentChange::Value(10.0));
        assert_eq!(calculate_percentage_change(90.0, 100.0), PercentChange::Value(-10.0));
        assert_eq!(calculate_percentage_change(100.0, 0.0), PercentChange::NotApplicable);
        assert_eq!(calculate_percentage_change(100.0, 0.0).to_string(), "N/A");
        assert_eq!(calculate_percentage_change(1.0, 3.0), PercentChange::Value(-66.67));
    }

    #[test]
    fn test_percentage_tone_both_zero_conventions() {
        let zero = calculate_percentage_change(100.0, 100.0);
        assert_eq!(zero, PercentChange::Value(0.0));
        assert_eq!(percentage_change_tone(zero, ZeroChangePolicy::Neutral), ChangeTone::Neutral);
        assert_eq!(percentage_change_tone(zero, ZeroChangePolicy::Negative), ChangeTone::Negative);

        let up = calculate_percentage_change(110.0, 100.0);
        let down = calculate_percentage_change(90.0, 100.0);
        for policy in [ZeroChangePolicy::Neutral, ZeroChangePolicy::Negative] {
            assert_eq!(percentage_change_tone(up, policy), ChangeTone::Positive);
            assert_eq!(percentage_change_tone(down, policy), ChangeTone::Negative);
            assert_eq!(
                percentage_change_tone(PercentChange::NotApplicable, policy),
                ChangeTone::Neutral
            );
        }
        assert_eq!(ChangeTone::Positive.css_class(), "text-success");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(60.0), "1m");
        assert_eq!(format_duration(86_400.0), "1d");
        assert_eq!(format_duration(31_536_000.0), "1y");
        assert_eq!(format_duration(9_000_000_000_000.0), "~∞");
        assert_eq!(format_duration(f64::INFINITY), "~∞");
        assert_eq!(format_duration(f64::NAN), "N/A");
        assert_eq!(format_duration(0.0), "0m");
        assert_eq!(format_duration(31_536_000.0 + 86_400.0 + 3_600.0 + 60.0), "1y 1d 1h");
        assert_eq!(format_duration(90_061.0), "1d 1h 1m");
    }

    #[test]
    fn test_format_time_ago_recency() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        assert_eq!(format_time_ago(now, now, 2), "Recently");
        assert_eq!(format_time_ago(now - Duration::minutes(1), now, 1), "1 min ago");
        assert_eq!(format_time_ago(now - Duration::minutes(65), now, 1), "1 hour 5 mins ago");
        assert_eq!(format_time_ago(now - Duration::minutes(120), now, 1), "2 hours 0 min ago");
        assert_eq!(
            format_time_ago(now - Duration::minutes(3 * 1_440 + 61), now, 1),
            "3 days 1 hour 1 min ago"
        );
        assert_eq!(format_time_ago(now + Duration::minutes(5), now, 1), "Recently");
        assert_eq!(format_time_ago("not a date", now, 1), "N/A");
    }

    #[test]
    fn test_format_time_ago_accepts_every_timestamp_shape() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let then = now - Duration::minutes(30);

        let shapes = [
            Timestamp::At(then),
            Timestamp::EpochMillis(then.timestamp_millis()),
            Timestamp::EpochSeconds(then.timestamp()),
            Timestamp::from("2024-03-01T11:30:00Z"),
        ];
        for shape in shapes {
            assert_eq!(format_time_ago(shape, now, 1), "30 mins ago");
        }
    }

    #[test]
    fn test_average_time_to_block() {
        let one_th = U256::from(1_000_000_000_000u64);
        let seconds = calculate_average_time_to_block(one_th, Difficulty::Exact(U256::from(1_000u64)));
        assert!((seconds - 4.294967296).abs() < 1e-9);

        let scaled = Difficulty::Scaled {
            value: 1.0,
            unit: pool_stats::core::UnitPrefix::Kilo,
        };
        assert_eq!(calculate_average_time_to_block(one_th, scaled), seconds);

        assert_eq!(
            calculate_average_time_to_block(U256::zero(), Difficulty::Exact(U256::one())),
            f64::INFINITY
        );
        assert_eq!(format_duration(f64::INFINITY), "~∞");
    }

    #[test]
    fn test_block_chances_monotonic() {
        let hashrate = pow10(17);
        let chances = calculate_block_chances(hashrate, 0.5, U256::from(400_000_000_000u64));

        let hour = chances.percent(Horizon::OneHour);
        let day = chances.percent(Horizon::OneDay);
        let week = chances.percent(Horizon::OneWeek);
        let month = chances.percent(Horizon::OneMonth);
        let year = chances.percent(Horizon::OneYear);
        assert!(year > month && month > week && week > day && day > hour && hour >= 0.0);
        assert!(year <= 100.0);

        let direct = block_chances_for_network_difficulty(hashrate, U256::from(80_000_000_000_000u64));
        assert_eq!(direct, chances);
    }

    #[test]
    fn test_block_chances_floor() {
        let tiny = block_chances_for_network_difficulty(U256::one(), pow10(13));
        assert_all_chances(&tiny, "<0.001%");

        let rendered = serde_json::to_value(tiny).unwrap();
        assert_eq!(rendered["1y"], "<0.001%");
    }

    #[test]
    fn test_zero_hashrate_block_chances() {
        let chances = calculate_block_chances(U256::zero(), 0.5, U256::from(1_000u64));
        assert_all_chances(&chances, "<0.001%");

        let no_difficulty = calculate_block_chances(pow10(15), 0.0, U256::zero());
        assert_all_chances(&no_difficulty, "<0.001%");
    }

    #[test]
    fn test_stat_values_dispatch_on_kind() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let ctx = RenderContext::new(now, &DisplayConfig::default());

        assert_eq!(StatValue::Count(1_000.0).render(&ctx), "1.00 K");
        assert_eq!(StatValue::Hashrate(U256::from(1_500_000u64)).render(&ctx), "1.5 MH/s");
        assert_eq!(StatValue::Duration(3_600.0).render(&ctx), "1h");
        assert_eq!(
            StatValue::Timestamp(Timestamp::At(now - Duration::minutes(5))).render(&ctx),
            "5 mins ago"
        );

        let metric = RenderContext::new(
            now,
            &DisplayConfig {
                suffix_scheme: SuffixScheme::Metric,
                ..DisplayConfig::default()
            },
        );
        assert_eq!(StatValue::Count(1_000.0).render(&metric), "1.00 k");
    }
}

// Changelog:
// - v1.0.0 (2025-07-05): Initial metric formatter and estimator tests.
