use chrono::NaiveDate;

use crate::baseline::{compute_baselines, Baseline, BaselineMap};
use crate::config::{EngineConfig, PercentileMode};
use crate::errors::EngineError;
use crate::records::TradingRecord;

use super::*;

/// Baseline with normal-approximation percentiles and neutral price/trade fields.
pub(crate) fn create_baseline(
    mean_volume: f64,
    stddev_volume: f64,
    max_volume: u64,
    mean_delivery: f64,
    stddev_delivery: f64,
    max_delivery: u64,
) -> Baseline {
    Baseline {
        instrument_id: "RELIANCE-EQ".to_string(),
        period_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        period_end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        trading_days: 20,
        mean_volume,
        mean_delivery,
        stddev_volume,
        stddev_delivery,
        min_volume: 0,
        max_volume,
        min_delivery: 0,
        max_delivery,
        median_volume: mean_volume + 0.67 * stddev_volume,
        median_delivery: mean_delivery + 0.67 * stddev_delivery,
        p75_volume: mean_volume + stddev_volume,
        p75_delivery: mean_delivery + stddev_delivery,
        p95_volume: mean_volume + 1.64 * stddev_volume,
        p95_delivery: mean_delivery + 1.64 * stddev_delivery,
        mean_price: 2500.0,
        mean_turnover: 250_000_000.0,
        mean_trade_count: 10_000.0,
        quality_score: 100.0,
        percentile_mode: PercentileMode::NormalApproximation,
    }
}

pub(crate) fn create_current_record(volume: u64, delivery: u64) -> TradingRecord {
    TradingRecord::new_from_values(
        "RELIANCE-EQ",
        NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(),
        volume,
        delivery,
        2500.0,
        2550.0,
        2480.0,
        2540.0,
        2500.0,
        volume as f64 * 2520.0,
        12_000,
    )
}

fn baseline_map(baseline: Baseline) -> BaselineMap {
    let mut map = BaselineMap::default();
    map.insert(baseline.instrument_id.clone(), baseline);
    map
}

#[test]
fn test_reference_scenario_statistical_outlier() {
    let baselines = baseline_map(create_baseline(100_000.0, 20_000.0, 150_000, 50_000.0, 10_000.0, 70_000));
    let record = create_current_record(260_000, 50_000);

    let results = find_exceedances(vec![record], &baselines, &EngineConfig::default()).unwrap();
    assert_eq!(results.len(), 1);

    let exceedance = &results[0];
    assert!(exceedance.flags.volume_exceeded_mean);
    assert!(exceedance.flags.volume_exceeded_max);
    assert_eq!(exceedance.tiers.volume_tier, Tier::Tier3Exceptional);
    assert_eq!(exceedance.outlier.vol_stddev_score, 8.0);
    assert!(exceedance.is_outlier());
    assert_eq!(exceedance.pattern_type, PatternType::StatisticalOutlier);
    assert_eq!(exceedance.data_quality_score, 100.0);
}

#[test]
fn test_zero_delivery_baseline_still_tiers_volume() {
    let baselines = baseline_map(create_baseline(100_000.0, 50_000.0, 250_000, 0.0, 0.0, 0));
    let record = create_current_record(160_000, 20_000);

    let results = find_exceedances(vec![record], &baselines, &EngineConfig::default()).unwrap();
    let exceedance = &results[0];

    assert_eq!(exceedance.tiers.delivery_tier, Tier::None);
    assert_eq!(exceedance.tiers.volume_tier, Tier::Tier2High);
    assert_eq!(exceedance.tiers.overall_tier, Tier::Tier2High);
    assert_eq!(exceedance.outlier.del_stddev_score, 0.0);
    assert_eq!(exceedance.increase.delivery_increase_pct, 0.0);
    assert!(exceedance.flags.delivery_exceeded_max);
    // new delivery max is a spike even with undefined delivery ratio
    assert_eq!(exceedance.pattern_type, PatternType::Spike);
}

#[test]
fn test_breakout_pattern() {
    let baselines = baseline_map(create_baseline(100_000.0, 20_000.0, 200_000, 50_000.0, 10_000.0, 90_000));
    // z = 2.5 on volume, 2.0 on delivery: both past p95 (1.64σ), neither past max
    let record = create_current_record(150_000, 70_000);

    let results = find_exceedances(vec![record], &baselines, &EngineConfig::default()).unwrap();
    let exceedance = &results[0];

    assert!(!exceedance.is_outlier());
    assert!(exceedance.flags.both_exceed_p95());
    assert!(!exceedance.flags.any_exceeds_max());
    assert_eq!(exceedance.pattern_type, PatternType::Breakout);
}

#[test]
fn test_momentum_and_standard_patterns() {
    let baselines = baseline_map(create_baseline(100_000.0, 40_000.0, 300_000, 50_000.0, 40_000.0, 200_000));

    let momentum = create_current_record(160_000, 50_000);
    let standard = create_current_record(110_000, 50_000);
    let results = find_exceedances(vec![momentum, standard], &baselines, &EngineConfig::default()).unwrap();

    let patterns: Vec<PatternType> = results.iter().map(|r| r.pattern_type).collect();
    assert!(patterns.contains(&PatternType::Momentum));
    assert!(patterns.contains(&PatternType::Standard));

    let standard = results.iter().find(|r| r.pattern_type == PatternType::Standard).unwrap();
    assert_eq!(standard.tiers.overall_tier, Tier::None);
    assert!((standard.momentum_score - 2.5).abs() < 1e-9);
}

#[test]
fn test_admission_gate_and_missing_baseline() {
    let baselines = baseline_map(create_baseline(100_000.0, 20_000.0, 150_000, 50_000.0, 10_000.0, 70_000));

    let below = create_current_record(90_000, 40_000);
    let mut unknown = create_current_record(900_000, 400_000);
    unknown.instrument_id = "UNKNOWN-EQ".to_string();

    let results = find_exceedances(vec![below, unknown], &baselines, &EngineConfig::default()).unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_malformed_current_record_fails_fast() {
    let baselines = baseline_map(create_baseline(100_000.0, 20_000.0, 150_000, 50_000.0, 10_000.0, 70_000));
    let bad = create_current_record(100, 500);

    let result = find_exceedances(vec![bad], &baselines, &EngineConfig::default());
    assert!(matches!(result, Err(EngineError::InvalidRecord { .. })));
}

#[test]
fn test_outlier_threshold_from_config() {
    let baselines = baseline_map(create_baseline(100_000.0, 20_000.0, 400_000, 50_000.0, 10_000.0, 70_000));
    let record = create_current_record(150_000, 50_000);

    let default_run = find_exceedances(vec![record.clone()], &baselines, &EngineConfig::default()).unwrap();
    assert!(!default_run[0].is_outlier());

    let strict = EngineConfig::default().with_outlier_threshold(2.0);
    let strict_run = find_exceedances(vec![record], &baselines, &strict).unwrap();
    assert!(strict_run[0].is_outlier());
    assert_eq!(strict_run[0].pattern_type, PatternType::StatisticalOutlier);
}

#[test]
fn test_scan_record_single() {
    let baselines = baseline_map(create_baseline(100_000.0, 20_000.0, 150_000, 50_000.0, 10_000.0, 70_000));
    let config = EngineConfig::default();
    let scanner = ExceedanceScanner::new(&baselines, &config).unwrap();

    assert!(scanner.scan_record(&create_current_record(130_000, 50_000)).unwrap().is_some());
    assert!(scanner.scan_record(&create_current_record(80_000, 30_000)).unwrap().is_none());

    let mut no_trades = create_current_record(130_000, 50_000);
    no_trades.trade_count = 0;
    assert!(scanner.scan_record(&no_trades).unwrap().is_none());
}

fn create_universe() -> (Vec<TradingRecord>, Vec<TradingRecord>) {
    let mut reference = Vec::new();
    let mut current = Vec::new();
    for n in 0..30u64 {
        let id = format!("SYM{:02}-EQ", n);
        for day in 1..=20u32 {
            let volume = 10_000 + n * 100 + (day as u64 % 5) * 1_000;
            let mut record = create_current_record(volume, volume / 2);
            record.instrument_id = id.clone();
            record.trade_date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
            reference.push(record);
        }
        for day in 1..=5u32 {
            let volume = 12_000 + n * 1_500 * day as u64;
            let mut record = create_current_record(volume, volume * 2 / 5);
            record.instrument_id = id.clone();
            record.trade_date = NaiveDate::from_ymd_opt(2024, 2, day).unwrap();
            current.push(record);
        }
    }
    (reference, current)
}

#[test]
fn test_parallel_and_sequential_scans_agree() {
    let (reference, current) = create_universe();
    let config = EngineConfig::default();
    let baselines = compute_baselines(&reference, &config).unwrap();

    let parallel = find_exceedances(&current, &baselines, &config).unwrap();
    let sequential = find_exceedances(&current, &baselines, &config.clone().with_parallel(false)).unwrap();
    assert!(!parallel.is_empty());
    assert_eq!(parallel, sequential);

    let rerun = find_exceedances(&current, &baselines, &config).unwrap();
    assert_eq!(parallel, rerun);
}

#[test]
fn test_output_sorted_by_date_then_instrument() {
    let (reference, current) = create_universe();
    let config = EngineConfig::default();
    let baselines = compute_baselines(&reference, &config).unwrap();

    let results = find_exceedances(current.iter().rev(), &baselines, &config).unwrap();
    for pair in results.windows(2) {
        let key_a = (pair[0].record.trade_date, pair[0].instrument_id());
        let key_b = (pair[1].record.trade_date, pair[1].instrument_id());
        assert!(key_a <= key_b);
    }
}

#[test]
fn test_invariants_hold_across_universe() {
    let (reference, current) = create_universe();
    let config = EngineConfig::default();
    let baselines = compute_baselines(&reference, &config).unwrap();
    let results = find_exceedances(&current, &baselines, &config).unwrap();

    for exceedance in &results {
        assert!(exceedance.flags.is_admitted());
        let max_abs = exceedance
            .outlier
            .vol_stddev_score
            .abs()
            .max(exceedance.outlier.del_stddev_score.abs());
        assert_eq!(exceedance.is_outlier(), max_abs > config.outlier_threshold);
        assert!(exceedance.momentum_score >= 0.0 && exceedance.momentum_score <= 100.0);
        assert!(exceedance.tiers.overall_tier >= exceedance.tiers.volume_tier);
        assert!(exceedance.tiers.overall_tier >= exceedance.tiers.delivery_tier);
    }

    let summary = ScanSummary::from_records(&results);
    assert_eq!(summary.total_exceedances, results.len());
    assert_eq!(summary.by_overall_tier.values().sum::<usize>(), results.len());
    assert_eq!(summary.by_pattern.values().sum::<usize>(), results.len());
    assert_eq!(summary.outliers, results.iter().filter(|r| r.is_outlier()).count());
}
