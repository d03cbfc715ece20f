use std::borrow::Borrow;

use chrono::NaiveDate;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::common::constants::{
    MEDIAN_Z, P75_Z, P95_Z, PERCENT, QUALITY_SCORE_MAX, QUALITY_STATISTICAL_BONUS,
};
use crate::common::numeric::{interpolate_quantile, mean, sample_stddev};
use crate::config::{EngineConfig, PercentileMode};
use crate::errors::EngineResult;
use crate::records::{InstrumentId, ReferenceWindow, TradingRecord};

use super::structs::{Baseline, BaselineMap};

/// Accumulates one instrument's reference-window days and turns them into a [`Baseline`].
#[derive(Debug, Clone)]
pub struct BaselineCalculator {
    pub instrument_id: InstrumentId,
    volumes: Vec<f64>,
    deliveries: Vec<f64>,
    close_sum: f64,
    turnover_sum: f64,
    trade_count_sum: f64,
    min_volume: u64,
    max_volume: u64,
    min_delivery: u64,
    max_delivery: u64,
    first_date: Option<NaiveDate>,
    last_date: Option<NaiveDate>,
    /// Days rejected as non-qualifying (zero volume or zero trades)
    pub skipped_days: usize,
}

impl BaselineCalculator {
    pub fn new(instrument_id: impl Into<InstrumentId>) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            volumes: Vec::new(),
            deliveries: Vec::new(),
            close_sum: 0.0,
            turnover_sum: 0.0,
            trade_count_sum: 0.0,
            min_volume: u64::MAX,
            max_volume: 0,
            min_delivery: u64::MAX,
            max_delivery: 0,
            first_date: None,
            last_date: None,
            skipped_days: 0,
        }
    }

    /// Add one reference day. Returns whether the day counted towards the baseline.
    ///
    /// Malformed records are an error; non-qualifying days are skipped.
    pub fn add_record(&mut self, record: &TradingRecord) -> EngineResult<bool> {
        record.validate()?;

        if !record.is_qualifying_day() {
            debug!(
                instrument = %record.instrument_id,
                date = %record.trade_date,
                "Skipping non-qualifying reference day"
            );
            self.skipped_days += 1;
            return Ok(false);
        }

        self.volumes.push(record.volume());
        self.deliveries.push(record.delivery());
        self.close_sum += record.close;
        self.turnover_sum += record.turnover;
        self.trade_count_sum += record.trade_count as f64;

        self.min_volume = self.min_volume.min(record.traded_volume);
        self.max_volume = self.max_volume.max(record.traded_volume);
        self.min_delivery = self.min_delivery.min(record.delivered_quantity);
        self.max_delivery = self.max_delivery.max(record.delivered_quantity);

        self.first_date = Some(self.first_date.map_or(record.trade_date, |d| d.min(record.trade_date)));
        self.last_date = Some(self.last_date.map_or(record.trade_date, |d| d.max(record.trade_date)));

        Ok(true)
    }

    pub fn trading_days(&self) -> usize {
        self.volumes.len()
    }

    /// Build the baseline, or `None` when coverage is below `minimum_trading_days`.
    pub fn finalize(mut self, config: &EngineConfig) -> Option<Baseline> {
        let trading_days = self.trading_days();
        if trading_days < config.minimum_trading_days || trading_days == 0 {
            debug!(
                instrument = %self.instrument_id,
                trading_days,
                minimum = config.minimum_trading_days,
                "Insufficient reference coverage, no baseline"
            );
            return None;
        }
        let (period_start, period_end) = (self.first_date?, self.last_date?);

        let days = trading_days as f64;
        let mean_volume = mean(&self.volumes);
        let mean_delivery = mean(&self.deliveries);
        let stddev_volume = sample_stddev(&self.volumes, mean_volume);
        let stddev_delivery = sample_stddev(&self.deliveries, mean_delivery);

        let (volume_percentiles, delivery_percentiles) = match config.percentile_mode {
            PercentileMode::NormalApproximation => (
                Percentiles::approximate(mean_volume, stddev_volume),
                Percentiles::approximate(mean_delivery, stddev_delivery),
            ),
            PercentileMode::Empirical => (
                Percentiles::empirical(&mut self.volumes),
                Percentiles::empirical(&mut self.deliveries),
            ),
        };

        let quality_score = quality_score(
            trading_days,
            config.full_coverage_days,
            mean_volume,
            stddev_volume,
        );

        Some(Baseline {
            instrument_id: self.instrument_id,
            period_start,
            period_end,
            trading_days,
            mean_volume,
            mean_delivery,
            stddev_volume,
            stddev_delivery,
            min_volume: self.min_volume,
            max_volume: self.max_volume,
            min_delivery: self.min_delivery,
            max_delivery: self.max_delivery,
            median_volume: volume_percentiles.median,
            median_delivery: delivery_percentiles.median,
            p75_volume: volume_percentiles.p75,
            p75_delivery: delivery_percentiles.p75,
            p95_volume: volume_percentiles.p95,
            p95_delivery: delivery_percentiles.p95,
            mean_price: self.close_sum / days,
            mean_turnover: self.turnover_sum / days,
            mean_trade_count: self.trade_count_sum / days,
            quality_score,
            percentile_mode: config.percentile_mode,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Percentiles {
    median: f64,
    p75: f64,
    p95: f64,
}

impl Percentiles {
    fn approximate(mean: f64, stddev: f64) -> Self {
        Self {
            median: mean + MEDIAN_Z * stddev,
            p75: mean + P75_Z * stddev,
            p95: mean + P95_Z * stddev,
        }
    }

    fn empirical(samples: &mut [f64]) -> Self {
        samples.sort_by(|a, b| a.total_cmp(b));
        Self {
            median: interpolate_quantile(samples, 0.50),
            p75: interpolate_quantile(samples, 0.75),
            p95: interpolate_quantile(samples, 0.95),
        }
    }
}

/// Coverage score plus a bonus for a usable mean/stddev, capped at 100.
pub fn quality_score(trading_days: usize, full_coverage_days: usize, mean: f64, stddev: f64) -> f64 {
    let coverage = (trading_days as f64 / full_coverage_days.max(1) as f64 * PERCENT).min(QUALITY_SCORE_MAX);
    let bonus = if mean != 0.0 && stddev != 0.0 { QUALITY_STATISTICAL_BONUS } else { 0.0 };
    (coverage + bonus).min(QUALITY_SCORE_MAX)
}

/// Compute one baseline per instrument from a reference period's records.
///
/// Instruments below `config.minimum_trading_days` are absent from the map.
/// The first malformed record aborts the computation.
pub fn compute_baselines<I, R>(reference_records: I, config: &EngineConfig) -> EngineResult<BaselineMap>
where
    I: IntoIterator<Item = R>,
    R: Borrow<TradingRecord>,
{
    config.validate()?;

    let mut calculators: FxHashMap<InstrumentId, BaselineCalculator> = FxHashMap::default();
    let mut record_count = 0usize;

    for record in reference_records {
        let record: &TradingRecord = record.borrow();
        record_count += 1;
        calculators
            .entry(record.instrument_id.clone())
            .or_insert_with(|| BaselineCalculator::new(record.instrument_id.clone()))
            .add_record(record)?;
    }

    let instrument_count = calculators.len();
    let skipped_days: usize = calculators.values().map(|c| c.skipped_days).sum();

    let baselines: BaselineMap = if config.parallel {
        calculators
            .into_par_iter()
            .filter_map(|(id, calculator)| calculator.finalize(config).map(|b| (id, b)))
            .collect()
    } else {
        calculators
            .into_iter()
            .filter_map(|(id, calculator)| calculator.finalize(config).map(|b| (id, b)))
            .collect()
    };

    info!(
        records = record_count,
        instruments = instrument_count,
        baselines = baselines.len(),
        excluded = instrument_count - baselines.len(),
        skipped_days,
        "Computed reference baselines"
    );

    Ok(baselines)
}

/// [`compute_baselines`] restricted to records dated inside `window`.
pub fn compute_baselines_in_window<I, R>(
    reference_records: I,
    window: &ReferenceWindow,
    config: &EngineConfig,
) -> EngineResult<BaselineMap>
where
    I: IntoIterator<Item = R>,
    R: Borrow<TradingRecord>,
{
    debug!(start = %window.start, end = %window.end, "Filtering records to reference window");
    compute_baselines(
        reference_records
            .into_iter()
            .filter(|r| {
                let record: &TradingRecord = r.borrow();
                window.contains(record.trade_date)
            }),
        config,
    )
}
