use crate::baseline::Baseline;
use crate::config::EngineConfig;
use crate::records::TradingRecord;

use super::outliers::detect_outlier;
use super::patterns::{momentum_score, recognize_pattern};
use super::structs::{AdvancedMetrics, ExceedanceRecord, IncreaseMetrics};
use super::thresholds::evaluate_thresholds;
use super::tiers::classify_tiers;

/// Runs every classifier for one record against its baseline and assembles the result.
#[derive(Debug, Clone, Copy)]
pub struct ExceedanceRecordBuilder<'a> {
    config: &'a EngineConfig,
}

impl<'a> ExceedanceRecordBuilder<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// `None` unless the record exceeds the baseline mean on volume or delivery.
    pub fn build(&self, record: &TradingRecord, baseline: &Baseline) -> Option<ExceedanceRecord> {
        let flags = evaluate_thresholds(record, baseline)?;

        let volume = record.volume();
        let delivery = record.delivery();

        let tiers = classify_tiers(volume, delivery, baseline, &self.config.tier_thresholds);
        let outlier = detect_outlier(volume, delivery, baseline, self.config.outlier_threshold);
        let increase = IncreaseMetrics::calculate(record, baseline);
        let advanced = AdvancedMetrics::calculate(record, baseline);
        let pattern_type = recognize_pattern(&flags, &tiers, &outlier);

        Some(ExceedanceRecord {
            record: record.clone(),
            baseline: baseline.clone(),
            flags,
            tiers,
            increase,
            outlier,
            advanced,
            pattern_type,
            momentum_score: momentum_score(increase.volume_increase_pct, increase.delivery_increase_pct),
            data_quality_score: baseline.quality_score,
        })
    }
}
