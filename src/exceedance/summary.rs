use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::structs::{ExceedanceRecord, PatternType, Tier};

/// Aggregate counts over one scan's output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total_exceedances: usize,
    pub instruments: usize,
    pub outliers: usize,
    pub by_overall_tier: BTreeMap<Tier, usize>,
    pub by_pattern: BTreeMap<PatternType, usize>,
    /// Highest outlier score seen, 0 when empty
    pub max_outlier_score: f64,
}

impl ScanSummary {
    pub fn from_records(records: &[ExceedanceRecord]) -> Self {
        let mut summary = ScanSummary {
            total_exceedances: records.len(),
            ..Default::default()
        };
        let mut instruments = BTreeSet::new();

        for record in records {
            instruments.insert(record.instrument_id());
            if record.is_outlier() {
                summary.outliers += 1;
            }
            *summary.by_overall_tier.entry(record.overall_tier()).or_insert(0) += 1;
            *summary.by_pattern.entry(record.pattern_type).or_insert(0) += 1;
            summary.max_outlier_score = summary.max_outlier_score.max(record.outlier.outlier_score);
        }

        summary.instruments = instruments.len();
        summary
    }

    pub fn tier_count(&self, tier: Tier) -> usize {
        self.by_overall_tier.get(&tier).copied().unwrap_or(0)
    }

    pub fn pattern_count(&self, pattern: PatternType) -> usize {
        self.by_pattern.get(&pattern).copied().unwrap_or(0)
    }
}
