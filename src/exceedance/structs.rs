use serde::{Deserialize, Serialize};
use std::fmt;

use crate::baseline::Baseline;
use crate::records::TradingRecord;

/// Severity bucket for how far a value sits above its baseline mean.
/// Ordered `None < Tier1Moderate < ... < Tier4Extreme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Tier {
    #[default]
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "TIER_1_MODERATE")]
    Tier1Moderate,
    #[serde(rename = "TIER_2_HIGH")]
    Tier2High,
    #[serde(rename = "TIER_3_EXCEPTIONAL")]
    Tier3Exceptional,
    #[serde(rename = "TIER_4_EXTREME")]
    Tier4Extreme,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::None => "NONE",
            Tier::Tier1Moderate => "TIER_1_MODERATE",
            Tier::Tier2High => "TIER_2_HIGH",
            Tier::Tier3Exceptional => "TIER_3_EXCEPTIONAL",
            Tier::Tier4Extreme => "TIER_4_EXTREME",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternType {
    StatisticalOutlier,
    Breakout,
    Spike,
    Momentum,
    Standard,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::StatisticalOutlier => "STATISTICAL_OUTLIER",
            PatternType::Breakout => "BREAKOUT",
            PatternType::Spike => "SPIKE",
            PatternType::Momentum => "MOMENTUM",
            PatternType::Standard => "STANDARD",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse price/volume agreement sign. Not a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceVolumeCorrelation {
    /// Price up on above-mean volume
    Positive,
    /// Price down on below-mean volume
    Negative,
    #[default]
    Neutral,
}

impl PriceVolumeCorrelation {
    pub fn signum(&self) -> i8 {
        match self {
            PriceVolumeCorrelation::Positive => 1,
            PriceVolumeCorrelation::Negative => -1,
            PriceVolumeCorrelation::Neutral => 0,
        }
    }
}

/// {volume, delivery} × {mean, max, p75, p95} exceedance flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExceedanceFlags {
    pub volume_exceeded_mean: bool,
    pub volume_exceeded_max: bool,
    pub volume_exceeded_p75: bool,
    pub volume_exceeded_p95: bool,
    pub delivery_exceeded_mean: bool,
    pub delivery_exceeded_max: bool,
    pub delivery_exceeded_p75: bool,
    pub delivery_exceeded_p95: bool,
}

impl ExceedanceFlags {
    /// Mean exceedance on either dimension admits a record.
    pub fn is_admitted(&self) -> bool {
        self.volume_exceeded_mean || self.delivery_exceeded_mean
    }

    pub fn both_exceed_p95(&self) -> bool {
        self.volume_exceeded_p95 && self.delivery_exceeded_p95
    }

    pub fn any_exceeds_max(&self) -> bool {
        self.volume_exceeded_max || self.delivery_exceeded_max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TierResult {
    pub volume_tier: Tier,
    pub delivery_tier: Tier,
    pub overall_tier: Tier,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OutlierResult {
    pub vol_stddev_score: f64,
    pub del_stddev_score: f64,
    pub is_outlier: bool,
    /// Largest absolute z-score, reported whether or not it is an outlier
    pub outlier_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IncreaseMetrics {
    pub volume_increase: f64,
    pub volume_increase_pct: f64,
    pub delivery_increase: f64,
    pub delivery_increase_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AdvancedMetrics {
    pub price_change_pct: f64,
    pub price_volatility_pct: f64,
    pub avg_trade_size: f64,
    pub baseline_avg_trade_size: f64,
    pub trade_size_change_pct: f64,
    pub volume_delivery_ratio: f64,
    pub baseline_volume_delivery_ratio: f64,
    pub ratio_change_pct: f64,
    pub delivery_pct: f64,
    pub baseline_delivery_pct: f64,
    pub price_volume_correlation: PriceVolumeCorrelation,
}

/// One admitted (instrument, trade date) exceedance. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceedanceRecord {
    pub record: TradingRecord,
    pub baseline: Baseline,
    #[serde(flatten)]
    pub flags: ExceedanceFlags,
    #[serde(flatten)]
    pub tiers: TierResult,
    #[serde(flatten)]
    pub increase: IncreaseMetrics,
    #[serde(flatten)]
    pub outlier: OutlierResult,
    #[serde(flatten)]
    pub advanced: AdvancedMetrics,
    pub pattern_type: PatternType,
    pub momentum_score: f64,
    pub data_quality_score: f64,
}

impl ExceedanceRecord {
    pub fn instrument_id(&self) -> &str {
        &self.record.instrument_id
    }

    pub fn overall_tier(&self) -> Tier {
        self.tiers.overall_tier
    }

    pub fn is_outlier(&self) -> bool {
        self.outlier.is_outlier
    }
}
