use crate::common::constants::{MOMENTUM_SCORE_DIVISOR, MOMENTUM_SCORE_MAX};

use super::structs::{ExceedanceFlags, OutlierResult, PatternType, Tier, TierResult};

/// First matching rule wins:
/// outlier, then p95 breakout on both dimensions, then a new max on either
/// dimension, then a TIER_2/TIER_3 overall tier, else standard.
pub fn recognize_pattern(flags: &ExceedanceFlags, tiers: &TierResult, outlier: &OutlierResult) -> PatternType {
    if outlier.is_outlier {
        PatternType::StatisticalOutlier
    } else if flags.both_exceed_p95() {
        PatternType::Breakout
    } else if flags.any_exceeds_max() {
        PatternType::Spike
    } else if matches!(tiers.overall_tier, Tier::Tier2High | Tier::Tier3Exceptional) {
        PatternType::Momentum
    } else {
        PatternType::Standard
    }
}

/// Combined increase over baseline, scaled and clamped to [0, 100].
pub fn momentum_score(volume_increase_pct: f64, delivery_increase_pct: f64) -> f64 {
    let raw = (volume_increase_pct + delivery_increase_pct) / MOMENTUM_SCORE_DIVISOR;
    if !raw.is_finite() {
        return 0.0;
    }
    raw.clamp(0.0, MOMENTUM_SCORE_MAX)
}
