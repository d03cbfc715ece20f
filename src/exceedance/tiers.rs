use crate::baseline::Baseline;
use crate::common::numeric::safe_div;
use crate::config::TierThresholds;

use super::structs::{Tier, TierResult};

const TIERS_DESCENDING: [Tier; 4] = [
    Tier::Tier4Extreme,
    Tier::Tier3Exceptional,
    Tier::Tier2High,
    Tier::Tier1Moderate,
];

/// Highest tier whose ratio threshold `current / mean` meets. A zero mean has
/// no defined ratio and always yields [`Tier::None`].
pub fn classify_tier(current: f64, mean: f64, thresholds: &TierThresholds) -> Tier {
    if mean <= 0.0 {
        return Tier::None;
    }
    let ratio = safe_div(current, mean);

    TIERS_DESCENDING
        .iter()
        .zip(thresholds.descending())
        .find(|(_, threshold)| ratio >= *threshold)
        .map(|(tier, _)| *tier)
        .unwrap_or(Tier::None)
}

pub fn classify_tiers(volume: f64, delivery: f64, baseline: &Baseline, thresholds: &TierThresholds) -> TierResult {
    let volume_tier = classify_tier(volume, baseline.mean_volume, thresholds);
    let delivery_tier = classify_tier(delivery, baseline.mean_delivery, thresholds);

    TierResult {
        volume_tier,
        delivery_tier,
        overall_tier: volume_tier.max(delivery_tier),
    }
}
