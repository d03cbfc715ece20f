/// Exceedance Module
///
/// Scans current-period records against their instrument baselines and
/// classifies every admitted exceedance by tier, outlier status, and pattern.
pub mod builder;
pub mod engine;
pub mod metrics;
pub mod outliers;
pub mod patterns;
pub mod structs;
pub mod summary;
pub mod thresholds;
pub mod tiers;

#[cfg(test)]
mod tests;

pub use builder::ExceedanceRecordBuilder;
pub use engine::{find_exceedances, sort_exceedances, ExceedanceScanner};
pub use structs::{
    AdvancedMetrics, ExceedanceFlags, ExceedanceRecord, IncreaseMetrics, OutlierResult,
    PatternType, PriceVolumeCorrelation, Tier, TierResult,
};
pub use summary::ScanSummary;
