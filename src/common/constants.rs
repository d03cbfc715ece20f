/// Engine defaults
// Baseline coverage
pub const DEFAULT_MINIMUM_TRADING_DAYS: usize = 5;
pub const DEFAULT_FULL_COVERAGE_DAYS: usize = 20; // ~one trading month
pub const QUALITY_SCORE_MAX: f64 = 100.0;
pub const QUALITY_STATISTICAL_BONUS: f64 = 10.0;

// Outlier detection (standard deviations)
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 3.0;

// Tier ratio thresholds against baseline mean
pub const DEFAULT_TIER_1_RATIO: f64 = 1.25;
pub const DEFAULT_TIER_2_RATIO: f64 = 1.50;
pub const DEFAULT_TIER_3_RATIO: f64 = 2.00;
pub const DEFAULT_TIER_4_RATIO: f64 = 3.00;

// Normal-distribution z multipliers used for approximate percentiles
pub const MEDIAN_Z: f64 = 0.67;
pub const P75_Z: f64 = 1.00;
pub const P95_Z: f64 = 1.64;

// Momentum score
pub const MOMENTUM_SCORE_DIVISOR: f64 = 4.0;
pub const MOMENTUM_SCORE_MAX: f64 = 100.0;

pub const PERCENT: f64 = 100.0;
