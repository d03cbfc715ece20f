//! Engine configuration
//!
//! Every threshold the classifier uses lives in an immutable [`EngineConfig`]
//! value handed to each operation. Configs load from TOML with per-field
//! defaults, either as a whole document or under an `[engine]` table.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::common::constants::*;
use crate::errors::{EngineError, EngineResult};

/// How baseline percentiles (median, p75, p95) are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentileMode {
    /// mean + z·σ assuming a normal distribution; needs no retained sample
    #[default]
    NormalApproximation,
    /// Order statistics over the retained reference sample
    Empirical,
}

/// Ratio-to-mean thresholds for each severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    #[serde(default = "default_tier_1")]
    pub tier_1: f64,
    #[serde(default = "default_tier_2")]
    pub tier_2: f64,
    #[serde(default = "default_tier_3")]
    pub tier_3: f64,
    #[serde(default = "default_tier_4")]
    pub tier_4: f64,
}

fn default_tier_1() -> f64 { DEFAULT_TIER_1_RATIO }
fn default_tier_2() -> f64 { DEFAULT_TIER_2_RATIO }
fn default_tier_3() -> f64 { DEFAULT_TIER_3_RATIO }
fn default_tier_4() -> f64 { DEFAULT_TIER_4_RATIO }

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            tier_1: DEFAULT_TIER_1_RATIO,
            tier_2: DEFAULT_TIER_2_RATIO,
            tier_3: DEFAULT_TIER_3_RATIO,
            tier_4: DEFAULT_TIER_4_RATIO,
        }
    }
}

impl TierThresholds {
    /// Thresholds from most to least severe.
    pub fn descending(&self) -> [f64; 4] {
        [self.tier_4, self.tier_3, self.tier_2, self.tier_1]
    }

    pub fn validate(&self) -> EngineResult<()> {
        let ascending = [self.tier_1, self.tier_2, self.tier_3, self.tier_4];
        if ascending.iter().any(|t| !t.is_finite() || *t <= 0.0) {
            return Err(EngineError::Config(format!(
                "tier thresholds must be positive, got {:?}",
                ascending
            )));
        }
        if ascending.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(EngineError::Config(format!(
                "tier thresholds must be strictly increasing, got {:?}",
                ascending
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Instruments with fewer qualifying reference days get no baseline
    #[serde(default = "default_minimum_trading_days")]
    pub minimum_trading_days: usize,
    /// Standard deviations beyond which a record is an outlier
    #[serde(default = "default_outlier_threshold")]
    pub outlier_threshold: f64,
    #[serde(default)]
    pub tier_thresholds: TierThresholds,
    #[serde(default)]
    pub percentile_mode: PercentileMode,
    /// Classify instruments on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Trading days at which coverage alone earns a full quality score
    #[serde(default = "default_full_coverage_days")]
    pub full_coverage_days: usize,
}

fn default_minimum_trading_days() -> usize { DEFAULT_MINIMUM_TRADING_DAYS }
fn default_outlier_threshold() -> f64 { DEFAULT_OUTLIER_THRESHOLD }
fn default_parallel() -> bool { true }
fn default_full_coverage_days() -> usize { DEFAULT_FULL_COVERAGE_DAYS }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            minimum_trading_days: DEFAULT_MINIMUM_TRADING_DAYS,
            outlier_threshold: DEFAULT_OUTLIER_THRESHOLD,
            tier_thresholds: TierThresholds::default(),
            percentile_mode: PercentileMode::default(),
            parallel: true,
            full_coverage_days: DEFAULT_FULL_COVERAGE_DAYS,
        }
    }
}

/// Document shape with the engine settings nested under `[engine]`.
#[derive(Debug, Deserialize)]
struct TomlConfig {
    engine: Option<EngineConfig>,
}

impl EngineConfig {
    /// Load and validate configuration from a TOML file
    pub fn from_toml<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        info!(
            path = %path.as_ref().display(),
            minimum_trading_days = config.minimum_trading_days,
            outlier_threshold = config.outlier_threshold,
            percentile_mode = ?config.percentile_mode,
            "Loaded engine configuration"
        );
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        let wrapped: TomlConfig = toml::from_str(content)?;
        let config = match wrapped.engine {
            Some(engine) => engine,
            None => toml::from_str::<EngineConfig>(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.minimum_trading_days == 0 {
            return Err(EngineError::Config("minimum_trading_days must be at least 1".to_string()));
        }
        if self.full_coverage_days == 0 {
            return Err(EngineError::Config("full_coverage_days must be at least 1".to_string()));
        }
        if !self.outlier_threshold.is_finite() || self.outlier_threshold <= 0.0 {
            return Err(EngineError::Config(format!(
                "outlier_threshold must be positive, got {}",
                self.outlier_threshold
            )));
        }
        self.tier_thresholds.validate()
    }

    pub fn with_minimum_trading_days(mut self, days: usize) -> Self {
        self.minimum_trading_days = days;
        self
    }

    pub fn with_outlier_threshold(mut self, threshold: f64) -> Self {
        self.outlier_threshold = threshold;
        self
    }

    pub fn with_percentile_mode(mut self, mode: PercentileMode) -> Self {
        self.percentile_mode = mode;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
