use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::PercentileMode;
use crate::records::InstrumentId;

/// Instrument → baseline for one reference window.
pub type BaselineMap = FxHashMap<InstrumentId, Baseline>;

/// Statistical summary of one instrument over a closed reference window.
/// Immutable once built; recompute when the window changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub instrument_id: InstrumentId,
    /// First and last qualifying trade date in the window
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub trading_days: usize,
    pub mean_volume: f64,
    pub mean_delivery: f64,
    pub stddev_volume: f64,
    pub stddev_delivery: f64,
    pub min_volume: u64,
    pub max_volume: u64,
    pub min_delivery: u64,
    pub max_delivery: u64,
    pub median_volume: f64,
    pub median_delivery: f64,
    pub p75_volume: f64,
    pub p75_delivery: f64,
    pub p95_volume: f64,
    pub p95_delivery: f64,
    /// Mean closing price
    pub mean_price: f64,
    pub mean_turnover: f64,
    pub mean_trade_count: f64,
    /// 0-100 confidence in the baseline
    pub quality_score: f64,
    pub percentile_mode: PercentileMode,
}
