//! Baseline exceedance classification for daily equity trading records.
//!
//! A reference period's records become per-instrument [`Baseline`]s
//! ([`compute_baselines`]); current-period records are then scanned against
//! them ([`find_exceedances`]) and every record that beats its baseline mean
//! on volume or delivery comes back as a classified [`ExceedanceRecord`].
//!
//! The engine does no I/O. Loading records and persisting results belong to
//! the caller.

pub mod baseline;
pub mod common;
pub mod config;
pub mod errors;
pub mod exceedance;
pub mod logging;
pub mod records;

pub use baseline::{compute_baselines, compute_baselines_in_window, Baseline, BaselineMap};
pub use config::{EngineConfig, PercentileMode, TierThresholds};
pub use errors::{EngineError, EngineResult};
pub use exceedance::{
    find_exceedances, ExceedanceRecord, ExceedanceScanner, PatternType, ScanSummary, Tier,
};
pub use records::{InstrumentId, ReferenceWindow, TradingRecord};
