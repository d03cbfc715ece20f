/// Baseline Module
///
/// Aggregates a reference period's daily records into one statistical
/// baseline per instrument. Instruments without enough qualifying days
/// are left out of the resulting map.
pub mod calculator;
pub mod structs;

pub use calculator::{compute_baselines, compute_baselines_in_window, BaselineCalculator};
pub use structs::{Baseline, BaselineMap};
