/// Record Model
///
/// Canonical one-instrument, one-day trading record consumed by the engine,
/// plus the closed reference window used to select baseline days.
pub mod structs;
pub mod validation;
pub mod window;

pub use structs::{InstrumentId, TradingRecord};
pub use window::ReferenceWindow;
