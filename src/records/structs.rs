use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Symbol + series key, e.g. `RELIANCE-EQ`.
pub type InstrumentId = String;

/// One instrument's trading activity for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingRecord {
    pub instrument_id: InstrumentId,
    pub trade_date: NaiveDate,
    pub traded_volume: u64,
    pub delivered_quantity: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub previous_close: f64,
    pub turnover: f64,
    pub trade_count: u64,
}

impl TradingRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new_from_values(
        instrument_id: impl Into<InstrumentId>,
        trade_date: NaiveDate,
        traded_volume: u64,
        delivered_quantity: u64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        previous_close: f64,
        turnover: f64,
        trade_count: u64,
    ) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            trade_date,
            traded_volume,
            delivered_quantity,
            open,
            high,
            low,
            close,
            previous_close,
            turnover,
            trade_count,
        }
    }

    pub fn volume(&self) -> f64 {
        self.traded_volume as f64
    }

    pub fn delivery(&self) -> f64 {
        self.delivered_quantity as f64
    }

    /// Days with no volume or no trades are data-quality gaps, not business days.
    pub fn is_qualifying_day(&self) -> bool {
        self.traded_volume > 0 && self.trade_count > 0
    }
}
