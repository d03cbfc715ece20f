use crate::errors::{EngineError, EngineResult};

use super::structs::TradingRecord;

impl TradingRecord {
    /// Fail fast on records the loader should have rejected.
    ///
    /// Zero volume or zero trade count is not an error here; such days are
    /// filtered by [`TradingRecord::is_qualifying_day`].
    pub fn validate(&self) -> EngineResult<()> {
        if self.instrument_id.trim().is_empty() {
            return Err(self.invalid("empty instrument id"));
        }

        if self.delivered_quantity > self.traded_volume {
            return Err(self.invalid(format!(
                "delivered quantity {} exceeds traded volume {}",
                self.delivered_quantity, self.traded_volume
            )));
        }

        for (name, value) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("previous_close", self.previous_close),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(self.invalid(format!("{} must be a positive number, got {}", name, value)));
            }
        }

        if self.high < self.low {
            return Err(self.invalid(format!("high {} below low {}", self.high, self.low)));
        }

        if !self.turnover.is_finite() || self.turnover < 0.0 {
            return Err(self.invalid(format!("turnover must be non-negative, got {}", self.turnover)));
        }

        Ok(())
    }

    fn invalid(&self, reason: impl Into<String>) -> EngineError {
        EngineError::invalid_record(&self.instrument_id, self.trade_date, reason)
    }
}
