use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid record {instrument_id} on {trade_date}: {reason}")]
    InvalidRecord {
        instrument_id: String,
        trade_date: NaiveDate,
        reason: String,
    },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn invalid_record(instrument_id: &str, trade_date: NaiveDate, reason: impl Into<String>) -> Self {
        EngineError::InvalidRecord {
            instrument_id: instrument_id.to_string(),
            trade_date,
            reason: reason.into(),
        }
    }

    /// True when the error came from a malformed input record rather than configuration.
    pub fn is_invalid_record(&self) -> bool {
        matches!(self, EngineError::InvalidRecord { .. })
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
