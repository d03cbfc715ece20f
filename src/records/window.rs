use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};

/// Closed (inclusive) date range a baseline is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReferenceWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::Config(format!(
                "reference window end {} is before start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Whole calendar month, first to last day.
    pub fn month(year: i32, month: u32) -> EngineResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| EngineError::Config(format!("invalid month {}-{:02}", year, month)))?;
        let next_month_start = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(|| EngineError::Config(format!("invalid month {}-{:02}", year, month)))?;
        let end = next_month_start
            .pred_opt()
            .ok_or_else(|| EngineError::Config(format!("invalid month {}-{:02}", year, month)))?;
        Self::new(start, end)
    }

    /// Calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> EngineResult<Self> {
        Self::month(date.year(), date.month())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn calendar_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
