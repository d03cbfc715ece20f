use std::borrow::Borrow;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::baseline::BaselineMap;
use crate::config::EngineConfig;
use crate::errors::EngineResult;
use crate::records::TradingRecord;

use super::builder::ExceedanceRecordBuilder;
use super::structs::ExceedanceRecord;

/// Classifies current-period records against a fixed baseline map.
#[derive(Debug, Clone, Copy)]
pub struct ExceedanceScanner<'a> {
    baselines: &'a BaselineMap,
    config: &'a EngineConfig,
}

impl<'a> ExceedanceScanner<'a> {
    pub fn new(baselines: &'a BaselineMap, config: &'a EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { baselines, config })
    }

    /// Classify a single record. `Ok(None)` when there is no baseline to compare
    /// against, the day does not qualify, or no mean threshold is exceeded.
    pub fn scan_record(&self, record: &TradingRecord) -> EngineResult<Option<ExceedanceRecord>> {
        record.validate()?;
        Ok(self.classify(record))
    }

    fn classify(&self, record: &TradingRecord) -> Option<ExceedanceRecord> {
        if !record.is_qualifying_day() {
            return None;
        }
        let baseline = self.baselines.get(&record.instrument_id)?;
        ExceedanceRecordBuilder::new(self.config).build(record, baseline)
    }

    /// Classify a batch, one independent unit of work per instrument.
    ///
    /// Every record is validated before any classification starts. Output is
    /// sorted by trade date, then instrument id.
    pub fn scan<I, R>(&self, current_records: I) -> EngineResult<Vec<ExceedanceRecord>>
    where
        I: IntoIterator<Item = R>,
        R: Borrow<TradingRecord>,
    {
        let records: Vec<R> = current_records.into_iter().collect();

        let mut by_instrument: FxHashMap<&str, Vec<&TradingRecord>> = FxHashMap::default();
        let mut without_baseline = 0usize;
        for record in &records {
            let record: &TradingRecord = record.borrow();
            record.validate()?;
            if !self.baselines.contains_key(&record.instrument_id) {
                without_baseline += 1;
                continue;
            }
            by_instrument
                .entry(record.instrument_id.as_str())
                .or_default()
                .push(record);
        }

        let classify_group = |group: &Vec<&TradingRecord>| -> Vec<ExceedanceRecord> {
            group.iter().filter_map(|record| self.classify(record)).collect()
        };

        let mut exceedances: Vec<ExceedanceRecord> = if self.config.parallel {
            by_instrument
                .par_iter()
                .flat_map_iter(|(_, group)| classify_group(group))
                .collect()
        } else {
            by_instrument
                .iter()
                .flat_map(|(_, group)| classify_group(group))
                .collect()
        };

        sort_exceedances(&mut exceedances);

        debug!(without_baseline, "Skipped records with no baseline");
        info!(
            records = records.len(),
            instruments = by_instrument.len(),
            exceedances = exceedances.len(),
            outliers = exceedances.iter().filter(|e| e.is_outlier()).count(),
            "Exceedance scan complete"
        );

        Ok(exceedances)
    }
}

/// Stable order for downstream consumers: trade date, then instrument id.
pub fn sort_exceedances(exceedances: &mut [ExceedanceRecord]) {
    exceedances.sort_by(|a, b| {
        a.record
            .trade_date
            .cmp(&b.record.trade_date)
            .then_with(|| a.record.instrument_id.cmp(&b.record.instrument_id))
    });
}

/// Scan current-period records against `baselines`.
///
/// Records for instruments without a baseline are skipped. A malformed record
/// aborts the scan with [`crate::errors::EngineError::InvalidRecord`].
pub fn find_exceedances<I, R>(
    current_records: I,
    baselines: &BaselineMap,
    config: &EngineConfig,
) -> EngineResult<Vec<ExceedanceRecord>>
where
    I: IntoIterator<Item = R>,
    R: Borrow<TradingRecord>,
{
    ExceedanceScanner::new(baselines, config)?.scan(current_records)
}
