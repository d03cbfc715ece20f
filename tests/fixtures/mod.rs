use chrono::NaiveDate;
use exceedance_engine::TradingRecord;

/// Daily record with delivery as a fixed share of volume and a flat price.
pub fn create_daily_record(instrument: &str, date: NaiveDate, volume: u64, delivery: u64) -> TradingRecord {
    TradingRecord::new_from_values(
        instrument,
        date,
        volume,
        delivery,
        500.0,
        510.0,
        495.0,
        505.0,
        500.0,
        volume as f64 * 502.0,
        (volume / 100).max(1),
    )
}

/// One record per day for `volumes.len()` consecutive days starting at `start`.
pub fn create_month_series(instrument: &str, start: NaiveDate, volumes: &[u64], delivery_ratio: f64) -> Vec<TradingRecord> {
    volumes
        .iter()
        .enumerate()
        .map(|(offset, volume)| {
            let date = start + chrono::Duration::days(offset as i64);
            let delivery = (*volume as f64 * delivery_ratio) as u64;
            create_daily_record(instrument, date, *volume, delivery)
        })
        .collect()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
