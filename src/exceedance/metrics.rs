use crate::baseline::Baseline;
use crate::common::numeric::{percentage_change, percentage_of, safe_div};
use crate::records::TradingRecord;

use super::structs::{AdvancedMetrics, IncreaseMetrics, PriceVolumeCorrelation};

impl IncreaseMetrics {
    /// Absolute and percentage increase over the baseline mean per dimension.
    pub fn calculate(record: &TradingRecord, baseline: &Baseline) -> Self {
        let volume = record.volume();
        let delivery = record.delivery();

        Self {
            volume_increase: volume - baseline.mean_volume,
            volume_increase_pct: percentage_change(volume, baseline.mean_volume),
            delivery_increase: delivery - baseline.mean_delivery,
            delivery_increase_pct: percentage_change(delivery, baseline.mean_delivery),
        }
    }
}

impl AdvancedMetrics {
    pub fn calculate(record: &TradingRecord, baseline: &Baseline) -> Self {
        let volume = record.volume();
        let delivery = record.delivery();

        let price_change_pct = percentage_change(record.close, record.previous_close);
        let price_volatility_pct = percentage_of(record.high - record.low, record.low);

        let avg_trade_size = safe_div(record.turnover, record.trade_count as f64);
        let baseline_avg_trade_size = safe_div(baseline.mean_turnover, baseline.mean_trade_count);

        let volume_delivery_ratio = safe_div(volume, delivery);
        let baseline_volume_delivery_ratio = safe_div(baseline.mean_volume, baseline.mean_delivery);

        Self {
            price_change_pct,
            price_volatility_pct,
            avg_trade_size,
            baseline_avg_trade_size,
            trade_size_change_pct: percentage_change(avg_trade_size, baseline_avg_trade_size),
            volume_delivery_ratio,
            baseline_volume_delivery_ratio,
            ratio_change_pct: percentage_change(volume_delivery_ratio, baseline_volume_delivery_ratio),
            delivery_pct: percentage_of(delivery, volume),
            baseline_delivery_pct: percentage_of(baseline.mean_delivery, baseline.mean_volume),
            price_volume_correlation: price_volume_correlation(price_change_pct, volume, baseline.mean_volume),
        }
    }
}

/// +1 price up on above-mean volume, -1 price down on below-mean volume, else 0.
pub fn price_volume_correlation(price_change_pct: f64, volume: f64, mean_volume: f64) -> PriceVolumeCorrelation {
    if price_change_pct > 0.0 && volume > mean_volume {
        PriceVolumeCorrelation::Positive
    } else if price_change_pct < 0.0 && volume < mean_volume {
        PriceVolumeCorrelation::Negative
    } else {
        PriceVolumeCorrelation::Neutral
    }
}
