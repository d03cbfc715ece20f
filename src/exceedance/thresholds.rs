use crate::baseline::Baseline;
use crate::records::TradingRecord;

use super::structs::ExceedanceFlags;

/// Mean exceedance on volume or delivery. Records failing this are never emitted.
pub fn passes_admission_gate(record: &TradingRecord, baseline: &Baseline) -> bool {
    record.volume() > baseline.mean_volume || record.delivery() > baseline.mean_delivery
}

/// Evaluate all eight threshold flags for an admitted record.
///
/// Returns `None` when the admission gate fails; the max/p75/p95 refinements
/// are only computed for admitted records.
pub fn evaluate_thresholds(record: &TradingRecord, baseline: &Baseline) -> Option<ExceedanceFlags> {
    if !passes_admission_gate(record, baseline) {
        return None;
    }

    let volume = record.volume();
    let delivery = record.delivery();

    Some(ExceedanceFlags {
        volume_exceeded_mean: volume > baseline.mean_volume,
        volume_exceeded_max: record.traded_volume > baseline.max_volume,
        volume_exceeded_p75: volume > baseline.p75_volume,
        volume_exceeded_p95: volume > baseline.p95_volume,
        delivery_exceeded_mean: delivery > baseline.mean_delivery,
        delivery_exceeded_max: record.delivered_quantity > baseline.max_delivery,
        delivery_exceeded_p75: delivery > baseline.p75_delivery,
        delivery_exceeded_p95: delivery > baseline.p95_delivery,
    })
}
