use crate::baseline::Baseline;

use super::structs::OutlierResult;

/// `(current - mean) / stddev`, 0 when the baseline has no spread.
pub fn stddev_score(current: f64, mean: f64, stddev: f64) -> f64 {
    if stddev <= 0.0 || !stddev.is_finite() {
        return 0.0;
    }
    (current - mean) / stddev
}

/// Flag the record when either dimension's |z| exceeds `outlier_threshold`.
pub fn detect_outlier(volume: f64, delivery: f64, baseline: &Baseline, outlier_threshold: f64) -> OutlierResult {
    let vol_stddev_score = stddev_score(volume, baseline.mean_volume, baseline.stddev_volume);
    let del_stddev_score = stddev_score(delivery, baseline.mean_delivery, baseline.stddev_delivery);
    let outlier_score = vol_stddev_score.abs().max(del_stddev_score.abs());

    OutlierResult {
        vol_stddev_score,
        del_stddev_score,
        is_outlier: outlier_score > outlier_threshold,
        outlier_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exceedance::tests::create_baseline;

    #[test]
    fn test_zero_stddev_scores_zero() {
        assert_eq!(stddev_score(500.0, 100.0, 0.0), 0.0);

        let baseline = create_baseline(100_000.0, 0.0, 100_000, 50_000.0, 0.0, 50_000);
        let result = detect_outlier(1_000_000.0, 500_000.0, &baseline, 3.0);
        assert_eq!(result.vol_stddev_score, 0.0);
        assert_eq!(result.del_stddev_score, 0.0);
        assert!(!result.is_outlier);
    }

    #[test]
    fn test_volume_outlier() {
        let baseline = create_baseline(100_000.0, 20_000.0, 150_000, 50_000.0, 10_000.0, 70_000);
        let result = detect_outlier(260_000.0, 50_000.0, &baseline, 3.0);

        assert_eq!(result.vol_stddev_score, 8.0);
        assert_eq!(result.del_stddev_score, 0.0);
        assert!(result.is_outlier);
        assert_eq!(result.outlier_score, 8.0);
    }

    #[test]
    fn test_score_reported_when_not_outlier() {
        let baseline = create_baseline(100_000.0, 20_000.0, 150_000, 50_000.0, 10_000.0, 70_000);
        let result = detect_outlier(140_000.0, 75_000.0, &baseline, 3.0);

        assert_eq!(result.vol_stddev_score, 2.0);
        assert_eq!(result.del_stddev_score, 2.5);
        assert!(!result.is_outlier);
        assert_eq!(result.outlier_score, 2.5);
    }

    #[test]
    fn test_threshold_is_strict() {
        let baseline = create_baseline(100_000.0, 20_000.0, 150_000, 50_000.0, 10_000.0, 70_000);
        let result = detect_outlier(160_000.0, 50_000.0, &baseline, 3.0);
        assert_eq!(result.outlier_score, 3.0);
        assert!(!result.is_outlier);
    }

    #[test]
    fn test_negative_deviation_counts() {
        let baseline = create_baseline(100_000.0, 20_000.0, 150_000, 50_000.0, 10_000.0, 70_000);
        let result = detect_outlier(110_000.0, 5_000.0, &baseline, 3.0);
        assert_eq!(result.del_stddev_score, -4.5);
        assert!(result.is_outlier);
        assert_eq!(result.outlier_score, 4.5);
    }
}
