//! Metric formulas shared by per-session and pooled computation

/// Fraction of actual positives predicted positive.
///
/// With no positive samples there is nothing to miss, so recall is `1.0`.
pub fn recall(true_positive: u64, positive_sample: u64) -> f64 {
    if positive_sample == 0 {
        1.0
    } else {
        true_positive as f64 / positive_sample as f64
    }
}

/// Fraction of positive predictions that are actually positive.
///
/// With no positive predictions nothing was wrongly flagged, so precision is `1.0`.
pub fn precision(true_positive: u64, predict_positive: u64) -> f64 {
    if predict_positive == 0 {
        1.0
    } else {
        true_positive as f64 / predict_positive as f64
    }
}

/// Harmonic mean of precision and recall, `0.0` when both are zero.
pub fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * (precision * recall) / (precision + recall)
    }
}

/// Fraction of correct predictions, `None` for an empty sample set.
pub fn accuracy(correct_prediction: u64, num_sample: u64) -> Option<f64> {
    if num_sample == 0 {
        None
    } else {
        Some(correct_prediction as f64 / num_sample as f64)
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
