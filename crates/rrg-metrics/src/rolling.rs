//! Trailing-window statistics.

/// Arithmetic mean. Returns `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator). Needs at least two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let var = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

/// Z-score of each value against the `window` values preceding it.
///
/// Output index `i` corresponds to input index `i + window`, so the result
/// has `values.len() - window` entries. A window without spread yields 0.
pub fn prior_window_zscores(values: &[f64], window: usize) -> Vec<f64> {
    if window < 2 || values.len() <= window {
        return Vec::new();
    }

    (window..values.len())
        .map(|t| {
            let prior = &values[t - window..t];
            match (mean(prior), sample_std(prior)) {
                (Some(avg), Some(std)) if std > 0.0 && std.is_finite() => {
                    let z = (values[t] - avg) / std;
                    if z.is_finite() { z } else { 0.0 }
                }
                _ => 0.0,
            }
        })
        .collect()
}
