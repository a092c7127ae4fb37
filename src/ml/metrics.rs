// ============================================================
// Layer 5 — Regression Metrics
// ============================================================
// R² (coefficient of determination):
//
//   R² = 1 - SS_res / SS_tot
//
//   SS_res = Σ (y_i - ŷ_i)²     residual sum of squares
//   SS_tot = Σ (y_i - ȳ)²       total sum of squares
//
// R² = 1 means perfect prediction; 0 means no better than
// always predicting the mean; negative means worse than that.
//
// Reference: Rust Book §13 (Iterators)

use ndarray::Array1;

/// R² of `predicted` against `actual`.
///
/// A constant target (SS_tot = 0) has no variance to explain;
/// returns 0.0 rather than dividing by zero.
pub fn r2_score(actual: &Array1<f64>, predicted: &Array1<f64>) -> f64 {
    assert_eq!(actual.len(), predicted.len(), "length mismatch in r2_score");
    if actual.is_empty() {
        return 0.0;
    }

    let mean = actual.sum() / actual.len() as f64;

    let ss_res: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(y, y_hat)| (y - y_hat).powi(2))
        .sum();
    let ss_tot: f64 = actual.iter().map(|y| (y - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return 0.0;
    }
    1.0 - ss_res / ss_tot
}

/// Mean and (population) standard deviation of a score list —
/// used to summarize the per-fold cross-validation R² values.
pub fn mean_std(scores: &[f64]) -> (f64, f64) {
    if scores.is_empty() {
        return (0.0, 0.0);
    }
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let var = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_perfect_prediction_is_one() {
        let y = array![1.0, 2.0, 3.0];
        assert_eq!(r2_score(&y, &y.clone()), 1.0);
    }

    #[test]
    fn test_mean_prediction_is_zero() {
        let y = array![1.0, 2.0, 3.0];
        let mean = array![2.0, 2.0, 2.0];
        assert!(r2_score(&y, &mean).abs() < 1e-12);
    }

    #[test]
    fn test_constant_target_returns_zero() {
        let y = array![5.0, 5.0, 5.0];
        let pred = array![4.0, 5.0, 6.0];
        assert_eq!(r2_score(&y, &pred), 0.0);
    }

    #[test]
    fn test_mean_std() {
        let (mean, std) = mean_std(&[1.0, 3.0]);
        assert_eq!(mean, 2.0);
        assert_eq!(std, 1.0);
    }
}
