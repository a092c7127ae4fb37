// ============================================================
// Layer 3 — Model Bundle
// ============================================================
// The serialized package the trainer writes and the server
// loads: fitted pipeline parameters, the ordered feature-name
// list, the target name, and the validation metrics.
//
// The pipeline is carried as plain extracted parameters
// (means/stds + intercept/coefficients), not as a framework
// object. Prediction is then just arithmetic, so the server
// never touches linfa at all — all fitting code stays in the
// ml layer.
//
// The bundle is written once by `train` and is read-only for
// the server's whole process lifetime.
//
// Reference: Rust Book §5 (Structs)
//            serde documentation (derive)

use serde::{Deserialize, Serialize};

// ─── Standard Scaler ──────────────────────────────────────────────────────────

/// Per-column standardization parameters, fitted on the training
/// split only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Mean of each feature column
    pub means: Vec<f64>,
    /// Standard deviation of each feature column.
    /// A zero-variance column stores 1.0 so scaling never divides
    /// by zero.
    pub stds: Vec<f64>,
}

impl StandardScaler {
    /// Scale one row of raw feature values: (x - mean) / std.
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(self.stds.iter()))
            .map(|(x, (m, s))| (x - m) / s)
            .collect()
    }
}

// ─── Linear Model ─────────────────────────────────────────────────────────────

/// Ordinary-least-squares parameters extracted from the fitted
/// regressor: prediction is intercept + w · x.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept:    f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    /// Predict from an already-scaled feature row.
    pub fn predict_scaled(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row.iter())
                .map(|(w, x)| w * x)
                .sum::<f64>()
    }
}

// ─── Regression Pipeline ──────────────────────────────────────────────────────

/// Scale-then-regress, the fitted counterpart of the training
/// pipeline. One call takes a raw feature row to a prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionPipeline {
    pub scaler: StandardScaler,
    pub model:  LinearModel,
}

impl RegressionPipeline {
    pub fn predict(&self, row: &[f64]) -> f64 {
        self.model.predict_scaled(&self.scaler.transform_row(row))
    }

    /// Number of features the pipeline was fitted on.
    pub fn input_dim(&self) -> usize {
        self.model.coefficients.len()
    }
}

// ─── Validation Metrics ───────────────────────────────────────────────────────

/// Metrics recorded at training time and displayed on the
/// results page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationMetrics {
    /// R² on the held-out test split
    pub r2_holdout: f64,
    /// Mean of the k-fold cross-validated R² scores
    pub cv_r2_mean: f64,
    /// Standard deviation of the k-fold R² scores
    pub cv_r2_std: f64,
    /// Rows in the training / held-out splits
    pub n_train: usize,
    pub n_test:  usize,
    /// Number of cross-validation folds
    pub folds: usize,
}

// ─── Model Bundle ─────────────────────────────────────────────────────────────

/// Everything the server needs, in one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelBundle {
    /// Input column names in the exact order the pipeline expects
    pub feature_names: Vec<String>,
    /// Name of the predicted column
    pub target: String,
    pub pipeline: RegressionPipeline,
    /// Absent when the training run skipped validation
    pub metrics: Option<ValidationMetrics>,
}

impl ModelBundle {
    /// Sanity check after deserialization: the feature list and the
    /// fitted parameter vectors must agree on the input dimension.
    pub fn is_consistent(&self) -> bool {
        let dim = self.feature_names.len();
        self.pipeline.input_dim() == dim
            && self.pipeline.scaler.means.len() == dim
            && self.pipeline.scaler.stds.len() == dim
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn identity_pipeline() -> RegressionPipeline {
        RegressionPipeline {
            scaler: StandardScaler { means: vec![0.0, 0.0], stds: vec![1.0, 1.0] },
            model:  LinearModel { intercept: 1.0, coefficients: vec![2.0, 3.0] },
        }
    }

    #[test]
    fn test_predict_is_intercept_plus_dot() {
        let p = identity_pipeline();
        // 1 + 2*10 + 3*(-1) = 18
        assert_eq!(p.predict(&[10.0, -1.0]), 18.0);
    }

    #[test]
    fn test_scaling_applied_before_regression() {
        let p = RegressionPipeline {
            scaler: StandardScaler { means: vec![5.0], stds: vec![2.0] },
            model:  LinearModel { intercept: 0.0, coefficients: vec![1.0] },
        };
        // (9 - 5) / 2 = 2
        assert_eq!(p.predict(&[9.0]), 2.0);
    }

    #[test]
    fn test_bundle_consistency() {
        let bundle = ModelBundle {
            feature_names: vec!["a".into(), "b".into()],
            target:        "y".into(),
            pipeline:      identity_pipeline(),
            metrics:       None,
        };
        assert!(bundle.is_consistent());

        let short = ModelBundle { feature_names: vec!["a".into()], ..bundle };
        assert!(!short.is_consistent());
    }
}
