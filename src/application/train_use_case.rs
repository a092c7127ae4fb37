// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the CSV                 (Layer 4 - data)
//   Step 2: Check columns + encode       (Layer 4 - data)
//   Step 3: Split train/held-out         (Layer 4 - data)
//   Step 4: Fit scale+OLS pipeline       (Layer 5 - ml)
//   Step 5: Held-out R²                  (Layer 5 - ml)
//   Step 6: k-fold cross-validated R²    (Layer 5 - ml)
//   Step 7: Persist the bundle           (Layer 6 - infra)
//
// Any failure here aborts the run with a non-zero exit before
// a bundle is written — a missing column or an unencodable
// training value is a data problem to fix, not to serve.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{bail, Result};
use ndarray::Axis;
use serde::{Deserialize, Serialize};

use crate::data::{encoder::encode_table, loader::CsvLoader, splitter::split_indices};
use crate::domain::bundle::{ModelBundle, ValidationMetrics};
use crate::domain::schema::FeatureSchema;
use crate::domain::traits::RowSource;
use crate::infra::bundle_store::BundleStore;
use crate::ml::trainer::{cross_validate, evaluate_r2, fit_pipeline};

// ─── Training Configuration ──────────────────────────────────────────────────
// All knobs for a training run. Serializable so a run can be
// reproduced from a recorded config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub csv_path:      String,
    pub bundle_path:   String,
    pub test_fraction: f64,
    pub seed:          u64,
    pub folds:         usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            csv_path:      "data/tips.csv".to_string(),
            bundle_path:   "models/bundle.json".to_string(),
            test_fraction: 0.2,
            seed:          42,
            folds:         5,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
    schema: FeatureSchema,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config, schema: FeatureSchema::tips() }
    }

    /// Execute the full training pipeline end to end.
    /// Returns the metrics so the CLI can print a summary.
    pub fn execute(&self) -> Result<ValidationMetrics> {
        let cfg = &self.config;

        if !(0.0..1.0).contains(&cfg.test_fraction) {
            bail!("test fraction must be in [0, 1), got {}", cfg.test_fraction);
        }

        // ── Step 1: Load the CSV ──────────────────────────────────────────────
        tracing::info!("Loading training data from '{}'", cfg.csv_path);
        let table = CsvLoader::new(&cfg.csv_path).load()?;

        // ── Step 2: Check columns, drop incomplete rows, encode ───────────────
        // Unknown categorical tokens in the training data are fatal here.
        let encoded = encode_table(&table, &self.schema)?;
        tracing::info!(
            "Encoded {} rows ({} dropped for missing values)",
            encoded.features.nrows(),
            encoded.dropped_rows,
        );

        let n = encoded.features.nrows();
        if n < cfg.folds {
            bail!("only {} usable rows — need at least {} for {}-fold CV", n, cfg.folds, cfg.folds);
        }

        // ── Step 3: Deterministic train/held-out split ────────────────────────
        let (train_idx, test_idx) = split_indices(n, cfg.test_fraction, cfg.seed);
        if train_idx.is_empty() {
            bail!("training split is empty — lower the test fraction");
        }
        let x_train = encoded.features.select(Axis(0), &train_idx);
        let y_train = encoded.target.select(Axis(0), &train_idx);
        let x_test  = encoded.features.select(Axis(0), &test_idx);
        let y_test  = encoded.target.select(Axis(0), &test_idx);

        // ── Step 4: Fit the scale-then-regress pipeline ───────────────────────
        let pipeline = fit_pipeline(&x_train, &y_train)?;
        tracing::info!("Fitted OLS on {} rows, {} features", x_train.nrows(), x_train.ncols());

        // ── Step 5: Held-out R² ───────────────────────────────────────────────
        // An empty held-out split (test_fraction 0) scores as 0.0.
        let r2_holdout = if test_idx.is_empty() {
            0.0
        } else {
            evaluate_r2(&pipeline, &x_test, &y_test)
        };

        // ── Step 6: Cross-validated R² over the full dataset ──────────────────
        let (cv_r2_mean, cv_r2_std) =
            cross_validate(&encoded.features, &encoded.target, cfg.folds, cfg.seed)?;

        let metrics = ValidationMetrics {
            r2_holdout,
            cv_r2_mean,
            cv_r2_std,
            n_train: train_idx.len(),
            n_test:  test_idx.len(),
            folds:   cfg.folds,
        };

        // ── Step 7: Persist the bundle ────────────────────────────────────────
        let bundle = ModelBundle {
            feature_names: self.schema.features.clone(),
            target:        self.schema.target.clone(),
            pipeline,
            metrics: Some(metrics.clone()),
        };
        BundleStore::new(&cfg.bundle_path).save(&bundle)?;

        Ok(metrics)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// A small but fully valid tips CSV: tip rises with the bill,
    /// so the fit has real signal.
    fn write_tips_csv(name: &str) -> String {
        let mut csv = String::from("total_bill,tip,sex,smoker,day,time,size\n");
        for i in 0..30 {
            let bill = 10.0 + i as f64;
            let tip = 1.0 + 0.15 * bill;
            // Patterns with different periods so no two encoded
            // columns are collinear
            let sex = if i % 2 == 0 { "Male" } else { "Female" };
            let smoker = if i % 3 == 0 { "Yes" } else { "No" };
            let day = ["Thur", "Fri", "Sat", "Sun"][i % 4];
            let time = if (i / 4) % 2 == 0 { "Lunch" } else { "Dinner" };
            csv.push_str(&format!(
                "{bill:.2},{tip:.2},{sex},{smoker},{day},{time},{}\n",
                1 + i % 5
            ));
        }
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, csv).unwrap();
        path.to_string_lossy().to_string()
    }

    fn config(csv: String, bundle_name: &str) -> TrainConfig {
        TrainConfig {
            csv_path:    csv,
            bundle_path: std::env::temp_dir()
                .join(bundle_name)
                .to_string_lossy()
                .to_string(),
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_end_to_end_training_writes_bundle() {
        let cfg = config(
            write_tips_csv("tip_predictor_train_e2e.csv"),
            "tip_predictor_train_e2e.json",
        );
        let bundle_path = cfg.bundle_path.clone();
        let metrics = TrainUseCase::new(cfg).execute().unwrap();

        // Linear data with mild categorical noise still fits well
        assert!(metrics.r2_holdout > 0.9, "holdout R² = {}", metrics.r2_holdout);
        assert!(metrics.cv_r2_mean > 0.9, "cv R² = {}", metrics.cv_r2_mean);

        let bundle = BundleStore::new(&bundle_path).load().unwrap();
        assert_eq!(bundle.feature_names.len(), 6);
        assert_eq!(bundle.target, "tip");
        assert!(bundle.metrics.is_some());
    }

    #[test]
    fn test_metrics_reproducible_across_runs() {
        let csv = write_tips_csv("tip_predictor_train_repro.csv");
        let m1 = TrainUseCase::new(config(csv.clone(), "tip_predictor_repro_1.json"))
            .execute()
            .unwrap();
        let m2 = TrainUseCase::new(config(csv, "tip_predictor_repro_2.json"))
            .execute()
            .unwrap();
        assert_eq!(m1.r2_holdout, m2.r2_holdout);
        assert_eq!(m1.cv_r2_mean, m2.cv_r2_mean);
        assert_eq!(m1.cv_r2_std, m2.cv_r2_std);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let path = std::env::temp_dir().join("tip_predictor_train_missing_col.csv");
        std::fs::write(&path, "total_bill,tip\n10.0,2.0\n").unwrap();
        let cfg = config(
            path.to_string_lossy().to_string(),
            "tip_predictor_never_written.json",
        );
        let bundle_path = cfg.bundle_path.clone();
        let err = TrainUseCase::new(cfg).execute().unwrap_err().to_string();
        assert!(err.contains("missing columns"));
        // No artifact may exist after a failed run
        assert!(!std::path::Path::new(&bundle_path).exists());
    }

    #[test]
    fn test_unencodable_token_is_fatal() {
        let path = std::env::temp_dir().join("tip_predictor_train_bad_token.csv");
        let mut csv = String::from("total_bill,tip,sex,smoker,day,time,size\n");
        for _ in 0..10 {
            csv.push_str("10.0,2.0,Male,Maybe,Sat,Dinner,2\n");
        }
        std::fs::write(&path, csv).unwrap();
        let cfg = config(
            path.to_string_lossy().to_string(),
            "tip_predictor_never_written_2.json",
        );
        let err = TrainUseCase::new(cfg).execute().unwrap_err().to_string();
        assert!(err.contains("smoker"));
        assert!(err.contains("Maybe"));
    }
}
