// ============================================================
// Layer 6 — Bundle Store
// ============================================================
// Persists the ModelBundle as a single JSON file.
//
// What gets saved:
//   1. Pipeline parameters (scaler means/stds, OLS intercept
//      and coefficients)
//   2. The ordered feature-name list
//   3. The target column name
//   4. Validation metrics (held-out R², CV mean/std)
//
// Why JSON?
//   The bundle is a handful of floats and strings — small
//   enough that a human-readable artifact is worth more than
//   a compact binary one. Pretty-printing makes a diff of two
//   training runs meaningful.
//
// Why a consistency check on load?
//   A hand-edited or truncated bundle whose coefficient count
//   doesn't match its feature list would otherwise produce
//   silently wrong predictions on every request.
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json documentation

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};

use crate::domain::bundle::ModelBundle;

/// Saves and loads the model bundle at a fixed path.
pub struct BundleStore {
    path: PathBuf,
}

impl BundleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write the bundle as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, bundle: &ModelBundle) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create directory '{}'", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(bundle)?;
        fs::write(&self.path, json)
            .with_context(|| format!("cannot write bundle to '{}'", self.path.display()))?;

        tracing::info!("Saved model bundle to '{}'", self.path.display());
        Ok(())
    }

    /// Load and validate a previously saved bundle.
    pub fn load(&self) -> Result<ModelBundle> {
        let json = fs::read_to_string(&self.path).with_context(|| {
            format!(
                "cannot read bundle from '{}'. Have you run 'train' first?",
                self.path.display()
            )
        })?;

        let bundle: ModelBundle = serde_json::from_str(&json)
            .with_context(|| format!("bundle '{}' is not valid JSON", self.path.display()))?;

        if !bundle.is_consistent() {
            bail!(
                "bundle '{}' is inconsistent: {} feature names vs {} coefficients",
                self.path.display(),
                bundle.feature_names.len(),
                bundle.pipeline.input_dim(),
            );
        }

        tracing::info!(
            "Loaded bundle: {} features, target '{}'",
            bundle.feature_names.len(),
            bundle.target,
        );
        Ok(bundle)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bundle::{LinearModel, RegressionPipeline, StandardScaler};

    fn sample_bundle() -> ModelBundle {
        ModelBundle {
            feature_names: vec!["total_bill".into(), "size".into()],
            target:        "tip".into(),
            pipeline: RegressionPipeline {
                scaler: StandardScaler { means: vec![20.0, 2.5], stds: vec![8.0, 0.9] },
                model:  LinearModel { intercept: 3.0, coefficients: vec![1.1, 0.2] },
            },
            metrics: None,
        }
    }

    #[test]
    fn test_save_then_load_same_predictions() {
        let path = std::env::temp_dir().join("tip_predictor_bundle_roundtrip.json");
        let store = BundleStore::new(&path);

        let bundle = sample_bundle();
        store.save(&bundle).unwrap();
        let loaded = store.load().unwrap();

        let row = [25.0, 4.0];
        assert_eq!(bundle.pipeline.predict(&row), loaded.pipeline.predict(&row));
        assert_eq!(loaded.feature_names, bundle.feature_names);
    }

    #[test]
    fn test_missing_bundle_mentions_train() {
        let store = BundleStore::new("/no/such/dir/bundle.json");
        let err = store.load().unwrap_err().to_string();
        assert!(err.contains("train"));
    }

    #[test]
    fn test_inconsistent_bundle_rejected() {
        let path = std::env::temp_dir().join("tip_predictor_bundle_bad.json");
        let mut bundle = sample_bundle();
        bundle.feature_names.pop();
        // save() writes as-is; the consistency check happens on load
        BundleStore::new(&path).save(&bundle).unwrap();
        assert!(BundleStore::new(&path).load().is_err());
    }
}
