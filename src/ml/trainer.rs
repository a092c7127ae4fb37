// ============================================================
// Layer 5 — Pipeline Fitting
// ============================================================
// Fits the two-stage pipeline on already-encoded matrices:
//
//   1. StandardScaler — per-column mean/std on the training
//      rows only (the held-out rows must stay unseen)
//   2. Ordinary least squares via linfa-linear
//
// The fitted linfa model is immediately flattened into the
// plain LinearModel struct (intercept + coefficients) so the
// bundle stays framework-free.
//
// Cross-validation refits the WHOLE pipeline (scaler included)
// inside each fold — fitting the scaler once on all rows would
// leak held-out statistics into the folds.
//
// Reference: linfa-linear crate documentation
//            rand crate documentation

use anyhow::{bail, Context, Result};
use linfa::prelude::*;
use linfa_linear::LinearRegression;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::bundle::{LinearModel, RegressionPipeline, StandardScaler};
use crate::ml::metrics::{mean_std, r2_score};

// ─── Scaler ───────────────────────────────────────────────────────────────────

/// Fit per-column standardization parameters.
/// Zero-variance columns store std = 1.0 so transform never
/// divides by zero.
pub fn fit_scaler(x: &Array2<f64>) -> StandardScaler {
    let means = x
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::zeros(x.ncols()))
        .to_vec();
    let stds: Vec<f64> = x
        .std_axis(Axis(0), 0.0)
        .iter()
        .map(|&s| if s == 0.0 { 1.0 } else { s })
        .collect();
    StandardScaler { means, stds }
}

/// Apply a fitted scaler to a whole matrix.
pub fn scale_matrix(scaler: &StandardScaler, x: &Array2<f64>) -> Array2<f64> {
    let mut scaled = x.clone();
    for (j, mut col) in scaled.axis_iter_mut(Axis(1)).enumerate() {
        let (m, s) = (scaler.means[j], scaler.stds[j]);
        col.mapv_inplace(|v| (v - m) / s);
    }
    scaled
}

// ─── OLS Fit ──────────────────────────────────────────────────────────────────

/// Fit ordinary least squares on scaled features and extract
/// the parameters into the plain domain struct.
fn fit_linear(x_scaled: &Array2<f64>, y: &Array1<f64>) -> Result<LinearModel> {
    let dataset = Dataset::new(x_scaled.clone(), y.clone());
    let fitted = LinearRegression::new()
        .fit(&dataset)
        .context("least-squares fit failed")?;

    Ok(LinearModel {
        intercept:    fitted.intercept(),
        coefficients: fitted.params().to_vec(),
    })
}

/// Fit the full scale-then-regress pipeline on raw features.
pub fn fit_pipeline(x: &Array2<f64>, y: &Array1<f64>) -> Result<RegressionPipeline> {
    if x.nrows() == 0 {
        bail!("cannot fit on an empty matrix");
    }
    if x.nrows() != y.len() {
        bail!("feature rows ({}) != target rows ({})", x.nrows(), y.len());
    }

    let scaler = fit_scaler(x);
    let model = fit_linear(&scale_matrix(&scaler, x), y)?;
    Ok(RegressionPipeline { scaler, model })
}

// ─── Evaluation ───────────────────────────────────────────────────────────────

/// Predict every row of a matrix.
pub fn predict_matrix(pipeline: &RegressionPipeline, x: &Array2<f64>) -> Array1<f64> {
    let preds: Vec<f64> = x
        .axis_iter(Axis(0))
        .map(|row| pipeline.predict(&row.to_vec()))
        .collect();
    Array1::from_vec(preds)
}

/// R² of a fitted pipeline on the given rows.
pub fn evaluate_r2(pipeline: &RegressionPipeline, x: &Array2<f64>, y: &Array1<f64>) -> f64 {
    r2_score(y, &predict_matrix(pipeline, x))
}

// ─── Cross-Validation ─────────────────────────────────────────────────────────

/// Seeded k-fold cross-validated R²: (mean, std) over the folds.
///
/// Rows are shuffled once with the seed, dealt into `folds`
/// contiguous chunks (the first `n % folds` chunks get one
/// extra row), and each fold in turn is held out while the
/// pipeline is refitted on the rest.
pub fn cross_validate(
    x:     &Array2<f64>,
    y:     &Array1<f64>,
    folds: usize,
    seed:  u64,
) -> Result<(f64, f64)> {
    if folds < 2 {
        bail!("cross-validation needs at least 2 folds, got {folds}");
    }
    let n = x.nrows();
    if n < folds {
        bail!("cross-validation needs at least {folds} rows, got {n}");
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let fold_size = n / folds;
    let remainder = n % folds;

    let mut scores = Vec::with_capacity(folds);
    let mut start = 0usize;
    for k in 0..folds {
        let size = fold_size + usize::from(k < remainder);
        let test_idx: Vec<usize> = indices[start..start + size].to_vec();
        let train_idx: Vec<usize> = indices[..start]
            .iter()
            .chain(indices[start + size..].iter())
            .copied()
            .collect();
        start += size;

        let pipeline = fit_pipeline(
            &x.select(Axis(0), &train_idx),
            &y.select(Axis(0), &train_idx),
        )?;
        let score = evaluate_r2(
            &pipeline,
            &x.select(Axis(0), &test_idx),
            &y.select(Axis(0), &test_idx),
        );
        tracing::debug!("Fold {}/{}: R²={:.4} ({} test rows)", k + 1, folds, score, size);
        scores.push(score);
    }

    Ok(mean_std(&scores))
}
