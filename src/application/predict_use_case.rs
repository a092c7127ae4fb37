// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// The serving-side counterpart of TrainUseCase: holds the
// loaded bundle for the whole process lifetime and turns one
// posted form into one prediction.
//
// Field values arrive as a name → raw-string map; they are
// encoded strictly in the bundle's feature order, so the
// assembled vector always lines up with the fitted
// coefficients.
//
// Every validation problem comes back as an EncodeError value
// for the web layer to render — bad user input must never
// escalate past this boundary.

use std::collections::HashMap;

use crate::domain::bundle::ModelBundle;
use crate::domain::schema::{encode_value, EncodeError};
use crate::domain::traits::Predictor;

pub struct PredictUseCase {
    bundle: ModelBundle,
}

impl PredictUseCase {
    pub fn new(bundle: ModelBundle) -> Self {
        Self { bundle }
    }

    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }

    /// Encode the posted fields in the bundle's feature order and
    /// run the pipeline.
    ///
    /// An absent field encodes like a blank one: MissingValue.
    pub fn predict(&self, form: &HashMap<String, String>) -> Result<f64, EncodeError> {
        let row = self.encode_row(form)?;
        Ok(self.bundle.pipeline.predict_row(&row))
    }

    /// The ordered numeric vector for a form, before prediction.
    pub fn encode_row(&self, form: &HashMap<String, String>) -> Result<Vec<f64>, EncodeError> {
        let mut row = Vec::with_capacity(self.bundle.feature_names.len());
        for name in &self.bundle.feature_names {
            let raw = form.get(name).map(String::as_str).unwrap_or("");
            row.push(encode_value(name, raw)?);
        }
        Ok(row)
    }
}
