// ============================================================
// Layer 3 — Feature Schema & Categorical Encoder
// ============================================================
// The one piece of real logic in the system: turning a raw
// form/CSV string into the numeric code the pipeline expects.
//
// Every categorical field has a fixed token table:
//
//   sex:    FEMALE, F      → 0.0   MALE, M   → 1.0
//   smoker: YES, Y, 1      → 1.0   NO, N, 0  → 0.0
//   day:    THU, THUR → 1.0  FRI → 2.0  SAT → 3.0  SUN → 4.0
//   time:   LUNCH → 0.0     DINNER → 1.0
//
// Encoding rules (applied uniformly for every field):
//   1. Trim surrounding whitespace
//   2. Upper-case the token
//   3. Look it up in the field's table
//   4. Unknown token → EncodeError naming the field and the
//      accepted spellings (never a panic)
//
// Fields with no table entry are numeric and parse as f64.
//
// The same table serves both the trainer (which treats a failed
// encode as fatal) and the web predictor (which reports it back
// to the user) — the asymmetry lives in the callers, not here.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)
//            Rust Book §9 (Error Handling)

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── Feature Kind ─────────────────────────────────────────────────────────────

/// How a feature's raw string becomes a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Parsed directly with `str::parse::<f64>`
    Numeric,
    /// Looked up in the fixed token table below
    Categorical,
}

// ─── Encoding Table ───────────────────────────────────────────────────────────

/// Token table for one categorical field.
/// Tokens are stored pre-normalized (upper-case, no whitespace)
/// so lookup is a plain string comparison.
pub struct CategoricalField {
    pub field:  &'static str,
    pub tokens: &'static [(&'static str, f64)],
}

impl CategoricalField {
    /// All accepted spellings, in table order (used in error messages
    /// and to build the form's dropdown options).
    pub fn accepted(&self) -> Vec<&'static str> {
        self.tokens.iter().map(|(tok, _)| *tok).collect()
    }

    /// Canonical spellings only — the first token listed for each
    /// distinct code. These are what the form page offers.
    pub fn canonical_tokens(&self) -> Vec<&'static str> {
        let mut seen: Vec<f64> = Vec::new();
        let mut out = Vec::new();
        for (tok, code) in self.tokens {
            if !seen.iter().any(|c| c == code) {
                seen.push(*code);
                out.push(*tok);
            }
        }
        out
    }
}

/// The fixed per-field encoding table.
/// One entry per categorical feature; everything else is numeric.
pub const ENCODINGS: &[CategoricalField] = &[
    CategoricalField {
        field:  "sex",
        tokens: &[("FEMALE", 0.0), ("F", 0.0), ("MALE", 1.0), ("M", 1.0)],
    },
    CategoricalField {
        field:  "smoker",
        tokens: &[("YES", 1.0), ("Y", 1.0), ("1", 1.0), ("NO", 0.0), ("N", 0.0), ("0", 0.0)],
    },
    CategoricalField {
        field:  "day",
        // The tips dataset writes "Thur"; accept both spellings.
        tokens: &[("THU", 1.0), ("THUR", 1.0), ("FRI", 2.0), ("SAT", 3.0), ("SUN", 4.0)],
    },
    CategoricalField {
        field:  "time",
        tokens: &[("LUNCH", 0.0), ("DINNER", 1.0)],
    },
];

/// Look up the token table for a field, if it has one.
pub fn encoding_for(field: &str) -> Option<&'static CategoricalField> {
    ENCODINGS.iter().find(|e| e.field == field)
}

/// Kind of a field, derived from the table: listed → categorical,
/// everything else → numeric.
pub fn kind_of(field: &str) -> FeatureKind {
    if encoding_for(field).is_some() {
        FeatureKind::Categorical
    } else {
        FeatureKind::Numeric
    }
}

// ─── Encoding ─────────────────────────────────────────────────────────────────

/// Encode one raw string value for the named field.
///
/// Normalizes (trim + upper-case), then either consults the token
/// table or parses as a decimal number. Every failure is a typed
/// `EncodeError` that names the offending field.
pub fn encode_value(field: &str, raw: &str) -> Result<f64, EncodeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EncodeError::MissingValue { field: field.to_string() });
    }

    match encoding_for(field) {
        Some(table) => {
            let normalized = trimmed.to_uppercase();
            table
                .tokens
                .iter()
                .find(|(tok, _)| *tok == normalized)
                .map(|(_, code)| *code)
                .ok_or_else(|| EncodeError::UnknownToken {
                    field:    field.to_string(),
                    value:    trimmed.to_string(),
                    accepted: table.accepted(),
                })
        }
        None => trimmed.parse::<f64>().map_err(|_| EncodeError::NotNumeric {
            field: field.to_string(),
            value: trimmed.to_string(),
        }),
    }
}

// ─── Feature Schema ───────────────────────────────────────────────────────────

/// The ordered feature list plus the target column name.
/// The order here is THE feature order — training, the bundle,
/// and the form all follow it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub features: Vec<String>,
    pub target:   String,
}

impl FeatureSchema {
    /// The demo schema: restaurant tips.
    pub fn tips() -> Self {
        Self {
            features: ["total_bill", "sex", "smoker", "day", "time", "size"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            target: "tip".to_string(),
        }
    }

    /// Feature columns plus the target — everything a training
    /// row must have a value for.
    pub fn required_columns(&self) -> Vec<String> {
        let mut cols = self.features.clone();
        cols.push(self.target.clone());
        cols
    }
}

// ─── Encode Errors ────────────────────────────────────────────────────────────

/// A value that could not be turned into a number.
///
/// Kept as a plain enum (not anyhow) so the serving layer can
/// show it to the user while the trainer escalates it to a
/// process-level failure.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// The field was absent or blank
    MissingValue { field: String },
    /// A numeric field held something that doesn't parse as f64
    NotNumeric { field: String, value: String },
    /// A categorical field held a token outside its table
    UnknownToken {
        field:    String,
        value:    String,
        accepted: Vec<&'static str>,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::MissingValue { field } => {
                write!(f, "field '{field}' is missing or blank")
            }
            EncodeError::NotNumeric { field, value } => {
                write!(f, "field '{field}': '{value}' is not a number")
            }
            EncodeError::UnknownToken { field, value, accepted } => {
                write!(
                    f,
                    "field '{field}': unrecognised value '{value}' (accepted: {})",
                    accepted.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for EncodeError {}
