// ============================================================
// Layer 1 — HTTP Handlers & HTML Rendering
// ============================================================
// Two pages, both rendered with format! — the markup is small
// enough that a template engine would be more code than the
// pages themselves.
//
// Form rendering is driven by the bundle's feature list:
//   - categorical fields (present in the encoding table)
//     render as a <select> of the canonical tokens
//   - numeric fields render as a free-text input
//
// On a validation error the form comes back with the message
// and every submitted value preserved, so the user fixes one
// field instead of retyping six.
//
// Reference: axum documentation (Form extractor, Html response)

use std::collections::HashMap;

use axum::extract::{Form, State};
use axum::response::Html;

use crate::domain::schema::{encoding_for, kind_of, FeatureKind};
use crate::web::state::AppState;

// ─── Handlers ─────────────────────────────────────────────────────────────────

/// GET / — the empty input form.
pub async fn form_page(State(state): State<AppState>) -> Html<String> {
    Html(render_form(&state, None, &HashMap::new()))
}

/// POST /predict — encode, predict, render.
/// Validation failures re-render the form; they are not HTTP errors.
pub async fn predict_page(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Html<String> {
    match state.predictor.predict(&fields) {
        Ok(prediction) => {
            tracing::info!("Prediction served: {:.4}", prediction);
            Html(render_results(&state, prediction))
        }
        Err(e) => {
            tracing::warn!("Rejected form submission: {}", e);
            Html(render_form(&state, Some(&e.to_string()), &fields))
        }
    }
}

// ─── Page Rendering ───────────────────────────────────────────────────────────

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 32em; margin: 3em auto; color: #222; }
h1 { font-size: 1.4em; }
label { display: block; margin-top: 0.8em; font-weight: bold; }
input, select { width: 100%; padding: 0.4em; margin-top: 0.2em; box-sizing: border-box; }
button { margin-top: 1.2em; padding: 0.5em 1.5em; }
.error { background: #fdd; border: 1px solid #c66; padding: 0.6em; margin-bottom: 1em; }
.result { font-size: 2em; color: #2563eb; margin: 0.5em 0; }
.metrics { color: #555; font-size: 0.9em; }
a { color: #2563eb; }
"#;

/// The input form, one field per bundle feature.
/// `values` carries the previous submission (empty map on first load).
fn render_form(state: &AppState, error: Option<&str>, values: &HashMap<String, String>) -> String {
    let bundle = state.predictor.bundle();

    let error_html = match error {
        Some(msg) => format!(r#"<div class="error">{}</div>"#, escape_html(msg)),
        None => String::new(),
    };

    let fields_html: String = bundle
        .feature_names
        .iter()
        .map(|name| {
            let submitted = values.get(name).map(String::as_str).unwrap_or("");
            format!(
                r#"<label for="{name}">{name}</label>{}"#,
                render_input(name, submitted)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html><head><title>Predict {target}</title><style>{STYLE}</style></head>
<body>
<h1>Predict {target}</h1>
{error_html}
<form method="post" action="/predict">
{fields_html}
<button type="submit">Predict</button>
</form>
</body></html>"#,
        target = escape_html(&bundle.target),
    )
}

/// One form control: a dropdown of canonical tokens for
/// categorical fields, a plain input for numeric ones.
fn render_input(name: &str, submitted: &str) -> String {
    // kind_of and encoding_for consult the same table, so a
    // categorical field always has Some(table) here
    match (kind_of(name), encoding_for(name)) {
        (FeatureKind::Categorical, Some(table)) => {
            let normalized = submitted.trim().to_uppercase();
            let options: String = table
                .canonical_tokens()
                .iter()
                .map(|tok| {
                    let selected = if *tok == normalized { " selected" } else { "" };
                    format!(r#"<option value="{tok}"{selected}>{tok}</option>"#)
                })
                .collect();
            format!(r#"<select id="{name}" name="{name}">{options}</select>"#)
        }
        _ => format!(
            r#"<input id="{name}" name="{name}" value="{}">"#,
            escape_html(submitted)
        ),
    }
}

/// The results page: the prediction plus stored training metrics.
fn render_results(state: &AppState, prediction: f64) -> String {
    let bundle = state.predictor.bundle();

    let metrics_html = match &bundle.metrics {
        Some(m) => format!(
            r#"<p class="metrics">Held-out R²: {:.4} &middot; {}-fold CV R²: {:.4} &plusmn; {:.4}<br>
Trained on {} rows, validated on {}.</p>"#,
            m.r2_holdout, m.folds, m.cv_r2_mean, m.cv_r2_std, m.n_train, m.n_test,
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html><head><title>Predicted {target}</title><style>{STYLE}</style></head>
<body>
<h1>Predicted {target}</h1>
<div class="result">{prediction:.2}</div>
{metrics_html}
<p><a href="/">Make another prediction</a></p>
</body></html>"#,
        target = escape_html(&bundle.target),
    )
}

/// Minimal HTML escaping for user-supplied strings echoed back
/// into the page.
fn escape_html(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            c => c.to_string(),
        })
        .collect()
}
