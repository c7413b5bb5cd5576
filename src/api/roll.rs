//! Roll endpoints
//!
//! POST /roll     - form field `dice`, answers with an HTML fragment
//! POST /api/roll - JSON `{"dice": "..."}`, answers with the outcome as JSON

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::post,
    Form, Json, Router,
};
use serde::Deserialize;
use tracing::info;

use super::AppState;
use crate::dice::{evaluate_with, RollOutcome};

const EMPTY_INPUT: &str = "Please enter dice notation";

/// Build the roll router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/roll", post(roll_form))
        .route("/api/roll", post(roll_json))
}

#[derive(Debug, Deserialize)]
pub struct RollRequest {
    #[serde(default)]
    pub dice: String,
}

/// Roll from the home page form
async fn roll_form(State(state): State<AppState>, Form(req): Form<RollRequest>) -> Html<String> {
    let input = req.dice.trim();
    if input.is_empty() {
        return Html(format!(r#"<div class="text-red-500">{}</div>"#, EMPTY_INPUT));
    }

    let outcome = evaluate_with(input, state.source.as_ref());
    log_outcome(&outcome);
    Html(render_outcome(&outcome))
}

/// Roll from a JSON client
async fn roll_json(
    State(state): State<AppState>,
    Json(req): Json<RollRequest>,
) -> impl IntoResponse {
    let input = req.dice.trim();
    if input.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(RollOutcome::failed(input, EMPTY_INPUT)),
        );
    }

    let outcome = evaluate_with(input, state.source.as_ref());
    log_outcome(&outcome);
    (StatusCode::OK, Json(outcome))
}

fn log_outcome(outcome: &RollOutcome) {
    match &outcome.error {
        None => info!(input = %outcome.input, result = outcome.result, "roll"),
        Some(error) => info!(input = %outcome.input, %error, "roll rejected"),
    }
}

/// Render an outcome as the HTML fragment swapped into the results panel
fn render_outcome(outcome: &RollOutcome) -> String {
    match &outcome.error {
        Some(error) => format!(
            r#"<div class="text-red-500">Error: {}</div>"#,
            escape_html(error)
        ),
        None => format!(
            r#"
<div class="bg-green-50 border border-green-200 rounded-lg p-4">
    <div class="text-2xl font-bold text-green-800">{}</div>
    <div class="text-sm text-green-600 mt-1">{}</div>
    <div class="text-xs text-gray-500 mt-1">Input: {}</div>
</div>
"#,
            outcome.result,
            escape_html(&outcome.details),
            escape_html(&outcome.input)
        ),
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
