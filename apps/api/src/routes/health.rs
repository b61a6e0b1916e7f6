use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};

use crate::render::StyleName;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "cvready-api",
        "model": state.config.gemini_model,
        "generation_configured": state.config.gemini_api_key.is_some()
    }))
}

#[derive(Serialize)]
pub struct StyleInfo {
    pub name: StyleName,
    pub label: &'static str,
    pub description: &'static str,
}

/// GET /api/v1/styles
pub async fn styles_handler() -> Json<Vec<StyleInfo>> {
    Json(
        StyleName::ALL
            .into_iter()
            .map(|name| {
                let sheet = name.sheet();
                StyleInfo {
                    name,
                    label: sheet.label,
                    description: sheet.description,
                }
            })
            .collect(),
    )
}
