use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::SavedEntry;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct OwnerQuery {
    pub email: String,
}

#[derive(Serialize)]
pub struct SavedResumeItem {
    pub display_name: String,
    #[serde(flatten)]
    pub entry: SavedEntry,
}

/// GET /api/v1/resumes?email=
/// The owner's ten most recent saved resumes, newest first.
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<Vec<SavedResumeItem>>, AppError> {
    let email = params.email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("email must not be empty".to_string()));
    }

    let entries = state.store.list_by_owner(email).await?;
    Ok(Json(
        entries
            .into_iter()
            .map(|entry| SavedResumeItem {
                display_name: entry.display_name().to_string(),
                entry,
            })
            .collect(),
    ))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
