use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{BasicInfo, EducationEntry, ExperienceEntry, ProjectEntry};
use crate::render::{Format, PdfLayout, StyleName};
use crate::session::{SessionHandle, SessionSnapshot};
use crate::state::AppState;

async fn session_handle(state: &AppState, id: Uuid) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionSnapshot>) {
    let handle = state.sessions.create().await;
    let snapshot = handle.lock().await.snapshot();
    (StatusCode::CREATED, Json(snapshot))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = session_handle(&state, id).await?;
    let snapshot = handle.lock().await.snapshot();
    Ok(Json(snapshot))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

#[derive(Deserialize)]
pub struct OwnerRequest {
    pub email: String,
}

/// PUT /api/v1/sessions/:id/owner
pub async fn handle_set_owner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<OwnerRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = session_handle(&state, id).await?;
    let mut session = handle.lock().await;
    session.set_owner(&req.email);
    Ok(Json(session.snapshot()))
}

/// PUT /api/v1/sessions/:id/basic-info
pub async fn handle_set_basic_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(info): Json<BasicInfo>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = session_handle(&state, id).await?;
    let mut session = handle.lock().await;
    session.set_basic_info(info)?;
    Ok(Json(session.snapshot()))
}

#[derive(Default, Deserialize)]
#[serde(default)]
pub struct HistoryRequest {
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
}

/// PUT /api/v1/sessions/:id/history
pub async fn handle_set_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<HistoryRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = session_handle(&state, id).await?;
    let mut session = handle.lock().await;
    session.set_history(req.experience, req.education, req.projects);
    Ok(Json(session.snapshot()))
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Id of the auto-saved entry, when an owner email is set and saving worked.
    pub saved_id: Option<Uuid>,
    /// User-facing message when the auto-save failed.
    pub save_error: Option<String>,
}

/// POST /api/v1/sessions/:id/generate
///
/// Auto-saves when the session has an owner. A failed auto-save is reported
/// in the body and does not fail the request.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GenerateResponse>, AppError> {
    let handle = session_handle(&state, id).await?;
    let mut session = handle.lock().await;

    let doc = session.generate(state.generator.as_ref()).await?;
    let (text, created_at) = (doc.text.clone(), doc.created_at);

    let (saved_id, save_error) = match session.auto_save(state.store.as_ref()).await {
        Some(Ok(saved)) => (Some(saved), None),
        Some(Err(err)) => (None, Some(err.to_string())),
        None => (None, None),
    };

    Ok(Json(GenerateResponse {
        text,
        created_at,
        saved_id,
        save_error,
    }))
}

#[derive(Serialize)]
pub struct SaveResponse {
    pub id: Uuid,
}

/// POST /api/v1/sessions/:id/save
pub async fn handle_save(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<SaveResponse>), AppError> {
    let handle = session_handle(&state, id).await?;
    let session = handle.lock().await;
    let saved = session.save(state.store.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(SaveResponse { id: saved })))
}

/// POST /api/v1/sessions/:id/load/:resume_id
pub async fn handle_load(
    State(state): State<AppState>,
    Path((id, resume_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let handle = session_handle(&state, id).await?;
    let entry = state
        .store
        .fetch(resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Saved resume {resume_id} not found")))?;

    let mut session = handle.lock().await;
    session.load(entry);
    Ok(Json(session.snapshot()))
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    /// `freeform` or `structured`. Defaults to structured when a style is given.
    pub layout: Option<String>,
    pub style: Option<String>,
}

impl DownloadQuery {
    fn pdf_layout(&self) -> Result<PdfLayout, AppError> {
        let style = self
            .style
            .as_deref()
            .map(str::parse::<StyleName>)
            .transpose()
            .map_err(AppError::Validation)?;

        match self.layout.as_deref().map(str::trim) {
            None | Some("") => Ok(style.map_or(PdfLayout::Freeform, PdfLayout::Structured)),
            Some(l) if l.eq_ignore_ascii_case("freeform") => Ok(PdfLayout::Freeform),
            Some(l) if l.eq_ignore_ascii_case("structured") => {
                Ok(PdfLayout::Structured(style.unwrap_or_default()))
            }
            Some(other) => Err(AppError::Validation(format!(
                "unknown layout '{other}' (expected freeform or structured)"
            ))),
        }
    }
}

/// GET /api/v1/sessions/:id/download/:format
pub async fn handle_download(
    State(state): State<AppState>,
    Path((id, format)): Path<(Uuid, String)>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    let format: Format = format.parse().map_err(AppError::Validation)?;
    let pdf_layout = query.pdf_layout()?;

    let handle = session_handle(&state, id).await?;
    let artifact = handle.lock().await.download(format, pdf_layout).await?;

    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, artifact.media_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}
