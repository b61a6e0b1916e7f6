pub mod health;
pub mod resumes;
pub mod sessions;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/styles", get(health::styles_handler))
        // Session / form API
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_delete_session),
        )
        .route("/api/v1/sessions/:id/owner", put(sessions::handle_set_owner))
        .route(
            "/api/v1/sessions/:id/basic-info",
            put(sessions::handle_set_basic_info),
        )
        .route(
            "/api/v1/sessions/:id/history",
            put(sessions::handle_set_history),
        )
        .route(
            "/api/v1/sessions/:id/generate",
            post(sessions::handle_generate),
        )
        .route("/api/v1/sessions/:id/save", post(sessions::handle_save))
        .route(
            "/api/v1/sessions/:id/load/:resume_id",
            post(sessions::handle_load),
        )
        .route(
            "/api/v1/sessions/:id/download/:format",
            get(sessions::handle_download),
        )
        // Saved resumes
        .route("/api/v1/resumes", get(resumes::handle_list_resumes))
        .route("/api/v1/resumes/:id", delete(resumes::handle_delete_resume))
        .with_state(state)
}
