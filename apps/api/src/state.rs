use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionService;
use crate::session::SessionRegistry;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres when `DATABASE_URL` is set, in-memory otherwise.
    pub store: Arc<dyn RecordStore>,
    pub generator: Arc<dyn CompletionService>,
    pub sessions: Arc<SessionRegistry>,
    pub config: Config,
}
