//! Session controller. Owns one user's form state and orchestrates
//! generation, persistence and rendering over it.
//!
//! A `Session` holds the working `CandidateRecord`, the optional owner email
//! used for persistence, and the last `GeneratedDocument`. Failed operations
//! leave all three untouched.
//!
//! `SessionRegistry` keeps sessions in memory. Each session sits behind its own
//! `tokio::sync::Mutex`, so calls within one session run strictly in sequence
//! while separate sessions proceed independently. Sessions idle past the
//! configured TTL are swept when a new one is created, and the registry never
//! holds more than its configured maximum.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use crate::generation::{generate, GenerationError};
use crate::llm_client::CompletionService;
use crate::models::{
    BasicInfo, CandidateRecord, EducationEntry, ExperienceEntry, GeneratedDocument, ProjectEntry,
    SavedEntry,
};
use crate::render::{render, Artifact, Format, PdfLayout, RenderError};
use crate::store::{RecordStore, StoreError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Error: Please fill in the required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Error: Please save your basic information first.")]
    BasicInfoRequired,

    #[error("Error: Please generate a resume first.")]
    NothingGenerated,

    #[error("Error: Please enter your email to save resumes.")]
    OwnerRequired,

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Error: rendering task failed: {0}")]
    RenderTask(String),
}

/// Read-only view of a session returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub record: CandidateRecord,
    pub owner_email: Option<String>,
    pub generated: Option<GeneratedDocument>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    record: CandidateRecord,
    owner_email: Option<String>,
    generated: Option<GeneratedDocument>,
    created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            record: CandidateRecord::default(),
            owner_email: None,
            generated: None,
            created_at: Utc::now(),
        }
    }

    #[cfg(test)]
    pub fn record(&self) -> &CandidateRecord {
        &self.record
    }

    pub fn owner_email(&self) -> Option<&str> {
        self.owner_email.as_deref()
    }

    #[cfg(test)]
    pub fn generated(&self) -> Option<&GeneratedDocument> {
        self.generated.as_ref()
    }

    /// Replaces basic info after checking that name, email and phone are filled in.
    pub fn set_basic_info(&mut self, info: BasicInfo) -> Result<(), SessionError> {
        let missing = info.missing_required();
        if !missing.is_empty() {
            return Err(SessionError::MissingFields(missing));
        }
        self.record.basic_info = info;
        Ok(())
    }

    /// Replaces all three history lists wholesale. Blank entries are kept.
    pub fn set_history(
        &mut self,
        experience: Vec<ExperienceEntry>,
        education: Vec<EducationEntry>,
        projects: Vec<ProjectEntry>,
    ) {
        self.record.experience = experience;
        self.record.education = education;
        self.record.projects = projects;
    }

    /// Sets the owner email used for saving. A blank email clears it.
    pub fn set_owner(&mut self, email: &str) {
        let email = email.trim();
        self.owner_email = (!email.is_empty()).then(|| email.to_string());
    }

    /// Generates from the current record. On success the new document replaces
    /// the previous one; on failure the session is unchanged.
    pub async fn generate(
        &mut self,
        service: &dyn CompletionService,
    ) -> Result<&GeneratedDocument, SessionError> {
        if !self.record.basic_info.missing_required().is_empty() {
            return Err(SessionError::BasicInfoRequired);
        }

        let text = generate(service, &self.record).await?;
        info!("Session {} generated a resume", self.id);
        Ok(self
            .generated
            .insert(GeneratedDocument::new(self.record.clone(), text)))
    }

    /// Saves the current generated document under the owner email.
    pub async fn save(&self, store: &dyn RecordStore) -> Result<Uuid, SessionError> {
        let doc = self.generated.as_ref().ok_or(SessionError::NothingGenerated)?;
        let owner = self.owner_email.as_deref().ok_or(SessionError::OwnerRequired)?;
        Ok(store.save(owner, &doc.source_record, &doc.text).await?)
    }

    /// Saves after a successful generation when an owner is set. Failures are
    /// logged and returned for display; they never undo the generation.
    pub async fn auto_save(&self, store: &dyn RecordStore) -> Option<Result<Uuid, SessionError>> {
        self.owner_email()?;
        let result = self.save(store).await;
        if let Err(err) = &result {
            warn!("Auto-save failed for session {}: {err}", self.id);
        }
        Some(result)
    }

    /// Restores the form and the generated document from a saved entry.
    pub fn load(&mut self, entry: SavedEntry) {
        info!("Session {} loaded saved resume {}", self.id, entry.id);
        self.record = entry.record.clone();
        self.generated = Some(GeneratedDocument {
            source_record: entry.record,
            text: entry.generated_text,
            created_at: entry.created_at,
        });
    }

    /// Renders the current generated document. PDF layout runs on the
    /// blocking pool.
    pub async fn download(
        &self,
        format: Format,
        pdf_layout: PdfLayout,
    ) -> Result<Artifact, SessionError> {
        let doc = self.generated.clone().ok_or(SessionError::NothingGenerated)?;

        let artifact = tokio::task::spawn_blocking(move || {
            render(&doc.text, &doc.source_record, format, pdf_layout)
        })
        .await
        .map_err(|e| SessionError::RenderTask(e.to_string()))??;

        Ok(artifact)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            record: self.record.clone(),
            owner_email: self.owner_email.clone(),
            generated: self.generated.clone(),
            created_at: self.created_at,
        }
    }
}

pub type SessionHandle = Arc<Mutex<Session>>;

/// Sessions unused for this long are evicted on the next `create`.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(2 * 60 * 60);

/// Live sessions allowed at once before the least recently used is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug)]
struct RegistryEntry {
    handle: SessionHandle,
    // Milliseconds since the registry epoch.
    last_used: AtomicU64,
}

#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, RegistryEntry>>,
    epoch: Instant,
    idle_ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_IDLE_TTL, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionRegistry {
    pub fn new(idle_ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            epoch: Instant::now(),
            idle_ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Evicts idle sessions, then makes room by dropping the least recently
    /// used ones while the registry is full, then inserts a new session.
    pub async fn create(&self) -> SessionHandle {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(Session::new(id)));
        let now = self.now_ms();
        let ttl = u64::try_from(self.idle_ttl.as_millis()).unwrap_or(u64::MAX);

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            now.saturating_sub(entry.last_used.load(Ordering::Relaxed)) <= ttl
        });
        let expired = before - sessions.len();
        if expired > 0 {
            info!("Evicted {expired} idle sessions");
        }

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_used.load(Ordering::Relaxed))
                .map(|(id, _)| *id);
            let Some(oldest) = oldest else { break };
            sessions.remove(&oldest);
            warn!("Session limit reached; evicted least recently used session {oldest}");
        }

        sessions.insert(
            id,
            RegistryEntry {
                handle: Arc::clone(&handle),
                last_used: AtomicU64::new(now),
            },
        );
        info!("Created session {id}");
        handle
    }

    /// Looks up a session and marks it as used.
    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        let sessions = self.sessions.read().await;
        let entry = sessions.get(&id)?;
        entry.last_used.store(self.now_ms(), Ordering::Relaxed);
        Some(Arc::clone(&entry.handle))
    }

    /// Returns whether a session was removed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!("Dropped session {id}");
        }
        removed
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
