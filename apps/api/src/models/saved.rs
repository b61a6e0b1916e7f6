use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::candidate::CandidateRecord;

/// A persisted generation: the form snapshot plus the text produced from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEntry {
    pub id: Uuid,
    pub owner_email: String,
    pub record: CandidateRecord,
    pub generated_text: String,
    pub created_at: DateTime<Utc>,
}

impl SavedEntry {
    /// Label shown in saved-resume listings.
    pub fn display_name(&self) -> &str {
        let name = self.record.basic_info.name.trim();
        if name.is_empty() {
            "Untitled"
        } else {
            name
        }
    }
}
