use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::models::{CandidateRecord, SavedEntry};
use crate::store::{RecordStore, StoreError, LIST_LIMIT};

/// Process-local store. Entries are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    // Insertion order breaks ties between equal timestamps.
    entries: RwLock<Vec<(u64, SavedEntry)>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn save(
        &self,
        owner_email: &str,
        record: &CandidateRecord,
        generated_text: &str,
    ) -> Result<Uuid, StoreError> {
        let entry = SavedEntry {
            id: Uuid::new_v4(),
            owner_email: owner_email.to_string(),
            record: record.clone(),
            generated_text: generated_text.to_string(),
            created_at: Utc::now(),
        };
        let id = entry.id;

        let mut entries = self.entries.write().await;
        let seq = entries.last().map_or(0, |(seq, _)| seq + 1);
        entries.push((seq, entry));

        info!("Saved resume {id} for {owner_email}");
        Ok(id)
    }

    async fn list_by_owner(&self, owner_email: &str) -> Result<Vec<SavedEntry>, StoreError> {
        let entries = self.entries.read().await;
        let mut owned: Vec<&(u64, SavedEntry)> = entries
            .iter()
            .filter(|(_, e)| e.owner_email == owner_email)
            .collect();
        owned.sort_by(|(sa, a), (sb, b)| b.created_at.cmp(&a.created_at).then(sb.cmp(sa)));

        Ok(owned
            .into_iter()
            .take(LIST_LIMIT)
            .map(|(_, e)| e.clone())
            .collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        self.entries.write().await.retain(|(_, e)| e.id != id);
        info!("Deleted resume {id}");
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<SavedEntry>, StoreError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .find(|(_, e)| e.id == id)
            .map(|(_, e)| e.clone()))
    }
}
