// Persistence for saved resumes: a `RecordStore` trait with a PostgreSQL
// implementation and an in-memory one for running without a database.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{CandidateRecord, SavedEntry};

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

/// Maximum number of entries returned by `list_by_owner`.
pub const LIST_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Error: database request failed: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists a new entry. The store assigns the id and timestamp.
    async fn save(
        &self,
        owner_email: &str,
        record: &CandidateRecord,
        generated_text: &str,
    ) -> Result<Uuid, StoreError>;

    /// Entries owned by `owner_email`, newest first, at most `LIST_LIMIT`.
    async fn list_by_owner(&self, owner_email: &str) -> Result<Vec<SavedEntry>, StoreError>;

    /// Deleting an unknown id is not an error.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;

    async fn fetch(&self, id: Uuid) -> Result<Option<SavedEntry>, StoreError>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Store whose every operation fails, as if the database were unreachable.
    pub(crate) struct FailingStore;

    #[async_trait]
    impl RecordStore for FailingStore {
        async fn save(
            &self,
            _owner_email: &str,
            _record: &CandidateRecord,
            _generated_text: &str,
        ) -> Result<Uuid, StoreError> {
            Err(sqlx::Error::PoolTimedOut.into())
        }

        async fn list_by_owner(&self, _owner_email: &str) -> Result<Vec<SavedEntry>, StoreError> {
            Err(sqlx::Error::PoolTimedOut.into())
        }

        async fn delete_by_id(&self, _id: Uuid) -> Result<(), StoreError> {
            Err(sqlx::Error::PoolTimedOut.into())
        }

        async fn fetch(&self, _id: Uuid) -> Result<Option<SavedEntry>, StoreError> {
            Err(sqlx::Error::PoolTimedOut.into())
        }
    }

    #[tokio::test]
    async fn test_failing_store_errors_carry_user_message() {
        let err = FailingStore.list_by_owner("jane@example.com").await.unwrap_err();
        assert!(err.to_string().starts_with("Error:"));
    }
}
