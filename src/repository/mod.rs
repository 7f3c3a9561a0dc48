mod embedded;
#[cfg(test)]
pub mod memory;
mod postgres;

use async_trait::async_trait;

use crate::models::{Note, NoteDraft};

pub use postgres::PgRepository;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to acquire database connection: {0}")]
    Pool(#[from] bb8::RunError<tokio_postgres::Error>),

    #[error("database query failed: {0}")]
    Query(#[from] tokio_postgres::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] refinery::Error),
}

/// Persistence operations over the `notes` table.
///
/// Every call is a single statement; implementations must not hold a
/// connection past the end of the call.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn create_note(&self, draft: &NoteDraft) -> Result<Note, StoreError>;

    /// Returns `None` when no note has the given id.
    async fn update_note(&self, id: i64, draft: &NoteDraft) -> Result<Option<Note>, StoreError>;

    /// Returns `false` when no note has the given id.
    async fn delete_note(&self, id: i64) -> Result<bool, StoreError>;

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, StoreError>;

    /// All notes, newest first. Equal creation times fall back to id descending.
    async fn get_all_notes(&self) -> Result<Vec<Note>, StoreError>;
}
