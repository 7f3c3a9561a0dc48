use std::time::Duration;

use async_trait::async_trait;
use bb8::{Pool, PooledConnection};
use bb8_postgres::PostgresConnectionManager;
use tokio_postgres::NoTls;

use super::{NoteRepository, StoreError, embedded::migrations};
use crate::models::{Note, NoteDraft};

type Manager = PostgresConnectionManager<NoTls>;

pub struct PgRepository {
    pool: Pool<Manager>,
}

impl PgRepository {
    pub async fn new(
        database_dsn: &str,
        max_size: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, tokio_postgres::Error> {
        let manager = PostgresConnectionManager::new_from_stringlike(database_dsn, NoTls)?;

        let pool = Pool::builder()
            .max_size(max_size)
            .connection_timeout(acquire_timeout)
            .build(manager)
            .await?;

        Ok(Self { pool })
    }

    // The guard returns the connection to the pool when dropped, on every exit path.
    async fn connection(&self) -> Result<PooledConnection<'_, Manager>, StoreError> {
        Ok(self.pool.get().await?)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        let mut client = self.connection().await?;
        let migrations_report = migrations::runner().run_async(&mut *client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

#[async_trait]
impl NoteRepository for PgRepository {
    async fn create_note(&self, draft: &NoteDraft) -> Result<Note, StoreError> {
        let client = self.connection().await?;
        let row = client
            .query_one(
                "INSERT INTO notes (title, content) VALUES ($1, $2) \
                 RETURNING id, title, content, created_at, updated_at",
                &[&draft.title(), &draft.content()],
            )
            .await?;

        Ok(Note::try_from(&row)?)
    }

    async fn update_note(&self, id: i64, draft: &NoteDraft) -> Result<Option<Note>, StoreError> {
        let client = self.connection().await?;
        let row = client
            .query_opt(
                "UPDATE notes SET title = $1, content = $2, updated_at = CURRENT_TIMESTAMP \
                 WHERE id = $3 RETURNING id, title, content, created_at, updated_at",
                &[&draft.title(), &draft.content(), &id],
            )
            .await?;

        Ok(row.as_ref().map(Note::try_from).transpose()?)
    }

    async fn delete_note(&self, id: i64) -> Result<bool, StoreError> {
        let client = self.connection().await?;
        let rows = client
            .execute("DELETE FROM notes WHERE id = $1", &[&id])
            .await?;

        Ok(rows == 1)
    }

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, StoreError> {
        let client = self.connection().await?;
        let row = client
            .query_opt(
                "SELECT id, title, content, created_at, updated_at FROM notes WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(Note::try_from).transpose()?)
    }

    async fn get_all_notes(&self) -> Result<Vec<Note>, StoreError> {
        let client = self.connection().await?;
        let rows = client
            .query(
                "SELECT id, title, content, created_at, updated_at FROM notes \
                 ORDER BY created_at DESC, id DESC",
                &[],
            )
            .await?;

        Ok(rows.iter().map(Note::try_from).collect::<Result<_, _>>()?)
    }
}
