use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    models::NoteDraft,
    repository::{NoteRepository, StoreError},
};

use std::sync::Arc;

pub const TITLE_REQUIRED: &str = "Title is required";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("Note not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub const fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    fn draft(title: Option<String>, content: Option<String>) -> Result<NoteDraft, ServiceError> {
        NoteDraft::new(title, content).ok_or(ServiceError::Validation(TITLE_REQUIRED))
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, ServiceError> {
        let draft = Self::draft(request.title, request.content)?;
        let note = self.repo.create_note(&draft).await?;

        tracing::debug!("created note {}", note.id);

        Ok(note.into())
    }

    pub async fn update_note(
        &self,
        id: i64,
        request: UpdateNoteRequest,
    ) -> Result<NoteResponse, ServiceError> {
        let draft = Self::draft(request.title, request.content)?;

        self.repo
            .update_note(id, &draft)
            .await?
            .map(Into::into)
            .ok_or(ServiceError::NotFound)
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), ServiceError> {
        if self.repo.delete_note(id).await? {
            tracing::debug!("deleted note {id}");
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }

    pub async fn get_one_note(&self, id: i64) -> Result<NoteResponse, ServiceError> {
        self.repo
            .get_one_note(id)
            .await?
            .map(Into::into)
            .ok_or(ServiceError::NotFound)
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, ServiceError> {
        Ok(self
            .repo
            .get_all_notes()
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
