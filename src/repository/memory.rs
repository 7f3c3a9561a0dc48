//! In-process repositories used by the service and router tests.

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;

use super::{NoteRepository, StoreError};
use crate::models::{Note, NoteDraft};

#[derive(Default)]
pub struct MemoryRepository {
    notes: Mutex<Vec<Note>>,
    last_id: Mutex<i64>,
    calls: AtomicUsize,
}

impl MemoryRepository {
    /// Number of repository calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl NoteRepository for MemoryRepository {
    async fn create_note(&self, draft: &NoteDraft) -> Result<Note, StoreError> {
        self.record_call();

        let mut last_id = self.last_id.lock().unwrap();
        *last_id += 1;

        let now = Utc::now();
        let note = Note {
            id: *last_id,
            title: draft.title().to_string(),
            content: draft.content().to_string(),
            created_at: now,
            updated_at: now,
        };
        self.notes.lock().unwrap().push(note.clone());

        Ok(note)
    }

    async fn update_note(&self, id: i64, draft: &NoteDraft) -> Result<Option<Note>, StoreError> {
        self.record_call();

        let mut notes = self.notes.lock().unwrap();
        Ok(notes.iter_mut().find(|note| note.id == id).map(|note| {
            note.title = draft.title().to_string();
            note.content = draft.content().to_string();
            note.updated_at = Utc::now().max(note.updated_at);
            note.clone()
        }))
    }

    async fn delete_note(&self, id: i64) -> Result<bool, StoreError> {
        self.record_call();

        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|note| note.id != id);

        Ok(notes.len() != before)
    }

    async fn get_one_note(&self, id: i64) -> Result<Option<Note>, StoreError> {
        self.record_call();

        let notes = self.notes.lock().unwrap();
        Ok(notes.iter().find(|note| note.id == id).cloned())
    }

    async fn get_all_notes(&self) -> Result<Vec<Note>, StoreError> {
        self.record_call();

        let mut notes = self.notes.lock().unwrap().clone();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(notes)
    }
}

/// Fails every call the way an exhausted pool does.
pub struct UnavailableRepository;

#[async_trait]
impl NoteRepository for UnavailableRepository {
    async fn create_note(&self, _draft: &NoteDraft) -> Result<Note, StoreError> {
        Err(StoreError::Pool(bb8::RunError::TimedOut))
    }

    async fn update_note(&self, _id: i64, _draft: &NoteDraft) -> Result<Option<Note>, StoreError> {
        Err(StoreError::Pool(bb8::RunError::TimedOut))
    }

    async fn delete_note(&self, _id: i64) -> Result<bool, StoreError> {
        Err(StoreError::Pool(bb8::RunError::TimedOut))
    }

    async fn get_one_note(&self, _id: i64) -> Result<Option<Note>, StoreError> {
        Err(StoreError::Pool(bb8::RunError::TimedOut))
    }

    async fn get_all_notes(&self) -> Result<Vec<Note>, StoreError> {
        Err(StoreError::Pool(bb8::RunError::TimedOut))
    }
}
