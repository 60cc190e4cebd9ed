//! Shared helpers for memory crate integration tests.
//!
//! `FlakyNoteStore` wraps the in-memory store, counts insert calls and can be told to reject
//! inserts of one category, which exercises the processor's failure accounting.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use coach_core::{Message, User};
use memory::MemoryProcessor;
use memory_core::{MemoryCategory, MemoryError, MemoryNote, MemoryNoteStore, NoteQuery};
use memory_extractor::MemoryExtractor;
use memory_inmemory::{InMemoryConversationHistory, InMemoryNoteStore};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct FlakyNoteStore {
    inner: InMemoryNoteStore,
    reject: Option<MemoryCategory>,
    insert_calls: Arc<AtomicUsize>,
}

impl FlakyNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts of `category` fail with a storage error.
    pub fn rejecting(category: MemoryCategory) -> Self {
        Self {
            reject: Some(category),
            ..Default::default()
        }
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub async fn stored(&self) -> usize {
        self.inner.len().await
    }
}

#[async_trait]
impl MemoryNoteStore for FlakyNoteStore {
    async fn insert(&self, note: MemoryNote) -> Result<MemoryNote, MemoryError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject == Some(note.category) {
            return Err(MemoryError::Storage("insert rejected".to_string()));
        }
        self.inner.insert(note).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<MemoryNote>, MemoryError> {
        self.inner.get(id).await
    }

    async fn update(&self, note: MemoryNote) -> Result<MemoryNote, MemoryError> {
        self.inner.update(note).await
    }

    async fn delete(&self, id: Uuid, owner_id: &str) -> Result<bool, MemoryError> {
        self.inner.delete(id, owner_id).await
    }

    async fn list(&self, owner_id: &str, query: &NoteQuery) -> Result<Vec<MemoryNote>, MemoryError> {
        self.inner.list(owner_id, query).await
    }

    async fn find_by_source(
        &self,
        interaction_id: &str,
    ) -> Result<Option<MemoryNote>, MemoryError> {
        self.inner.find_by_source(interaction_id).await
    }

    async fn count_source_interactions(&self, owner_id: &str) -> Result<usize, MemoryError> {
        self.inner.count_source_interactions(owner_id).await
    }
}

/// Processor over the given store, with an in-memory history.
pub fn processor_with(
    store: Arc<dyn MemoryNoteStore>,
    history: InMemoryConversationHistory,
) -> MemoryProcessor {
    MemoryProcessor::new(Arc::new(MemoryExtractor::new()), store).with_history(Arc::new(history))
}

pub fn user_message(owner: &str, content: &str) -> Message {
    Message::incoming(User::new(owner), content)
}
