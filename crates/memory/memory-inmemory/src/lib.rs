//! # In-Memory Stores
//!
//! In-memory implementations of the [`MemoryNoteStore`] and [`ConversationHistory`] traits from
//! `memory-core`.
//!
//! Data is lost on restart; both types are meant for tests, the CLI and prototyping. They are
//! cheap to clone: clones share the same underlying data through `Arc<RwLock<..>>`.
//!
//! ## Example
//!
//! ```rust
//! use memory_core::{MemoryNoteStore, MemoryNote, NewNote, MemoryCategory, NoteQuery};
//! use memory_inmemory::InMemoryNoteStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), memory_core::MemoryError> {
//!     let store = InMemoryNoteStore::new();
//!     let note = MemoryNote::from_new(
//!         "owner-1",
//!         NewNote {
//!             title: None,
//!             content: "Leer 20 páginas al día".to_string(),
//!             category: MemoryCategory::Goals,
//!             tags: vec![],
//!             priority: 6,
//!             metadata: Default::default(),
//!         },
//!     )?;
//!     store.insert(note).await?;
//!
//!     let notes = store.list("owner-1", &NoteQuery::default()).await?;
//!     assert_eq!(notes.len(), 1);
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use memory_core::{
    ConversationHistory, Interaction, MemoryError, MemoryNote, MemoryNoteStore, NoteQuery, Sender,
};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// In-memory note store. Notes are kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNoteStore {
    notes: Arc<RwLock<Vec<MemoryNote>>>,
}

impl InMemoryNoteStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of notes across all owners.
    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Removes every note.
    pub async fn clear(&self) {
        self.notes.write().await.clear();
    }
}

/// Owner's notes, newest first. Notes with equal timestamps keep reverse insertion order.
fn newest_first<'a>(notes: &'a [MemoryNote], owner_id: &str) -> Vec<&'a MemoryNote> {
    let mut owned: Vec<&MemoryNote> = notes
        .iter()
        .rev()
        .filter(|n| n.owner_id == owner_id)
        .collect();
    owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    owned
}

#[async_trait]
impl MemoryNoteStore for InMemoryNoteStore {
    async fn insert(&self, note: MemoryNote) -> Result<MemoryNote, MemoryError> {
        let mut notes = self.notes.write().await;
        debug!(note_id = %note.id, owner_id = %note.owner_id, "InMemoryNoteStore: insert");
        notes.push(note.clone());
        Ok(note)
    }

    async fn get(&self, id: Uuid) -> Result<Option<MemoryNote>, MemoryError> {
        let notes = self.notes.read().await;
        Ok(notes.iter().find(|n| n.id == id).cloned())
    }

    async fn update(&self, note: MemoryNote) -> Result<MemoryNote, MemoryError> {
        let mut notes = self.notes.write().await;
        let existing = notes
            .iter_mut()
            .find(|n| n.id == note.id && n.owner_id == note.owner_id)
            .ok_or_else(|| MemoryError::NotFound(note.id.to_string()))?;

        let mut updated = note;
        updated.created_at = existing.created_at;
        updated.updated_at = Utc::now();
        *existing = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid, owner_id: &str) -> Result<bool, MemoryError> {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|n| !(n.id == id && n.owner_id == owner_id));
        Ok(notes.len() != before)
    }

    async fn list(&self, owner_id: &str, query: &NoteQuery) -> Result<Vec<MemoryNote>, MemoryError> {
        let notes = self.notes.read().await;
        Ok(newest_first(&notes, owner_id)
            .into_iter()
            .filter(|n| query.matches(n))
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn find_by_source(
        &self,
        interaction_id: &str,
    ) -> Result<Option<MemoryNote>, MemoryError> {
        let notes = self.notes.read().await;
        Ok(notes
            .iter()
            .find(|n| n.source_interaction_id.as_deref() == Some(interaction_id))
            .cloned())
    }

    async fn count_source_interactions(&self, owner_id: &str) -> Result<usize, MemoryError> {
        let notes = self.notes.read().await;
        let sources: HashSet<&str> = notes
            .iter()
            .filter(|n| n.owner_id == owner_id)
            .filter_map(|n| n.source_interaction_id.as_deref())
            .collect();
        Ok(sources.len())
    }
}

/// In-memory conversation history. Interactions are kept in append order, which is treated as
/// chronological.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationHistory {
    interactions: Arc<RwLock<Vec<Interaction>>>,
}

impl InMemoryConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of interactions across all owners.
    pub async fn len(&self) -> usize {
        self.interactions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ConversationHistory for InMemoryConversationHistory {
    async fn append(&self, interaction: Interaction) -> Result<(), MemoryError> {
        self.interactions.write().await.push(interaction);
        Ok(())
    }

    async fn recent(&self, owner_id: &str, limit: usize) -> Result<Vec<Interaction>, MemoryError> {
        let interactions = self.interactions.read().await;
        let mut newest: Vec<Interaction> = interactions
            .iter()
            .rev()
            .filter(|i| i.owner_id == owner_id)
            .take(limit)
            .cloned()
            .collect();
        newest.reverse();
        Ok(newest)
    }

    async fn list_by_sender(
        &self,
        owner_id: &str,
        sender: Sender,
        limit: usize,
    ) -> Result<Vec<Interaction>, MemoryError> {
        let interactions = self.interactions.read().await;
        Ok(interactions
            .iter()
            .rev()
            .filter(|i| i.owner_id == owner_id && i.sender == sender)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_by_sender(&self, owner_id: &str, sender: Sender) -> Result<usize, MemoryError> {
        let interactions = self.interactions.read().await;
        Ok(interactions
            .iter()
            .filter(|i| i.owner_id == owner_id && i.sender == sender)
            .count())
    }
}

#[cfg(test)]
mod lib_test;
