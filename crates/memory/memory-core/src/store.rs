//! # Collaborator traits
//!
//! [`MemoryNoteStore`] persists notes; [`ConversationHistory`] lists prior turns. Both are
//! implemented by storage backends (in-memory for tests and the CLI).

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::MemoryError;
use crate::interaction::{Interaction, Sender};
use crate::note::{MemoryNote, NoteQuery};

/// Trait for storing and retrieving memory notes.
#[async_trait]
pub trait MemoryNoteStore: Send + Sync {
    /// Inserts a new note and returns the stored value. No uniqueness constraint is enforced.
    async fn insert(&self, note: MemoryNote) -> Result<MemoryNote, MemoryError>;

    /// Retrieves a note by id. Returns `None` if not found.
    async fn get(&self, id: Uuid) -> Result<Option<MemoryNote>, MemoryError>;

    /// Replaces an existing note. Fails with `NotFound` if the id is unknown for that owner.
    async fn update(&self, note: MemoryNote) -> Result<MemoryNote, MemoryError>;

    /// Deletes a note owned by `owner_id`. Returns whether a note was removed.
    async fn delete(&self, id: Uuid, owner_id: &str) -> Result<bool, MemoryError>;

    /// Lists an owner's notes matching `query`, newest first, paged by `limit`/`offset`.
    async fn list(&self, owner_id: &str, query: &NoteQuery) -> Result<Vec<MemoryNote>, MemoryError>;

    /// Returns the first note extracted from the given interaction, if any.
    async fn find_by_source(&self, interaction_id: &str)
        -> Result<Option<MemoryNote>, MemoryError>;

    /// Counts the distinct source interactions referenced by an owner's notes (any status).
    /// A turn that produced several notes counts once.
    async fn count_source_interactions(&self, owner_id: &str) -> Result<usize, MemoryError>;
}

/// Trait for reading and appending conversation turns.
#[async_trait]
pub trait ConversationHistory: Send + Sync {
    /// Appends an interaction.
    async fn append(&self, interaction: Interaction) -> Result<(), MemoryError>;

    /// Returns the newest `limit` interactions of the owner in chronological order.
    async fn recent(&self, owner_id: &str, limit: usize) -> Result<Vec<Interaction>, MemoryError>;

    /// Returns the newest `limit` interactions sent by `sender`, newest first.
    async fn list_by_sender(
        &self,
        owner_id: &str,
        sender: Sender,
        limit: usize,
    ) -> Result<Vec<Interaction>, MemoryError>;

    /// Counts the owner's interactions sent by `sender`.
    async fn count_by_sender(&self, owner_id: &str, sender: Sender) -> Result<usize, MemoryError>;
}
