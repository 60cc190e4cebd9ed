//! # Memory Core
//!
//! Core types and traits for memory notes.
//! Used by the `memory-extractor`, `memory-inmemory` and `memory` crates.
//!
//! ## Modules
//!
//! - [`types`] - MemoryCategory, MemoryExtraction, ExtractionMetadata, ConversationTurn, SettingsContext
//! - [`note`] - MemoryNote, NewNote, NoteStatus, NoteQuery
//! - [`interaction`] - Interaction, Sender
//! - [`store`] - MemoryNoteStore and ConversationHistory traits
//! - [`error`] - MemoryError

pub mod error;
pub mod interaction;
pub mod note;
pub mod store;
pub mod types;

pub use error::MemoryError;
pub use interaction::{Interaction, Sender};
pub use note::{MemoryNote, NewNote, NoteQuery, NoteStatus, MAX_NOTE_CONTENT_CHARS};
pub use store::{ConversationHistory, MemoryNoteStore};
pub use types::{
    ConversationTurn, ExtractionMetadata, MemoryCategory, MemoryExtraction, SettingsContext,
};
