//! Memory error types.
//!
//! Returned by note stores, conversation history backends and the memory orchestrator.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid note: {0}")]
    InvalidNote(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid status: {0}")]
    InvalidStatus(String),
    #[error("User message is required")]
    EmptyMessage,
    #[error("Conversation history is not configured")]
    HistoryUnavailable,
}
