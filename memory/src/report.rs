//! Request and result types of the memory processor.

use memory_core::{ConversationTurn, MemoryNote};
use serde::Serialize;

/// One processing request: a turn owned by `owner_id`.
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    pub owner_id: String,
    pub turn: ConversationTurn,
    /// Store every extraction even when the extractor declined it.
    pub force: bool,
    /// Chat interaction the turn came from; copied onto each stored note.
    pub source_interaction_id: Option<String>,
}

impl ProcessRequest {
    pub fn new(owner_id: impl Into<String>, turn: ConversationTurn) -> Self {
        Self {
            owner_id: owner_id.into(),
            turn,
            force: false,
            source_interaction_id: None,
        }
    }

    pub fn forced(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn from_interaction(mut self, interaction_id: impl Into<String>) -> Self {
        self.source_interaction_id = Some(interaction_id.into());
        self
    }
}

/// Outcome of one `process` call.
///
/// `saved_notes + skipped <= total_extractions`; the difference is the number of failed inserts.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingReport {
    pub total_extractions: usize,
    pub saved_notes: usize,
    pub skipped: usize,
    pub notes: Vec<MemoryNote>,
}

/// Per-owner processing statistics.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStats {
    /// User-sent interactions in the history.
    pub total_interactions: usize,
    /// Distinct interactions that at least one note was extracted from.
    pub processed_interactions: usize,
    /// `processed / total * 100`, rounded and capped at 100; 0 when there are no interactions.
    pub processing_rate: u32,
    pub recent_memories: Vec<MemoryNote>,
}

impl ProcessingStats {
    pub(crate) fn rate(processed: usize, total: usize) -> u32 {
        if total == 0 {
            return 0;
        }
        ((processed as f64 / total as f64) * 100.0).round().min(100.0) as u32
    }
}
