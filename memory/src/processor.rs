//! # Memory processor
//!
//! Runs the extractor over a turn, persists the extractions as notes and reports what happened.
//! Also answers the two queries used to drive manual processing: which user turns have no note
//! yet, and how many have been processed.

use std::sync::Arc;

use chrono::Utc;
use memory_core::{
    ConversationHistory, Interaction, MemoryError, MemoryExtraction, MemoryNote, MemoryNoteStore,
    NoteQuery, Sender,
};
use memory_extractor::MemoryExtractor;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::report::{ProcessRequest, ProcessingReport, ProcessingStats};

/// Number of newest notes returned in [`ProcessingStats::recent_memories`].
pub const RECENT_MEMORIES_LIMIT: usize = 5;
/// Default number of user turns scanned by [`MemoryProcessor::pending_interactions`].
pub const PENDING_SCAN_LIMIT: usize = 50;

/// Extract → persist → report.
pub struct MemoryProcessor {
    extractor: Arc<MemoryExtractor>,
    store: Arc<dyn MemoryNoteStore>,
    history: Option<Arc<dyn ConversationHistory>>,
}

impl MemoryProcessor {
    pub fn new(extractor: Arc<MemoryExtractor>, store: Arc<dyn MemoryNoteStore>) -> Self {
        Self {
            extractor,
            store,
            history: None,
        }
    }

    /// Attaches the conversation history used by pending-turn listing and statistics.
    pub fn with_history(mut self, history: Arc<dyn ConversationHistory>) -> Self {
        self.history = Some(history);
        self
    }

    pub fn extractor(&self) -> &MemoryExtractor {
        &self.extractor
    }

    pub fn store(&self) -> &Arc<dyn MemoryNoteStore> {
        &self.store
    }

    pub fn history(&self) -> Option<&Arc<dyn ConversationHistory>> {
        self.history.as_ref()
    }

    /// Processes a turn on explicit request. Stored notes are flagged `processed_manually`.
    pub async fn process(&self, request: ProcessRequest) -> Result<ProcessingReport, MemoryError> {
        self.process_turn(request, true).await
    }

    /// Shared by [`process`](Self::process) and the chat handler; `manual` becomes the
    /// `processed_manually` metadata flag.
    #[instrument(skip(self, request), fields(owner_id = %request.owner_id))]
    pub(crate) async fn process_turn(
        &self,
        request: ProcessRequest,
        manual: bool,
    ) -> Result<ProcessingReport, MemoryError> {
        if request.turn.user_message.trim().is_empty() {
            return Err(MemoryError::EmptyMessage);
        }

        info!(
            owner_id = %request.owner_id,
            force = request.force,
            has_coach_response = request.turn.coach_response.is_some(),
            "step: memory processing started"
        );

        let extractions = self.extractor.extract(&request.turn);
        let mut report = ProcessingReport {
            total_extractions: extractions.len(),
            ..Default::default()
        };

        for extraction in &extractions {
            if !(extraction.should_store || request.force) {
                report.skipped += 1;
                continue;
            }

            let note = build_note(&request, extraction, manual);
            match self.store.insert(note).await {
                Ok(saved) => {
                    debug!(
                        note_id = %saved.id,
                        category = %saved.category,
                        priority = saved.priority,
                        "memory note saved"
                    );
                    report.saved_notes += 1;
                    report.notes.push(saved);
                }
                Err(e) => {
                    error!(
                        error = %e,
                        owner_id = %request.owner_id,
                        category = %extraction.category,
                        "Failed to save memory note"
                    );
                }
            }
        }

        info!(
            owner_id = %request.owner_id,
            extraction_count = report.total_extractions,
            saved_notes = report.saved_notes,
            skipped = report.skipped,
            "step: memory processing finished"
        );

        Ok(report)
    }

    /// Newest `limit` user-sent interactions that no stored note was extracted from, newest first.
    #[instrument(skip(self))]
    pub async fn pending_interactions(
        &self,
        owner_id: &str,
        limit: usize,
    ) -> Result<Vec<Interaction>, MemoryError> {
        let history = self.history.as_ref().ok_or(MemoryError::HistoryUnavailable)?;
        let candidates = history.list_by_sender(owner_id, Sender::User, limit).await?;

        let mut pending = Vec::new();
        for interaction in candidates {
            if self.store.find_by_source(&interaction.id).await?.is_none() {
                pending.push(interaction);
            }
        }

        debug!(owner_id, pending = pending.len(), "pending interactions listed");
        Ok(pending)
    }

    /// Processing statistics for one owner.
    #[instrument(skip(self))]
    pub async fn processing_stats(&self, owner_id: &str) -> Result<ProcessingStats, MemoryError> {
        let history = self.history.as_ref().ok_or(MemoryError::HistoryUnavailable)?;

        let total_interactions = history.count_by_sender(owner_id, Sender::User).await?;
        let processed_interactions = self.store.count_source_interactions(owner_id).await?;
        let recent_memories = self
            .store
            .list(
                owner_id,
                &NoteQuery {
                    limit: RECENT_MEMORIES_LIMIT,
                    ..Default::default()
                },
            )
            .await?;

        Ok(ProcessingStats {
            total_interactions,
            processed_interactions,
            processing_rate: ProcessingStats::rate(processed_interactions, total_interactions),
            recent_memories,
        })
    }
}

fn build_note(request: &ProcessRequest, extraction: &MemoryExtraction, manual: bool) -> MemoryNote {
    let mut note = MemoryNote::from_extraction(
        request.owner_id.as_str(),
        extraction,
        request.source_interaction_id.clone(),
    );
    note.metadata
        .insert("processed_manually".to_string(), Value::Bool(manual));
    note.metadata.insert(
        "processed_at".to_string(),
        Value::String(Utc::now().to_rfc3339()),
    );
    note.metadata
        .insert("ai_processed".to_string(), Value::Bool(true));
    note
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_core::{ConversationTurn, MemoryCategory};

    #[test]
    fn test_build_note_merges_processing_flags() {
        let extractor = MemoryExtractor::new();
        let request = ProcessRequest::new(
            "owner-1",
            ConversationTurn::new("Tengo que pagar la luz mañana"),
        )
        .from_interaction("msg-1");
        let extraction = extractor.extract(&request.turn).remove(0);

        let note = build_note(&request, &extraction, false);
        assert_eq!(note.category, MemoryCategory::Reminders);
        assert_eq!(note.source_interaction_id.as_deref(), Some("msg-1"));
        assert_eq!(note.metadata["context"], "recordatorio_solicitado");
        assert_eq!(note.metadata["reminderDate"], "mañana");
        assert_eq!(note.metadata["processed_manually"], false);
        assert_eq!(note.metadata["ai_processed"], true);
        assert!(note.metadata["processed_at"].is_string());
    }
}
