//! Integration tests for [`memory::MemoryHandler`] running inside a handler chain.
//!
//! Covers: turn recording in history, extraction of user and coach sides after a Reply,
//! the `process_coach_replies` switch, and failure isolation.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use coach_core::{Handler, HandlerResponse, Message, User};
use common::{processor_with, user_message, FlakyNoteStore};
use handler_chain::HandlerChain;
use memory::{MemoryHandler, MemoryHandlerConfig};
use memory_core::{ConversationHistory, MemoryCategory, MemoryNoteStore, NoteQuery, Sender};
use memory_inmemory::{InMemoryConversationHistory, InMemoryNoteStore};

struct CannedReply(&'static str);

#[async_trait]
impl Handler for CannedReply {
    async fn handle(&self, _message: &Message) -> coach_core::Result<HandlerResponse> {
        Ok(HandlerResponse::Reply(self.0.to_string()))
    }
}

/// **Test: A full turn is recorded and both sides are extracted.**
///
/// **Setup:** Chain of MemoryHandler and a handler replying with a coach suggestion.
/// **Action:** `chain.handle(&message)` with a project message.
/// **Expected:** Reply returned; history has user and coach turns; two notes sourced from the
/// message id and flagged as automatic processing.
#[tokio::test]
async fn test_memory_handler_processes_turn_after_reply() {
    let store = InMemoryNoteStore::new();
    let history = InMemoryConversationHistory::new();
    let processor = Arc::new(processor_with(Arc::new(store.clone()), history.clone()));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(MemoryHandler::with_processor(processor)))
        .add_handler(Arc::new(CannedReply("Te sugiero dividirlo en fases.")));

    let message = user_message("owner-1", "trabajo en un proyecto");
    let response = chain.handle(&message).await.unwrap();
    assert_eq!(
        response,
        HandlerResponse::Reply("Te sugiero dividirlo en fases.".to_string())
    );

    let recent = history.recent("owner-1", 10).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, message.id);
    assert_eq!(recent[0].sender, Sender::User);
    assert_eq!(recent[1].sender, Sender::Coach);

    let notes = store.list("owner-1", &NoteQuery::default()).await.unwrap();
    assert_eq!(notes.len(), 2);
    for note in &notes {
        assert_eq!(note.source_interaction_id.as_deref(), Some(message.id.as_str()));
        assert_eq!(note.metadata["processed_manually"], false);
    }
}

/// **Test: Coach replies are ignored when disabled.**
///
/// **Setup:** MemoryHandler with `process_coach_replies = false`.
/// **Action:** Same turn as above.
/// **Expected:** Only the project note is stored.
#[tokio::test]
async fn test_memory_handler_can_skip_coach_replies() {
    let store = InMemoryNoteStore::new();
    let processor = Arc::new(processor_with(
        Arc::new(store.clone()),
        InMemoryConversationHistory::new(),
    ));
    let handler = MemoryHandler::new(
        processor,
        MemoryHandlerConfig {
            process_coach_replies: false,
            force: false,
        },
    );

    let chain = HandlerChain::new()
        .add_handler(Arc::new(handler))
        .add_handler(Arc::new(CannedReply("Te sugiero dividirlo en fases.")));

    chain
        .handle(&user_message("owner-1", "trabajo en un proyecto"))
        .await
        .unwrap();

    let notes = store.list("owner-1", &NoteQuery::default()).await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].category, MemoryCategory::Projects);
}

/// **Test: Store failures never fail the chain.**
///
/// **Setup:** Store rejecting goals.
/// **Action:** `chain.handle` with a goal message.
/// **Expected:** Chain returns the reply; the insert was attempted; nothing stored.
#[tokio::test]
async fn test_memory_handler_swallows_store_errors() {
    let store = FlakyNoteStore::rejecting(MemoryCategory::Goals);
    let processor = Arc::new(processor_with(
        Arc::new(store.clone()),
        InMemoryConversationHistory::new(),
    ));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(MemoryHandler::with_processor(processor)))
        .add_handler(Arc::new(CannedReply("¡Bien!")));

    let response = chain
        .handle(&user_message("owner-1", "Quiero aprender a nadar este verano"))
        .await
        .unwrap();

    assert_eq!(response, HandlerResponse::Reply("¡Bien!".to_string()));
    assert_eq!(store.insert_calls(), 1);
    assert_eq!(store.stored().await, 0);
}

/// **Test: Empty messages are recorded but not processed.**
///
/// **Setup:** MemoryHandler alone in the chain.
/// **Action:** `chain.handle` with a blank message.
/// **Expected:** Continue; no notes; the user turn is in the history.
#[tokio::test]
async fn test_memory_handler_skips_empty_message() {
    let store = FlakyNoteStore::new();
    let history = InMemoryConversationHistory::new();
    let processor = Arc::new(processor_with(Arc::new(store.clone()), history.clone()));

    let chain = HandlerChain::new().add_handler(Arc::new(MemoryHandler::with_processor(processor)));

    let mut user = User::new("owner-1");
    user.coaching_focus = Some("salud".to_string());
    let response = chain.handle(&Message::incoming(user, "  ")).await.unwrap();

    assert_eq!(response, HandlerResponse::Continue);
    assert_eq!(store.insert_calls(), 0);
    assert_eq!(history.len().await, 1);
}
