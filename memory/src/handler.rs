//! # Memory handler
//!
//! Handler that records the conversation and extracts memory notes from each turn. In `before` the
//! user message is appended to the history (when the processor has one); in `after` the coach
//! reply is appended and the whole turn is processed. Failures are logged, never propagated.

use std::sync::Arc;

use async_trait::async_trait;
use coach_core::{Handler, HandlerResponse, Message, Result};
use memory_core::{ConversationTurn, Interaction, Sender, SettingsContext};
use tracing::{error, info, instrument};

use crate::processor::MemoryProcessor;
use crate::report::ProcessRequest;

/// Configuration for [`MemoryHandler`].
#[derive(Debug, Clone)]
pub struct MemoryHandlerConfig {
    /// Pass the coach reply (`HandlerResponse::Reply`) to the extractor.
    pub process_coach_replies: bool,
    /// Store every extraction regardless of `should_store`.
    pub force: bool,
}

impl Default for MemoryHandlerConfig {
    fn default() -> Self {
        Self {
            process_coach_replies: true,
            force: false,
        }
    }
}

pub struct MemoryHandler {
    processor: Arc<MemoryProcessor>,
    config: MemoryHandlerConfig,
}

impl MemoryHandler {
    pub fn new(processor: Arc<MemoryProcessor>, config: MemoryHandlerConfig) -> Self {
        Self { processor, config }
    }

    /// Handler with the default configuration.
    pub fn with_processor(processor: Arc<MemoryProcessor>) -> Self {
        Self::new(processor, MemoryHandlerConfig::default())
    }

    /// Builds the turn for `message`, attaching the reply and the user's settings labels.
    pub(crate) fn turn_for(&self, message: &Message, response: &HandlerResponse) -> ConversationTurn {
        let mut turn = ConversationTurn::new(message.content.as_str());
        if self.config.process_coach_replies {
            if let HandlerResponse::Reply(text) = response {
                turn = turn.with_coach_response(text.as_str());
            }
        }
        let user = &message.user;
        if user.coaching_focus.is_some() || user.communication_tone.is_some() {
            turn = turn.with_settings(SettingsContext {
                coaching_focus: user.coaching_focus.clone(),
                communication_tone: user.communication_tone.clone(),
            });
        }
        turn
    }
}

#[async_trait]
impl Handler for MemoryHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        if let Some(history) = self.processor.history() {
            let interaction = Interaction {
                id: message.id.clone(),
                owner_id: message.user.id.clone(),
                sender: Sender::User,
                content: message.content.clone(),
                created_at: message.created_at,
            };
            if let Err(e) = history.append(interaction).await {
                error!(error = %e, "Failed to record user message in history");
            } else {
                info!(
                    owner_id = %message.user.id,
                    message_id = %message.id,
                    "step: MemoryHandler before done, user message recorded"
                );
            }
        }
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        info!(
            owner_id = %message.user.id,
            has_reply = matches!(response, HandlerResponse::Reply(_)),
            "step: MemoryHandler after"
        );

        if let (Some(history), HandlerResponse::Reply(text)) = (self.processor.history(), response) {
            let reply = Interaction::new(message.user.id.as_str(), Sender::Coach, text.as_str());
            if let Err(e) = history.append(reply).await {
                error!(error = %e, "Failed to record coach reply in history");
            }
        }

        if message.content.trim().is_empty() {
            info!(owner_id = %message.user.id, "step: MemoryHandler after done (empty message, skip)");
            return Ok(());
        }

        let request = ProcessRequest::new(message.user.id.as_str(), self.turn_for(message, response))
            .forced(self.config.force)
            .from_interaction(message.id.as_str());

        match self.processor.process_turn(request, false).await {
            Ok(report) => info!(
                owner_id = %message.user.id,
                extraction_count = report.total_extractions,
                saved_notes = report.saved_notes,
                "step: MemoryHandler after done"
            ),
            Err(e) => error!(error = %e, "Memory extraction failed"),
        }

        Ok(())
    }
}
