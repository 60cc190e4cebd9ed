//! Stand-in for the conversational model: replies with a fixed text.

use async_trait::async_trait;
use coach_core::{Handler, HandlerResponse, Message, Result};
use tracing::{info, instrument};

/// Replies with the configured text, or continues when there is none.
pub struct CannedReplyHandler {
    reply: Option<String>,
}

impl CannedReplyHandler {
    pub fn new(reply: Option<String>) -> Self {
        Self {
            reply: reply.filter(|r| !r.trim().is_empty()),
        }
    }
}

#[async_trait]
impl Handler for CannedReplyHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        match &self.reply {
            Some(text) => {
                info!(owner_id = %message.user.id, reply_chars = text.chars().count(), "step: canned reply");
                Ok(HandlerResponse::Reply(text.clone()))
            }
            None => Ok(HandlerResponse::Continue),
        }
    }
}
