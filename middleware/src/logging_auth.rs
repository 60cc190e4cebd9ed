//! Handlers for logging and optional auth (owner allowlist).

use std::collections::HashSet;

use async_trait::async_trait;
use coach_core::{Handler, HandlerError, HandlerResponse, Message, Result};
use tracing::{debug, error, info, instrument};

/// Logs each message in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            owner_id = %message.user.id,
            name = %message.user.name.as_deref().unwrap_or("unknown"),
            message_id = %message.id,
            content_chars = message.content.chars().count(),
            "Received message"
        );
        debug!(message_content = %message.content, "Message content");
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        debug!(
            message_id = %message.id,
            response = ?response,
            "Processed message"
        );
        Ok(())
    }
}

/// Fails the chain with Unauthorized when the owner id is not in the allowlist. An empty
/// allowlist admits everyone.
#[derive(Debug, Clone, Default)]
pub struct AuthHandler {
    allowed_owners: HashSet<String>,
}

impl AuthHandler {
    /// Creates a handler that allows only the given owner ids.
    pub fn new<I, S>(allowed_owners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_owners: allowed_owners.into_iter().map(Into::into).collect(),
        }
    }

    /// Handler that admits every owner.
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn is_allowed(&self, owner_id: &str) -> bool {
        self.allowed_owners.is_empty() || self.allowed_owners.contains(owner_id)
    }
}

#[async_trait]
impl Handler for AuthHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        let owner_id = message.user.id.as_str();
        if self.is_allowed(owner_id) {
            info!(owner_id, "Owner authorized");
            Ok(true)
        } else {
            error!(owner_id, "Unauthorized access attempt");
            Err(HandlerError::Unauthorized.into())
        }
    }
}
