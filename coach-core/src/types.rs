//! Core types: user, message, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account that owns a conversation. `id` is the opaque owner identity used by the stores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    /// Verified number in `whatsapp:+<digits>` form, when known.
    pub phone_number: Option<String>,
    /// Free-form coaching focus label from the profile (e.g. "salud", "carrera").
    pub coaching_focus: Option<String>,
    /// Free-form tone label from the user settings (e.g. "motivational").
    pub communication_tone: Option<String>,
}

impl User {
    /// Creates a user with only an id set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            phone_number: None,
            coaching_focus: None,
            communication_tone: None,
        }
    }
}

/// A single chat message exchanged with the coach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub content: String,
    pub direction: MessageDirection,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates an incoming message from `user` with a generated id and the current timestamp.
    pub fn incoming(user: User, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user,
            content: content.into(),
            direction: MessageDirection::Incoming,
            created_at: Utc::now(),
        }
    }
}

/// Direction of the message (from user or from coach).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MessageDirection {
    Incoming,
    Outgoing,
}

/// Handler result for the chain. `Reply(text)` carries the coach reply so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach the reply text.
    Reply(String),
}

/// Single handler concept: optional before / handle / after. The chain runs all before → handle
/// until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
