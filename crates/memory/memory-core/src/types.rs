//! # Core Types
//!
//! This module defines the values exchanged with the memory extractor.
//!
//! ## ConversationTurn
//!
//! One user message, optionally paired with the coach reply, plus the owner's settings labels.
//!
//! ## MemoryCategory
//!
//! Closed set of note categories. `Insights` is accepted by stores but never produced by the
//! extractor.
//!
//! ## MemoryExtraction
//!
//! A candidate durable note derived from a turn, with the store/don't-store decision attached.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MemoryError;

/// Category of a memory note.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MemoryCategory {
    Goals,
    Reminders,
    Ideas,
    Projects,
    Feelings,
    Insights,
    General,
}

impl MemoryCategory {
    /// Every category, in declaration order.
    pub const ALL: [MemoryCategory; 7] = [
        MemoryCategory::Goals,
        MemoryCategory::Reminders,
        MemoryCategory::Ideas,
        MemoryCategory::Projects,
        MemoryCategory::Feelings,
        MemoryCategory::Insights,
        MemoryCategory::General,
    ];

    /// Wire name, also used as the category tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryCategory::Goals => "goals",
            MemoryCategory::Reminders => "reminders",
            MemoryCategory::Ideas => "ideas",
            MemoryCategory::Projects => "projects",
            MemoryCategory::Feelings => "feelings",
            MemoryCategory::Insights => "insights",
            MemoryCategory::General => "general",
        }
    }
}

impl fmt::Display for MemoryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemoryCategory {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MemoryCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| MemoryError::InvalidCategory(s.to_string()))
    }
}

/// Owner settings that travel with a turn.
///
/// Both labels are opaque and are not validated against any reference table. Classification does
/// not currently read them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsContext {
    pub coaching_focus: Option<String>,
    pub communication_tone: Option<String>,
}

/// One conversational turn: the inbound user message and, optionally, the coach reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    pub user_message: String,
    #[serde(default)]
    pub coach_response: Option<String>,
    #[serde(default)]
    pub settings_context: Option<SettingsContext>,
}

impl ConversationTurn {
    pub fn new(user_message: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            coach_response: None,
            settings_context: None,
        }
    }

    pub fn with_coach_response(mut self, coach_response: impl Into<String>) -> Self {
        self.coach_response = Some(coach_response.into());
        self
    }

    pub fn with_settings(mut self, settings: SettingsContext) -> Self {
        self.settings_context = Some(settings);
        self
    }
}

/// Structured metadata attached to an extraction.
///
/// `context` is always set by the extractor; the other keys are present only when their pattern
/// matched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotional_state: Option<String>,
}

impl ExtractionMetadata {
    /// Metadata with only the classification context label set.
    pub fn with_context(context: &str) -> Self {
        Self {
            context: Some(context.to_string()),
            ..Default::default()
        }
    }

    /// Converts the present keys into a JSON object (absent keys are omitted).
    pub fn to_json_map(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}

/// Candidate memory note produced from one side of a turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryExtraction {
    pub should_store: bool,
    pub category: MemoryCategory,
    pub title: Option<String>,
    /// Verbatim source text; never truncated.
    pub content: String,
    /// Always starts with the category tag (or the fixed coach-plan tags).
    pub tags: Vec<String>,
    /// Clamped to 1..=10.
    pub priority: u8,
    pub metadata: ExtractionMetadata,
}
