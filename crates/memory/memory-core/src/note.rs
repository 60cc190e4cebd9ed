//! Stored memory notes and note queries.
//!
//! A [`MemoryNote`] is what the note store persists, either built from a [`MemoryExtraction`]
//! by the orchestrator or created manually from a [`NewNote`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::MemoryError;
use crate::types::{MemoryCategory, MemoryExtraction};

/// Maximum content length (in characters) accepted for a manually created note.
pub const MAX_NOTE_CONTENT_CHARS: usize = 5000;

/// Lifecycle status of a note.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoteStatus {
    #[default]
    Active,
    Completed,
    Archived,
}

impl fmt::Display for NoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NoteStatus::Active => "active",
            NoteStatus::Completed => "completed",
            NoteStatus::Archived => "archived",
        };
        f.write_str(s)
    }
}

impl FromStr for NoteStatus {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(NoteStatus::Active),
            "completed" => Ok(NoteStatus::Completed),
            "archived" => Ok(NoteStatus::Archived),
            other => Err(MemoryError::InvalidStatus(other.to_string())),
        }
    }
}

/// A persisted memory note owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryNote {
    pub id: Uuid,
    pub owner_id: String,
    pub title: Option<String>,
    pub content: String,
    pub category: MemoryCategory,
    pub tags: Vec<String>,
    pub priority: u8,
    pub status: NoteStatus,
    /// Id of the chat interaction this note was extracted from, if any.
    pub source_interaction_id: Option<String>,
    pub metadata: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MemoryNote {
    /// Builds an active note from an extraction. The extraction metadata keys are copied; callers
    /// add processing flags on top.
    pub fn from_extraction(
        owner_id: impl Into<String>,
        extraction: &MemoryExtraction,
        source_interaction_id: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            title: extraction.title.clone(),
            content: extraction.content.clone(),
            category: extraction.category,
            tags: extraction.tags.clone(),
            priority: extraction.priority,
            status: NoteStatus::Active,
            source_interaction_id,
            metadata: extraction.metadata.to_json_map(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Validates and builds a manually created note.
    ///
    /// Content is trimmed and must be non-empty and at most [`MAX_NOTE_CONTENT_CHARS`]; a blank
    /// title becomes `None`; priority is clamped to 0..=10.
    pub fn from_new(owner_id: impl Into<String>, new: NewNote) -> Result<Self, MemoryError> {
        let content = new.content.trim();
        if content.is_empty() {
            return Err(MemoryError::InvalidNote("content is required".to_string()));
        }
        if new.content.chars().count() > MAX_NOTE_CONTENT_CHARS {
            return Err(MemoryError::InvalidNote(format!(
                "content is too long (max {} characters)",
                MAX_NOTE_CONTENT_CHARS
            )));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            title: new
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            content: content.to_string(),
            category: new.category,
            tags: new.tags,
            priority: new.priority.clamp(0, 10) as u8,
            status: NoteStatus::Active,
            source_interaction_id: None,
            metadata: new.metadata,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Input for a manually created note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNote {
    pub title: Option<String>,
    pub content: String,
    #[serde(default = "default_category")]
    pub category: MemoryCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

fn default_category() -> MemoryCategory {
    MemoryCategory::General
}

/// Filter and paging for listing an owner's notes. Results are ordered newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteQuery {
    pub category: Option<MemoryCategory>,
    pub status: NoteStatus,
    /// Case-insensitive substring matched against title and content.
    pub search: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for NoteQuery {
    fn default() -> Self {
        Self {
            category: None,
            status: NoteStatus::Active,
            search: None,
            limit: 50,
            offset: 0,
        }
    }
}

impl NoteQuery {
    /// Returns true if `note` passes the category, status and search filters (paging excluded).
    pub fn matches(&self, note: &MemoryNote) -> bool {
        if note.status != self.status {
            return false;
        }
        if let Some(category) = self.category {
            if note.category != category {
                return false;
            }
        }
        match &self.search {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                note.content.to_lowercase().contains(&needle)
                    || note
                        .title
                        .as_deref()
                        .is_some_and(|t| t.to_lowercase().contains(&needle))
            }
            _ => true,
        }
    }
}
