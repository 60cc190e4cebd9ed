//! # Memory Extractor
//!
//! Decides, for one conversational turn, whether it contains durable information worth a memory
//! note, which category it belongs to, and which title, tags, priority and metadata to attach.
//!
//! Two independent analyses run per turn:
//! - **User message**: short/greeting filter, ordered keyword rules (goals → reminders → ideas →
//!   projects → feelings, first match wins), then a `general` fallback for substantial text.
//! - **Coach reply**: an action-suggestion phrase yields a fixed "coach plan" reminder.
//!
//! The extractor is pure and synchronous: no I/O, no shared mutable state. All regexes are
//! compiled once by [`MemoryExtractor::new`] and run in linear time (the `regex` crate does not
//! backtrack).
//!
//! ## Logging
//!
//! Emits `tracing` debug events with the detected category and priority; message content is not
//! logged here.
//!
//! ## External Interactions
//!
//! - **memory-core**: ConversationTurn, MemoryExtraction, MemoryCategory, ExtractionMetadata

mod config;
mod extractor;
pub mod fields;
mod rules;

pub use config::{ExtractorConfig, MAX_TITLE_CHARS};
pub use extractor::{MemoryExtractor, COACH_PLAN_PRIORITY, COACH_PLAN_TITLE, GENERAL_PRIORITY};
pub use rules::{CategoryRule, COACH_ACTION_PHRASES, GREETINGS};
