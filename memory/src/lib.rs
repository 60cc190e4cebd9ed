//! # Memory Crate
//!
//! Orchestrates memory extraction for the coaching assistant: runs the
//! [`MemoryExtractor`](memory_extractor::MemoryExtractor) over a conversation turn, persists the
//! resulting notes through a [`MemoryNoteStore`](memory_core::MemoryNoteStore), and answers
//! "what is left to process" and "how much has been processed" queries.
//!
//! ## Modules
//!
//! - [`processor`] - `MemoryProcessor`: extract → persist → report, pending turns, statistics
//! - [`report`] - `ProcessRequest`, `ProcessingReport`, `ProcessingStats`
//! - [`handler`] - `MemoryHandler`: plugs the processor into a handler chain
//!
//! ## External Interactions
//!
//! - **memory-extractor**: classification of each turn (pure, synchronous)
//! - **MemoryNoteStore**: note persistence (any backend, e.g. `memory-inmemory`)
//! - **ConversationHistory**: optional; required for pending-turn listing and statistics
//! - **handler-chain**: `MemoryHandler` runs in the `after` phase with the coach reply

pub mod handler;
pub mod processor;
pub mod report;

pub use handler::{MemoryHandler, MemoryHandlerConfig};
pub use processor::{MemoryProcessor, PENDING_SCAN_LIMIT, RECENT_MEMORIES_LIMIT};
pub use report::{ProcessRequest, ProcessingReport, ProcessingStats};
