//! # coach-core
//!
//! Core types and traits for the coaching assistant: [`Handler`], [`Message`], [`User`],
//! [`HandlerResponse`], error types and tracing initialization. Transport-agnostic; used by
//! handler-chain, middleware and the memory orchestrator.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{CoachError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{Handler, HandlerResponse, Message, MessageDirection, User};
