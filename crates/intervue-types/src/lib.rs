//! Shared domain types for Intervue.
//!
//! This crate contains the core domain types used across the Intervue
//! backend: sessions, messages, interview context, LLM request/response
//! shapes, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod error;
pub mod llm;
