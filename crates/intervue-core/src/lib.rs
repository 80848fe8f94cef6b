//! Business logic for Intervue.
//!
//! This crate owns the in-memory session store and the interview
//! orchestrator, and defines the "ports" (the LLM provider and transcriber
//! traits) that the infrastructure layer implements. It depends only on
//! `intervue-types` -- never on `intervue-infra` or any network crate.

pub mod interview;
pub mod llm;
pub mod session;
