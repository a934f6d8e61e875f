//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - LLM: Hosted AI provider clients
//! - Adapters: Interactive front ends (console)

pub mod config;
pub mod llm;
pub mod adapters;
