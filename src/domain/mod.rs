//! Domain layer - Core business objects
//!
//! This layer contains:
//! - Entities: Requests, responses and provider settings

pub mod entities;
