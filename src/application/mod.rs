//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Provider routing, prompt construction, assistant features
//! - Errors: Provider, routing and configuration errors

pub mod errors;
pub mod services;
