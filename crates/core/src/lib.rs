//! Business logic for edura.
//!
//! Services sit between the HTTP layer and the repositories: they validate
//! input, enforce domain rules, and queue background work.

pub mod services;

pub use services::*;
