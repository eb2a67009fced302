//! HTTP API layer for edura.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: accounts, courses, lessons, homework, ratings, comments
//! - **Extractors**: JWT authentication, admin gating
//! - **Middleware**: bearer-token resolution
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::{AppState, auth_middleware};
