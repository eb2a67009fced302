//! Background job queue for edura.
//!
//! This crate provides asynchronous mail fan-out using Redis:
//!
//! - **Jobs**: course notifications and admin broadcasts
//! - **Workers**: concurrent job execution with Apalis

pub mod delivery_impl;
pub mod jobs;
pub mod workers;

pub use delivery_impl::RedisMailDelivery;
pub use jobs::*;
pub use workers::*;
