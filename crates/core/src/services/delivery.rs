//! Mail fan-out abstraction.
//!
//! Provides an abstraction for queueing notification emails.
//! The actual implementation is provided by the queue crate.

use async_trait::async_trait;
use edura_common::AppResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What happened to a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseEvent {
    /// A new course was added.
    Created,
    /// An existing course changed.
    Updated,
}

/// Trait for queueing notification emails.
///
/// This allows the core services to queue mail fan-out without directly
/// depending on the queue implementation.
#[async_trait]
pub trait MailDelivery: Send + Sync {
    /// Queue a course notification for every registered user.
    async fn queue_course_notification(
        &self,
        course_id: &str,
        event: CourseEvent,
    ) -> AppResult<()>;

    /// Queue an admin broadcast for every registered user.
    async fn queue_broadcast(&self, subject: &str, message: &str) -> AppResult<()>;
}

/// A no-op implementation of `MailDelivery` for testing or when the queue
/// is not running.
#[derive(Clone, Default)]
pub struct NoOpMailDelivery;

#[async_trait]
impl MailDelivery for NoOpMailDelivery {
    async fn queue_course_notification(
        &self,
        _course_id: &str,
        _event: CourseEvent,
    ) -> AppResult<()> {
        Ok(())
    }

    async fn queue_broadcast(&self, _subject: &str, _message: &str) -> AppResult<()> {
        Ok(())
    }
}

/// Wrapper for boxed `MailDelivery` trait object.
pub type MailDeliveryService = Arc<dyn MailDelivery>;
