//! Redis-backed mail delivery implementation.
//!
//! Implements the core `MailDelivery` trait by queueing jobs for the
//! apalis notify worker to process.

use async_trait::async_trait;
use edura_common::AppResult;
use edura_core::{CourseEvent, MailDelivery};

use crate::jobs::NotifyJob;

/// Redis-backed mail delivery service.
///
/// Queues notification jobs to Redis for processing by the notify worker.
#[derive(Clone)]
pub struct RedisMailDelivery {
    /// Redis storage for job queue (apalis-redis).
    storage: apalis_redis::RedisStorage<NotifyJob>,
}

impl RedisMailDelivery {
    /// Create a new Redis mail delivery service.
    #[must_use]
    pub const fn new(storage: apalis_redis::RedisStorage<NotifyJob>) -> Self {
        Self { storage }
    }

    async fn push(&self, job: NotifyJob) -> AppResult<()> {
        use apalis::prelude::*;

        self.storage
            .clone()
            .push(job)
            .await
            .map_err(|e| edura_common::AppError::Queue(format!("Failed to queue job: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl MailDelivery for RedisMailDelivery {
    async fn queue_course_notification(
        &self,
        course_id: &str,
        event: CourseEvent,
    ) -> AppResult<()> {
        tracing::info!(
            course_id = %course_id,
            event = ?event,
            "Queueing course notification"
        );

        self.push(NotifyJob::course(course_id.to_string(), event))
            .await
    }

    async fn queue_broadcast(&self, subject: &str, message: &str) -> AppResult<()> {
        tracing::info!(subject = %subject, "Queueing broadcast email");

        self.push(NotifyJob::broadcast(
            subject.to_string(),
            message.to_string(),
        ))
        .await
    }
}
