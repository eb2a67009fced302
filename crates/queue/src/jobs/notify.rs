//! Mail notification job.

use edura_core::CourseEvent;
use serde::{Deserialize, Serialize};

/// What a notification job should send.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotifyKind {
    /// A course was created or updated; the worker renders the email from
    /// the current course row.
    Course { course_id: String, event: CourseEvent },

    /// An admin broadcast with a fixed subject and message.
    Broadcast { subject: String, message: String },
}

/// Job to email every registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyJob {
    pub kind: NotifyKind,
}

impl NotifyJob {
    /// Create a course notification job.
    #[must_use]
    pub const fn course(course_id: String, event: CourseEvent) -> Self {
        Self {
            kind: NotifyKind::Course { course_id, event },
        }
    }

    /// Create a broadcast job.
    #[must_use]
    pub const fn broadcast(subject: String, message: String) -> Self {
        Self {
            kind: NotifyKind::Broadcast { subject, message },
        }
    }
}
