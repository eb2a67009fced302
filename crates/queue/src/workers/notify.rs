//! Notify worker.
//!
//! Fans a queued notification out to every registered user by email,
//! rendering the message per recipient.

use apalis::prelude::*;
use edura_core::{CourseEvent, EmailService};
use edura_db::repositories::{CourseRepository, UserRepository};
use tracing::{error, info, warn};

use crate::jobs::{NotifyJob, NotifyKind};

/// Context for the notify worker.
#[derive(Clone)]
pub struct NotifyContext {
    pub user_repo: UserRepository,
    pub course_repo: CourseRepository,
    pub email_service: EmailService,
}

impl NotifyContext {
    /// Create a new notify context.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        course_repo: CourseRepository,
        email_service: EmailService,
    ) -> Self {
        Self {
            user_repo,
            course_repo,
            email_service,
        }
    }
}

/// What a job resolved to, before per-recipient rendering.
enum NotifyContent {
    Course { name: String, event: CourseEvent },
    Broadcast { subject: String, message: String },
}

/// Worker function for sending notification emails.
///
/// # Errors
/// Returns an error if the notification cannot be resolved or no email
/// could be sent.
pub async fn notify_worker(job: NotifyJob, ctx: Data<NotifyContext>) -> Result<(), Error> {
    match send_notification(&job, &ctx).await {
        Ok(sent) => {
            info!(sent = sent, "Notification emails sent");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Failed to process notification job");
            Err(Error::Failed(e.into()))
        }
    }
}

async fn send_notification(
    job: &NotifyJob,
    ctx: &NotifyContext,
) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
    let content = match &job.kind {
        NotifyKind::Course { course_id, event } => {
            // A course deleted between queueing and processing is not worth
            // a retry loop; drop the job.
            let Some(course) = ctx
                .course_repo
                .find_by_id(course_id)
                .await
                .map_err(|e| format!("Failed to load course: {e}"))?
            else {
                warn!(course_id = %course_id, "Course gone, dropping notification");
                return Ok(0);
            };

            NotifyContent::Course {
                name: course.name,
                event: *event,
            }
        }
        NotifyKind::Broadcast { subject, message } => NotifyContent::Broadcast {
            subject: subject.clone(),
            message: message.clone(),
        },
    };

    let recipients = ctx
        .user_repo
        .all_recipients()
        .await
        .map_err(|e| format!("Failed to load recipients: {e}"))?;

    let (sent, total) = fan_out(&ctx.email_service, &content, &recipients).await;

    if sent == 0 && total > 0 {
        return Err(format!("All {total} sends failed").into());
    }

    Ok(sent)
}

/// Subject and body for one recipient.
fn render(email: &EmailService, content: &NotifyContent, recipient: &str) -> (String, String) {
    match content {
        NotifyContent::Course { name, event } => match event {
            CourseEvent::Created => email.render_course_created(name, recipient),
            CourseEvent::Updated => email.render_course_updated(name, recipient),
        },
        NotifyContent::Broadcast { subject, message } => {
            (subject.clone(), email.render_broadcast(message, recipient))
        }
    }
}

/// One send attempt per recipient; returns (sent, total).
async fn fan_out(
    email: &EmailService,
    content: &NotifyContent,
    recipients: &[(String, String)],
) -> (usize, usize) {
    let total = recipients.len();
    let mut sent = 0;

    for (address, name) in recipients {
        let (subject, body) = render(email, content, name);
        match email.send(address, &subject, &body).await {
            Ok(()) => sent += 1,
            // One bad address must not stop the fan-out
            Err(e) => warn!(to = %address, error = %e, "Failed to send notification email"),
        }
    }

    (sent, total)
}
