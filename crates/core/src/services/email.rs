//! Email sending over SMTP.

use edura_common::{AppError, AppResult, config::EmailConfig};
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};

/// Email service.
///
/// Without an `[email]` configuration section the service is disabled and
/// every send is a no-op; the rest of the system keeps working.
#[derive(Clone)]
pub struct EmailService {
    config: Option<EmailConfig>,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl EmailService {
    /// Create a new email service.
    pub fn new(config: Option<EmailConfig>) -> AppResult<Self> {
        let transport = match &config {
            Some(email) => {
                let mut builder =
                    AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&email.smtp_host)
                        .map_err(|e| AppError::Mail(format!("Invalid SMTP relay: {e}")))?
                        .port(email.smtp_port);

                if let (Some(username), Some(password)) =
                    (&email.smtp_username, &email.smtp_password)
                {
                    builder =
                        builder.credentials(Credentials::new(username.clone(), password.clone()));
                }

                Some(builder.build())
            }
            None => None,
        };

        Ok(Self { config, transport })
    }

    /// Check if email sending is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Send one email. A disabled service silently drops it.
    ///
    /// A recipient address that does not parse is an error regardless of
    /// whether a transport is configured.
    pub async fn send(&self, to: &str, subject: &str, html_body: &str) -> AppResult<()> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| AppError::Mail(format!("Invalid recipient address: {e}")))?;

        let (Some(config), Some(transport)) = (&self.config, &self.transport) else {
            tracing::debug!(to = %to, subject = %subject, "Email disabled, dropping message");
            return Ok(());
        };

        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_address)
            .parse()
            .map_err(|e| AppError::Mail(format!("Invalid from address: {e}")))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(
                strip_tags(html_body),
                html_body.to_string(),
            ))
            .map_err(|e| AppError::Mail(format!("Failed to build message: {e}")))?;

        transport
            .send(message)
            .await
            .map_err(|e| AppError::Mail(format!("SMTP send failed: {e}")))?;

        Ok(())
    }

    /// Subject and body for a new-course notification, addressed to one
    /// recipient.
    #[must_use]
    pub fn render_course_created(&self, course_name: &str, recipient: &str) -> (String, String) {
        let subject = format!("New course added: {course_name}");
        let body = self.wrap_html(&format!(
            "<p>Hi {},</p><p>A new course is available on {}:</p><p><strong>{}</strong></p>",
            recipient,
            self.platform_name(),
            course_name
        ));
        (subject, body)
    }

    /// Subject and body for a course-update notification, addressed to one
    /// recipient.
    #[must_use]
    pub fn render_course_updated(&self, course_name: &str, recipient: &str) -> (String, String) {
        let subject = format!("Course updated: {course_name}");
        let body = self.wrap_html(&format!(
            "<p>Hi {},</p><p>The course <strong>{}</strong> on {} was updated.</p>",
            recipient,
            course_name,
            self.platform_name()
        ));
        (subject, body)
    }

    /// Body for an admin broadcast; the subject comes from the admin.
    #[must_use]
    pub fn render_broadcast(&self, message: &str, recipient: &str) -> String {
        self.wrap_html(&format!("<p>Hi {recipient},</p><p>{message}</p>"))
    }

    fn platform_name(&self) -> &str {
        self.config
            .as_ref()
            .map_or("Edura", |c| c.platform_name.as_str())
    }

    /// Wrap HTML content in a basic email template.
    fn wrap_html(&self, content: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <style>
        body {{ font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px; }}
    </style>
</head>
<body>
    {}
    <hr style="margin-top: 40px; border: none; border-top: 1px solid #e9ecef;">
    <p style="font-size: 12px; color: #6c757d;">This email was sent from {}.</p>
</body>
</html>"#,
            content,
            self.platform_name()
        )
    }
}

/// Derive a plain-text body from an HTML one.
///
/// Drops tags, keeps text content. Not a full HTML parser; good enough for
/// the markup this service generates.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;

    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }

    // Collapse the whitespace the dropped tags leave behind
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
