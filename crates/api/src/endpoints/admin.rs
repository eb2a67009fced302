//! Admin endpoints.

use axum::{Json, Router, extract::State, routing::post};
use edura_common::AppResult;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::{extractors::AdminUser, middleware::AppState, response::ApiResponse};

pub fn router() -> Router<AppState> {
    Router::new().route("/email", post(broadcast_email))
}

/// Broadcast email request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastEmailRequest {
    #[validate(length(min = 1, max = 256))]
    pub subject: String,

    #[validate(length(min = 1))]
    pub message: String,
}

/// Broadcast email response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastEmailResponse {
    pub queued: bool,
}

/// Queue an email to every registered user (admin only).
///
/// The fan-out happens on the worker; this endpoint only enqueues.
async fn broadcast_email(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(req): Json<BroadcastEmailRequest>,
) -> AppResult<ApiResponse<BroadcastEmailResponse>> {
    req.validate()?;

    info!(admin_id = %admin.id, subject = %req.subject, "Queueing broadcast email");

    state
        .mailer
        .queue_broadcast(&req.subject, &req.message)
        .await?;

    Ok(ApiResponse::ok(BroadcastEmailResponse { queued: true }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_request_requires_subject() {
        let req = BroadcastEmailRequest {
            subject: String::new(),
            message: "Hello".to_string(),
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_broadcast_request_valid() {
        let req = BroadcastEmailRequest {
            subject: "Maintenance".to_string(),
            message: "Back at noon".to_string(),
        };

        assert!(req.validate().is_ok());
    }
}
