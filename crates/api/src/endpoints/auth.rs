//! Authentication endpoints.

use axum::{Json, Router, extract::State, routing::{get, post}};
use chrono::{DateTime, Utc};
use edura_common::AppResult;
use edura_core::{LoginInput, RegisterInput};
use edura_db::entities::user;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/me", get(me))
}

/// User response, without the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at.into(),
        }
    }
}

/// Create a new account with an empty profile.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.register(req).await?;

    info!(user_id = %user.id, username = %user.username, "Registered new user");

    Ok(ApiResponse::ok(UserResponse::from(user)))
}

/// Login response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserResponse,
    pub refresh: String,
    pub access: String,
}

/// Sign in and receive a refresh/access token pair.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginInput>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let (user, pair) = state.user_service.login(req).await?;

    Ok(ApiResponse::ok(LoginResponse {
        user: UserResponse::from(user),
        refresh: pair.refresh,
        access: pair.access,
    }))
}

/// Refresh request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Refresh response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access: String,
}

/// Exchange a refresh token for a fresh access token.
async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> AppResult<ApiResponse<RefreshResponse>> {
    let access = state.user_service.refresh(&req.refresh)?;

    Ok(ApiResponse::ok(RefreshResponse { access }))
}

/// The authenticated user's own account.
async fn me(AuthUser(user): AuthUser) -> ApiResponse<UserResponse> {
    ApiResponse::ok(UserResponse::from(user))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_hides_password_hash() {
        let user = user::Model {
            id: "user1".to_string(),
            username: "alice".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2$secret".to_string(),
            is_admin: false,
            created_at: Utc::now().into(),
            updated_at: None,
        };

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(json.contains("\"username\":\"alice\""));
        assert!(!json.contains("argon2"));
    }
}
