//! JWT access/refresh token issuance and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};

/// Kind of token a claim set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user ID.
    pub sub: String,
    /// Username, for convenience in logs and handlers.
    pub username: String,
    /// Access or refresh.
    pub kind: TokenKind,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
}

/// An issued refresh/access token pair.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub refresh: String,
    pub access: String,
}

/// Issues and verifies JWTs signed with a shared HMAC secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    /// Create a new issuer from the auth configuration.
    #[must_use]
    pub fn new(auth: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(auth.jwt_secret.as_bytes()),
            access_ttl: Duration::seconds(auth.access_ttl_secs),
            refresh_ttl: Duration::seconds(auth.refresh_ttl_secs),
        }
    }

    /// Issue a refresh/access token pair for a user.
    pub fn issue_pair(&self, user_id: &str, username: &str) -> AppResult<TokenPair> {
        Ok(TokenPair {
            refresh: self.issue(user_id, username, TokenKind::Refresh)?,
            access: self.issue(user_id, username, TokenKind::Access)?,
        })
    }

    /// Issue a fresh access token from a valid refresh token.
    pub fn refresh_access(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self.verify(refresh_token, TokenKind::Refresh)?;
        self.issue(&claims.sub, &claims.username, TokenKind::Access)
    }

    /// Verify an access token and return its claims.
    pub fn verify_access(&self, token: &str) -> AppResult<Claims> {
        self.verify(token, TokenKind::Access)
    }

    fn issue(&self, user_id: &str, username: &str, kind: TokenKind) -> AppResult<String> {
        let now = Utc::now();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            kind,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))
    }

    fn verify(&self, token: &str, expected: TokenKind) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))?;

        // A refresh token must never pass as an access token, and vice versa.
        if data.claims.kind != expected {
            return Err(AppError::Unauthorized);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_issuer() -> TokenIssuer {
        TokenIssuer::new(&AuthConfig {
            jwt_secret: "test-secret-do-not-use".to_string(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 604_800,
        })
    }

    #[test]
    fn test_issue_pair_and_verify_access() {
        let issuer = test_issuer();
        let pair = issuer.issue_pair("user1", "alice").unwrap();

        let claims = issuer.verify_access(&pair.access).unwrap();
        assert_eq!(claims.sub, "user1");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let issuer = test_issuer();
        let pair = issuer.issue_pair("user1", "alice").unwrap();

        let result = issuer.verify_access(&pair.refresh);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_refresh_access_derives_new_access_token() {
        let issuer = test_issuer();
        let pair = issuer.issue_pair("user1", "alice").unwrap();

        let access = issuer.refresh_access(&pair.refresh).unwrap();
        let claims = issuer.verify_access(&access).unwrap();
        assert_eq!(claims.sub, "user1");
    }

    #[test]
    fn test_access_token_cannot_refresh() {
        let issuer = test_issuer();
        let pair = issuer.issue_pair("user1", "alice").unwrap();

        assert!(issuer.refresh_access(&pair.access).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let issuer = test_issuer();
        assert!(matches!(
            issuer.verify_access("not.a.token"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = test_issuer();
        let other = TokenIssuer::new(&AuthConfig {
            jwt_secret: "different-secret".to_string(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 604_800,
        });

        let pair = issuer.issue_pair("user1", "alice").unwrap();
        assert!(other.verify_access(&pair.access).is_err());
    }
}
