//! User service: registration, login, token refresh.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use edura_common::{
    AppError, AppResult, IdGenerator, TokenIssuer, TokenPair, validation::validate_password,
};
use edura_db::{
    entities::{profile, user},
    repositories::{ProfileRepository, UserRepository},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use serde::Deserialize;
use validator::Validate;

/// User service for registration and authentication.
#[derive(Clone)]
pub struct UserService {
    db: Arc<DatabaseConnection>,
    user_repo: UserRepository,
    profile_repo: ProfileRepository,
    tokens: TokenIssuer,
    id_gen: IdGenerator,
}

/// Input for registering a new account.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 128))]
    pub username: String,

    #[validate(length(min = 1, max = 128))]
    pub first_name: String,

    #[validate(length(min = 1, max = 128))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    pub password: String,

    /// Must match `password` exactly.
    pub password2: String,
}

/// Input for logging in.
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub fn new(
        db: Arc<DatabaseConnection>,
        user_repo: UserRepository,
        profile_repo: ProfileRepository,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            db,
            user_repo,
            profile_repo,
            tokens,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new account.
    ///
    /// The user row and its empty profile are inserted in one transaction;
    /// a failure on either leaves no partial account behind.
    pub async fn register(&self, input: RegisterInput) -> AppResult<user::Model> {
        input.validate()?;

        validate_password(&input.password)?;
        if input.password != input.password2 {
            return Err(AppError::Validation("passwords do not match".to_string()));
        }

        if self.user_repo.username_exists(&input.username).await? {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }
        if self.user_repo.email_exists(&input.email).await? {
            return Err(AppError::Validation(
                "Email already registered".to_string(),
            ));
        }

        let password_hash = hash_password(&input.password)?;
        let user_id = self.id_gen.generate();
        let now = chrono::Utc::now();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let user_model = user::ActiveModel {
            id: Set(user_id.clone()),
            username: Set(input.username),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            email: Set(input.email),
            password_hash: Set(password_hash),
            is_admin: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        let user = user_model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Empty profile; the user fills it in later.
        let profile_model = profile::ActiveModel {
            user_id: Set(user_id),
            created_at: Set(now.into()),
            ..Default::default()
        };

        profile_model
            .insert(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(user)
    }

    /// Authenticate a user and issue a refresh/access pair.
    ///
    /// A wrong username and a wrong password produce the same error.
    pub async fn login(&self, input: LoginInput) -> AppResult<(user::Model, TokenPair)> {
        let user = self
            .user_repo
            .find_by_username(&input.username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        let pair = self.tokens.issue_pair(&user.id, &user.username)?;
        Ok((user, pair))
    }

    /// Issue a fresh access token from a valid refresh token.
    pub fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        self.tokens.refresh_access(refresh_token)
    }

    /// Get a user by ID.
    pub async fn get(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// List users (paginated).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<user::Model>> {
        self.user_repo.find_all(limit, offset).await
    }
}

/// Hash a password using Argon2.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use edura_common::config::AuthConfig;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn test_issuer() -> TokenIssuer {
        TokenIssuer::new(&AuthConfig {
            jwt_secret: "test-secret-do-not-use".to_string(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 604_800,
        })
    }

    fn create_test_user(id: &str, username: &str, password: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: format!("{username}@example.com"),
            password_hash: hash_password(password).unwrap(),
            is_admin: false,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_service(db: Arc<DatabaseConnection>) -> UserService {
        UserService::new(
            db.clone(),
            UserRepository::new(db.clone()),
            ProfileRepository::new(db),
            test_issuer(),
        )
    }

    // Password hashing

    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password_123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(hash.len() > 50);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(verify_password("test_password_123", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(verify_password("test", "invalid_hash").is_err());
    }

    #[test]
    fn test_hash_password_different_each_time() {
        let hash1 = hash_password("same_password").unwrap();
        let hash2 = hash_password("same_password").unwrap();

        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);

        assert!(verify_password("same_password", &hash1).unwrap());
        assert!(verify_password("same_password", &hash2).unwrap());
    }

    // Registration validation

    fn valid_register_input() -> RegisterInput {
        RegisterInput {
            username: "newuser".to_string(),
            first_name: "New".to_string(),
            last_name: "User".to_string(),
            email: "new@example.com".to_string(),
            password: "Password1!".to_string(),
            password2: "Password1!".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = create_test_service(db);

        let mut input = valid_register_input();
        input.email = "not-an-email".to_string();

        let result = service.register(input).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = create_test_service(db);

        let mut input = valid_register_input();
        input.password = "alllowercase1!".to_string();
        input.password2 = "alllowercase1!".to_string();

        let result = service.register(input).await;
        match result {
            // The policy message comes through as-is, not wrapped in a
            // second "Validation error:" prefix.
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Password must contain at least one uppercase letter");
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_passwords() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = create_test_service(db);

        let mut input = valid_register_input();
        input.password2 = "Different1!".to_string();

        let result = service.register(input).await;
        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("match")),
            _ => panic!("Expected Validation error"),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        // First count query: username check (0), second: email check (1)
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([
                    [maplit_count(0)],
                    [maplit_count(1)],
                ])
                .into_connection(),
        );
        let service = create_test_service(db);

        let err = service.register(valid_register_input()).await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        match err {
            AppError::Validation(msg) => assert!(msg.contains("Email")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_username() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit_count(1)]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let err = service.register(valid_register_input()).await.unwrap_err();
        assert_eq!(err.error_code(), "CONFLICT");
    }

    #[tokio::test]
    async fn test_register_creates_user_and_profile() {
        let user = create_test_user("user1", "newuser", "Password1!");
        let profile = profile::Model {
            user_id: "user1".to_string(),
            photo_url: None,
            full_name: None,
            phone_number: None,
            address: None,
            telegram: None,
            created_at: Utc::now().into(),
            updated_at: None,
        };

        // Uniqueness checks pass, then the user and profile inserts run
        // inside the transaction; exhausting exactly these mock results
        // means both inserts executed.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit_count(0)], [maplit_count(0)]])
                .append_query_results([[user.clone()]])
                .append_query_results([[profile]])
                .append_exec_results([
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );
        let service = create_test_service(db);

        let created = service.register(valid_register_input()).await.unwrap();
        assert_eq!(created.username, "newuser");
        assert!(!created.is_admin);
    }

    fn maplit_count(n: i64) -> std::collections::BTreeMap<&'static str, sea_orm::Value> {
        std::collections::BTreeMap::from([("num_items", sea_orm::Value::BigInt(Some(n)))])
    }

    // Login

    #[tokio::test]
    async fn test_login_success_issues_pair() {
        let user = create_test_user("user1", "testuser", "Password1!");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let (logged_in, pair) = service
            .login(LoginInput {
                username: "testuser".to_string(),
                password: "Password1!".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(logged_in.id, "user1");
        assert!(!pair.access.is_empty());
        assert!(!pair.refresh.is_empty());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let user = create_test_user("user1", "testuser", "Password1!");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service
            .login(LoginInput {
                username: "testuser".to_string(),
                password: "WrongPassword1!".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_login_unknown_username_same_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = create_test_service(db);

        let result = service
            .login(LoginInput {
                username: "nobody".to_string(),
                password: "Password1!".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_refresh_round_trip() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = create_test_service(db);

        let pair = test_issuer().issue_pair("user1", "testuser").unwrap();
        assert!(service.refresh(&pair.refresh).is_ok());
    }

    #[test]
    fn test_refresh_rejects_access_token() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = create_test_service(db);

        let pair = test_issuer().issue_pair("user1", "testuser").unwrap();
        assert!(matches!(
            service.refresh(&pair.access),
            Err(AppError::Unauthorized)
        ));
    }
}
