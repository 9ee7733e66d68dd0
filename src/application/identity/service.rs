//! User management service — application-layer orchestration
//!
//! All user-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, User};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::infrastructure::storage::Store;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub expires_in: i64,
}

/// User service — orchestrates registration and authentication.
///
/// Holds the persistence seam as `Arc<dyn Store>` so the concrete backing
/// (flat file, in-memory) stays swappable.
pub struct UserService {
    store: Arc<dyn Store>,
    jwt_config: JwtConfig,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>, jwt_config: JwtConfig) -> Self {
        Self { store, jwt_config }
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new user.
    ///
    /// Username uniqueness is exact and case-sensitive. The plaintext
    /// password is hashed immediately and never stored or logged.
    pub async fn register(&self, username: &str, password: &str) -> DomainResult<User> {
        let mut doc = self.store.load().await;

        if doc.users.iter().any(|u| u.username == username) {
            return Err(DomainError::DuplicateUser(username.to_string()));
        }

        let password_hash = hash_password(password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        let user = User {
            id: self.store.new_id(),
            username: username.to_string(),
            password_hash,
        };
        doc.users.push(user.clone());
        self.store.save(&doc).await;

        info!(user_id = %user.id, username = %user.username, "New user registered");
        Ok(user)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by username + password and return a JWT.
    ///
    /// An unknown username and a wrong password are indistinguishable to the
    /// caller; both fail with `InvalidCredentials`.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<AuthResult> {
        let doc = self.store.load().await;

        let Some(user) = doc.users.iter().find(|u| u.username == username) else {
            return Err(DomainError::InvalidCredentials);
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        let token = create_token(&user.id, &self.jwt_config)
            .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;

        info!(user_id = %user.id, "User logged in");
        Ok(AuthResult {
            token,
            expires_in: self.jwt_config.expiration_hours * 3600,
        })
    }
}
