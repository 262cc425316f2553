use tokio::task;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::repositories::user::{hash_password, verify_password};
use crate::db::{Store, User};

/// Role assigned to self-registered accounts
pub const DEFAULT_ROLE: &str = "user";

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Intentionally covers both unknown-username and wrong-password.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("This account has been blocked")]
    Blocked,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Username is already taken")]
    UsernameTaken,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Credential verification and account creation over the user store.
pub struct AuthService {
    store: Store,
    security: SecurityConfig,
}

impl AuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    /// Decide a login attempt: unknown user and wrong password collapse into
    /// the same generic rejection; blocked accounts are rejected distinctly
    /// even with correct credentials.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, LoginError> {
        let Some((user, password_hash)) = self
            .store
            .get_user_by_username_with_hash(username)
            .await
            .map_err(LoginError::Internal)?
        else {
            return Err(LoginError::InvalidCredentials);
        };

        if user.is_blocked {
            info!(username, "Rejected login for blocked account");
            return Err(LoginError::Blocked);
        }

        let is_valid = verify_password(password, &password_hash)
            .await
            .map_err(LoginError::Internal)?;

        if !is_valid {
            return Err(LoginError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Create an account: uniqueness check first, then Argon2id hash, then
    /// insert with the default role.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, RegisterError> {
        let existing = self
            .store
            .get_user_by_username(username)
            .await
            .map_err(RegisterError::Internal)?;

        if existing.is_some() {
            return Err(RegisterError::UsernameTaken);
        }

        let password = password.to_string();
        let security = self.security.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, &security))
            .await
            .map_err(|e| RegisterError::Internal(anyhow::anyhow!("Hashing task panicked: {e}")))?
            .map_err(RegisterError::Internal)?;

        let user = self
            .store
            .create_user(username, &password_hash, DEFAULT_ROLE)
            .await
            .map_err(RegisterError::Internal)?;

        info!(username = %user.username, id = user.id, "Registered new user");

        Ok(user)
    }
}
