use anyhow::{Context, Result};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::config::{AuthConfig, ServerConfig};

/// Claims carried by every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Numeric user ID (matches `users.id`)
    pub user_id: i32,

    pub username: String,

    /// Role marker ("user" / "admin")
    pub auth: String,

    /// Expiry (Unix timestamp, seconds)
    pub exp: i64,

    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
}

/// Issues and verifies signed session tokens and builds the cookie that
/// carries them. The signing secret comes from mandatory configuration;
/// there is no fallback default.
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_days: i64,
    cookie_name: String,
    secure_cookies: bool,
}

impl TokenManager {
    #[must_use]
    pub fn new(auth: &AuthConfig, server: &ServerConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(auth.token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(auth.token_secret.as_bytes()),
            ttl_days: auth.token_ttl_days,
            cookie_name: auth.cookie_name.clone(),
            secure_cookies: server.secure_cookies,
        }
    }

    pub fn issue(&self, user_id: i32, username: &str, auth: &str) -> Result<String> {
        let now = chrono::Utc::now().timestamp();

        let claims = Claims {
            user_id,
            username: username.to_string(),
            auth: auth.to_string(),
            exp: now + self.ttl_days * 24 * 60 * 60,
            iat: now,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .context("Failed to sign session token")
    }

    /// `None` on any decode, signature or expiry failure; never an error.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .ok()
    }

    /// Build the HTTP-only session cookie wrapping a freshly issued token.
    #[must_use]
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), token))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .secure(self.secure_cookies)
            .max_age(time::Duration::days(self.ttl_days))
            .build()
    }

    /// Cookie that instructs the browser to drop the session.
    #[must_use]
    pub fn clear_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), ""))
            .http_only(true)
            .path("/")
            .build()
    }

    /// Claims of the current session, if any valid token is present.
    #[must_use]
    pub fn current_user(&self, jar: &CookieJar) -> Option<Claims> {
        jar.get(&self.cookie_name)
            .and_then(|cookie| self.verify(cookie.value()))
    }

    /// Like `current_user`, but an absent or invalid session redirects the
    /// caller to the login page.
    pub fn require_user(&self, jar: &CookieJar) -> Result<Claims, ApiError> {
        self.current_user(jar).ok_or(ApiError::LoginRequired)
    }
}
