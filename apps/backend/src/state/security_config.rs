use std::env;
use std::fmt;

use crate::error::AppError;

/// Environment variable holding the interpellation token signing secret.
pub const TOKEN_SECRET_ENV: &str = "INTERPELLATE_TOKEN_SECRET";

/// Signing material for interpellation tokens.
///
/// Constructed once at startup and shared read-only. There is no
/// `Default`: a config only exists if a non-empty secret was supplied.
#[derive(Clone)]
pub struct SecurityConfig {
    token_secret: Vec<u8>,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given HMAC secret.
    ///
    /// Errors with `AppError::Config` when the secret is empty.
    pub fn new(token_secret: impl Into<Vec<u8>>) -> Result<Self, AppError> {
        let token_secret = token_secret.into();
        if token_secret.is_empty() {
            return Err(AppError::config(format!("{TOKEN_SECRET_ENV} must not be empty")));
        }
        Ok(Self { token_secret })
    }

    /// Load the secret from `INTERPELLATE_TOKEN_SECRET`.
    pub fn from_env() -> Result<Self, AppError> {
        let secret = env::var(TOKEN_SECRET_ENV)
            .map_err(|_| AppError::config(format!("{TOKEN_SECRET_ENV} must be set")))?;
        Self::new(secret.trim().as_bytes())
    }

    pub fn token_secret(&self) -> &[u8] {
        &self.token_secret
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("token_secret", &"[REDACTED]")
            .finish()
    }
}
