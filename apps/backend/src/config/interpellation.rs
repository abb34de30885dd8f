//! Interpellation flow configuration.
//!
//! Loaded once from the environment at startup:
//!
//! - `INTERPELLATE_TOKEN_TTL_MINUTES` (default 1440, must be > 0)
//! - `PUBLIC_BASE_URL` (default `http://localhost:3000`)
//! - `INTERPELLATE_SUCCESS_PATH` (default `/interpeller/merci`)
//! - `INTERPELLATE_ERROR_PATH` (default `/interpeller/lien-invalide`)

use std::env;

use crate::error::AppError;
use crate::interpellation::token::DEFAULT_TTL_MINUTES;

pub const TTL_ENV: &str = "INTERPELLATE_TOKEN_TTL_MINUTES";
pub const BASE_URL_ENV: &str = "PUBLIC_BASE_URL";
pub const SUCCESS_PATH_ENV: &str = "INTERPELLATE_SUCCESS_PATH";
pub const ERROR_PATH_ENV: &str = "INTERPELLATE_ERROR_PATH";

/// Path of the confirmation endpoint, relative to the public base URL.
pub const CONFIRM_PATH: &str = "/api/interpellate/confirm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpellationConfig {
    pub token_ttl_minutes: i64,
    /// Origin the confirmation links point at, without trailing slash.
    pub public_base_url: String,
    pub success_path: String,
    pub error_path: String,
}

impl Default for InterpellationConfig {
    fn default() -> Self {
        Self {
            token_ttl_minutes: DEFAULT_TTL_MINUTES,
            public_base_url: "http://localhost:3000".to_string(),
            success_path: "/interpeller/merci".to_string(),
            error_path: "/interpeller/lien-invalide".to_string(),
        }
    }
}

impl InterpellationConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys use defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let token_ttl_minutes = match get(TTL_ENV) {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|ttl| *ttl > 0)
                .ok_or_else(|| AppError::config(format!("{TTL_ENV} must be a positive integer")))?,
            None => defaults.token_ttl_minutes,
        };

        let public_base_url = match get(BASE_URL_ENV) {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                url.trim_end_matches('/').to_string()
            }
            Some(_) => {
                return Err(AppError::config(format!(
                    "{BASE_URL_ENV} must start with http:// or https://"
                )))
            }
            None => defaults.public_base_url,
        };

        let success_path = path_or_default(get(SUCCESS_PATH_ENV), SUCCESS_PATH_ENV, defaults.success_path)?;
        let error_path = path_or_default(get(ERROR_PATH_ENV), ERROR_PATH_ENV, defaults.error_path)?;

        Ok(Self {
            token_ttl_minutes,
            public_base_url,
            success_path,
            error_path,
        })
    }

    /// Link embedded in the confirmation email.
    ///
    /// Tokens only use the base64url alphabet and `.`, so they need no escaping.
    pub fn confirm_url(&self, token: &str) -> String {
        format!("{}{CONFIRM_PATH}?token={token}", self.public_base_url)
    }

    pub fn success_url(&self, siren: &str) -> String {
        format!("{}{}/{siren}", self.public_base_url, self.success_path)
    }

    pub fn error_url(&self, reason: Option<&str>) -> String {
        match reason {
            Some(reason) => format!("{}{}?reason={reason}", self.public_base_url, self.error_path),
            None => format!("{}{}", self.public_base_url, self.error_path),
        }
    }
}

fn path_or_default(value: Option<String>, key: &str, default: String) -> Result<String, AppError> {
    match value {
        Some(path) if path.starts_with('/') => Ok(path.trim_end_matches('/').to_string()),
        Some(_) => Err(AppError::config(format!("{key} must start with '/'"))),
        None => Ok(default),
    }
}
