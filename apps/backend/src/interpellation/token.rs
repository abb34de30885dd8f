//! Signed, time-limited interpellation confirmation tokens.
//!
//! Wire format:
//!
//! ```text
//! base64url(json(payload)) "." base64url(HMAC-SHA256(secret, base64url(json(payload))))
//! ```
//!
//! Both segments use the URL-safe alphabet without padding, so a token can be
//! dropped into a `?token=` query parameter as-is.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::debug;

use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

type HmacSha256 = Hmac<Sha256>;

/// Default token lifetime: 24 hours.
pub const DEFAULT_TTL_MINUTES: i64 = 1440;

const MILLIS_PER_MINUTE: i64 = 60_000;
const SEPARATOR: char = '.';

/// Everything a token carries except its expiry.
///
/// This is what callers hand to issuance; `exp` is always computed by the
/// token service itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TokenDraft {
    /// SIREN of the targeted community.
    pub siren: String,
    pub firstname: String,
    pub lastname: String,
    /// Requester address.
    pub email: String,
    /// Comma-separated addresses of the elected officials to contact.
    pub emails: String,
    /// Whether the requester is copied on the interpellation email.
    #[serde(rename = "isCC")]
    pub is_cc: bool,
    pub community_type: String,
    pub community_name: String,
}

/// Decoded token contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TokenPayload {
    pub siren: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub emails: String,
    #[serde(rename = "isCC")]
    pub is_cc: bool,
    pub community_type: String,
    pub community_name: String,
    /// Expiry (milliseconds since epoch)
    pub exp: i64,
}

impl TokenDraft {
    fn with_expiry(&self, exp: i64) -> TokenPayload {
        TokenPayload {
            siren: self.siren.clone(),
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
            email: self.email.clone(),
            emails: self.emails.clone(),
            is_cc: self.is_cc,
            community_type: self.community_type.clone(),
            community_name: self.community_name.clone(),
            exp,
        }
    }
}

impl From<TokenPayload> for TokenDraft {
    fn from(payload: TokenPayload) -> Self {
        Self {
            siren: payload.siren,
            firstname: payload.firstname,
            lastname: payload.lastname,
            email: payload.email,
            emails: payload.emails,
            is_cc: payload.is_cc,
            community_type: payload.community_type,
            community_name: payload.community_name,
        }
    }
}

/// The single verification failure surfaced to callers.
///
/// Malformed input, signature mismatch and expiry are indistinguishable here;
/// the precise reason is only logged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid or expired token")]
pub struct InvalidToken;

/// Why a token was rejected (log-only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenRejection {
    /// Not exactly two non-empty `.`-separated segments.
    Malformed,
    BadSignature,
    /// Signature matched but the payload did not decode.
    BadPayload,
    Expired,
}

impl TokenRejection {
    pub(crate) const fn as_str(&self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::BadSignature => "bad_signature",
            Self::BadPayload => "bad_payload",
            Self::Expired => "expired",
        }
    }
}

fn epoch_millis(now: SystemTime) -> Result<i64, AppError> {
    let millis = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_millis();
    i64::try_from(millis).map_err(|_| AppError::internal("Current time out of range"))
}

fn sign(encoded_payload: &str, security: &SecurityConfig) -> Result<String, AppError> {
    let mut mac = HmacSha256::new_from_slice(security.token_secret())
        .map_err(|e| AppError::internal(format!("Failed to initialise HMAC: {e}")))?;
    mac.update(encoded_payload.as_bytes());
    Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
}

/// Mint an interpellation token expiring `ttl_minutes` after `now`.
///
/// A non-positive TTL yields a token that is already expired; positivity of
/// the configured TTL is enforced when configuration is loaded.
pub fn mint_interpellation_token(
    draft: &TokenDraft,
    ttl_minutes: i64,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let now_ms = epoch_millis(now)?;
    let exp = ttl_minutes
        .checked_mul(MILLIS_PER_MINUTE)
        .and_then(|ttl_ms| now_ms.checked_add(ttl_ms))
        .ok_or_else(|| AppError::internal(format!("Token TTL out of range: {ttl_minutes}")))?;

    let payload = draft.with_expiry(exp);
    let json = serde_json::to_vec(&payload)?;
    let encoded_payload = URL_SAFE_NO_PAD.encode(json);
    let signature = sign(&encoded_payload, security)?;

    Ok(format!("{encoded_payload}{SEPARATOR}{signature}"))
}

/// Verify a token and return its payload.
pub fn verify_interpellation_token(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<TokenPayload, InvalidToken> {
    check_token(token, now, security).map_err(|reason| {
        debug!(reason = reason.as_str(), "Interpellation token rejected");
        InvalidToken
    })
}

pub(crate) fn check_token(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<TokenPayload, TokenRejection> {
    let (encoded_payload, signature) = split_token(token)?;

    let expected = sign(encoded_payload, security).map_err(|_| TokenRejection::BadSignature)?;
    if !bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
        return Err(TokenRejection::BadSignature);
    }

    let json = URL_SAFE_NO_PAD
        .decode(encoded_payload)
        .map_err(|_| TokenRejection::BadPayload)?;
    let payload: TokenPayload =
        serde_json::from_slice(&json).map_err(|_| TokenRejection::BadPayload)?;

    // A clock before the epoch cannot outlive any token.
    let now_ms = epoch_millis(now).map_err(|_| TokenRejection::Expired)?;
    if payload.exp <= now_ms {
        return Err(TokenRejection::Expired);
    }

    Ok(payload)
}

fn split_token(token: &str) -> Result<(&str, &str), TokenRejection> {
    let mut parts = token.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(payload), Some(signature), None) if !payload.is_empty() && !signature.is_empty() => {
            Ok((payload, signature))
        }
        _ => Err(TokenRejection::Malformed),
    }
}

/// Issues and verifies tokens with an injected secret and default TTL,
/// reading the system clock.
#[derive(Debug, Clone)]
pub struct TokenService {
    security: SecurityConfig,
    default_ttl_minutes: i64,
}

impl TokenService {
    pub fn new(security: SecurityConfig) -> Self {
        Self {
            security,
            default_ttl_minutes: DEFAULT_TTL_MINUTES,
        }
    }

    pub fn with_default_ttl(mut self, ttl_minutes: i64) -> Self {
        self.default_ttl_minutes = ttl_minutes;
        self
    }

    pub fn default_ttl_minutes(&self) -> i64 {
        self.default_ttl_minutes
    }

    pub fn create_token(&self, draft: &TokenDraft) -> Result<String, AppError> {
        self.create_token_with_ttl(draft, self.default_ttl_minutes)
    }

    pub fn create_token_with_ttl(
        &self,
        draft: &TokenDraft,
        ttl_minutes: i64,
    ) -> Result<String, AppError> {
        mint_interpellation_token(draft, ttl_minutes, SystemTime::now(), &self.security)
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenPayload, InvalidToken> {
        verify_interpellation_token(token, SystemTime::now(), &self.security)
    }
}
