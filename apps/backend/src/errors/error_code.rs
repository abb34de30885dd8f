//! Error codes for the Éclaireur Public backend API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the backend API.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string that appears
/// in HTTP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// SIREN is not exactly nine digits
    InvalidSiren,
    /// First or last name missing or too long
    InvalidName,
    /// Requester email address is not valid
    InvalidEmail,
    /// Elected officials' address list is empty or contains an invalid address
    InvalidRecipients,
    /// Community type is not a commune, département or région
    InvalidCommunityType,
    /// Community name missing or too long
    InvalidCommunityName,
    /// General bad request error
    BadRequest,

    // Interpellation flow
    /// Mail transport refused or failed to deliver a message
    MailDeliveryFailed,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::InvalidSiren => "INVALID_SIREN",
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidRecipients => "INVALID_RECIPIENTS",
            Self::InvalidCommunityType => "INVALID_COMMUNITY_TYPE",
            Self::InvalidCommunityName => "INVALID_COMMUNITY_NAME",
            Self::BadRequest => "BAD_REQUEST",

            // Interpellation flow
            Self::MailDeliveryFailed => "MAIL_DELIVERY_FAILED",

            // System Errors
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Every code, in declaration order.
    pub const ALL: [ErrorCode; 10] = [
        Self::InvalidSiren,
        Self::InvalidName,
        Self::InvalidEmail,
        Self::InvalidRecipients,
        Self::InvalidCommunityType,
        Self::InvalidCommunityName,
        Self::BadRequest,
        Self::MailDeliveryFailed,
        Self::Internal,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
