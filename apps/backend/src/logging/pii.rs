use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Centralized registry for PII redaction regex patterns.
///
/// All patterns are vetted literals, so construction cannot fail.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Email pattern: matches standard email addresses
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// `token=` query parameter, as found in confirmation links
    pub fn token_param() -> &'static Regex {
        static TOKEN_PARAM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\btoken=[^&\s]+").unwrap()
        });
        &TOKEN_PARAM_REGEX
    }

    /// Base64url runs of 16 characters or more
    pub fn base64_token() -> &'static Regex {
        static BASE64_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9_-]{16,}").unwrap()
        });
        &BASE64_TOKEN_REGEX
    }
}

/// Redacts sensitive information from a string.
///
/// - Emails keep the first character of the local part and the full domain.
/// - `token=` query values become `token=[REDACTED_TOKEN]`.
/// - Remaining opaque runs (≥16 base64url chars) become `[REDACTED_TOKEN]`.
pub fn redact(input: &str) -> String {
    let email_redacted = PiiRegexRegistry::email().replace_all(input, |caps: &regex::Captures| {
        let full_match = &caps[0];
        match full_match.split_once('@') {
            Some((local, domain)) => {
                let first: String = local.chars().take(1).collect();
                format!("{first}***@{domain}")
            }
            None => full_match.to_string(),
        }
    });

    let param_redacted = PiiRegexRegistry::token_param()
        .replace_all(&email_redacted, "token=[REDACTED_TOKEN]");

    PiiRegexRegistry::base64_token()
        .replace_all(&param_redacted, "[REDACTED_TOKEN]")
        .to_string()
}

/// A wrapper that redacts sensitive strings when displayed.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
