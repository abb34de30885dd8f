//! Interpellation form intake: the request body and its validation.

use lazy_regex::regex_is_match;
use serde::Deserialize;
use unicode_normalization::UnicodeNormalization;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::interpellation::token::TokenDraft;

const MAX_NAME_CHARS: usize = 100;
const MAX_COMMUNITY_NAME_CHARS: usize = 200;
const MAX_RECIPIENTS: usize = 50;

/// Body of `POST /api/interpellate`.
///
/// Every field is required and unknown fields are rejected at parse time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InterpellateRequest {
    pub siren: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub emails: String,
    #[serde(rename = "isCC")]
    pub is_cc: bool,
    pub community_type: String,
    pub community_name: String,
}

/// Kinds of community an interpellation can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunityType {
    Commune,
    Departement,
    Region,
}

impl CommunityType {
    /// Parse a label, with or without accents, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "commune" => Some(Self::Commune),
            "departement" | "département" => Some(Self::Departement),
            "region" | "région" => Some(Self::Region),
            _ => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Commune => "Commune",
            Self::Departement => "Département",
            Self::Region => "Région",
        }
    }
}

impl InterpellateRequest {
    /// Validate and normalize the request into a token draft.
    pub fn validate(self) -> Result<TokenDraft, AppError> {
        let siren = self.siren.trim().to_string();
        if siren.len() != 9 || !siren.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::invalid(
                ErrorCode::InvalidSiren,
                "SIREN must be exactly 9 digits",
            ));
        }

        let firstname = validate_name(&self.firstname, "First name")?;
        let lastname = validate_name(&self.lastname, "Last name")?;

        let email = normalize_email(&self.email);
        if !is_valid_email(&email) {
            return Err(AppError::invalid(
                ErrorCode::InvalidEmail,
                "Email address is not valid",
            ));
        }

        let emails = validate_recipients(&self.emails)?;

        let community_type = CommunityType::parse(&self.community_type).ok_or_else(|| {
            AppError::invalid(
                ErrorCode::InvalidCommunityType,
                "Community type must be Commune, Département or Région",
            )
        })?;

        let community_name = self.community_name.trim().to_string();
        if community_name.is_empty() || community_name.chars().count() > MAX_COMMUNITY_NAME_CHARS {
            return Err(AppError::invalid(
                ErrorCode::InvalidCommunityName,
                format!("Community name must be 1 to {MAX_COMMUNITY_NAME_CHARS} characters"),
            ));
        }

        Ok(TokenDraft {
            siren,
            firstname,
            lastname,
            email,
            emails,
            is_cc: self.is_cc,
            community_type: community_type.label().to_string(),
            community_name,
        })
    }
}

fn validate_name(raw: &str, field: &str) -> Result<String, AppError> {
    let name = raw.trim().nfc().collect::<String>();
    if name.is_empty() || name.chars().count() > MAX_NAME_CHARS {
        return Err(AppError::invalid(
            ErrorCode::InvalidName,
            format!("{field} must be 1 to {MAX_NAME_CHARS} characters"),
        ));
    }
    if name.chars().any(char::is_control) {
        return Err(AppError::invalid(
            ErrorCode::InvalidName,
            format!("{field} contains control characters"),
        ));
    }
    Ok(name)
}

/// Split, normalize and dedupe the elected officials' address list.
fn validate_recipients(raw: &str) -> Result<String, AppError> {
    let mut recipients: Vec<String> = Vec::new();
    for entry in raw.split(',') {
        let address = normalize_email(entry);
        if address.is_empty() {
            continue;
        }
        if !is_valid_email(&address) {
            return Err(AppError::invalid(
                ErrorCode::InvalidRecipients,
                "Recipient list contains an invalid address",
            ));
        }
        if !recipients.contains(&address) {
            recipients.push(address);
        }
    }

    if recipients.is_empty() {
        return Err(AppError::invalid(
            ErrorCode::InvalidRecipients,
            "At least one recipient is required",
        ));
    }
    if recipients.len() > MAX_RECIPIENTS {
        return Err(AppError::invalid(
            ErrorCode::InvalidRecipients,
            format!("At most {MAX_RECIPIENTS} recipients are allowed"),
        ));
    }

    Ok(recipients.join(","))
}

/// Trim, NFKC-normalize and lowercase an address.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && regex_is_match!(r"^[^\s@,;<>]+@[^\s@,;<>]+\.[^\s@,;<>.]+$", email)
}

/// Split a stored recipient list back into addresses.
pub fn split_recipients(emails: &str) -> Vec<String> {
    emails
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
