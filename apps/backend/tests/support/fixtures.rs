use std::sync::Arc;

use backend::config::interpellation::InterpellationConfig;
use backend::infra::state::build_state;
use backend::interpellation::mailer::MemoryMailer;
use backend::interpellation::token::TokenDraft;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use serde_json::{json, Value};

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";
pub const PUBLIC_BASE_URL: &str = "https://eclaireurpublic.test";
pub const SIREN: &str = "213105554";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET).expect("non-empty test secret")
}

pub fn test_config() -> InterpellationConfig {
    InterpellationConfig {
        public_base_url: PUBLIC_BASE_URL.to_string(),
        ..InterpellationConfig::default()
    }
}

/// Shared state backed by an in-memory outbox the test can inspect.
pub fn test_state_with(mailer: Arc<MemoryMailer>) -> AppState {
    build_state()
        .with_security(test_security())
        .with_interpellation(test_config())
        .with_mailer(mailer)
        .build()
        .expect("test state should build")
}

pub fn test_state() -> (AppState, Arc<MemoryMailer>) {
    let mailer = Arc::new(MemoryMailer::new());
    (test_state_with(mailer.clone()), mailer)
}

/// A form submission that passes validation.
pub fn valid_request_json() -> Value {
    json!({
        "siren": SIREN,
        "firstname": "Jean",
        "lastname": "Dupont",
        "email": "Jean.Dupont@Example.com",
        "emails": "maire@ville.fr, adjoint@ville.fr",
        "isCC": true,
        "communityType": "Commune",
        "communityName": "Test Ville"
    })
}

/// The draft `valid_request_json` normalizes to.
pub fn sample_draft() -> TokenDraft {
    TokenDraft {
        siren: SIREN.to_string(),
        firstname: "Jean".to_string(),
        lastname: "Dupont".to_string(),
        email: "jean.dupont@example.com".to_string(),
        emails: "maire@ville.fr,adjoint@ville.fr".to_string(),
        is_cc: true,
        community_type: "Commune".to_string(),
        community_name: "Test Ville".to_string(),
    }
}

/// Pull the token out of a confirmation email body.
pub fn extract_token(body: &str) -> String {
    let start = body.find("?token=").expect("confirmation link in body") + "?token=".len();
    body[start..]
        .split_whitespace()
        .next()
        .expect("token after ?token=")
        .to_string()
}

/// Path and query of a confirmation link, for `TestRequest::uri`.
pub fn confirm_uri(token: &str) -> String {
    format!("/api/interpellate/confirm?token={token}")
}
