#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod interpellation;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod trace_ctx;

// Re-exports for public API
pub use config::interpellation::InterpellationConfig;
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::validated_json::ValidatedJson;
pub use infra::state::{build_state, StateBuilder};
pub use interpellation::token::{
    mint_interpellation_token, verify_interpellation_token, InvalidToken, TokenDraft,
    TokenPayload, TokenService,
};
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::security_headers::SecurityHeaders;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Prelude for test convenience
pub mod prelude {
    pub use super::config::interpellation::*;
    pub use super::error::*;
    pub use super::infra::state::*;
    pub use super::interpellation::*;
    pub use super::middleware::*;
    pub use super::state::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
