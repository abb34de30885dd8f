//! Rate limiting for form intake.
//!
//! - `POST /api/interpellate`: 5 requests per 60 seconds per client IP
//! - Confirmation links and health check: exempt, so a confirmation click
//!   always ends in a redirect
//!
//! `HttpServer::new` runs its factory once per worker, so the
//! `InMemoryBackend` must be built once outside it and cloned in; otherwise
//! each worker counts separately.

use std::time::Duration;

use actix_extensible_rate_limit::backend::SimpleInputFunctionBuilder;

pub const INTAKE_WINDOW: Duration = Duration::from_secs(60);
pub const INTAKE_MAX_REQUESTS: u64 = 5;

/// Input function for the intake resource, keyed on the real client IP.
pub fn intake_rate_limit_config() -> SimpleInputFunctionBuilder {
    SimpleInputFunctionBuilder::new(INTAKE_WINDOW, INTAKE_MAX_REQUESTS).real_ip_key()
}
