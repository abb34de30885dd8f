use tracing::warn;

use crate::trace_ctx;

/// Log a rejected interpellation confirmation token.
///
/// `reason` is either "missing" or "invalid_or_expired"; the verifier does
/// not report which check failed.
pub fn token_rejected(reason: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        reason,
        "Interpellation token rejected"
    );
}

/// Log a request body that failed intake validation.
pub fn intake_rejected(code: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_INTAKE_REJECTED",
        %trace_id,
        code,
        "Interpellation form rejected"
    );
}
