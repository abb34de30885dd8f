//! One-time tracing setup for test binaries.
//!
//! Filter precedence: `TEST_LOG`, then `RUST_LOG`, then `warn`.
//! Set `TEST_LOG_FORMAT=json` to get the same JSON lines the server emits,
//! which helps when checking that addresses and tokens are redacted.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

fn filter_from_env() -> EnvFilter {
    std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn json_requested() -> bool {
    std::env::var("TEST_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"))
}

/// Install the test subscriber. Idempotent; never panics if a global
/// subscriber already exists.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let builder = fmt()
            .with_env_filter(filter_from_env())
            .with_test_writer()
            .without_time();

        if json_requested() {
            builder.json().try_init().ok();
        } else {
            builder.try_init().ok();
        }
    });
}
