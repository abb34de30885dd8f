use std::sync::Arc;

use crate::config::interpellation::InterpellationConfig;
use crate::interpellation::mailer::Mailer;
use crate::interpellation::token::TokenService;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Token issuance and verification, bound to the signing secret
    pub tokens: TokenService,
    /// Link targets and token lifetime
    pub interpellation: InterpellationConfig,
    /// Outbound mail transport
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// Create a new AppState from already-validated parts.
    ///
    /// The token service TTL is taken from `interpellation`.
    pub fn new(
        tokens: TokenService,
        interpellation: InterpellationConfig,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let tokens = tokens.with_default_ttl(interpellation.token_ttl_minutes);
        Self {
            tokens,
            interpellation,
            mailer,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("interpellation", &self.interpellation)
            .finish_non_exhaustive()
    }
}
