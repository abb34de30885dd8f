use std::sync::Arc;

use crate::config::interpellation::InterpellationConfig;
use crate::error::AppError;
use crate::interpellation::mailer::{LogMailer, Mailer};
use crate::interpellation::token::TokenService;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: Option<SecurityConfig>,
    interpellation: InterpellationConfig,
    mailer: Option<Arc<dyn Mailer>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: None,
            interpellation: InterpellationConfig::default(),
            mailer: None,
        }
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = Some(security_config);
        self
    }

    pub fn with_interpellation(mut self, config: InterpellationConfig) -> Self {
        self.interpellation = config;
        self
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// Fails with `AppError::Config` when no signing secret was supplied.
    pub fn build(self) -> Result<AppState, AppError> {
        let security = self
            .security_config
            .ok_or_else(|| AppError::config("interpellation token secret not configured"))?;
        let mailer = self.mailer.unwrap_or_else(|| Arc::new(LogMailer));

        Ok(AppState::new(
            TokenService::new(security),
            self.interpellation,
            mailer,
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
