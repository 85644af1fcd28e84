use crate::error::ConfigError;
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const REQUEST_TIMEOUT_ENV: &str = "MULTISIG_REQUEST_TIMEOUT_SECS";
pub const USER_AGENT_ENV: &str = "MULTISIG_USER_AGENT";

/// Settings shared by the transport and the error classifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Per-request timeout; also quoted in the `TimeOut` error's reason.
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 60,
            user_agent: concat!("multisig-errors/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl NetworkConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate network configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the timeout is zero or the user agent is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }
        Ok(())
    }

    /// Defaults overridden by `MULTISIG_REQUEST_TIMEOUT_SECS` and
    /// `MULTISIG_USER_AGENT`, then validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(REQUEST_TIMEOUT_ENV) {
            config.request_timeout_secs =
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidEnvValue {
                        variable: REQUEST_TIMEOUT_ENV.to_string(),
                        value: raw.clone(),
                    })?;
        }
        if let Ok(user_agent) = std::env::var(USER_AGENT_ENV) {
            config.user_agent = user_agent;
        }

        config.validate()?;

        log_debug!(
            request_timeout_secs = config.request_timeout_secs,
            user_agent = %config.user_agent,
            "Network configuration loaded and validated"
        );

        Ok(config)
    }
}
