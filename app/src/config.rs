use figment::{
    providers::{Env, Serialized},
    Figment,
};
use follower_core::{GitHubClient, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Prefix of every environment variable read by `AppConfig::load`.
pub const ENV_PREFIX: &str = "FOLLOWER_";

/// Host configuration.
///
/// Loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. Environment variables with the `FOLLOWER_` prefix
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// API root; `https://api.github.com/` unless testing against a mock.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Account whose followers are sampled.
    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// `tracing` filter directive; `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user() -> String {
    "krishmasand".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user: default_user(),
            user_agent: default_user_agent(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults and the environment.
    ///
    /// # Errors
    /// Returns an error if a variable has the wrong shape or the result fails
    /// `validate`.
    pub fn load() -> Result<Self, AppError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns an error naming the first invalid field.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.user.trim().is_empty() {
            return Err(AppError::Validation(
                "user is required. Set FOLLOWER_USER to a GitHub login.".into(),
            ));
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AppError::Validation(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }

        if self.user_agent.trim().is_empty() {
            return Err(AppError::Validation("user_agent must not be empty".into()));
        }

        Ok(())
    }

    pub fn client(&self) -> GitHubClient {
        GitHubClient::new(&self.base_url).with_user_agent(self.user_agent.clone())
    }
}
