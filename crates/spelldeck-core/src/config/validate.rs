//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.synthesis.parallel_workers == 0 {
            return Err(ConfigError::ValidationError(
                "synthesis.parallel_workers must be > 0".into(),
            ));
        }
        if self.openai.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "openai.request_timeout_secs must be > 0".into(),
            ));
        }
        if self.openai.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "openai.base_url must not be empty".into(),
            ));
        }
        if self.openai.vision_max_tokens == 0 || self.openai.chat_max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "openai token limits must be > 0".into(),
            ));
        }
        Ok(())
    }
}
