//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// OpenAI service settings shared by the vision, chat and speech calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// API base URL, without a trailing slash
    pub base_url: String,

    /// Vision-capable chat model used to read the word list
    pub vision_model: String,

    /// Chat model used to write example sentences
    pub chat_model: String,

    /// Speech synthesis model
    pub speech_model: String,

    /// Voice selector for speech synthesis
    pub voice: String,

    /// Token limit for the word extraction response
    pub vision_max_tokens: u32,

    /// Token limit for the sentence generation response
    pub chat_max_tokens: u32,

    /// HTTP client timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: "${OPENAI_API_KEY}".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            vision_model: "gpt-4-vision-preview".to_string(),
            chat_model: "gpt-3.5-turbo-16k".to_string(),
            speech_model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            vision_max_tokens: 2000,
            chat_max_tokens: 4000,
            request_timeout_secs: 120,
        }
    }
}

/// Speech synthesis fan-out settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Maximum concurrent speech requests
    pub parallel_workers: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            parallel_workers: 4,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
