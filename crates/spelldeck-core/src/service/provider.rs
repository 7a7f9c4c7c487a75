//! Service capability traits and the image payload type.

use crate::error::ServiceError;
use async_trait::async_trait;
use base64::Engine;
use std::path::Path;

/// Base64-encoded image ready to send to a vision model.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub media_type: String,
}

impl ImageInput {
    /// Create an `ImageInput` from raw bytes and a format string
    /// ("jpeg", "png", "webp", "gif").
    pub fn from_bytes(bytes: &[u8], format: &str) -> Self {
        let media_type = match format.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            other => {
                tracing::warn!("Unknown image format '{other}', defaulting to image/jpeg");
                "image/jpeg"
            }
        };

        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: media_type.to_string(),
        }
    }

    /// Create an `ImageInput` using the file extension of `path` as the format.
    pub fn from_path_bytes(path: &Path, bytes: &[u8]) -> Self {
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_bytes(bytes, format)
    }

    /// Return a data URL suitable for OpenAI-style APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// Reads text out of an image.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the pipeline holds `Arc<dyn WordExtractor>`).
#[async_trait]
pub trait WordExtractor: Send + Sync {
    /// Send `prompt` and `image` to a vision model and return its message text.
    async fn extract_text(&self, prompt: &str, image: &ImageInput) -> Result<String, ServiceError>;
}

/// Runs a single system + user chat completion.
#[async_trait]
pub trait SentenceGenerator: Send + Sync {
    /// Return the assistant message text for the given instruction and input.
    async fn complete(&self, system: &str, user: &str) -> Result<String, ServiceError>;
}

/// Turns text into spoken audio.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Return the encoded audio (MP3) for `input`.
    async fn synthesize(&self, input: &str) -> Result<Vec<u8>, ServiceError>;
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
