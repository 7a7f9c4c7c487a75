//! OpenAI client covering Chat Completions (vision and text) and speech.
//!
//! Images go in the user message content array as a data URL. Speech
//! responses are raw MP3 bytes.

use super::provider::{ImageInput, SentenceGenerator, SpeechSynthesizer, WordExtractor};
use crate::config::OpenAiConfig;
use crate::error::ServiceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// One HTTP client shared by all three capabilities.
pub struct OpenAiClient {
    api_key: String,
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(api_key: &str, config: &OpenAiConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ServiceError::new("http", format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key: api_key.to_string(),
            config: config.clone(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn post_chat(
        &self,
        service: &'static str,
        body: &ChatRequest,
    ) -> Result<String, ServiceError> {
        let start = Instant::now();
        let resp = self.send(service, "chat/completions", body).await?;

        let chat_resp: ChatResponse = resp.json().await.map_err(|e| {
            ServiceError::new(service, format!("Failed to parse OpenAI response: {e}"))
        })?;

        let text = chat_resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                ServiceError::new(service, "OpenAI response has no message content")
            })?;

        tracing::debug!(
            service,
            model = %body.model,
            latency_ms = start.elapsed().as_millis() as u64,
            tokens = ?chat_resp.usage.map(|u| u.total_tokens),
            "Chat completion finished"
        );
        Ok(text)
    }

    async fn send<T: Serialize + ?Sized>(
        &self,
        service: &'static str,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, ServiceError> {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::new(service, format!("OpenAI request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ServiceError::with_status(
                service,
                status.as_u16(),
                format!("OpenAI HTTP {status}: {text}"),
            ));
        }
        Ok(resp)
    }
}

// --- Request types ---

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ChatContent>),
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ChatContent {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

#[async_trait]
impl WordExtractor for OpenAiClient {
    async fn extract_text(&self, prompt: &str, image: &ImageInput) -> Result<String, ServiceError> {
        let body = ChatRequest {
            model: self.config.vision_model.clone(),
            max_tokens: self.config.vision_max_tokens,
            messages: vec![ChatMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ChatContent::Text {
                        text: prompt.to_string(),
                    },
                    ChatContent::ImageUrl {
                        image_url: ImageUrl {
                            url: image.data_url(),
                        },
                    },
                ]),
            }],
        };
        self.post_chat("vision", &body).await
    }
}

#[async_trait]
impl SentenceGenerator for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ServiceError> {
        let body = ChatRequest {
            model: self.config.chat_model.clone(),
            max_tokens: self.config.chat_max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(system.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Text(user.to_string()),
                },
            ],
        };
        self.post_chat("chat", &body).await
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiClient {
    async fn synthesize(&self, input: &str) -> Result<Vec<u8>, ServiceError> {
        let body = SpeechRequest {
            model: &self.config.speech_model,
            voice: &self.config.voice,
            input,
        };
        let resp = self.send("speech", "audio/speech", &body).await?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ServiceError::new("speech", format!("Failed to read audio body: {e}")))?;
        Ok(bytes.to_vec())
    }
}
