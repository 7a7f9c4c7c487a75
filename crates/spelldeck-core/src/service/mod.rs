//! Remote AI service integration.
//!
//! Each pipeline stage talks to its service through a narrow capability
//! trait, so the stages can run against fakes in tests. `OpenAiClient`
//! implements all three against the OpenAI HTTP API.

mod openai;
mod provider;

pub use openai::OpenAiClient;
pub use provider::{
    resolve_env_var, ImageInput, SentenceGenerator, SpeechSynthesizer, WordExtractor,
};
