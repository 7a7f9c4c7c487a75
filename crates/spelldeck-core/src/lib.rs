//! SpellDeck Core - photographed spelling lists to audio flashcard decks.
//!
//! A run reads a photo of a spelling list, asks a vision model for the words,
//! asks a chat model for a silly example sentence per word, synthesizes each
//! word and sentence to speech, and writes an Anki import file that plays the
//! audio on every card.
//!
//! # Architecture
//!
//! ```text
//! Image → Extract words → Write sentences → Synthesize audio → Anki deck
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use spelldeck_core::{Config, DeckPipeline, RunPrefix};
//!
//! #[tokio::main]
//! async fn main() -> spelldeck_core::Result<()> {
//!     let config = Config::load()?;
//!     let api_key = config.api_key()?;
//!     let pipeline = DeckPipeline::from_config(&config, &api_key)?;
//!
//!     let summary = pipeline
//!         .run("list.jpg".as_ref(), "./out".as_ref(), &RunPrefix::now())
//!         .await?;
//!     println!("Deck: {}", summary.deck_path.display());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod service;
pub mod types;

pub use config::Config;
pub use error::{ConfigError, DeckError, ParseError, Result, ServiceError};
pub use pipeline::{DeckPipeline, SynthesisOptions, SynthesisReport, Synthesizer};
pub use service::{OpenAiClient, SentenceGenerator, SpeechSynthesizer, WordExtractor};
pub use types::{AudioMap, RunPrefix, RunSummary, SentenceMap};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
