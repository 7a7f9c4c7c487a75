//! The four-stage deck pipeline.
//!
//! ```text
//! Image → Extract words → Write sentences → Synthesize audio (fan-out) → Deck
//! ```

pub mod deck;
pub mod extract;
pub mod sentences;
pub mod synthesize;

pub use deck::{deck_path, write_deck};
pub use extract::{extract_words, parse_word_list};
pub use sentences::{generate_sentences, parse_sentences};
pub use synthesize::{
    audio_path, speech_input, SynthesisOptions, SynthesisOutcome, SynthesisReport, Synthesizer,
};

use crate::config::Config;
use crate::error::Result;
use crate::service::{OpenAiClient, SentenceGenerator, SpeechSynthesizer, WordExtractor};
use crate::types::{RunPrefix, RunSummary};
use std::path::Path;
use std::sync::Arc;

/// Runs every stage against one set of service implementations.
pub struct DeckPipeline {
    extractor: Arc<dyn WordExtractor>,
    generator: Arc<dyn SentenceGenerator>,
    synthesizer: Synthesizer,
}

impl DeckPipeline {
    pub fn new(
        extractor: Arc<dyn WordExtractor>,
        generator: Arc<dyn SentenceGenerator>,
        speech: Arc<dyn SpeechSynthesizer>,
        options: SynthesisOptions,
    ) -> Self {
        Self {
            extractor,
            generator,
            synthesizer: Synthesizer::new(speech, options),
        }
    }

    /// Build a pipeline backed by a single OpenAI client.
    pub fn from_config(config: &Config, api_key: &str) -> Result<Self> {
        let client = Arc::new(OpenAiClient::new(api_key, &config.openai)?);
        let options = SynthesisOptions {
            parallel: config.synthesis.parallel_workers,
        };
        Ok(Self::new(client.clone(), client.clone(), client, options))
    }

    /// Turn the photo at `image` into audio files and a deck in `output_dir`.
    ///
    /// Extraction and sentence faults abort the run and leave whatever was
    /// already written. Synthesis faults only drop the affected words.
    pub async fn run(
        &self,
        image: &Path,
        output_dir: &Path,
        prefix: &RunPrefix,
    ) -> Result<RunSummary> {
        tokio::fs::create_dir_all(output_dir).await?;

        tracing::info!("Extracting spelling words from {}", image.display());
        let words = extract_words(self.extractor.as_ref(), image).await?;
        tracing::info!("Extracted {} word(s)", words.len());

        let sentences = generate_sentences(self.generator.as_ref(), &words).await?;
        tracing::info!("Generated {} sentence(s)", sentences.len());

        let report = self
            .synthesizer
            .synthesize_all(&sentences, prefix, output_dir)
            .await;
        tracing::info!(
            "Synthesized {} audio file(s), {} failed",
            report.audio.len(),
            report.failed.len()
        );

        let deck = write_deck(&report.audio, &deck_path(output_dir, prefix))?;

        Ok(RunSummary {
            prefix: prefix.clone(),
            words_extracted: words.len(),
            sentences: sentences.len(),
            synthesized: report.audio.len(),
            failed_words: report.failed,
            deck_path: deck,
        })
    }
}
