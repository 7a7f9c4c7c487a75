//! Stage 3: concurrent speech synthesis, one job per word.
//!
//! Jobs are spawned onto tokio and bounded by a semaphore. Each job writes
//! its own file and returns an immutable outcome; only the calling task
//! assembles the audio map, so nothing is shared behind a lock.

use crate::service::SpeechSynthesizer;
use crate::types::{AudioMap, RunPrefix, SentenceMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Configuration for the synthesis fan-out.
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    /// Maximum concurrent speech requests
    pub parallel: usize,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self { parallel: 4 }
    }
}

/// Result of a single synthesis job.
#[derive(Debug)]
pub enum SynthesisOutcome {
    Success { word: String, path: PathBuf },
    Failure { word: String, message: String },
}

/// Audio files that were written, plus the words that were dropped.
#[derive(Debug, Default)]
pub struct SynthesisReport {
    /// Successful words, in sentence-map order
    pub audio: AudioMap,
    /// Words whose job failed, in sentence-map order
    pub failed: Vec<String>,
}

/// Text spoken for one card: the word, its sentence, then the word again.
pub fn speech_input(word: &str, sentence: &str) -> String {
    format!("\"{word}\"... {sentence}... \"{word}\".")
}

/// Where the audio for `word` is written.
pub fn audio_path(output_dir: &Path, prefix: &RunPrefix, word: &str) -> PathBuf {
    output_dir.join(format!("{prefix}_{word}.mp3"))
}

/// Bounded-concurrency speech synthesis engine.
pub struct Synthesizer {
    speech: Arc<dyn SpeechSynthesizer>,
    options: SynthesisOptions,
}

impl Synthesizer {
    pub fn new(speech: Arc<dyn SpeechSynthesizer>, options: SynthesisOptions) -> Self {
        Self { speech, options }
    }

    /// Synthesize every entry of `sentences` into `output_dir`.
    ///
    /// Failed jobs are logged with their word and left out of the audio map;
    /// they never stop sibling jobs. Nothing is retried.
    pub async fn synthesize_all(
        &self,
        sentences: &SentenceMap,
        prefix: &RunPrefix,
        output_dir: &Path,
    ) -> SynthesisReport {
        let semaphore = Arc::new(Semaphore::new(self.options.parallel.max(1)));
        let mut handles = Vec::with_capacity(sentences.len());

        for (word, sentence) in sentences {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    tracing::warn!("Synthesis semaphore closed unexpectedly, stopping batch");
                    break;
                }
            };

            let speech = self.speech.clone();
            let input = speech_input(word, sentence);
            let path = audio_path(output_dir, prefix, word);
            let job_word = word.clone();

            let handle = tokio::spawn(async move {
                let outcome = synthesize_single(speech.as_ref(), job_word, &input, path).await;
                drop(permit);
                outcome
            });
            handles.push((word.clone(), handle));
        }

        let mut report = SynthesisReport::default();
        for (word, handle) in handles {
            let outcome = handle.await.unwrap_or_else(|e| SynthesisOutcome::Failure {
                word,
                message: format!("synthesis task panicked: {e}"),
            });
            match outcome {
                SynthesisOutcome::Success { word, path } => {
                    tracing::debug!("Wrote audio for '{word}' to {}", path.display());
                    report.audio.insert(word, path);
                }
                SynthesisOutcome::Failure { word, message } => {
                    tracing::error!("An error occurred while processing {word}: {message}");
                    report.failed.push(word);
                }
            }
        }

        report
    }
}

async fn synthesize_single(
    speech: &dyn SpeechSynthesizer,
    word: String,
    input: &str,
    path: PathBuf,
) -> SynthesisOutcome {
    let audio = match speech.synthesize(input).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return SynthesisOutcome::Failure {
                word,
                message: e.to_string(),
            }
        }
    };

    match tokio::fs::write(&path, &audio).await {
        Ok(()) => SynthesisOutcome::Success { word, path },
        Err(e) => SynthesisOutcome::Failure {
            word,
            message: format!("Failed to write {}: {e}", path.display()),
        },
    }
}
