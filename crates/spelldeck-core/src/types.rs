//! Core data types shared across pipeline stages.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Word → example sentence, in the order the model returned them.
pub type SentenceMap = IndexMap<String, String>;

/// Word → synthesized audio file, for successful synthesis jobs only.
pub type AudioMap = IndexMap<String, PathBuf>;

/// Run-unique prefix that namespaces every file written by one run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunPrefix(String);

impl RunPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    /// Prefix from the current UNIX time in whole seconds.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self(secs.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// File name prefix used by this run
    pub prefix: RunPrefix,

    /// Tokens returned by the extractor, duplicates included
    pub words_extracted: usize,

    /// Distinct words that received a sentence
    pub sentences: usize,

    /// Words with an audio file on disk
    pub synthesized: usize,

    /// Words whose synthesis failed
    pub failed_words: Vec<String>,

    /// Deck import file
    pub deck_path: PathBuf,
}
