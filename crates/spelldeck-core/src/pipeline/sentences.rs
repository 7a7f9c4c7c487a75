//! Stage 2: one chat request that writes an example sentence per word.

use crate::error::{ParseError, Result};
use crate::service::SentenceGenerator;
use crate::types::SentenceMap;

/// System instruction for the sentence request.
///
/// Exact-form word usage is asked for here and nowhere else; replies that
/// inflect a word are accepted as-is.
pub const SENTENCE_PROMPT: &str = "Write a child-friendly sentence for each spelling word provided. \
     The sentences should be simple and silly. \
     Use each word in a separate sentence and do not spell out the words. \
     Words must be used exactly as provided. \
     You cannot use 's or 're contractions, you cannot use 'fastest' or 'faster' for 'fast', etc. \
     Format your response as 'word|example sentence', one response per line.";

/// Parse a `word|sentence` per line response.
///
/// Each line is split at its first `|` and both halves trimmed. A repeated
/// word keeps its first position and takes the last sentence. Any line
/// without a separator fails the whole parse.
pub fn parse_sentences(text: &str) -> std::result::Result<SentenceMap, ParseError> {
    let mut sentences = SentenceMap::new();
    for (idx, line) in text.trim().split('\n').enumerate() {
        let (word, sentence) = line
            .split_once('|')
            .ok_or_else(|| ParseError::MissingSeparator {
                line_number: idx + 1,
                line: line.to_string(),
            })?;
        sentences.insert(word.trim().to_string(), sentence.trim().to_string());
    }
    Ok(sentences)
}

/// Ask the model for one sentence per word and parse the reply.
///
/// An empty word list short-circuits without a request.
pub async fn generate_sentences(
    generator: &dyn SentenceGenerator,
    words: &[String],
) -> Result<SentenceMap> {
    if words.is_empty() {
        tracing::warn!("No words to write sentences for");
        return Ok(SentenceMap::new());
    }

    let reply = generator.complete(SENTENCE_PROMPT, &words.join("\n")).await?;
    let sentences = parse_sentences(&reply)?;
    if sentences.len() != words.len() {
        tracing::debug!(
            "Model returned {} sentence(s) for {} word(s)",
            sentences.len(),
            words.len()
        );
    }
    Ok(sentences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DeckError, ServiceError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    struct ScriptedGenerator {
        reply: String,
        calls: AtomicU32,
        last_user: Mutex<String>,
    }

    impl ScriptedGenerator {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: AtomicU32::new(0),
                last_user: Mutex::new(String::new()),
            }
        }
    }

    #[async_trait]
    impl SentenceGenerator for ScriptedGenerator {
        async fn complete(
            &self,
            system: &str,
            user: &str,
        ) -> std::result::Result<String, ServiceError> {
            assert_eq!(system, SENTENCE_PROMPT);
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_user.lock().unwrap() = user.to_string();
            Ok(self.reply.clone())
        }
    }

    #[test]
    fn test_parse_well_formed_block() {
        let map = parse_sentences("cat | The cat wore a hat.\ndog|A dog ate my sock.\n").unwrap();
        let pairs: Vec<_> = map.iter().map(|(w, s)| (w.as_str(), s.as_str())).collect();
        assert_eq!(
            pairs,
            vec![("cat", "The cat wore a hat."), ("dog", "A dog ate my sock.")]
        );
    }

    #[test]
    fn test_parse_splits_on_first_separator() {
        let map = parse_sentences("pipe|A pipe | is not a word.").unwrap();
        assert_eq!(map["pipe"], "A pipe | is not a word.");
    }

    #[test]
    fn test_parse_last_duplicate_wins_first_position_kept() {
        let map = parse_sentences("go|First.\nstop|Halt.\ngo|Second.").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_index(0).unwrap(), (&"go".to_string(), &"Second.".to_string()));
        assert_eq!(map["stop"], "Halt.");
    }

    #[test]
    fn test_parse_missing_separator_fails() {
        let err = parse_sentences("cat|Meow.\nThe dog barked.\nbird|Tweet.").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingSeparator {
                line_number: 2,
                line: "The dog barked.".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_blank_interior_line_fails() {
        assert!(parse_sentences("cat|Meow.\n\ndog|Woof.").is_err());
    }

    #[tokio::test]
    async fn test_generate_sends_newline_joined_words() {
        let generator = ScriptedGenerator::new("cat|Meow.\ndog|Woof.");
        let words = vec!["cat".to_string(), "dog".to_string()];
        let map = generate_sentences(&generator, &words).await.unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*generator.last_user.lock().unwrap(), "cat\ndog");
    }

    #[tokio::test]
    async fn test_generate_aborts_on_malformed_reply() {
        let generator = ScriptedGenerator::new("cat|Meow.\noops");
        let words = vec!["cat".to_string(), "dog".to_string()];
        let err = generate_sentences(&generator, &words).await.unwrap_err();
        assert!(matches!(err, DeckError::Parse(_)));
    }

    #[tokio::test]
    async fn test_generate_empty_words_skips_request() {
        let generator = ScriptedGenerator::new("unused");
        let map = generate_sentences(&generator, &[]).await.unwrap();
        assert!(map.is_empty());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }
}
