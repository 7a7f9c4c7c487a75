//! Stage 1: read the spelling list out of a photo.

use crate::error::{DeckError, Result};
use crate::service::{ImageInput, WordExtractor};
use std::path::Path;

/// Instruction sent alongside the image.
pub const EXTRACT_PROMPT: &str = "This image contains a large list of spelling words. \
     Please extract them for me in a line delimited list. \
     Only include the spelling words, nothing else. \
     Do not include text outside of the spelling word list.";

/// Split a model response into words on any whitespace.
///
/// No validation: whatever tokens the model produced, duplicates included,
/// come back in order.
pub fn parse_word_list(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Read `image_path`, send it to the vision model, and parse the word list.
pub async fn extract_words(extractor: &dyn WordExtractor, image_path: &Path) -> Result<Vec<String>> {
    let bytes = tokio::fs::read(image_path).await.map_err(|e| {
        DeckError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read image {}: {e}", image_path.display()),
        ))
    })?;
    let image = ImageInput::from_path_bytes(image_path, &bytes);
    tracing::debug!(
        "Encoded {} ({} bytes, {})",
        image_path.display(),
        bytes.len(),
        image.media_type
    );

    let text = extractor.extract_text(EXTRACT_PROMPT, &image).await?;
    Ok(parse_word_list(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedExtractor {
        reply: std::result::Result<String, u16>,
        seen: Mutex<Option<(String, String)>>,
    }

    #[async_trait]
    impl WordExtractor for FixedExtractor {
        async fn extract_text(
            &self,
            prompt: &str,
            image: &ImageInput,
        ) -> std::result::Result<String, ServiceError> {
            *self.seen.lock().unwrap() = Some((prompt.to_string(), image.data_url()));
            self.reply
                .clone()
                .map_err(|code| ServiceError::with_status("vision", code, "boom"))
        }
    }

    #[test]
    fn test_parse_word_list_mixed_whitespace() {
        let words = parse_word_list("cat\ndog\r\n  bird\tfish\n\n");
        assert_eq!(words, vec!["cat", "dog", "bird", "fish"]);
    }

    #[test]
    fn test_parse_word_list_keeps_duplicates() {
        assert_eq!(parse_word_list("go go\ngo"), vec!["go", "go", "go"]);
    }

    #[test]
    fn test_parse_word_list_empty() {
        assert!(parse_word_list("  \n ").is_empty());
    }

    #[tokio::test]
    async fn test_extract_words_sends_image_and_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("list.png");
        std::fs::write(&image, [1u8, 2, 3]).unwrap();

        let extractor = FixedExtractor {
            reply: Ok("because\nfriend\n".to_string()),
            seen: Mutex::new(None),
        };
        let words = extract_words(&extractor, &image).await.unwrap();
        assert_eq!(words, vec!["because", "friend"]);

        let (prompt, url) = extractor.seen.lock().unwrap().clone().unwrap();
        assert_eq!(prompt, EXTRACT_PROMPT);
        assert_eq!(url, "data:image/png;base64,AQID");
    }

    #[tokio::test]
    async fn test_extract_words_missing_file() {
        let extractor = FixedExtractor {
            reply: Ok(String::new()),
            seen: Mutex::new(None),
        };
        let err = extract_words(&extractor, Path::new("/definitely/not/here.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, DeckError::Io(_)));
        assert!(extractor.seen.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_extract_words_propagates_service_error() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("list.jpg");
        std::fs::write(&image, [0xFFu8, 0xD8]).unwrap();

        let extractor = FixedExtractor {
            reply: Err(500),
            seen: Mutex::new(None),
        };
        let err = extract_words(&extractor, &image).await.unwrap_err();
        match err {
            DeckError::Service(e) => assert_eq!(e.status_code, Some(500)),
            other => panic!("expected service error, got {other:?}"),
        }
    }
}
