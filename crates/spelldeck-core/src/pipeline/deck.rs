//! Stage 4: Anki text import file.
//!
//! Tab-separated, one "Basic (type in the answer)" note per word. Fields are
//! written verbatim; a tab or newline inside a word corrupts its row.

use crate::types::{AudioMap, RunPrefix};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Header lines Anki reads before the notes.
pub const DECK_HEADER: [&str; 3] = ["#separator:tab", "#html:true", "#notetype column:1"];

/// Note type named in the first column of every row.
pub const NOTE_TYPE: &str = "Basic (type in the answer)";

/// Where the deck for a run is written.
pub fn deck_path(output_dir: &Path, prefix: &RunPrefix) -> PathBuf {
    output_dir.join(format!("{prefix}_anki_deck.txt"))
}

/// Serialize the deck to any writer, rows in map order.
pub fn write_deck_to<W: Write>(writer: &mut W, audio: &AudioMap) -> io::Result<()> {
    for line in DECK_HEADER {
        writeln!(writer, "{line}")?;
    }
    for (word, path) in audio {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        writeln!(writer, "{NOTE_TYPE}\t[sound:{file_name}]\t{word}")?;
    }
    Ok(())
}

/// Write the deck to `output_file`, replacing any existing file.
pub fn write_deck(audio: &AudioMap, output_file: &Path) -> io::Result<PathBuf> {
    let mut writer = BufWriter::new(File::create(output_file)?);
    write_deck_to(&mut writer, audio)?;
    writer.flush()?;
    tracing::debug!("Wrote {} note(s) to {}", audio.len(), output_file.display());
    Ok(output_file.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat_dog() -> AudioMap {
        let mut audio = AudioMap::new();
        audio.insert("cat".to_string(), PathBuf::from("/tmp/out/123_cat.mp3"));
        audio.insert("dog".to_string(), PathBuf::from("/tmp/out/123_dog.mp3"));
        audio
    }

    #[test]
    fn test_deck_path() {
        let path = deck_path(Path::new("/tmp/out"), &RunPrefix::new("123"));
        assert_eq!(path, PathBuf::from("/tmp/out/123_anki_deck.txt"));
    }

    #[test]
    fn test_write_deck_exact_content() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("deck.txt");

        let written = write_deck(&cat_dog(), &out).unwrap();
        assert_eq!(written, out);

        let content = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            content,
            "#separator:tab\n\
             #html:true\n\
             #notetype column:1\n\
             Basic (type in the answer)\t[sound:123_cat.mp3]\tcat\n\
             Basic (type in the answer)\t[sound:123_dog.mp3]\tdog\n"
        );
    }

    #[test]
    fn test_line_count_is_entries_plus_header() {
        let mut audio = AudioMap::new();
        for i in 0..7 {
            audio.insert(format!("w{i}"), PathBuf::from(format!("/x/1_w{i}.mp3")));
        }
        let mut buf = Vec::new();
        write_deck_to(&mut buf, &audio).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(&lines[..3], &DECK_HEADER);
        assert_eq!(lines[5], "Basic (type in the answer)\t[sound:1_w2.mp3]\tw2");
    }

    #[test]
    fn test_empty_map_writes_header_only() {
        let mut buf = Vec::new();
        write_deck_to(&mut buf, &AudioMap::new()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "#separator:tab\n#html:true\n#notetype column:1\n"
        );
    }

    #[test]
    fn test_rewrite_overwrites_not_appends() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("deck.txt");

        write_deck(&cat_dog(), &out).unwrap();
        let first = std::fs::read_to_string(&out).unwrap();
        write_deck(&cat_dog(), &out).unwrap();
        let second = std::fs::read_to_string(&out).unwrap();

        assert_eq!(first, second);
        assert_eq!(second.lines().count(), 5);
    }
}
