//! SpellDeck CLI - turn a photographed spelling list into an Anki deck.
//!
//! # Usage
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! spelldeck --image list.jpg --output ./deck
//! ```
//!
//! Writes one MP3 per word plus `<epoch>_anki_deck.txt` into the output
//! directory.

use anyhow::Context;
use clap::Parser;
use spelldeck_core::config::expand_path;
use spelldeck_core::{Config, DeckPipeline, RunPrefix};
use std::path::PathBuf;

mod logging;

/// SpellDeck - create an Anki deck from an image of spelling words.
#[derive(Parser, Debug)]
#[command(name = "spelldeck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The file path of the image to process
    #[arg(long = "image", value_name = "PATH")]
    image: PathBuf,

    /// The directory to save the generated audio files and Anki deck
    #[arg(long = "output", value_name = "DIR")]
    output: PathBuf,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config from {}: {e}\n  Using default configuration.",
                Config::default_path().display()
            );
            Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("SpellDeck v{}", spelldeck_core::VERSION);

    let api_key = match config.api_key() {
        Ok(key) => key,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let image = expand_path(&cli.image);
    let output_dir = expand_path(&cli.output);
    let prefix = RunPrefix::now();

    let pipeline = DeckPipeline::from_config(&config, &api_key)?;
    let summary = pipeline
        .run(&image, &output_dir, &prefix)
        .await
        .with_context(|| format!("Failed to build deck from {}", image.display()))?;

    tracing::debug!("Run summary: {}", serde_json::to_string(&summary)?);
    if !summary.failed_words.is_empty() {
        tracing::warn!(
            "No audio for {} word(s): {}",
            summary.failed_words.len(),
            summary.failed_words.join(", ")
        );
    }

    println!("Anki Deck file created at: {}", summary.deck_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_both_flags() {
        assert!(Cli::try_parse_from(["spelldeck", "--image", "a.jpg"]).is_err());
        assert!(Cli::try_parse_from(["spelldeck", "--output", "out"]).is_err());
    }

    #[test]
    fn test_cli_parses_paths() {
        let cli =
            Cli::try_parse_from(["spelldeck", "--image", "a.jpg", "--output", "out", "-v"]).unwrap();
        assert_eq!(cli.image, PathBuf::from("a.jpg"));
        assert_eq!(cli.output, PathBuf::from("out"));
        assert!(cli.verbose);
        assert!(!cli.json_logs);
    }
}
