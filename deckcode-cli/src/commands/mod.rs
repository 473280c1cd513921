//! Command implementations and the helpers they share

pub mod decode;
pub mod encode;
pub mod inspect;

use anyhow::{bail, Context, Result};
use deckcode_core::dictionary::{AbbreviationTable, Lexicon};
use deckcode_core::{Deck, DeckCodec};
use std::fs::{self, File};
use std::io::BufReader;
use tracing::info;

/// Lookup table files that override the built-in tables
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// `"<short> <full>"` abbreviation file
    pub abbreviations: Option<String>,
    /// One-word-per-line lexicon for the words domain
    pub words: Option<String>,
    /// One-word-per-line lexicon of names and places
    pub names: Option<String>,
}

impl TableOptions {
    /// Build a codec from the built-in tables and any overrides
    pub fn codec(&self) -> Result<DeckCodec> {
        let mut builder = DeckCodec::builder();

        if let Some(path) = &self.abbreviations {
            let file = File::open(path)
                .with_context(|| format!("Failed to open abbreviation file: {}", path))?;
            let table = AbbreviationTable::from_reader(BufReader::new(file))
                .with_context(|| format!("Failed to parse abbreviation file: {}", path))?;
            info!("Loaded {} abbreviations from {}", table.len(), path);
            builder = builder.abbreviations(table);
        }

        if let Some(path) = &self.words {
            builder = builder.words(load_lexicon(path)?);
        }

        if let Some(path) = &self.names {
            builder = builder.names(load_lexicon(path)?);
        }

        builder.build().context("Failed to build codec")
    }
}

fn load_lexicon(path: &str) -> Result<Lexicon> {
    let file = File::open(path).with_context(|| format!("Failed to open lexicon: {}", path))?;
    let lexicon = Lexicon::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to read lexicon: {}", path))?;
    info!("Loaded {} words from {}", lexicon.len(), path);
    Ok(lexicon)
}

/// Parse a deck given as a JSON array or as whitespace/comma separated cards
pub fn parse_deck(text: &str) -> Result<Deck> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') {
        serde_json::from_str(trimmed).context("Failed to parse deck JSON")
    } else {
        trimmed.parse().context("Failed to parse deck")
    }
}

/// Read a deck from `--deck` or from the file named by `--input`
pub fn read_deck(deck: Option<&str>, input: Option<&str>) -> Result<Deck> {
    match (deck, input) {
        (Some(cards), None) => parse_deck(cards),
        (None, Some(path)) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read deck file: {}", path))?;
            parse_deck(&content).with_context(|| format!("Invalid deck in {}", path))
        }
        (Some(_), Some(_)) => bail!("Pass either --deck or --input, not both"),
        (None, None) => bail!("A deck is required: pass --deck or --input"),
    }
}
