use super::TableOptions;
use anyhow::{Context, Result};
use colored::*;
use deckcode_core::Deck;
use std::fs;
use tracing::info;

/// Encode `text`, returning the deck without printing it
pub fn encode_text(text: &str, tables: &TableOptions) -> Result<Deck> {
    let codec = tables.codec()?;
    codec
        .encode(text)
        .with_context(|| format!("Failed to encode message {:?}", text))
}

pub fn execute(text: &str, output: Option<&str>, json: bool, tables: &TableOptions) -> Result<()> {
    info!("Encoding {} characters", text.chars().count());

    let deck = encode_text(text, tables)?;
    let rendered = if json {
        serde_json::to_string(&deck).context("Failed to serialize deck")?
    } else {
        deck.to_string()
    };

    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", rendered))
                .with_context(|| format!("Failed to write output file: {}", path))?;
            println!("{} Wrote deck to {}", "✓".green(), path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
