use super::{read_deck, TableOptions};
use anyhow::{Context, Result};
use tracing::info;

/// Decode a deck to its message without printing it
pub fn decode_text(deck: Option<&str>, input: Option<&str>, tables: &TableOptions) -> Result<String> {
    let deck = read_deck(deck, input)?;
    let codec = tables.codec()?;
    codec.decode(&deck).context("Failed to decode deck")
}

pub fn execute(deck: Option<&str>, input: Option<&str>, tables: &TableOptions) -> Result<()> {
    let text = decode_text(deck, input, tables)?;
    info!("Decoded {} characters", text.chars().count());
    println!("{}", text);
    Ok(())
}
