use super::{read_deck, TableOptions};
use anyhow::{Context, Result};
use colored::*;
use deckcode_core::DeckReport;

/// Describe a deck without printing it
pub fn inspect_deck(
    deck: Option<&str>,
    input: Option<&str>,
    tables: &TableOptions,
) -> Result<DeckReport> {
    let deck = read_deck(deck, input)?;
    let codec = tables.codec()?;
    codec.inspect(&deck).context("Failed to inspect deck")
}

pub fn execute(
    deck: Option<&str>,
    input: Option<&str>,
    json: bool,
    tables: &TableOptions,
) -> Result<()> {
    let report = inspect_deck(deck, input, tables)?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("\n=== Scheme ===");
    println!("Symbol:          {}", report.scheme_symbol);
    println!("Domain:          {}", report.scheme.domain);
    println!("Strategy:        {}", report.scheme.strategy);

    if let Some(descriptor) = &report.descriptor {
        println!("\n=== Packing Descriptor ===");
        println!("Step size:       {}", descriptor.step_size);
        println!("Start padding:   {}", descriptor.start_padding);
        println!("End padding:     {}", descriptor.end_padding);
        let widths: String = descriptor
            .short_chunks
            .iter()
            .map(|&short| if short { '1' } else { '0' })
            .collect();
        println!("Short chunks:    {}", widths);
    }

    println!("\n=== Message ===");
    println!("Substrate:       {:?}", report.substrate);
    println!("Symbols:         {:?}", report.message);
    println!("Bits ({:>3}):      {}", report.bits.len(), report.bits);

    match &report.text {
        Some(text) => println!("{} Text: {}", "✓".green(), text),
        None => println!("{} Bits do not decompress", "✗".red()),
    }

    Ok(())
}
