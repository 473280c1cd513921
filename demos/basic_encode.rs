//! Basic encoding example

use deckcode_core::DeckCodec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Deckcode Basic Encoding Example\n");

    let codec = DeckCodec::new()?;
    let messages = [
        "attack at dawn",
        "40.7128 N, 74.0060 W",
        "@hunter2",
        "Maria Paris",
        "Meet at 5!",
    ];

    let mut lines = Vec::new();
    for text in messages {
        let deck = codec.encode(text)?;
        let report = codec.inspect(&deck)?;

        println!(
            "{:<22} {} / {} ({} message cards)",
            text,
            report.scheme.domain,
            report.scheme.strategy,
            report.message.len()
        );
        lines.push(deck.to_string());
    }

    std::fs::write("example_decks.txt", lines.join("\n"))?;

    println!("\nWrote {} decks to example_decks.txt", lines.len());
    println!("Use 'deckcode decode --input <file>' on any single line to read it back");

    Ok(())
}
