//! Fuzzing entry points for deckcode-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_decode

use deckcode_core::{rank, BitString, Deck, DeckCodec, PackingDescriptor};

/// Shuffle the identity deck with `data` as the swap source
fn shuffled_deck(data: &[u8]) -> Option<Deck> {
    let mut cards: Vec<u8> = (0..52).collect();
    for (i, &byte) in data.iter().take(51).enumerate() {
        let j = i + byte as usize % (52 - i);
        cards.swap(i, j);
    }
    Deck::new(cards).ok()
}

pub fn fuzz_decode(data: &[u8]) {
    let Ok(codec) = DeckCodec::new() else {
        return;
    };

    // Try to decode - should never panic
    if let Some(deck) = shuffled_deck(data) {
        let _ = codec.decode(&deck);
        let _ = codec.inspect(&deck);
    }

    if let Ok(deck) = Deck::from_slice(data) {
        let _ = codec.decode(&deck);
    }
}

pub fn fuzz_rank(data: &[u8]) {
    let symbols = &data[..data.len().min(34)];

    // Rank and unrank must agree whenever rank succeeds
    if let Ok(r) = rank::rank(symbols, symbols) {
        let arranged = rank::unrank(r, symbols).ok();
        assert_eq!(arranged.as_deref(), Some(symbols));
    }
}

pub fn fuzz_unpack(data: &[u8]) {
    let bits: BitString = data.iter().map(|b| b & 1 == 1).collect();
    let symbols: Vec<u8> = data.iter().map(|b| b % 32).collect();

    // Arbitrary descriptors must be rejected, not panic
    if let Ok(descriptor) = PackingDescriptor::from_bits(&bits) {
        let _ = deckcode_core::packer::unpack(&symbols, &descriptor);
    }
    let _ = deckcode_core::permutation::unpack(&symbols);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzz_decode_empty() {
        fuzz_decode(&[]);
    }

    #[test]
    fn test_fuzz_decode_random() {
        fuzz_decode(&[0x12, 0x34, 0x56, 0x78]);
        fuzz_decode(&[0xFF; 52]);
    }

    #[test]
    fn test_fuzz_rank_empty() {
        fuzz_rank(&[]);
    }

    #[test]
    fn test_fuzz_rank_random() {
        fuzz_rank(&[3, 1, 2, 0]);
        fuzz_rank(&[7, 7, 1, 9, 1]);
        fuzz_rank(&[0xAB; 64]);
    }

    #[test]
    fn test_fuzz_unpack_random() {
        fuzz_unpack(&[]);
        fuzz_unpack(&[0x5A; 40]);
    }
}
