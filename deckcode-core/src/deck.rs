//! Deck assembly and disassembly
//!
//! A message deck is laid out front to back as:
//!
//! ```text
//! + -------- + ------------ + --------- + -------- + ------- + ------ +
//! | filler   | unused free  | substrate | sentinel | message | scheme |
//! + -------- + ------------ + --------- + -------- + ------- + ------ +
//! ```
//!
//! Filler symbols are removed by value on the way back in, so they may end up
//! anywhere in the deck without affecting decoding.

use crate::constants::{DECK_SIZE, FILLER_REGION, SENTINEL};
use crate::error::CodecError;
use crate::types::{Deck, Symbol};

#[cfg(feature = "logging")]
use tracing::{trace, warn};

/// The information-bearing regions of a deck
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckParts {
    /// Trailing scheme descriptor symbol
    pub scheme_symbol: Symbol,

    /// Non-filler symbols ahead of the sentinel
    pub substrate: Vec<Symbol>,

    /// Symbols between the sentinel and the scheme descriptor
    pub message: Vec<Symbol>,
}

/// Composes and splits decks around a fixed filler set and sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckAssembler {
    filler: Vec<Symbol>,
    sentinel: Symbol,
}

impl Default for DeckAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckAssembler {
    /// Assembler for the standard layout: filler `32..=50`, sentinel `51`
    pub fn new() -> Self {
        Self {
            filler: FILLER_REGION.collect(),
            sentinel: SENTINEL,
        }
    }

    /// Assembler for a custom filler set and sentinel
    pub fn with_layout(filler: Vec<Symbol>, sentinel: Symbol) -> Self {
        Self { filler, sentinel }
    }

    /// Filler symbols, in deck order
    pub fn filler(&self) -> &[Symbol] {
        &self.filler
    }

    /// Sentinel symbol
    pub fn sentinel(&self) -> Symbol {
        self.sentinel
    }

    /// Symbols a message may use once `scheme_symbol` is reserved, ascending
    pub fn available_symbols(&self, scheme_symbol: Symbol) -> Vec<Symbol> {
        (0..DECK_SIZE as u8)
            .filter(|&s| s != self.sentinel && s != scheme_symbol && !self.filler.contains(&s))
            .collect()
    }

    /// Lay out a deck.
    ///
    /// If the parts overlap each other or the reserved symbols, the result
    /// would not be a permutation; the identity deck is returned instead,
    /// which never decodes to a message.
    pub fn assemble(
        &self,
        scheme_symbol: Symbol,
        substrate: &[Symbol],
        message: &[Symbol],
    ) -> Deck {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        cards.extend_from_slice(&self.filler);
        cards.extend((0..DECK_SIZE as u8).filter(|s| {
            *s != self.sentinel
                && *s != scheme_symbol
                && !self.filler.contains(s)
                && !substrate.contains(s)
                && !message.contains(s)
        }));
        cards.extend_from_slice(substrate);
        cards.push(self.sentinel);
        cards.extend_from_slice(message);
        cards.push(scheme_symbol);

        match Deck::new(cards) {
            Ok(deck) => {
                #[cfg(feature = "logging")]
                trace!(
                    "Assembled deck: {} substrate, {} message symbols",
                    substrate.len(),
                    message.len()
                );
                deck
            }
            Err(_err) => {
                #[cfg(feature = "logging")]
                warn!("Deck parts do not form a permutation ({}), using identity", _err);
                Deck::identity()
            }
        }
    }

    /// Split a deck back into the parts [`DeckAssembler::assemble`] laid out
    pub fn disassemble(&self, deck: &Deck) -> Result<DeckParts, CodecError> {
        let remaining: Vec<Symbol> = deck
            .cards()
            .iter()
            .copied()
            .filter(|s| !self.filler.contains(s))
            .collect();

        let stop = remaining
            .iter()
            .position(|&s| s == self.sentinel)
            .ok_or_else(|| CodecError::MalformedDeck("sentinel missing".into()))?;

        if stop + 1 >= remaining.len() {
            return Err(CodecError::MalformedDeck(
                "no scheme descriptor after the sentinel".into(),
            ));
        }

        let last = remaining.len() - 1;
        Ok(DeckParts {
            scheme_symbol: remaining[last],
            substrate: remaining[..stop].to_vec(),
            message: remaining[stop + 1..last].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_layout() {
        let assembler = DeckAssembler::new();
        let deck = assembler.assemble(14, &[31, 29, 30], &[5, 1, 7]);
        let cards = deck.cards();

        assert_eq!(&cards[..19], &FILLER_REGION.collect::<Vec<_>>()[..]);
        assert_eq!(&cards[cards.len() - 5..], &[SENTINEL, 5, 1, 7, 14]);
        assert_eq!(&cards[cards.len() - 8..cards.len() - 5], &[31, 29, 30]);
        // unused free symbols ascend ahead of the substrate
        assert_eq!(cards[19], 0);
        assert_eq!(cards[20], 2);
    }

    #[test]
    fn test_disassemble_inverts_assemble() {
        let assembler = DeckAssembler::new();
        let deck = assembler.assemble(3, &[30, 28, 31, 29], &[10, 0, 20]);
        let parts = assembler.disassemble(&deck).unwrap();

        assert_eq!(parts.scheme_symbol, 3);
        assert_eq!(parts.message, vec![10, 0, 20]);
        assert_eq!(&parts.substrate[parts.substrate.len() - 4..], &[30, 28, 31, 29]);
    }

    #[test]
    fn test_empty_message() {
        let assembler = DeckAssembler::new();
        let deck = assembler.assemble(9, &[], &[]);
        let parts = assembler.disassemble(&deck).unwrap();
        assert_eq!(parts.scheme_symbol, 9);
        assert!(parts.message.is_empty());
    }

    #[test]
    fn test_filler_may_move() {
        let assembler = DeckAssembler::new();
        let deck = assembler.assemble(2, &[31, 30], &[4, 6]);

        // scatter filler cards through the deck
        let mut cards = deck.into_vec();
        let filler: Vec<u8> = cards.drain(..19).collect();
        let mut scattered = Vec::new();
        for (i, card) in cards.into_iter().enumerate() {
            scattered.push(card);
            if let Some(&f) = filler.get(i) {
                scattered.push(f);
            }
        }
        let shuffled = Deck::new(scattered).unwrap();

        let parts = assembler.disassemble(&shuffled).unwrap();
        assert_eq!(parts.scheme_symbol, 2);
        assert_eq!(parts.message, vec![4, 6]);
    }

    #[test]
    fn test_filler_at_random_positions() {
        use rand::{Rng, SeedableRng};

        let assembler = DeckAssembler::new();
        let deck = assembler.assemble(12, &[29, 31, 30], &[0, 9, 3, 17]);
        let mut rng = rand::rngs::StdRng::seed_from_u64(52);

        for _ in 0..20 {
            let mut cards: Vec<u8> = deck
                .cards()
                .iter()
                .copied()
                .filter(|c| !FILLER_REGION.contains(c))
                .collect();
            for filler in FILLER_REGION {
                let at = rng.gen_range(0..=cards.len());
                cards.insert(at, filler);
            }

            let parts = assembler.disassemble(&Deck::new(cards).unwrap()).unwrap();
            assert_eq!(parts.scheme_symbol, 12);
            assert_eq!(parts.message, vec![0, 9, 3, 17]);
        }
    }

    #[test]
    fn test_overlap_falls_back_to_identity() {
        let assembler = DeckAssembler::new();
        assert!(assembler.assemble(4, &[], &[4]).is_identity());
        assert!(assembler.assemble(1, &[], &[40]).is_identity());
        assert!(assembler.assemble(1, &[7], &[7]).is_identity());

        let custom = DeckAssembler::with_layout(vec![5, 6], 51);
        assert!(custom.assemble(1, &[], &[5]).is_identity());
    }

    #[test]
    fn test_identity_deck_is_malformed() {
        let assembler = DeckAssembler::new();
        assert!(matches!(
            assembler.disassemble(&Deck::identity()),
            Err(CodecError::MalformedDeck(_))
        ));
    }

    #[test]
    fn test_available_symbols() {
        let assembler = DeckAssembler::new();
        let available = assembler.available_symbols(7);
        assert_eq!(available.len(), 31);
        assert!(!available.contains(&7));
        assert_eq!(available.last(), Some(&31));
    }
}
