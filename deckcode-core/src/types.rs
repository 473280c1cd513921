//! Core types: symbols, bit strings and decks

use crate::constants::DECK_SIZE;
use crate::error::CodecError;
use bitvec::prelude::*;
use core::fmt;
use core::ops::Range;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// One card of the deck, an integer in `0..52`
pub type Symbol = u8;

/// Widest value [`BitString::value_of`] can return
const VALUE_BITS: usize = u128::BITS as usize;

/// Arbitrary-length sequence of bits, most significant first
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitString {
    bits: BitVec<u8, Msb0>,
}

impl BitString {
    /// Create an empty bit string
    pub fn new() -> Self {
        Self { bits: BitVec::new() }
    }

    /// Create an empty bit string with room for `capacity` bits
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: BitVec::with_capacity(capacity),
        }
    }

    /// Create a bit string from individual bits
    pub fn from_bits(bits: Vec<bool>) -> Self {
        bits.into_iter().collect()
    }

    /// Create a bit string holding the low `width` bits of `value`
    pub fn from_value(value: u128, width: usize) -> Self {
        let mut bits = Self::with_capacity(width);
        bits.push_value(value, width);
        bits
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the bit string holds no bits
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Append one bit
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Append the low `width` bits of `value`, MSB first.
    ///
    /// Widths past 128 bits are left-filled with zeros.
    pub fn push_value(&mut self, value: u128, width: usize) {
        let overflow = width.saturating_sub(VALUE_BITS);
        self.push_zeros(overflow);

        let width = width - overflow;
        if width == 0 {
            return;
        }
        let start = self.bits.len();
        self.bits.resize(start + width, false);
        self.bits[start..].store_be(value);
    }

    /// Append `count` zero bits
    pub fn push_zeros(&mut self, count: usize) {
        self.bits.resize(self.bits.len() + count, false);
    }

    /// Append another bit string
    pub fn extend_from(&mut self, other: &BitString) {
        self.bits.extend_from_bitslice(&other.bits);
    }

    /// Get the bit at `index`
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).map(|bit| *bit)
    }

    /// Borrow the bits
    pub fn as_bitslice(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Iterate over the bits
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().by_vals()
    }

    /// Copy out a sub-range of bits
    pub fn slice(&self, range: Range<usize>) -> BitString {
        Self {
            bits: self.bits[range].to_bitvec(),
        }
    }

    /// Interpret a sub-range as an unsigned integer.
    ///
    /// Only the last 128 bits of a wider range are kept.
    pub fn value_of(&self, range: Range<usize>) -> u128 {
        let bits = &self.bits[range];
        let bits = &bits[bits.len().saturating_sub(VALUE_BITS)..];
        if bits.is_empty() {
            return 0;
        }
        bits.load_be::<u128>()
    }

    /// Interpret the whole bit string (at most 128 bits) as an unsigned integer
    pub fn value(&self) -> u128 {
        self.value_of(0..self.bits.len())
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(CodecError::InvalidCode { position }),
            })
            .collect::<Result<BitString, _>>()
    }
}

impl FromIterator<bool> for BitString {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

/// Packing algorithm that produced the message symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingStrategy {
    /// Adaptive-width chunks with linear-probe collision resolution
    Chunked,
    /// Whole bit string ranked as one permutation of free symbols
    Permutation,
}

impl PackingStrategy {
    /// Strategies in the order encode tries them
    pub const ALL: [PackingStrategy; 2] = [PackingStrategy::Chunked, PackingStrategy::Permutation];

    /// One-bit index stored in the scheme descriptor
    pub const fn index(&self) -> u8 {
        match self {
            PackingStrategy::Chunked => 0,
            PackingStrategy::Permutation => 1,
        }
    }

    /// Look up a strategy by its index
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(PackingStrategy::Chunked),
            1 => Some(PackingStrategy::Permutation),
            _ => None,
        }
    }
}

impl fmt::Display for PackingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackingStrategy::Chunked => f.write_str("chunked"),
            PackingStrategy::Permutation => f.write_str("permutation"),
        }
    }
}

/// A full ordering of the 52 symbols, the only artifact that crosses the wire
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Deck {
    cards: Vec<Symbol>,
}

impl Deck {
    /// Create a deck, validating the permutation property
    pub fn new(cards: Vec<Symbol>) -> Result<Self, CodecError> {
        validate_permutation(&cards)?;
        Ok(Self { cards })
    }

    /// Create a deck from a slice of symbols
    pub fn from_slice(cards: &[Symbol]) -> Result<Self, CodecError> {
        Self::new(cards.to_vec())
    }

    /// The canonical fallback deck `0, 1, ..., 51`
    pub fn identity() -> Self {
        Self {
            cards: (0..DECK_SIZE as u8).collect(),
        }
    }

    /// Check if this is the identity fallback, which never carries a message
    pub fn is_identity(&self) -> bool {
        self.cards.iter().enumerate().all(|(i, &c)| i == c as usize)
    }

    /// Borrow the cards in order
    pub fn cards(&self) -> &[Symbol] {
        &self.cards
    }

    /// Position of a symbol in the deck
    pub fn position(&self, symbol: Symbol) -> Option<usize> {
        self.cards.iter().position(|&c| c == symbol)
    }

    /// Consume the deck into its cards
    pub fn into_vec(self) -> Vec<Symbol> {
        self.cards
    }
}

impl TryFrom<Vec<u8>> for Deck {
    type Error = CodecError;

    fn try_from(cards: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(cards)
    }
}

impl From<Deck> for Vec<u8> {
    fn from(deck: Deck) -> Self {
        deck.cards
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

/// Parses whitespace- or comma-separated integers
impl FromStr for Deck {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|tok| !tok.is_empty())
            .map(|tok| {
                tok.parse::<u8>()
                    .map_err(|_| CodecError::MalformedDeck(format!("invalid card {:?}", tok)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(cards)
    }
}

/// Check that `cards` is a permutation of `0..52`
pub fn validate_permutation(cards: &[Symbol]) -> Result<(), CodecError> {
    if cards.len() != DECK_SIZE {
        return Err(CodecError::MalformedDeck(format!(
            "expected {} cards, got {}",
            DECK_SIZE,
            cards.len()
        )));
    }

    let mut seen = [false; DECK_SIZE];
    for &card in cards {
        let slot = seen.get_mut(card as usize).ok_or_else(|| {
            CodecError::MalformedDeck(format!("card {} outside 0..{}", card, DECK_SIZE))
        })?;
        if *slot {
            return Err(CodecError::MalformedDeck(format!("card {} repeated", card)));
        }
        *slot = true;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_string_parse_and_display() {
        let bits: BitString = "0010110".parse().unwrap();
        assert_eq!(bits.len(), 7);
        assert_eq!(bits.to_string(), "0010110");
        assert_eq!(bits.value(), 0b0010110);
        assert!("01x".parse::<BitString>().is_err());
    }

    #[test]
    fn test_bit_string_push_value_keeps_leading_zeros() {
        let bits = BitString::from_value(3, 5);
        assert_eq!(bits.to_string(), "00011");
        assert_eq!(bits.value_of(3..5), 3);
    }

    #[test]
    fn test_bit_string_values_span_bytes() {
        let mut bits = BitString::from_value(0b101, 3);
        bits.push_value(0x1abc, 13);
        bits.push_value(1, 1);
        assert_eq!(bits.len(), 17);
        assert_eq!(bits.value_of(0..3), 0b101);
        assert_eq!(bits.value_of(3..16), 0x1abc);
        assert_eq!(bits.value_of(16..17), 1);
        assert_eq!(bits.value_of(5..5), 0);
        assert_eq!(bits.to_string(), "10111010101111001");
    }

    #[test]
    fn test_bit_string_full_width_values() {
        let bits = BitString::from_value(u128::MAX, 128);
        assert_eq!(bits.value(), u128::MAX);

        let wide = BitString::from_value(u128::MAX, 130);
        assert_eq!(wide.len(), 130);
        assert_eq!(wide.get(0), Some(false));
        assert_eq!(wide.get(2), Some(true));
        assert_eq!(wide.value(), u128::MAX);
        assert_eq!(wide.slice(1..4).to_string(), "011");
    }

    #[test]
    fn test_identity_deck() {
        let deck = Deck::identity();
        assert!(deck.is_identity());
        assert_eq!(deck.cards().len(), DECK_SIZE);
    }

    #[test]
    fn test_deck_rejects_duplicates_and_out_of_range() {
        let mut cards: Vec<u8> = (0..52).collect();
        cards[3] = 4;
        assert!(matches!(Deck::new(cards), Err(CodecError::MalformedDeck(_))));

        let mut cards: Vec<u8> = (0..52).collect();
        cards[0] = 52;
        assert!(matches!(Deck::new(cards), Err(CodecError::MalformedDeck(_))));

        assert!(Deck::new((0..51).collect()).is_err());
    }

    #[test]
    fn test_deck_parse_accepts_commas_and_spaces() {
        let text: String = (0..52u8)
            .rev()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let deck: Deck = text.parse().unwrap();
        assert_eq!(deck.cards()[0], 51);
        assert_eq!(deck.to_string().split(' ').count(), 52);
    }

    #[test]
    fn test_strategy_indices() {
        for strategy in PackingStrategy::ALL {
            assert_eq!(PackingStrategy::from_index(strategy.index()), Some(strategy));
        }
        assert_eq!(PackingStrategy::from_index(2), None);
    }
}
