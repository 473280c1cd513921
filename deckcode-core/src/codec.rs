//! Text to deck encoding and back
//!
//! Encoding steps:
//! 1. classify the text and compress it with its domain's text codec,
//!    falling back to [`Domain::Generic`] when that codec would lose it
//! 2. try each [`PackingStrategy`] in order until one yields a valid deck
//! 3. lay out filler, descriptor substrate, sentinel, message and scheme
//!
//! Decoding reads the scheme symbol back and reverses each step.

use crate::deck::DeckAssembler;
use crate::dictionary::{AbbreviationTable, Lexicon};
use crate::domain::{Domain, DomainClassifier, TextCodec};
use crate::error::CodecError;
use crate::metadata::{self, SchemeDescriptor};
use crate::packer::{self, PackingDescriptor};
use crate::permutation;
use crate::types::{BitString, Deck, PackingStrategy, Symbol};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// Everything a deck reveals about how it was built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckReport {
    /// Domain and packing strategy
    pub scheme: SchemeDescriptor,

    /// Raw scheme descriptor symbol
    pub scheme_symbol: Symbol,

    /// Chunk packing descriptor, for chunked decks
    pub descriptor: Option<PackingDescriptor>,

    /// Symbols ahead of the sentinel, filler removed
    pub substrate: Vec<Symbol>,

    /// Symbols carrying the message
    pub message: Vec<Symbol>,

    /// Compressed message bits
    pub bits: String,

    /// Decoded text, if the bits decompress
    pub text: Option<String>,
}

/// Encoder and decoder between text and decks
#[derive(Debug, Clone)]
pub struct DeckCodec {
    classifier: DomainClassifier,
    codecs: [TextCodec; 8],
    assembler: DeckAssembler,
}

impl DeckCodec {
    /// Codec with the built-in tables
    pub fn new() -> Result<Self, CodecError> {
        Self::builder().build()
    }

    /// Start configuring a codec
    pub fn builder() -> DeckCodecBuilder {
        DeckCodecBuilder::new()
    }

    /// Domain the classifier assigns to `text`
    pub fn classify(&self, text: &str) -> Domain {
        self.classifier.classify(text)
    }

    /// Text codec used for a domain
    pub fn text_codec(&self, domain: Domain) -> &TextCodec {
        &self.codecs[domain.index() as usize]
    }

    /// Encode a message into a deck
    pub fn encode(&self, text: &str) -> Result<Deck, CodecError> {
        let mut domain = self.classify(text);
        if domain != Domain::Generic && !self.text_codec(domain).is_lossless_for(text) {
            #[cfg(feature = "logging")]
            debug!("{} codec is lossy for this message, using generic", domain);
            domain = Domain::Generic;
        }

        let bits = self.text_codec(domain).compress(text)?;

        #[cfg(feature = "logging")]
        debug!("Compressed {} chars to {} bits ({})", text.chars().count(), bits.len(), domain);

        self.encode_bits(domain, &bits)
    }

    /// Pack already-compressed bits into a deck labelled with `domain`
    pub fn encode_bits(&self, domain: Domain, bits: &BitString) -> Result<Deck, CodecError> {
        for strategy in PackingStrategy::ALL {
            let scheme_symbol = metadata::encode(SchemeDescriptor::new(domain, strategy));
            let available = self.assembler.available_symbols(scheme_symbol);

            let parts = match strategy {
                PackingStrategy::Chunked => Self::pack_chunked(bits, &available),
                PackingStrategy::Permutation => {
                    permutation::pack(bits, &available).map(|message| (Vec::new(), message))
                }
            };

            let (substrate, message) = match parts {
                Some(parts) => parts,
                None => {
                    #[cfg(feature = "logging")]
                    trace!("{} packing does not fit {} bits", strategy, bits.len());
                    continue;
                }
            };

            let deck = self.assembler.assemble(scheme_symbol, &substrate, &message);
            if deck.is_identity() {
                continue;
            }

            #[cfg(feature = "logging")]
            debug!(
                "Encoded {} bits with {} packing into {} message symbols",
                bits.len(),
                strategy,
                message.len()
            );

            return Ok(deck);
        }

        Err(CodecError::EncodingInfeasible { bits: bits.len() })
    }

    /// Decode a deck back to its message
    pub fn decode(&self, deck: &Deck) -> Result<String, CodecError> {
        let (scheme, bits) = self.decode_bits(deck)?;
        self.text_codec(scheme.domain).decompress(&bits)
    }

    /// Recover the scheme and compressed bits without decompressing
    pub fn decode_bits(&self, deck: &Deck) -> Result<(SchemeDescriptor, BitString), CodecError> {
        let parts = self.assembler.disassemble(deck)?;
        let scheme = metadata::decode(parts.scheme_symbol)?;

        let bits = match scheme.strategy {
            PackingStrategy::Chunked => {
                let descriptor =
                    PackingDescriptor::from_substrate(&parts.substrate, parts.message.len())?;
                packer::unpack(&parts.message, &descriptor)?
            }
            PackingStrategy::Permutation => permutation::unpack(&parts.message)?,
        };

        #[cfg(feature = "logging")]
        debug!(
            "Decoded {} bits from {} message symbols ({}, {})",
            bits.len(),
            parts.message.len(),
            scheme.domain,
            scheme.strategy
        );

        Ok((scheme, bits))
    }

    /// Describe how a deck was built
    pub fn inspect(&self, deck: &Deck) -> Result<DeckReport, CodecError> {
        let parts = self.assembler.disassemble(deck)?;
        let scheme = metadata::decode(parts.scheme_symbol)?;
        let descriptor = match scheme.strategy {
            PackingStrategy::Chunked => Some(PackingDescriptor::from_substrate(
                &parts.substrate,
                parts.message.len(),
            )?),
            PackingStrategy::Permutation => None,
        };
        let (_, bits) = self.decode_bits(deck)?;
        let text = self.text_codec(scheme.domain).decompress(&bits).ok();

        Ok(DeckReport {
            scheme,
            scheme_symbol: parts.scheme_symbol,
            descriptor,
            substrate: parts.substrate,
            message: parts.message,
            bits: bits.to_string(),
            text,
        })
    }

    fn pack_chunked(bits: &BitString, available: &[Symbol]) -> Option<(Vec<Symbol>, Vec<Symbol>)> {
        let packed = packer::pack(bits, available)?;
        let unused: Vec<Symbol> = available
            .iter()
            .copied()
            .filter(|s| !packed.symbols.contains(s))
            .collect();
        let substrate = packed.descriptor.to_substrate(&unused).ok()?;
        Some((substrate, packed.symbols))
    }
}

/// Builder for [`DeckCodec`]
#[derive(Debug, Clone, Default)]
pub struct DeckCodecBuilder {
    abbreviations: Option<Arc<AbbreviationTable>>,
    words: Option<Arc<Lexicon>>,
    names: Option<Arc<Lexicon>>,
    assembler: DeckAssembler,
}

impl DeckCodecBuilder {
    /// Create a new builder using the built-in tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the abbreviation table for the words domain
    pub fn abbreviations(mut self, table: AbbreviationTable) -> Self {
        self.abbreviations = Some(Arc::new(table));
        self
    }

    /// Set the lexicon that defines the words domain
    pub fn words(mut self, lexicon: Lexicon) -> Self {
        self.words = Some(Arc::new(lexicon));
        self
    }

    /// Set the lexicon of names and places
    pub fn names(mut self, lexicon: Lexicon) -> Self {
        self.names = Some(Arc::new(lexicon));
        self
    }

    /// Build the codec
    pub fn build(self) -> Result<DeckCodec, CodecError> {
        let abbreviations = self
            .abbreviations
            .unwrap_or_else(|| Arc::new(AbbreviationTable::builtin()));
        let words = self
            .words
            .unwrap_or_else(|| Arc::new(Lexicon::common_words()));
        let names = self
            .names
            .unwrap_or_else(|| Arc::new(Lexicon::names_and_places()));

        Ok(DeckCodec {
            classifier: DomainClassifier::standard(words, names)?,
            codecs: Domain::ALL.map(|domain| TextCodec::for_domain(domain, &abbreviations)),
            assembler: self.assembler,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FILLER_REGION, SENTINEL};

    fn codec() -> DeckCodec {
        DeckCodec::new().unwrap()
    }

    #[test]
    fn test_round_trip() {
        let codec = codec();
        let deck = codec.encode("attack at dawn").unwrap();
        assert_eq!(codec.decode(&deck).unwrap(), "attack at dawn");
    }

    #[test]
    fn test_deck_layout() {
        let codec = codec();
        let deck = codec.encode("hello").unwrap();
        let cards = deck.cards();

        assert_eq!(&cards[..19], &FILLER_REGION.collect::<Vec<_>>()[..]);
        assert!(deck.position(SENTINEL).unwrap() > 19);
        assert!(cards[51] < 16);
    }

    #[test]
    fn test_empty_text() {
        let codec = codec();
        let deck = codec.encode("").unwrap();
        assert!(!deck.is_identity());
        assert_eq!(codec.decode(&deck).unwrap(), "");
    }

    #[test]
    fn test_lossy_domain_falls_back_to_generic() {
        // "mtg" is a word here but also the abbreviation of "meeting"
        let codec = DeckCodec::builder()
            .words(Lexicon::parse("mtg\nnow\n"))
            .build()
            .unwrap();
        assert_eq!(codec.classify("mtg now"), Domain::Words);

        let deck = codec.encode("mtg now").unwrap();
        let report = codec.inspect(&deck).unwrap();
        assert_eq!(report.scheme.domain, Domain::Generic);
        assert_eq!(report.text.as_deref(), Some("mtg now"));
        assert_eq!(codec.decode(&deck).unwrap(), "mtg now");
    }

    #[test]
    fn test_identity_deck_is_malformed() {
        assert!(matches!(
            codec().decode(&Deck::identity()),
            Err(CodecError::MalformedDeck(_))
        ));
    }

    #[test]
    fn test_unsupported_character() {
        assert_eq!(
            codec().encode("caf\u{e9}"),
            Err(CodecError::UnsupportedCharacter('\u{e9}'))
        );
    }

    #[test]
    fn test_encode_bits_strategies() {
        let codec = codec();
        let short: BitString = "000001".parse().unwrap();
        let deck = codec.encode_bits(Domain::Generic, &short).unwrap();
        let (scheme, bits) = codec.decode_bits(&deck).unwrap();
        assert_eq!(scheme.strategy, PackingStrategy::Chunked);
        assert_eq!(bits, short);

        // repeated zero chunks cannot be probed apart; one permutation still fits
        let long: BitString = core::iter::repeat(false).take(100).collect();
        let deck = codec.encode_bits(Domain::Generic, &long).unwrap();
        let (scheme, bits) = codec.decode_bits(&deck).unwrap();
        assert_eq!(scheme.strategy, PackingStrategy::Permutation);
        assert_eq!(bits, long);
    }

    #[test]
    fn test_infeasible() {
        let bits: BitString = core::iter::repeat(true).take(200).collect();
        assert_eq!(
            codec().encode_bits(Domain::Generic, &bits),
            Err(CodecError::EncodingInfeasible { bits: 200 })
        );
    }

    #[test]
    fn test_custom_words_lexicon() {
        let codec = DeckCodec::builder()
            .words(Lexicon::parse("zebra\nquokka\n"))
            .build()
            .unwrap();
        assert_eq!(codec.classify("zebra quokka"), Domain::Words);
        assert_ne!(codec.classify("attack at dawn"), Domain::Words);
    }
}
