//! # Deckcode Core
//!
//! Hides a short text message in the ordering of a 52-card deck. The ordering
//! alone carries the message and the scheme needed to read it back.
//!
//! ## Modules
//!
//! - `constants`: Deck layout constants and limits
//! - `types`: Core types (Deck, BitString, PackingStrategy)
//! - `rank`: Permutation rank/unrank over (multi)set alphabets
//! - `packer`: Chunked bit packing with linear-probe collision resolution
//! - `permutation`: Whole-message permutation packing
//! - `metadata`: Scheme descriptor symbol
//! - `deck`: Deck assembly and disassembly
//! - `huffman`: Character Huffman coder
//! - `dictionary`: Abbreviation tables and lexicons
//! - `domain`: Message domains, classifier and text codecs
//! - `codec`: Text to deck encoding and back

#![warn(missing_docs)]

extern crate alloc;

pub mod codec;
pub mod constants;
pub mod deck;
pub mod dictionary;
pub mod domain;
pub mod error;
pub mod huffman;
pub mod metadata;
pub mod packer;
pub mod permutation;
pub mod rank;
pub mod types;

// Re-export commonly used types
pub use codec::{DeckCodec, DeckCodecBuilder, DeckReport};
pub use domain::Domain;
pub use error::CodecError;
pub use metadata::SchemeDescriptor;
pub use packer::PackingDescriptor;
pub use types::{BitString, Deck, PackingStrategy, Symbol};

/// Result type alias for Deckcode operations
pub type Result<T> = core::result::Result<T, CodecError>;
