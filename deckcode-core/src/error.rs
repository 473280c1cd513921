//! Error types for Deckcode operations

/// Errors that can occur while encoding a message into a deck or decoding it back
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// No packing strategy fits the bit string into the free region
    #[error("Encoding infeasible: {bits} message bits do not fit the free region")]
    EncodingInfeasible {
        /// Length of the compressed bit string that failed to pack.
        bits: usize,
    },

    /// Input deck is not a valid 52-symbol permutation or lacks its framing
    #[error("Malformed deck: {0}")]
    MalformedDeck(String),

    /// A rank at or beyond the permutation count reached `unrank`
    #[error("Rank {rank} out of range: alphabet has only {count} permutations")]
    UnrankOutOfRange {
        /// The requested rank.
        rank: u128,
        /// Number of distinct permutations of the alphabet.
        count: u128,
    },

    /// Descriptor symbol does not name a known domain/strategy pair
    #[error("Unknown scheme descriptor symbol: {0}")]
    UnknownScheme(u8),

    /// Alphabet too long for exact rank arithmetic
    #[error("Alphabet of {len} symbols exceeds the rankable maximum of {max}")]
    AlphabetTooLarge {
        /// Length of the offending alphabet.
        len: usize,
        /// Largest supported alphabet length.
        max: usize,
    },

    /// Target sequence is not an arrangement of the base alphabet
    #[error("Invalid arrangement: {0}")]
    InvalidArrangement(String),

    /// Character has no code in the active entropy coder
    #[error("Unsupported character: {0:?}")]
    UnsupportedCharacter(char),

    /// Bit string does not decode to a whole number of codewords
    #[error("Invalid code at bit position {position}")]
    InvalidCode {
        /// Bit offset where decoding stopped.
        position: usize,
    },

    /// Lookup table source could not be parsed
    #[error("Dictionary error on line {line}: {reason}")]
    Dictionary {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// Classifier rule pattern failed to compile
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// IO error while loading a lookup table
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err.to_string())
    }
}

impl From<regex::Error> for CodecError {
    fn from(err: regex::Error) -> Self {
        CodecError::InvalidPattern(err.to_string())
    }
}
