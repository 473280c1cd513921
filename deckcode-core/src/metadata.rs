//! Scheme descriptor framing
//!
//! The scheme descriptor fits in four bits and so travels as one symbol:
//!
//! ```text
//! + ----------------- + ---------------- +
//! | domain (3 bits)   | strategy (1 bit) |
//! + ----------------- + ---------------- +
//! ```

use crate::constants::SCHEME_SYMBOL_LIMIT;
use crate::domain::Domain;
use crate::error::CodecError;
use crate::types::{PackingStrategy, Symbol};
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use tracing::trace;

/// Which text codec and which packing algorithm produced a deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemeDescriptor {
    /// Domain whose text codec compressed the message
    pub domain: Domain,

    /// Algorithm that turned the bits into message symbols
    pub strategy: PackingStrategy,
}

impl SchemeDescriptor {
    /// Create a new scheme descriptor
    pub const fn new(domain: Domain, strategy: PackingStrategy) -> Self {
        Self { domain, strategy }
    }
}

/// Encode a scheme descriptor as a single symbol in `0..16`
pub fn encode(scheme: SchemeDescriptor) -> Symbol {
    let symbol = (scheme.domain.index() << 1) | scheme.strategy.index();

    #[cfg(feature = "logging")]
    trace!(
        "Scheme {:?}/{} -> symbol {} ({:04b})",
        scheme.domain,
        scheme.strategy,
        symbol,
        symbol
    );

    symbol
}

/// Decode the scheme descriptor symbol
pub fn decode(symbol: Symbol) -> Result<SchemeDescriptor, CodecError> {
    if symbol >= SCHEME_SYMBOL_LIMIT {
        return Err(CodecError::UnknownScheme(symbol));
    }

    let domain = Domain::from_index(symbol >> 1).ok_or(CodecError::UnknownScheme(symbol))?;
    let strategy =
        PackingStrategy::from_index(symbol & 1).ok_or(CodecError::UnknownScheme(symbol))?;

    Ok(SchemeDescriptor { domain, strategy })
}
