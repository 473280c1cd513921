//! Whole-message permutation packing
//!
//! The bit string `b` of length `L` becomes the integer `2^L + int(b)`; the
//! leading one keeps leading zeros of `b` recoverable. That integer is ranked
//! onto the smallest `k` available symbols with `k!` above it. Denser than
//! chunking for long messages, and needs no descriptor substrate.

use crate::error::CodecError;
use crate::rank::{n_needed, permute_cards, rank_cards};
use crate::types::{BitString, Symbol};

#[cfg(feature = "logging")]
use tracing::debug;

/// Longest bit string whose length-marked value fits in a `u128`
pub const MAX_PERMUTATION_BITS: usize = 126;

/// Arrange the lowest `k` available symbols so their rank encodes `bits`.
///
/// Returns `None` if the value needs more symbols than are available.
pub fn pack(bits: &BitString, available: &[Symbol]) -> Option<Vec<Symbol>> {
    if bits.len() > MAX_PERMUTATION_BITS {
        return None;
    }

    let value = (1u128 << bits.len()) | bits.value();
    let needed = n_needed(value)?;
    if needed > available.len() {
        #[cfg(feature = "logging")]
        debug!(
            "Permutation of {} bits needs {} symbols, only {} available",
            bits.len(),
            needed,
            available.len()
        );
        return None;
    }

    let mut base = available.to_vec();
    base.sort_unstable();
    base.truncate(needed);
    permute_cards(&base, value).ok()
}

/// Recover the bit string from arranged message symbols
pub fn unpack(symbols: &[Symbol]) -> Result<BitString, CodecError> {
    let value = rank_cards(symbols)?;
    if value == 0 {
        return Err(CodecError::MalformedDeck(
            "permutation rank carries no length marker".into(),
        ));
    }

    let len = 127 - value.leading_zeros() as usize;
    Ok(BitString::from_value(value, len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free_region() -> Vec<u8> {
        (0..32).collect()
    }

    #[test]
    fn test_leading_zeros_survive() {
        let bits: BitString = "000101".parse().unwrap();
        let symbols = pack(&bits, &free_region()).unwrap();
        // 2^6 + 5 = 69 < 5! = 120
        assert_eq!(symbols.len(), 5);
        assert!(symbols.iter().all(|&s| s < 5));
        assert_eq!(unpack(&symbols).unwrap(), bits);
    }

    #[test]
    fn test_empty_bits() {
        let symbols = pack(&BitString::new(), &free_region()).unwrap();
        assert_eq!(symbols.len(), 2);
        assert_eq!(unpack(&symbols).unwrap(), BitString::new());
    }

    #[test]
    fn test_uses_only_available_symbols() {
        let available = [3u8, 9, 14, 20, 25, 26, 30];
        let bits: BitString = "1011001".parse().unwrap();
        let symbols = pack(&bits, &available).unwrap();
        assert!(symbols.iter().all(|s| available.contains(s)));
        assert_eq!(unpack(&symbols).unwrap(), bits);
    }

    #[test]
    fn test_capacity_limit() {
        let long: BitString = core::iter::repeat(true).take(112).collect();
        assert!(pack(&long, &free_region()[..31]).is_none());

        let fits: BitString = core::iter::repeat(true).take(100).collect();
        let symbols = pack(&fits, &free_region()[..31]).unwrap();
        assert_eq!(unpack(&symbols).unwrap(), fits);
    }

    #[test]
    fn test_identity_arrangement_is_rejected() {
        assert!(matches!(
            unpack(&[4, 5, 6]),
            Err(CodecError::MalformedDeck(_))
        ));
    }
}
