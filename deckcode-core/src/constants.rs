//! Constants and limits for the deck layout

use core::ops::RangeInclusive;

/// Number of cards in a deck
pub const DECK_SIZE: usize = 52;

/// Highest symbol of the free region (`0..=FREE_END`)
pub const FREE_END: u8 = 31;

/// First symbol of the filler region
pub const FILLER_START: u8 = 32;

/// Last symbol of the filler region
pub const FILLER_END: u8 = 50;

/// Symbols available to the message and its packing descriptor
pub const FREE_REGION: RangeInclusive<u8> = 0..=FREE_END;

/// Reserved symbols carrying no information
pub const FILLER_REGION: RangeInclusive<u8> = FILLER_START..=FILLER_END;

/// Boundary between the descriptor substrate and the message
pub const SENTINEL: u8 = 51;

/// Exclusive upper bound of the scheme descriptor symbol (4 bits)
pub const SCHEME_SYMBOL_LIMIT: u8 = 16;

/// Widest chunk the packer cuts from a bit string
pub const MAX_CHUNK_WIDTH: usize = 6;

/// Bits of `step_size` in the packing descriptor
pub const STEP_SIZE_BITS: usize = 2;

/// Bits of `start_padding` in the packing descriptor
pub const START_PADDING_BITS: usize = 3;

/// Bits of `end_padding` in the packing descriptor
pub const END_PADDING_BITS: usize = 3;

/// Fixed-width prefix of the packing descriptor, before the per-chunk bitmap
pub const DESCRIPTOR_HEADER_BITS: usize = STEP_SIZE_BITS + START_PADDING_BITS + END_PADDING_BITS;

/// Largest alphabet whose factorial fits in a `u128` (34! < 2^128 < 35!)
pub const MAX_RANKABLE_LEN: usize = 34;

/// Linear probe strides tried in order, indexed by `step_size - 1`.
///
/// A step size of 3 probes with stride 5.
pub const PROBE_STRIDES: [u8; 3] = [1, 2, 5];

/// Stride used for a given descriptor `step_size` (1..=3)
pub const fn probe_stride(step_size: u8) -> u8 {
    match step_size {
        1 => PROBE_STRIDES[0],
        2 => PROBE_STRIDES[1],
        _ => PROBE_STRIDES[2],
    }
}

/// Check whether a symbol belongs to the free region
pub const fn is_free(symbol: u8) -> bool {
    symbol <= FREE_END
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_partition_the_deck() {
        let free = FREE_REGION.count();
        let filler = FILLER_REGION.count();
        assert_eq!(free + filler + 1, DECK_SIZE);
        assert!(!is_free(SENTINEL));
        assert!(!FILLER_REGION.contains(&SENTINEL));
        assert!(FILLER_REGION.contains(&32) && FILLER_REGION.contains(&50));
        assert!(is_free(0) && is_free(31) && !is_free(32));
    }

    #[test]
    fn step_three_maps_to_stride_five() {
        assert_eq!(probe_stride(1), 1);
        assert_eq!(probe_stride(2), 2);
        assert_eq!(probe_stride(3), 5);
    }
}
