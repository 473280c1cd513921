//! Property-based tests using proptest

use deckcode_core::{
    packer, permutation,
    rank::{factorial, perm_count, rank, unrank},
    BitString, Deck, DeckCodec,
};
use proptest::prelude::*;

/// A sorted base alphabet with repeats and one arrangement of it
fn arrangement() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    prop::collection::vec(0u8..5, 1..=8).prop_flat_map(|symbols| {
        let mut base = symbols.clone();
        base.sort_unstable();
        (Just(base), Just(symbols).prop_shuffle())
    })
}

fn bit_string(max_len: usize) -> impl Strategy<Value = BitString> {
    prop::collection::vec(any::<bool>(), 0..=max_len).prop_map(BitString::from_bits)
}

proptest! {
    #[test]
    fn prop_rank_unrank_inverse((base, target) in arrangement()) {
        let r = rank(&target, &base).unwrap();
        prop_assert!(r < perm_count(&base).unwrap());
        prop_assert_eq!(unrank(r, &base).unwrap(), target);
    }

    #[test]
    fn prop_perm_count_matches_multinomial((base, _) in arrangement()) {
        let mut expected = factorial(base.len()).unwrap();
        let mut i = 0;
        while i < base.len() {
            let run = base[i..].iter().take_while(|&&s| s == base[i]).count();
            expected /= factorial(run).unwrap();
            i += run;
        }
        prop_assert_eq!(perm_count(&base).unwrap(), expected);
    }

    #[test]
    fn prop_pack_unpack_round_trip(bits in bit_string(256), free in 16u8..=32) {
        let available: Vec<u8> = (0..free).collect();
        if let Some(packed) = packer::pack(&bits, &available) {
            let mut distinct = packed.symbols.clone();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(distinct.len(), packed.symbols.len());
            prop_assert!(packed.symbols.iter().all(|s| available.contains(s)));
            prop_assert_eq!(packer::unpack(&packed.symbols, &packed.descriptor).unwrap(), bits);
        }
    }

    #[test]
    fn prop_permutation_pack_round_trip(bits in bit_string(110)) {
        let available: Vec<u8> = (0..31).collect();
        if let Some(symbols) = permutation::pack(&bits, &available) {
            prop_assert_eq!(permutation::unpack(&symbols).unwrap(), bits);
        }
    }

    #[test]
    fn prop_encode_decode_round_trip(text in "[a-z ]{0,16}") {
        let codec = DeckCodec::new().unwrap();
        if let Ok(deck) = codec.encode(&text) {
            let mut cards = deck.cards().to_vec();
            cards.sort_unstable();
            prop_assert_eq!(cards, (0..52).collect::<Vec<u8>>());
            prop_assert_eq!(codec.decode(&deck).unwrap(), text);
        }
    }

    #[test]
    fn prop_decode_never_panics(cards in Just((0..52u8).collect::<Vec<_>>()).prop_shuffle()) {
        let codec = DeckCodec::new().unwrap();
        let deck = Deck::new(cards).unwrap();
        // Should either succeed or return an error, never panic
        let result = codec.decode(&deck);
        prop_assert!(result.is_ok() || result.is_err());
    }
}
