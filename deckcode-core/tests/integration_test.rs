//! Integration tests for the complete text → deck → text flow

use deckcode_core::{
    constants::{DECK_SIZE, FILLER_REGION},
    packer, rank, BitString, CodecError, Deck, DeckCodec, Domain,
};

fn assert_permutation(deck: &Deck) {
    let mut cards = deck.cards().to_vec();
    cards.sort_unstable();
    assert_eq!(cards, (0..DECK_SIZE as u8).collect::<Vec<_>>());
}

#[test]
fn test_round_trip_every_domain() {
    let codec = DeckCodec::new().unwrap();
    let messages = [
        (Domain::Password, "@k9x.2"),
        (Domain::Coordinates, "48.8566 N, 2.3522 E"),
        (Domain::Address, "12 Elm St"),
        (Domain::Flight, "DL4 ROME 88"),
        (Domain::Words, "hold the bridge"),
        (Domain::NamesAndPlaces, "Anna Vienna"),
        (Domain::AlphaNumeric, "x7k2 q9"),
        (Domain::Generic, "Hi Bob!"),
    ];

    for (domain, text) in messages {
        assert_eq!(codec.classify(text), domain, "classified {:?}", text);

        let deck = codec.encode(text).unwrap();
        assert_permutation(&deck);
        assert_eq!(codec.decode(&deck).unwrap(), text);

        let report = codec.inspect(&deck).unwrap();
        assert_eq!(report.scheme.domain, domain);
    }
}

#[test]
fn test_empty_message() {
    let codec = DeckCodec::new().unwrap();
    let deck = codec.encode("").unwrap();
    assert_permutation(&deck);
    assert_eq!(codec.decode(&deck).unwrap(), "");
}

#[test]
fn test_longest_message_before_infeasibility() {
    let codec = DeckCodec::new().unwrap();
    let source = "the quick brown fox jumps over the lazy dog and keeps on running far away";

    let mut last_success = None;
    let mut failure = None;
    for len in 1..=source.len() {
        let text = &source[..len];
        match codec.encode(text) {
            Ok(deck) => last_success = Some((text, deck)),
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }

    let (text, deck) = last_success.expect("short prefixes encode");
    assert_permutation(&deck);
    assert_eq!(codec.decode(&deck).unwrap(), text);
    assert!(matches!(
        failure,
        Some(CodecError::EncodingInfeasible { .. })
    ));
}

#[test]
fn test_filler_moves_do_not_matter() {
    let codec = DeckCodec::new().unwrap();
    let deck = codec.encode("meet at the bridge").unwrap();

    let mut cards: Vec<u8> = deck
        .cards()
        .iter()
        .copied()
        .filter(|c| !FILLER_REGION.contains(c))
        .collect();
    cards.extend(FILLER_REGION.rev());
    let moved = Deck::new(cards).unwrap();

    assert_eq!(codec.decode(&moved).unwrap(), "meet at the bridge");
}

#[test]
fn test_malformed_decks() {
    let codec = DeckCodec::new().unwrap();

    assert!(matches!(
        codec.decode(&Deck::identity()),
        Err(CodecError::MalformedDeck(_))
    ));
    assert!(matches!(
        "1 2 3".parse::<Deck>(),
        Err(CodecError::MalformedDeck(_))
    ));

    let mut duplicated: Vec<u8> = (0..DECK_SIZE as u8).collect();
    duplicated[0] = 1;
    assert!(Deck::new(duplicated).is_err());
}

#[test]
fn test_unknown_scheme_symbol() {
    let codec = DeckCodec::new().unwrap();
    let deck = codec.encode("hello").unwrap();

    // put a non-scheme symbol in the trailing slot
    let mut cards = deck.into_vec();
    let last = cards.len() - 1;
    let slot = cards.iter().position(|&c| c == 30).unwrap();
    cards.swap(slot, last);
    let tampered = Deck::new(cards).unwrap();

    assert_eq!(
        codec.decode(&tampered),
        Err(CodecError::UnknownScheme(30))
    );
}

#[test]
fn test_rank_scenario() {
    let r = rank::rank(&b"3120"[..], &b"0123"[..]).unwrap();
    assert_eq!(r, 21);
    assert_eq!(rank::unrank(r, &b"0123"[..]).unwrap(), b"3120".to_vec());
}

#[test]
fn test_pack_scenario() {
    let bits: BitString = "000001".parse().unwrap();
    let free: Vec<u8> = (0..32).collect();
    let packed = packer::pack(&bits, &free).unwrap();

    assert_eq!(packed.descriptor.step_size, 0);
    assert_eq!(packed.symbols, vec![1]);
}

#[test]
fn test_decks_are_independent() {
    let codec = DeckCodec::new().unwrap();
    let first = codec.encode("attack at dawn").unwrap();
    let _ = codec.encode("retreat at night").unwrap();
    let again = codec.encode("attack at dawn").unwrap();
    assert_eq!(first, again);
}
