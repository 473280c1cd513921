//! Permutation ranking
//!
//! Exact bijection between integers and the lexicographically ordered
//! arrangements of a small alphabet. Alphabets may repeat symbols; equal
//! symbols are interchangeable, so a multiset with class sizes `c1..ck`
//! summing to `n` has `n! / (c1! * ... * ck!)` distinct arrangements.
//!
//! All arithmetic is exact in `u128`, which bounds alphabets at
//! [`MAX_RANKABLE_LEN`] symbols.

use crate::constants::MAX_RANKABLE_LEN;
use crate::error::CodecError;
use alloc::format;
use alloc::vec::Vec;

/// `n!`, or `None` once it no longer fits in a `u128`
pub const fn factorial(n: usize) -> Option<u128> {
    let mut acc: u128 = 1;
    let mut i = 2;
    while i <= n {
        acc = match acc.checked_mul(i as u128) {
            Some(v) => v,
            None => return None,
        };
        i += 1;
    }
    Some(acc)
}

/// Smallest `k` such that `k!` exceeds `value_space_size`.
///
/// This is the shortest alphabet of distinct symbols able to rank every
/// integer below `value_space_size`. Returns `None` when no such `k` fits
/// in exact arithmetic.
pub fn n_needed(value_space_size: u128) -> Option<usize> {
    (0..=MAX_RANKABLE_LEN).find(|&k| factorial(k).map_or(false, |f| f > value_space_size))
}

/// Number of distinct arrangements of `alphabet`
pub fn perm_count<T: Ord + Clone>(alphabet: &[T]) -> Result<u128, CodecError> {
    check_len(alphabet.len())?;
    let mut sorted = alphabet.to_vec();
    sorted.sort();
    Ok(sorted_perm_count(&sorted))
}

/// Rank of `target` among the arrangements of `base`.
///
/// `base` need not be sorted; its sorted order is the rank-zero arrangement.
/// `target` must use exactly the symbols of `base`. Alphabets of fewer than
/// two symbols have a single arrangement and always rank to 0.
pub fn rank<T: Ord + Clone>(target: &[T], base: &[T]) -> Result<u128, CodecError> {
    check_len(base.len())?;
    if base.len() < 2 {
        return Ok(0);
    }

    let mut remaining = base.to_vec();
    remaining.sort();

    let mut sorted_target = target.to_vec();
    sorted_target.sort();
    if sorted_target != remaining {
        return Err(CodecError::InvalidArrangement(format!(
            "target of {} symbols is not an arrangement of the {}-symbol base",
            target.len(),
            base.len()
        )));
    }

    let mut total: u128 = 0;
    for head in target {
        if remaining.len() < 2 {
            break;
        }

        let mut chosen = None;
        for i in 0..remaining.len() {
            if remaining[i] == *head {
                chosen = Some(i);
                break;
            }
            // equal symbols already counted once
            if i > 0 && remaining[i] == remaining[i - 1] {
                continue;
            }
            total += suffix_count(&remaining, i);
        }

        match chosen {
            Some(i) => {
                remaining.remove(i);
            }
            None => {
                return Err(CodecError::InvalidArrangement(
                    "target symbol missing from base".into(),
                ))
            }
        }
    }

    Ok(total)
}

/// Arrangement of `base` with the given rank.
///
/// Fails with [`CodecError::UnrankOutOfRange`] when `rank` is not below the
/// permutation count; callers are expected to have checked the bound.
pub fn unrank<T: Ord + Clone>(rank: u128, base: &[T]) -> Result<Vec<T>, CodecError> {
    check_len(base.len())?;

    let mut remaining = base.to_vec();
    remaining.sort();

    let count = sorted_perm_count(&remaining);
    if rank >= count {
        return Err(CodecError::UnrankOutOfRange { rank, count });
    }

    let mut rank = rank;
    let mut out = Vec::with_capacity(remaining.len());
    while remaining.len() >= 2 {
        let mut total: u128 = 0;
        let mut chosen = None;
        for i in 0..remaining.len() {
            if i > 0 && remaining[i] == remaining[i - 1] {
                continue;
            }
            let next = total + suffix_count(&remaining, i);
            if next > rank {
                chosen = Some(i);
                break;
            }
            total = next;
        }

        // rank < count guarantees a choice at every position
        let i = chosen.ok_or(CodecError::UnrankOutOfRange { rank, count })?;
        rank -= total;
        out.push(remaining.remove(i));
    }
    out.append(&mut remaining);

    Ok(out)
}

/// Rank of a sequence of distinct cards against their own sorted order
pub fn rank_cards(cards: &[u8]) -> Result<u128, CodecError> {
    rank(cards, cards)
}

/// Arrange `cards` into the permutation of the given rank
pub fn permute_cards(cards: &[u8], rank: u128) -> Result<Vec<u8>, CodecError> {
    unrank(rank, cards)
}

fn check_len(len: usize) -> Result<(), CodecError> {
    if len > MAX_RANKABLE_LEN {
        return Err(CodecError::AlphabetTooLarge {
            len,
            max: MAX_RANKABLE_LEN,
        });
    }
    Ok(())
}

/// Arrangements of `sorted` with position `skip` removed
fn suffix_count<T: Ord>(sorted: &[T], skip: usize) -> u128 {
    let n = sorted.len() - 1;
    let mut count = factorial(n).unwrap_or(u128::MAX);
    let mut run = 0usize;
    let mut prev: Option<&T> = None;
    for (i, item) in sorted.iter().enumerate() {
        if i == skip {
            continue;
        }
        if prev == Some(item) {
            run += 1;
        } else {
            count /= factorial(run).unwrap_or(1);
            run = 1;
        }
        prev = Some(item);
    }
    count / factorial(run).unwrap_or(1)
}

/// `n! / prod(ci!)` for an already sorted alphabet of at most 34 symbols
fn sorted_perm_count<T: Ord>(sorted: &[T]) -> u128 {
    let mut count = factorial(sorted.len()).unwrap_or(u128::MAX);
    let mut run = 0usize;
    for i in 0..sorted.len() {
        if i > 0 && sorted[i] == sorted[i - 1] {
            run += 1;
        } else {
            count /= factorial(run).unwrap_or(1);
            run = 1;
        }
    }
    count / factorial(run).unwrap_or(1)
}
