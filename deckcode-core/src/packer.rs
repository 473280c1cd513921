//! Bit string to symbol packing
//!
//! A bit string is cut into chunks of [`MAX_CHUNK_WIDTH`] bits, except that a
//! chunk whose leading bit is `1` is cut one bit shorter, so every chunk value
//! stays below `2^(W-1)` and lands inside the free region. Repeated chunk
//! values, or values missing from the available alphabet, are resolved by
//! linear probing at one of three fixed strides. The [`PackingDescriptor`]
//! records everything needed to invert the process and is itself ranked onto
//! the free symbols the message leaves unused.

use crate::constants::{
    is_free, probe_stride, DESCRIPTOR_HEADER_BITS, END_PADDING_BITS, MAX_CHUNK_WIDTH,
    START_PADDING_BITS, STEP_SIZE_BITS,
};
use crate::error::CodecError;
use crate::rank::{n_needed, permute_cards, rank_cards};
use crate::types::{BitString, Symbol};
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// Everything needed to turn packed symbols back into the original bits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingDescriptor {
    /// 0 = symbols are the raw chunk values, 1..=3 = linear probe stride index
    pub step_size: u8,

    /// Zero bits prepended before chunking
    pub start_padding: u8,

    /// Zero bits appended to complete the final chunk
    pub end_padding: u8,

    /// One entry per chunk: `true` if the chunk is `W-1` bits wide
    pub short_chunks: Vec<bool>,
}

impl PackingDescriptor {
    /// Number of bits in the descriptor's wire form
    pub fn bit_len(&self) -> usize {
        DESCRIPTOR_HEADER_BITS + self.short_chunks.len()
    }

    /// Serialize as `step | start_padding | end_padding | chunk bitmap`
    pub fn to_bits(&self) -> BitString {
        let mut bits = BitString::new();
        bits.push_value(self.step_size as u128, STEP_SIZE_BITS);
        bits.push_value(self.start_padding as u128, START_PADDING_BITS);
        bits.push_value(self.end_padding as u128, END_PADDING_BITS);
        for &short in &self.short_chunks {
            bits.push(short);
        }
        bits
    }

    /// Parse the wire form produced by [`PackingDescriptor::to_bits`]
    pub fn from_bits(bits: &BitString) -> Result<Self, CodecError> {
        if bits.len() < DESCRIPTOR_HEADER_BITS {
            return Err(CodecError::MalformedDeck(format!(
                "packing descriptor needs {} bits, got {}",
                DESCRIPTOR_HEADER_BITS,
                bits.len()
            )));
        }

        let start = STEP_SIZE_BITS;
        let end = start + START_PADDING_BITS;
        Ok(Self {
            step_size: bits.value_of(0..start) as u8,
            start_padding: bits.value_of(start..end) as u8,
            end_padding: bits.value_of(end..DESCRIPTOR_HEADER_BITS) as u8,
            short_chunks: bits.as_bitslice()[DESCRIPTOR_HEADER_BITS..]
                .iter()
                .by_vals()
                .collect(),
        })
    }

    /// Number of substrate symbols needed to carry the descriptor of a
    /// message with `message_len` symbols
    pub fn substrate_len(message_len: usize) -> Option<usize> {
        let width = DESCRIPTOR_HEADER_BITS + message_len;
        if width >= 127 {
            return None;
        }
        n_needed(1u128 << width)
    }

    /// Rank the descriptor onto the highest `substrate_len` unused symbols.
    ///
    /// Returns only the arranged substrate; the remaining unused symbols
    /// carry nothing and sit in ascending order ahead of it.
    pub fn to_substrate(&self, unused: &[Symbol]) -> Result<Vec<Symbol>, CodecError> {
        let needed = Self::substrate_len(self.short_chunks.len()).ok_or(
            CodecError::EncodingInfeasible {
                bits: self.bit_len(),
            },
        )?;
        if unused.len() < needed {
            return Err(CodecError::EncodingInfeasible {
                bits: self.bit_len(),
            });
        }

        let mut sorted = unused.to_vec();
        sorted.sort_unstable();
        let tail = &sorted[sorted.len() - needed..];
        permute_cards(tail, self.to_bits().value())
    }

    /// Recover the descriptor from the symbols ahead of the sentinel; only
    /// the last `substrate_len` of them carry information
    pub fn from_substrate(substrate: &[Symbol], message_len: usize) -> Result<Self, CodecError> {
        let needed = Self::substrate_len(message_len).ok_or_else(|| {
            CodecError::MalformedDeck(format!("message of {} symbols is too long", message_len))
        })?;
        if substrate.len() < needed {
            return Err(CodecError::MalformedDeck(format!(
                "descriptor substrate needs {} symbols, found {}",
                needed,
                substrate.len()
            )));
        }

        let width = DESCRIPTOR_HEADER_BITS + message_len;
        let value = rank_cards(&substrate[substrate.len() - needed..])?;
        if value >> width != 0 {
            return Err(CodecError::MalformedDeck(format!(
                "descriptor rank {} exceeds {} bits",
                value, width
            )));
        }

        Self::from_bits(&BitString::from_value(value, width))
    }
}

/// Output of a successful [`pack`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedChunks {
    /// Distinct message symbols, one per chunk
    pub symbols: Vec<Symbol>,

    /// Descriptor needed by [`unpack`]
    pub descriptor: PackingDescriptor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Chunk {
    value: u8,
    short: bool,
}

/// Pack a bit string into distinct symbols drawn from `available`.
///
/// Start paddings `0..W` are tried in order. For each, the chunk values are
/// used directly when they are distinct and available; otherwise strides
/// 1, 2 and 5 are tried, and a stride is accepted only if reverse probing
/// reproduces the chunk values exactly. Returns `None` if no combination
/// works.
pub fn pack(bits: &BitString, available: &[Symbol]) -> Option<PackedChunks> {
    let available: HashSet<Symbol> = available.iter().copied().collect();

    for start_padding in 0..MAX_CHUNK_WIDTH {
        let (chunks, end_padding) = split_chunks(bits, start_padding);
        let values: Vec<u8> = chunks.iter().map(|c| c.value).collect();
        let descriptor = |step_size: u8| PackingDescriptor {
            step_size,
            start_padding: start_padding as u8,
            end_padding: end_padding as u8,
            short_chunks: chunks.iter().map(|c| c.short).collect(),
        };

        let distinct: HashSet<u8> = values.iter().copied().collect();
        if distinct.len() == values.len() && distinct.is_subset(&available) {
            #[cfg(feature = "logging")]
            debug!(
                "Packed {} bits into {} chunks (start padding {}, no probing)",
                bits.len(),
                values.len(),
                start_padding
            );
            return Some(PackedChunks {
                symbols: values,
                descriptor: descriptor(0),
            });
        }

        for step_size in 1..=3u8 {
            let stride = probe_stride(step_size);
            let Some(resolved) = probe(&values, stride, &available) else {
                #[cfg(feature = "logging")]
                trace!("Stride {} overflows at start padding {}", stride, start_padding);
                continue;
            };

            if unprobe(&resolved, stride) == values && resolved.iter().all(|&s| is_free(s)) {
                #[cfg(feature = "logging")]
                debug!(
                    "Packed {} bits into {} chunks (start padding {}, stride {})",
                    bits.len(),
                    values.len(),
                    start_padding,
                    stride
                );
                return Some(PackedChunks {
                    symbols: resolved,
                    descriptor: descriptor(step_size),
                });
            }

            #[cfg(feature = "logging")]
            trace!("Stride {} is not invertible at start padding {}", stride, start_padding);
        }
    }

    #[cfg(feature = "logging")]
    debug!("No start padding/stride combination packs {} bits", bits.len());

    None
}

/// Reverse [`pack`]: recover the original bit string
pub fn unpack(symbols: &[Symbol], descriptor: &PackingDescriptor) -> Result<BitString, CodecError> {
    if descriptor.short_chunks.len() != symbols.len() {
        return Err(CodecError::MalformedDeck(format!(
            "chunk bitmap has {} entries for {} symbols",
            descriptor.short_chunks.len(),
            symbols.len()
        )));
    }

    let values = match descriptor.step_size {
        0 => symbols.to_vec(),
        1..=3 => unprobe(symbols, probe_stride(descriptor.step_size)),
        other => {
            return Err(CodecError::MalformedDeck(format!(
                "step size {} out of range",
                other
            )))
        }
    };

    let mut bits = BitString::new();
    for (&value, &short) in values.iter().zip(&descriptor.short_chunks) {
        let width = if short {
            MAX_CHUNK_WIDTH - 1
        } else {
            MAX_CHUNK_WIDTH
        };
        if (value as u32) >> width != 0 {
            return Err(CodecError::MalformedDeck(format!(
                "chunk value {} does not fit {} bits",
                value, width
            )));
        }
        bits.push_value(value as u128, width);
    }

    let start = descriptor.start_padding as usize;
    let end = descriptor.end_padding as usize;
    if start + end > bits.len() {
        return Err(CodecError::MalformedDeck(format!(
            "padding of {} bits exceeds {} packed bits",
            start + end,
            bits.len()
        )));
    }

    Ok(bits.slice(start..bits.len() - end))
}

/// Cut a left-padded bit string into chunks; returns the chunks and the
/// number of zero bits appended to the final one
fn split_chunks(bits: &BitString, start_padding: usize) -> (Vec<Chunk>, usize) {
    let mut padded = BitString::new();
    padded.push_zeros(start_padding);
    padded.extend_from(bits);
    let s = padded.as_bitslice();

    let mut chunks = Vec::new();
    let mut pos = 0;
    while s.len() - pos >= MAX_CHUNK_WIDTH {
        let width = if s[pos] {
            MAX_CHUNK_WIDTH - 1
        } else {
            MAX_CHUNK_WIDTH
        };
        chunks.push(Chunk {
            value: padded.value_of(pos..pos + width) as u8,
            short: width < MAX_CHUNK_WIDTH,
        });
        pos += width;
    }

    let rest = s.len() - pos;
    if rest == 0 {
        return (chunks, 0);
    }

    let tail = padded.value_of(pos..s.len()) as u8;
    let mut end_padding = MAX_CHUNK_WIDTH - rest;
    let candidate = tail << end_padding;
    if s[pos] || chunks.iter().any(|c| c.value == candidate) {
        end_padding -= 1;
    }
    chunks.push(Chunk {
        value: tail << end_padding,
        short: rest + end_padding < MAX_CHUNK_WIDTH,
    });

    (chunks, end_padding)
}

/// Resolve chunk values to distinct available symbols by linear probing.
///
/// Probing stops at the largest available symbol rather than wrapping.
fn probe(values: &[u8], stride: u8, available: &HashSet<Symbol>) -> Option<Vec<Symbol>> {
    let max = *available.iter().max()?;
    let mut taken = HashSet::with_capacity(values.len());
    let mut resolved = Vec::with_capacity(values.len());

    for &value in values {
        let mut addr = value;
        while taken.contains(&addr) || !available.contains(&addr) {
            addr = addr.checked_add(stride)?;
            if addr > max {
                return None;
            }
        }
        taken.insert(addr);
        resolved.push(addr);
    }

    Some(resolved)
}

/// Walk each symbol back along the stride while the previous address was
/// already emitted
fn unprobe(symbols: &[Symbol], stride: u8) -> Vec<u8> {
    let mut seen = HashSet::with_capacity(symbols.len());
    let mut values = Vec::with_capacity(symbols.len());

    for &symbol in symbols {
        let mut addr = symbol;
        while let Some(prev) = addr.checked_sub(stride) {
            if !seen.contains(&prev) {
                break;
            }
            addr = prev;
        }
        seen.insert(symbol);
        values.push(addr);
    }

    values
}
