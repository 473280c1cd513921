//! Deterministic Huffman coding over characters
//!
//! Codes are built from a `(char, weight)` table. Equal weights are merged in
//! table order, so the same table always yields the same code on both sides
//! of the channel. Output is the exact bit string with no byte padding and no
//! end marker; the deck carries the length.

use crate::error::CodecError;
use crate::types::BitString;
use hashbrown::HashMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[cfg(feature = "logging")]
use tracing::trace;

/// Weights for lowercase words with digits, most frequent first
pub const WORDS_TABLE: &[(char, u32)] = &[
    (' ', 15000),
    ('e', 2490),
    ('s', 1960),
    ('a', 1852),
    ('r', 1672),
    ('i', 1648),
    ('t', 1488),
    ('n', 1482),
    ('o', 1307),
    ('d', 1168),
    ('l', 1147),
    ('c', 1106),
    ('p', 835),
    ('m', 727),
    ('g', 668),
    ('u', 645),
    ('h', 542),
    ('b', 483),
    ('f', 468),
    ('v', 367),
    ('w', 348),
    ('k', 322),
    ('y', 312),
    ('0', 140),
    ('1', 96),
    ('2', 77),
    ('j', 68),
    ('z', 58),
    ('5', 55),
    ('x', 52),
    ('3', 50),
    ('4', 45),
    ('7', 34),
    ('9', 34),
    ('q', 30),
    ('8', 29),
    ('6', 25),
];

/// Weights for lowercased personal and place names
pub const NAMES_TABLE: &[(char, u32)] = &[
    (' ', 25000),
    ('a', 15393),
    ('e', 11709),
    ('n', 9319),
    ('l', 8288),
    ('r', 7848),
    ('i', 7821),
    ('s', 6479),
    ('o', 5599),
    ('t', 5435),
    ('h', 4205),
    ('m', 4110),
    ('d', 3968),
    ('c', 3925),
    ('k', 3022),
    ('y', 2902),
    ('b', 2377),
    ('u', 2122),
    ('g', 1805),
    ('j', 1767),
    ('v', 1601),
    ('w', 1476),
    ('p', 1375),
    ('f', 1041),
    ('z', 518),
    ('q', 323),
    ('x', 169),
];

/// Weights for latitude/longitude pairs such as `40.7128 N, 74.0060 W`
pub const COORDINATES_TABLE: &[(char, u32)] = &[
    ('0', 12),
    ('1', 12),
    ('2', 10),
    ('3', 10),
    ('4', 10),
    ('5', 10),
    ('6', 10),
    ('7', 10),
    ('8', 10),
    ('9', 10),
    ('.', 20),
    (' ', 30),
    (',', 10),
    ('N', 6),
    ('S', 4),
    ('E', 5),
    ('W', 5),
];

/// English letter weights shared by the generated tables
const ENGLISH_LETTERS: &[(char, u32)] = &[
    ('e', 1270),
    ('t', 906),
    ('a', 817),
    ('o', 751),
    ('i', 697),
    ('n', 675),
    ('s', 633),
    ('h', 609),
    ('r', 599),
    ('d', 425),
    ('l', 403),
    ('c', 278),
    ('u', 276),
    ('m', 241),
    ('w', 236),
    ('f', 223),
    ('g', 202),
    ('y', 197),
    ('p', 193),
    ('b', 149),
    ('v', 98),
    ('k', 77),
    ('j', 15),
    ('x', 15),
    ('q', 10),
    ('z', 7),
];

/// Printable ASCII plus newline and tab
pub fn english_table() -> Vec<(char, u32)> {
    let mut table = vec![(' ', 1800)];
    table.extend_from_slice(ENGLISH_LETTERS);
    table.extend(
        ENGLISH_LETTERS
            .iter()
            .map(|&(c, w)| (c.to_ascii_uppercase(), w / 8 + 1)),
    );
    table.extend(('0'..='9').map(|c| (c, 40)));
    table.extend([('.', 65), (',', 61), ('\'', 24), ('?', 6), ('!', 6), ('-', 15)]);
    table.extend(
        (0x21u8..=0x7e)
            .map(char::from)
            .filter(|c| !c.is_ascii_alphanumeric() && !".,'?!-".contains(*c))
            .map(|c| (c, 2)),
    );
    table.extend([('\n', 3), ('\t', 1)]);
    table
}

/// `@`-prefixed lowercase passwords
pub fn password_table() -> Vec<(char, u32)> {
    let mut table = vec![('@', 120)];
    table.extend_from_slice(ENGLISH_LETTERS);
    table.extend(('0'..='9').map(|c| (c, 120)));
    table.extend([('.', 20), (',', 20)]);
    table
}

/// Flight codes such as `AA1 NEW YORK 123`
pub fn flight_table() -> Vec<(char, u32)> {
    let mut table = vec![(' ', 1200)];
    table.extend(
        ENGLISH_LETTERS
            .iter()
            .map(|&(c, w)| (c.to_ascii_uppercase(), w)),
    );
    table.extend(('0'..='9').map(|c| (c, 150)));
    table.extend([('.', 10), ('\'', 10), ('-', 10)]);
    table
}

/// Random lowercase alphanumerics, all equally likely
pub fn alphanumeric_table() -> Vec<(char, u32)> {
    ('a'..='z')
        .chain('0'..='9')
        .chain(['.', ',', ' '])
        .map(|c| (c, 1))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Leaf(char),
    Internal { zero: usize, one: Option<usize> },
}

/// Prefix code for a fixed character table
#[derive(Debug, Clone)]
pub struct HuffmanCoder {
    nodes: Vec<Node>,
    root: Option<usize>,
    codes: HashMap<char, Vec<bool>>,
}

impl HuffmanCoder {
    /// Build a code from `(char, weight)` pairs.
    ///
    /// Later duplicates of a character are ignored. A single-character table
    /// codes that character as one `0` bit.
    pub fn from_frequencies(table: &[(char, u32)]) -> Self {
        let mut nodes = Vec::with_capacity(table.len() * 2);
        let mut heap = BinaryHeap::new();

        for &(symbol, weight) in table {
            if nodes.contains(&Node::Leaf(symbol)) {
                continue;
            }
            heap.push(Reverse((u64::from(weight), nodes.len())));
            nodes.push(Node::Leaf(symbol));
        }

        let root = match nodes.len() {
            0 => None,
            1 => {
                nodes.push(Node::Internal { zero: 0, one: None });
                Some(1)
            }
            _ => {
                while let (Some(Reverse((w0, zero))), Some(Reverse((w1, one)))) =
                    (heap.pop(), heap.pop())
                {
                    heap.push(Reverse((w0 + w1, nodes.len())));
                    nodes.push(Node::Internal {
                        zero,
                        one: Some(one),
                    });
                    if heap.len() == 1 {
                        break;
                    }
                }
                heap.pop().map(|Reverse((_, idx))| idx)
            }
        };

        let mut codes = HashMap::with_capacity(table.len());
        if let Some(root) = root {
            Self::collect_codes(&nodes, root, &mut Vec::new(), &mut codes);
        }

        Self { nodes, root, codes }
    }

    /// Number of characters the code covers
    pub fn symbol_count(&self) -> usize {
        self.codes.len()
    }

    /// Code for one character
    pub fn code(&self, symbol: char) -> Option<&[bool]> {
        self.codes.get(&symbol).map(Vec::as_slice)
    }

    /// Check if every character of `text` has a code
    pub fn supports(&self, text: &str) -> bool {
        text.chars().all(|c| self.codes.contains_key(&c))
    }

    /// Encode text to its exact bit string
    pub fn compress(&self, text: &str) -> Result<BitString, CodecError> {
        let mut bits = BitString::new();
        for c in text.chars() {
            let code = self
                .codes
                .get(&c)
                .ok_or(CodecError::UnsupportedCharacter(c))?;
            for &bit in code {
                bits.push(bit);
            }
        }

        #[cfg(feature = "logging")]
        trace!("Huffman: {} chars -> {} bits", text.chars().count(), bits.len());

        Ok(bits)
    }

    /// Decode a bit string produced by [`HuffmanCoder::compress`]
    pub fn decompress(&self, bits: &BitString) -> Result<String, CodecError> {
        let mut text = String::new();
        let root = match self.root {
            Some(root) => root,
            None if bits.is_empty() => return Ok(text),
            None => return Err(CodecError::InvalidCode { position: 0 }),
        };

        let mut node = root;
        let mut code_start = 0;
        for (position, bit) in bits.iter().enumerate() {
            let next = match self.nodes[node] {
                Node::Internal { zero, .. } if !bit => Some(zero),
                Node::Internal { one, .. } => one,
                Node::Leaf(_) => None,
            };
            node = next.ok_or(CodecError::InvalidCode {
                position: code_start,
            })?;

            if let Node::Leaf(c) = self.nodes[node] {
                text.push(c);
                node = root;
                code_start = position + 1;
            }
        }

        if node != root {
            return Err(CodecError::InvalidCode {
                position: code_start,
            });
        }

        Ok(text)
    }

    fn collect_codes(
        nodes: &[Node],
        node: usize,
        prefix: &mut Vec<bool>,
        codes: &mut HashMap<char, Vec<bool>>,
    ) {
        match nodes[node] {
            Node::Leaf(c) => {
                codes.insert(c, prefix.clone());
            }
            Node::Internal { zero, one } => {
                prefix.push(false);
                Self::collect_codes(nodes, zero, prefix, codes);
                prefix.pop();
                if let Some(one) = one {
                    prefix.push(true);
                    Self::collect_codes(nodes, one, prefix, codes);
                    prefix.pop();
                }
            }
        }
    }
}
