//! Message domains, the classifier that picks one, and per-domain text codecs
//!
//! Classification is an ordered list of `(Domain, Rule)` pairs evaluated
//! first-match-wins. More specific domains come first so that a message
//! matching a narrow format gets the tighter code.

use crate::dictionary::{AbbreviationTable, Lexicon};
use crate::error::CodecError;
use crate::huffman::{self, HuffmanCoder};
use crate::types::BitString;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// Street-type words that mark a message as an address
pub const ROAD_WORDS: &[&str] = &[
    "Street", "Road", "Avenue", "Boulevard", "Drive", "Court", "Place", "Square", "Lane",
    "Roadway", "Trail", "Parkway", "Commons", "Av", "Av.", "Ave", "St.", "St", "Rd", "Rd.",
    "Mall", "Plaza", "Route", "Highway", "Pike", "Pkwy", "Blvd", "Blvd.", "Turnpike", "Expy",
    "Ct", "Ct.", "Freeway",
];

/// Message category; selects the text codec on both sides of the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// `@` followed by lowercase alphanumerics
    Password,
    /// Latitude/longitude pair
    Coordinates,
    /// Street address
    Address,
    /// Flight code, destination and number
    Flight,
    /// Lowercase dictionary words
    Words,
    /// Two title-case names or places
    NamesAndPlaces,
    /// Lowercase alphanumerics with `.`, `,` and spaces
    AlphaNumeric,
    /// Anything else
    Generic,
}

impl Domain {
    /// Every domain, in index order
    pub const ALL: [Domain; 8] = [
        Domain::Password,
        Domain::Coordinates,
        Domain::Address,
        Domain::Flight,
        Domain::Words,
        Domain::NamesAndPlaces,
        Domain::AlphaNumeric,
        Domain::Generic,
    ];

    /// 3-bit index carried in the scheme descriptor
    pub const fn index(&self) -> u8 {
        match self {
            Domain::Password => 0,
            Domain::Coordinates => 1,
            Domain::Address => 2,
            Domain::Flight => 3,
            Domain::Words => 4,
            Domain::NamesAndPlaces => 5,
            Domain::AlphaNumeric => 6,
            Domain::Generic => 7,
        }
    }

    /// Domain for a 3-bit index
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Domain::Password),
            1 => Some(Domain::Coordinates),
            2 => Some(Domain::Address),
            3 => Some(Domain::Flight),
            4 => Some(Domain::Words),
            5 => Some(Domain::NamesAndPlaces),
            6 => Some(Domain::AlphaNumeric),
            7 => Some(Domain::Generic),
            _ => None,
        }
    }

    /// Short lowercase name
    pub const fn name(&self) -> &'static str {
        match self {
            Domain::Password => "password",
            Domain::Coordinates => "coordinates",
            Domain::Address => "address",
            Domain::Flight => "flight",
            Domain::Words => "words",
            Domain::NamesAndPlaces => "names_and_places",
            Domain::AlphaNumeric => "alphanumeric",
            Domain::Generic => "generic",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Predicate deciding whether a message belongs to a domain
#[derive(Debug, Clone)]
pub enum Rule {
    /// Whole message matches a pattern
    Pattern(Regex),

    /// Some whitespace-separated token is one of the listed words
    AnyToken(Vec<String>),

    /// Message matches a pattern and every token is in the lexicon
    LexiconWords {
        /// Shape the message must have
        pattern: Regex,
        /// Words the tokens must come from
        lexicon: Arc<Lexicon>,
        /// Compare tokens lowercased
        fold_case: bool,
    },
}

impl Rule {
    /// Rule matching a regular expression
    pub fn pattern(re: &str) -> Result<Self, CodecError> {
        Ok(Rule::Pattern(Regex::new(re)?))
    }

    /// Check the rule against a message
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Rule::Pattern(re) => re.is_match(text),
            Rule::AnyToken(words) => text
                .split_whitespace()
                .any(|token| words.iter().any(|w| w == token)),
            Rule::LexiconWords {
                pattern,
                lexicon,
                fold_case,
            } => {
                pattern.is_match(text)
                    && text.split(' ').all(|token| {
                        if *fold_case {
                            lexicon.contains(&token.to_lowercase())
                        } else {
                            lexicon.contains(token)
                        }
                    })
            }
        }
    }
}

/// Ordered first-match-wins domain classifier
#[derive(Debug, Clone)]
pub struct DomainClassifier {
    rules: Vec<(Domain, Rule)>,
    fallback: Domain,
}

impl DomainClassifier {
    /// Classifier with no rules; everything falls back to [`Domain::Generic`]
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            fallback: Domain::Generic,
        }
    }

    /// The standard rule list over the given lexicons
    pub fn standard(words: Arc<Lexicon>, names: Arc<Lexicon>) -> Result<Self, CodecError> {
        Ok(Self::new()
            .with_rule(Domain::Password, Rule::pattern(r"^@[a-z0-9,.]+$")?)
            .with_rule(
                Domain::Coordinates,
                Rule::pattern(r"^[0-9]+\.[0-9]{4} [NESW], [0-9]+\.[0-9]{4} [NESW]$")?,
            )
            .with_rule(
                Domain::Address,
                Rule::AnyToken(ROAD_WORDS.iter().map(|w| w.to_string()).collect()),
            )
            .with_rule(
                Domain::Flight,
                Rule::pattern(r"^[A-Z0-9]{3} ([A-Z.'-]* )+[0-9]+$")?,
            )
            .with_rule(
                Domain::Words,
                Rule::LexiconWords {
                    pattern: Regex::new(r"^([a-z]+ )*[a-z]+$")?,
                    lexicon: words,
                    fold_case: false,
                },
            )
            .with_rule(
                Domain::NamesAndPlaces,
                Rule::LexiconWords {
                    pattern: Regex::new(r"^[A-Z][a-z]+ [A-Z][a-z]+$")?,
                    lexicon: names,
                    fold_case: true,
                },
            )
            .with_rule(Domain::AlphaNumeric, Rule::pattern(r"^[a-z0-9,. ]+$")?))
    }

    /// Append a rule; earlier rules take precedence
    pub fn with_rule(mut self, domain: Domain, rule: Rule) -> Self {
        self.rules.push((domain, rule));
        self
    }

    /// Pick the domain of a message
    pub fn classify(&self, text: &str) -> Domain {
        let domain = self
            .rules
            .iter()
            .find(|(_, rule)| rule.matches(text))
            .map_or(self.fallback, |(domain, _)| *domain);

        #[cfg(feature = "logging")]
        debug!("Classified {:?} as {}", text, domain);

        domain
    }
}

impl Default for DomainClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// How a codec treats letter case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseFolding {
    /// Text is coded as-is
    Preserve,
    /// Lowercased before coding, each word capitalized after decoding
    TitleWords,
}

/// Text compressor for one domain
#[derive(Debug, Clone)]
pub struct TextCodec {
    coder: Arc<HuffmanCoder>,
    abbreviations: Option<Arc<AbbreviationTable>>,
    case: CaseFolding,
}

impl TextCodec {
    /// Plain Huffman codec
    pub fn new(coder: Arc<HuffmanCoder>) -> Self {
        Self {
            coder,
            abbreviations: None,
            case: CaseFolding::Preserve,
        }
    }

    /// Substitute abbreviations word by word before coding
    pub fn with_abbreviations(mut self, table: Arc<AbbreviationTable>) -> Self {
        self.abbreviations = Some(table);
        self
    }

    /// Set the case handling
    pub fn with_case_folding(mut self, case: CaseFolding) -> Self {
        self.case = case;
        self
    }

    /// The standard codec for a domain
    pub fn for_domain(domain: Domain, abbreviations: &Arc<AbbreviationTable>) -> Self {
        let table = match domain {
            Domain::Password => huffman::password_table(),
            Domain::Coordinates => huffman::COORDINATES_TABLE.to_vec(),
            Domain::Flight => huffman::flight_table(),
            Domain::Words => huffman::WORDS_TABLE.to_vec(),
            Domain::NamesAndPlaces => huffman::NAMES_TABLE.to_vec(),
            Domain::AlphaNumeric => huffman::alphanumeric_table(),
            Domain::Address | Domain::Generic => huffman::english_table(),
        };
        let codec = Self::new(Arc::new(HuffmanCoder::from_frequencies(&table)));

        match domain {
            Domain::Words => codec.with_abbreviations(Arc::clone(abbreviations)),
            Domain::NamesAndPlaces => codec.with_case_folding(CaseFolding::TitleWords),
            _ => codec,
        }
    }

    /// Compress a message to bits
    pub fn compress(&self, text: &str) -> Result<BitString, CodecError> {
        let folded = match self.case {
            CaseFolding::Preserve => text.to_string(),
            CaseFolding::TitleWords => text.to_lowercase(),
        };
        let shortened = match &self.abbreviations {
            Some(table) => folded
                .split(' ')
                .map(|word| table.abbreviate(word).unwrap_or(word))
                .collect::<Vec<_>>()
                .join(" "),
            None => folded,
        };

        #[cfg(feature = "logging")]
        trace!("Text codec input {:?} -> {:?}", text, shortened);

        self.coder.compress(&shortened)
    }

    /// Recover a message from bits
    pub fn decompress(&self, bits: &BitString) -> Result<String, CodecError> {
        let decoded = self.coder.decompress(bits)?;
        let expanded = match &self.abbreviations {
            Some(table) => decoded
                .split(' ')
                .map(|word| table.expand(word).unwrap_or(word))
                .collect::<Vec<_>>()
                .join(" "),
            None => decoded,
        };

        Ok(match self.case {
            CaseFolding::Preserve => expanded,
            CaseFolding::TitleWords => expanded
                .split(' ')
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" "),
        })
    }

    /// Check `decompress(compress(text)) == text`
    pub fn is_lossless_for(&self, text: &str) -> bool {
        self.compress(text)
            .and_then(|bits| self.decompress(&bits))
            .map_or(false, |decoded| decoded == text)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
