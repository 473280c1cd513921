//! Read-only lookup tables shared by the classifier and the text codecs
//!
//! Tables are built once, wrapped in `Arc`, and handed to every component that
//! needs them. Nothing here is global.

use crate::error::CodecError;
use hashbrown::{HashMap, HashSet};
use std::io::BufRead;

/// Built-in abbreviations for common English words, `(short, full)`
const BUILTIN_ABBREVIATIONS: &[(&str, &str)] = &[
    ("abt", "about"),
    ("acct", "account"),
    ("addr", "address"),
    ("approx", "approximately"),
    ("immed", "immediately"),
    ("bc", "because"),
    ("btwn", "between"),
    ("dept", "department"),
    ("dir", "direction"),
    ("evng", "evening"),
    ("govt", "government"),
    ("hq", "headquarters"),
    ("info", "information"),
    ("intl", "international"),
    ("mgmt", "management"),
    ("mins", "minutes"),
    ("msg", "message"),
    ("mtg", "meeting"),
    ("nite", "night"),
    ("pls", "please"),
    ("pos", "position"),
    ("ppl", "people"),
    ("rdy", "ready"),
    ("recd", "received"),
    ("rpt", "report"),
    ("tmrw", "tomorrow"),
    ("tngt", "tonight"),
    ("thx", "thanks"),
    ("wk", "week"),
    ("yr", "year"),
];

/// Built-in lexicon of common and operational English words
const BUILTIN_WORDS: &str = "\
a about above across advance after again against air all ally alpha am ambush
an and area armor army arrive artillery as at attack back base battalion be
because before behind below between bomb border bravo bridge but by camp can
captain charlie clear coast code come command convoy cover dawn day defend
delta desert do down drop east echo enemy engage evacuate evening fall fire
fleet for force fort forward from front fuel go gold green ground group guard
have he help here hill hold i if in infantry into is it land last leave left
line lost low main march me medic meet message mile mine mission morning move
must night no north not now of officer on one open or order out over patrol
plane plan position post radio ready red regiment rendezvous report retreat
return right river road round safe scout sea secure send ship siege signal
silent soldier south squad station stop storm strike supply support surrender
take tank target team the their there they to today tomorrow tonight troops
under unit up us valley victory wait war watch we west when where will with
wounded yes you
";

/// Built-in lexicon of given names and place names, lowercase
const BUILTIN_NAMES: &str = "\
alice amsterdam anna athens austin berlin boston cairo carlos chen chicago
daniel david delhi denver dublin elena emma geneva hannah helsinki james john
jose kyoto lagos laura lima lisbon london madrid maria mary michael milan
moscow mumbai nairobi naples oslo oxford paris peter prague quebec rome sam
santiago sarah seoul sophia sydney tokyo toronto vienna warsaw william zurich
";

/// Bidirectional word/abbreviation table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbreviationTable {
    to_short: HashMap<String, String>,
    to_full: HashMap<String, String>,
}

impl AbbreviationTable {
    /// An empty table, which leaves every word untouched
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table of common abbreviations
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for &(short, full) in BUILTIN_ABBREVIATIONS {
            table.insert(short, full);
        }
        table
    }

    /// Parse `"<short> <full>"` lines; blank lines and `#` comments are skipped
    pub fn parse(source: &str) -> Result<Self, CodecError> {
        let mut table = Self::new();
        for (i, line) in source.lines().enumerate() {
            table.add_line(i + 1, line)?;
        }
        Ok(table)
    }

    /// Read `"<short> <full>"` lines from a reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, CodecError> {
        let mut table = Self::new();
        for (i, line) in reader.lines().enumerate() {
            table.add_line(i + 1, &line?)?;
        }
        Ok(table)
    }

    /// Add one mapping; later entries for the same word or abbreviation win
    pub fn insert(&mut self, short: &str, full: &str) {
        self.to_short.insert(full.to_string(), short.to_string());
        self.to_full.insert(short.to_string(), full.to_string());
    }

    /// Abbreviation for `word`, if any
    pub fn abbreviate(&self, word: &str) -> Option<&str> {
        self.to_short.get(word).map(String::as_str)
    }

    /// Full word for `short`, if any
    pub fn expand(&self, short: &str) -> Option<&str> {
        self.to_full.get(short).map(String::as_str)
    }

    /// Number of mappings
    pub fn len(&self) -> usize {
        self.to_full.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.to_full.is_empty()
    }

    fn add_line(&mut self, line_no: usize, line: &str) -> Result<(), CodecError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(short), Some(full), None) => {
                self.insert(short, full);
                Ok(())
            }
            _ => Err(CodecError::Dictionary {
                line: line_no,
                reason: format!("expected \"<short> <full>\", got {:?}", line),
            }),
        }
    }
}

/// Set of known words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    words: HashSet<String>,
}

impl Lexicon {
    /// An empty lexicon
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one word per line; blank lines and `#` comments are skipped
    pub fn parse(source: &str) -> Self {
        source
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty() && !w.starts_with('#'))
            .collect()
    }

    /// Built-in lexicon of common and operational English words
    pub fn common_words() -> Self {
        Self::parse_whitespace(BUILTIN_WORDS)
    }

    /// Built-in lexicon of given names and place names, lowercase
    pub fn names_and_places() -> Self {
        Self::parse_whitespace(BUILTIN_NAMES)
    }

    /// Read one word per line from a reader
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, CodecError> {
        let mut lexicon = Self::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() && !word.starts_with('#') {
                lexicon.insert(word);
            }
        }
        Ok(lexicon)
    }

    fn parse_whitespace(source: &str) -> Self {
        source.split_whitespace().collect()
    }

    /// Add a word
    pub fn insert(&mut self, word: &str) {
        self.words.insert(word.to_string());
    }

    /// Check if a word is known
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the lexicon is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for Lexicon {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(str::to_string).collect(),
        }
    }
}
