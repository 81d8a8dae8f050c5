//! Fundamental types used by this crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A token as produced by a tagger: surface form, lemma and positional tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub word: String,
    pub lemma: String,
    pub tag: String,
}

impl Token {
    pub fn new<S: Into<String>, L: Into<String>, T: Into<String>>(word: S, lemma: L, tag: T) -> Self {
        Token {
            word: word.into(),
            lemma: lemma.into(),
            tag: tag.into(),
        }
    }

    pub fn tag(&self) -> PositionalTag<'_> {
        PositionalTag::new(&self.tag)
    }

    /// Whether the surface form is a quotation mark. Such tokens only delimit quotations
    /// and never appear on the `%mor` tier.
    pub fn is_quotation_mark(&self) -> bool {
        self.word == "“" || self.word == "”"
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.word, self.lemma, self.tag)
    }
}

/// A read-only view of a fixed-width positional morphological tag (15 positions in the
/// Czech PDT tagset). Positions past the end of the string read as `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionalTag<'t> {
    tag: &'t str,
}

impl<'t> PositionalTag<'t> {
    pub const WIDTH: usize = 15;

    pub const POS: usize = 0;
    pub const SUBPOS: usize = 1;
    pub const GENDER: usize = 2;
    pub const NUMBER: usize = 3;
    pub const CASE: usize = 4;
    pub const PERSON: usize = 7;
    pub const TENSE: usize = 8;
    pub const GRADE: usize = 9;
    pub const NEGATION: usize = 10;
    pub const VOICE: usize = 11;
    pub const ASPECT: usize = 12;

    pub fn new(tag: &'t str) -> Self {
        PositionalTag { tag }
    }

    pub fn at(&self, position: usize) -> char {
        self.tag.chars().nth(position).unwrap_or('-')
    }

    pub fn pos(&self) -> char {
        self.at(Self::POS)
    }

    pub fn subpos(&self) -> char {
        self.at(Self::SUBPOS)
    }

    pub fn as_str(&self) -> &'t str {
        self.tag
    }
}

/// Reduces a MorfFlex lemma to its raw form by removing the technical suffixes:
/// `být_^(stav)` is `být`, `Mařenka_;Y` is `Mařenka`, `pes-1` is `pes`.
pub fn strip_lemma_id(lemma: &str) -> &str {
    let chars: Vec<(usize, char)> = lemma.char_indices().collect();

    for (i, (index, c)) in chars.iter().enumerate().skip(1) {
        let is_boundary = match c {
            '_' | '`' => true,
            '-' => chars.get(i + 1).map_or(false, |(_, next)| next.is_ascii_digit()),
            _ => false,
        };

        if is_boundary {
            return &lemma[..*index];
        }
    }

    lemma
}
