//! Splitting plain text into the tokens the tagger sees.

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::utils::{split, splitting_chars};

/// Splits text into tokens.
#[enum_dispatch]
pub trait Tokenize {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Splits on whitespace and on punctuation. Every punctuation character is a token of its own,
/// so `+...` is tokenized as `+ . . .` like the MorphoDiTa Czech tokenizer does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTokenizer;

impl Tokenize for ChatTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .flat_map(|chunk| split(chunk, |c| splitting_chars().contains(c)))
            .map(ToOwned::to_owned)
            .collect()
    }
}

/// Splits on whitespace only, for text which is already tokenized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitespaceTokenizer;

impl Tokenize for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(ToOwned::to_owned).collect()
    }
}

#[enum_dispatch(Tokenize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tokenizer {
    ChatTokenizer,
    WhitespaceTokenizer,
}

/// Selects a tokenizer in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    Chat,
    Whitespace,
}

impl Default for TokenizerKind {
    fn default() -> Self {
        TokenizerKind::Chat
    }
}

impl From<TokenizerKind> for Tokenizer {
    fn from(kind: TokenizerKind) -> Self {
        match kind {
            TokenizerKind::Chat => ChatTokenizer.into(),
            TokenizerKind::Whitespace => WhitespaceTokenizer.into(),
        }
    }
}
