//! Per-token flags derived from placeholder suffixes in tokenizer output.

use crate::rules::{PLACEHOLDER_FOREIGN, PLACEHOLDER_INTERJECTION, PLACEHOLDER_NEOLOGISM};

/// Flags of one token position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenFlags {
    pub interjection: bool,
    pub neologism: bool,
    pub foreign: bool,
    /// The token directly follows an opening quotation mark.
    pub quotation_beginning: bool,
}

impl TokenFlags {
    /// Derives one set of flags per tokenizer token. At most one of the placeholder
    /// flags is set per token.
    pub fn derive<S: AsRef<str>>(tokens: &[S]) -> Vec<TokenFlags> {
        tokens
            .iter()
            .enumerate()
            .map(|(i, token)| {
                let token = token.as_ref();
                let mut flags = TokenFlags::default();

                if token.ends_with(PLACEHOLDER_NEOLOGISM) {
                    flags.neologism = true;
                } else if token.ends_with(PLACEHOLDER_FOREIGN) {
                    flags.foreign = true;
                } else if token.ends_with(PLACEHOLDER_INTERJECTION) {
                    flags.interjection = true;
                }

                flags.quotation_beginning = i > 0 && tokens[i - 1].as_ref() == "“";

                flags
            })
            .collect()
    }
}

/// Removes all placeholders from the text.
pub fn strip_placeholders(text: &str) -> String {
    text.replace(PLACEHOLDER_NEOLOGISM, "")
        .replace(PLACEHOLDER_FOREIGN, "")
        .replace(PLACEHOLDER_INTERJECTION, "")
}
