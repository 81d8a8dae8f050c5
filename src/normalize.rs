//! Turns the speech tier of a raw CHAT line into [PlainText].

use crate::rules::{is_plain_text, CHAT_TO_PLAIN_TEXT};
use log::debug;
use std::fmt;
use std::ops::Deref;
use thiserror::Error;

/// Upper bound on full passes over the rule table. The rules only ever shrink or
/// rearrange markup, so real transcripts converge after a handful of passes.
const MAX_PASSES: usize = 32;

/// A line whose speech tier could not be turned into plain text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot convert {line:?} to plain text, stopped at {result:?}")]
pub struct ConversionError {
    /// The offending line.
    pub line: String,
    /// The last intermediate result.
    pub result: String,
}

/// Normalized, taggable text. Always matches the plain text criteria.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlainText(String);

impl PlainText {
    /// Validates an already normalized string.
    pub fn new<S: Into<String>>(text: S) -> Option<Self> {
        let text = text.into();

        if is_plain_text(&text) {
            Some(PlainText(text))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for PlainText {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for PlainText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Applies the rule table once. Returns an empty string as soon as any rule empties the text.
fn pass(text: &str) -> String {
    let mut current = text.to_string();

    for rule in CHAT_TO_PLAIN_TEXT.iter() {
        current = rule.apply(&current);

        if current.is_empty() {
            break;
        }
    }

    current
}

/// Normalizes one raw line.
///
/// Returns `Ok(None)` for empty lines, header lines (`@`), dependent tiers (`%`) and lines
/// without any content left after normalization. The rule table is applied until the text
/// does not change anymore. The result is then a fixed point of every rule, which makes
/// normalization idempotent.
pub fn normalize(line: &str) -> Result<Option<PlainText>, ConversionError> {
    if line.is_empty() || line.starts_with('@') || line.starts_with('%') {
        return Ok(None);
    }

    let error = |result: String| ConversionError {
        line: line.to_string(),
        result,
    };

    let mut current = line.to_string();

    for i in 0..MAX_PASSES {
        let next = pass(&current);

        if next.is_empty() {
            return Ok(None);
        }

        let changed = next != current;
        current = next;

        if !changed {
            debug!("{:?} converged after {} passes", line, i + 1);

            return if is_plain_text(&current) {
                Ok(Some(PlainText(current)))
            } else {
                Err(error(current))
            };
        }
    }

    Err(error(current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;

    fn normalized(line: &str) -> String {
        normalize(line)
            .unwrap()
            .map(PlainText::into_inner)
            .unwrap_or_default()
    }

    #[test]
    fn disfluency_fragment() {
        assert_eq!(
            normalized("*CHI:\ttoho &vybavová vybarvování."),
            "toho vybarvování ."
        );
    }

    #[test]
    fn omitted_words() {
        assert_eq!(normalized("*MOT:\tkoupu 0se 0ve vodě ."), "koupu vodě .");
    }

    #[test]
    fn unintelligible_only() {
        assert_eq!(normalized("*CHI:\txxx ."), ".");
    }

    #[test]
    fn replacement() {
        assert_eq!(
            normalized("*CHI:\tpřišels [:přišel jsi] domů."),
            "přišel jsi domů ."
        );
    }

    #[test]
    fn headers_and_dependent_tiers() {
        assert_eq!(normalize("@Begin"), Ok(None));
        assert_eq!(normalize("%mor:\tn|pes-1&SG&MA ."), Ok(None));
        assert_eq!(normalize(""), Ok(None));
    }

    #[test]
    fn unconvertible_line() {
        let error = normalize("*CHI:\tjá {chci} ten .").unwrap_err();

        assert_eq!(error.line, "*CHI:\tjá {chci} ten .");
        assert_eq!(error.result, "já {chci} ten .");
    }

    #[test]
    fn missing_terminal_is_an_error() {
        assert!(normalize("*CHI:\tjá chci").is_err());
    }

    #[test]
    fn plain_text_validation() {
        assert!(PlainText::new("pes .").is_some());
        assert!(PlainText::new("pes").is_none());
        assert_eq!(PlainText::new("pes .").unwrap().as_str(), "pes .");
    }

    #[test]
    fn normalizing_plain_text_is_identity() {
        for text in &["toho vybarvování .", "“ahoj” , řekl +...", "ne ne ?", "."] {
            assert_eq!(normalized(text), *text);
        }
    }

    /// A speech tier assembled from words and CHAT markup.
    #[derive(Debug, Clone)]
    struct ChatLine(String);

    impl Arbitrary for ChatLine {
        fn arbitrary<G: Gen>(g: &mut G) -> Self {
            const FRAGMENTS: &[&str] = &[
                "pes", "Mařenka", "ťapu", "já", "jsi", "domů", "ne", "Nee", "xxx", "haf@i",
                "bumbác@c", "okay@z:f", "a:", "jsi-li", "přišels [: přišel jsi]", "&+ťa",
                "&=smích", "&vybavová", "&-uh", "0se", "<ťapu> [/]", "<ťapu ťapu> [x 2]",
                "<já> [?]", "(.)", "[*]", "+<", ",", "“", "”", "^", "_",
            ];
            const TERMINALS: &[&str] = &[".", "?", "!", "+...", "+/.", "+ . . .", "+/ ."];

            let len = usize::arbitrary(g) % 8;
            let mut words: Vec<&str> = (0..len)
                .map(|_| FRAGMENTS[usize::arbitrary(g) % FRAGMENTS.len()])
                .collect();
            words.push(TERMINALS[usize::arbitrary(g) % TERMINALS.len()]);

            ChatLine(format!("*CHI:\t{}", words.join(" ")))
        }
    }

    #[quickcheck]
    fn idempotent(line: ChatLine) -> bool {
        match normalize(&line.0) {
            Ok(Some(text)) => normalize(&text) == Ok(Some(text.clone())),
            _ => true,
        }
    }

    #[quickcheck]
    fn accepted_output_matches_criteria(line: ChatLine) -> bool {
        match normalize(&line.0) {
            Ok(Some(text)) => is_plain_text(&text),
            _ => true,
        }
    }

    #[quickcheck]
    fn idempotent_on_any_text(line: String) -> bool {
        match normalize(&line) {
            Ok(Some(text)) => normalize(&text) == Ok(Some(text.clone())),
            _ => true,
        }
    }

    #[test]
    fn generated_lines_are_mostly_accepted() {
        let mut g = quickcheck::StdThreadGen::new(16);
        let accepted = (0..200)
            .filter(|_| matches!(normalize(&ChatLine::arbitrary(&mut g).0), Ok(Some(_))))
            .count();

        assert!(accepted > 50, "{} of 200 generated lines accepted", accepted);
    }
}
