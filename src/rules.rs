//! The rewrite rules turning a CHAT speech tier into plain, taggable text.
//!
//! The table is applied as a whole, in order, by the [normalizer][crate::normalize].
//! A string is accepted as plain text once it matches [PLAIN_TEXT_CRITERIA].

use crate::utils::regex::Regex;
use lazy_static::lazy_static;

/// Letters of the transcription alphabet, usable inside a character class.
pub const LETTERS: &str =
    "a-zA-ZáäąčćďéěëęíłňńóöřšśťůúüýžźżÁÄĄČĆĎÉĚËĘÍŁŇŃÓÖŘŠŚŤŮÚÜÝŽŹŻ";

// Placeholders survive tokenization and tagging unchanged. None of them is a Czech word.
pub const PLACEHOLDER_INTERJECTION: &str = "bacashoogacit";
pub const PLACEHOLDER_NEOLOGISM: &str = "bacashoogachi";
pub const PLACEHOLDER_FOREIGN: &str = "bacashoogacif";

/// A single `(pattern, replacement)` rewrite. `$n` in the replacement refers to capture group `n`.
#[derive(Debug)]
pub struct RewriteRule {
    regex: Regex,
    replacement: &'static str,
}

impl RewriteRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        let pattern = pattern.replace("{L}", LETTERS);

        RewriteRule {
            regex: Regex::new(&pattern)
                .unwrap_or_else(|e| panic!("invalid rewrite rule {:?}: {}", pattern, e)),
            replacement,
        }
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn replacement(&self) -> &str {
        self.replacement
    }

    pub fn apply(&self, text: &str) -> String {
        self.regex.replace_all_template(text, self.replacement)
    }
}

lazy_static! {
    /// Ordered CHAT to plain text rewrite rules.
    pub static ref CHAT_TO_PLAIN_TEXT: Vec<RewriteRule> = vec![
        // participant label
        RewriteRule::new(r"\*[A-Z]{3}:\t", ""),
        // @i, @z:ip, @z:ia, @z:in mark interjections
        RewriteRule::new(r"@i|@z:ip|@z:ia|@z:in", PLACEHOLDER_INTERJECTION),
        // @c, @n mark neologisms
        RewriteRule::new(r"@c|@n", PLACEHOLDER_NEOLOGISM),
        // @z:f marks foreign words
        RewriteRule::new(r"@z:f", PLACEHOLDER_FOREIGN),
        RewriteRule::new(r"@z:m", ""),
        // lengthened sounds, "a:" is "a"
        RewriteRule::new(r"([{L}]):", "$1"),
        RewriteRule::new(r"\^", ""),
        // the conditional particle stays a separate word ("jsi-li"), other clitics are merged
        RewriteRule::new(r"((?:[ <]|^)[{L}]+)-(li[ >])", "$1 $2"),
        RewriteRule::new(r"((?:[ <]|^)[{L}]+)-([{L}]+[ >])", "$1$2"),
        // retracings and recited material, e.g. "<máme_tady_xxx> [=! básnička]"
        RewriteRule::new(
            r"<[ &+,'“”_{L}]*> \[(/{1,2}|=! (básnička|zpěv))\]",
            "",
        ),
        // "&=imit:rána" and the like, up to the next space
        RewriteRule::new(r"&=[_:{L}]+", ""),
        // word fragments and omitted words
        RewriteRule::new(r"(&\+|&=0)[_{L}]+", ""),
        // fragments written without the "+", "toho &vybavová vybarvování"
        RewriteRule::new(r"&[_{L}]+", ""),
        // repetitions "[x 2]" (sometimes written "[x 4 ]") and uncertainty "[?]"
        RewriteRule::new(r"<([ &+,“”_{L}]*)> \[(x [0-9]+ ?|\?)\]", "$1"),
        // "přišels [:přišel jsi]" is analyzed as "přišel jsi"
        RewriteRule::new(r"[{L}]+ \[:([ {L}]+)\]", "$1"),
        // interjections written with underscores
        RewriteRule::new(r"_", ""),
        RewriteRule::new(r"\(.\)", ""),
        RewriteRule::new(r"\[\*\]", ""),
        // unintelligible speech
        RewriteRule::new(r"(?<![{L}])xxx(?![{L}])", ""),
        RewriteRule::new(r"\+<", ""),
        // omitted words written without the "&=", "koupu 0se 0ve vodě"
        RewriteRule::new(r"(?<![0-9{L}])0[{L}]+", ""),
        RewriteRule::new(r"(?<![{L}])[Nn]ee(?![{L}])", "ne"),
        // multi-character symbols
        RewriteRule::new(r"\+ \. \. \.", "+..."),
        RewriteRule::new(r"\+/ \.", "+/."),
        RewriteRule::new(r" \[= ! ", " [=! "),
        RewriteRule::new(r"\s+", " "),
        // commas not separating anything
        RewriteRule::new(r"(, )+(\.|\?|!|\+\.\.\.|\+/\.|,)", "$2"),
        RewriteRule::new(r"^\s+,", ""),
        RewriteRule::new(r"^\s+", ""),
        RewriteRule::new(r"\s+$", ""),
        // terminal punctuation is a token of its own, "domů." is "domů ."
        RewriteRule::new(r"([^\s.+/])(\+\.\.\.|\+/\.|\.|\?|!)$", "$1 $2"),
    ];

    /// A string matching this is plain text.
    pub static ref PLAIN_TEXT_CRITERIA: Regex = Regex::new(
        &r"^[ ,“”0-9{L}]*(\.|\?|!|\+\.\.\.|\+/\.)$".replace("{L}", LETTERS)
    )
    .unwrap();
}

/// Whether `text` is accepted as plain text.
pub fn is_plain_text(text: &str) -> bool {
    PLAIN_TEXT_CRITERIA.is_search_match(text)
}
