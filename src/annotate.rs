//! Builds the `%mor` word of a single token.

use crate::categories::CategorySet;
use crate::classify::PUNCTUATION_LABEL;
use crate::flags::TokenFlags;
use crate::lexicon::{LEMMA_OVERRIDES, MOR_WORD_OVERRIDES, WORD_LEMMA_OVERRIDES};
use crate::types::Token;
use serde::{Deserialize, Serialize};

/// How commas appear on the `%mor` tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommaStyle {
    /// `cm|cm`
    Cm,
    /// `,`
    Verbatim,
}

impl Default for CommaStyle {
    fn default() -> Self {
        CommaStyle::Cm
    }
}

impl CommaStyle {
    pub fn literal(self) -> &'static str {
        match self {
            CommaStyle::Cm => "cm|cm",
            CommaStyle::Verbatim => ",",
        }
    }
}

/// Options of the word builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationOptions {
    pub comma: CommaStyle,
}

/// The lemma as it appears on the `%mor` tier.
fn lemma<'t>(token: &'t Token) -> &'t str {
    if let Some(lemma) = WORD_LEMMA_OVERRIDES.get(token.word.as_str()) {
        return lemma;
    }

    LEMMA_OVERRIDES
        .get(token.lemma.as_str())
        .copied()
        .unwrap_or(&token.lemma)
}

/// Builds the `%mor` word from a classified token.
pub fn build(
    token: &Token,
    flags: &TokenFlags,
    pos_label: &str,
    categories: &CategorySet,
    options: &AnnotationOptions,
) -> String {
    if pos_label == PUNCTUATION_LABEL {
        return if token.lemma == "," {
            options.comma.literal().to_string()
        } else {
            token.lemma.clone()
        };
    }

    // marked words are annotated by their surface form
    if flags.interjection {
        return format!("int|{}", token.word);
    }
    if flags.neologism {
        return format!("x|{}-neo", token.word);
    }
    if flags.foreign {
        return format!("x|{}-for", token.word);
    }

    if let Some(word) = MOR_WORD_OVERRIDES.get(token.word.as_str()) {
        return word.to_string();
    }

    if categories.is_empty() {
        format!("{}|{}", pos_label, lemma(token))
    } else {
        format!("{}|{}-{}", pos_label, lemma(token), categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;

    fn annotate(word: &str, lemma: &str, tag: &str, flags: TokenFlags) -> String {
        let token = Token::new(word, lemma, tag);
        let (label, categories) = classify(&token, &flags);

        build(&token, &flags, &label, &categories, &AnnotationOptions::default())
    }

    fn plain(word: &str, lemma: &str, tag: &str) -> String {
        annotate(word, lemma, tag, TokenFlags::default())
    }

    #[test]
    fn fixed_annotation() {
        assert_eq!(plain("rád", "rád", "ACYS------A----"), "adj:short|rád-1&SG&M");
        assert_eq!(plain("bys", "být", "Vc-S---2-------"), "v:aux|být-2&SG&cond&akt&impf");
    }

    #[test]
    fn punctuation() {
        assert_eq!(plain(".", ".", "Z:-------------"), ".");
        assert_eq!(plain("?", "?", "Z:-------------"), "?");
        assert_eq!(plain(",", ",", "Z:-------------"), "cm|cm");

        let token = Token::new(",", ",", "Z:-------------");
        let options = AnnotationOptions {
            comma: CommaStyle::Verbatim,
        };
        assert_eq!(
            build(&token, &TokenFlags::default(), "Z", &CategorySet::new(), &options),
            ","
        );
    }

    #[test]
    fn marked_words_keep_surface_form() {
        let interjection = TokenFlags {
            interjection: true,
            ..TokenFlags::default()
        };
        let neologism = TokenFlags {
            neologism: true,
            ..TokenFlags::default()
        };
        let foreign = TokenFlags {
            foreign: true,
            ..TokenFlags::default()
        };

        assert_eq!(annotate("Haf", "haf", "NNIS1-----A----", interjection), "int|Haf");
        assert_eq!(annotate("bumbác", "bumbác", "X@-------------", neologism), "x|bumbác-neo");
        assert_eq!(annotate("daddy", "daddy", "X@-------------", foreign), "x|daddy-for");
    }

    #[test]
    fn lemma_overrides() {
        assert_eq!(plain("lidi", "lidé", "NNMP1-----A----"), "n|člověk-1&PL&MA");
        assert_eq!(plain("lepší", "dobrý", "AAFS1----2A----"), "adj|dobrý-CP-1&SG&F");
        assert_eq!(plain("jejímu", "jeho", "PSZS3FS3-------"), "pro:poss|její-3&SG&x_jmenny_rod");
    }

    #[test]
    fn regular_words() {
        assert_eq!(
            plain("dělám", "dělat", "VB-S---1P-AAI--"),
            "v|dělat-1&SG&ind&pres&akt&impf"
        );
        assert_eq!(plain("tady", "tady", "Db-------------"), "adv:pro|tady");
        assert_eq!(plain("Mařenku", "Mařenka", "NNFS4-----A----"), "n:prop|Mařenka-4&SG&F");
    }
}
