//! Maps a tagger token onto a `%mor` POS label and a [CategorySet].
//!
//! Classification is total: any tag, including short or unknown ones, yields a label
//! (falling back to `x`) and a possibly empty category set.

use crate::categories::{
    CategorySet,
    GrammaticalCategory::{self, *},
    LexicalCategory,
};
use crate::flags::TokenFlags;
use crate::lexicon::{
    GENDERLESS_LEMMAS, MASCULINE_PRONOUN_LEMMAS, NEUTER_PRONOUN_LEMMAS, POS_OVERRIDES,
    SINGULAR_LEMMAS,
};
use crate::types::{PositionalTag as Tag, Token};
use crate::utils::is_capitalized;

/// POS label of punctuation.
pub const PUNCTUATION_LABEL: &str = "Z";

/// Computes the POS label and the categories of a token.
pub fn classify(token: &Token, flags: &TokenFlags) -> (String, CategorySet) {
    (pos_label(token, flags), categories(token))
}

/// Computes the `%mor` POS label of a token.
pub fn pos_label(token: &Token, flags: &TokenFlags) -> String {
    if let Some(label) = POS_OVERRIDES.get(token.lemma.as_str()) {
        return label.label(&token.word).to_string();
    }

    let tag = token.tag();

    let label = match tag.pos() {
        'N' => {
            if !flags.quotation_beginning && is_capitalized(&token.word) {
                "n:prop"
            } else {
                "n"
            }
        }
        'A' => match tag.subpos() {
            // short (nominal) form
            'C' => "adj:short",
            'U' => "adj:poss",
            _ => "adj",
        },
        'P' => match tag.subpos() {
            'D' => "pro:dem",
            '5' | 'E' | 'H' | 'P' => "pro:pers",
            '1' => "pro:rel",
            '4' | 'Q' => "pro:rel/int",
            'S' | '9' => "pro:poss",
            'W' | 'Y' => "pro:neg",
            'K' | 'L' | 'Z' => "pro:indef",
            // "svůj" (P8) is overridden by lemma
            '6' | '7' => "pro:refl",
            _ => "pro",
        },
        'C' => match tag.subpos() {
            'l' | 'n' | 'z' | 'a' | 'y' => "num:card",
            'r' | 'w' => "num:ord",
            'v' | 'o' => "num:mult",
            _ => "num",
        },
        'V' => "v",
        'D' => {
            if token.lemma == "tak" || token.lemma == "proto" {
                "adv:pro"
            } else {
                "adv"
            }
        }
        'R' => "prep",
        'J' => match tag.subpos() {
            // incl. binary mathematical operations
            '^' | '*' => "conj:coord",
            ',' => "conj:sub",
            _ => "conj",
        },
        'T' => "part",
        'I' => "int",
        'Z' => PUNCTUATION_LABEL,
        // abbreviations, foreign words, letters, segments, unknown words
        _ => "x",
    };

    label.to_string()
}

/// Computes the grammatical and lexical categories of a token.
pub fn categories(token: &Token) -> CategorySet {
    let tag = token.tag();
    let mut categories = CategorySet::new();

    if tag.at(Tag::NEGATION) == 'N' {
        categories.set_lexical(LexicalCategory::Negation, "neg");
    }

    match tag.pos() {
        'V' => verb_categories(&tag, &mut categories),
        // multiplicative numerals do not inflect like nominals
        'N' | 'A' | 'P' | 'C' if !(tag.pos() == 'C' && tag.subpos() == 'v') => {
            nominal_categories(&tag, &mut categories)
        }
        _ => {}
    }

    if matches!(tag.pos(), 'A' | 'D') {
        match tag.at(Tag::GRADE) {
            '2' => categories.set_lexical(LexicalCategory::Degree, "CP"),
            '3' => categories.set_lexical(LexicalCategory::Degree, "SP"),
            _ => {}
        }
    }

    lemma_special_cases(&token.lemma, &mut categories);

    categories
}

fn verb_categories(tag: &Tag, categories: &mut CategorySet) {
    match tag.at(Tag::GENDER) {
        'I' | 'M' | 'Y' => categories.set(Gender, "M"),
        'F' => categories.set(Gender, "F"),
        'N' => categories.set(Gender, "N"),
        _ => {}
    }

    // "-" for infinitives and conditional auxiliaries; dual, "W" and "X" are left out
    match tag.at(Tag::NUMBER) {
        'S' => categories.set(Number, "SG"),
        'P' => categories.set(Number, "PL"),
        _ => {}
    }

    let person = tag.at(Tag::PERSON);
    if matches!(person, '1' | '2' | '3') {
        categories.set(Person, person.to_string());
    }

    match tag.at(Tag::TENSE) {
        'F' => categories.set(Tense, "futur"),
        'P' => categories.set(Tense, "pres"),
        'R' => categories.set(Tense, "past"),
        _ => {}
    }

    match tag.at(Tag::VOICE) {
        'A' => categories.set(Voice, "akt"),
        'P' => categories.set(Voice, "pas"),
        _ => {}
    }

    match tag.at(Tag::ASPECT) {
        'P' => categories.set(Aspect, "pf"),
        'I' => categories.set(Aspect, "impf"),
        'B' => categories.set(Aspect, "biasp"),
        _ => {}
    }

    let required: &[GrammaticalCategory] = match tag.subpos() {
        // infinitive
        'f' => {
            categories.set(FormType, "inf");
            &[FormType, Aspect]
        }
        // past participle, "q" is archaic
        'p' | 'q' => &[Number, Tense, Voice, Gender, Aspect],
        // passive participle
        's' => &[Number, Voice, Gender, Aspect],
        // conditional
        'c' => {
            categories.set(Mood, "cond");
            &[Person, Number, Mood, Voice, Aspect]
        }
        'i' => {
            categories.set(Mood, "imp");
            // passive imperatives are periphrastic: imperative auxiliary + participle
            categories.set(Voice, "akt");
            &[Person, Number, Mood, Voice, Aspect]
        }
        // indicative, "t" is archaic
        'B' | 't' => {
            categories.set(Mood, "ind");
            &[Person, Number, Mood, Tense, Voice, Aspect]
        }
        // present and past transgressives
        'e' | 'm' => {
            categories.set(FormType, "trans");
            // passive transgressives are periphrastic as well
            categories.set(Voice, "akt");
            &[FormType, Number, Voice, Gender, Aspect]
        }
        _ => &[],
    };

    categories.require(required);
}

fn nominal_categories(tag: &Tag, categories: &mut CategorySet) {
    let is_noun = tag.pos() == 'N';

    // animacy of masculines is only distinguished for nouns
    match tag.at(Tag::GENDER) {
        'M' => categories.set(Gender, if is_noun { "MA" } else { "M" }),
        'I' => categories.set(Gender, if is_noun { "MI" } else { "M" }),
        'Y' => categories.set(Gender, "M"),
        'F' => categories.set(Gender, "F"),
        'N' => categories.set(Gender, "N"),
        _ => {}
    }

    match tag.at(Tag::NUMBER) {
        'S' => categories.set(Number, "SG"),
        'P' | 'D' => categories.set(Number, "PL"),
        _ => {}
    }

    let case = tag.at(Tag::CASE);
    if case.is_ascii_digit() {
        categories.set(Case, case.to_string());
    }

    categories.require(&[Gender, Number, Case]);
}

fn lemma_special_cases(lemma: &str, categories: &mut CategorySet) {
    if NEUTER_PRONOUN_LEMMAS.contains(&lemma) {
        categories.set(Gender, "N");
    }
    if MASCULINE_PRONOUN_LEMMAS.contains(&lemma) {
        categories.set(Gender, "M");
    }
    if SINGULAR_LEMMAS.contains(&lemma) {
        categories.set(Number, "SG");
    }
    // person deixis has no grammatical gender
    if GENDERLESS_LEMMAS.contains(&lemma) {
        categories.remove(Gender);
    }
}
