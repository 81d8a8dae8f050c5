//! Grammatical and lexical categories of one token and their `%mor` serialization.

use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;

/// Grammatical categories. The declaration order is the serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GrammaticalCategory {
    FormType,
    Case,
    Person,
    Number,
    Mood,
    Tense,
    Voice,
    Gender,
    Aspect,
}

impl GrammaticalCategory {
    /// Value used when a required category could not be determined.
    pub fn default_value(self) -> &'static str {
        use GrammaticalCategory::*;

        match self {
            FormType => "x_tvar",
            Case => "x_pad",
            Person => "x_osoba",
            Number => "x_cislo",
            Mood => "x_zpusob",
            Tense => "x_cas",
            Voice => "x_slovesny_rod",
            Gender => "x_jmenny_rod",
            Aspect => "x_vid",
        }
    }
}

/// Lexical categories. The declaration order is the serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LexicalCategory {
    Degree,
    Negation,
}

/// The categories of one token. Each category is present at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    grammatical: BTreeMap<GrammaticalCategory, String>,
    lexical: BTreeMap<LexicalCategory, String>,
}

impl CategorySet {
    pub fn new() -> Self {
        CategorySet::default()
    }

    pub fn set<S: Into<String>>(&mut self, category: GrammaticalCategory, value: S) {
        self.grammatical.insert(category, value.into());
    }

    pub fn get(&self, category: GrammaticalCategory) -> Option<&str> {
        self.grammatical.get(&category).map(String::as_str)
    }

    pub fn remove(&mut self, category: GrammaticalCategory) -> Option<String> {
        self.grammatical.remove(&category)
    }

    pub fn set_lexical<S: Into<String>>(&mut self, category: LexicalCategory, value: S) {
        self.lexical.insert(category, value.into());
    }

    pub fn get_lexical(&self, category: LexicalCategory) -> Option<&str> {
        self.lexical.get(&category).map(String::as_str)
    }

    /// Fills in the default value of every category in `required` which is not set.
    pub fn require(&mut self, required: &[GrammaticalCategory]) {
        for category in required {
            self.grammatical
                .entry(*category)
                .or_insert_with(|| category.default_value().to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.grammatical.is_empty() && self.lexical.is_empty()
    }
}

impl fmt::Display for CategorySet {
    /// Grammatical categories are joined by `&`, lexical categories by `-` with the
    /// grammatical string as the last element.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grammatical = self.grammatical.values().join("&");

        let joined = self
            .lexical
            .values()
            .map(String::as_str)
            .chain(std::iter::once(grammatical.as_str()))
            .filter(|part| !part.is_empty())
            .join("-");

        f.write_str(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::GrammaticalCategory::*;
    use super::LexicalCategory::*;
    use super::*;

    #[test]
    fn serializes_in_declared_order() {
        let mut categories = CategorySet::new();
        categories.set(Gender, "F");
        categories.set(Case, "4");
        categories.set(Number, "SG");

        assert_eq!(categories.to_string(), "4&SG&F");
    }

    #[test]
    fn lexical_categories_come_first() {
        let mut categories = CategorySet::new();
        categories.set(Case, "1");
        categories.set_lexical(Negation, "neg");
        categories.set_lexical(Degree, "CP");

        assert_eq!(categories.to_string(), "CP-neg-1");
    }

    #[test]
    fn lexical_only() {
        let mut categories = CategorySet::new();
        categories.set_lexical(Negation, "neg");

        assert_eq!(categories.to_string(), "neg");
    }

    #[test]
    fn empty_serializes_to_empty_string() {
        assert_eq!(CategorySet::new().to_string(), "");
        assert!(CategorySet::new().is_empty());
    }

    #[test]
    fn require_keeps_existing_values() {
        let mut categories = CategorySet::new();
        categories.set(Number, "PL");
        categories.require(&[Number, Aspect]);

        assert_eq!(categories.get(Number), Some("PL"));
        assert_eq!(categories.get(Aspect), Some("x_vid"));
    }
}
