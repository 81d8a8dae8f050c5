use std::{
    collections::{BTreeMap, HashMap},
    io::{BufRead, BufReader},
    path::Path,
};

use fs_err::File;
use log::info;
use serde::{Deserialize, Serialize};

use super::{is_punctuation, Tag, TaggerError};
use crate::components::Component;
use crate::types::Token;

const PUNCTUATION_TAG: &str = "Z:-------------";
const NUMBER_TAG: &str = "C=-------------";
const UNKNOWN_TAG: &str = "X@-------------";

/// Minimum number of trailing characters a guessed word shares with a known word.
const MIN_GUESS_SUFFIX: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Analysis {
    lemma: String,
    tag: String,
}

/// Tags words by lookup in a MorfFlex dump. The first analysis of a word in the dump wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconTagger {
    analyses: HashMap<String, Analysis>,
    /// Reversed word to word, so that words sharing a suffix are neighbors.
    reversed: BTreeMap<String, String>,
}

impl Component for LexiconTagger {
    fn name() -> &'static str {
        "lexicon_tagger"
    }
}

fn reverse(word: &str) -> String {
    word.chars().rev().collect()
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(a, b)| a == b).count()
}

impl LexiconTagger {
    pub fn from_entries<I, S1, S2, S3>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S1, S2, S3)>,
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        let mut tagger = LexiconTagger::default();

        for (word, lemma, tag) in entries {
            let word = word.into();

            if tagger.analyses.contains_key(&word) {
                continue;
            }

            tagger.reversed.insert(reverse(&word), word.clone());
            tagger.analyses.insert(
                word,
                Analysis {
                    lemma: lemma.into(),
                    tag: tag.into(),
                },
            );
        }

        tagger
    }

    /// Reads tab separated `word lemma tag` dumps. Lines starting with `#` are comments,
    /// lines from `remove_paths` are left out.
    pub fn from_dumps<S1: AsRef<Path>, S2: AsRef<Path>>(
        paths: &[S1],
        remove_paths: &[S2],
    ) -> Result<Self, crate::Error> {
        let mut disallowed = std::collections::HashSet::new();

        for path in remove_paths {
            let reader = BufReader::new(File::open(path.as_ref())?);

            for line in reader.lines() {
                let line = line?;
                if line.starts_with('#') {
                    continue;
                }

                disallowed.insert(line);
            }
        }

        let mut entries = Vec::new();

        for path in paths {
            let reader = BufReader::new(File::open(path.as_ref())?);

            for line in reader.lines() {
                let line = line?;
                if line.starts_with('#') || line.trim().is_empty() || disallowed.contains(&line) {
                    continue;
                }

                let parts: Vec<_> = line.split('\t').collect();
                if parts.len() < 3 {
                    return Err(TaggerError::MalformedOutput(line).into());
                }

                entries.push((parts[0].to_string(), parts[1].to_string(), parts[2].to_string()));
            }
        }

        info!("Read {} lexicon entries", entries.len());

        Ok(Self::from_entries(entries))
    }

    pub fn len(&self) -> usize {
        self.analyses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyses.is_empty()
    }

    fn lookup(&self, word: &str) -> Option<&Analysis> {
        self.analyses
            .get(word)
            .or_else(|| self.analyses.get(&word.to_lowercase()))
    }

    /// Analyzes an unknown word like the known word sharing the longest suffix with it.
    fn guess(&self, word: &str) -> Option<Token> {
        let key = reverse(word);

        // the word sharing the longest prefix with `key` is adjacent to it in sort order
        let before = self.reversed.range(..key.clone()).next_back();
        let after = self.reversed.range(key.clone()..).next();

        let (shared, known) = before
            .into_iter()
            .chain(after)
            .map(|(reversed, known)| (common_prefix_len(&key, reversed), known))
            .max_by_key(|(shared, _)| *shared)?;

        if shared < MIN_GUESS_SUFFIX {
            return None;
        }

        let analysis = &self.analyses[known];

        let known_stem: String = known.chars().take(known.chars().count() - shared).collect();
        let stem: String = word.chars().take(word.chars().count() - shared).collect();

        let lemma = match analysis.lemma.strip_prefix(known_stem.as_str()) {
            Some(ending) => format!("{}{}", stem, ending),
            None => word.to_string(),
        };

        Some(Token::new(word, lemma, analysis.tag.clone()))
    }

    fn tag_word(&self, word: &str, guesser: bool) -> Token {
        if is_punctuation(word) {
            return Token::new(word, word, PUNCTUATION_TAG);
        }

        if let Some(analysis) = self.lookup(word) {
            return Token::new(word, analysis.lemma.clone(), analysis.tag.clone());
        }

        if word.chars().all(|c| c.is_ascii_digit()) {
            return Token::new(word, word, NUMBER_TAG);
        }

        if guesser {
            if let Some(token) = self.guess(word) {
                return token;
            }
        }

        Token::new(word, word, UNKNOWN_TAG)
    }
}

impl Tag for LexiconTagger {
    fn tag_tokens(&self, tokens: &[String], guesser: bool) -> Result<Vec<Token>, TaggerError> {
        Ok(tokens
            .iter()
            .map(|token| self.tag_word(token, guesser))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagger() -> LexiconTagger {
        LexiconTagger::from_entries(vec![
            ("pes", "pes", "NNMS1-----A----"),
            ("kočkami", "kočka", "NNFP7-----A----"),
            ("Mařenku", "Mařenka", "NNFS4-----A----"),
            ("je", "být", "VB-S---3P-AAI--"),
            ("je", "on", "PPXP4--3-------"),
        ])
    }

    fn tag(words: &[&str], guesser: bool) -> Vec<Token> {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        tagger().tag_tokens(&words, guesser).unwrap()
    }

    #[test]
    fn first_analysis_wins() {
        assert_eq!(tag(&["je"], false)[0].lemma, "být");
        assert_eq!(tagger().len(), 4);
    }

    #[test]
    fn lowercase_fallback() {
        assert_eq!(tag(&["Pes"], false)[0], Token::new("Pes", "pes", "NNMS1-----A----"));
        assert_eq!(tag(&["Mařenku"], false)[0].lemma, "Mařenka");
    }

    #[test]
    fn punctuation_and_numbers() {
        let tokens = tag(&[",", "“", "3"], false);
        assert_eq!(tokens[0], Token::new(",", ",", PUNCTUATION_TAG));
        assert_eq!(tokens[1].tag, PUNCTUATION_TAG);
        assert_eq!(tokens[2].tag, NUMBER_TAG);
    }

    #[test]
    fn unknown_words() {
        assert_eq!(
            tag(&["bumbácích"], false)[0],
            Token::new("bumbácích", "bumbácích", UNKNOWN_TAG)
        );
    }

    #[test]
    fn guesser_uses_shared_suffix() {
        assert_eq!(
            tag(&["myškami"], true)[0],
            Token::new("myškami", "myška", "NNFP7-----A----")
        );
        // "ses" and "pes" share two characters
        assert_eq!(tag(&["ses"], true)[0].tag, UNKNOWN_TAG);
    }

    #[test]
    fn binary_roundtrip() {
        let mut buffer = Vec::new();
        tagger().to_writer(&mut buffer).unwrap();
        let tagger = LexiconTagger::from_reader(buffer.as_slice()).unwrap();

        assert_eq!(tagger.len(), 4);
    }
}
