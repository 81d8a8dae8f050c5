//! Corrections of already annotated transcripts.
//!
//! Each [Corrector] rewrites the `%mor` tiers of a transcript in place. `%mor` words are
//! aligned with the words of the preceding speech tier by [mor_parse].

use std::{
    fmt,
    io::{BufRead, Write},
    str::FromStr,
    sync::Arc,
};

use itertools::Itertools;
use lazy_static::lazy_static;
use log::{debug, info};

use crate::components::{
    tagger::{is_punctuation, Tag, Tagger},
    tokenizer::{ChatTokenizer, Tokenize},
};
use crate::flags::strip_placeholders;
use crate::lexicon::{is_skip_line, COMPDEG_LEMMA_OVERRIDES, POS_OVERRIDES};
use crate::normalize::normalize;
use crate::pipeline::MOR_TIER;
use crate::rules::LETTERS;
use crate::utils::regex::Regex;
use crate::Error;

lazy_static! {
    static ref MOR_WORD: Regex = Regex::new(
        &r"^([a-z:_]+)\|([0-9_{L}]+)(?:-([a-zA-Z0-9&_\-]+))?$".replace("{L}", LETTERS)
    )
    .unwrap();
    static ref MAIN_TIER: Regex = Regex::new(r"^\*[A-Z]{3}:\t").unwrap();
    static ref PART_CO: Regex = Regex::new(r"(\spart\|co)-[-&A-Za-z0-9]+").unwrap();
}

/// A parsed `%mor` word `POS|LEMMA-CATEGORIES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorWord {
    pub pos: String,
    pub lemma: String,
    pub categories: Option<String>,
}

impl FromStr for MorWord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = MOR_WORD
            .captures(s)
            .ok_or_else(|| Error::MalformedMorWord(s.to_string()))?;
        let group = |i| captures.at(i).map(ToOwned::to_owned);

        match (group(1), group(2)) {
            (Some(pos), Some(lemma)) => Ok(MorWord {
                pos,
                lemma,
                categories: group(3),
            }),
            _ => Err(Error::MalformedMorWord(s.to_string())),
        }
    }
}

impl fmt::Display for MorWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.pos, self.lemma)?;
        if let Some(categories) = &self.categories {
            write!(f, "-{}", categories)?;
        }
        Ok(())
    }
}

/// A speech tier word with its `%mor` word. Terminals and punctuation written verbatim on the
/// `%mor` tier (a `,` instead of `cm|cm`) are kept unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatToken {
    pub word: String,
    raw: String,
    pub mor: Option<MorWord>,
}

impl ChatToken {
    pub fn new(word: &str, mor_word: &str) -> Result<Self, Error> {
        let mor = if is_skip_line(word) || is_punctuation(mor_word) {
            None
        } else {
            Some(mor_word.parse()?)
        };

        Ok(ChatToken {
            word: word.to_string(),
            raw: mor_word.to_string(),
            mor,
        })
    }

    pub fn mor_word(&self) -> String {
        match &self.mor {
            Some(mor) => mor.to_string(),
            None => self.raw.clone(),
        }
    }
}

/// The words of a plain text as they appear on its `%mor` tier.
fn mor_aligned_words(text: &str) -> Vec<String> {
    let tokens: Vec<String> = ChatTokenizer
        .tokenize(text)
        .iter()
        .map(|token| strip_placeholders(token))
        .filter(|token| !token.is_empty() && token != "“" && token != "”")
        .collect();

    tokens
        .join(" ")
        .replace("+ . . .", "+...")
        .replace("+ / .", "+/.")
        .split(' ')
        .map(ToOwned::to_owned)
        .collect()
}

/// Aligns the words of a speech tier with the words of its `%mor` tier.
pub fn mor_parse(main_line: &str, mor_line: &str) -> Result<Vec<ChatToken>, Error> {
    let alignment_error = |reason: String| Error::Alignment {
        main: main_line.to_string(),
        mor: mor_line.to_string(),
        reason,
    };

    if !MAIN_TIER.is_search_match(main_line) {
        return Err(alignment_error("not a speech tier".into()));
    }
    let mor_content = mor_line
        .strip_prefix(MOR_TIER)
        .ok_or_else(|| alignment_error("not a %mor tier".into()))?;

    let text = normalize(main_line)?.ok_or_else(|| alignment_error("no content".into()))?;

    let words = mor_aligned_words(&text);
    let mor_words: Vec<&str> = mor_content.split(' ').collect();

    if words.len() != mor_words.len() {
        return Err(alignment_error(format!(
            "{} words, {} %mor words",
            words.len(),
            mor_words.len()
        )));
    }

    let tokens = words
        .iter()
        .zip(mor_words)
        .map(|(word, mor_word)| ChatToken::new(word, mor_word))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("mor_parse: {} tokens", tokens.len());

    Ok(tokens)
}

/// Rewrites the `%mor` tier following each speech tier with `modify`.
fn modify_tokens<F>(lines: &[String], mut modify: F) -> Result<Vec<String>, Error>
where
    F: FnMut(&mut ChatToken) -> Result<(), Error>,
{
    let mut result = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];

        match lines.get(i + 1) {
            Some(mor_line) if MAIN_TIER.is_search_match(line) && mor_line.starts_with(MOR_TIER) => {
                let mut tokens = mor_parse(line, mor_line)?;
                for token in tokens.iter_mut() {
                    modify(token)?;
                }

                result.push(line.clone());
                result.push(format!(
                    "{}{}",
                    MOR_TIER,
                    tokens.iter().map(ChatToken::mor_word).join(" ")
                ));
                i += 2;
            }
            _ => {
                result.push(line.clone());
                i += 1;
            }
        }
    }

    Ok(result)
}

fn mor_mut(token: &mut ChatToken) -> Option<&mut MorWord> {
    token.mor.as_mut()
}

/// A correction of annotated transcripts.
#[derive(Debug, Clone)]
pub enum Corrector {
    /// Copula forms of "být" get the `v:cop` POS.
    Vcop,
    /// "co" annotated as a particle has no categories.
    PartNogram,
    /// Comparatives and superlatives are lemmatized to the positive.
    AdjAdvCompdeg,
    /// Demonstratives are lemmatized again by the tagger.
    DemLemma(Arc<Tagger>),
    /// "lidé" is lemmatized as "člověk".
    PeopleLemma,
}

impl Corrector {
    pub fn name(&self) -> &'static str {
        match self {
            Corrector::Vcop => "vcop",
            Corrector::PartNogram => "part_nogram",
            Corrector::AdjAdvCompdeg => "adj_adv_compdeg",
            Corrector::DemLemma(_) => "dem_lemma",
            Corrector::PeopleLemma => "people_lemma",
        }
    }

    /// All correctors in their order of application.
    pub fn all(tagger: Arc<Tagger>) -> Vec<Corrector> {
        vec![
            Corrector::Vcop,
            Corrector::PartNogram,
            Corrector::AdjAdvCompdeg,
            Corrector::DemLemma(tagger),
            Corrector::PeopleLemma,
        ]
    }

    pub fn apply(&self, lines: &[String]) -> Result<Vec<String>, Error> {
        debug!("{}: {} lines", self.name(), lines.len());

        match self {
            Corrector::Vcop => modify_tokens(lines, |token| {
                let word = token.word.clone();
                if let Some(mor) = mor_mut(token) {
                    let label = POS_OVERRIDES
                        .get(mor.lemma.as_str())
                        .and_then(|label| label.word_label(&word));

                    if label == Some("v:cop") {
                        mor.pos = "v:cop".to_string();
                    }
                }
                Ok(())
            }),
            Corrector::PartNogram => Ok(lines
                .iter()
                .map(|line| {
                    if line.starts_with("%mor") {
                        PART_CO.replace_all_template(line, "$1")
                    } else {
                        line.clone()
                    }
                })
                .collect()),
            Corrector::AdjAdvCompdeg => modify_tokens(lines, |token| {
                if let Some(mor) = mor_mut(token) {
                    if let Some(lemma) = COMPDEG_LEMMA_OVERRIDES.get(mor.lemma.as_str()) {
                        mor.lemma = lemma.to_string();
                    }
                }
                Ok(())
            }),
            Corrector::DemLemma(tagger) => modify_tokens(lines, |token| {
                let word = token.word.clone();
                if let Some(mor) = mor_mut(token) {
                    if mor.lemma == "ten" {
                        let tagged = tagger.tag_tokens(&[word], false)?;
                        if let Some(tagged) = tagged.into_iter().next() {
                            mor.lemma = tagged.lemma;
                        }
                    }
                }
                Ok(())
            }),
            Corrector::PeopleLemma => modify_tokens(lines, |token| {
                if let Some(mor) = mor_mut(token) {
                    if mor.lemma == "lidé" {
                        mor.lemma = "člověk".to_string();
                    }
                }
                Ok(())
            }),
        }
    }
}

/// Applies `correctors` in order to a whole transcript.
pub fn correct_stream<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    correctors: &[Corrector],
) -> Result<(), Error> {
    let mut lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
    info!("Loaded {} lines", lines.len());

    for corrector in correctors {
        lines = corrector.apply(&lines)?;
    }

    for line in &lines {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;

    Ok(())
}
