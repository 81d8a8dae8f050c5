//! Taggers assign a lemma and a positional tag to every token.
//!
//! Two backends exist: a [LexiconTagger] looking words up in a MorfFlex dump and a
//! [ProcessTagger] talking to a MorphoDiTa `run_tagger` process. Loaded taggers are
//! expensive, [Resources] caches them by configuration.

mod lexicon;
mod process;

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use enum_dispatch::enum_dispatch;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::Component;
use crate::types::Token;

pub use lexicon::LexiconTagger;
pub use process::ProcessTagger;

#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum TaggerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("tagger process exited unexpectedly")]
    ProcessExited,
    #[error("malformed tagger output line {0:?}")]
    MalformedOutput(String),
    #[error("tagger returned {found} tokens for {expected} input tokens")]
    TokenCount { expected: usize, found: usize },
    #[error("tagger resource is poisoned")]
    Poisoned,
}

/// Assigns lemmas and tags.
#[enum_dispatch]
pub trait Tag {
    /// Tags the given tokens. Returns exactly one [Token] per input token.
    fn tag_tokens(&self, tokens: &[String], guesser: bool) -> Result<Vec<Token>, TaggerError>;

    /// Tags a text tokenized on whitespace.
    fn tag(&self, text: &str, guesser: bool) -> Result<Vec<Token>, TaggerError> {
        let tokens: Vec<String> = text.split_whitespace().map(ToOwned::to_owned).collect();
        self.tag_tokens(&tokens, guesser)
    }
}

#[enum_dispatch(Tag)]
#[derive(Debug)]
pub enum Tagger {
    LexiconTagger,
    ProcessTagger,
}

/// Selects and locates a tagger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum TaggerConfig {
    /// A lexicon compiled with `chatmor-compile`.
    Lexicon { path: PathBuf },
    /// A MorphoDiTa tagger model run by the `run_tagger` binary.
    Process {
        #[serde(default = "default_binary")]
        binary: PathBuf,
        model: PathBuf,
    },
}

fn default_binary() -> PathBuf {
    PathBuf::from("run_tagger")
}

impl Default for TaggerConfig {
    fn default() -> Self {
        TaggerConfig::Process {
            binary: default_binary(),
            model: PathBuf::from(
                "_local/czech-morfflex2.0-pdtc1.0-220710/czech-morfflex2.0-pdtc1.0-220710.tagger",
            ),
        }
    }
}

impl Tagger {
    /// Loads the tagger described by `config`.
    pub fn load(config: &TaggerConfig) -> Result<Self, crate::Error> {
        Ok(match config {
            TaggerConfig::Lexicon { path } => {
                info!("Loading lexicon tagger from {}", path.display());
                LexiconTagger::new(path)?.into()
            }
            TaggerConfig::Process { binary, model } => {
                info!("Starting {} with {}", binary.display(), model.display());
                ProcessTagger::new(binary, model).into()
            }
        })
    }
}

/// A cache of loaded taggers. Each configuration is loaded at most once.
#[derive(Debug, Default)]
pub struct Resources {
    taggers: Mutex<HashMap<TaggerConfig, Arc<Tagger>>>,
}

impl Resources {
    pub fn new() -> Self {
        Resources::default()
    }

    /// Gets the tagger for `config`, loading it on first use.
    pub fn tagger(&self, config: &TaggerConfig) -> Result<Arc<Tagger>, crate::Error> {
        let mut taggers = self.taggers.lock().map_err(|_| TaggerError::Poisoned)?;

        if let Some(tagger) = taggers.get(config) {
            return Ok(Arc::clone(tagger));
        }

        let tagger = Arc::new(Tagger::load(config)?);
        taggers.insert(config.clone(), Arc::clone(&tagger));

        Ok(tagger)
    }

    /// Inserts an already loaded tagger.
    pub fn insert(&self, config: TaggerConfig, tagger: Tagger) -> Result<Arc<Tagger>, crate::Error> {
        let tagger = Arc::new(tagger);
        self.taggers
            .lock()
            .map_err(|_| TaggerError::Poisoned)?
            .insert(config, Arc::clone(&tagger));

        Ok(tagger)
    }
}

/// Whether the token consists of punctuation only.
pub(crate) fn is_punctuation(word: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_punctuation() || crate::utils::splitting_chars().contains(c))
}
