//! Morphological annotation of Czech child language transcripts in the CHAT format.
//! # Overview
//!
//! chatmor adds a `%mor` tier to every speech tier of a transcript. A line goes through:
//! - [normalization][normalize::normalize]: CHAT markup is rewritten to plain text by the
//!   [rule table][rules::CHAT_TO_PLAIN_TEXT] until the text is a fixed point of all rules.
//! - tokenization and tagging by a [Tagger][components::tagger::Tagger], which assigns a lemma
//!   and a positional tag to every token.
//! - [classification][classify::classify] of every token into a `%mor` POS label and
//!   [grammatical categories][categories::CategorySet].
//! - [building][annotate::build] the `%mor` word, which resolves the lexical overrides.
//!
//! # Examples
//!
//! Annotate a line with a small lexicon:
//!
//! ```
//! use std::sync::Arc;
//! use chatmor::annotate::AnnotationOptions;
//! use chatmor::components::{tagger::LexiconTagger, tokenizer::ChatTokenizer};
//! use chatmor::pipeline::Annotator;
//!
//! let tagger = LexiconTagger::from_entries(vec![("Mařenku", "Mařenka", "NNFS4-----A----")]);
//! let annotator = Annotator::new(
//!     ChatTokenizer.into(),
//!     Arc::new(tagger.into()),
//!     false,
//!     AnnotationOptions::default(),
//! );
//!
//! let output = annotator.process_line("*CHI:\tMařenku.")?;
//! assert_eq!(output.mor.as_deref(), Some("%mor:\tn:prop|Mařenka-4&SG&F ."));
//! # Ok::<(), chatmor::Error>(())
//! ```

use std::io;

use thiserror::Error;

pub mod annotate;
pub mod batch;
pub mod categories;
pub mod classify;
pub mod components;
pub mod config;
pub mod convert;
pub mod corrections;
pub mod flags;
pub mod lexicon;
pub mod normalize;
pub mod pipeline;
pub mod rules;
pub mod types;
pub(crate) mod utils;

#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    /// (De)serialization error. Can have occured during deserialization or during serialization.
    #[error(transparent)]
    Serialization(#[from] bincode::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Conversion(#[from] normalize::ConversionError),
    #[error("{0:?} is not a valid %mor word")]
    MalformedMorWord(String),
    #[error("cannot align {main:?} with {mor:?}: {reason}")]
    Alignment {
        main: String,
        mor: String,
        reason: String,
    },
    #[error(transparent)]
    Tagger(#[from] components::tagger::TaggerError),
}
