//! Runtime configuration, loadable from JSON.

use std::{io::BufReader, path::Path};

use fs_err::File;
use serde::{Deserialize, Serialize};

use crate::annotate::AnnotationOptions;
use crate::components::{tagger::TaggerConfig, tokenizer::TokenizerKind};

/// Configuration of an [Annotator][crate::pipeline::Annotator]. Missing fields take their
/// default values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tagger: TaggerConfig,
    pub tokenizer: TokenizerKind,
    /// Whether the tagger guesses analyses of unknown words.
    pub guesser: bool,
    pub annotation: AnnotationOptions,
}

impl Config {
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, crate::Error> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::CommaStyle;
    use std::path::PathBuf;

    #[test]
    fn partial_config() {
        let config: Config = serde_json::from_str(
            r#"{
                "tagger": {"backend": "lexicon", "path": "cs.bin"},
                "guesser": true,
                "annotation": {"comma": "verbatim"}
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.tagger,
            TaggerConfig::Lexicon {
                path: PathBuf::from("cs.bin")
            }
        );
        assert_eq!(config.tokenizer, TokenizerKind::Chat);
        assert!(config.guesser);
        assert_eq!(config.annotation.comma, CommaStyle::Verbatim);
    }

    #[test]
    fn empty_config_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.annotation.comma, CommaStyle::Cm);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Config::from_json("does/not/exist.json"),
            Err(crate::Error::Io(_))
        ));
    }
}
