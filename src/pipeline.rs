//! Annotation of single lines and of line streams.

use std::{
    fmt,
    io::{BufRead, Write},
    sync::Arc,
};

use itertools::Itertools;
use log::{debug, error};

use crate::annotate::{build, AnnotationOptions};
use crate::classify::classify;
use crate::components::{
    tagger::{Resources, Tag, Tagger},
    tokenizer::{Tokenize, Tokenizer},
};
use crate::config::Config;
use crate::flags::{strip_placeholders, TokenFlags};
use crate::lexicon::is_skip_line;
use crate::normalize::{normalize, ConversionError, PlainText};
use crate::Error;

/// Label of the morphological dependent tier.
pub const MOR_TIER: &str = "%mor:\t";

/// Output of one input line: the line itself and possibly its `%mor` tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutput {
    pub line: String,
    pub mor: Option<String>,
}

impl fmt::Display for LineOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.line)?;
        if let Some(mor) = &self.mor {
            writeln!(f, "{}", mor)?;
        }
        Ok(())
    }
}

/// Summary of an annotated stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamReport {
    pub lines: usize,
    pub annotated: usize,
    pub errors: Vec<ConversionError>,
}

impl StreamReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The input line without its line ending and trailing spaces.
fn echo(line: &str) -> &str {
    line.trim_end_matches(&[' ', '\n', '\r'][..])
}

/// Adds `%mor` tiers to CHAT lines.
#[derive(Debug, Clone)]
pub struct Annotator {
    tokenizer: Tokenizer,
    tagger: Arc<Tagger>,
    guesser: bool,
    options: AnnotationOptions,
}

impl Annotator {
    pub fn new(
        tokenizer: Tokenizer,
        tagger: Arc<Tagger>,
        guesser: bool,
        options: AnnotationOptions,
    ) -> Self {
        Annotator {
            tokenizer,
            tagger,
            guesser,
            options,
        }
    }

    /// Creates an annotator from a configuration. The tagger is taken from `resources`.
    pub fn from_config(config: &Config, resources: &Resources) -> Result<Self, Error> {
        Ok(Annotator::new(
            config.tokenizer.into(),
            resources.tagger(&config.tagger)?,
            config.guesser,
            config.annotation.clone(),
        ))
    }

    /// Builds the `%mor` tier of a plain text.
    pub fn mor_line(&self, text: &PlainText) -> Result<String, Error> {
        let tokens = self.tokenizer.tokenize(text);
        let flags = TokenFlags::derive(&tokens);

        // tokens consisting of a placeholder only do not exist for the tagger
        let (words, flags): (Vec<String>, Vec<TokenFlags>) = tokens
            .iter()
            .map(|token| strip_placeholders(token))
            .zip(flags)
            .filter(|(word, _)| !word.is_empty())
            .unzip();

        let tagged = self.tagger.tag_tokens(&words, self.guesser)?;

        let mor = tagged
            .iter()
            .zip(flags.iter())
            .filter(|(token, _)| !token.is_quotation_mark())
            .map(|(token, flags)| {
                let (label, categories) = classify(token, flags);
                build(token, flags, &label, &categories, &self.options)
            })
            .join(" ");

        Ok(format!("{}{}", MOR_TIER, mor)
            .replace("+ . . .", "+...")
            .replace("+ / .", "+/."))
    }

    /// Processes one line. Header lines, dependent tiers, lines without content and lines on
    /// the skip list are only echoed.
    pub fn process_line(&self, line: &str) -> Result<LineOutput, Error> {
        let line = echo(line);

        let mor = match normalize(line)? {
            Some(text) if !is_skip_line(&text) => {
                debug!("{:?} normalized to {:?}", line, text.as_str());
                Some(self.mor_line(&text)?)
            }
            _ => None,
        };

        Ok(LineOutput {
            line: line.to_string(),
            mor,
        })
    }

    /// Annotates every line of `reader`. A line which cannot be normalized is reported and
    /// echoed without a `%mor` tier, the remaining lines are processed as usual.
    pub fn annotate_stream<R: BufRead, W: Write>(
        &self,
        reader: R,
        mut writer: W,
    ) -> Result<StreamReport, Error> {
        let mut report = StreamReport::default();

        for line in reader.lines() {
            let line = line?;
            report.lines += 1;

            match self.process_line(&line) {
                Ok(output) => {
                    if output.mor.is_some() {
                        report.annotated += 1;
                    }
                    write!(writer, "{}", output)?;
                }
                Err(Error::Conversion(e)) => {
                    error!("{}", e);
                    writeln!(writer, "{}", echo(&line))?;
                    report.errors.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        writer.flush()?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::tagger::LexiconTagger;
    use crate::components::tokenizer::ChatTokenizer;

    fn annotator() -> Annotator {
        let tagger = LexiconTagger::from_entries(vec![
            ("koupu", "koupat", "VB-S---1P-AAI--"),
            ("vodě", "voda", "NNFS6-----A----"),
            ("pes", "pes", "NNMS1-----A----"),
        ]);

        Annotator::new(
            ChatTokenizer.into(),
            Arc::new(tagger.into()),
            false,
            AnnotationOptions::default(),
        )
    }

    #[test]
    fn annotates_speech_tier() {
        let output = annotator().process_line("*MOT:\tkoupu 0se 0ve vodě .\n").unwrap();

        assert_eq!(output.line, "*MOT:\tkoupu 0se 0ve vodě .");
        assert_eq!(
            output.mor.as_deref(),
            Some("%mor:\tv|koupat-1&SG&ind&pres&akt&impf n|voda-6&SG&F .")
        );
    }

    #[test]
    fn echoes_headers_and_skipped_lines() {
        let annotator = annotator();

        for line in &["@Begin", "%com:\tpoznámka", "*CHI:\txxx .", "*CHI:\t0 ."] {
            let output = annotator.process_line(line).unwrap();
            assert_eq!(output.line, *line);
            assert_eq!(output.mor, None);
        }
    }

    #[test]
    fn multi_character_terminals() {
        let output = annotator().process_line("*CHI:\tpes +...").unwrap();
        assert_eq!(output.mor.as_deref(), Some("%mor:\tn|pes-1&SG&MA +..."));

        let output = annotator().process_line("*CHI:\tpes +/.").unwrap();
        assert_eq!(output.mor.as_deref(), Some("%mor:\tn|pes-1&SG&MA +/."));
    }

    #[test]
    fn placeholders_and_quotes() {
        let output = annotator()
            .process_line("*CHI:\t“haf@i” pes .")
            .unwrap();

        assert_eq!(output.mor.as_deref(), Some("%mor:\tint|haf n|pes-1&SG&MA ."));
    }

    #[test]
    fn stream_continues_after_errors() {
        let input = "@Begin\n*CHI:\tpes .\n*CHI:\tpes {vodě} .\n*CHI:\tvodě .\n@End\n";
        let mut output = Vec::new();

        let report = annotator()
            .annotate_stream(input.as_bytes(), &mut output)
            .unwrap();

        assert_eq!(report.lines, 5);
        assert_eq!(report.annotated, 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].line, "*CHI:\tpes {vodě} .");
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "@Begin\n*CHI:\tpes .\n%mor:\tn|pes-1&SG&MA .\n*CHI:\tpes {vodě} .\n*CHI:\tvodě .\n%mor:\tn|voda-6&SG&F .\n@End\n"
        );
    }
}
