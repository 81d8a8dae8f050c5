use std::{
    collections::HashMap,
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
    process::{Child, ChildStdin, ChildStdout, Command, Stdio},
    sync::Mutex,
};

use log::{debug, info};

use super::{Tag, TaggerError};
use crate::types::{strip_lemma_id, Token};

/// A running `run_tagger` process fed in vertical format: one token per line, an empty line
/// ends a sentence. It answers with one `word\tlemma\ttag` line per token and an empty line.
#[derive(Debug)]
struct Session {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl Session {
    fn spawn(binary: &Path, model: &Path, guesser: bool) -> Result<Self, TaggerError> {
        let mut child = Command::new(binary)
            .arg("--input=vertical")
            .arg("--output=vertical")
            .arg(format!("--guesser={}", guesser as u8))
            .arg(model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        info!("Started tagger process {} (guesser: {})", child.id(), guesser);

        let stdin = child.stdin.take().ok_or(TaggerError::ProcessExited)?;
        let stdout = child.stdout.take().ok_or(TaggerError::ProcessExited)?;

        Ok(Session {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    fn tag(&mut self, tokens: &[String]) -> Result<Vec<Token>, TaggerError> {
        for token in tokens {
            writeln!(self.stdin, "{}", token)?;
        }
        writeln!(self.stdin)?;
        self.stdin.flush()?;

        let mut output = Vec::with_capacity(tokens.len());
        let mut line = String::new();

        loop {
            line.clear();
            if self.stdout.read_line(&mut line)? == 0 {
                return Err(TaggerError::ProcessExited);
            }

            let line = line.trim_end_matches(&['\r', '\n'][..]);
            if line.is_empty() {
                break;
            }

            output.push(parse_line(line)?);
        }

        if output.len() != tokens.len() {
            return Err(TaggerError::TokenCount {
                expected: tokens.len(),
                found: output.len(),
            });
        }

        Ok(output)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!("Stopping tagger process {}", self.child.id());

        if self.child.kill().is_ok() {
            let _ = self.child.wait();
        }
    }
}

fn parse_line(line: &str) -> Result<Token, TaggerError> {
    let mut parts = line.split('\t');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(word), Some(lemma), Some(tag)) => Ok(Token::new(word, strip_lemma_id(lemma), tag)),
        _ => Err(TaggerError::MalformedOutput(line.to_string())),
    }
}

/// Tags with MorphoDiTa. The process is started lazily, once per guesser setting, and kept
/// running until the tagger is dropped.
#[derive(Debug)]
pub struct ProcessTagger {
    binary: PathBuf,
    model: PathBuf,
    sessions: Mutex<HashMap<bool, Session>>,
}

impl ProcessTagger {
    pub fn new<P1: AsRef<Path>, P2: AsRef<Path>>(binary: P1, model: P2) -> Self {
        ProcessTagger {
            binary: binary.as_ref().to_path_buf(),
            model: model.as_ref().to_path_buf(),
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl Tag for ProcessTagger {
    fn tag_tokens(&self, tokens: &[String], guesser: bool) -> Result<Vec<Token>, TaggerError> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let mut sessions = self.sessions.lock().map_err(|_| TaggerError::Poisoned)?;

        if !sessions.contains_key(&guesser) {
            let session = Session::spawn(&self.binary, &self.model, guesser)?;
            sessions.insert(guesser, session);
        }

        let result = match sessions.get_mut(&guesser) {
            Some(session) => session.tag(tokens),
            None => Err(TaggerError::ProcessExited),
        };

        // a session out of sync with its process is useless
        if result.is_err() {
            sessions.remove(&guesser);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vertical_output() {
        assert_eq!(
            parse_line("je\tbýt_^(stav)\tVB-S---3P-AAI--").unwrap(),
            Token::new("je", "být", "VB-S---3P-AAI--")
        );
        assert!(parse_line("je\tbýt").is_err());
    }

    #[test]
    fn missing_binary_is_an_error() {
        let tagger = ProcessTagger::new("/nonexistent/run_tagger", "czech.tagger");
        let result = tagger.tag_tokens(&["pes".to_string()], false);

        assert!(matches!(result, Err(TaggerError::Io(_))));
    }

    #[test]
    fn nothing_to_tag() {
        let tagger = ProcessTagger::new("/nonexistent/run_tagger", "czech.tagger");
        assert!(tagger.tag_tokens(&[], false).unwrap().is_empty());
    }
}
