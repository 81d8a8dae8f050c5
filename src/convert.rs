//! Conversion of older transcripts to the v3.1 transcription standard.
//!
//! The conversion works line by line, after continuation lines (lines starting with
//! whitespace) have been joined to the line they continue.

use std::io::{BufRead, Write};

use lazy_static::lazy_static;
use log::warn;
use thiserror::Error;

use crate::utils::regex::Regex;

const PHO_PREFIX: &str = "%xpho:\t";

/// Letters of the older transcripts.
const CZECH_LETTERS: &str = "a-zA-ZáäčďéěëíňóöřšťůúüýžÁÄČĎÉĚËÍŇÓÖŘŠŤŮÚÜÝŽ";

lazy_static! {
    static ref AMENDABLE: Regex =
        Regex::new(r"^(@(Comment|Situation)|\*[A-Z]{3}|%(err|add|tim|com)):\t").unwrap();
    static ref MAIN_TIER: Regex = Regex::new(r"^\*[A-Z]{3}:\t").unwrap();
    static ref EMPTY_PHO: Regex = Regex::new(r"^%xpho:\t\.$").unwrap();
    static ref PHO_NOISE: Regex = Regex::new(
        &r"[^ @{L}](?!$)|[^\.{L}]$".replace("{L}", CZECH_LETTERS)
    )
    .unwrap();
    static ref MISSING_FINAL_DOT: Regex = Regex::new(r"([^\.])$").unwrap();
    static ref PHO_WHITESPACE: Regex = Regex::new(r" {2,}|\t+").unwrap();
    static ref QUOTATION: Regex = Regex::new(r#"[„"]([^“"]*)[“"]"#).unwrap();
    static ref INNER_PUNCTUATION: Regex = Regex::new(r" *(,|“|”|;) *").unwrap();
    static ref TERMINAL_PUNCTUATION: Regex =
        Regex::new(r" *(\.|\?|!|\+\.\.\.|\+/\.)$").unwrap();
    static ref MULTIPLE_SPACES: Regex = Regex::new(r" {2,}").unwrap();
    static ref SPACES_AFTER_TAB: Regex = Regex::new(r"\t *").unwrap();
    static ref TABS: Regex = Regex::new(r"\t+").unwrap();
    static ref WORD_FRAGMENT: Regex =
        Regex::new(&r"&([{L}]+)".replace("{L}", CZECH_LETTERS)).unwrap();
    static ref MISSING_WORD: Regex =
        Regex::new(&r"(?<!&=)0([{L}]+)".replace("{L}", CZECH_LETTERS)).unwrap();
    static ref UNSCOPED_CODE: Regex = Regex::new(
        &r"([ \t<]|^)([&+@,=:_{L}]+) (\[[/=x?].*?\])".replace("{L}", CZECH_LETTERS)
    )
    .unwrap();
    static ref REPETITION_MARKER: Regex = Regex::new(r"\[x [0-9]+\]").unwrap();
}

/// Bracket code syntax which could not be converted. The line is kept as it is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("defective \"<> []\" syntax in {0:?}")]
    DefectiveBrackets(String),
    #[error("unable to remove {marker:?} from {line:?}")]
    UnresolvedRepetition { marker: String, line: String },
}

pub fn is_pho_line(line: &str) -> bool {
    line.starts_with(PHO_PREFIX)
}

/// Renames the old `%pho` tier to `%xpho`.
pub fn pho_to_xpho(line: &str) -> String {
    line.replace("%pho", "%xpho")
}

/// Whether the line is a speech tier or one of the tiers which are amended like it.
pub fn allow_amending(line: &str) -> bool {
    AMENDABLE.is_search_match(line)
}

pub fn is_main_tier(line: &str) -> bool {
    MAIN_TIER.is_search_match(line)
}

/// Empty `%xpho` tiers are dropped.
pub fn should_be_removed(line: &str) -> bool {
    EMPTY_PHO.is_search_match(line)
}

/// Keeps only spaces, letters and schwas (`@`) on a `%xpho` tier and ends it with a dot.
pub fn clear_pho_line(line: &str) -> String {
    let (prefix, content) = if is_pho_line(line) {
        line.split_at(PHO_PREFIX.len())
    } else {
        ("", line)
    };

    let content = PHO_NOISE.replace_all_template(content, "");
    let content = MISSING_FINAL_DOT.replace_all_template(&content, "$1 .");
    let content = PHO_WHITESPACE.replace_all_template(content.trim(), " ");

    format!("{}{}", prefix, content)
}

/// Quotations in `„“` or `""` are quoted with `“”`.
pub fn convert_quotation_marks(line: &str) -> String {
    QUOTATION.replace_all_template(line, "“$1”")
}

pub fn horizontal_ellipsis(line: &str) -> String {
    line.replace("+…", "+...")
}

/// Puts single spaces around commas, quotation marks, semicolons and terminal punctuation.
pub fn spaces_around_punctuation(line: &str) -> String {
    let line = INNER_PUNCTUATION.replace_all_template(line, " $1 ");
    let line = TERMINAL_PUNCTUATION.replace_all_template(line.trim(), " $1");
    let line = MULTIPLE_SPACES.replace_all_template(line.trim(), " ");

    // terminal punctuation can be the only token of a line
    SPACES_AFTER_TAB.replace_all_template(&line, "\t")
}

/// `&fragment` is written `&+fragment`.
pub fn word_fragments(line: &str) -> String {
    WORD_FRAGMENT.replace_all_template(line, "&+$1")
}

/// `0word` is written `&=0word`.
pub fn missing_words(line: &str) -> String {
    MISSING_WORD.replace_all_template(line, "&=0$1")
}

/// A `<scope> [code]` group. Indices are byte offsets of `<`, the matching `>` and `]`.
#[derive(Debug, Clone, Copy)]
struct ScopedCode {
    open: usize,
    close: usize,
    end: usize,
}

impl ScopedCode {
    fn code<'a>(&self, line: &'a str) -> &'a str {
        &line[self.close + 3..self.end]
    }
}

fn is_opening(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b'<' && !(i > 0 && bytes[i - 1] == b'+')
}

/// Parses the group opened at `open`. `None` if the brackets are unbalanced or the scope is
/// not followed by ` [code]`.
fn scoped_code_at(line: &str, open: usize) -> Option<ScopedCode> {
    let bytes = line.as_bytes();
    let mut depth = 0;
    let mut close = None;

    for i in open..bytes.len() {
        if is_opening(bytes, i) {
            depth += 1;
        } else if bytes[i] == b'>' {
            depth -= 1;
            if depth == 0 {
                close = Some(i);
                break;
            }
        }
    }

    let close = close?;
    let rest = &line[close + 1..];
    if !rest.starts_with(" [") {
        return None;
    }
    let end = close + 1 + rest.find(']')?;
    if line[close + 3..end].contains('[') || close + 3 == end {
        return None;
    }

    Some(ScopedCode { open, close, end })
}

fn is_scopable_code(code: &str) -> bool {
    code.starts_with(&['/', '=', 'x', '?'][..])
}

/// Makes the word preceding an unscoped bracket code (`/`, `=`, `?`, `x`) its scope. A code
/// following another code gets the whole preceding group as its scope, so
/// `<ťapu> [x 2] [?]` becomes `<<ťapu> [x 2]> [?]`.
pub fn fix_bracket_code_scope(line: &str) -> String {
    let mut result = UNSCOPED_CODE.replace_all_template(line, "$1<$2> $3");

    'outer: loop {
        let bytes = result.as_bytes();

        for open in 0..bytes.len() {
            if !is_opening(bytes, open) {
                continue;
            }

            if let Some(group) = scoped_code_at(&result, open) {
                let following = &result[group.end + 1..];

                if is_scopable_code(group.code(&result))
                    && following.starts_with(" [")
                    && is_scopable_code(&following[2..])
                {
                    result = format!(
                        "{}<{}>{}",
                        &result[..open],
                        &result[open..=group.end],
                        following
                    );
                    continue 'outer;
                }
            }
        }

        break;
    }

    result
}

fn repetition_count(code: &str) -> Option<usize> {
    let digits: String = code
        .strip_prefix("x ")?
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    digits.parse().ok()
}

fn expand_repetitions(line: &str, original: &str) -> Result<String, SyntaxError> {
    let defective = || SyntaxError::DefectiveBrackets(original.to_string());

    let bytes = line.as_bytes();
    let mut result = String::with_capacity(line.len());
    let mut last = 0;
    let mut i = 0;

    while i < bytes.len() {
        if is_opening(bytes, i) {
            let group = scoped_code_at(line, i).ok_or_else(defective)?;
            let content = expand_repetitions(&line[i + 1..group.close], original)?;
            let code = group.code(line);

            result.push_str(&line[last..i]);

            match repetition_count(code) {
                Some(count) => {
                    for _ in 1..count {
                        result.push_str(&format!("<{}> [/] ", content));
                    }
                    result.push_str(&content);
                }
                None => result.push_str(&format!("<{}> [{}]", content, code)),
            }

            i = group.end + 1;
            last = i;
        } else if bytes[i] == b'>' {
            return Err(defective());
        } else {
            i += 1;
        }
    }

    result.push_str(&line[last..]);

    Ok(result)
}

/// Rewrites `<content> [x N]` as `N - 1` retracings `<content> [/]` followed by `content`.
pub fn repetition_to_false_starts(line: &str) -> Result<String, SyntaxError> {
    let result = expand_repetitions(line, line)?;

    if let Some((start, end)) = REPETITION_MARKER.find(&result) {
        return Err(SyntaxError::UnresolvedRepetition {
            marker: result[start..end].to_string(),
            line: line.to_string(),
        });
    }

    Ok(result)
}

/// Converts complete lines. Syntax errors are logged and collected, the affected lines are
/// kept unchanged in the respective step.
#[derive(Debug, Default)]
pub struct Converter {
    fix_errors: bool,
    errors: Vec<SyntaxError>,
}

impl Converter {
    /// With `fix_errors`, unscoped bracket codes get a scope.
    pub fn new(fix_errors: bool) -> Self {
        Converter {
            fix_errors,
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Converts one line. `None` if the line is dropped.
    pub fn convert_line(&mut self, line: &str) -> Option<String> {
        let mut line = pho_to_xpho(line.trim_matches(&['\r', '\n'][..]));

        if is_pho_line(&line) {
            line = clear_pho_line(&line);
        }

        if allow_amending(&line) {
            line = convert_quotation_marks(&line);
            line = horizontal_ellipsis(&line);
            line = spaces_around_punctuation(&line);

            if is_main_tier(&line) {
                line = word_fragments(&line);
                line = missing_words(&line);

                if self.fix_errors {
                    line = fix_bracket_code_scope(&line);
                }

                match repetition_to_false_starts(&line) {
                    Ok(converted) => line = converted,
                    Err(e) => {
                        warn!("{}", e);
                        self.errors.push(e);
                    }
                }
            }
        }

        if should_be_removed(&line) {
            None
        } else {
            Some(line)
        }
    }
}

/// Joins continuation lines to the line they continue and emits complete lines.
pub struct LineComposer<F: FnMut(&str) -> std::io::Result<()>> {
    line: String,
    emit: F,
}

impl<F: FnMut(&str) -> std::io::Result<()>> LineComposer<F> {
    pub fn new(emit: F) -> Self {
        LineComposer {
            line: String::new(),
            emit,
        }
    }

    pub fn add(&mut self, line: &str) -> std::io::Result<()> {
        let line = line.trim_matches(&['\r', '\n'][..]);

        if self.line.is_empty() {
            self.line = line.to_string();
        } else if line.starts_with(char::is_whitespace) {
            self.line.push_str(&TABS.replace_all_template(line, " "));
        } else {
            self.close_line()?;
            self.line = line.to_string();
        }

        Ok(())
    }

    /// Emits the line being built. Empty lines are not emitted.
    pub fn close_line(&mut self) -> std::io::Result<()> {
        let line = std::mem::take(&mut self.line);

        if !line.is_empty() {
            (self.emit)(&line)?;
        }

        Ok(())
    }

    pub fn finish(mut self) -> std::io::Result<()> {
        self.close_line()
    }
}

/// Converts a whole transcript. Returns the syntax errors found.
pub fn convert_stream<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    fix_errors: bool,
) -> Result<Vec<SyntaxError>, crate::Error> {
    let mut converter = Converter::new(fix_errors);

    {
        let mut composer = LineComposer::new(|line| {
            if let Some(converted) = converter.convert_line(line) {
                writeln!(writer, "{}", converted)?;
            }
            Ok(())
        });

        for line in reader.lines() {
            composer.add(&line?)?;
        }

        composer.finish()?;
    }

    writer.flush()?;

    Ok(converter.errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(line: &str) -> Option<String> {
        Converter::new(false).convert_line(line)
    }

    #[test]
    fn pho_lines() {
        assert_eq!(pho_to_xpho("%pho:\tapa"), "%xpho:\tapa");
        assert_eq!(clear_pho_line("%xpho:\tta#ta ?? @ma"), "%xpho:\ttata @ma .");
        assert_eq!(clear_pho_line("%xpho:\tba  ba."), "%xpho:\tba ba.");
        assert_eq!(convert("%pho:\t."), None);
    }

    #[test]
    fn quotation_marks() {
        assert_eq!(convert_quotation_marks("řekl „ahoj“ ."), "řekl “ahoj” .");
        assert_eq!(convert_quotation_marks(r#"řekl "ahoj" ."#), "řekl “ahoj” .");
    }

    #[test]
    fn punctuation_spacing() {
        assert_eq!(
            spaces_around_punctuation("*CHI:\tahoj,“mami”,pojď."),
            "*CHI:\tahoj , “ mami ” , pojď ."
        );
        assert_eq!(spaces_around_punctuation("*CHI:\t ?"), "*CHI:\t?");
        assert_eq!(spaces_around_punctuation("*CHI:\ttak+..."), "*CHI:\ttak +...");
    }

    #[test]
    fn fragments_and_missing_words() {
        assert_eq!(word_fragments("toho &vybavová &=smích"), "toho &+vybavová &=smích");
        assert_eq!(missing_words("koupu 0se &=0ve"), "koupu &=0se &=0ve");
    }

    #[test]
    fn repetitions() {
        assert_eq!(
            repetition_to_false_starts("*CHI:\t<ťapu> [x 3] .").unwrap(),
            "*CHI:\t<ťapu> [/] <ťapu> [/] ťapu ."
        );
        assert_eq!(
            repetition_to_false_starts("*CHI:\t<<ťapu> [x 2]> [?] .").unwrap(),
            "*CHI:\t<<ťapu> [/] ťapu> [?] ."
        );
        assert_eq!(
            repetition_to_false_starts("*CHI:\t+< <já> [/] já .").unwrap(),
            "*CHI:\t+< <já> [/] já ."
        );
    }

    #[test]
    fn defective_brackets() {
        assert!(matches!(
            repetition_to_false_starts("*CHI:\t<ťapu ."),
            Err(SyntaxError::DefectiveBrackets(_))
        ));
        assert!(matches!(
            repetition_to_false_starts("*CHI:\tťapu [x 2] ."),
            Err(SyntaxError::UnresolvedRepetition { .. })
        ));
    }

    #[test]
    fn bracket_scope() {
        assert_eq!(fix_bracket_code_scope("*CHI:\tťapu [x 2] ."), "*CHI:\t<ťapu> [x 2] .");
        assert_eq!(
            fix_bracket_code_scope("*CHI:\t<ťapu> [x 2] [?] ."),
            "*CHI:\t<<ťapu> [x 2]> [?] ."
        );
        assert_eq!(fix_bracket_code_scope("*CHI:\tpes [*] ."), "*CHI:\tpes [*] .");
    }

    #[test]
    fn whole_lines() {
        let mut converter = Converter::new(true);

        assert_eq!(
            converter.convert_line("*CHI:\tťapu [x 2] &ťa 0se.\r\n").as_deref(),
            Some("*CHI:\t<ťapu> [/] ťapu &+ťa &=0se .")
        );
        assert_eq!(
            converter.convert_line("@Comment:\t„ahoj“").as_deref(),
            Some("@Comment:\t“ ahoj ”")
        );
        assert_eq!(converter.convert_line("@Begin").as_deref(), Some("@Begin"));
        assert!(converter.errors().is_empty());
    }

    #[test]
    fn continuation_lines_are_joined() {
        let input = "*CHI:\tjá chci\n\tty . \n%pho:\tja\n\n@End\n";
        let mut output = Vec::new();

        let errors = convert_stream(input.as_bytes(), &mut output, false).unwrap();

        assert!(errors.is_empty());
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "*CHI:\tjá chci ty .\n%xpho:\tja .\n@End\n"
        );
    }

    #[test]
    fn tab_runs_in_continuation_lines_become_one_space() {
        let mut lines = Vec::new();
        let mut composer = LineComposer::new(|line: &str| {
            lines.push(line.to_string());
            Ok(())
        });

        composer.add("*CHI:\tjá chci\n").unwrap();
        composer.add("\t\tty\t\t.\n").unwrap();
        composer.finish().unwrap();

        assert_eq!(lines, vec!["*CHI:\tjá chci ty ."]);
    }
}
