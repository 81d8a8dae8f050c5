use onig::{Captures, RegexOptions, Syntax};
use std::fmt;
use std::ops::Deref;

/// An [onig] regex which remembers its source pattern.
pub struct Regex {
    pattern: String,
    regex: onig::Regex,
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Self, onig::Error> {
        Ok(Regex {
            regex: Regex::compile(pattern)?,
            pattern: pattern.to_string(),
        })
    }

    fn compile(pattern: &str) -> Result<onig::Regex, onig::Error> {
        onig::Regex::with_options(pattern, RegexOptions::REGEX_OPTION_NONE, Syntax::java())
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Whether the regex matches anywhere in `text`.
    /// `onig::Regex::is_match` only matches at the start of the text.
    pub fn is_search_match(&self, text: &str) -> bool {
        self.regex.find(text).is_some()
    }

    /// Replaces all non-overlapping matches. `$1`, `$2`, ... in `template` are expanded
    /// to the corresponding capture groups (empty if the group did not participate).
    pub fn replace_all_template(&self, text: &str, template: &str) -> String {
        if template.contains('$') {
            self.regex
                .replace_all(text, |caps: &Captures| dollar_replace(template, caps))
        } else {
            self.regex.replace_all(text, template)
        }
    }
}

// see https://github.com/rust-onig/rust-onig/issues/59#issuecomment-340160520
fn dollar_replace(template: &str, caps: &Captures) -> String {
    let mut replacement = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' || !chars.peek().map_or(false, char::is_ascii_digit) {
            replacement.push(c);
            continue;
        }

        let mut group = 0;
        while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
            group = group * 10 + digit as usize;
            chars.next();
        }
        replacement.push_str(caps.at(group).unwrap_or(""));
    }

    replacement
}

impl fmt::Debug for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Regex").field(&self.pattern).finish()
    }
}

impl Deref for Regex {
    type Target = onig::Regex;

    fn deref(&self) -> &Self::Target {
        &self.regex
    }
}
