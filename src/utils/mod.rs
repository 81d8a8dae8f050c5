pub mod regex;

/// Split a text at the points where the given function is true.
/// Keeps the separators. See https://stackoverflow.com/a/40296745.
pub fn split<F>(text: &str, split_func: F) -> Vec<&str>
where
    F: Fn(char) -> bool,
{
    let mut result = Vec::new();
    let mut last = 0;
    for (index, matched) in text.match_indices(split_func) {
        if last != index {
            result.push(&text[last..index]);
        }
        result.push(matched);
        last = index + matched.len();
    }
    if last < text.len() {
        result.push(&text[last..]);
    }

    result
}

/// Whether the string is its own "capitalized" form: first character uppercase
/// (or uncased), all other characters lowercase (or uncased).
pub fn is_capitalized(string: &str) -> bool {
    let mut chars = string.chars();

    match chars.next() {
        None => true,
        Some(first) => {
            !first.is_lowercase() && chars.all(|c| !c.is_uppercase())
        }
    }
}

#[inline]
pub fn splitting_chars() -> &'static str {
    r##".?!,;:“”„"+/()…"##
}
