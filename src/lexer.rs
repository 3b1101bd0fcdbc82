use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Declaration keyword followed by a bare identifier. Purely lexical: a
/// matching character sequence inside a string, comment, or property access
/// is indistinguishable from a real binding and will be picked up too.
static DECLARATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:var|let|const)\s+([A-Za-z_$][A-Za-z0-9_$]*)").unwrap()
});

/// Single-, double-, or backtick-quoted literal. A backslash followed by any
/// character is one escaped unit and does not terminate the literal.
static STRING_LITERAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)'(?:\\.|[^'\\])*'|"(?:\\.|[^"\\])*"|`(?:\\.|[^`\\])*`"#).unwrap()
});

/// A matched string literal: delimiter plus the inner text exactly as it
/// appears in the source, escapes left as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral<'a> {
    pub delimiter: char,
    pub inner: &'a str,
}

/// Names declared in `source`, first occurrence per distinct name, in
/// source order.
pub fn declared_identifiers(source: &str) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    let mut names = Vec::new();
    for caps in DECLARATION_REGEX.captures_iter(source) {
        let name = caps.get(1).unwrap().as_str();
        if seen.insert(name) {
            names.push(name);
        }
    }
    names
}

pub fn string_literals(source: &str) -> Vec<StringLiteral<'_>> {
    STRING_LITERAL_REGEX
        .find_iter(source)
        .map(|m| {
            let text = m.as_str();
            StringLiteral {
                delimiter: text.chars().next().unwrap(),
                inner: &text[1..text.len() - 1],
            }
        })
        .collect()
}

/// Replaces every string literal with `f(literal)`, leaving the rest of the
/// text untouched.
pub fn rewrite_string_literals<F>(source: &str, mut f: F) -> String
where
    F: FnMut(&StringLiteral<'_>) -> String,
{
    STRING_LITERAL_REGEX
        .replace_all(source, |caps: &Captures| {
            let text = caps.get(0).unwrap().as_str();
            f(&StringLiteral {
                delimiter: text.chars().next().unwrap(),
                inner: &text[1..text.len() - 1],
            })
        })
        .into_owned()
}
