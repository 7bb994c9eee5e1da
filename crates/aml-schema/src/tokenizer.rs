//! Structural tokenization of path query text.
//!
//! Only the shape of a path matters here: which object fields and array
//! levels it walks through. Filters, unions and slices are not structural and
//! make the whole path unusable.

use std::fmt;

/// One structural step of a path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Token {
    /// An object member, from `name` or `['name']`.
    Field(String),
    /// An array level, from `[n]`, `[*]` or a bare `*`.
    ArrayWildcard,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::ArrayWildcard => f.write_str("*"),
        }
    }
}

/// Splits a path query into structural tokens.
///
/// A leading `$` and the dot after it are optional. Empty segments (as in
/// `$..a`) are skipped. Any segment that is not a field, a quoted field, an
/// index or a wildcard makes the result empty.
pub fn tokenize(path: &str) -> Vec<Token> {
    let trimmed = path.trim();
    let rest = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let rest = rest.strip_prefix('.').unwrap_or(rest);

    let mut tokens = Vec::new();
    for segment in split_segments(rest) {
        if segment.is_empty() {
            continue;
        }
        if parse_segment(segment, &mut tokens).is_none() {
            return Vec::new();
        }
    }
    tokens
}

/// Splits on `.` outside brackets and quotes.
fn split_segments(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (index, c) in path.char_indices() {
        match (quote, c) {
            (Some(open), _) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, '.') if depth == 0 => {
                segments.push(&path[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    segments.push(&path[start..]);
    segments
}

fn parse_segment(segment: &str, tokens: &mut Vec<Token>) -> Option<()> {
    let mut rest = segment;
    if let Some(after) = rest.strip_prefix('*') {
        tokens.push(Token::ArrayWildcard);
        rest = after;
    } else if rest.starts_with(is_identifier_start) {
        let end = rest
            .find(|c: char| !is_identifier_char(c))
            .unwrap_or(rest.len());
        tokens.push(Token::Field(rest[..end].to_string()));
        rest = &rest[end..];
    }
    while !rest.is_empty() {
        let body = rest.strip_prefix('[')?;
        let (token, after) = parse_bracket(body)?;
        tokens.push(token);
        rest = after;
    }
    Some(())
}

/// Parses the inside of a bracket group; `body` starts just after `[`.
fn parse_bracket(body: &str) -> Option<(Token, &str)> {
    if let Some(quote) = body.chars().next().filter(|&c| matches!(c, '\'' | '"')) {
        let inner = &body[1..];
        let close = inner.find(quote)?;
        let name = &inner[..close];
        let after = inner[close + 1..].strip_prefix(']')?;
        if name.is_empty() {
            return None;
        }
        return Some((Token::Field(name.to_string()), after));
    }
    let close = body.find(']')?;
    let inner = body[..close].trim();
    let is_index = !inner.is_empty() && inner.chars().all(|c| c.is_ascii_digit());
    if inner == "*" || is_index {
        Some((Token::ArrayWildcard, &body[close + 1..]))
    } else {
        None
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}
