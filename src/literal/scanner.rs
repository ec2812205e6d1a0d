use crate::literal::error::LiteralError;
use std::ops::Range;

/// One `key: value` pair at the top level of an object literal.
///
/// Both halves borrow from the scanned text. `key` has its quotes (if any) removed and
/// `value` is the raw, trimmed source of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Identifier bytes: ASCII word characters plus every byte of a non-ASCII character.
pub(crate) fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || !b.is_ascii()
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Index of the quote closing the string literal that opens at `start`.
pub(crate) fn string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Index of the bracket closing the one that opens at `open`. Brackets inside string
/// literals are ignored.
fn matching_close(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = string_end(bytes, i)?,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Byte range of the first `<marker>:{...}` object literal in `text`, braces included.
///
/// The marker must not be the tail of a longer identifier (`datapoints:{` does not match
/// `points`). Whitespace is allowed around the colon.
pub fn find_object_span(text: &str, marker: &str) -> Result<Range<usize>, LiteralError> {
    let bytes = text.as_bytes();
    for (at, _) in text.match_indices(marker) {
        if at > 0 && is_word_byte(bytes[at - 1]) {
            continue;
        }
        let mut i = skip_whitespace(bytes, at + marker.len());
        if bytes.get(i) != Some(&b':') {
            continue;
        }
        i = skip_whitespace(bytes, i + 1);
        if bytes.get(i) != Some(&b'{') {
            continue;
        }
        return match matching_close(bytes, i) {
            Some(close) => Ok(i..close + 1),
            None => Err(LiteralError::Unterminated(marker.to_string())),
        };
    }
    Err(LiteralError::MarkerNotFound(marker.to_string()))
}

/// The first `<marker>:{...}` object literal in `text`, braces included.
pub fn find_object_block<'a>(text: &'a str, marker: &str) -> Result<&'a str, LiteralError> {
    find_object_span(text, marker).map(|span| &text[span])
}

/// Splits an object literal into its top-level entries, in source order.
///
/// Values are not parsed, so duplicate keys and their positions survive. Keys may be bare
/// identifiers or quoted strings.
pub fn top_level_entries(literal: &str) -> Result<Vec<Entry<'_>>, LiteralError> {
    let bytes = literal.as_bytes();
    let start = skip_whitespace(bytes, 0);
    if bytes.get(start) != Some(&b'{') {
        return Err(LiteralError::Malformed {
            position: start,
            reason: "expected '{'",
        });
    }
    let close = matching_close(bytes, start).ok_or(LiteralError::Malformed {
        position: start,
        reason: "unbalanced braces",
    })?;

    let mut entries = Vec::new();
    let mut i = start + 1;
    loop {
        while i < close && (bytes[i].is_ascii_whitespace() || bytes[i] == b',') {
            i += 1;
        }
        if i >= close {
            break;
        }
        let (key, after_key) = read_key(literal, i)?;
        i = skip_whitespace(bytes, after_key);
        if bytes.get(i) != Some(&b':') {
            return Err(LiteralError::Malformed {
                position: i,
                reason: "expected ':' after key",
            });
        }
        let value_start = skip_whitespace(bytes, i + 1);
        let value_end = value_end(bytes, value_start, close)?;
        let value = literal[value_start..value_end].trim_end();
        if value.is_empty() {
            return Err(LiteralError::Malformed {
                position: value_start,
                reason: "missing value",
            });
        }
        entries.push(Entry { key, value });
        i = value_end;
    }
    Ok(entries)
}

fn read_key(literal: &str, i: usize) -> Result<(&str, usize), LiteralError> {
    let bytes = literal.as_bytes();
    match bytes[i] {
        b'"' | b'\'' => {
            let end = string_end(bytes, i).ok_or(LiteralError::Malformed {
                position: i,
                reason: "unterminated key",
            })?;
            Ok((&literal[i + 1..end], end + 1))
        }
        b if is_word_byte(b) => {
            let mut end = i;
            while end < bytes.len() && is_word_byte(bytes[end]) {
                end += 1;
            }
            Ok((&literal[i..end], end))
        }
        _ => Err(LiteralError::Malformed {
            position: i,
            reason: "expected a key",
        }),
    }
}

fn value_end(bytes: &[u8], start: usize, limit: usize) -> Result<usize, LiteralError> {
    let unbalanced = LiteralError::Malformed {
        position: start,
        reason: "unbalanced value",
    };
    let mut i = start;
    while i < limit {
        match bytes[i] {
            b'"' | b'\'' => match string_end(bytes, i) {
                Some(end) => i = end + 1,
                None => return Err(unbalanced),
            },
            b'{' | b'[' => match matching_close(bytes, i) {
                Some(end) => i = end + 1,
                None => return Err(unbalanced),
            },
            b',' => return Ok(i),
            _ => i += 1,
        }
    }
    Ok(limit)
}
