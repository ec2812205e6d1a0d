use crate::literal::error::LiteralError;
use crate::literal::scanner::{is_word_byte, string_end};
use serde_json::{Map, Value};

/// Rewrites a JavaScript object literal into strict JSON text.
///
/// Outside of string literals this:
/// * wraps bare keys (a word directly after `{` or `,` and before `:`) in double quotes,
/// * turns single-quoted strings into double-quoted ones,
/// * drops trailing commas before `}` and `]`,
/// * replaces the bare values `undefined` and `NaN` with `null`.
///
/// Anything inside a double-quoted string is copied untouched, so a station name such as
/// `"Ljubljana: Bežigrad"` never gets mangled.
pub fn quote_keys(literal: &str) -> String {
    let bytes = literal.as_bytes();
    let mut out = String::with_capacity(literal.len() + literal.len() / 4);
    let mut last_significant: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'"' => {
                let end = string_end(bytes, i).map_or(bytes.len(), |e| e + 1);
                out.push_str(&literal[i..end]);
                last_significant = Some(b'"');
                i = end;
            }
            b'\'' => {
                let (content_end, next) = match string_end(bytes, i) {
                    Some(e) => (e, e + 1),
                    None => (bytes.len(), bytes.len()),
                };
                push_single_quoted(&mut out, &literal[i + 1..content_end]);
                last_significant = Some(b'"');
                i = next;
            }
            b',' if matches!(next_significant(bytes, i + 1), Some(b'}') | Some(b']')) => {
                i += 1;
            }
            _ if is_word_byte(b) => {
                let mut end = i + 1;
                while end < bytes.len() && is_word_byte(bytes[end]) {
                    end += 1;
                }
                let word = &literal[i..end];
                let is_key = matches!(last_significant, Some(b'{') | Some(b','))
                    && next_significant(bytes, end) == Some(b':');
                if is_key {
                    out.push('"');
                    out.push_str(word);
                    out.push('"');
                } else if word == "undefined" || word == "NaN" {
                    out.push_str("null");
                } else {
                    out.push_str(word);
                }
                last_significant = Some(b'a');
                i = end;
            }
            _ => {
                let width = literal[i..].chars().next().map_or(1, char::len_utf8);
                out.push_str(&literal[i..i + width]);
                if !b.is_ascii_whitespace() {
                    last_significant = Some(b);
                }
                i += width;
            }
        }
    }
    out
}

fn next_significant(bytes: &[u8], from: usize) -> Option<u8> {
    bytes[from.min(bytes.len())..]
        .iter()
        .copied()
        .find(|b| !b.is_ascii_whitespace())
}

fn push_single_quoted(out: &mut String, content: &str) {
    out.push('"');
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\'') => out.push('\''),
                Some(escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push_str("\\\\"),
            },
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out.push('"');
}

/// Parses a single object literal (`{...}`) into a JSON object.
pub fn parse_object(literal: &str) -> Result<Map<String, Value>, LiteralError> {
    let json = quote_keys(literal);
    match serde_json::from_str::<Value>(&json)? {
        Value::Object(map) => Ok(map),
        Value::Array(_) => Err(LiteralError::NotAnObject("an array")),
        Value::String(_) => Err(LiteralError::NotAnObject("a string")),
        Value::Number(_) => Err(LiteralError::NotAnObject("a number")),
        Value::Bool(_) => Err(LiteralError::NotAnObject("a boolean")),
        Value::Null => Err(LiteralError::NotAnObject("null")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quotes_bare_and_underscore_keys() {
        assert_eq!(
            quote_keys(r#"{_101:{name:"Test",lon:14.5}}"#),
            r#"{"_101":{"name":"Test","lon":14.5}}"#
        );
    }

    #[test]
    fn leaves_colons_inside_strings_alone() {
        let quoted = quote_keys(r#"{l:"Ljubljana: Bežigrad", s:"a,b:c"}"#);
        assert_eq!(quoted, r#"{"l":"Ljubljana: Bežigrad", "s":"a,b:c"}"#);
    }

    #[test]
    fn already_quoted_keys_are_kept() {
        assert_eq!(quote_keys(r#"{"p0": 1}"#), r#"{"p0": 1}"#);
    }

    #[test]
    fn values_that_look_like_words_are_not_keys() {
        assert_eq!(
            quote_keys("{a:true, b:null, c:undefined, d:NaN, e:1e5}"),
            r#"{"a":true, "b":null, "c":null, "d":null, "e":1e5}"#
        );
    }

    #[test]
    fn converts_single_quoted_strings() {
        assert_eq!(
            quote_keys(r#"{a:'it\'s "x"'}"#),
            r#"{"a":"it's \"x\""}"#
        );
    }

    #[test]
    fn drops_trailing_commas() {
        assert_eq!(quote_keys("{a:[1,2,], b:2 ,}"), r#"{"a":[1,2], "b":2 }"#);
    }

    #[test]
    fn parses_schema_literal() {
        let map = parse_object(r#"{p0:{pid:"12", l:"Temperatura [°C]"}, p1:{l:"Vlaga"}}"#).unwrap();
        assert_eq!(map["p0"]["l"], json!("Temperatura [°C]"));
        assert_eq!(map["p1"], json!({"l": "Vlaga"}));
    }

    #[test]
    fn quotes_non_ascii_keys() {
        assert_eq!(quote_keys("{čas:1, t2m:'°C'}"), r#"{"čas":1, "t2m":"°C"}"#);
        let map = parse_object("{čas:1}").unwrap();
        assert_eq!(map["čas"], json!(1));
    }

    #[test]
    fn rejects_non_objects() {
        assert!(matches!(
            parse_object("[1,2]"),
            Err(LiteralError::NotAnObject("an array"))
        ));
    }

    #[test]
    fn reports_json_errors() {
        assert!(matches!(parse_object("{p0:}"), Err(LiteralError::Json(_))));
    }
}
