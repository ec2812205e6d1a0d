//! A small, lenient reader for the JavaScript object literals the archive embeds in its
//! responses.
//!
//! The archive does not serve strict JSON: keys are unquoted, record identifiers start with
//! an underscore, and the interesting blocks (`params:{...}`, `points:{...}`) sit inside a
//! larger script body. This module locates those blocks by brace matching, splits them into
//! top-level entries, and turns a single literal into a `serde_json` object by quoting its
//! keys first.

pub mod error;
mod quote;
mod scanner;

pub use quote::{parse_object, quote_keys};
pub use scanner::{find_object_block, find_object_span, top_level_entries, Entry};
