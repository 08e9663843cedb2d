//! Regular expressions over ASCII alphanumeric symbols.
//!
//! Syntax, from loosest to tightest binding:
//!
//! * `r | s`: union, left-associative
//! * `r s`: concatenation, left-associative
//! * `r*`: repetition, may be repeated (`r**`)
//! * `∅` (matches nothing), `ε` (matches the empty string), a single alphanumeric character, or
//!   a bracketed expression. `()`, `[]` and `{}` can be used interchangeably, and an opening
//!   bracket may be closed by a bracket of a different kind.
//!
//! Whitespace between tokens is ignored.
use thiserror::Error;

mod parse;
mod regex;

pub use parse::{parse_regex, valid_char, MAX_NESTING};
pub use regex::Regex;

/// Failure to parse a regular expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at offset {offset}")]
pub struct ParseError {
    /// Human-readable description of what went wrong.
    pub message: String,
    /// Byte offset into the source at which parsing failed.
    pub offset: usize,
}
