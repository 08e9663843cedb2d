//! Deciding equivalence of regular expressions.
//!
//! A regular expression is parsed ([`parse_regex`]), translated into a nondeterministic automaton
//! by the Thompson construction ([`regex_to_nfa`]) and determinized by the subset construction
//! ([`nfa_to_dfa`], or [`regex_to_dfa`] for both steps at once). Two expressions are equivalent
//! when the symmetric difference of their DFAs ([`Dfa::symdiff`]) accepts nothing
//! ([`Dfa::is_empty`]).
//!
//! ```rust
//! use relang::*;
//! use std::collections::BTreeSet;
//!
//! let alphabet = BTreeSet::from(['a', 'b']);
//! let left = regex_to_dfa(&alphabet, &parse_regex("a*").unwrap()).unwrap();
//! let right = regex_to_dfa(&alphabet, &parse_regex("ε | a a*").unwrap()).unwrap();
//!
//! assert!(left.symdiff(&right).unwrap().is_empty());
//! assert_eq!(left.equal(&right), Some(true));
//! ```
//!
//! All automata are generic over their state type `S` and symbol type `C`, and keep their states,
//! edges and alphabet in ordered collections, so every construction is deterministic.
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]

use std::collections::BTreeSet;
use thiserror::Error;

pub use relang_regular_expressions::*;

/// Parses a regular expression at compile time.
///
/// ```rust
/// use relang::*;
///
/// let r = regex!("a (b | ε)*");
/// assert!(r.matches(&['a', 'b', 'b']));
/// assert_eq!(r.to_string(), "a(b|ε)*");
/// ```
pub use relang_macros::regex;

pub mod dfa;
pub mod nfa;

mod convert;
mod fixpoint;

#[cfg(feature = "dot")]
mod render;

pub use convert::{dfa_to_nfa, nfa_to_dfa, regex_to_dfa, regex_to_nfa};
pub use dfa::Dfa;
pub use nfa::Nfa;

/// Errors of [`regex_equivalent`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// One of the expressions is not a valid regular expression.
    #[error("invalid regular expression: {0}")]
    Parse(#[from] ParseError),
    /// One of the expressions uses symbols that are not part of the alphabet.
    #[error("symbols {0:?} are not in the alphabet")]
    SymbolOutsideAlphabet(BTreeSet<char>),
    /// Two automata that were compared have different alphabets.
    #[error("automata over different alphabets can't be compared")]
    AlphabetMismatch,
}

fn compile(alphabet: &BTreeSet<char>, source: &str) -> Result<Dfa<usize, char>, Error> {
    let regex = parse_regex(source)?;
    regex_to_dfa(alphabet, &regex).ok_or_else(|| {
        Error::SymbolOutsideAlphabet(regex.alphabet().difference(alphabet).copied().collect())
    })
}

/// Returns whether `left` and `right` describe the same language over `alphabet`.
///
/// ```rust
/// use relang::regex_equivalent;
/// use std::collections::BTreeSet;
///
/// let ab = BTreeSet::from(['a', 'b']);
/// assert_eq!(regex_equivalent(&ab, "(a|b)*", "(a*b*)*"), Ok(true));
/// assert_eq!(regex_equivalent(&ab, "ab", "ba"), Ok(false));
/// assert!(regex_equivalent(&ab, "a|", "a").is_err());
/// ```
pub fn regex_equivalent(alphabet: &BTreeSet<char>, left: &str, right: &str) -> Result<bool, Error> {
    let left = compile(alphabet, left)?;
    let right = compile(alphabet, right)?;

    let difference = left.symdiff(&right).ok_or(Error::AlphabetMismatch)?;
    log::debug!(
        "symmetric difference of dfas with {} and {} states has {} states",
        left.states.len(),
        right.states.len(),
        difference.states.len()
    );
    Ok(difference.is_empty())
}
