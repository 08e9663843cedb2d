//! Procedural macros for `relang`. Use them through the re-exports in that crate.
use proc_macro::TokenStream;
use syn::parse_macro_input;

mod regex;

/// Parses a regular expression at compile time.
///
/// Takes a single string literal in the regex syntax of `relang` and expands to the
/// corresponding `relang::Regex<char>` value. A malformed regex is a compile error pointing at the
/// literal.
///
/// ```
/// use relang::{regex, Regex};
///
/// let r: Regex<char> = regex!("(a|b)*");
/// assert_eq!(r, relang::parse_regex("(a|b)*").unwrap());
/// ```
#[proc_macro]
pub fn regex(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as regex::RegexInput);
    input.emit().into()
}
