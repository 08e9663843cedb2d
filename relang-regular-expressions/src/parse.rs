use crate::{ParseError, Regex};
use winnow::ascii::multispace0;
use winnow::combinator::{alt, cut_err, delimited, eof, fail, peek, preceded, repeat, terminated};
use winnow::error::{ContextError, ErrMode, ParserError, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::one_of;

/// Returns true for the characters that may be used as a symbol in a regular expression.
pub fn valid_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

fn ws<'a, F, O, E: ParserError<&'a str>>(inner: F) -> impl Parser<&'a str, O, E>
where
    F: Parser<&'a str, O, E>,
{
    delimited(multispace0, inner, multispace0)
}

/// Brackets may be nested this deep. Deeper nesting is rejected by [`parse_regex`].
pub const MAX_NESTING: usize = 128;

fn open_bracket(input: &mut &'_ str) -> ModalResult<char> {
    one_of(['(', '[', '{']).parse_next(input)
}

fn close_bracket(input: &mut &'_ str) -> ModalResult<char> {
    let expected = StrContextValue::Description("closing bracket");
    one_of([')', ']', '}'])
        .context(StrContext::Expected(expected))
        .parse_next(input)
}

/// Fails on the bracket that opens one group more than [`MAX_NESTING`] allows.
fn too_deep(input: &mut &'_ str) -> ModalResult<Regex<char>> {
    let limit = StrContextValue::Description("at most 128 nested brackets");
    preceded(peek(open_bracket), cut_err(fail))
        .context(StrContext::Label("nesting"))
        .context(StrContext::Expected(limit))
        .parse_next(input)
}

// Any kind of bracket closes any other kind: `(a]` is a valid group.
fn parse_group(input: &mut &'_ str, depth: usize) -> ModalResult<Regex<char>> {
    if depth >= MAX_NESTING {
        return too_deep(input);
    }

    let inner = move |i: &mut &'_ str| parse_union(i, depth + 1);
    preceded(open_bracket, cut_err(terminated(inner, close_bracket))).parse_next(input)
}

fn parse_atom(input: &mut &'_ str, depth: usize) -> ModalResult<Regex<char>> {
    ws(alt((
        "∅".value(Regex::Empty),
        "ε".value(Regex::Epsilon),
        one_of(valid_char).map(Regex::Char),
        move |i: &mut &'_ str| parse_group(i, depth),
    )))
    .context(StrContext::Label("atom"))
    .context(StrContext::Expected(StrContextValue::Description(
        "an alphanumeric symbol, `∅`, `ε` or a bracketed expression",
    )))
    .parse_next(input)
}

fn parse_stars(input: &mut &'_ str) -> ModalResult<usize> {
    repeat(0.., ws("*")).parse_next(input)
}

fn parse_star(input: &mut &'_ str, depth: usize) -> ModalResult<Regex<char>> {
    (move |i: &mut &'_ str| parse_atom(i, depth), parse_stars)
        .map(|(atom, stars)| (0..stars).fold(atom, |inner, _| Regex::star(inner)))
        .parse_next(input)
}

fn parse_concat(input: &mut &'_ str, depth: usize) -> ModalResult<Regex<char>> {
    let star = move |i: &mut &'_ str| parse_star(i, depth);
    (star, repeat(0.., star))
        .map(|(first, rest): (Regex<char>, Vec<Regex<char>>)| {
            rest.into_iter().fold(first, Regex::concat)
        })
        .parse_next(input)
}

fn parse_union(input: &mut &'_ str, depth: usize) -> ModalResult<Regex<char>> {
    let concat = move |i: &mut &'_ str| parse_concat(i, depth);
    (concat, repeat(0.., preceded(ws("|"), cut_err(concat))))
        .map(|(first, rest): (Regex<char>, Vec<Regex<char>>)| {
            rest.into_iter().fold(first, Regex::union)
        })
        .parse_next(input)
}

impl ParseError {
    fn new(source: &str, rest: &str, error: ErrMode<ContextError>) -> Self {
        let offset = source.len() - rest.len();
        let found = match rest.chars().next() {
            Some(c) => format!("unexpected `{c}`"),
            None => "unexpected end of input".to_string(),
        };
        let details = match error {
            ErrMode::Backtrack(e) | ErrMode::Cut(e) => e.to_string().replace('\n', ", "),
            ErrMode::Incomplete(_) => String::new(),
        };

        let message = if details.is_empty() {
            found
        } else {
            format!("{found}: {details}")
        };

        Self { message, offset }
    }
}

/// parse a string to a regular expression
///
/// The whole input has to be a regular expression, trailing characters are an error. The offset
/// of a [`ParseError`] is the byte offset of the first token that could not be parsed, after any
/// whitespace: `"a| "` fails at offset 3, the end of the input. Brackets may be nested at most
/// [`MAX_NESTING`] deep.
pub fn parse_regex(input: impl AsRef<str>) -> Result<Regex<char>, ParseError> {
    let source = input.as_ref();
    let mut rest = source;

    let regex = |i: &mut &'_ str| parse_union(i, 0);
    terminated(ws(regex), eof)
        .parse_next(&mut rest)
        .map_err(|e| ParseError::new(source, rest, e))
}
