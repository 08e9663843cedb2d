use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// A regular expression over symbols of type `C`.
///
/// The tree is immutable once built: every operation that "changes" a regex returns a new one.
#[derive(Hash, Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Regex<C> {
    /// Matches nothing at all (`∅`).
    Empty,
    /// Matches only the empty string (`ε`).
    Epsilon,
    /// Matches exactly one symbol.
    Char(C),
    Concat(Box<Regex<C>>, Box<Regex<C>>),
    Union(Box<Regex<C>>, Box<Regex<C>>),
    Star(Box<Regex<C>>),
}

// binding strength, used for printing
const UNION: u8 = 0;
const CONCAT: u8 = 1;
const STAR: u8 = 2;

impl<C> Regex<C> {
    pub fn concat(left: Regex<C>, right: Regex<C>) -> Self {
        Regex::Concat(Box::new(left), Box::new(right))
    }

    pub fn union(left: Regex<C>, right: Regex<C>) -> Self {
        Regex::Union(Box::new(left), Box::new(right))
    }

    pub fn star(inner: Regex<C>) -> Self {
        Regex::Star(Box::new(inner))
    }

    /// Returns true if the regex accepts the empty string.
    pub fn is_nullable(&self) -> bool {
        match self {
            Regex::Empty => false,
            Regex::Epsilon => true,
            Regex::Char(_) => false,
            Regex::Concat(l, r) => l.is_nullable() && r.is_nullable(),
            Regex::Union(l, r) => l.is_nullable() || r.is_nullable(),
            Regex::Star(_) => true,
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Regex::Union(_, _) => UNION,
            Regex::Concat(_, _) => CONCAT,
            _ => STAR,
        }
    }
}

impl<C: PartialEq> Regex<C> {
    /// Matches `input` directly against the expression tree, by trying every split point of
    /// concatenations and repetitions.
    ///
    /// Exponential in the worst case. Useful as an oracle for the automata built from a regex.
    pub fn matches(&self, input: &[C]) -> bool {
        if input.is_empty() {
            return self.is_nullable();
        }

        match self {
            Regex::Empty | Regex::Epsilon => false,
            Regex::Char(c) => matches!(input, [only] if only == c),
            Regex::Concat(l, r) => {
                (0..=input.len()).any(|i| l.matches(&input[..i]) && r.matches(&input[i..]))
            }
            Regex::Union(l, r) => l.matches(input) || r.matches(input),
            // a* = e | (a - e) a*, so only non-empty prefixes are split off
            Regex::Star(inner) => {
                (1..=input.len()).any(|i| inner.matches(&input[..i]) && self.matches(&input[i..]))
            }
        }
    }
}

impl<C: Ord + Clone> Regex<C> {
    /// All symbols that occur somewhere in this regex.
    pub fn alphabet(&self) -> BTreeSet<C> {
        let mut alphabet = BTreeSet::new();
        self.search_alphabet(&mut alphabet);
        alphabet
    }

    fn search_alphabet(&self, alphabet: &mut BTreeSet<C>) {
        match self {
            Regex::Empty | Regex::Epsilon => {}
            Regex::Char(c) => {
                alphabet.insert(c.clone());
            }
            Regex::Star(i) => i.search_alphabet(alphabet),
            Regex::Concat(l, r) | Regex::Union(l, r) => {
                l.search_alphabet(alphabet);
                r.search_alphabet(alphabet);
            }
        }
    }
}

impl<C: Display> Regex<C> {
    fn fmt_at(&self, f: &mut Formatter<'_>, min_precedence: u8) -> std::fmt::Result {
        if self.precedence() < min_precedence {
            return write!(f, "({self})");
        }

        match self {
            Regex::Empty => write!(f, "∅"),
            Regex::Epsilon => write!(f, "ε"),
            Regex::Char(c) => write!(f, "{c}"),
            // both operators are left-associative: a nested right operand needs parentheses
            Regex::Concat(l, r) => {
                l.fmt_at(f, CONCAT)?;
                r.fmt_at(f, STAR)
            }
            Regex::Union(l, r) => {
                l.fmt_at(f, UNION)?;
                write!(f, "|")?;
                r.fmt_at(f, CONCAT)
            }
            Regex::Star(r) => {
                r.fmt_at(f, STAR)?;
                write!(f, "*")
            }
        }
    }
}

impl<C: Display> Display for Regex<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.fmt_at(f, UNION)
    }
}
