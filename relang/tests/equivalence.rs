use relang::dfa::Dfa;
use relang::{parse_regex, regex_equivalent, regex_to_dfa, Error, Regex};
use std::collections::BTreeSet;

#[ctor::ctor]
fn init() {
    env_logger::init();
}

fn ab() -> BTreeSet<char> {
    BTreeSet::from(['a', 'b'])
}

fn dfa(source: &str) -> Dfa<usize, char> {
    regex_to_dfa(&ab(), &parse_regex(source).unwrap()).unwrap()
}

fn equivalent(left: &str, right: &str) -> bool {
    dfa(left).symdiff(&dfa(right)).unwrap().is_empty()
}

#[test]
fn test_brackets_do_not_change_language() {
    assert!(equivalent("a|b", "(a|b)"));
    assert!(equivalent("a|b", "[{(a)}|(b)]"));
}

#[test]
fn test_star_unfolds() {
    assert!(equivalent("a*", "ε|aa*"));
    assert!(equivalent("a*", "a*a*"));
    assert!(equivalent("a**", "a*"));
}

#[test]
fn test_concat_is_not_commutative() {
    assert!(!equivalent("ab", "ba"));
    assert!(equivalent("a|b", "b|a"));
}

#[test]
fn test_empty_star_is_epsilon() {
    let empty = dfa("∅");
    let empty_star = dfa("∅*");

    assert!(empty.is_empty());
    assert!(!empty_star.is_empty());
    assert!(!equivalent("∅", "∅*"));
    assert!(equivalent("∅*", "ε"));
}

#[test]
fn test_classic_identities() {
    assert!(equivalent("(a|b)*", "(a*b*)*"));
    assert!(equivalent("(ab)*a", "a(ba)*"));
    assert!(equivalent("a∅", "∅"));
    assert!(equivalent("aε", "a"));
    assert!(!equivalent("(a|b)*", "a*|b*"));
}

#[test]
fn test_parse_failure_offset() {
    let e = parse_regex("a|").unwrap_err();
    assert_eq!(e.offset, 2);
}

#[test]
fn test_symbol_outside_alphabet() {
    assert_eq!(regex_to_dfa(&ab(), &Regex::Char('c')), None);
}

#[test]
fn test_equal_agrees_with_symdiff() {
    let sources = ["a|b", "(a|b)", "a*", "ε|aa*", "ab", "ba", "∅", "∅*"];
    for left in sources {
        for right in sources {
            assert_eq!(
                dfa(left).equal(&dfa(right)),
                Some(equivalent(left, right)),
                "{left} vs {right}"
            );
        }
    }
}

#[test]
fn test_regex_equivalent() {
    assert_eq!(regex_equivalent(&ab(), "a|b", "(a|b)"), Ok(true));
    assert_eq!(regex_equivalent(&ab(), "ab", "ba"), Ok(false));

    assert!(matches!(
        regex_equivalent(&ab(), "a|", "a"),
        Err(Error::Parse(e)) if e.offset == 2
    ));
    assert_eq!(
        regex_equivalent(&ab(), "a", "a c d"),
        Err(Error::SymbolOutsideAlphabet(BTreeSet::from(['c', 'd'])))
    );
}

#[test]
fn test_error_messages() {
    let e = regex_equivalent(&ab(), "(a", "a").unwrap_err();
    assert!(e.to_string().starts_with("invalid regular expression: "));
    assert!(e.to_string().ends_with("at offset 2"));

    let e = regex_equivalent(&ab(), "c", "a").unwrap_err();
    assert_eq!(e.to_string(), "symbols {'c'} are not in the alphabet");
}
