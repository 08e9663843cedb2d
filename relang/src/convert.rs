use crate::dfa::Dfa;
use crate::nfa::{Nfa, Transition};
use relang_regular_expressions::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// Views a DFA as an NFA accepting the same language.
///
/// Every DFA state `s` becomes `Some(s)`. The dead state becomes the NFA state `None`, which has no
/// edges and is not accepting. It is the start state if the DFA has no start.
pub fn dfa_to_nfa<S, C>(dfa: &Dfa<S, C>) -> Nfa<Option<S>, C>
where
    S: Ord + Clone,
    C: Ord + Clone,
{
    let transitions = dfa
        .transitions
        .iter()
        .flat_map(|(from, edges)| {
            edges.iter().map(move |(c, to)| {
                Transition::labeled(Some(from.clone()), Some(to.clone()), c.clone())
            })
        })
        .collect();

    Nfa {
        states: dfa.states.iter().cloned().map(Some).chain([None]).collect(),
        alphabet: dfa.alphabet.clone(),
        start: dfa.start.clone(),
        transitions,
        accepting: dfa.accepting.iter().cloned().map(Some).collect(),
    }
}

/// Every subset of `states`.
fn powerset<S: Ord + Clone>(states: &BTreeSet<S>) -> BTreeSet<BTreeSet<S>> {
    let mut subsets = vec![BTreeSet::new()];
    for state in states {
        let with_state: Vec<_> = subsets
            .iter()
            .map(|subset| {
                let mut subset = subset.clone();
                subset.insert(state.clone());
                subset
            })
            .collect();
        subsets.extend(with_state);
    }
    subsets.into_iter().collect()
}

/// Subset construction: a DFA whose states are sets of NFA states.
///
/// All `2^n` subsets of the NFA's states are created up front, reachable or not, and every subset
/// has a transition for every symbol. The empty subset takes the role of the dead state.
pub fn nfa_to_dfa<S, C>(nfa: &Nfa<S, C>) -> Dfa<BTreeSet<S>, C>
where
    S: Ord + Clone,
    C: Ord + Clone,
{
    let states = powerset(&nfa.states);
    log::debug!(
        "subset construction: {} nfa states, {} subsets",
        nfa.states.len(),
        states.len()
    );

    let transitions = states
        .iter()
        .map(|subset| {
            let edges: BTreeMap<C, BTreeSet<S>> = nfa
                .alphabet
                .iter()
                .map(|c| (c.clone(), nfa.epsilon_closure(nfa.step_char(subset, c))))
                .collect();
            (subset.clone(), edges)
        })
        .collect();

    let accepting = states
        .iter()
        .filter(|subset| !subset.is_disjoint(&nfa.accepting))
        .cloned()
        .collect();

    Dfa {
        start: Some(nfa.epsilon_closure([nfa.start.clone()])),
        states,
        alphabet: nfa.alphabet.clone(),
        transitions,
        accepting,
    }
}

enum Step<'r, C> {
    /// Schedule the operands of a regex before the regex itself.
    Visit(&'r Regex<C>),
    /// Combine the automata of the operands, which are on top of the stack.
    Combine(&'r Regex<C>),
}

/// Thompson construction of an NFA from a regex.
///
/// Returns `None` if the regex uses a symbol that is not in `alphabet`. Works with an explicit
/// stack, so deeply nested regexes don't exhaust the call stack.
pub fn regex_to_nfa<C>(alphabet: &BTreeSet<C>, regex: &Regex<C>) -> Option<Nfa<usize, C>>
where
    C: Ord + Clone,
{
    let mut steps = vec![Step::Visit(regex)];
    let mut built: Vec<Nfa<usize, C>> = Vec::new();

    while let Some(step) = steps.pop() {
        // relabel every intermediate result to keep the state type from growing with the regex
        let nfa = match step {
            Step::Visit(Regex::Empty) => Nfa::empty(alphabet.clone()).relabel_states(),
            Step::Visit(Regex::Epsilon) => Nfa::epsilon(alphabet.clone()).relabel_states(),
            Step::Visit(Regex::Char(c)) => {
                Nfa::character(alphabet.clone(), c.clone())?.relabel_states()
            }
            Step::Visit(r @ (Regex::Concat(left, right) | Regex::Union(left, right))) => {
                steps.extend([Step::Combine(r), Step::Visit(right), Step::Visit(left)]);
                continue;
            }
            Step::Visit(r @ Regex::Star(inner)) => {
                steps.extend([Step::Combine(r), Step::Visit(inner)]);
                continue;
            }
            Step::Combine(Regex::Star(_)) => match built.pop() {
                Some(inner) => inner.star().relabel_states(),
                None => unreachable!("operand of a star was not built"),
            },
            Step::Combine(r) => match (built.pop(), built.pop(), r) {
                (Some(right), Some(left), Regex::Concat(_, _)) => {
                    left.concat(&right)?.relabel_states()
                }
                (Some(right), Some(left), Regex::Union(_, _)) => {
                    left.union(&right)?.relabel_states()
                }
                _ => unreachable!("operands of a binary operator were not built"),
            },
        };
        built.push(nfa);
    }

    built.pop()
}

/// Builds a DFA for a regex by determinizing its Thompson NFA.
///
/// Returns `None` if the regex uses a symbol that is not in `alphabet`.
pub fn regex_to_dfa<C>(alphabet: &BTreeSet<C>, regex: &Regex<C>) -> Option<Dfa<usize, C>>
where
    C: Ord + Clone,
{
    let nfa = regex_to_nfa(alphabet, regex)?;
    let dfa = nfa_to_dfa(&nfa).relabel_states();
    log::debug!(
        "regex compiled to an nfa with {} states and a dfa with {} reachable states",
        nfa.states.len(),
        dfa.states.len()
    );
    Some(dfa)
}
