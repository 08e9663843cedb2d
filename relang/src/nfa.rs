//! Nondeterministic finite automata with epsilon edges.
//!
//! The constructors in this module ([`Nfa::empty`], [`Nfa::epsilon`], [`Nfa::character`],
//! [`Nfa::union`], [`Nfa::concat`] and [`Nfa::star`]) form the basis of the Thompson construction
//! in [`regex_to_nfa`](crate::regex_to_nfa). The combinators tag the states of their operands
//! ([`UnionState`], [`ConcatState`], [`StarState`]), so sub-automata never share states.
use crate::fixpoint::fixpoint;
use std::collections::{BTreeMap, BTreeSet};

/// An edge of an [`Nfa`]. Edges without a label are epsilon edges.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition<S, C> {
    pub from: S,
    pub to: S,
    pub label: Option<C>,
}

impl<S, C> Transition<S, C> {
    pub fn epsilon(from: S, to: S) -> Self {
        Self {
            from,
            to,
            label: None,
        }
    }

    pub fn labeled(from: S, to: S, label: C) -> Self {
        Self {
            from,
            to,
            label: Some(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa<S, C> {
    pub states: BTreeSet<S>,
    pub alphabet: BTreeSet<C>,
    pub start: S,
    pub transitions: BTreeSet<Transition<S, C>>,
    pub accepting: BTreeSet<S>,
}

/// States of [`Nfa::union`]: a fresh start state plus the states of both operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UnionState<S, T> {
    Start,
    Left(S),
    Right(T),
}

/// States of [`Nfa::concat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConcatState<S, T> {
    Left(S),
    Right(T),
}

/// States of [`Nfa::star`]: a fresh, accepting, start state plus the states of the operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StarState<S> {
    Start,
    Inner(S),
}

impl<S, C> Nfa<S, C>
where
    S: Ord + Clone,
    C: Ord + Clone,
{
    /// Checks that the start state, all edges and all accepting states only refer to states of
    /// this automaton, and that all edge labels are in the alphabet.
    pub fn validate(&self) -> bool {
        self.states.contains(&self.start)
            && self.transitions.iter().all(|t| {
                self.states.contains(&t.from)
                    && self.states.contains(&t.to)
                    && t.label.iter().all(|c| self.alphabet.contains(c))
            })
            && self.accepting.is_subset(&self.states)
    }

    /// Targets of all edges leaving `states` whose label satisfies `along`.
    fn follow(&self, states: &BTreeSet<S>, along: impl Fn(Option<&C>) -> bool) -> BTreeSet<S> {
        self.transitions
            .iter()
            .filter(|t| states.contains(&t.from) && along(t.label.as_ref()))
            .map(|t| t.to.clone())
            .collect()
    }

    /// All states that can be reached from the start state, over any kind of edge.
    pub fn reachable_states(&self) -> BTreeSet<S> {
        fixpoint(BTreeSet::from([self.start.clone()]), |reached| {
            self.follow(reached, |_| true)
        })
    }

    /// All states reachable from `states` using only epsilon edges, including `states` itself.
    pub fn epsilon_closure(&self, states: impl IntoIterator<Item = S>) -> BTreeSet<S> {
        fixpoint(states.into_iter().collect(), |reached| {
            self.follow(reached, |label| label.is_none())
        })
    }

    /// All states reachable from `states` with exactly one edge labelled `c`.
    ///
    /// Does not follow epsilon edges before or after, combine with [`Nfa::epsilon_closure`] for
    /// that.
    pub fn step_char(&self, states: &BTreeSet<S>, c: &C) -> BTreeSet<S> {
        self.follow(states, |label| label == Some(c))
    }

    /// Returns true if the automaton accepts `input`.
    pub fn parse_string(&self, input: impl IntoIterator<Item = C>) -> bool {
        let mut current = self.epsilon_closure([self.start.clone()]);
        for c in input {
            current = self.epsilon_closure(self.step_char(&current, &c));
        }
        !current.is_disjoint(&self.accepting)
    }

    /// Renames every state with `f`, which must be injective.
    pub fn map_states<T: Ord>(&self, f: impl Fn(S) -> T) -> Nfa<T, C> {
        Nfa {
            states: self.states.iter().cloned().map(&f).collect(),
            alphabet: self.alphabet.clone(),
            start: f(self.start.clone()),
            transitions: self
                .transitions
                .iter()
                .map(|t| Transition {
                    from: f(t.from.clone()),
                    to: f(t.to.clone()),
                    label: t.label.clone(),
                })
                .collect(),
            accepting: self.accepting.iter().cloned().map(&f).collect(),
        }
    }

    /// Drops all unreachable states and numbers the remaining states `1..=n`, in order.
    pub fn relabel_states(&self) -> Nfa<usize, C> {
        let reachable = self.reachable_states();
        let mapping: BTreeMap<&S, usize> = reachable.iter().zip(1..).collect();

        let transitions = self
            .transitions
            .iter()
            .filter_map(|t| {
                let from = *mapping.get(&t.from)?;
                // an edge leaving a reachable state always ends in a reachable state
                let to = mapping[&t.to];
                Some(Transition {
                    from,
                    to,
                    label: t.label.clone(),
                })
            })
            .collect();

        Nfa {
            states: mapping.values().copied().collect(),
            alphabet: self.alphabet.clone(),
            start: mapping[&self.start],
            transitions,
            accepting: self
                .accepting
                .iter()
                .filter_map(|s| mapping.get(s).copied())
                .collect(),
        }
    }

    /// Accepts the strings accepted by either `self` or `other`.
    ///
    /// Returns `None` if the alphabets differ.
    pub fn union<T: Ord + Clone>(&self, other: &Nfa<T, C>) -> Option<Nfa<UnionState<S, T>, C>> {
        if self.alphabet != other.alphabet {
            return None;
        }

        let left = self.map_states(UnionState::Left);
        let right = other.map_states(UnionState::Right);

        let mut states = left.states;
        states.extend(right.states);
        states.insert(UnionState::Start);

        let mut transitions = left.transitions;
        transitions.extend(right.transitions);
        transitions.insert(Transition::epsilon(UnionState::Start, left.start));
        transitions.insert(Transition::epsilon(UnionState::Start, right.start));

        let mut accepting = left.accepting;
        accepting.extend(right.accepting);

        Some(Nfa {
            states,
            alphabet: left.alphabet,
            start: UnionState::Start,
            transitions,
            accepting,
        })
    }

    /// Accepts a string accepted by `self` followed by a string accepted by `other`.
    ///
    /// Returns `None` if the alphabets differ.
    pub fn concat<T: Ord + Clone>(&self, other: &Nfa<T, C>) -> Option<Nfa<ConcatState<S, T>, C>> {
        if self.alphabet != other.alphabet {
            return None;
        }

        let left = self.map_states(ConcatState::Left);
        let right = other.map_states(ConcatState::Right);

        let mut states = left.states;
        states.extend(right.states);

        let mut transitions = left.transitions;
        transitions.extend(right.transitions);
        for accepting in &left.accepting {
            transitions.insert(Transition::epsilon(accepting.clone(), right.start.clone()));
        }

        Some(Nfa {
            states,
            alphabet: left.alphabet,
            start: left.start,
            transitions,
            accepting: right.accepting,
        })
    }

    /// Accepts any number of repetitions of strings accepted by `self`, including none.
    pub fn star(&self) -> Nfa<StarState<S>, C> {
        let inner = self.map_states(StarState::Inner);

        let mut states = inner.states;
        states.insert(StarState::Start);

        let mut transitions = inner.transitions;
        transitions.insert(Transition::epsilon(StarState::Start, inner.start.clone()));
        for accepting in &inner.accepting {
            transitions.insert(Transition::epsilon(accepting.clone(), inner.start.clone()));
        }

        let mut accepting = inner.accepting;
        accepting.insert(StarState::Start);

        Nfa {
            states,
            alphabet: inner.alphabet,
            start: StarState::Start,
            transitions,
            accepting,
        }
    }
}

impl<C: Ord + Clone> Nfa<(), C> {
    /// Accepts nothing.
    pub fn empty(alphabet: BTreeSet<C>) -> Self {
        Nfa {
            states: BTreeSet::from([()]),
            alphabet,
            start: (),
            transitions: BTreeSet::new(),
            accepting: BTreeSet::new(),
        }
    }

    /// Accepts only the empty string.
    pub fn epsilon(alphabet: BTreeSet<C>) -> Self {
        Nfa {
            states: BTreeSet::from([()]),
            alphabet,
            start: (),
            transitions: BTreeSet::new(),
            accepting: BTreeSet::from([()]),
        }
    }
}

impl<C: Ord + Clone> Nfa<bool, C> {
    /// Accepts the single string `c`. Returns `None` if `c` is not in the alphabet.
    pub fn character(alphabet: BTreeSet<C>, c: C) -> Option<Self> {
        if !alphabet.contains(&c) {
            return None;
        }

        Some(Nfa {
            states: BTreeSet::from([false, true]),
            alphabet,
            start: false,
            transitions: BTreeSet::from([Transition::labeled(false, true, c)]),
            accepting: BTreeSet::from([true]),
        })
    }
}
