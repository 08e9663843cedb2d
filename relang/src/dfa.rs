//! Deterministic finite automata with an implicit dead state.
//!
//! The transition function of a [`Dfa`] is partial. Every `(state, symbol)` pair without an
//! entry goes to a dead state, which is never accepting and loops on every symbol. The dead state
//! is not stored in [`Dfa::states`]: wherever a state is threaded through an operation it is an
//! `Option`, and `None` is the dead state.
use crate::fixpoint::fixpoint;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa<S, C> {
    pub states: BTreeSet<S>,
    pub alphabet: BTreeSet<C>,
    /// `None` if the automaton starts in the dead state.
    pub start: Option<S>,
    pub transitions: BTreeMap<S, BTreeMap<C, S>>,
    pub accepting: BTreeSet<S>,
}

/// States of a product of a `Dfa<S, _>` and a `Dfa<T, _>`, see [`Dfa::product`].
pub type ProductState<S, T> = (Option<S>, Option<T>);

impl<S, C> Dfa<S, C>
where
    S: Ord + Clone,
    C: Ord + Clone,
{
    pub fn validate(&self) -> bool {
        self.start.iter().all(|s| self.states.contains(s))
            && self.transitions.iter().all(|(from, edges)| {
                self.states.contains(from)
                    && edges
                        .iter()
                        .all(|(c, to)| self.alphabet.contains(c) && self.states.contains(to))
            })
            && self.accepting.is_subset(&self.states)
    }

    /// Follows the edge labelled `c` out of `state`.
    pub fn transition(&self, state: Option<&S>, c: &C) -> Option<&S> {
        self.transitions.get(state?)?.get(c)
    }

    fn accepts(&self, state: Option<&S>) -> bool {
        state.is_some_and(|s| self.accepting.contains(s))
    }

    /// Returns true if the automaton accepts `input`.
    pub fn parse_string(&self, input: impl IntoIterator<Item = C>) -> bool {
        let end = input
            .into_iter()
            .fold(self.start.as_ref(), |state, c| self.transition(state, &c));
        self.accepts(end)
    }

    /// All states reachable from the start state. Contains `None` if the dead state is reachable.
    pub fn reachable_states(&self) -> BTreeSet<Option<S>> {
        fixpoint(BTreeSet::from([self.start.clone()]), |reached| {
            reached
                .iter()
                .flat_map(|state| {
                    self.alphabet
                        .iter()
                        .map(move |c| self.transition(state.as_ref(), c).cloned())
                })
                .collect()
        })
    }

    /// Returns true if the automaton accepts no string at all.
    pub fn is_empty(&self) -> bool {
        !self
            .reachable_states()
            .iter()
            .any(|state| self.accepts(state.as_ref()))
    }

    /// Returns true if the automaton accepts every string over its alphabet.
    pub fn is_complete(&self) -> bool {
        self.reachable_states()
            .iter()
            .all(|state| self.accepts(state.as_ref()))
    }

    /// Accepts exactly the strings this automaton rejects.
    ///
    /// The dead state becomes the explicit state `None`, and every transition that went to the
    /// dead state implicitly now goes there explicitly. The result has no missing transitions,
    /// so its own dead state is unreachable.
    pub fn complement(&self) -> Dfa<Option<S>, C> {
        let states: BTreeSet<Option<S>> = self
            .states
            .iter()
            .cloned()
            .map(Some)
            .chain([None])
            .collect();

        let transitions = states
            .iter()
            .map(|state| {
                let edges: BTreeMap<C, Option<S>> = self
                    .alphabet
                    .iter()
                    .map(|c| (c.clone(), self.transition(state.as_ref(), c).cloned()))
                    .collect();
                (state.clone(), edges)
            })
            .collect();

        let accepting = states
            .iter()
            .filter(|state| !self.accepts(state.as_ref()))
            .cloned()
            .collect();

        Dfa {
            states,
            alphabet: self.alphabet.clone(),
            start: Some(self.start.clone()),
            transitions,
            accepting,
        }
    }

    /// Runs `self` and `other` side by side. A string is accepted if `combine` returns true for
    /// whether `self` and `other` accept it.
    ///
    /// All pairs of states are created, including pairs with either dead state, whether they are
    /// reachable or not. Returns `None` if the alphabets differ.
    pub fn product<T: Ord + Clone>(
        &self,
        other: &Dfa<T, C>,
        combine: impl Fn(bool, bool) -> bool,
    ) -> Option<Dfa<ProductState<S, T>, C>> {
        if self.alphabet != other.alphabet {
            return None;
        }

        let left: Vec<Option<S>> = self
            .states
            .iter()
            .cloned()
            .map(Some)
            .chain([None])
            .collect();
        let right: Vec<Option<T>> = other
            .states
            .iter()
            .cloned()
            .map(Some)
            .chain([None])
            .collect();

        let states: BTreeSet<ProductState<S, T>> = left
            .iter()
            .flat_map(|l| right.iter().map(move |r| (l.clone(), r.clone())))
            .collect();

        let transitions = states
            .iter()
            .map(|(l, r)| {
                let edges: BTreeMap<C, ProductState<S, T>> = self
                    .alphabet
                    .iter()
                    .map(|c| {
                        let target = (
                            self.transition(l.as_ref(), c).cloned(),
                            other.transition(r.as_ref(), c).cloned(),
                        );
                        (c.clone(), target)
                    })
                    .collect();
                ((l.clone(), r.clone()), edges)
            })
            .collect();

        let accepting = states
            .iter()
            .filter(|(l, r)| combine(self.accepts(l.as_ref()), other.accepts(r.as_ref())))
            .cloned()
            .collect();

        log::debug!(
            "product of automata with {} and {} states has {} states",
            self.states.len(),
            other.states.len(),
            states.len()
        );

        Some(Dfa {
            states,
            alphabet: self.alphabet.clone(),
            start: Some((self.start.clone(), other.start.clone())),
            transitions,
            accepting,
        })
    }

    /// Accepts the strings accepted by `self` or by `other`.
    pub fn union<T: Ord + Clone>(&self, other: &Dfa<T, C>) -> Option<Dfa<ProductState<S, T>, C>> {
        self.product(other, |a, b| a || b)
    }

    /// Accepts the strings accepted by both `self` and `other`.
    pub fn intersection<T: Ord + Clone>(
        &self,
        other: &Dfa<T, C>,
    ) -> Option<Dfa<ProductState<S, T>, C>> {
        self.product(other, |a, b| a && b)
    }

    /// Accepts the strings accepted by `self` but not by `other`.
    pub fn difference<T: Ord + Clone>(
        &self,
        other: &Dfa<T, C>,
    ) -> Option<Dfa<ProductState<S, T>, C>> {
        self.product(other, |a, b| a && !b)
    }

    /// Accepts the strings accepted by exactly one of `self` and `other`.
    pub fn symdiff<T: Ord + Clone>(
        &self,
        other: &Dfa<T, C>,
    ) -> Option<Dfa<ProductState<S, T>, C>> {
        self.product(other, |a, b| a != b)
    }

    /// Returns whether `self` and `other` accept the same language, or `None` if their alphabets
    /// differ.
    pub fn equal<T: Ord + Clone>(&self, other: &Dfa<T, C>) -> Option<bool> {
        self.symdiff(other).map(|difference| difference.is_empty())
    }

    /// Drops all unreachable states and numbers the remaining states `1..=n`, in order.
    ///
    /// Expects a valid automaton: every edge must be labelled with a symbol of the alphabet.
    pub fn relabel_states(&self) -> Dfa<usize, C> {
        let reachable = self.reachable_states();
        let mapping: BTreeMap<&S, usize> = reachable.iter().flatten().zip(1..).collect();

        let transitions = mapping
            .iter()
            .filter_map(|(&state, &id)| {
                let edges: BTreeMap<C, usize> = self
                    .transitions
                    .get(state)?
                    .iter()
                    .map(|(c, target)| (c.clone(), mapping[target]))
                    .collect();
                Some((id, edges))
            })
            .collect();

        Dfa {
            states: mapping.values().copied().collect(),
            alphabet: self.alphabet.clone(),
            start: self.start.as_ref().map(|s| mapping[s]),
            transitions,
            accepting: self
                .accepting
                .iter()
                .filter_map(|s| mapping.get(s).copied())
                .collect(),
        }
    }
}

impl<C: Ord + Clone> Dfa<(), C> {
    /// Accepts nothing. Has no states: it starts, and stays, in the dead state.
    pub fn empty(alphabet: BTreeSet<C>) -> Self {
        Dfa {
            states: BTreeSet::new(),
            alphabet,
            start: None,
            transitions: BTreeMap::new(),
            accepting: BTreeSet::new(),
        }
    }

    /// Accepts every string over `alphabet`.
    pub fn complete(alphabet: BTreeSet<C>) -> Self {
        let loops = alphabet.iter().map(|c| (c.clone(), ())).collect();
        Dfa {
            states: BTreeSet::from([()]),
            alphabet,
            start: Some(()),
            transitions: BTreeMap::from([((), loops)]),
            accepting: BTreeSet::from([()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Dfa;
    use std::collections::{BTreeMap, BTreeSet};

    fn ab() -> BTreeSet<char> {
        BTreeSet::from(['a', 'b'])
    }

    fn strings(alphabet: &BTreeSet<char>, max_len: usize) -> Vec<String> {
        let mut all = vec![String::new()];
        let mut last = vec![String::new()];
        for _ in 0..max_len {
            last = last
                .iter()
                .flat_map(|s| alphabet.iter().map(move |c| format!("{s}{c}")))
                .collect();
            all.extend(last.iter().cloned());
        }
        all
    }

    // a*b, partial: a `b` after the `b` goes to the dead state, as does an `a`
    fn a_star_b() -> Dfa<u8, char> {
        Dfa {
            states: BTreeSet::from([0, 1, 5]),
            alphabet: ab(),
            start: Some(0),
            transitions: BTreeMap::from([
                (0, BTreeMap::from([('a', 0), ('b', 1)])),
                (5, BTreeMap::from([('a', 1)])),
            ]),
            accepting: BTreeSet::from([1]),
        }
    }

    // an even number of a's, complete
    fn even_a() -> Dfa<bool, char> {
        Dfa {
            states: BTreeSet::from([false, true]),
            alphabet: ab(),
            start: Some(false),
            transitions: BTreeMap::from([
                (false, BTreeMap::from([('a', true), ('b', false)])),
                (true, BTreeMap::from([('a', false), ('b', true)])),
            ]),
            accepting: BTreeSet::from([false]),
        }
    }

    #[test]
    fn validate() {
        assert!(a_star_b().validate());
        assert!(even_a().validate());
        assert!(Dfa::empty(ab()).validate());
        assert!(Dfa::complete(ab()).validate());

        let mut bad_target = a_star_b();
        bad_target.transitions.insert(1, BTreeMap::from([('a', 3)]));
        assert!(!bad_target.validate());

        let mut bad_label = a_star_b();
        bad_label.transitions.insert(1, BTreeMap::from([('c', 0)]));
        assert!(!bad_label.validate());

        let mut bad_source = a_star_b();
        bad_source.transitions.insert(4, BTreeMap::from([('a', 0)]));
        assert!(!bad_source.validate());

        let mut bad_accepting = a_star_b();
        bad_accepting.accepting.insert(4);
        assert!(!bad_accepting.validate());

        let mut bad_start = a_star_b();
        bad_start.start = Some(4);
        assert!(!bad_start.validate());
    }

    #[test]
    fn parse_string() {
        let dfa = a_star_b();
        assert!(dfa.parse_string("b".chars()));
        assert!(dfa.parse_string("aaab".chars()));
        assert!(!dfa.parse_string("".chars()));
        assert!(!dfa.parse_string("aa".chars()));
        // the dead state is never left again
        assert!(!dfa.parse_string("bb".chars()));
        assert!(!dfa.parse_string("bab".chars()));
    }

    #[test]
    fn reachable_states() {
        assert_eq!(
            a_star_b().reachable_states(),
            BTreeSet::from([Some(0), Some(1), None])
        );
        assert_eq!(
            even_a().reachable_states(),
            BTreeSet::from([Some(false), Some(true)])
        );
        assert_eq!(Dfa::empty(ab()).reachable_states(), BTreeSet::from([None]));
    }

    #[test]
    fn empty_and_complete() {
        let empty = Dfa::empty(ab());
        assert!(empty.is_empty());
        assert!(!empty.is_complete());

        let complete = Dfa::complete(ab());
        assert!(complete.is_complete());
        assert!(!complete.is_empty());

        for s in strings(&ab(), 4) {
            assert!(!empty.parse_string(s.chars()));
            assert!(complete.parse_string(s.chars()));
        }

        // also holds without any symbols
        assert!(Dfa::<(), char>::empty(BTreeSet::new()).is_empty());
        assert!(Dfa::<(), char>::complete(BTreeSet::new()).is_complete());
    }

    #[test]
    fn is_empty_ignores_unreachable_states() {
        let mut dfa = a_star_b();
        dfa.accepting = BTreeSet::from([5]);
        assert!(dfa.is_empty());
    }

    fn assert_complements<S: Ord + Clone>(dfa: &Dfa<S, char>) {
        let complement = dfa.complement();
        assert!(complement.validate());
        for s in strings(&ab(), 5) {
            assert_ne!(
                dfa.parse_string(s.chars()),
                complement.parse_string(s.chars()),
                "{s}"
            );
        }
    }

    #[test]
    fn complement() {
        assert_complements(&a_star_b());
        assert_complements(&even_a());
        assert_complements(&a_star_b().complement());
        assert_complements(&Dfa::empty(ab()));

        assert!(Dfa::empty(ab()).complement().is_complete());
        assert!(Dfa::complete(ab()).complement().is_empty());
        assert!(even_a().complement().complement().equal(&even_a()).unwrap());
    }

    #[test]
    fn product() {
        let a_star_b = a_star_b();
        let even_a = even_a();

        let union = a_star_b.union(&even_a).unwrap();
        let intersection = a_star_b.intersection(&even_a).unwrap();
        let difference = a_star_b.difference(&even_a).unwrap();
        let symdiff = a_star_b.symdiff(&even_a).unwrap();

        // 4 states of the left and 3 of the right, counting the dead states
        assert_eq!(union.states.len(), 12);
        for dfa in [&union, &intersection, &difference, &symdiff] {
            assert!(dfa.validate());
        }

        for s in strings(&ab(), 6) {
            let l = a_star_b.parse_string(s.chars());
            let r = even_a.parse_string(s.chars());
            assert_eq!(union.parse_string(s.chars()), l || r, "{s}");
            assert_eq!(intersection.parse_string(s.chars()), l && r, "{s}");
            assert_eq!(difference.parse_string(s.chars()), l && !r, "{s}");
            assert_eq!(symdiff.parse_string(s.chars()), l != r, "{s}");
        }
    }

    #[test]
    fn product_with_dead_states() {
        // both automata are in the dead state, but the combination accepts
        let neither = Dfa::empty(ab())
            .product(&Dfa::empty(ab()), |a, b| !a && !b)
            .unwrap();
        assert!(neither.is_complete());
    }

    #[test]
    fn product_alphabet_mismatch() {
        let other = Dfa::complete(BTreeSet::from(['a']));
        assert_eq!(a_star_b().union(&other), None);
        assert_eq!(a_star_b().symdiff(&other), None);
        assert_eq!(a_star_b().equal(&other), None);
    }

    #[test]
    fn equal() {
        assert_eq!(a_star_b().equal(&a_star_b()), Some(true));
        assert_eq!(even_a().equal(&even_a()), Some(true));
        assert_eq!(a_star_b().equal(&even_a()), Some(false));
        assert_eq!(even_a().equal(&a_star_b()), Some(false));
        assert_eq!(Dfa::empty(ab()).equal(&Dfa::complete(ab())), Some(false));

        // an accepting state nobody can reach changes nothing
        let mut unreachable = a_star_b();
        unreachable.accepting.insert(5);
        assert_eq!(unreachable.equal(&a_star_b()), Some(true));
    }

    #[test]
    fn relabel_states() {
        let dfa = a_star_b();
        let relabeled = dfa.relabel_states();

        assert!(relabeled.validate());
        assert_eq!(relabeled.states, BTreeSet::from([1, 2]));
        assert_eq!(relabeled.start, Some(1));
        assert_eq!(relabeled.accepting, BTreeSet::from([2]));
        for s in strings(&ab(), 5) {
            assert_eq!(
                dfa.parse_string(s.chars()),
                relabeled.parse_string(s.chars()),
                "{s}"
            );
        }

        let empty = Dfa::empty(ab()).relabel_states();
        assert!(empty.states.is_empty());
        assert_eq!(empty.start, None);
    }
}
