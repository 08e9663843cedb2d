//! Rendering automata as graphviz dot graphs.
use crate::dfa::Dfa;
use crate::nfa::Nfa;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Debug, Display};
use std::io;
use std::io::Write;

/// Writes a node for every state, labelled with its `Debug` representation, plus an arrow into
/// the start state if there is one. Returns the node id of every state.
fn output_states<'a, S: Ord + Debug>(
    w: &mut impl Write,
    states: &'a BTreeSet<S>,
    accepting: &BTreeSet<S>,
    start: Option<&S>,
) -> io::Result<BTreeMap<&'a S, usize>> {
    let ids: BTreeMap<&S, usize> = states.iter().zip(0..).collect();

    if start.is_some() {
        writeln!(w, "node[shape=none, label=\"\"] start")?;
    }
    for (state, id) in &ids {
        let shape = if accepting.contains(*state) {
            "doublecircle"
        } else {
            "circle"
        };
        let label = format!("{state:?}").replace('"', "\\\"");
        writeln!(w, "node[label=\"{label}\", shape={shape}] id{id}")?;
        if Some(*state) == start {
            writeln!(w, "start -> id{id}")?;
        }
    }

    Ok(ids)
}

impl<S, C> Nfa<S, C>
where
    S: Ord + Clone + Debug,
    C: Ord + Clone + Display,
{
    /// Writes this automaton to `w` as a dot graph. Epsilon edges are labelled `ε`.
    pub fn output_dot(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "digraph {{")?;

        let ids = output_states(w, &self.states, &self.accepting, Some(&self.start))?;
        for t in &self.transitions {
            let label = match &t.label {
                Some(c) => c.to_string(),
                None => "ε".to_string(),
            };
            writeln!(
                w,
                "id{} -> id{} [label=\"{label}\"]",
                ids[&t.from],
                ids[&t.to]
            )?;
        }

        writeln!(w, "}}")?;

        Ok(())
    }
}

impl<S, C> Dfa<S, C>
where
    S: Ord + Clone + Debug,
    C: Ord + Clone + Display,
{
    /// Writes this automaton to `w` as a dot graph.
    ///
    /// The implicit dead state is not drawn. A DFA without a start state is drawn without a start
    /// arrow.
    pub fn output_dot(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "digraph {{")?;

        let ids = output_states(w, &self.states, &self.accepting, self.start.as_ref())?;

        for (from, edges) in &self.transitions {
            for (c, to) in edges {
                writeln!(w, "id{} -> id{} [label=\"{c}\"]", ids[from], ids[to])?;
            }
        }

        writeln!(w, "}}")?;

        Ok(())
    }
}
