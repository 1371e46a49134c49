use std::fmt::{self, Display};

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::{
    automaton::{
        Alphabet, AutomatonKind, EvaluationFault, Language, Verdict, node::StateNode,
        write_definition,
    },
    trace::{Trace, TraceOutcome},
};

/// A deterministic finite automaton. Every state has at most one outgoing
/// edge per symbol; a missing edge is an undefined transition.
///
/// Instances are only created by
/// [`AutomatonBuilder`](crate::automaton::builder::AutomatonBuilder) or by
/// [`NFA::determinize`](crate::automaton::nfa::NFA::determinize) and are never
/// modified afterwards.
#[derive(Debug, Clone)]
pub struct DFA {
    graph: DiGraph<StateNode, char>,
    start: NodeIndex,
    alphabet: Vec<char>,
    complete: bool,
}

impl DFA {
    pub(crate) fn from_parts(
        graph: DiGraph<StateNode, char>,
        start: NodeIndex,
        alphabet: Vec<char>,
    ) -> Self {
        let mut dfa = DFA {
            graph,
            start,
            alphabet,
            complete: false,
        };
        dfa.complete = dfa.check_complete();
        dfa
    }

    pub fn start(&self) -> NodeIndex {
        self.start
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether every state has a transition for every letter in the alphabet.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn get_node(&self, state: NodeIndex) -> Option<&StateNode> {
        self.graph.node_weight(state)
    }

    pub fn state_name(&self, state: NodeIndex) -> &str {
        &self.graph[state].name
    }

    /// Looks up a state by the name it was declared with.
    pub fn state_index(&self, name: &str) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .find(|node| self.graph[*node].name == name)
    }

    pub fn is_accepting(&self, state: NodeIndex) -> bool {
        self.graph[state].accepting
    }

    pub fn is_trap(&self, state: NodeIndex) -> bool {
        self.graph[state].trap
    }

    pub fn successor(&self, state: NodeIndex, symbol: char) -> Option<NodeIndex> {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .find(|edge| *edge.weight() == symbol)
            .map(|edge| edge.target())
    }

    fn check_complete(&self) -> bool {
        self.graph.node_indices().all(|state| {
            self.alphabet
                .iter()
                .all(|symbol| self.successor(state, *symbol).is_some())
        })
    }

    /// Consumes one symbol from `state`. The position is only used to report
    /// where the run got stuck.
    pub fn step(
        &self,
        state: NodeIndex,
        symbol: char,
        position: usize,
    ) -> Result<NodeIndex, EvaluationFault> {
        if !self.contains_symbol(symbol) {
            return Err(EvaluationFault::OutOfAlphabetSymbol { symbol, position });
        }

        self.successor(state, symbol)
            .ok_or_else(|| EvaluationFault::UndefinedTransition {
                state: self.state_name(state).to_string(),
                symbol,
                position,
            })
    }

    /// Runs the input from the start state, reporting each hop to `on_hop`.
    /// Returns the state the run ended in, or the state it got stuck in
    /// together with the reason.
    fn run(
        &self,
        input: &str,
        mut on_hop: impl FnMut(NodeIndex, char, NodeIndex),
    ) -> Result<NodeIndex, (NodeIndex, EvaluationFault)> {
        let mut current = self.start;

        for (position, symbol) in input.chars().enumerate() {
            let next = self
                .step(current, symbol, position)
                .map_err(|fault| (current, fault))?;
            on_hop(current, symbol, next);
            current = next;
        }

        Ok(current)
    }
}

impl Alphabet for DFA {
    fn alphabet(&self) -> &[char] {
        &self.alphabet
    }
}

impl Language for DFA {
    fn evaluate(&self, input: &str) -> Verdict {
        let verdict = match self.run(input, |_, _, _| {}) {
            Ok(state) => Verdict::from_accepting(self.is_accepting(state)),
            Err((_, fault)) => Verdict::from_fault(fault),
        };

        tracing::debug!("DFA evaluated {:?}: {}", input, verdict);

        verdict
    }

    fn trace(&self, input: &str) -> Trace {
        let mut trace = Trace::new(self.state_name(self.start));

        let outcome = match self.run(input, |from, symbol, to| {
            trace.push(self.state_name(from), symbol, self.state_name(to))
        }) {
            Ok(state) => TraceOutcome::Completed {
                state: self.state_name(state).to_string(),
                accepted: self.is_accepting(state),
            },
            Err((state, fault)) => TraceOutcome::Halted {
                state: self.state_name(state).to_string(),
                fault,
            },
        };

        trace.finish(outcome)
    }
}

impl Display for DFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_definition(
            f,
            AutomatonKind::Deterministic,
            &self.graph,
            self.start,
            &self.alphabet,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::automaton::builder::AutomatonBuilder;

    use super::*;

    #[test]
    fn test_step_reports_stuck_state() {
        let dfa = AutomatonBuilder::new()
            .states(["s", "t"])
            .symbols(['x', 'y'])
            .transition("s", 'x', "t")
            .start("s")
            .accepting(["t"])
            .build_deterministic()
            .unwrap();

        let t = dfa.step(dfa.start(), 'x', 0).unwrap();
        assert_eq!(dfa.state_name(t), "t");

        assert_eq!(
            dfa.step(t, 'x', 1),
            Err(EvaluationFault::UndefinedTransition {
                state: "t".to_string(),
                symbol: 'x',
                position: 1
            })
        );
        assert_eq!(
            dfa.step(t, 'z', 2),
            Err(EvaluationFault::OutOfAlphabetSymbol {
                symbol: 'z',
                position: 2
            })
        );
        assert!(!dfa.is_complete());
    }
}
