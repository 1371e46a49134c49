use std::fmt::{self, Display};

use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::{
    automaton::{
        Alphabet, AutomatonKind, Language, Verdict, dfa::DFA, node::StateNode, write_definition,
    },
    trace::{Trace, TraceOutcome},
};

/// A nondeterministic finite automaton without epsilon transitions. A state
/// may have any number of outgoing edges per symbol, including none.
#[derive(Debug, Clone)]
pub struct NFA {
    graph: DiGraph<StateNode, char>,
    start: NodeIndex,
    alphabet: Vec<char>,
}

impl NFA {
    pub(crate) fn from_parts(
        graph: DiGraph<StateNode, char>,
        start: NodeIndex,
        alphabet: Vec<char>,
    ) -> Self {
        NFA {
            graph,
            start,
            alphabet,
        }
    }

    pub fn start(&self) -> NodeIndex {
        self.start
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn get_node(&self, state: NodeIndex) -> Option<&StateNode> {
        self.graph.node_weight(state)
    }

    pub fn state_index(&self, name: &str) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .find(|node| self.graph[*node].name == name)
    }

    pub fn is_accepting(&self, state: NodeIndex) -> bool {
        self.graph[state].accepting
    }

    /// Checks if a set of states contains an accepting state.
    pub fn is_accepting_set(&self, states: &[NodeIndex]) -> bool {
        states.iter().any(|&state| self.is_accepting(state))
    }

    /// All targets of `state` on `symbol`. Empty for a dead branch.
    pub fn successors(&self, state: NodeIndex, symbol: char) -> impl Iterator<Item = NodeIndex> {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .filter(move |edge| *edge.weight() == symbol)
            .map(|edge| edge.target())
    }

    /// The union of the successors of every active state. The result is
    /// sorted and duplicate free, so equal sets compare equal.
    pub fn next_states(&self, active: &[NodeIndex], symbol: char) -> Vec<NodeIndex> {
        let mut next = active
            .iter()
            .flat_map(|&state| self.successors(state, symbol))
            .collect_vec();
        next.sort();
        next.dedup();
        next
    }

    /// Renders a set of states as `{a,b}`.
    pub fn set_label(&self, states: &[NodeIndex]) -> String {
        format!(
            "{{{}}}",
            states
                .iter()
                .map(|&state| self.graph[state].name.as_str())
                .join(",")
        )
    }

    /// Runs the input from `{start}`. Stops with the last active set, the
    /// symbol and its position as soon as no state is left. A symbol outside
    /// the alphabet has no edges, so it ends the run the same way.
    fn run(
        &self,
        input: &str,
        mut on_hop: impl FnMut(&[NodeIndex], char, &[NodeIndex]),
    ) -> Result<Vec<NodeIndex>, (Vec<NodeIndex>, char, usize)> {
        let mut active = vec![self.start];

        for (position, symbol) in input.chars().enumerate() {
            let next = self.next_states(&active, symbol);
            if next.is_empty() {
                return Err((active, symbol, position));
            }

            on_hop(&active, symbol, &next);
            active = next;
        }

        Ok(active)
    }

    /// Determinizes the NFA to a complete DFA with the powerset construction.
    /// Each DFA state stands for a set of NFA states and is named by
    /// [`NFA::set_label`]. The empty set becomes an explicit trap state.
    pub fn determinize(&self) -> DFA {
        let mut graph = DiGraph::new();
        let mut state_map = HashMap::new();

        // First we need to create the start state.
        let start_set = vec![self.start];
        let dfa_start = graph.add_node(self.state_from_set(&start_set));
        state_map.insert(start_set.clone(), dfa_start);

        // Second we need an explicit trap state.
        let trap_set = vec![];
        let trap = graph.add_node(StateNode::trap(self.set_label(&trap_set)));
        state_map.insert(trap_set.clone(), trap);

        let mut stack = vec![start_set, trap_set];

        while let Some(set) = stack.pop() {
            for &symbol in &self.alphabet {
                let target_set = self.next_states(&set, symbol);

                let target = match state_map.get(&target_set) {
                    Some(&existing) => existing,
                    None => {
                        let new_state = graph.add_node(self.state_from_set(&target_set));
                        state_map.insert(target_set.clone(), new_state);
                        stack.push(target_set);
                        new_state
                    }
                };

                graph.add_edge(state_map[&set], target, symbol);
            }
        }

        tracing::debug!(
            "Determinized NFA with {} states into DFA with {} states",
            self.state_count(),
            graph.node_count()
        );

        let dfa = DFA::from_parts(graph, dfa_start, self.alphabet.clone());
        debug_assert!(dfa.is_complete());
        dfa
    }

    /// Creates a DFA state from a set of NFA states.
    fn state_from_set(&self, states: &[NodeIndex]) -> StateNode {
        StateNode::new(self.set_label(states), self.is_accepting_set(states), false)
    }
}

impl Alphabet for NFA {
    fn alphabet(&self) -> &[char] {
        &self.alphabet
    }
}

impl Language for NFA {
    fn evaluate(&self, input: &str) -> Verdict {
        let verdict = match self.run(input, |_, _, _| {}) {
            Ok(active) => Verdict::from_accepting(self.is_accepting_set(&active)),
            Err(_) => Verdict::Rejected,
        };

        tracing::debug!("NFA evaluated {:?}: {}", input, verdict);

        verdict
    }

    fn trace(&self, input: &str) -> Trace {
        let mut trace = Trace::new(self.set_label(&[self.start]));

        let outcome = match self.run(input, |from, symbol, to| {
            trace.push(self.set_label(from), symbol, self.set_label(to))
        }) {
            Ok(active) => TraceOutcome::Completed {
                state: self.set_label(&active),
                accepted: self.is_accepting_set(&active),
            },
            Err((active, symbol, position)) => TraceOutcome::DeadBranch {
                state: self.set_label(&active),
                symbol,
                position,
            },
        };

        trace.finish(outcome)
    }
}

impl Display for NFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_definition(
            f,
            AutomatonKind::Nondeterministic,
            &self.graph,
            self.start,
            &self.alphabet,
        )
    }
}
