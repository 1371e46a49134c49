//! Declarative construction of automata.
//!
//! An automaton is described as a table of states, symbols, transition rows,
//! a start state and accepting states. All consistency checks happen in
//! [`AutomatonBuilder::build_deterministic`] and
//! [`AutomatonBuilder::build_nondeterministic`]; an automaton that passes them
//! can be evaluated without further checks.

use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::{
    automaton::{dfa::DFA, nfa::NFA, node::StateNode},
    error::DefinitionError,
};

#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    states: Vec<String>,
    alphabet: Vec<char>,
    rows: Vec<(String, char, String)>,
    start: Option<String>,
    accepting: Vec<String>,
    trap: Option<String>,
}

/// Braces are kept for the state-set names of determinized automata.
fn check_name(name: &str) -> Result<(), DefinitionError> {
    if name.contains(['{', '}']) {
        return Err(DefinitionError::ReservedStateName(name.to_string()));
    }
    Ok(())
}

/// The checked pieces both automaton shapes are made of.
struct Parts {
    graph: DiGraph<StateNode, char>,
    start: NodeIndex,
    alphabet: Vec<char>,
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(mut self, name: impl Into<String>) -> Self {
        self.states.push(name.into());
        self
    }

    pub fn states<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.states.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn symbols(mut self, symbols: impl IntoIterator<Item = char>) -> Self {
        self.alphabet.extend(symbols);
        self
    }

    pub fn transition(mut self, from: impl Into<String>, symbol: char, to: impl Into<String>) -> Self {
        self.rows.push((from.into(), symbol, to.into()));
        self
    }

    /// Adds one row per symbol, all from `from` to `to`. Handy for character
    /// classes such as `a..=z`.
    pub fn transitions(
        mut self,
        from: impl Into<String>,
        symbols: impl IntoIterator<Item = char>,
        to: impl Into<String>,
    ) -> Self {
        let from = from.into();
        let to = to.into();
        for symbol in symbols {
            self.rows.push((from.clone(), symbol, to.clone()));
        }
        self
    }

    pub fn start(mut self, name: impl Into<String>) -> Self {
        self.start = Some(name.into());
        self
    }

    pub fn accepting<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.accepting.extend(names.into_iter().map(Into::into));
        self
    }

    /// Redirects every (state, symbol) pair without an explicit row to `trap`.
    /// The trap loops on every symbol and is never accepting. It is declared
    /// automatically if it is not already one of the states.
    pub fn complete_with_trap(mut self, trap: impl Into<String>) -> Self {
        self.trap = Some(trap.into());
        self
    }

    /// Builds a DFA. Fails if any (state, symbol) pair has two different
    /// targets.
    pub fn build_deterministic(&self) -> Result<DFA, DefinitionError> {
        let parts = self.build_parts(true)?;
        let dfa = DFA::from_parts(parts.graph, parts.start, parts.alphabet);

        tracing::debug!(
            "Built DFA with {} states and {} transitions (complete: {})",
            dfa.state_count(),
            dfa.edge_count(),
            dfa.is_complete()
        );

        Ok(dfa)
    }

    pub fn build_nondeterministic(&self) -> Result<NFA, DefinitionError> {
        let parts = self.build_parts(false)?;
        let nfa = NFA::from_parts(parts.graph, parts.start, parts.alphabet);

        tracing::debug!("Built NFA with {} states", nfa.state_count());

        Ok(nfa)
    }

    fn build_parts(&self, deterministic: bool) -> Result<Parts, DefinitionError> {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();

        for name in &self.states {
            check_name(name)?;
            if index.contains_key(name.as_str()) {
                return Err(DefinitionError::DuplicateState(name.clone()));
            }
            let accepting = self.accepting.contains(name);
            index.insert(
                name.as_str(),
                graph.add_node(StateNode::new(name.clone(), accepting, false)),
            );
        }

        let start = self.start.as_ref().ok_or(DefinitionError::MissingStart)?;
        let start = *index
            .get(start.as_str())
            .ok_or_else(|| DefinitionError::UnknownStart(start.clone()))?;

        if let Some(name) = self
            .accepting
            .iter()
            .find(|name| !index.contains_key(name.as_str()))
        {
            return Err(DefinitionError::UnknownAccepting(name.clone()));
        }

        let alphabet = self.alphabet.iter().copied().sorted().dedup().collect_vec();

        let trap = match &self.trap {
            Some(name) if self.accepting.contains(name) => {
                return Err(DefinitionError::AcceptingTrap(name.clone()));
            }
            Some(name) => Some(match index.get(name.as_str()) {
                Some(&node) => node,
                None => {
                    check_name(name)?;
                    let node = graph.add_node(StateNode::trap(name.clone()));
                    index.insert(name.as_str(), node);
                    node
                }
            }),
            None => None,
        };

        for (from, symbol, to) in &self.rows {
            let lookup = |state: &String| {
                index.get(state.as_str()).copied().ok_or_else(|| {
                    DefinitionError::UnknownTransitionState {
                        from: from.clone(),
                        symbol: *symbol,
                        to: to.clone(),
                        state: state.clone(),
                    }
                })
            };
            let source = lookup(from)?;
            let target = lookup(to)?;

            if alphabet.binary_search(symbol).is_err() {
                return Err(DefinitionError::SymbolNotInAlphabet {
                    from: from.clone(),
                    symbol: *symbol,
                });
            }

            if trap == Some(source) && target != source {
                return Err(DefinitionError::EscapingTrap {
                    trap: from.clone(),
                    symbol: *symbol,
                    to: to.clone(),
                });
            }

            let mut existing = graph
                .edges_directed(source, Direction::Outgoing)
                .filter(|edge| edge.weight() == symbol)
                .map(|edge| edge.target());

            if deterministic {
                if let Some(first) = existing.next() {
                    if first != target {
                        return Err(DefinitionError::ConflictingTransition {
                            from: from.clone(),
                            symbol: *symbol,
                            first: graph[first].name.clone(),
                            second: to.clone(),
                        });
                    }
                    continue;
                }
            } else if existing.any(|existing| existing == target) {
                continue;
            }

            graph.add_edge(source, target, *symbol);
        }

        if let Some(trap) = trap {
            complete_with_trap(&mut graph, &alphabet, trap);
        }

        Ok(Parts {
            graph,
            start,
            alphabet,
        })
    }
}

/// Adds an edge to `trap` for every (state, symbol) pair that has no edge yet,
/// including the trap's own self loops. Returns the number of edges added.
pub(crate) fn complete_with_trap(
    graph: &mut DiGraph<StateNode, char>,
    alphabet: &[char],
    trap: NodeIndex,
) -> usize {
    let mut missing = Vec::new();

    for state in graph.node_indices() {
        for &symbol in alphabet {
            let defined = graph
                .edges_directed(state, Direction::Outgoing)
                .any(|edge| *edge.weight() == symbol);

            if !defined {
                missing.push((state, symbol));
            }
        }
    }

    for &(state, symbol) in &missing {
        graph.add_edge(state, trap, symbol);
    }

    graph[trap].trap = true;
    graph[trap].accepting = false;

    tracing::debug!(
        "Completed automaton with trap state {}: {} transitions added",
        graph[trap].name,
        missing.len()
    );

    missing.len()
}
