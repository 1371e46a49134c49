use std::fmt::{self, Display};

use itertools::Itertools;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};
use serde::Serialize;

use crate::{
    automaton::{dfa::DFA, nfa::NFA, node::StateNode},
    trace::Trace,
};

pub mod builder;
pub mod catalog;
pub mod dfa;
pub mod nfa;
pub mod node;
pub mod spec;

/// A finite set of symbols. Implementers keep the alphabet sorted and free of
/// duplicates.
pub trait Alphabet {
    fn alphabet(&self) -> &[char];

    /// Checks whether `symbol` was declared as part of the alphabet.
    fn contains_symbol(&self, symbol: char) -> bool {
        self.alphabet().binary_search(&symbol).is_ok()
    }
}

/// The basic trait for anything that decides membership of strings over a
/// set alphabet.
///
/// Evaluation never fails. A symbol outside the alphabet rejects the input,
/// a missing transition classifies it as [`Verdict::Malformed`].
pub trait Language: Alphabet {
    /// Runs the whole input and classifies it.
    fn evaluate(&self, input: &str) -> Verdict;

    /// Runs the input like [`Language::evaluate`] and records every hop.
    fn trace(&self, input: &str) -> Trace;

    fn accepts(&self, input: &str) -> bool {
        self.evaluate(input).is_accepted()
    }
}

/// The reason a run stopped before the input was consumed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum EvaluationFault {
    /// No transition leaves `state` on `symbol`.
    UndefinedTransition {
        state: String,
        symbol: char,
        position: usize,
    },
    /// `symbol` was never declared in the alphabet.
    OutOfAlphabetSymbol { symbol: char, position: usize },
}

impl EvaluationFault {
    /// Index of the offending symbol in the input, counted in chars.
    pub fn position(&self) -> usize {
        match self {
            EvaluationFault::UndefinedTransition { position, .. }
            | EvaluationFault::OutOfAlphabetSymbol { position, .. } => *position,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            EvaluationFault::UndefinedTransition { symbol, .. }
            | EvaluationFault::OutOfAlphabetSymbol { symbol, .. } => *symbol,
        }
    }
}

impl Display for EvaluationFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationFault::UndefinedTransition {
                state,
                symbol,
                position,
            } => write!(
                f,
                "no transition from {} on {:?} at index {}",
                state, symbol, position
            ),
            EvaluationFault::OutOfAlphabetSymbol { symbol, position } => {
                write!(f, "symbol {:?} at index {} is not in the alphabet", symbol, position)
            }
        }
    }
}

/// Outcome of evaluating one string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Verdict {
    Accepted,
    /// The run was well-formed but did not end in an accepting state.
    Rejected,
    /// The run got stuck on a missing transition. Never counts as accepted.
    Malformed(EvaluationFault),
}

impl Verdict {
    pub fn from_accepting(accepting: bool) -> Self {
        if accepting {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        }
    }

    /// Classifies a run that stopped early. A foreign symbol can never lead to
    /// acceptance, so it is a plain rejection.
    pub fn from_fault(fault: EvaluationFault) -> Self {
        match fault {
            EvaluationFault::OutOfAlphabetSymbol { .. } => Verdict::Rejected,
            fault @ EvaluationFault::UndefinedTransition { .. } => Verdict::Malformed(fault),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Verdict::Malformed(_))
    }

    pub fn fault(&self) -> Option<&EvaluationFault> {
        match self {
            Verdict::Malformed(fault) => Some(fault),
            _ => None,
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accepted => write!(f, "ACCEPTED"),
            Verdict::Rejected => write!(f, "REJECTED"),
            Verdict::Malformed(_) => write!(f, "MALFORMED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AutomatonKind {
    Deterministic,
    Nondeterministic,
}

impl Display for AutomatonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutomatonKind::Deterministic => write!(f, "DFA"),
            AutomatonKind::Nondeterministic => write!(f, "NFA"),
        }
    }
}

/// Either shape of automaton behind one evaluation interface.
#[derive(Debug, Clone)]
pub enum Automaton {
    Deterministic(DFA),
    Nondeterministic(NFA),
}

impl Automaton {
    pub fn kind(&self) -> AutomatonKind {
        match self {
            Automaton::Deterministic(_) => AutomatonKind::Deterministic,
            Automaton::Nondeterministic(_) => AutomatonKind::Nondeterministic,
        }
    }

    pub fn state_count(&self) -> usize {
        match self {
            Automaton::Deterministic(dfa) => dfa.state_count(),
            Automaton::Nondeterministic(nfa) => nfa.state_count(),
        }
    }

    pub fn as_dfa(&self) -> Option<&DFA> {
        match self {
            Automaton::Deterministic(dfa) => Some(dfa),
            Automaton::Nondeterministic(_) => None,
        }
    }

    pub fn as_nfa(&self) -> Option<&NFA> {
        match self {
            Automaton::Deterministic(_) => None,
            Automaton::Nondeterministic(nfa) => Some(nfa),
        }
    }
}

impl From<DFA> for Automaton {
    fn from(value: DFA) -> Self {
        Automaton::Deterministic(value)
    }
}

impl From<NFA> for Automaton {
    fn from(value: NFA) -> Self {
        Automaton::Nondeterministic(value)
    }
}

impl Alphabet for Automaton {
    fn alphabet(&self) -> &[char] {
        match self {
            Automaton::Deterministic(dfa) => dfa.alphabet(),
            Automaton::Nondeterministic(nfa) => nfa.alphabet(),
        }
    }
}

impl Language for Automaton {
    fn evaluate(&self, input: &str) -> Verdict {
        match self {
            Automaton::Deterministic(dfa) => dfa.evaluate(input),
            Automaton::Nondeterministic(nfa) => nfa.evaluate(input),
        }
    }

    fn trace(&self, input: &str) -> Trace {
        match self {
            Automaton::Deterministic(dfa) => dfa.trace(input),
            Automaton::Nondeterministic(nfa) => nfa.trace(input),
        }
    }
}

impl Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Automaton::Deterministic(dfa) => dfa.fmt(f),
            Automaton::Nondeterministic(nfa) => nfa.fmt(f),
        }
    }
}

/// Writes the formal 5-tuple of an automaton, one transition row per line.
/// Rows sharing a source state and symbol are merged into one target set.
pub(crate) fn write_definition(
    f: &mut fmt::Formatter<'_>,
    kind: AutomatonKind,
    graph: &DiGraph<StateNode, char>,
    start: NodeIndex,
    alphabet: &[char],
) -> fmt::Result {
    writeln!(f, "{} A = (Q, Σ, δ, q0, F)", kind)?;
    writeln!(f, "Q = {{{}}}", join_names(graph, graph.node_indices()))?;
    writeln!(f, "Σ = {{{}}}", alphabet.iter().join(", "))?;
    writeln!(f, "q0 = {}", graph[start].name)?;
    writeln!(
        f,
        "F = {{{}}}",
        join_names(
            graph,
            graph.node_indices().filter(|node| graph[*node].accepting)
        )
    )?;
    writeln!(f, "δ:")?;

    for node in graph.node_indices() {
        let rows = graph
            .edges(node)
            .map(|edge| (*edge.weight(), edge.target()))
            .sorted()
            .chunk_by(|(symbol, _)| *symbol);

        for (symbol, targets) in &rows {
            let targets = targets.map(|(_, target)| target).collect_vec();
            let rendered = match kind {
                AutomatonKind::Deterministic => join_names(graph, targets.into_iter()),
                AutomatonKind::Nondeterministic => {
                    format!("{{{}}}", join_names(graph, targets.into_iter()))
                }
            };
            writeln!(f, "  {} -{}-> {}", graph[node].name, symbol, rendered)?;
        }
    }

    Ok(())
}

fn join_names(graph: &DiGraph<StateNode, char>, nodes: impl Iterator<Item = NodeIndex>) -> String {
    nodes.map(|node| graph[node].name.as_str()).join(", ")
}
