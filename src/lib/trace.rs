//! Step-by-step records of one evaluation.

use std::fmt::{self, Display};

use serde::Serialize;

use crate::{
    automaton::{EvaluationFault, Verdict},
    validator::FilterReason,
};

/// One consumed symbol. For nondeterministic automata `from` and `to` name
/// sets of active states, e.g. `{P2,P4}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Hop {
    pub from: String,
    pub symbol: char,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TraceOutcome {
    /// The whole input was consumed.
    Completed { state: String, accepted: bool },
    /// A nondeterministic run lost every active state. A symbol outside the
    /// alphabet always ends here.
    DeadBranch {
        state: String,
        symbol: char,
        position: usize,
    },
    /// The run stopped at `state` and could not proceed.
    Halted {
        state: String,
        fault: EvaluationFault,
    },
    /// A pre-filter refused the input before the automaton left `state`.
    Filtered { state: String, reason: FilterReason },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Trace {
    pub start: String,
    pub hops: Vec<Hop>,
    pub outcome: TraceOutcome,
}

impl Trace {
    pub fn new(start: impl Into<String>) -> Self {
        let start = start.into();
        Trace {
            outcome: TraceOutcome::Completed {
                state: start.clone(),
                accepted: false,
            },
            start,
            hops: vec![],
        }
    }

    pub fn push(&mut self, from: impl Into<String>, symbol: char, to: impl Into<String>) {
        self.hops.push(Hop {
            from: from.into(),
            symbol,
            to: to.into(),
        });
    }

    pub fn finish(mut self, outcome: TraceOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// The verdict this trace stands for. Always equal to what `evaluate`
    /// returns for the same automaton and input.
    pub fn verdict(&self) -> Verdict {
        match &self.outcome {
            TraceOutcome::Completed { accepted, .. } => Verdict::from_accepting(*accepted),
            TraceOutcome::DeadBranch { .. } => Verdict::Rejected,
            TraceOutcome::Halted { fault, .. } => Verdict::from_fault(fault.clone()),
            TraceOutcome::Filtered { .. } => Verdict::Rejected,
        }
    }

    /// Whether the run stopped early because it could not proceed.
    pub fn is_halted(&self) -> bool {
        matches!(self.outcome, TraceOutcome::Halted { .. })
    }

    /// The state (or state set) the run ended in.
    pub fn final_state(&self) -> &str {
        match &self.outcome {
            TraceOutcome::Completed { state, .. }
            | TraceOutcome::DeadBranch { state, .. }
            | TraceOutcome::Halted { state, .. }
            | TraceOutcome::Filtered { state, .. } => state,
        }
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }
}

impl Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Start: {}", self.start)?;
        for hop in &self.hops {
            writeln!(f, "{} -{}-> {}", hop.from, hop.symbol, hop.to)?;
        }

        match &self.outcome {
            TraceOutcome::Completed { state, accepted } => write!(
                f,
                "Final: {} {}",
                state,
                Verdict::from_accepting(*accepted)
            ),
            TraceOutcome::DeadBranch {
                state,
                symbol,
                position,
            } => write!(
                f,
                "Final: {} REJECTED (no active state after {:?} at index {})",
                state, symbol, position
            ),
            TraceOutcome::Halted { state, fault } => {
                let status = match Verdict::from_fault(fault.clone()) {
                    Verdict::Malformed(_) => "INVALID".to_string(),
                    verdict => verdict.to_string(),
                };
                write!(f, "Halted: {} {} ({})", state, status, fault)
            }
            TraceOutcome::Filtered { state, reason } => {
                write!(f, "Filtered: {} REJECTED ({})", state, reason)
            }
        }
    }
}
