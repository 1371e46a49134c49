//! A deterministic recognizer guarded by a symbol pre-filter.
//!
//! The filter rejects empty inputs and inputs using characters outside the
//! alphabet before the automaton runs. The trap state of the automaton would
//! reject such inputs as well, but only the filter can tell "wrong character
//! used" apart from "right characters in the wrong order or length".

use std::fmt::{self, Display};

use serde::Serialize;

use crate::{
    automaton::{Alphabet, Language, Verdict, dfa::DFA},
    trace::{Trace, TraceOutcome},
};

/// Why the filter refused an input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum FilterReason {
    Empty,
    /// The first character outside the alphabet.
    ForeignSymbol { symbol: char, position: usize },
}

impl Display for FilterReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterReason::Empty => write!(f, "empty input"),
            FilterReason::ForeignSymbol { symbol, position } => {
                write!(f, "foreign symbol {:?} at index {}", symbol, position)
            }
        }
    }
}

/// Result of screening one input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Screening {
    /// Rejected by the filter: nothing to check.
    Empty,
    /// Rejected by the filter: the first character outside the alphabet.
    ForeignSymbol { symbol: char, position: usize },
    /// Passed the filter; this is what the automaton decided.
    Evaluated(Verdict),
}

impl Screening {
    /// Folds the screening back into a plain verdict. Anything the filter
    /// refuses is rejected.
    pub fn verdict(&self) -> Verdict {
        match self {
            Screening::Empty | Screening::ForeignSymbol { .. } => Verdict::Rejected,
            Screening::Evaluated(verdict) => verdict.clone(),
        }
    }

    pub fn is_filtered(&self) -> bool {
        !matches!(self, Screening::Evaluated(_))
    }
}

#[derive(Debug, Clone)]
pub struct FilteredValidator {
    automaton: DFA,
}

impl FilteredValidator {
    pub fn new(automaton: DFA) -> Self {
        FilteredValidator { automaton }
    }

    pub fn automaton(&self) -> &DFA {
        &self.automaton
    }

    /// Only the filter: why `input` would be refused before the automaton runs.
    pub fn filter(&self, input: &str) -> Option<FilterReason> {
        if input.is_empty() {
            tracing::debug!("Filter rejected empty input");
            return Some(FilterReason::Empty);
        }

        let (position, symbol) = input
            .chars()
            .enumerate()
            .find(|(_, symbol)| !self.automaton.contains_symbol(*symbol))?;
        tracing::debug!("Filter rejected {:?}: foreign symbol {:?}", input, symbol);
        Some(FilterReason::ForeignSymbol { symbol, position })
    }

    /// Applies the filter, then the automaton.
    pub fn screen(&self, input: &str) -> Screening {
        match self.filter(input) {
            Some(FilterReason::Empty) => Screening::Empty,
            Some(FilterReason::ForeignSymbol { symbol, position }) => {
                Screening::ForeignSymbol { symbol, position }
            }
            None => Screening::Evaluated(self.automaton.evaluate(input)),
        }
    }

    pub fn validate(&self, input: &str) -> bool {
        self.screen(input).verdict().is_accepted()
    }
}

impl Alphabet for FilteredValidator {
    fn alphabet(&self) -> &[char] {
        self.automaton.alphabet()
    }
}

impl Language for FilteredValidator {
    fn evaluate(&self, input: &str) -> Verdict {
        self.screen(input).verdict()
    }

    /// A refused input ends in the start state with a `Filtered` outcome.
    /// Otherwise this is the automaton's own trace.
    fn trace(&self, input: &str) -> Trace {
        match self.filter(input) {
            Some(reason) => {
                let start = self.automaton.state_name(self.automaton.start());
                Trace::new(start).finish(TraceOutcome::Filtered {
                    state: start.to_string(),
                    reason,
                })
            }
            None => self.automaton.trace(input),
        }
    }
}
