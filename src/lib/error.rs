//! Typed errors for fsa-check.
//!
//! Evaluation never fails: out-of-alphabet symbols and undefined transitions
//! are reported through [`Verdict`](crate::automaton::Verdict). Only building
//! an automaton or reading its text form can return an error.

use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The automaton description is inconsistent.
    #[error("Malformed automaton: {0}")]
    Definition(#[from] DefinitionError),

    /// The text form of an automaton could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Construction-time failures of an automaton. Any of these makes the
/// automaton unusable, so it is never built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DefinitionError {
    #[error("no start state was given")]
    MissingStart,

    #[error("start state '{0}' is not a declared state")]
    UnknownStart(String),

    #[error("accepting state '{0}' is not a declared state")]
    UnknownAccepting(String),

    #[error("transition {from} -{symbol}-> {to} uses undeclared state '{state}'")]
    UnknownTransitionState {
        from: String,
        symbol: char,
        to: String,
        state: String,
    },

    #[error("transition from '{from}' uses symbol {symbol:?} outside the alphabet")]
    SymbolNotInAlphabet { from: String, symbol: char },

    #[error("state '{0}' is declared twice")]
    DuplicateState(String),

    /// `{` and `}` are reserved for state sets such as `{P2,P4}`.
    #[error("state name '{0}' contains a brace")]
    ReservedStateName(String),

    /// A deterministic automaton got two different targets for one pair.
    #[error("state '{from}' has two targets on {symbol:?}: '{first}' and '{second}'")]
    ConflictingTransition {
        from: String,
        symbol: char,
        first: String,
        second: String,
    },

    #[error("trap state '{0}' cannot be accepting")]
    AcceptingTrap(String),

    /// The trap state was given an explicit transition to another state.
    #[error("trap state '{trap}' leaves to '{to}' on {symbol:?}")]
    EscapingTrap {
        trap: String,
        symbol: char,
        to: String,
    },
}

/// Failure to read the text form of an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: keyword '{keyword}' given twice")]
    Repeated { line: usize, keyword: &'static str },

    #[error("unknown automaton kind '{0}', expected 'dfa' or 'nfa'")]
    UnknownKind(String),

    #[error("line {line}: deterministic automaton lists {count} targets for one symbol")]
    MultipleTargets { line: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
