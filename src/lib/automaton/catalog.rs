//! The four built-in automata.

use std::{fmt::Display, str::FromStr};

use crate::{
    automaton::{Automaton, Language, builder::AutomatonBuilder, dfa::DFA, nfa::NFA},
    error::DefinitionError,
    validator::FilteredValidator,
};

/// Accepts strings over `{0, 1}` of length at least seven that end in `1`.
///
/// `F0`..`F6` count the first six symbols. From `F6` a `1` accepts and a `0`
/// keeps waiting, which is the same situation as having read exactly six
/// symbols.
pub fn length_at_least_seven_ending_in_one() -> Result<DFA, DefinitionError> {
    let mut builder = AutomatonBuilder::new()
        .states((0..8).map(|i| format!("F{i}")))
        .symbols(['0', '1'])
        .start("F0")
        .accepting(["F7"]);

    for i in 0..6 {
        builder = builder.transitions(format!("F{i}"), ['0', '1'], format!("F{}", i + 1));
    }

    builder
        .transition("F6", '0', "F6")
        .transition("F6", '1', "F7")
        .transition("F7", '0', "F6")
        .transition("F7", '1', "F7")
        .build_deterministic()
}

/// Accepts strings over `{a, b}` with at least two `a`s, no `bb`, ending in
/// `a`. Every `bb` falls into the trap `q6`.
pub fn two_a_no_bb_ending_in_a() -> Result<DFA, DefinitionError> {
    AutomatonBuilder::new()
        .states(["q0", "q1", "q2", "q3", "q4", "q5"])
        .symbols(['a', 'b'])
        .transition("q0", 'a', "q2")
        .transition("q0", 'b', "q1")
        .transition("q1", 'a', "q3")
        .transition("q2", 'a', "q4")
        .transition("q2", 'b', "q5")
        .transition("q3", 'a', "q4")
        .transition("q3", 'b', "q5")
        .transition("q4", 'a', "q4")
        .transition("q4", 'b', "q5")
        .transition("q5", 'a', "q4")
        .start("q0")
        .accepting(["q4"])
        .complete_with_trap("q6")
        .build_deterministic()
}

/// An uppercase letter, then either lowercase letters followed by digits or
/// digits right away. `P1` forks into `P2` (lowercase branch) and `P4`
/// (digit branch) on the leading capital.
pub fn credential() -> Result<NFA, DefinitionError> {
    let upper = || 'A'..='Z';
    let lower = || 'a'..='z';
    let digits = || '0'..='9';

    let mut builder = AutomatonBuilder::new()
        .states(["P1", "P2", "P3", "P4"])
        .symbols(upper().chain(lower()).chain(digits()))
        .start("P1")
        .accepting(["P3"]);

    for target in ["P2", "P4"] {
        builder = builder.transitions("P1", upper(), target);
    }

    builder
        .transitions("P2", lower(), "P2")
        .transitions("P2", digits(), "P3")
        .transitions("P3", digits(), "P3")
        .transitions("P4", digits(), "P3")
        .build_nondeterministic()
}

/// The domain every institutional address has to end with.
pub const EMAIL_SUFFIX: &str = "@uptc.edu.co";

/// Recognizes `<local>@uptc.edu.co` where the local part is a lowercase
/// letter followed by lowercase letters or digits. `q0` and `q1` read the
/// local part, `q2`..`q13` spell out the suffix and `q14` is the trap.
pub fn institutional_email() -> Result<DFA, DefinitionError> {
    let lower = || 'a'..='z';
    let digits = || '0'..='9';

    let mut builder = AutomatonBuilder::new()
        .states((0..14).map(|i| format!("q{i}")))
        .symbols(lower().chain(digits()).chain(['@', '.']))
        .transitions("q0", lower(), "q1")
        .transitions("q1", lower().chain(digits()), "q1")
        .start("q0")
        .accepting(["q13"]);

    for (i, symbol) in EMAIL_SUFFIX.chars().enumerate() {
        builder = builder.transition(format!("q{}", i + 1), symbol, format!("q{}", i + 2));
    }

    builder.complete_with_trap("q14").build_deterministic()
}

/// Names the built-in automata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Catalog {
    Length,
    Pattern,
    Credential,
    Email,
}

impl Catalog {
    pub const ALL: [Catalog; 4] = [
        Catalog::Length,
        Catalog::Pattern,
        Catalog::Credential,
        Catalog::Email,
    ];

    pub fn automaton(self) -> Result<Automaton, DefinitionError> {
        Ok(match self {
            Catalog::Length => length_at_least_seven_ending_in_one()?.into(),
            Catalog::Pattern => two_a_no_bb_ending_in_a()?.into(),
            Catalog::Credential => credential()?.into(),
            Catalog::Email => institutional_email()?.into(),
        })
    }

    /// The recognizer each built-in is meant to be used through. The email
    /// automaton gets its symbol pre-filter, the others are used directly.
    pub fn recognizer(self) -> Result<Box<dyn Language + Send + Sync>, DefinitionError> {
        let recognizer: Box<dyn Language + Send + Sync> = match self {
            Catalog::Email => Box::new(FilteredValidator::new(institutional_email()?)),
            other => Box::new(other.automaton()?),
        };
        Ok(recognizer)
    }

    pub fn description(self) -> &'static str {
        match self {
            Catalog::Length => "strings over {0,1} of length >= 7 ending in 1",
            Catalog::Pattern => "strings over {a,b} with >= 2 a's, no bb, ending in a",
            Catalog::Credential => "capital letter, lowercase letters, then digits",
            Catalog::Email => "lowercase addresses ending in @uptc.edu.co",
        }
    }
}

impl FromStr for Catalog {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "length" => Ok(Catalog::Length),
            "pattern" => Ok(Catalog::Pattern),
            "credential" | "password" => Ok(Catalog::Credential),
            "email" | "mail" => Ok(Catalog::Email),
            _ => Err(format!("Invalid built-in automaton: {}", s)),
        }
    }
}

impl Display for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Catalog::Length => write!(f, "length"),
            Catalog::Pattern => write!(f, "pattern"),
            Catalog::Credential => write!(f, "credential"),
            Catalog::Email => write!(f, "email"),
        }
    }
}
