/// In this file, we parse textual definitions of automata.
///
/// Each non-empty line is either a keyword line or a transition row. `#`
/// starts a comment. An example definition is as follows:
/// ```text
/// kind dfa
/// states q0 q1 q2
/// alphabet a b
/// start q0
/// accept q2
/// trap q3
/// q0 a -> q1
/// q1 b -> q2
/// ```
///
/// `kind` defaults to `dfa`. A row of a nondeterministic automaton may list
/// several targets, e.g. `P1 A -> P2 P4`. `trap` requests trap completion and
/// may name a state that is not listed under `states`.
use std::path::Path;

use anyhow::Context;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{anychar, space0, space1},
    combinator::{all_consuming, eof, map, verify},
    multi::separated_list1,
    sequence::{preceded, terminated},
};

use crate::{
    automaton::{Automaton, AutomatonKind, builder::AutomatonBuilder},
    error::{Error, ParseError},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRow {
    pub line: usize,
    pub from: String,
    pub symbol: char,
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomatonSpec {
    pub kind: AutomatonKind,
    pub states: Vec<String>,
    pub alphabet: Vec<char>,
    pub start: Option<String>,
    pub accepting: Vec<String>,
    pub trap: Option<String>,
    pub transitions: Vec<TransitionRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    Kind(&'a str),
    States(Vec<&'a str>),
    Alphabet(Vec<char>),
    Start(&'a str),
    Accept(Vec<&'a str>),
    Trap(&'a str),
    Transition {
        from: &'a str,
        symbol: char,
        targets: Vec<&'a str>,
    },
}

fn name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace()).parse(input)
}

fn symbol(input: &str) -> IResult<&str, char> {
    verify(anychar, |c: &char| !c.is_whitespace()).parse(input)
}

fn names(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(space1, name).parse(input)
}

// E.g., states q0 q1 q2
fn keyword_line(input: &str) -> IResult<&str, Line<'_>> {
    all_consuming(terminated(
        alt((
            map(preceded((tag("kind"), space1), name), Line::Kind),
            map(preceded((tag("states"), space1), names), Line::States),
            map(
                preceded(
                    (tag("alphabet"), space1),
                    separated_list1(space1, symbol),
                ),
                Line::Alphabet,
            ),
            map(preceded((tag("start"), space1), name), Line::Start),
            map(preceded((tag("accept"), space1), names), Line::Accept),
            map(terminated(tag("accept"), eof), |_| Line::Accept(vec![])),
            map(preceded((tag("trap"), space1), name), Line::Trap),
        )),
        space0,
    ))
    .parse(input)
}

// E.g., q0 a -> q1 q2
fn transition_line(input: &str) -> IResult<&str, Line<'_>> {
    all_consuming(map(
        (
            name,
            space1,
            symbol,
            space1,
            tag("->"),
            space1,
            names,
            space0,
        ),
        |(from, _, symbol, _, _, _, targets, _)| Line::Transition {
            from,
            symbol,
            targets,
        },
    ))
    .parse(input)
}

fn line(input: &str) -> IResult<&str, Line<'_>> {
    alt((keyword_line, transition_line)).parse(input)
}

fn set_once<T>(
    slot: &mut Option<T>,
    value: T,
    line: usize,
    keyword: &'static str,
) -> Result<(), ParseError> {
    if slot.is_some() {
        return Err(ParseError::Repeated { line, keyword });
    }
    *slot = Some(value);
    Ok(())
}

impl AutomatonSpec {
    pub fn parse(input: &str) -> Result<AutomatonSpec, ParseError> {
        let mut kind = None;
        let mut states = vec![];
        let mut alphabet = vec![];
        let mut start = None;
        let mut accepting = vec![];
        let mut trap = None;
        let mut transitions = vec![];

        for (i, raw) in input.lines().enumerate() {
            let line_no = i + 1;
            let content = raw.split('#').next().unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }

            let (_, parsed) = line(content).map_err(|e| ParseError::Syntax {
                line: line_no,
                message: format!("cannot read '{}': {}", content, e),
            })?;

            match parsed {
                Line::Kind(k) => {
                    let k = match k.to_lowercase().as_str() {
                        "dfa" => AutomatonKind::Deterministic,
                        "nfa" => AutomatonKind::Nondeterministic,
                        _ => return Err(ParseError::UnknownKind(k.to_string())),
                    };
                    set_once(&mut kind, k, line_no, "kind")?;
                }
                Line::States(names) => states.extend(names.into_iter().map(String::from)),
                Line::Alphabet(symbols) => alphabet.extend(symbols),
                Line::Start(name) => set_once(&mut start, name.to_string(), line_no, "start")?,
                Line::Accept(names) => accepting.extend(names.into_iter().map(String::from)),
                Line::Trap(name) => set_once(&mut trap, name.to_string(), line_no, "trap")?,
                Line::Transition {
                    from,
                    symbol,
                    targets,
                } => transitions.push(TransitionRow {
                    line: line_no,
                    from: from.to_string(),
                    symbol,
                    targets: targets.into_iter().map(String::from).collect(),
                }),
            }
        }

        let kind = kind.unwrap_or(AutomatonKind::Deterministic);

        if kind == AutomatonKind::Deterministic
            && let Some(row) = transitions.iter().find(|row| row.targets.len() > 1)
        {
            return Err(ParseError::MultipleTargets {
                line: row.line,
                count: row.targets.len(),
            });
        }

        Ok(AutomatonSpec {
            kind,
            states,
            alphabet,
            start,
            accepting,
            trap,
            transitions,
        })
    }

    pub fn to_builder(&self) -> AutomatonBuilder {
        let mut builder = AutomatonBuilder::new()
            .states(self.states.iter().cloned())
            .symbols(self.alphabet.iter().copied())
            .accepting(self.accepting.iter().cloned());

        if let Some(start) = &self.start {
            builder = builder.start(start.clone());
        }

        if let Some(trap) = &self.trap {
            builder = builder.complete_with_trap(trap.clone());
        }

        for row in &self.transitions {
            for target in &row.targets {
                builder = builder.transition(row.from.clone(), row.symbol, target.clone());
            }
        }

        builder
    }

    pub fn build(&self) -> Result<Automaton, Error> {
        let builder = self.to_builder();
        let automaton: Automaton = match self.kind {
            AutomatonKind::Deterministic => builder.build_deterministic()?.into(),
            AutomatonKind::Nondeterministic => builder.build_nondeterministic()?.into(),
        };

        tracing::info!(
            "Loaded {} with {} states",
            automaton.kind(),
            automaton.state_count()
        );

        Ok(automaton)
    }

    /// Parses and builds the automaton defined in a file.
    pub fn from_file<P: AsRef<Path>>(file_path: P) -> anyhow::Result<Automaton> {
        let file_path = file_path.as_ref();
        let content = std::fs::read_to_string(file_path)
            .with_context(|| format!("failed to read automaton: {}", file_path.display()))?;

        let spec = AutomatonSpec::parse(&content)
            .with_context(|| format!("failed to parse automaton: {}", file_path.display()))?;

        spec.build()
            .with_context(|| format!("failed to build automaton: {}", file_path.display()))
    }
}
