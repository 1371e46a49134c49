use serde::Serialize;

/// A state of an automaton.
/// It carries the name the state was declared with, a flag indicating whether
/// the state is accepting, and a flag indicating whether the state is a trap
/// state.
///
/// Invariant: A state cannot be both accepting and a trap state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StateNode {
    pub name: String,
    pub accepting: bool,
    /// Whether the state is an absorbing sink that loops on every symbol and
    /// can never reach an accepting state. Only set for trap states the
    /// builder or the powerset construction created or completed.
    pub trap: bool,
}

impl StateNode {
    pub fn new(name: impl Into<String>, accepting: bool, trap: bool) -> Self {
        debug_assert!(
            !(accepting && trap),
            "A state cannot be both accepting and a trap state"
        );
        StateNode {
            name: name.into(),
            accepting,
            trap,
        }
    }

    pub fn accepting(name: impl Into<String>) -> Self {
        StateNode::new(name, true, false)
    }

    pub fn non_accepting(name: impl Into<String>) -> Self {
        StateNode::new(name, false, false)
    }

    pub fn trap(name: impl Into<String>) -> Self {
        StateNode::new(name, false, true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
