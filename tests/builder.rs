use fsa_check::{
    automaton::{Alphabet, Language, builder::AutomatonBuilder},
    error::DefinitionError,
};

fn base() -> AutomatonBuilder {
    AutomatonBuilder::new()
        .states(["q0", "q1"])
        .symbols(['a', 'b'])
        .transition("q0", 'a', "q1")
        .start("q0")
        .accepting(["q1"])
}

#[test]
fn test_missing_start() {
    let err = AutomatonBuilder::new()
        .states(["q0"])
        .symbols(['a'])
        .build_deterministic()
        .unwrap_err();
    assert_eq!(err, DefinitionError::MissingStart);
}

#[test]
fn test_unknown_start() {
    let err = base().start("q9").build_deterministic().unwrap_err();
    assert_eq!(err, DefinitionError::UnknownStart("q9".to_string()));

    let err = AutomatonBuilder::new()
        .states(["q0"])
        .symbols(['a'])
        .start("q9")
        .build_nondeterministic()
        .unwrap_err();
    assert_eq!(err, DefinitionError::UnknownStart("q9".to_string()));
}

#[test]
fn test_unknown_accepting() {
    let err = base().accepting(["q7"]).build_deterministic().unwrap_err();
    assert_eq!(err, DefinitionError::UnknownAccepting("q7".to_string()));
}

#[test]
fn test_unknown_transition_state() {
    let err = base()
        .transition("q1", 'b', "q5")
        .build_deterministic()
        .unwrap_err();
    assert_eq!(
        err,
        DefinitionError::UnknownTransitionState {
            from: "q1".to_string(),
            symbol: 'b',
            to: "q5".to_string(),
            state: "q5".to_string(),
        }
    );
}

#[test]
fn test_symbol_not_in_alphabet() {
    let err = base()
        .transition("q1", 'c', "q0")
        .build_nondeterministic()
        .unwrap_err();
    assert_eq!(
        err,
        DefinitionError::SymbolNotInAlphabet {
            from: "q1".to_string(),
            symbol: 'c'
        }
    );
}

#[test]
fn test_duplicate_state() {
    let err = base().state("q1").build_deterministic().unwrap_err();
    assert_eq!(err, DefinitionError::DuplicateState("q1".to_string()));
}

#[test]
fn test_braces_are_reserved() {
    let err = base().state("{}").build_deterministic().unwrap_err();
    assert_eq!(err, DefinitionError::ReservedStateName("{}".to_string()));

    let err = base()
        .complete_with_trap("{q0}")
        .build_nondeterministic()
        .unwrap_err();
    assert_eq!(err, DefinitionError::ReservedStateName("{q0}".to_string()));
}

#[test]
fn test_conflicting_transition() {
    let builder = base().transition("q0", 'a', "q0");

    let err = builder.build_deterministic().unwrap_err();
    assert_eq!(
        err,
        DefinitionError::ConflictingTransition {
            from: "q0".to_string(),
            symbol: 'a',
            first: "q1".to_string(),
            second: "q0".to_string(),
        }
    );

    // the same table is a valid NFA
    let nfa = builder.build_nondeterministic().unwrap();
    assert!(nfa.accepts("a"));
    assert!(nfa.accepts("aaa"));
}

#[test]
fn test_repeated_rows_are_merged() {
    let dfa = base()
        .transition("q0", 'a', "q1")
        .build_deterministic()
        .unwrap();
    assert_eq!(dfa.edge_count(), 1);
}

#[test]
fn test_trap_cannot_accept() {
    let err = base()
        .complete_with_trap("q1")
        .build_deterministic()
        .unwrap_err();
    assert_eq!(err, DefinitionError::AcceptingTrap("q1".to_string()));
}

#[test]
fn test_trap_cannot_escape() {
    let err = base()
        .state("dead")
        .transition("dead", 'a', "q0")
        .complete_with_trap("dead")
        .build_deterministic()
        .unwrap_err();
    assert_eq!(
        err,
        DefinitionError::EscapingTrap {
            trap: "dead".to_string(),
            symbol: 'a',
            to: "q0".to_string()
        }
    );
}

#[test]
fn test_complete_with_trap() {
    let partial = base().build_deterministic().unwrap();
    assert!(!partial.is_complete());
    assert!(partial.evaluate("b").is_malformed());

    let dfa = base().complete_with_trap("dead").build_deterministic().unwrap();
    assert!(dfa.is_complete());
    assert_eq!(dfa.state_count(), 3);
    // q0-b, q1-a, q1-b and two self loops on the trap
    assert_eq!(dfa.edge_count(), 6);

    let dead = dfa.state_index("dead").unwrap();
    assert!(dfa.is_trap(dead));
    for &symbol in dfa.alphabet() {
        assert_eq!(dfa.successor(dead, symbol), Some(dead));
    }

    assert!(dfa.accepts("a"));
    assert!(!dfa.evaluate("b").is_malformed());
    assert!(!dfa.accepts("ab"));
    assert_eq!(dfa.trace("bab").final_state(), "dead");
}

#[test]
fn test_declared_trap_is_reused() {
    let dfa = base()
        .state("dead")
        .complete_with_trap("dead")
        .build_deterministic()
        .unwrap();
    assert_eq!(dfa.state_count(), 3);
    assert!(dfa.is_trap(dfa.state_index("dead").unwrap()));
}
