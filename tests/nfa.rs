use fsa_check::{
    automaton::{
        Alphabet, Language, Verdict, builder::AutomatonBuilder, catalog, nfa::NFA,
    },
    trace::TraceOutcome,
    validation::same_language::{
        assert_same_language, assert_same_verdicts, assert_trace_agrees, same_language,
    },
};

fn ends_in_ab() -> NFA {
    // (a|b)* a b
    AutomatonBuilder::new()
        .states(["q0", "q1", "q2"])
        .symbols(['a', 'b'])
        .transitions("q0", ['a', 'b'], "q0")
        .transition("q0", 'a', "q1")
        .transition("q1", 'b', "q2")
        .start("q0")
        .accepting(["q2"])
        .build_nondeterministic()
        .unwrap()
}

const CREDENTIALS: [&str; 16] = [
    "Abc123", "Abcdef", "A123", "A", "", "abc123", "Ab1c", "AB12", "Zz9", "Q0", "Abc", "A1b2",
    "Hello2024", "hello2024", "A-1", "Xyz 1",
];

#[test]
fn test_credential() {
    let nfa = catalog::credential().unwrap();

    assert_eq!(nfa.state_count(), 4);
    assert_eq!(nfa.alphabet().len(), 62);

    assert_eq!(nfa.evaluate("Abc123"), Verdict::Accepted);
    assert_eq!(nfa.evaluate("Abcdef"), Verdict::Rejected);
    // the digit branch skips the lowercase letters entirely
    assert_eq!(nfa.evaluate("A123"), Verdict::Accepted);

    assert!(!nfa.accepts("A"));
    assert!(!nfa.accepts(""));
    assert!(!nfa.accepts("abc123"));
    assert!(!nfa.accepts("Ab1c"));
    assert!(!nfa.accepts("AB12"));
    assert!(nfa.accepts("Hello2024"));
}

#[test]
fn test_dead_branch_is_rejection() {
    let nfa = catalog::credential().unwrap();

    assert_eq!(nfa.evaluate("Ab1c"), Verdict::Rejected);

    let trace = nfa.trace("Ab1c");
    assert_eq!(
        trace.outcome,
        TraceOutcome::DeadBranch {
            state: "{P3}".to_string(),
            symbol: 'c',
            position: 3
        }
    );
    assert_eq!(trace.verdict(), Verdict::Rejected);
}

#[test]
fn test_out_of_alphabet_symbol_is_dead_branch() {
    let nfa = catalog::credential().unwrap();

    assert_eq!(nfa.evaluate("A-1"), Verdict::Rejected);
    assert!(!nfa.accepts("A-1"));

    let trace = nfa.trace("A-1");
    assert_eq!(
        trace.outcome,
        TraceOutcome::DeadBranch {
            state: "{P2,P4}".to_string(),
            symbol: '-',
            position: 1
        }
    );
    assert_eq!(trace.verdict(), Verdict::Rejected);
    assert!(!trace.is_halted());
}

#[test]
fn test_fork_trace() {
    let nfa = catalog::credential().unwrap();
    let trace = nfa.trace("A1");

    assert_eq!(trace.start, "{P1}");
    assert_eq!(trace.hops[0].to, "{P2,P4}");
    assert_eq!(trace.hops[1].from, "{P2,P4}");
    assert_eq!(trace.hops[1].to, "{P3}");
    assert_eq!(
        trace.outcome,
        TraceOutcome::Completed {
            state: "{P3}".to_string(),
            accepted: true
        }
    );
}

#[test]
fn test_nfa_to_dfa() {
    let nfa = ends_in_ab();
    let dfa = nfa.determinize();

    assert!(dfa.is_complete());
    assert_same_language(&nfa, &dfa, 8);
}

#[test]
fn test_credential_to_dfa() {
    let nfa = catalog::credential().unwrap();
    let dfa = nfa.determinize();

    // {P1}, {}, {P2,P4}, {P2}, {P3}
    assert_eq!(dfa.state_count(), 5);
    assert!(dfa.is_complete());
    assert!(dfa.is_trap(dfa.state_index("{}").unwrap()));

    assert_same_verdicts(&nfa, &dfa, CREDENTIALS);
    for word in CREDENTIALS {
        assert_eq!(nfa.evaluate(word), dfa.evaluate(word), "{:?}", word);
    }
}

#[test]
fn test_different_languages() {
    let nfa = ends_in_ab();
    let other = AutomatonBuilder::new()
        .states(["q0", "q1"])
        .symbols(['a', 'b'])
        .transitions("q0", ['a', 'b'], "q0")
        .transition("q0", 'b', "q1")
        .start("q0")
        .accepting(["q1"])
        .build_nondeterministic()
        .unwrap();

    assert!(same_language(&nfa, &nfa.determinize(), 6));
    assert!(!same_language(&nfa, &other, 6));
}

#[test]
fn test_nfa_trace_agrees_with_evaluate() {
    assert_trace_agrees(&ends_in_ab(), 7, 'c');
    assert_trace_agrees(&catalog::credential().unwrap(), 2, '!');
}
