use fsa_check::{
    automaton::{Automaton, EvaluationFault, Verdict, builder::AutomatonBuilder, catalog},
    batch::{self, BatchRecord, BatchSummary, BatchValidator},
    config::BatchConfig,
};

const LINES: [&str; 7] = ["aa", "", "  ab  ", "bba", "   ", "axb", "aba"];

fn pattern() -> Automaton {
    catalog::two_a_no_bb_ending_in_a().unwrap().into()
}

fn record(index: usize, text: &str, verdict: Verdict) -> BatchRecord {
    BatchRecord {
        index,
        text: text.to_string(),
        verdict,
    }
}

#[test]
fn test_batch_order_and_indices() {
    let automaton = pattern();
    let records = batch::run(&automaton, &LINES);

    assert_eq!(
        records,
        vec![
            record(1, "aa", Verdict::Accepted),
            record(2, "ab", Verdict::Rejected),
            record(3, "bba", Verdict::Rejected),
            record(4, "axb", Verdict::Rejected),
            record(5, "aba", Verdict::Accepted),
        ]
    );
}

#[test]
fn test_batch_is_idempotent() {
    let automaton = pattern();
    let validator = BatchValidator::new(&automaton, BatchConfig::sequential());

    let first = validator.run(&LINES);
    let second = validator.run(&LINES);
    assert_eq!(first, second);
}

#[test]
fn test_parallel_matches_sequential() {
    let automaton: Automaton = catalog::credential().unwrap().into();

    let lines = (0..500)
        .map(|i| match i % 4 {
            0 => format!("Abc{i}"),
            1 => format!("abc{i}"),
            2 => format!("A{i}x"),
            _ => format!("A-{i}"),
        })
        .collect::<Vec<_>>();

    let sequential = BatchValidator::new(&automaton, BatchConfig::sequential()).run(&lines);
    let parallel = BatchValidator::new(
        &automaton,
        BatchConfig::default().with_parallel_threshold(0),
    )
    .run(&lines);

    assert_eq!(sequential, parallel);
    for (i, record) in parallel.iter().enumerate() {
        assert_eq!(record.index, i + 1);
        assert_eq!(record.text, lines[i]);
    }
}

#[test]
fn test_batch_report() {
    let automaton = pattern();
    let report = BatchValidator::new(&automaton, BatchConfig::default()).report(&LINES);

    assert_eq!(
        report.summary,
        BatchSummary {
            total: 5,
            accepted: 2,
            rejected: 3,
            malformed: 0
        }
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["records"][0]["verdict"], "Accepted");
    assert_eq!(json["records"][3]["index"], 4);
    assert_eq!(json["records"][3]["verdict"], "Rejected");
    assert_eq!(json["summary"]["malformed"], 0);
}

#[test]
fn test_batch_keeps_malformed_lines() {
    // (ab)* a, without any trap
    let automaton: Automaton = AutomatonBuilder::new()
        .states(["s0", "s1"])
        .symbols(['a', 'b'])
        .transition("s0", 'a', "s1")
        .transition("s1", 'b', "s0")
        .start("s0")
        .accepting(["s1"])
        .build_deterministic()
        .unwrap()
        .into();

    let report = BatchValidator::new(&automaton, BatchConfig::default())
        .report(&["aba", "abb", "a?", "ab"]);

    assert_eq!(
        report.records[1],
        record(
            2,
            "abb",
            Verdict::Malformed(EvaluationFault::UndefinedTransition {
                state: "s0".to_string(),
                symbol: 'b',
                position: 2
            })
        )
    );
    assert_eq!(report.records[2].verdict, Verdict::Rejected);
    assert_eq!(
        report.summary,
        BatchSummary {
            total: 4,
            accepted: 1,
            rejected: 2,
            malformed: 1
        }
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json["records"][1]["verdict"]["Malformed"]["UndefinedTransition"]["state"],
        "s0"
    );
}

#[test]
fn test_empty_batch() {
    let automaton = pattern();
    let blank: [&str; 3] = ["", " ", "\t"];

    assert!(batch::run(&automaton, &blank).is_empty());
    assert_eq!(
        BatchSummary::from_records(&[]),
        BatchSummary::default()
    );
}

#[test]
fn test_batch_through_filtered_recognizer() {
    let recognizer = catalog::Catalog::Email.recognizer().unwrap();
    let lines = [
        "juan3@uptc.edu.co",
        "MARIA@uptc.edu.co",
        "123juan@uptc.edu.co",
        "juAn3@uptc.edu.co",
    ];

    let verdicts = batch::run(recognizer.as_ref(), &lines)
        .into_iter()
        .map(|record| record.verdict)
        .collect::<Vec<_>>();

    assert_eq!(
        verdicts,
        vec![
            Verdict::Accepted,
            Verdict::Rejected,
            Verdict::Rejected,
            Verdict::Rejected
        ]
    );
}
