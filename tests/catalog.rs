use fsa_check::automaton::{AutomatonKind, Language, catalog::Catalog};

#[test]
fn test_catalog_names() {
    for entry in Catalog::ALL {
        let parsed: Catalog = entry.to_string().parse().unwrap();
        assert_eq!(parsed, entry);
    }
    assert_eq!("PASSWORD".parse::<Catalog>(), Ok(Catalog::Credential));
    assert!("regex".parse::<Catalog>().is_err());
}

#[test]
fn test_catalog_builds() {
    let expected = [
        (Catalog::Length, AutomatonKind::Deterministic, 8),
        (Catalog::Pattern, AutomatonKind::Deterministic, 7),
        (Catalog::Credential, AutomatonKind::Nondeterministic, 4),
        (Catalog::Email, AutomatonKind::Deterministic, 15),
    ];

    for (entry, kind, states) in expected {
        let automaton = entry.automaton().unwrap();
        assert_eq!(automaton.kind(), kind, "{}", entry);
        assert_eq!(automaton.state_count(), states, "{}", entry);
    }
}

#[test]
fn test_recognizers() {
    let samples = [
        (Catalog::Length, "0000001", "0000000"),
        (Catalog::Pattern, "aa", "bba"),
        (Catalog::Credential, "Abc123", "Abcdef"),
        (Catalog::Email, "juan3@uptc.edu.co", "Juan3@uptc.edu.co"),
    ];

    for (entry, accepted, rejected) in samples {
        let recognizer = entry.recognizer().unwrap();
        assert!(recognizer.accepts(accepted), "{} {}", entry, accepted);
        assert!(!recognizer.accepts(rejected), "{} {}", entry, rejected);
    }
}

#[test]
fn test_describe() {
    let rendered = Catalog::Credential.automaton().unwrap().to_string();
    assert!(rendered.starts_with("NFA A = (Q, Σ, δ, q0, F)"));
    assert!(rendered.contains("  P1 -A-> {P2, P4}\n"));
    assert!(rendered.contains("F = {P3}"));
}
