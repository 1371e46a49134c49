use std::iter::repeat_n;

use itertools::Itertools;

use crate::automaton::Language;

/// All words over `alphabet` shorter than `max_word_length`, shortest first.
pub fn words_up_to(alphabet: &[char], max_word_length: usize) -> impl Iterator<Item = String> + '_ {
    (0..max_word_length).flat_map(move |i| {
        repeat_n(alphabet, i)
            .multi_cartesian_product()
            .map(|word| word.into_iter().collect::<String>())
    })
}

/// Checks if two automata accept the same language.
/// This is done by checking if the alphabets are the same and then checking if
/// the automata accept the same words up to a certain length.
pub fn same_language<A: Language + ?Sized, B: Language + ?Sized>(
    a: &A,
    b: &B,
    max_word_length: usize,
) -> bool {
    // first we need to check if the alphabets are the same
    if a.alphabet() != b.alphabet() {
        return false;
    }

    words_up_to(a.alphabet(), max_word_length).all(|word| a.accepts(&word) == b.accepts(&word))
}

pub fn assert_same_language<A: Language + ?Sized, B: Language + ?Sized>(
    a: &A,
    b: &B,
    max_word_length: usize,
) {
    if a.alphabet() != b.alphabet() {
        panic!("Alphabets are not the same");
    }

    assert_same_verdicts(a, b, words_up_to(a.alphabet(), max_word_length));
}

/// Assert that both automata agree on acceptance for every given word.
pub fn assert_same_verdicts<A: Language + ?Sized, B: Language + ?Sized, S: AsRef<str>>(
    a: &A,
    b: &B,
    words: impl IntoIterator<Item = S>,
) {
    for word in words {
        let word = word.as_ref();
        match (a.accepts(word), b.accepts(word)) {
            (true, false) => {
                panic!(
                    "{:?} is accepted by automaton `a` but not by automaton `b`. Thus their languages are not equal.",
                    word
                );
            }
            (false, true) => {
                panic!(
                    "{:?} is accepted by automaton `b` but not by automaton `a`. Thus their languages are not equal.",
                    word
                );
            }
            _ => {}
        }
    }
}

/// Assert that `accepts` and the terminal status of `trace` agree for every
/// word up to the given length, including words with one symbol outside the
/// alphabet.
pub fn assert_trace_agrees<L: Language + ?Sized>(a: &L, max_word_length: usize, foreign: char) {
    let words = words_up_to(a.alphabet(), max_word_length)
        .flat_map(|word| [format!("{word}{foreign}"), format!("{foreign}{word}"), word]);

    for word in words {
        let verdict = a.evaluate(&word);
        let trace = a.trace(&word);
        assert_eq!(
            verdict,
            trace.verdict(),
            "evaluate and trace disagree on {:?}:\n{}",
            word,
            trace
        );
        assert_eq!(a.accepts(&word), verdict.is_accepted());
    }
}
