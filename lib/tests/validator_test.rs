use rs_word_scramble::*;

use std::collections::BTreeMap;

fn dictionary() -> WordListDictionary {
    WordListDictionary::from_iterator(["silk", "worm", "milk", "work", "cat", "act", "to"])
}

fn evaluate_fresh(candidate: &str, puzzle_word: &str) -> Outcome {
    evaluate::<String, _>(candidate, puzzle_word, &[], &dictionary())
}

#[test]
fn spellable_real_word_is_accepted() {
    assert_eq!(evaluate_fresh("silk", "silkworm"), Outcome::Accepted);
    assert_eq!(evaluate_fresh("MILK", "silkworm"), Outcome::Accepted);
}

#[test]
fn extra_letter_is_not_possible() {
    assert_eq!(evaluate_fresh("silkwormx", "silkworm"), Outcome::NotPossible);
}

#[test]
fn not_possible_takes_precedence_over_not_recognized() {
    assert_eq!(evaluate_fresh("xyz", "cat"), Outcome::NotPossible);
}

#[test]
fn empty_candidate_is_not_possible() {
    assert_eq!(evaluate_fresh("", "silkworm"), Outcome::NotPossible);
}

#[test]
fn puzzle_word_itself_is_not_specially_rejected() {
    let dictionary = WordListDictionary::from_iterator(["silkworm"]);

    assert_eq!(
        evaluate::<String, _>("silkworm", "silkworm", &[], &dictionary),
        Outcome::Accepted
    );
}

#[test]
fn short_words_are_never_recognized() {
    // "to" is in the dictionary, but too short.
    assert_eq!(evaluate_fresh("to", "potato"), Outcome::NotRecognized);
    assert_eq!(evaluate_fresh("t", "potato"), Outcome::NotRecognized);
}

#[test]
fn unknown_word_is_not_recognized() {
    assert_eq!(evaluate_fresh("wilk", "silkworm"), Outcome::NotRecognized);
}

#[test]
fn already_used_is_checked_case_insensitively() {
    let used = vec!["silk".to_string()];

    assert_eq!(
        evaluate("Silk", "silkworm", &used, &dictionary()),
        Outcome::AlreadyUsed
    );
}

/// Counts letters independently of the library, for comparing sub-multisets.
fn letter_counts(word: &str) -> BTreeMap<char, usize> {
    let mut counts = BTreeMap::new();
    for letter in word.chars() {
        *counts.entry(letter).or_insert(0) += 1;
    }
    counts
}

fn is_sub_multiset(candidate: &str, puzzle_word: &str) -> bool {
    let available = letter_counts(puzzle_word);
    letter_counts(candidate)
        .iter()
        .all(|(letter, count)| available.get(letter).is_some_and(|have| have >= count))
}

#[test]
fn not_possible_iff_letters_not_available() {
    let puzzle_words = ["silkworm", "letter", "cat", "aab"];
    let candidates = [
        "silk", "worms", "wormss", "let", "tet", "tttt", "act", "tac", "cats", "ab", "aab", "abb",
        "baa", "q",
    ];
    for puzzle_word in puzzle_words {
        for candidate in candidates {
            let available = is_sub_multiset(candidate, puzzle_word);
            let outcome = evaluate_fresh(candidate, puzzle_word);
            assert_eq!(
                outcome == Outcome::NotPossible,
                !available,
                "{candidate:?} from {puzzle_word:?} gave {outcome:?}"
            );
        }
    }
}

#[test]
fn not_possible_known_cases() {
    assert_ne!(evaluate_fresh("tet", "letter"), Outcome::NotPossible);
    assert_eq!(evaluate_fresh("tttt", "letter"), Outcome::NotPossible);
    assert_ne!(evaluate_fresh("aab", "aab"), Outcome::NotPossible);
    assert_eq!(evaluate_fresh("abb", "aab"), Outcome::NotPossible);
    assert_eq!(evaluate_fresh("wormss", "silkworm"), Outcome::NotPossible);
}

#[test]
fn rejection_messages() {
    assert_eq!(Outcome::Accepted.title(), None);
    assert_eq!(Outcome::NotPossible.title(), Some("Word not possible"));
    assert_eq!(Outcome::AlreadyUsed.title(), Some("Word used already"));
    assert_eq!(Outcome::NotRecognized.title(), Some("Word not recognised"));
    assert_eq!(
        Outcome::AlreadyUsed.message("cat").as_deref(),
        Some("Be more original.")
    );
    assert!(Outcome::NotRecognized
        .message("cat")
        .is_some_and(|message| message.contains("three letters")));
}
