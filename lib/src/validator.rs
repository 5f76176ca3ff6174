use crate::data::LetterCounts;
use crate::dictionary::DictionaryChecker;
use crate::dictionary::DEFAULT_LOCALE;
use crate::results::Outcome;
use unicode_segmentation::UnicodeSegmentation;

/// Answers shorter than this are never recognized.
pub const MIN_ANSWER_LEN: usize = 3;

/// Classifies a submitted answer against the given puzzle word and the answers used so far.
///
/// The checks short-circuit in this order: possible, original, real. The candidate is lower-cased
/// before checking; `used_words` are expected to be lower case already.
///
/// ```
/// use rs_word_scramble::evaluate;
/// use rs_word_scramble::Outcome;
/// use rs_word_scramble::WordListDictionary;
///
/// let dictionary = WordListDictionary::from_iterator(["silk", "worm"]);
/// let used = vec!["worm".to_string()];
///
/// assert_eq!(evaluate("Silk", "silkworm", &used, &dictionary), Outcome::Accepted);
/// assert_eq!(evaluate("worm", "silkworm", &used, &dictionary), Outcome::AlreadyUsed);
/// assert_eq!(evaluate("milks", "silkworm", &used, &dictionary), Outcome::NotRecognized);
/// assert_eq!(evaluate("silky", "silkworm", &used, &dictionary), Outcome::NotPossible);
/// ```
pub fn evaluate<S, D>(
    candidate: &str,
    puzzle_word: &str,
    used_words: &[S],
    dictionary: &D,
) -> Outcome
where
    S: AsRef<str>,
    D: DictionaryChecker + ?Sized,
{
    let candidate = candidate.to_lowercase();
    if !is_possible(&candidate, puzzle_word) {
        return Outcome::NotPossible;
    }
    if !is_original(&candidate, used_words) {
        return Outcome::AlreadyUsed;
    }
    if !is_real(&candidate, dictionary) {
        return Outcome::NotRecognized;
    }
    Outcome::Accepted
}

/// Returns `true` iff `word` is non-empty and can be spelled from the letters of `puzzle_word`,
/// using each letter no more often than it occurs there.
///
/// Both words are compared in lower case.
pub fn is_possible(word: &str, puzzle_word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    LetterCounts::new(&puzzle_word.to_lowercase()).can_spell(&word.to_lowercase())
}

/// Returns `true` iff `word` hasn't been used yet.
pub fn is_original<S: AsRef<str>>(word: &str, used_words: &[S]) -> bool {
    !used_words.iter().any(|used| used.as_ref() == word)
}

/// Returns `true` iff `word` is at least [`MIN_ANSWER_LEN`] characters long and the dictionary
/// recognizes it.
///
/// Length is counted in user-perceived characters (grapheme clusters).
pub fn is_real<D: DictionaryChecker + ?Sized>(word: &str, dictionary: &D) -> bool {
    if word.graphemes(true).count() < MIN_ANSWER_LEN {
        return false;
    }
    !dictionary.is_misspelled(word, DEFAULT_LOCALE)
}
