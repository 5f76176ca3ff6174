use log::warn;
use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::path::Path;

/// The locale used when checking English words.
pub const DEFAULT_LOCALE: &str = "en";

/// Words known when no dictionary file is available. They are spelled from the default puzzle
/// word, so the default game is always playable.
pub const BUILT_IN_WORDS: &[&str] = &[
    "ilk", "irk", "low", "milk", "mil", "mir", "moil", "mow", "oil", "owl", "rim", "risk", "roil",
    "row", "silk", "ski", "skim", "slim", "slow", "soil", "sow", "swim", "swirl", "wok", "work",
    "worm", "worms",
];

/// Decides whether a word is a real word.
///
/// Implementations are treated as authoritative and may block, e.g. while consulting a system
/// spell checker.
pub trait DictionaryChecker {
    /// Returns `true` if `word` is not a recognized word in the given locale.
    fn is_misspelled(&self, word: &str, locale: &str) -> bool;
}

impl<D: DictionaryChecker + ?Sized> DictionaryChecker for &D {
    fn is_misspelled(&self, word: &str, locale: &str) -> bool {
        (**self).is_misspelled(word, locale)
    }
}

/// A dictionary backed by a fixed set of known words.
///
/// Every word not in the set is misspelled. The locale is ignored.
#[derive(Clone, Debug, Default)]
pub struct WordListDictionary {
    words: HashSet<Box<str>>,
}

impl WordListDictionary {
    /// Reads known words from the given reader, one per line.
    ///
    /// Words are trimmed and converted to lower case, and blank lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut words: HashSet<Box<str>> = HashSet::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                words.insert(Box::from(word.to_lowercase().as_str()));
            }
        }
        Ok(WordListDictionary { words })
    }

    /// Creates a dictionary from the given words.
    ///
    /// ```
    /// use rs_word_scramble::DictionaryChecker;
    /// use rs_word_scramble::WordListDictionary;
    ///
    /// let dictionary = WordListDictionary::from_iterator(["silk", "Worm"]);
    /// assert!(!dictionary.is_misspelled("worm", "en"));
    /// assert!(dictionary.is_misspelled("wrom", "en"));
    /// ```
    pub fn from_iterator<S, I>(words: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        WordListDictionary {
            words: words
                .into_iter()
                .map(|word| word.as_ref().trim().to_lowercase())
                .filter(|word| !word.is_empty())
                .map(String::into_boxed_str)
                .collect(),
        }
    }

    /// Loads known words from the file at `path`, one per line.
    ///
    /// Falls back to [`BUILT_IN_WORDS`] if the file can't be read or contains no words. The
    /// failure is logged, not returned.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match File::open(path).and_then(|file| Self::from_reader(io::BufReader::new(file))) {
            Ok(dictionary) if !dictionary.is_empty() => dictionary,
            Ok(_) => {
                warn!("Dictionary {} is empty, using built-in words", path.display());
                Self::built_in()
            }
            Err(err) => {
                warn!(
                    "Could not load dictionary {}: {err}. Using built-in words",
                    path.display()
                );
                Self::built_in()
            }
        }
    }

    /// A small dictionary of [`BUILT_IN_WORDS`].
    pub fn built_in() -> Self {
        Self::from_iterator(BUILT_IN_WORDS)
    }

    /// Returns the number of known words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` iff no words are known.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl DictionaryChecker for WordListDictionary {
    fn is_misspelled(&self, word: &str, _locale: &str) -> bool {
        !self.words.contains(word.to_lowercase().as_str())
    }
}
