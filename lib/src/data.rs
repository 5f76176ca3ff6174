use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

/// The puzzle word used when no other words are available.
pub const DEFAULT_PUZZLE_WORD: &str = "silkworm";

/// Contains all the candidate puzzle words for a game.
///
/// A `WordList` is never empty: if no words are provided it contains only
/// [`DEFAULT_PUZZLE_WORD`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordList {
    all_words: Vec<Arc<str>>,
}

impl WordList {
    /// Constructs a new `WordList` by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Each word is trimmed and converted to lower
    /// case, and blank lines are skipped.
    pub fn from_reader<R: BufRead>(word_reader: R) -> io::Result<Self> {
        Ok(Self::try_from_reader(word_reader)?.unwrap_or_default())
    }

    /// Like [`from_reader`](Self::from_reader), but returns `None` instead of the default list if
    /// the reader provides no words.
    pub fn try_from_reader<R: BufRead>(word_reader: R) -> io::Result<Option<Self>> {
        let words = word_reader.lines().collect::<io::Result<Vec<String>>>()?;
        let all_words = normalize(words);
        if all_words.is_empty() {
            return Ok(None);
        }
        Ok(Some(WordList { all_words }))
    }

    /// Constructs a new `WordList` using the words from the given iterator.
    ///
    /// ```
    /// use rs_word_scramble::WordList;
    ///
    /// let list = WordList::from_iterator(["", "Anagram ", "puzzle"]);
    /// assert_eq!(list.len(), 2);
    /// assert_eq!(&*list[0], "anagram");
    /// ```
    pub fn from_iterator<S, I>(words: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let all_words = normalize(words);
        if all_words.is_empty() {
            return Self::default();
        }
        WordList { all_words }
    }

    /// Loads the words from the file at `path`, one per line.
    ///
    /// Falls back to the default list if the file can't be read or contains no words. The
    /// failure is logged, not returned.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match File::open(path).and_then(|file| Self::try_from_reader(io::BufReader::new(file))) {
            Ok(Some(list)) => list,
            Ok(None) => {
                warn!(
                    "Word list {} is empty, using \"{DEFAULT_PUZZLE_WORD}\"",
                    path.display()
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    "Could not load word list {}: {err}. Using \"{DEFAULT_PUZZLE_WORD}\"",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Picks a word uniformly at random.
    pub fn choose_random(&self) -> Arc<str> {
        self.choose_with_rng(&mut rand::thread_rng())
    }

    /// Picks a word uniformly at random using the given random number generator.
    pub fn choose_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Arc<str> {
        self.all_words
            .choose(rng)
            .map(Arc::clone)
            .unwrap_or_else(|| Arc::from(DEFAULT_PUZZLE_WORD))
    }

    /// Returns `true` iff this list only contains the fallback word.
    pub fn is_default(&self) -> bool {
        self.all_words.len() == 1 && &*self.all_words[0] == DEFAULT_PUZZLE_WORD
    }
}

/// Trims and lower-cases each word, skipping blanks.
fn normalize<S, I>(words: I) -> Vec<Arc<str>>
where
    S: AsRef<str>,
    I: IntoIterator<Item = S>,
{
    words
        .into_iter()
        .filter_map(|word| {
            let word = word.as_ref().trim();
            if word.is_empty() {
                return None;
            }
            Some(Arc::from(word.to_lowercase().as_str()))
        })
        .collect()
}

impl Default for WordList {
    fn default() -> Self {
        WordList {
            all_words: vec![Arc::from(DEFAULT_PUZZLE_WORD)],
        }
    }
}

impl Deref for WordList {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.all_words
    }
}

/// Counts how many times each letter occurs in a word.
///
/// This is used as a multiset: a word can be spelled from another word's letters iff each of its
/// letters can be taken from the other word's counter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LetterCounts {
    count_by_letter: HashMap<char, u32>,
}

impl LetterCounts {
    /// Counts the letters of the given word.
    pub fn new(word: &str) -> Self {
        let mut count_by_letter: HashMap<char, u32> = HashMap::new();
        for letter in word.chars() {
            *count_by_letter.entry(letter).or_insert(0) += 1;
        }
        LetterCounts { count_by_letter }
    }

    /// Removes one occurrence of `letter`. Returns `false` if there was none left.
    pub fn take(&mut self, letter: char) -> bool {
        match self.count_by_letter.get_mut(&letter) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Returns `true` iff every letter of `word` can be taken from these counts, with
    /// multiplicity. The counts themselves are not modified.
    pub fn can_spell(&self, word: &str) -> bool {
        let mut remaining = self.clone();
        word.chars().all(|letter| remaining.take(letter))
    }

    /// Retrieves the number of remaining occurrences of `letter`.
    pub fn count(&self, letter: char) -> u32 {
        *self.count_by_letter.get(&letter).unwrap_or(&0)
    }
}
