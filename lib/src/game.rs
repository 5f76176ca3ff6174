use crate::data::WordList;
use crate::dictionary::DictionaryChecker;
use crate::results::*;
use crate::storage::keys;
use crate::storage::load_value;
use crate::storage::save_value;
use crate::storage::PersistenceGateway;
use crate::validator;
use log::debug;
use log::info;
use log::warn;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// The state of one word-scramble game: the puzzle word, the answers accepted so far, and whether
/// the next start should resume this game.
///
/// Every mutating method writes exactly the values it changed to the gateway, in a fixed order.
/// Write failures are logged and otherwise ignored: the in-memory state stays authoritative for
/// the current session.
///
/// ```
/// use rs_word_scramble::GameState;
/// use rs_word_scramble::MemoryStore;
/// use rs_word_scramble::Outcome;
/// use rs_word_scramble::WordList;
/// use rs_word_scramble::WordListDictionary;
///
/// let dictionary = WordListDictionary::from_iterator(["silk", "worm"]);
/// let mut game = GameState::new(MemoryStore::new());
/// game.start(&WordList::default());
///
/// assert_eq!(game.submit("Silk", &dictionary), Outcome::Accepted);
/// assert_eq!(game.submit("silk", &dictionary), Outcome::AlreadyUsed);
/// assert_eq!(game.used_words(), &["silk".to_string()]);
/// ```
pub struct GameState<G> {
    gateway: G,
    puzzle_word: String,
    used_words: Vec<String>,
    resume_flag: bool,
}

impl<G: PersistenceGateway> GameState<G> {
    /// Creates a game that hasn't started yet. Nothing is read or written until one of the start
    /// or restore methods is called.
    pub fn new(gateway: G) -> Self {
        GameState {
            gateway,
            puzzle_word: String::new(),
            used_words: Vec::new(),
            resume_flag: false,
        }
    }

    /// The current puzzle word, in lower case. Empty until the game has started.
    pub fn puzzle_word(&self) -> &str {
        &self.puzzle_word
    }

    /// The accepted answers, most recent first.
    pub fn used_words(&self) -> &[String] {
        &self.used_words
    }

    pub fn resume_flag(&self) -> bool {
        self.resume_flag
    }

    /// Returns `true` once a puzzle word has been chosen or restored.
    pub fn is_started(&self) -> bool {
        !self.puzzle_word.is_empty()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Starts the session: resumes the saved game if the resume flag is set and a game can be
    /// restored, otherwise starts a new one.
    ///
    /// The resume flag is read before branching on it. This never fails: any problem with the
    /// saved state is logged and a new game is started instead.
    pub fn start(&mut self, word_list: &WordList) {
        self.start_with_rng(word_list, &mut rand::thread_rng())
    }

    /// Like [`start`](Self::start), choosing a new puzzle word (if needed) with the given random
    /// number generator.
    pub fn start_with_rng<R: Rng + ?Sized>(&mut self, word_list: &WordList, rng: &mut R) {
        if self.load_resume_flag() {
            match self.restore_game() {
                Ok(RestoreStatus::Restored) => return,
                Ok(RestoreStatus::NothingSaved) => {
                    info!("No saved game found, starting a new game");
                }
                Err(err) => {
                    warn!("Could not restore saved game ({err}), starting a new game");
                }
            }
        }
        self.start_new_game_with_rng(word_list, rng);
    }

    /// Starts a new game with a random puzzle word from `word_list`.
    ///
    /// Clears the used words and sets the resume flag, then persists the puzzle word, the (empty)
    /// used words and the resume flag, in that order.
    pub fn start_new_game(&mut self, word_list: &WordList) {
        self.start_new_game_with_rng(word_list, &mut rand::thread_rng())
    }

    /// Like [`start_new_game`](Self::start_new_game), using the given random number generator.
    pub fn start_new_game_with_rng<R: Rng + ?Sized>(
        &mut self,
        word_list: &WordList,
        rng: &mut R,
    ) {
        self.puzzle_word = word_list.choose_with_rng(rng).to_lowercase();
        self.used_words.clear();
        self.resume_flag = true;
        info!("Starting new game with puzzle word \"{}\"", self.puzzle_word);

        self.persist(keys::CURRENT_WORD, self.puzzle_word.as_str());
        self.persist(keys::USED_WORDS, &self.used_words);
        self.persist(keys::LOAD_FROM_SAVE, &self.resume_flag);
    }

    /// Starts a new game, discarding the current one.
    pub fn restart(&mut self, word_list: &WordList) {
        debug!("Restarting game \"{}\"", self.puzzle_word);
        self.start_new_game(word_list)
    }

    /// Reads the saved puzzle word and used words.
    ///
    /// If no puzzle word was saved, returns [`RestoreStatus::NothingSaved`] and leaves the state
    /// unchanged. A saved puzzle word without saved used words restores with no used words.
    /// Restored words are converted to lower case.
    ///
    /// If the saved puzzle word is valid but the used words are malformed, the puzzle word is
    /// still restored before the error is returned. Restoring never writes anything, so saved
    /// values are never overwritten as a side effect.
    pub fn restore_game(&mut self) -> Result<RestoreStatus, RestoreError> {
        let puzzle_word: Option<String> = self.load(keys::CURRENT_WORD)?;
        let Some(puzzle_word) = puzzle_word else {
            return Ok(RestoreStatus::NothingSaved);
        };
        let puzzle_word = puzzle_word.to_lowercase();
        if puzzle_word.is_empty() {
            return Err(RestoreError::Empty {
                key: keys::CURRENT_WORD,
            });
        }
        self.puzzle_word = puzzle_word;

        let used_words: Option<Vec<String>> = self.load(keys::USED_WORDS)?;
        self.used_words = used_words
            .unwrap_or_default()
            .into_iter()
            .map(|word| word.to_lowercase())
            .collect();
        info!(
            "Restored game \"{}\" with {} used words",
            self.puzzle_word,
            self.used_words.len()
        );
        Ok(RestoreStatus::Restored)
    }

    /// Reads the saved resume flag and makes it the current one.
    ///
    /// A missing flag means `false`. So does a malformed one, which is also logged.
    pub fn load_resume_flag(&mut self) -> bool {
        self.resume_flag = match self.load::<bool>(keys::LOAD_FROM_SAVE) {
            Ok(flag) => flag.unwrap_or(false),
            Err(err) => {
                warn!("Ignoring saved resume flag: {err}");
                false
            }
        };
        debug!("Resume flag is {}", self.resume_flag);
        self.resume_flag
    }

    /// Sets the resume flag and persists it. The saved words are left untouched.
    pub fn reset_resume_flag(&mut self, value: bool) {
        self.resume_flag = value;
        self.persist(keys::LOAD_FROM_SAVE, &self.resume_flag);
    }

    /// Adds `word` as the most recent accepted answer and persists the used words.
    ///
    /// This doesn't validate `word`; see [`evaluate`](Self::evaluate).
    pub fn record_accepted(&mut self, word: &str) {
        self.used_words.insert(0, word.to_string());
        debug!("Accepted \"{word}\"");
        self.persist(keys::USED_WORDS, &self.used_words);
    }

    /// Classifies `candidate` against the current puzzle word and used words. Nothing is changed.
    pub fn evaluate<D: DictionaryChecker + ?Sized>(
        &self,
        candidate: &str,
        dictionary: &D,
    ) -> Outcome {
        validator::evaluate(candidate, &self.puzzle_word, &self.used_words, dictionary)
    }

    /// Evaluates `candidate` and records it (in lower case) if it's accepted.
    pub fn submit<D: DictionaryChecker + ?Sized>(
        &mut self,
        candidate: &str,
        dictionary: &D,
    ) -> Outcome {
        let outcome = self.evaluate(candidate, dictionary);
        if outcome.is_accepted() {
            self.record_accepted(&candidate.to_lowercase());
        } else {
            debug!("Rejected \"{candidate}\": {outcome:?}");
        }
        outcome
    }

    fn load<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>, RestoreError> {
        load_value(&self.gateway, key).map_err(|source| match source {
            StorageError::Decode(_) => RestoreError::Malformed { key, source },
            source => RestoreError::Read { key, source },
        })
    }

    fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(err) = save_value(&self.gateway, key, value) {
            warn!("Failed to save {key}: {err}");
        }
    }
}
