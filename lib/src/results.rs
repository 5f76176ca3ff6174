use std::io;
use thiserror::Error;

/// The validator's classification of a single submission.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Outcome {
    /// The submission is a new, real word that can be spelled from the puzzle word.
    Accepted,
    /// The submission can't be spelled from the letters of the puzzle word.
    NotPossible,
    /// The submission was already accepted earlier in this game.
    AlreadyUsed,
    /// The submission is too short, or the dictionary doesn't know it.
    NotRecognized,
}

impl Outcome {
    /// Returns `true` iff the submission should be recorded.
    pub fn is_accepted(&self) -> bool {
        *self == Outcome::Accepted
    }

    /// The title to show the player when a submission is rejected, or `None` if it was accepted.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Outcome::Accepted => None,
            Outcome::NotPossible => Some("Word not possible"),
            Outcome::AlreadyUsed => Some("Word used already"),
            Outcome::NotRecognized => Some("Word not recognised"),
        }
    }

    /// The explanation to show the player when a submission is rejected.
    ///
    /// ```
    /// use rs_word_scramble::Outcome;
    ///
    /// assert_eq!(
    ///     Outcome::NotPossible.message("silkworm").as_deref(),
    ///     Some("You can't spell that word from silkworm.")
    /// );
    /// assert_eq!(Outcome::Accepted.message("silkworm"), None);
    /// ```
    pub fn message(&self, puzzle_word: &str) -> Option<String> {
        match self {
            Outcome::Accepted => None,
            Outcome::NotPossible => Some(format!("You can't spell that word from {puzzle_word}.")),
            Outcome::AlreadyUsed => Some("Be more original.".to_string()),
            Outcome::NotRecognized => Some(
                "You can't just make them up, you know. Also, answer must be three letters or more."
                    .to_string(),
            ),
        }
    }
}

/// Indicates that a value could not be read from, or written to, a
/// [`PersistenceGateway`](crate::PersistenceGateway).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed")]
    Io(#[from] io::Error),
    #[error("failed to encode value")]
    Encode(#[from] ron::Error),
    #[error("failed to decode value")]
    Decode(#[from] ron::error::SpannedError),
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("the write queue has shut down")]
    QueueClosed,
}

/// Indicates that saved state exists but could not be restored.
///
/// This is never fatal: the caller should start a new game instead.
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("failed to read saved {key}")]
    Read {
        key: &'static str,
        #[source]
        source: StorageError,
    },
    #[error("saved {key} is malformed")]
    Malformed {
        key: &'static str,
        #[source]
        source: StorageError,
    },
    #[error("saved {key} is empty")]
    Empty { key: &'static str },
}

impl RestoreError {
    /// The storage key whose value couldn't be restored.
    pub fn key(&self) -> &'static str {
        match self {
            RestoreError::Read { key, .. }
            | RestoreError::Malformed { key, .. }
            | RestoreError::Empty { key } => *key,
        }
    }
}

/// Whether [`GameState::restore_game`](crate::GameState::restore_game) found anything to restore.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RestoreStatus {
    /// The saved puzzle word (and used words, if any) are now active.
    Restored,
    /// No game was saved. The state is unchanged.
    NothingSaved,
}
