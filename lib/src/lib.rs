//! Rules and persistence for a word-scramble game: players find words spelled from the letters
//! of a puzzle word, and the game can be resumed after a restart.

mod data;
mod dictionary;
mod game;
mod queue;
mod results;
mod storage;
mod validator;

pub use data::*;
pub use dictionary::*;
pub use game::GameState;
pub use queue::WriteQueue;
pub use results::*;
pub use storage::*;
pub use validator::*;
