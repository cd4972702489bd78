/// Hangman: a two-player word guessing game
pub mod game;
pub mod renderer;
pub mod session;
pub mod words;

pub use game::{
    is_letter, GuessOutcome, GuessResult, HangmanEngine, HangmanError, Round, RoundStatus,
    MAX_WRONG_GUESSES,
};
pub use renderer::HangmanRenderer;
pub use session::{HangmanGame, HangmanInput, HangmanSession, Phase};
