pub mod cli;
pub mod config;
pub mod core;
pub mod games;
pub mod logging;

// Re-export for convenience
pub use crate::core::game::{GameRenderer, TurnGame};
pub use crate::games::hangman::{GuessOutcome, GuessResult, HangmanEngine, HangmanError};
