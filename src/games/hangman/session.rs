use tracing::{debug, info, warn};

use crate::core::game::TurnGame;
use crate::games::hangman::game::{GuessOutcome, HangmanEngine, HangmanError, RoundStatus};

pub const PROMPT_SECRET: &str = "Enter an all capitalized word for the player to guess";
pub const PROMPT_GUESS: &str = "Enter a capitalized letter to guess";
pub const INVALID_INPUT: &str = "Please enter a valid word";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// First player is typing the secret word
    SecretEntry,
    /// Second player is guessing letters
    Guessing,
    Finished(RoundStatus),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HangmanInput {
    SecretWord(String),
    Guess(char),
    /// A line that cannot be a guess (e.g. more than one character)
    Malformed(String),
}

/// Renderer-side view of a game: the engine plus the prompt flow around it.
#[derive(Debug, Clone)]
pub struct HangmanSession {
    pub engine: HangmanEngine,
    pub phase: Phase,
    pub message: String,
}

impl Default for HangmanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl HangmanSession {
    /// Starts by asking for a secret word.
    pub fn new() -> Self {
        Self {
            engine: HangmanEngine::new(),
            phase: Phase::SecretEntry,
            message: PROMPT_SECRET.to_string(),
        }
    }

    /// Starts straight in the guessing phase with a known word.
    pub fn with_secret(word: &str) -> Result<Self, HangmanError> {
        let mut session = Self::new();
        session.accept_secret(word)?;
        Ok(session)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// One-line result once the round is over.
    pub fn summary(&self) -> Option<String> {
        let word = self.engine.secret_word()?;
        match self.phase {
            Phase::Finished(RoundStatus::Won) => Some(format!("YOU WIN! The word was '{}'.", word)),
            Phase::Finished(_) => Some(format!("GAME OVER! The word was '{}'.", word)),
            _ => None,
        }
    }

    fn accept_secret(&mut self, word: &str) -> Result<(), HangmanError> {
        self.engine.start_round(word)?;
        info!(letters = word.chars().count(), distinct = self.engine.distinct_letter_count(), "round started");
        self.phase = Phase::Guessing;
        self.message = PROMPT_GUESS.to_string();
        Ok(())
    }

    fn guess(&mut self, letter: char) {
        let result = match self.engine.submit_guess(letter) {
            Ok(result) => result,
            Err(e) => {
                debug!(error = %e, "guess rejected");
                self.message = INVALID_INPUT.to_string();
                return;
            }
        };

        info!(
            %letter,
            outcome = ?result.outcome,
            remaining = self.engine.remaining_guesses_left(),
            "guess submitted"
        );

        self.message = match result.outcome {
            GuessOutcome::Correct => format!("'{}' is in the word! {}", letter, PROMPT_GUESS),
            GuessOutcome::Incorrect => format!("'{}' is not in the word. {}", letter, PROMPT_GUESS),
            GuessOutcome::Redundant => format!("'{}' was already found. {}", letter, PROMPT_GUESS),
        };

        match self.engine.status() {
            RoundStatus::InProgress => {}
            status => self.finish(status),
        }
    }

    fn finish(&mut self, status: RoundStatus) {
        self.phase = Phase::Finished(status);
        if let Some(summary) = self.summary() {
            self.message = format!("{} Press Esc to close", summary);
        }

        match serde_json::to_string(&self.engine) {
            Ok(snapshot) => debug!(%snapshot, "final round state"),
            Err(e) => warn!(error = %e, "could not serialize final round"),
        }
        info!(?status, wrong = self.engine.wrong_guess_count(), "round finished");
    }
}

/// Hangman as a terminal game: two players share one keyboard.
pub struct HangmanGame;

impl TurnGame for HangmanGame {
    type State = HangmanSession;
    type Input = HangmanInput;

    const NAME: &'static str = "Hangman";
    const DESCRIPTION: &'static str = "One player hides a word, the other guesses it letter by letter";

    fn new_game() -> Self::State {
        HangmanSession::new()
    }

    fn parse_command(state: &Self::State, line: &str) -> Self::Input {
        let line = line.trim();
        match state.phase {
            Phase::SecretEntry => HangmanInput::SecretWord(line.to_string()),
            _ => {
                let mut chars = line.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    return HangmanInput::Malformed(line.to_string());
                };
                // Letters like 'ß' upper-case to several chars; never guess a different letter
                let mut upper = c.to_uppercase();
                match (upper.next(), upper.next()) {
                    (Some(u), None) => HangmanInput::Guess(u),
                    _ => HangmanInput::Malformed(line.to_string()),
                }
            }
        }
    }

    fn handle_input(state: &mut Self::State, input: Self::Input) {
        if state.is_finished() {
            return;
        }

        match input {
            HangmanInput::SecretWord(word) => {
                if let Err(e) = state.accept_secret(&word) {
                    debug!(error = %e, "secret word rejected");
                    state.message = INVALID_INPUT.to_string();
                }
            }
            HangmanInput::Guess(letter) => state.guess(letter),
            HangmanInput::Malformed(line) => {
                debug!(len = line.chars().count(), "malformed guess line");
                state.message = INVALID_INPUT.to_string();
            }
        }
    }

    fn is_finished(state: &Self::State) -> bool {
        state.is_finished()
    }

    fn hide_input(state: &Self::State) -> bool {
        state.phase == Phase::SecretEntry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(session: &mut HangmanSession, line: &str) {
        let input = HangmanGame::parse_command(session, line);
        HangmanGame::handle_input(session, input);
    }

    #[test]
    fn secret_entry_then_guessing() {
        let mut session = HangmanSession::new();
        assert_eq!(session.phase, Phase::SecretEntry);
        assert!(HangmanGame::hide_input(&session));

        submit(&mut session, "apple");
        assert_eq!(session.phase, Phase::SecretEntry);
        assert_eq!(session.message, INVALID_INPUT);

        submit(&mut session, "APPLE");
        assert_eq!(session.phase, Phase::Guessing);
        assert_eq!(session.message, PROMPT_GUESS);
        assert!(!HangmanGame::hide_input(&session));
    }

    #[test]
    fn guess_lines_must_be_one_character() {
        let session = HangmanSession::with_secret("CAT").unwrap();
        assert_eq!(HangmanGame::parse_command(&session, " c "), HangmanInput::Guess('C'));
        assert_eq!(
            HangmanGame::parse_command(&session, "CA"),
            HangmanInput::Malformed("CA".into())
        );
    }

    #[test]
    fn multi_char_uppercase_is_not_guessed() {
        let mut session = HangmanSession::with_secret("STRAẞE").unwrap();
        assert_eq!(HangmanGame::parse_command(&session, "ß"), HangmanInput::Malformed("ß".into()));
        assert_eq!(HangmanGame::parse_command(&session, "ẞ"), HangmanInput::Guess('ẞ'));

        submit(&mut session, "ß");
        assert_eq!(session.message, INVALID_INPUT);
        assert!(session.engine.correct_letters().is_empty());
    }

    #[test]
    fn new_game_asks_for_secret() {
        let session = HangmanGame::new_game();
        assert_eq!(session.phase, Phase::SecretEntry);
        assert_eq!(session.message, PROMPT_SECRET);
    }

    #[test]
    fn rejected_guess_keeps_state() {
        let mut session = HangmanSession::with_secret("CAT").unwrap();
        submit(&mut session, "1");
        assert_eq!(session.message, INVALID_INPUT);
        assert_eq!(session.engine.remaining_guesses_left(), 6);
    }

    #[test]
    fn winning_finishes_and_ignores_further_input() {
        let mut session = HangmanSession::with_secret("CAT").unwrap();
        for line in ["c", "a", "t"] {
            submit(&mut session, line);
        }
        assert_eq!(session.phase, Phase::Finished(RoundStatus::Won));
        assert!(session.message.starts_with("YOU WIN!"));

        submit(&mut session, "z");
        assert!(session.engine.incorrect_letters().is_empty());
    }

    #[test]
    fn losing_reveals_the_word() {
        let mut session = HangmanSession::with_secret("DOG").unwrap();
        for line in ["X", "Y", "Z", "Q", "W", "V"] {
            submit(&mut session, line);
        }
        assert_eq!(session.phase, Phase::Finished(RoundStatus::Lost));
        assert!(session.message.contains("DOG"));
        assert_eq!(session.summary().as_deref(), Some("GAME OVER! The word was 'DOG'."));
    }

    #[test]
    fn preset_secret_is_validated() {
        assert!(HangmanSession::with_secret("not valid").is_err());
    }
}
