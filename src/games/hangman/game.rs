use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

/// Wrong guesses allowed per round.
pub const MAX_WRONG_GUESSES: u8 = 6;

/// Why the engine refused an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HangmanError {
    /// Empty, contains whitespace or non-letters, or has lowercase letters.
    InvalidSecretWord(String),
    /// Not a letter, or a letter already marked incorrect.
    InvalidGuess(char),
    /// A guess arrived before any secret word was accepted.
    NoActiveRound,
    /// A stored round breaks one of the round invariants.
    InvalidSnapshot(String),
}

impl fmt::Display for HangmanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HangmanError::InvalidSecretWord(word) => {
                write!(f, "'{}' is not a valid secret word (one word, capital letters only)", word)
            }
            HangmanError::InvalidGuess(ch) => {
                write!(f, "'{}' is not a valid guess (a letter not already guessed wrong)", ch)
            }
            HangmanError::NoActiveRound => write!(f, "no round in progress"),
            HangmanError::InvalidSnapshot(reason) => write!(f, "invalid round snapshot: {}", reason),
        }
    }
}

impl std::error::Error for HangmanError {}

/// Letters only: upper, lower, title, modifier and other letters.
/// Circled letters and letter-like numerals are not letters.
pub fn is_letter(c: char) -> bool {
    c.general_category_group() == GeneralCategoryGroup::Letter
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    Correct,
    Incorrect,
    /// The letter was already recorded as correct; nothing changed.
    Redundant,
}

/// What a renderer needs to update after a guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    pub outcome: GuessOutcome,
    /// Character indices of the secret word equal to the guess.
    pub matched_positions: BTreeSet<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

/// Serialized form of a [`Round`]; checked before it becomes one.
#[derive(Debug, Deserialize)]
struct RoundSnapshot {
    secret_word: String,
    remaining_guesses: u8,
    correct_letters: BTreeSet<char>,
    incorrect_letters: Vec<char>,
}

impl TryFrom<RoundSnapshot> for Round {
    type Error = HangmanError;

    fn try_from(snapshot: RoundSnapshot) -> Result<Self, Self::Error> {
        let invalid = |reason: String| -> Result<Self, HangmanError> {
            Err(HangmanError::InvalidSnapshot(reason))
        };
        let word = &snapshot.secret_word;

        if !HangmanEngine::is_valid_secret_word(word) {
            return invalid(format!("'{}' is not a valid secret word", word));
        }
        if let Some(c) = snapshot.correct_letters.iter().find(|c| !word.contains(**c)) {
            return invalid(format!("correct letter '{}' is not in the word", c));
        }
        let mut seen = BTreeSet::new();
        for &c in &snapshot.incorrect_letters {
            if !is_letter(c) || word.contains(c) || !seen.insert(c) {
                return invalid(format!("'{}' cannot be an incorrect letter", c));
            }
        }
        let expected = usize::from(MAX_WRONG_GUESSES).saturating_sub(snapshot.incorrect_letters.len());
        if usize::from(snapshot.remaining_guesses) != expected {
            return invalid(format!(
                "{} remaining guesses after {} wrong letters",
                snapshot.remaining_guesses,
                snapshot.incorrect_letters.len()
            ));
        }

        Ok(Self {
            secret_word: snapshot.secret_word,
            remaining_guesses: snapshot.remaining_guesses,
            correct_letters: snapshot.correct_letters,
            incorrect_letters: snapshot.incorrect_letters,
        })
    }
}

/// One playthrough, from secret word to win or loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoundSnapshot")]
pub struct Round {
    secret_word: String,
    remaining_guesses: u8,
    correct_letters: BTreeSet<char>,
    incorrect_letters: Vec<char>,
}

impl Round {
    fn new(secret_word: &str) -> Self {
        Self {
            secret_word: secret_word.to_string(),
            remaining_guesses: MAX_WRONG_GUESSES,
            correct_letters: BTreeSet::new(),
            incorrect_letters: Vec::new(),
        }
    }

    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    pub fn remaining_guesses(&self) -> u8 {
        self.remaining_guesses
    }

    pub fn correct_letters(&self) -> &BTreeSet<char> {
        &self.correct_letters
    }

    pub fn incorrect_letters(&self) -> &[char] {
        &self.incorrect_letters
    }

    /// Spends one wrong guess; never goes below zero.
    pub fn decrement_guesses(&mut self) {
        self.remaining_guesses = self.remaining_guesses.saturating_sub(1);
    }

    /// Unique letters in the secret word. Recomputed on every call.
    pub fn distinct_letter_count(&self) -> usize {
        let ascii = ('A'..='Z').filter(|c| self.secret_word.contains(*c)).count();
        let other: BTreeSet<char> = self
            .secret_word
            .chars()
            .filter(|c| !c.is_ascii_uppercase())
            .collect();
        ascii + other.len()
    }

    fn positions_of(&self, ch: char) -> BTreeSet<usize> {
        self.secret_word
            .chars()
            .enumerate()
            .filter(|(_, c)| *c == ch)
            .map(|(i, _)| i)
            .collect()
    }

    fn apply_guess(&mut self, ch: char) -> GuessResult {
        let matched_positions = self.positions_of(ch);

        let outcome = if matched_positions.is_empty() {
            if !self.incorrect_letters.contains(&ch) {
                self.incorrect_letters.push(ch);
            }
            self.decrement_guesses();
            GuessOutcome::Incorrect
        } else if self.correct_letters.insert(ch) {
            GuessOutcome::Correct
        } else {
            GuessOutcome::Redundant
        };

        GuessResult { outcome, matched_positions }
    }

    pub fn is_won(&self) -> bool {
        self.correct_letters.len() == self.distinct_letter_count()
    }

    pub fn is_lost(&self) -> bool {
        self.remaining_guesses == 0 && !self.is_won()
    }

    pub fn status(&self) -> RoundStatus {
        if self.is_won() {
            RoundStatus::Won
        } else if self.is_lost() {
            RoundStatus::Lost
        } else {
            RoundStatus::InProgress
        }
    }

    pub fn masked_word(&self) -> String {
        self.secret_word
            .chars()
            .map(|c| if self.correct_letters.contains(&c) { c } else { '_' })
            .collect()
    }
}

/// Game-state engine: validates input, owns the current round, answers queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HangmanEngine {
    round: Option<Round>,
}

impl HangmanEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-empty, no whitespace, letters only, and already upper case.
    pub fn is_valid_secret_word(input: &str) -> bool {
        !input.is_empty()
            && input.chars().all(is_letter)
            && input == input.to_uppercase()
    }

    /// Replaces any previous round. The engine is left untouched on error.
    pub fn start_round(&mut self, word: &str) -> Result<(), HangmanError> {
        if !Self::is_valid_secret_word(word) {
            return Err(HangmanError::InvalidSecretWord(word.to_string()));
        }
        self.round = Some(Round::new(word));
        Ok(())
    }

    /// A letter that has not already been guessed wrong.
    ///
    /// Letters already guessed correctly still pass; submitting them again
    /// yields [`GuessOutcome::Redundant`].
    pub fn is_valid_guess_char(&self, ch: char) -> bool {
        is_letter(ch) && !self.incorrect_letters().contains(&ch)
    }

    pub fn submit_guess(&mut self, ch: char) -> Result<GuessResult, HangmanError> {
        if self.round.is_none() {
            return Err(HangmanError::NoActiveRound);
        }
        if !self.is_valid_guess_char(ch) {
            return Err(HangmanError::InvalidGuess(ch));
        }
        let round = self.round.as_mut().ok_or(HangmanError::NoActiveRound)?;
        Ok(round.apply_guess(ch))
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn secret_word(&self) -> Option<&str> {
        self.round.as_ref().map(Round::secret_word)
    }

    pub fn distinct_letter_count(&self) -> usize {
        self.round.as_ref().map_or(0, Round::distinct_letter_count)
    }

    pub fn remaining_guesses_left(&self) -> u8 {
        self.round.as_ref().map_or(MAX_WRONG_GUESSES, Round::remaining_guesses)
    }

    /// Body parts to draw: 0 at the start of a round, 6 when lost.
    pub fn wrong_guess_count(&self) -> u8 {
        MAX_WRONG_GUESSES.saturating_sub(self.remaining_guesses_left())
    }

    pub fn correct_letters(&self) -> BTreeSet<char> {
        self.round
            .as_ref()
            .map(|r| r.correct_letters().clone())
            .unwrap_or_default()
    }

    pub fn incorrect_letters(&self) -> &[char] {
        self.round.as_ref().map(Round::incorrect_letters).unwrap_or(&[])
    }

    pub fn is_won(&self) -> bool {
        self.round.as_ref().is_some_and(Round::is_won)
    }

    pub fn is_lost(&self) -> bool {
        self.round.as_ref().is_some_and(Round::is_lost)
    }

    pub fn status(&self) -> RoundStatus {
        self.round.as_ref().map_or(RoundStatus::InProgress, Round::status)
    }

    pub fn masked_word(&self) -> String {
        self.round.as_ref().map(Round::masked_word).unwrap_or_default()
    }
}
