use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};

use crate::games::hangman::HangmanEngine;

/// Redraw period while waiting for key presses.
pub const DEFAULT_RENDER_INTERVAL: Duration = Duration::from_millis(100);

/// Where the secret word comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    /// The first player types it in at the start
    Prompt,
    /// Given on the command line
    Preset(String),
    /// Picked from the built-in word list
    Random,
}

impl SecretSource {
    /// Short name for logs; never includes the word itself.
    pub fn label(&self) -> &'static str {
        match self {
            SecretSource::Prompt => "prompt",
            SecretSource::Preset(_) => "preset",
            SecretSource::Random => "random",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log file; logs are discarded when unset since the UI owns the terminal
    pub file: Option<PathBuf>,
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { file: None, level: "info".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub secret: SecretSource,
    pub render_interval: Duration,
}

impl Config {
    /// Resolves the play options. A preset word must already be a valid secret.
    pub fn new(word: Option<String>, random: bool) -> Result<Self> {
        let secret = match (word, random) {
            (Some(_), true) => bail!("--word and --random cannot be used together"),
            (Some(word), false) => {
                if !HangmanEngine::is_valid_secret_word(&word) {
                    bail!("'{}' is not a valid secret word: use one word of capital letters", word);
                }
                SecretSource::Preset(word)
            }
            (None, true) => SecretSource::Random,
            (None, false) => SecretSource::Prompt,
        };

        Ok(Self { secret, render_interval: DEFAULT_RENDER_INTERVAL })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_prompt() {
        let config = Config::new(None, false).unwrap();
        assert_eq!(config.secret, SecretSource::Prompt);
        assert_eq!(config.render_interval, DEFAULT_RENDER_INTERVAL);
    }

    #[test]
    fn preset_word_is_validated() {
        assert_eq!(
            Config::new(Some("RUST".into()), false).unwrap().secret,
            SecretSource::Preset("RUST".into())
        );
        assert!(Config::new(Some("rust".into()), false).is_err());
        assert!(Config::new(Some("TWO WORDS".into()), false).is_err());
    }

    #[test]
    fn word_and_random_conflict() {
        assert!(Config::new(Some("RUST".into()), true).is_err());
        assert_eq!(Config::new(None, true).unwrap().secret, SecretSource::Random);
    }
}
