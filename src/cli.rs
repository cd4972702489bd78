use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::{Config, LogConfig, SecretSource};
use crate::core::engine::TerminalEngine;
use crate::core::game::TurnGame;
use crate::games::hangman::{words, HangmanEngine, HangmanGame, HangmanRenderer, HangmanSession};

#[derive(Parser, Debug)]
#[command(name = "hangterm")]
#[command(about = "Two-player hangman in the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. "debug")
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Play a round (the default)
    Play {
        /// Secret word to guess; skips the secret entry screen
        #[arg(short, long, conflicts_with = "random")]
        word: Option<String>,

        /// Pick the secret word from the built-in list
        #[arg(short, long)]
        random: bool,
    },
    /// Check whether a word is accepted as a secret word
    Check {
        word: String,
    },
    /// List the built-in words
    Words,
}

impl Cli {
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            file: self.log_file.clone(),
            level: self.log_level.clone(),
        }
    }
}

pub async fn run_cli() -> Result<ExitCode> {
    let cli = Cli::parse();
    crate::logging::init(&cli.log_config())?;

    match cli.command.unwrap_or(Commands::Play { word: None, random: false }) {
        Commands::Play { word, random } => {
            let config = Config::new(word, random)?;
            play(config).await?;
        }

        Commands::Check { word } => {
            if !check_word(&word, &mut io::stdout().lock())? {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Words => list_words(&mut io::stdout().lock())?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Reports whether `word` is accepted as a secret word and returns the verdict.
pub fn check_word(word: &str, out: &mut impl Write) -> Result<bool> {
    let valid = HangmanEngine::is_valid_secret_word(word);
    if valid {
        writeln!(out, "'{}' is a valid secret word", word)?;
    } else {
        writeln!(out, "'{}' is not valid: use one word of capital letters", word)?;
    }
    Ok(valid)
}

pub fn list_words(out: &mut impl Write) -> Result<()> {
    for word in words::WORDS {
        writeln!(out, "{}", word)?;
    }
    Ok(())
}

/// Builds the opening session for the configured secret source.
pub fn initial_session(config: &Config) -> Result<HangmanSession> {
    let session = match &config.secret {
        SecretSource::Prompt => HangmanGame::new_game(),
        SecretSource::Preset(word) => HangmanSession::with_secret(word)?,
        SecretSource::Random => HangmanSession::with_secret(words::random_word())?,
    };
    Ok(session)
}

async fn play(config: Config) -> Result<()> {
    let session = initial_session(&config)?;
    info!(game = HangmanGame::NAME, secret = config.secret.label(), "starting game");

    let terminal = ratatui::init();
    let engine = TerminalEngine::<HangmanGame, HangmanRenderer>::new(session, config.render_interval);
    let result = engine.run(terminal).await;
    ratatui::restore();

    let session = result.context("terminal game loop failed")?;
    if let Some(summary) = session.summary() {
        println!("{}", summary);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_play() {
        let cli = Cli::try_parse_from(["hangterm"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn play_flags_parse() {
        let cli = Cli::try_parse_from(["hangterm", "play", "--word", "RUST", "--log-file", "x.log"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Play { word: Some("RUST".into()), random: false }));
        assert_eq!(cli.log_config().file, Some(PathBuf::from("x.log")));
    }

    #[test]
    fn word_conflicts_with_random() {
        assert!(Cli::try_parse_from(["hangterm", "play", "-w", "RUST", "-r"]).is_err());
    }

    #[test]
    fn check_reports_validity() {
        let mut out = Vec::new();
        assert!(check_word("RUST", &mut out).unwrap());
        assert!(!check_word("Rust", &mut out).unwrap());
        assert!(!check_word("ⒶⒷ", &mut out).unwrap());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("'RUST' is a valid secret word"));
        assert!(text.contains("'Rust' is not valid"));
    }

    #[test]
    fn words_lists_every_built_in_word() {
        let mut out = Vec::new();
        list_words(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), words::WORDS);
    }

    #[test]
    fn initial_session_follows_secret_source() {
        let prompt = initial_session(&Config::new(None, false).unwrap()).unwrap();
        assert!(!prompt.is_finished());
        assert_eq!(prompt.engine.secret_word(), None);

        let preset = initial_session(&Config::new(Some("RUST".into()), false).unwrap()).unwrap();
        assert_eq!(preset.engine.secret_word(), Some("RUST"));

        let random = initial_session(&Config::new(None, true).unwrap()).unwrap();
        let word = random.engine.secret_word().unwrap();
        assert!(words::WORDS.contains(&word));
    }
}
