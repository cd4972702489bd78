use ratatui::{
    layout::{Constraint, Direction, Layout},
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::core::game::GameRenderer;
use super::game::RoundStatus;
use super::session::{HangmanSession, Phase};

/// Gallows with 0 through 6 body parts: head, body, left arm, right arm,
/// left leg, right leg.
const GALLOWS: [[&str; 7]; 7] = [
    ["  +----+  ", "  |    |  ", "       |  ", "       |  ", "       |  ", "       |  ", "=========="],
    ["  +----+  ", "  |    |  ", "  O    |  ", "       |  ", "       |  ", "       |  ", "=========="],
    ["  +----+  ", "  |    |  ", "  O    |  ", "  |    |  ", "       |  ", "       |  ", "=========="],
    ["  +----+  ", "  |    |  ", "  O    |  ", " /|    |  ", "       |  ", "       |  ", "=========="],
    ["  +----+  ", "  |    |  ", "  O    |  ", " /|\\   |  ", "       |  ", "       |  ", "=========="],
    ["  +----+  ", "  |    |  ", "  O    |  ", " /|\\   |  ", " /     |  ", "       |  ", "=========="],
    ["  +----+  ", "  |    |  ", "  O    |  ", " /|\\   |  ", " / \\   |  ", "       |  ", "=========="],
];

#[derive(Debug)]
pub struct HangmanRenderer;

impl GameRenderer<HangmanSession> for HangmanRenderer {
    fn render(frame: &mut Frame, state: &HangmanSession, input: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(9),    // Gallows + word
                Constraint::Length(3), // Wrong letters
                Constraint::Length(3), // Status
                Constraint::Length(3), // Input
            ])
            .split(frame.area());

        let header = Paragraph::new("HANGMAN")
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        let board = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(16), Constraint::Min(0)])
            .split(chunks[1]);

        frame.render_widget(Self::gallows_widget(state), board[0]);
        frame.render_widget(Self::word_widget(state), board[1]);

        let wrong: String = state
            .engine
            .incorrect_letters()
            .iter()
            .map(|c| format!("{} ", c))
            .collect();
        let wrong_widget = Paragraph::new(wrong)
            .block(Block::default().borders(Borders::ALL).title("Wrong letters"))
            .style(Style::default().fg(Color::Red));
        frame.render_widget(wrong_widget, chunks[2]);

        let status_color = match state.phase {
            Phase::Finished(RoundStatus::Won) => Color::Green,
            Phase::Finished(_) => Color::Red,
            _ => Color::Yellow,
        };
        let status = Paragraph::new(state.message.as_str())
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .style(Style::default().fg(status_color));
        frame.render_widget(status, chunks[3]);

        let title = match state.phase {
            Phase::SecretEntry => "Secret word (Enter to confirm, Esc to quit)",
            Phase::Guessing => "Guess (Enter to confirm, Esc to quit)",
            Phase::Finished(_) => "Esc to quit",
        };
        let input_widget = Paragraph::new(input)
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(Color::White));
        frame.render_widget(input_widget, chunks[4]);
    }
}

impl HangmanRenderer {
    fn gallows_widget(state: &HangmanSession) -> Paragraph<'static> {
        let parts = usize::from(state.engine.wrong_guess_count()).min(GALLOWS.len() - 1);
        let lines: Vec<Line> = GALLOWS[parts].iter().map(|l| Line::from(*l)).collect();
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL))
    }

    fn word_widget(state: &HangmanSession) -> Paragraph<'static> {
        let slots = match state.phase {
            Phase::SecretEntry => String::new(),
            // Reveal the whole word once the round is over
            Phase::Finished(_) => Self::spaced(state.engine.secret_word().unwrap_or_default()),
            Phase::Guessing => Self::spaced(&state.engine.masked_word()),
        };
        let remaining = state.engine.remaining_guesses_left();

        Paragraph::new(vec![
            Line::from(""),
            Line::from(slots).style(Style::default().add_modifier(Modifier::BOLD)),
            Line::from(""),
            Line::from(format!("Guesses left: {}", remaining)),
        ])
        .block(Block::default().borders(Borders::ALL).title("Word"))
        .alignment(Alignment::Center)
    }

    fn spaced(word: &str) -> String {
        word.chars().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(state: &HangmanSession, input: &str) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal
            .draw(|f| HangmanRenderer::render(f, state, input))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn masked_word_and_prompt_are_shown() {
        let mut session = HangmanSession::with_secret("CAT").unwrap();
        session.engine.submit_guess('A').unwrap();
        let screen = draw(&session, "T");

        assert!(screen.contains("_ A _"));
        assert!(screen.contains("Guesses left: 6"));
        assert!(!screen.contains("CAT"));
    }

    #[test]
    fn wrong_guesses_add_body_parts() {
        let mut session = HangmanSession::with_secret("CAT").unwrap();
        assert!(!draw(&session, "").contains('O'));

        session.engine.submit_guess('X').unwrap();
        let screen = draw(&session, "");
        assert!(screen.contains("  O    |"));
        assert!(screen.contains("X "));
    }

    #[test]
    fn gallows_stages_grow_monotonically() {
        let drawn: Vec<usize> = GALLOWS
            .iter()
            .map(|stage| stage.iter().map(|l| l.chars().filter(|c| "O|/\\".contains(*c)).count()).sum())
            .collect();
        assert!(drawn.windows(2).all(|w| w[0] < w[1]));
    }
}
