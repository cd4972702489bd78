use std::marker::PhantomData;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::core::game::{GameRenderer, TurnGame};

/// Longest input line the engine will buffer.
const MAX_INPUT_LEN: usize = 64;

/// What a key press asks the loop to do.
#[derive(Debug, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Submit(String),
    Edited,
    Ignored,
}

/// Drives one game in the terminal: draws, reads keys, forwards submitted lines.
pub struct TerminalEngine<G: TurnGame, R: GameRenderer<G::State>> {
    state: G::State,
    input: String,
    render_interval: Duration,
    _phantom: PhantomData<R>,
}

impl<G, R> TerminalEngine<G, R>
where
    G: TurnGame,
    R: GameRenderer<G::State>,
{
    pub fn new(state: G::State, render_interval: Duration) -> Self {
        Self {
            state,
            input: String::new(),
            render_interval,
            _phantom: PhantomData,
        }
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    /// Runs until the player presses Esc or the terminal event stream ends.
    /// Returns the final state so the caller can report on it.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<G::State> {
        info!(game = G::NAME, "engine started");
        let mut events = EventStream::new();
        let mut render_timer = tokio::time::interval(self.render_interval);

        loop {
            tokio::select! {
                _ = render_timer.tick() => {
                    let shown = self.displayed_input();
                    terminal
                        .draw(|f| R::render(f, &self.state, &shown))
                        .context("failed to draw frame")?;
                }

                maybe_event = events.next() => {
                    let Some(event) = maybe_event else { break };
                    let event = event.context("failed to read terminal event")?;
                    if let Event::Key(key) = event {
                        if self.on_key(key) == KeyAction::Quit {
                            break;
                        }
                        let shown = self.displayed_input();
                        terminal
                            .draw(|f| R::render(f, &self.state, &shown))
                            .context("failed to draw frame")?;
                    }
                }
            }
        }

        info!(game = G::NAME, "engine stopped");
        Ok(self.state)
    }

    fn displayed_input(&self) -> String {
        if G::hide_input(&self.state) {
            "*".repeat(self.input.chars().count())
        } else {
            self.input.clone()
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::Ignored;
        }

        let modified = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

        let action = match key.code {
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            _ if G::is_finished(&self.state) => KeyAction::Ignored,
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.input);
                if line.trim().is_empty() {
                    KeyAction::Ignored
                } else {
                    KeyAction::Submit(line)
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
                KeyAction::Edited
            }
            KeyCode::Char(c) if !modified && self.input.chars().count() < MAX_INPUT_LEN => {
                self.input.push(c);
                KeyAction::Edited
            }
            _ => KeyAction::Ignored,
        };

        if let KeyAction::Submit(line) = &action {
            debug!(len = line.chars().count(), "input line submitted");
            let input = G::parse_command(&self.state, line);
            G::handle_input(&mut self.state, input);
        }
        action
    }
}
