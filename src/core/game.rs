/// Core game interface for terminal turn-based games

/// Main game trait that a playable game implements.
/// The terminal engine owns the input line; the game owns everything else.
pub trait TurnGame: 'static {
    /// Everything the renderer needs to draw a frame
    type State;

    /// A parsed line of player input
    type Input;

    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    /// Initialize the game state
    fn new_game() -> Self::State;

    /// Turn a submitted input line into game input. The current state decides
    /// how the line is read (e.g. a secret word vs. a single guess).
    fn parse_command(state: &Self::State, line: &str) -> Self::Input;

    /// Apply player input to the state
    fn handle_input(state: &mut Self::State, input: Self::Input);

    /// Once true, the engine stops forwarding input
    fn is_finished(state: &Self::State) -> bool;

    /// Whether the input line should be echoed as `*` characters
    fn hide_input(_state: &Self::State) -> bool {
        false
    }
}

/// Renderer trait for drawing game state using Ratatui
pub trait GameRenderer<S> {
    /// Render the current state plus the pending input line into the frame
    fn render(frame: &mut ratatui::Frame, state: &S, input: &str);
}
