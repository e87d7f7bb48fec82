use oradoku_core::{DigitGrid, Position};
use oradoku_game::Game;

/// Greeting shown before any puzzle is loaded.
pub(crate) const GREETING: &str = "Generate a new game or drop a photo to start!";

// AppState holds the single source of truth the UI renders from: the game
// session, the selection, and the status message. It is mutated only by
// the action handler.
#[derive(Debug)]
pub(crate) struct AppState {
    pub(crate) game: Game,
    pub(crate) selected_cell: Option<Position>,
    pub(crate) status: String,
}

impl AppState {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            game: Game::new(&DigitGrid::new()),
            selected_cell: None,
            status: GREETING.to_string(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
