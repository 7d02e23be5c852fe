//! Terminal board: a finished game has an empty board.

use super::Invariant;
use crate::state::GameState;

/// Invariant: a won game has no pieces left and a recorded winner.
pub struct TerminalBoardInvariant;

impl Invariant<GameState> for TerminalBoardInvariant {
    fn holds(state: &GameState) -> bool {
        !state.is_game_over() || (state.pieces().is_empty() && state.winner().is_some())
    }

    fn description() -> &'static str {
        "A finished game has a winner and an empty board"
    }
}
