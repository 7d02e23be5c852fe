//! Unique occupancy: every piece on the board, no two on one square.

use super::Invariant;
use crate::state::GameState;
use std::collections::HashSet;

/// Invariant: no two pieces share a square and none stands off the board.
pub struct UniqueOccupancyInvariant;

impl Invariant<GameState> for UniqueOccupancyInvariant {
    fn holds(state: &GameState) -> bool {
        let mut seen = HashSet::new();
        state
            .pieces()
            .iter()
            .all(|piece| piece.square().in_bounds() && seen.insert(piece.square()))
    }

    fn description() -> &'static str {
        "Each square holds at most one piece, all pieces on the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Square;
    use crate::setup::initial_state;

    #[test]
    fn test_opening_holds() {
        assert!(UniqueOccupancyInvariant::holds(&initial_state()));
    }

    #[test]
    fn test_stacked_pieces_violate() {
        let mut state = initial_state();
        let id = state.pieces()[3].id();
        let target = state.pieces()[4].square();
        state.piece_mut(id).unwrap().square = target;
        assert!(!UniqueOccupancyInvariant::holds(&state));
    }

    #[test]
    fn test_off_board_violates() {
        let mut state = initial_state();
        let id = state.pieces()[0].id();
        state.piece_mut(id).unwrap().square = Square::new(0, 8);
        assert!(!UniqueOccupancyInvariant::holds(&state));
    }
}
