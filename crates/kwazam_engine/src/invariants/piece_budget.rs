//! Piece budget: the armies never grow.

use super::Invariant;
use crate::state::{GameState, MAX_PIECES};

/// Invariant: at most twenty pieces on the board.
///
/// Placement already refuses a twenty-first piece, so any state built through
/// [`GameState::place`] satisfies this; moves can only keep or shrink it.
pub struct PieceBudgetInvariant;

impl Invariant<GameState> for PieceBudgetInvariant {
    fn holds(state: &GameState) -> bool {
        state.pieces().len() <= MAX_PIECES
    }

    fn description() -> &'static str {
        "At most twenty pieces on the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Square;
    use crate::setup::initial_state;
    use crate::types::{PieceKind, Team};

    #[test]
    fn test_opening_holds() {
        assert!(PieceBudgetInvariant::holds(&initial_state()));
    }

    #[test]
    fn test_extra_saus_are_within_budget() {
        let mut state = GameState::empty(Team::Red);
        state.place(PieceKind::Sau, Team::Red, Square::new(2, 7)).unwrap();
        state.place(PieceKind::Sau, Team::Red, Square::new(3, 7)).unwrap();
        assert!(PieceBudgetInvariant::holds(&state));
    }

    #[test]
    fn test_overfull_board_violates() {
        let mut crowded = initial_state();
        let extra = crowded.pieces()[0];
        crowded.pieces_mut().push(extra);
        assert!(!PieceBudgetInvariant::holds(&crowded));
    }
}
