//! Contract-based move validation.
//!
//! Each precondition is checked independently; [`LegalMove`] composes them
//! in a fixed order and reports the first failure.

use crate::action::{Move, MoveError};
use crate::invariants::{InvariantSet, KwazamInvariants};
use crate::rules;
use crate::state::GameState;
use crate::types::Occupancy;
use tracing::{instrument, trace};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the mover belongs to the side on move.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Checks the precondition.
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        if mov.piece().team() != state.to_move() {
            Err(MoveError::NotYourTurn(mov.piece().team()))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the destination lies on the board.
pub struct WithinBoard;

impl WithinBoard {
    /// Checks the precondition.
    pub fn check(mov: &Move) -> Result<(), MoveError> {
        if mov.destination().in_bounds() {
            Ok(())
        } else {
            Err(MoveError::OutOfBounds(mov.destination()))
        }
    }
}

/// Precondition: the destination does not hold one of the mover's own pieces.
pub struct NotFriendlyCapture;

impl NotFriendlyCapture {
    /// Checks the precondition.
    pub fn check(mov: &Move) -> Result<(), MoveError> {
        match mov.captured() {
            Some(captured) if captured.team() == mov.piece().team() => {
                Err(MoveError::FriendlyCapture(mov.destination()))
            }
            _ => Ok(()),
        }
    }
}

/// Precondition: the mover's kind can travel this way.
pub struct ShapeAllows;

impl ShapeAllows {
    /// Checks the precondition.
    pub fn check(mov: &Move) -> Result<(), MoveError> {
        if rules::is_legal_shape(mov.piece(), mov.destination()) {
            Ok(())
        } else {
            Err(MoveError::IllegalShape {
                kind: mov.piece().kind(),
                from: mov.from(),
                to: mov.destination(),
            })
        }
    }
}

/// Precondition: nothing stands between source and destination.
pub struct PathClear;

impl PathClear {
    /// Checks the precondition.
    pub fn check<B>(mov: &Move, board: &B) -> Result<(), MoveError>
    where
        B: Occupancy + ?Sized,
    {
        if rules::is_path_blocked(mov.piece(), mov.destination(), board) {
            Err(MoveError::PathBlocked {
                kind: mov.piece().kind(),
                from: mov.from(),
                to: mov.destination(),
            })
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: all five checks, first failure wins.
///
/// No notion of leaving one's own Sau exposed exists in this game.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(level = "trace", skip(state), fields(mov = %mov))]
    pub fn check(mov: &Move, state: &GameState) -> Result<(), MoveError> {
        PlayersTurn::check(mov, state)?;
        WithinBoard::check(mov)?;
        NotFriendlyCapture::check(mov)?;
        ShapeAllows::check(mov)?;
        PathClear::check(mov, state)?;
        trace!("Move is legal");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions: the game is running and [`LegalMove`] holds.
/// Postconditions: every invariant in [`KwazamInvariants`] holds.
pub struct MoveContract;

impl Contract<GameState, Move> for MoveContract {
    fn pre(state: &GameState, action: &Move) -> Result<(), MoveError> {
        if state.is_game_over() {
            return Err(MoveError::GameOver);
        }
        LegalMove::check(action, state)
    }

    fn post(_before: &GameState, after: &GameState) -> Result<(), MoveError> {
        KwazamInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Square;
    use crate::setup::initial_state;
    use crate::types::{PieceKind, Team};

    fn mov(state: &GameState, from: (i32, i32), to: (i32, i32)) -> Move {
        let piece = state.piece_at(from.into()).copied().unwrap();
        Move::new(state, &piece, to.into())
    }

    #[test]
    fn test_opening_ram_step_is_legal() {
        let state = initial_state();
        assert!(MoveContract::pre(&state, &mov(&state, (0, 6), (0, 5))).is_ok());
    }

    #[test]
    fn test_wrong_turn_checked_first() {
        let state = initial_state();
        // Blue's Ram onto a Blue piece: turn is reported before anything else.
        let action = mov(&state, (0, 1), (0, 0));
        assert_eq!(
            LegalMove::check(&action, &state),
            Err(MoveError::NotYourTurn(Team::Blue))
        );
    }

    #[test]
    fn test_out_of_bounds() {
        let state = initial_state();
        let action = mov(&state, (4, 7), (5, 7));
        assert_eq!(
            LegalMove::check(&action, &state),
            Err(MoveError::OutOfBounds(Square::new(5, 7)))
        );
    }

    #[test]
    fn test_friendly_capture() {
        let state = initial_state();
        let action = mov(&state, (4, 7), (4, 6));
        assert_eq!(
            LegalMove::check(&action, &state),
            Err(MoveError::FriendlyCapture(Square::new(4, 6)))
        );
        // Staying put is a friendly capture of oneself.
        let action = mov(&state, (4, 7), (4, 7));
        assert_eq!(
            LegalMove::check(&action, &state),
            Err(MoveError::FriendlyCapture(Square::new(4, 7)))
        );
    }

    #[test]
    fn test_illegal_shape() {
        let state = initial_state();
        let action = mov(&state, (2, 7), (2, 5));
        assert!(matches!(
            LegalMove::check(&action, &state),
            Err(MoveError::IllegalShape { kind: PieceKind::Sau, .. })
        ));
    }

    #[test]
    fn test_blocked_path() {
        let state = initial_state();
        let action = mov(&state, (4, 7), (4, 3));
        assert!(matches!(
            LegalMove::check(&action, &state),
            Err(MoveError::PathBlocked { kind: PieceKind::Tor, .. })
        ));
    }

    #[test]
    fn test_game_over_rejects_everything() {
        let mut state = GameState::empty(Team::Red);
        let tor = state.place(PieceKind::Tor, Team::Red, Square::new(0, 7)).unwrap();
        let tor = *state.piece(tor).unwrap();
        state.finish(Team::Red);
        let action = Move::new(&state, &tor, Square::new(0, 6));
        assert_eq!(MoveContract::pre(&state, &action), Err(MoveError::GameOver));
    }

    #[test]
    fn test_postcondition_holds_for_opening() {
        let state = initial_state();
        assert!(MoveContract::post(&state, &state).is_ok());
    }
}
