//! First-class invariants over the game state.
//!
//! Invariants are logical properties that must hold after every applied
//! move. They are checked in debug builds and can be tested independently.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        collect(violations)
    }
}

pub mod piece_budget;
pub mod terminal_board;
pub mod unique_occupancy;

pub use piece_budget::PieceBudgetInvariant;
pub use terminal_board::TerminalBoardInvariant;
pub use unique_occupancy::UniqueOccupancyInvariant;

/// All Kwazam invariants as a composable set.
pub type KwazamInvariants = (
    UniqueOccupancyInvariant,
    TerminalBoardInvariant,
    PieceBudgetInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Square;
    use crate::setup::initial_state;
    use crate::types::Team;

    #[test]
    fn test_invariant_set_holds_for_opening() {
        assert!(KwazamInvariants::check_all(&initial_state()).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut state = initial_state();
        // Corrupt the board: two pieces on one square, then end the game
        // without clearing it.
        let stray = state.pieces()[0].id();
        state.piece_mut(stray).unwrap().square = Square::new(0, 1);
        let mut finished = state.clone();
        finished.finish(Team::Red);
        for piece in state.pieces() {
            finished.pieces_mut().push(*piece);
        }

        let violations = KwazamInvariants::check_all(&finished).unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}
