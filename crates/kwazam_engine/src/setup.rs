//! Starting position.

use crate::geometry::{COLUMNS, Square};
use crate::state::{GameState, PlacementError};
use crate::types::{PieceKind, Team};
use tracing::{info, instrument};

/// Back-rank pieces for Red, seen from Red's side (home rank is row 7).
///
/// Tor and Xor are deliberately not mirror images of each other between the
/// two sides: Red's Tor is in column 4, Blue's in column 0.
const RED_BACK_RANK: [(PieceKind, i32, i32); 5] = [
    (PieceKind::Biz, 1, 7),
    (PieceKind::Biz, 3, 7),
    (PieceKind::Tor, 4, 7),
    (PieceKind::Xor, 0, 7),
    (PieceKind::Sau, 2, 7),
];

/// Builds the starting position with Red to move.
#[instrument]
pub fn initial_state() -> GameState {
    let mut state = GameState::empty(Team::Red);
    // The layout is fixed and fits the board; placement cannot fail.
    if let Err(err) = populate(&mut state) {
        unreachable!("starting layout is invalid: {err}");
    }
    info!(pieces = state.pieces().len(), "Starting position ready");
    state
}

fn populate(state: &mut GameState) -> Result<(), PlacementError> {
    for column in 0..COLUMNS {
        state.place(PieceKind::Ram, Team::Red, Square::new(column, 6))?;
        state.place(PieceKind::Ram, Team::Blue, Square::new(column, 1))?;
    }
    for (kind, column, row) in RED_BACK_RANK {
        let square = Square::new(column, row);
        state.place(kind, Team::Red, square)?;
        state.place(kind, Team::Blue, square.mirrored())?;
    }
    Ok(())
}
