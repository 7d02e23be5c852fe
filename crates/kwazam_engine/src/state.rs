//! The mutable game-state aggregate.

use crate::geometry::Square;
use crate::types::{Occupancy, Piece, PieceId, PieceKind, PieceView, Team};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Upper bound on pieces in one position: both full starting armies of ten.
pub const MAX_PIECES: usize = 20;

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves may be played.
    InProgress,
    /// A Sau was captured by this team.
    Won(Team),
}

/// Reasons a piece cannot be placed on a square.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PlacementError {
    /// Square lies off the board.
    #[display("Square {} is off the board", _0)]
    OutOfBounds(Square),

    /// Another piece already stands there.
    #[display("Square {} is already occupied", _0)]
    Occupied(Square),

    /// The position already holds the maximum number of pieces.
    #[display("Position already holds the maximum of 20 pieces")]
    TooManyPieces,
}

impl std::error::Error for PlacementError {}

/// Complete game state.
///
/// Squares are always expressed in the orientation of the side to move:
/// that side's home rank is row 7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pieces: Vec<Piece>,
    to_move: Team,
    turn_count: u32,
    status: GameStatus,
    selected: Option<PieceId>,
    next_id: u16,
}

impl GameState {
    /// Creates an empty board with the given side to move.
    #[instrument]
    pub fn empty(to_move: Team) -> Self {
        Self {
            pieces: Vec::new(),
            to_move,
            turn_count: 0,
            status: GameStatus::InProgress,
            selected: None,
            next_id: 0,
        }
    }

    /// Places a new piece, returning its identity.
    ///
    /// The piece's visual flag follows the side to move, and a Ram starts
    /// heading toward row 0.
    #[instrument(skip(self))]
    pub fn place(
        &mut self,
        kind: PieceKind,
        team: Team,
        square: Square,
    ) -> Result<PieceId, PlacementError> {
        if !square.in_bounds() {
            return Err(PlacementError::OutOfBounds(square));
        }
        if self.is_occupied(square) {
            return Err(PlacementError::Occupied(square));
        }
        if self.pieces.len() >= MAX_PIECES {
            return Err(PlacementError::TooManyPieces);
        }

        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.pieces.push(Piece {
            id,
            kind,
            team,
            square,
            flipped: !self.to_move.is_red(),
            reversed: false,
        });
        debug!(%id, %kind, %team, %square, "Placed piece");
        Ok(id)
    }

    /// Returns all pieces on the board.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Returns presentation snapshots of all pieces.
    pub fn views(&self) -> Vec<PieceView> {
        self.pieces.iter().map(Piece::view).collect()
    }

    /// Looks up a piece by identity.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.id == id)
    }

    /// Returns the side to move.
    pub fn to_move(&self) -> Team {
        self.to_move
    }

    /// Returns the number of completed moves.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true once a Sau has been captured.
    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::Won(_))
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Team> {
        match self.status {
            GameStatus::Won(team) => Some(team),
            GameStatus::InProgress => None,
        }
    }

    /// Returns the selected piece, if any.
    pub fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: Option<PieceId>) {
        self.selected = selected;
    }

    #[cfg(test)]
    pub(crate) fn pieces_mut(&mut self) -> &mut Vec<Piece> {
        &mut self.pieces
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|piece| piece.id == id)
    }

    /// Removes a piece, returning it.
    pub(crate) fn remove(&mut self, id: PieceId) -> Option<Piece> {
        let index = self.pieces.iter().position(|piece| piece.id == id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.pieces.remove(index))
    }

    /// Ends the game: the board is cleared and the winner recorded.
    pub(crate) fn finish(&mut self, winner: Team) {
        self.pieces.clear();
        self.selected = None;
        self.status = GameStatus::Won(winner);
    }

    /// Hands the move to the other side and counts the completed move.
    pub(crate) fn advance_turn(&mut self) -> u32 {
        self.to_move = self.to_move.opponent();
        self.turn_count += 1;
        self.turn_count
    }

    /// Swaps every Tor for a Xor and vice versa, in place.
    pub(crate) fn alternate_roles(&mut self) {
        for piece in &mut self.pieces {
            piece.kind = piece.kind.swapped();
        }
    }

    /// Rotates the board 180° and toggles every piece's visual flag.
    pub(crate) fn flip_orientation(&mut self) {
        for piece in &mut self.pieces {
            piece.square = piece.square.mirrored();
            piece.flipped = !piece.flipped;
        }
    }

    /// Sets every visual flag to match the side to move.
    pub(crate) fn normalize_flip(&mut self) {
        let flipped = !self.to_move.is_red();
        for piece in &mut self.pieces {
            piece.flipped = flipped;
        }
    }
}

impl Occupancy for GameState {
    fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.piece_at(square)
    }
}
