//! First-class move descriptors.
//!
//! A move snapshots the mover and whatever stands on the destination at the
//! moment it is built. It performs no validation of its own; the game runs
//! it through the move contracts before applying it.

use crate::geometry::Square;
use crate::types::{Occupancy, Piece, PieceId, PieceKind, Team};
use tracing::instrument;

/// A candidate transition: one piece travelling to one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    piece: Piece,
    destination: Square,
    captured: Option<Piece>,
}

impl Move {
    /// Builds a move, recording the piece currently on the destination.
    #[instrument(level = "trace", skip(board, piece), fields(piece = %piece.id))]
    pub fn new<B>(board: &B, piece: &Piece, destination: Square) -> Self
    where
        B: Occupancy + ?Sized,
    {
        Self {
            piece: *piece,
            destination,
            captured: board.piece_at(destination).copied(),
        }
    }

    /// Returns the moving piece as it stood when the move was built.
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    /// Returns the moving piece's identity.
    pub fn piece_id(&self) -> PieceId {
        self.piece.id
    }

    /// Returns the source square.
    pub fn from(&self) -> Square {
        self.piece.square
    }

    /// Returns the destination square.
    pub fn destination(&self) -> Square {
        self.destination
    }

    /// Returns the piece on the destination, if any.
    pub fn captured(&self) -> Option<&Piece> {
        self.captured.as_ref()
    }

    /// Returns true if the destination is occupied.
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Returns true if the move takes a Sau.
    pub fn is_capture_of_royal(&self) -> bool {
        self.captured
            .is_some_and(|captured| captured.kind.is_royal())
    }

    /// Returns the mover's team when the move takes a Sau.
    pub fn winning_team(&self) -> Option<Team> {
        self.is_capture_of_royal().then_some(self.piece.team)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} -> {}",
            self.piece.team, self.piece.kind, self.piece.square, self.destination
        )?;
        if let Some(captured) = &self.captured {
            write!(f, " x{}", captured.kind)?;
        }
        Ok(())
    }
}

/// Why a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The game has ended; reset or load first.
    #[display("Game is already over")]
    GameOver,

    /// The mover belongs to the side that is not on move.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(Team),

    /// The destination lies off the board.
    #[display("Square {} is off the board", _0)]
    OutOfBounds(Square),

    /// The destination holds a piece of the mover's own team.
    #[display("Square {} holds a friendly piece", _0)]
    FriendlyCapture(Square),

    /// The piece kind cannot travel that way.
    #[display("{} cannot move from {} to {}", kind, from, to)]
    IllegalShape {
        /// Kind of the mover.
        kind: PieceKind,
        /// Source square.
        from: Square,
        /// Destination square.
        to: Square,
    },

    /// Another piece stands in the way.
    #[display("{} path from {} to {} is blocked", kind, from, to)]
    PathBlocked {
        /// Kind of the mover.
        kind: PieceKind,
        /// Source square.
        from: Square,
        /// Destination square.
        to: Square,
    },

    /// No piece with this identity is on the board.
    #[display("No piece {} on the board", _0)]
    UnknownPiece(PieceId),

    /// A move of the selection was requested with nothing selected.
    #[display("No piece is selected")]
    NoSelection,

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
