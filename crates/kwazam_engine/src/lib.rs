//! Kwazam engine - rules and game-state machine for Kwazam chess.
//!
//! Kwazam is played on a 5×8 board by Red and Blue with five kinds of
//! piece. Every completed move rotates the board so the side to move sits at
//! the bottom, and every fourth completed move swaps the roles of Tor and
//! Xor. Capturing the opposing Sau wins.
//!
//! # Architecture
//!
//! - **Geometry**: board bounds and the 180° orientation flip
//! - **Rules**: per-kind shape and obstruction predicates
//! - **Contracts**: the ordered legality checks for a move
//! - **Game**: validation, application, alternation, observers, save/load
//! - **Codec**: the line-oriented save format
//!
//! # Example
//!
//! ```
//! use kwazam_engine::{Game, MoveOutcome, Team};
//!
//! let mut game = Game::new();
//! let ram = game.select_piece_at(0, 6).expect("Red Ram on the opening square");
//! assert_eq!(game.legal_moves_for(ram).len(), 1);
//!
//! let outcome = game.move_selected(0, 5).expect("legal opening move");
//! assert!(matches!(outcome, MoveOutcome::Continued { turn: Team::Blue, .. }));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod codec;
mod config;
mod contracts;
mod game;
mod geometry;
mod invariants;
mod observer;
mod rules;
mod setup;
mod state;
mod storage;
mod types;

// Crate-level exports - Geometry
pub use geometry::{COLUMNS, ROWS, Square, in_bounds, squares};

// Crate-level exports - Pieces
pub use types::{Occupancy, Piece, PieceId, PieceKind, PieceView, Team};

// Crate-level exports - Movement rules
pub use rules::{is_legal_shape, is_path_blocked};

// Crate-level exports - Moves and validation
pub use action::{Move, MoveError};
pub use contracts::{
    Contract, LegalMove, MoveContract, NotFriendlyCapture, PathClear, PlayersTurn, ShapeAllows,
    WithinBoard,
};
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, KwazamInvariants, PieceBudgetInvariant,
    TerminalBoardInvariant, UniqueOccupancyInvariant,
};

// Crate-level exports - State machine
pub use game::{ALTERNATION_PERIOD, Game, MoveOutcome};
pub use setup::initial_state;
pub use state::{GameState, GameStatus, MAX_PIECES, PlacementError};

// Crate-level exports - Observers
pub use observer::{Observer, ObserverId, Observers};

// Crate-level exports - Persistence
pub use codec::{CodecError, TURN_LABEL, deserialize, serialize};
pub use config::{ConfigError, EngineConfig};
pub use storage::{SaveStore, StorageError};
