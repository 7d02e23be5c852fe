//! The game-state machine.
//!
//! [`Game`] owns one [`GameState`], the observers listening to it and the
//! save store it persists to. Every mutation goes through its methods.

use crate::action::{Move, MoveError};
use crate::codec::{self, CodecError};
use crate::config::EngineConfig;
use crate::contracts::{Contract, MoveContract};
use crate::geometry::{self, Square};
use crate::observer::{Observer, ObserverId, Observers};
use crate::setup::initial_state;
use crate::state::GameState;
use crate::storage::{SaveStore, StorageError};
use crate::types::{Occupancy, Piece, PieceId, PieceKind, PieceView, Team};
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// Tor and Xor swap roles after every this many completed moves.
pub const ALTERNATION_PERIOD: u32 = 4;

/// What happened after a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game goes on.
    Continued {
        /// Side now on move.
        turn: Team,
        /// Completed moves so far.
        turn_count: u32,
        /// True if Tor and Xor swapped roles after this move.
        alternated: bool,
    },
    /// The move captured a Sau.
    Won(Team),
}

/// Kwazam game engine.
#[derive(Debug)]
pub struct Game {
    state: GameState,
    observers: Observers,
    store: SaveStore,
}

impl Game {
    /// Creates a game in the starting position with default settings.
    #[instrument]
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    /// Creates a game in the starting position.
    #[instrument(skip(config))]
    pub fn with_config(config: &EngineConfig) -> Self {
        Self::from_state(initial_state(), SaveStore::from_config(config))
    }

    /// Wraps an existing state.
    #[instrument(skip_all)]
    pub fn from_state(state: GameState, store: SaveStore) -> Self {
        Self {
            state,
            observers: Observers::new(),
            store,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the save store.
    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    /// Returns presentation snapshots of every piece.
    pub fn pieces(&self) -> Vec<PieceView> {
        self.state.views()
    }

    /// Returns the piece on a square, if any.
    pub fn piece_at(&self, column: i32, row: i32) -> Option<&Piece> {
        self.state.piece_at(Square::new(column, row))
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Team {
        self.state.to_move()
    }

    /// Returns the number of completed moves.
    pub fn turn_count(&self) -> u32 {
        self.state.turn_count()
    }

    /// Returns true once a Sau has been captured.
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Team> {
        self.state.winner()
    }

    // ─────────────────────────────────────────────────────────
    //  Selection
    // ─────────────────────────────────────────────────────────

    /// Selects the piece on a square.
    ///
    /// An empty square leaves the current selection untouched and returns
    /// `None`.
    #[instrument(skip(self))]
    pub fn select_piece_at(&mut self, column: i32, row: i32) -> Option<PieceId> {
        let id = self.piece_at(column, row)?.id();
        self.state.set_selected(Some(id));
        debug!(%id, "Piece selected");
        Some(id)
    }

    /// Returns the selected piece, if any.
    pub fn selected(&self) -> Option<&Piece> {
        self.state.selected().and_then(|id| self.state.piece(id))
    }

    /// Drops the selection.
    pub fn clear_selection(&mut self) {
        self.state.set_selected(None);
    }

    // ─────────────────────────────────────────────────────────
    //  Validation
    // ─────────────────────────────────────────────────────────

    /// Builds a move of a piece to a square without validating it.
    pub fn candidate(&self, id: PieceId, column: i32, row: i32) -> Result<Move, MoveError> {
        let piece = self.state.piece(id).ok_or(MoveError::UnknownPiece(id))?;
        Ok(Move::new(&self.state, piece, Square::new(column, row)))
    }

    /// Returns true if the move may be played now.
    pub fn is_valid_move(&self, mov: &Move) -> bool {
        MoveContract::pre(&self.state, mov).is_ok()
    }

    /// Every legal move of a piece, rows outer and columns inner.
    #[instrument(skip(self))]
    pub fn legal_moves_for(&self, id: PieceId) -> Vec<Move> {
        let Some(piece) = self.state.piece(id) else {
            return Vec::new();
        };
        geometry::squares()
            .map(|square| Move::new(&self.state, piece, square))
            .filter(|mov| self.is_valid_move(mov))
            .collect()
    }

    /// Every legal move of the selected piece; empty without a selection.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.state
            .selected()
            .map(|id| self.legal_moves_for(id))
            .unwrap_or_default()
    }

    // ─────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────

    /// Moves a piece to a square if the move is legal.
    ///
    /// A rejected move leaves the state untouched.
    #[instrument(skip(self), fields(turn = %self.state.to_move()))]
    pub fn propose_move(
        &mut self,
        id: PieceId,
        column: i32,
        row: i32,
    ) -> Result<MoveOutcome, MoveError> {
        if self.state.is_game_over() {
            return Err(MoveError::GameOver);
        }
        let mov = self.candidate(id, column, row)?;
        if let Err(err) = MoveContract::pre(&self.state, &mov) {
            debug!(%mov, %err, "Move rejected");
            return Err(err);
        }
        self.apply(mov)
    }

    /// Replays a move against the current position.
    ///
    /// The move is rebuilt from the live state, so a stale snapshot cannot
    /// smuggle in an outdated capture.
    pub fn play(&mut self, mov: &Move) -> Result<MoveOutcome, MoveError> {
        let to = mov.destination();
        self.propose_move(mov.piece_id(), to.column, to.row)
    }

    /// Moves the selected piece, then drops the selection either way.
    #[instrument(skip(self))]
    pub fn move_selected(&mut self, column: i32, row: i32) -> Result<MoveOutcome, MoveError> {
        let id = self.state.selected().ok_or(MoveError::NoSelection)?;
        let result = self.propose_move(id, column, row);
        self.clear_selection();
        result
    }

    fn apply(&mut self, mov: Move) -> Result<MoveOutcome, MoveError> {
        let before = self.state.clone();
        let id = mov.piece_id();
        let destination = mov.destination();

        let piece = self
            .state
            .piece_mut(id)
            .ok_or(MoveError::UnknownPiece(id))?;
        piece.square = destination;
        // A Ram turns around once, on arrival at an edge row.
        if piece.kind == PieceKind::Ram && destination.is_edge_row() {
            piece.reversed = !piece.reversed;
            debug!(%id, reversed = piece.reversed, "Ram turned around");
        }

        if let Some(captured) = mov.captured() {
            self.state.remove(captured.id());
            debug!(captured = %captured.kind(), %destination, "Piece captured");
        }

        if let Some(winner) = mov.winning_team() {
            self.state.finish(winner);
            info!(%winner, "Sau captured, game over");
            self.check_post(before)?;
            self.observers.winner(winner);
            self.notify();
            return Ok(MoveOutcome::Won(winner));
        }

        let turn_count = self.state.advance_turn();
        let alternated = turn_count % ALTERNATION_PERIOD == 0;
        if alternated {
            self.state.alternate_roles();
            info!(turn_count, "Tor and Xor swapped roles");
        }
        self.state.flip_orientation();
        self.check_post(before)?;

        info!(%mov, turn_count, turn = %self.state.to_move(), "Move applied");
        self.notify();
        Ok(MoveOutcome::Continued {
            turn: self.state.to_move(),
            turn_count,
            alternated,
        })
    }

    /// Runs the postcondition; on failure the move is rolled back.
    fn check_post(&mut self, before: GameState) -> Result<(), MoveError> {
        if cfg!(debug_assertions)
            && let Err(err) = MoveContract::post(&before, &self.state)
        {
            warn!(%err, "Postcondition failed, move rolled back");
            self.state = before;
            return Err(err);
        }
        Ok(())
    }

    /// Starts a new game in the starting position.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state = initial_state();
        info!("Game reset");
        self.notify();
    }

    // ─────────────────────────────────────────────────────────
    //  Persistence
    // ─────────────────────────────────────────────────────────

    /// Saves the game to a named slot, returning the file written.
    ///
    /// The in-memory game is unaffected whether or not the write succeeds.
    #[instrument(skip(self))]
    pub fn save(&self, name: &str) -> Result<PathBuf, StorageError> {
        self.store.write(name, &self.state)
    }

    /// Loads a named slot.
    ///
    /// The slot is decoded into a separate state first; on failure the
    /// current game is kept as it was.
    #[instrument(skip(self))]
    pub fn load(&mut self, name: &str) -> Result<(), StorageError> {
        match self.store.read(name) {
            Ok(staged) => {
                self.replace_state(staged);
                Ok(())
            }
            Err(err) => {
                warn!(%err, "Load failed, keeping current game");
                Err(err)
            }
        }
    }

    /// Loads a game from save-format text.
    #[instrument(skip(self, text))]
    pub fn load_from_str(&mut self, text: &str) -> Result<(), CodecError> {
        let staged = codec::deserialize(text)?;
        self.replace_state(staged);
        Ok(())
    }

    fn replace_state(&mut self, staged: GameState) {
        self.state = staged;
        info!(turn = %self.state.to_move(), pieces = self.state.pieces().len(), "Game replaced");
        self.notify();
    }

    // ─────────────────────────────────────────────────────────
    //  Observers
    // ─────────────────────────────────────────────────────────

    /// Registers an observer.
    pub fn subscribe(&mut self, observer: Box<dyn Observer>) -> ObserverId {
        self.observers.add(observer)
    }

    /// Unregisters an observer; returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    fn notify(&mut self) {
        let views = self.state.views();
        self.observers.state_changed(&views);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
