//! Line-oriented text format for saved games.
//!
//! ```text
//! Is it Red's Turn,true
//! Ram,0,6,true
//! Sau,2,0,false
//! ```
//!
//! The first line carries the side to move; every following line is one
//! piece as `<kind>,<column>,<row>,<isRed>`. Piece order is not significant.

use crate::geometry::{ROWS, Square};
use crate::state::{GameState, PlacementError};
use crate::types::{PieceKind, Team};
use std::str::FromStr;
use tracing::{debug, instrument, warn};

/// Label of the first line.
pub const TURN_LABEL: &str = "Is it Red's Turn";

/// Why a save could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CodecError {
    /// The text holds no lines at all.
    #[display("Save is empty")]
    Empty,

    /// The first line is not a turn line.
    #[display("Invalid turn line: {:?}", _0)]
    InvalidTurnLine(String),

    /// A piece line names a known kind but its fields do not parse.
    #[display("Line {}: {}", line, reason)]
    MalformedLine {
        /// One-based line number.
        line: usize,
        /// What was wrong.
        reason: String,
    },

    /// A piece line is well formed but cannot be placed.
    #[display("Line {}: {}", line, error)]
    Placement {
        /// One-based line number.
        line: usize,
        /// Placement failure.
        error: PlacementError,
    },
}

impl std::error::Error for CodecError {}

/// Encodes the state in the save format.
#[instrument(skip(state), fields(pieces = state.pieces().len()))]
pub fn serialize(state: &GameState) -> String {
    let mut out = format!("{},{}\n", TURN_LABEL, state.to_move().is_red());
    for piece in state.pieces() {
        let square = piece.square();
        out.push_str(&format!(
            "{},{},{},{}\n",
            piece.kind(),
            square.column,
            square.row,
            piece.team().is_red()
        ));
    }
    out
}

/// Decodes a save into a fresh state.
///
/// Blank lines are ignored and lines naming an unknown kind are skipped.
/// The decoded state has turn count 0, nothing selected, and every visual flag
/// set to match the side to move. The format does not carry a Ram's heading:
/// a Ram standing on its owner's far edge is heading home, every other Ram
/// is heading away from home.
#[instrument(skip(text), fields(bytes = text.len()))]
pub fn deserialize(text: &str) -> Result<GameState, CodecError> {
    let mut lines = text.lines().enumerate();
    let (_, first) = lines.next().ok_or(CodecError::Empty)?;
    let to_move = Team::from_is_red(parse_turn_line(first)?);

    let mut state = GameState::empty(to_move);
    for (index, line) in lines {
        let number = index + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let Ok(kind) = PieceKind::from_str(fields[0]) else {
            warn!(line = number, name = fields[0], "Skipping unknown piece kind");
            continue;
        };
        if fields.len() != 4 {
            return Err(CodecError::MalformedLine {
                line: number,
                reason: format!("expected 4 fields, found {}", fields.len()),
            });
        }

        let column = parse_int(fields[1], number)?;
        let row = parse_int(fields[2], number)?;
        let team = Team::from_is_red(parse_bool(fields[3]).ok_or_else(|| {
            CodecError::MalformedLine {
                line: number,
                reason: format!("expected true or false, found {:?}", fields[3]),
            }
        })?);

        let id = state
            .place(kind, team, Square::new(column, row))
            .map_err(|error| CodecError::Placement { line: number, error })?;
        if kind == PieceKind::Ram
            && row == far_row(team, to_move)
            && let Some(ram) = state.piece_mut(id)
        {
            ram.reversed = true;
        }
    }

    state.normalize_flip();
    debug!(pieces = state.pieces().len(), %to_move, "Save decoded");
    Ok(state)
}

/// Row of the owner's far edge, in the frame of the side to move.
fn far_row(team: Team, to_move: Team) -> i32 {
    if team == to_move { 0 } else { ROWS - 1 }
}

fn parse_turn_line(line: &str) -> Result<bool, CodecError> {
    let invalid = || CodecError::InvalidTurnLine(line.to_string());
    let (label, value) = line.trim().split_once(',').ok_or_else(invalid)?;
    if label.trim() != TURN_LABEL {
        return Err(invalid());
    }
    parse_bool(value.trim()).ok_or_else(invalid)
}

fn parse_int(field: &str, line: usize) -> Result<i32, CodecError> {
    field.parse().map_err(|_| CodecError::MalformedLine {
        line,
        reason: format!("expected an integer, found {:?}", field),
    })
}

fn parse_bool(field: &str) -> Option<bool> {
    if field.eq_ignore_ascii_case("true") {
        Some(true)
    } else if field.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
