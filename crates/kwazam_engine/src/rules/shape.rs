//! Geometric legality of a move, ignoring every other piece.

use crate::geometry::Square;
use crate::types::{Piece, PieceKind};
use tracing::instrument;

/// Returns true if the piece's kind can travel from its square to `to`.
///
/// Zero-length moves pass for Tor and Xor; the destination is then the
/// mover's own square and the friendly-capture check rejects it.
#[instrument(level = "trace", skip(piece), fields(kind = %piece.kind, from = %piece.square))]
pub fn is_legal_shape(piece: &Piece, to: Square) -> bool {
    let from = piece.square;
    let d_column = (to.column - from.column).abs();
    let d_row = (to.row - from.row).abs();

    match piece.kind {
        PieceKind::Ram => to.column == from.column && to.row == ram_step(piece),
        PieceKind::Biz => d_column * d_row == 2,
        PieceKind::Tor => d_column == 0 || d_row == 0,
        PieceKind::Xor => d_column == d_row,
        PieceKind::Sau => d_column <= 1 && d_row <= 1 && (d_column, d_row) != (0, 0),
    }
}

/// Row a Ram reaches with its next step.
pub(crate) fn ram_step(piece: &Piece) -> i32 {
    if piece.reversed {
        piece.square.row + 1
    } else {
        piece.square.row - 1
    }
}
