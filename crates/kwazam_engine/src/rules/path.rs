//! Obstruction checks for the sliding kinds.

use crate::geometry::Square;
use crate::types::{Occupancy, Piece, PieceKind};
use tracing::{instrument, trace};

/// Returns true if another piece stands strictly between the piece and `to`.
///
/// Only Tor and Xor can be blocked; Ram and Sau move a single step and Biz
/// jumps. A destination that is not on one of the slider's lines is never
/// reported as blocked; the shape rule rejects it instead.
#[instrument(level = "trace", skip(piece, board), fields(kind = %piece.kind, from = %piece.square))]
pub fn is_path_blocked<B>(piece: &Piece, to: Square, board: &B) -> bool
where
    B: Occupancy + ?Sized,
{
    let from = piece.square;
    let d_column = to.column - from.column;
    let d_row = to.row - from.row;

    let on_line = match piece.kind {
        PieceKind::Tor => d_column == 0 || d_row == 0,
        PieceKind::Xor => d_column.abs() == d_row.abs(),
        PieceKind::Ram | PieceKind::Biz | PieceKind::Sau => false,
    };
    if !on_line {
        return false;
    }

    let blocker = between(from, to).find(|square| board.is_occupied(*square));
    if let Some(square) = blocker {
        trace!(%square, "Path blocked");
    }
    blocker.is_some()
}

/// Squares strictly between two squares on a shared row, column or diagonal.
fn between(from: Square, to: Square) -> impl Iterator<Item = Square> {
    let step_column = (to.column - from.column).signum();
    let step_row = (to.row - from.row).signum();
    let distance = (to.column - from.column)
        .abs()
        .max((to.row - from.row).abs());
    (1..distance).map(move |i| from.offset(step_column * i, step_row * i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceId, Team};

    fn piece(id: u16, kind: PieceKind, column: i32, row: i32) -> Piece {
        Piece {
            id: PieceId(id),
            kind,
            team: Team::Red,
            square: Square::new(column, row),
            flipped: false,
            reversed: false,
        }
    }

    #[test]
    fn test_tor_blocked_on_column() {
        let tor = piece(0, PieceKind::Tor, 0, 0);
        let board = [tor, piece(1, PieceKind::Ram, 0, 3)];
        assert!(is_path_blocked(&tor, Square::new(0, 5), &board[..]));
        assert!(!is_path_blocked(&tor, Square::new(0, 2), &board[..]));
        // The blocker itself is not between.
        assert!(!is_path_blocked(&tor, Square::new(0, 3), &board[..]));
    }

    #[test]
    fn test_tor_blocked_on_row_both_directions() {
        let tor = piece(0, PieceKind::Tor, 2, 4);
        let board = [tor, piece(1, PieceKind::Biz, 1, 4), piece(2, PieceKind::Biz, 4, 4)];
        assert!(is_path_blocked(&tor, Square::new(0, 4), &board[..]));
        assert!(!is_path_blocked(&tor, Square::new(3, 4), &board[..]));
        assert!(!is_path_blocked(&tor, Square::new(4, 4), &board[..]));
    }

    #[test]
    fn test_xor_blocked_on_diagonal() {
        let xor = piece(0, PieceKind::Xor, 0, 7);
        let board = [xor, piece(1, PieceKind::Sau, 2, 5)];
        assert!(is_path_blocked(&xor, Square::new(3, 4), &board[..]));
        assert!(!is_path_blocked(&xor, Square::new(1, 6), &board[..]));
        assert!(!is_path_blocked(&xor, Square::new(2, 5), &board[..]));
    }

    #[test]
    fn test_jumpers_never_blocked() {
        let biz = piece(0, PieceKind::Biz, 1, 7);
        let board = [
            biz,
            piece(1, PieceKind::Ram, 1, 6),
            piece(2, PieceKind::Ram, 0, 6),
            piece(3, PieceKind::Ram, 2, 6),
        ];
        assert!(!is_path_blocked(&biz, Square::new(0, 5), &board[..]));
        assert!(!is_path_blocked(&biz, Square::new(2, 5), &board[..]));
    }
}
