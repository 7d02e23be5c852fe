//! Plain-text board rendering.

use kwazam_engine::{COLUMNS, Game, PieceKind, ROWS, Square, Team};
use std::collections::HashSet;
use std::fmt::Write;

/// Letter shown for a piece: upper case for Red, lower case for Blue.
pub fn glyph(kind: PieceKind, team: Team) -> char {
    let letter = match kind {
        PieceKind::Ram => 'R',
        PieceKind::Biz => 'B',
        PieceKind::Tor => 'T',
        PieceKind::Xor => 'X',
        PieceKind::Sau => 'S',
    };
    match team {
        Team::Red => letter,
        Team::Blue => letter.to_ascii_lowercase(),
    }
}

/// Draws the board as seen by the side to move, followed by a status line.
///
/// Legal destinations of the selected piece are marked with `*`.
pub fn render_board(game: &Game) -> String {
    let targets: HashSet<Square> = game
        .legal_moves()
        .iter()
        .map(|mov| mov.destination())
        .collect();

    let mut out = String::from("   ");
    for column in 0..COLUMNS {
        let _ = write!(out, " {column}");
    }
    out.push('\n');

    for row in 0..ROWS {
        let _ = write!(out, "{row}  ");
        for column in 0..COLUMNS {
            let cell = match game.piece_at(column, row) {
                Some(piece) => glyph(piece.kind(), piece.team()),
                None if targets.contains(&Square::new(column, row)) => '*',
                None => '.',
            };
            let _ = write!(out, " {cell}");
        }
        out.push('\n');
    }

    match game.winner() {
        Some(winner) => {
            let _ = write!(out, "{winner} wins");
        }
        None => {
            let _ = write!(out, "{} to move, turn {}", game.turn(), game.turn_count());
        }
    }
    out
}
