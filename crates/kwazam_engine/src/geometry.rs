//! Board geometry for the 5×8 Kwazam board.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of columns on the board.
pub const COLUMNS: i32 = 5;

/// Number of rows on the board.
pub const ROWS: i32 = 8;

/// A cell on the board, addressed by column and row.
///
/// Row 0 is the top of the board as seen by the side to move; the mover's
/// home rank is always row 7. Coordinates are signed so that off-board
/// destinations proposed by a caller can be represented and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    /// Column index, 0..5 when in bounds.
    pub column: i32,
    /// Row index, 0..8 when in bounds.
    pub row: i32,
}

impl Square {
    /// Creates a square. No bounds check is performed.
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Returns true if the square lies on the board.
    pub fn in_bounds(self) -> bool {
        in_bounds(self.column, self.row)
    }

    /// Returns the square as seen after rotating the board 180°.
    pub fn mirrored(self) -> Self {
        Self::new(COLUMNS - 1 - self.column, ROWS - 1 - self.row)
    }

    /// Returns true for the first and last rows.
    pub fn is_edge_row(self) -> bool {
        self.row == 0 || self.row == ROWS - 1
    }

    /// Returns the square offset by the given deltas.
    pub fn offset(self, d_column: i32, d_row: i32) -> Self {
        Self::new(self.column + d_column, self.row + d_row)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.column, self.row)
    }
}

impl From<(i32, i32)> for Square {
    fn from((column, row): (i32, i32)) -> Self {
        Self::new(column, row)
    }
}

/// Returns true iff `0 <= column < 5` and `0 <= row < 8`.
#[instrument(level = "trace")]
pub fn in_bounds(column: i32, row: i32) -> bool {
    (0..COLUMNS).contains(&column) && (0..ROWS).contains(&row)
}

/// Every square on the board, rows outer and columns inner.
pub fn squares() -> impl Iterator<Item = Square> {
    (0..ROWS).flat_map(|row| (0..COLUMNS).map(move |column| Square::new(column, row)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(in_bounds(0, 0));
        assert!(in_bounds(4, 7));
        assert!(!in_bounds(5, 0));
        assert!(!in_bounds(0, 8));
        assert!(!in_bounds(-1, 3));
        assert!(!Square::new(2, -1).in_bounds());
    }

    #[test]
    fn test_mirror_is_involution() {
        for square in squares() {
            assert!(square.mirrored().in_bounds());
            assert_eq!(square.mirrored().mirrored(), square);
        }
        assert_eq!(Square::new(0, 0).mirrored(), Square::new(4, 7));
        assert_eq!(Square::new(1, 6).mirrored(), Square::new(3, 1));
    }

    #[test]
    fn test_squares_row_major() {
        let all: Vec<Square> = squares().collect();
        assert_eq!(all.len(), 40);
        assert_eq!(all[0], Square::new(0, 0));
        assert_eq!(all[1], Square::new(1, 0));
        assert_eq!(all[5], Square::new(0, 1));
        assert_eq!(all[39], Square::new(4, 7));
    }
}
