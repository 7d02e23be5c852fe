//! Core domain types: teams, piece kinds and pieces.

use crate::geometry::Square;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Team {
    /// Red moves first.
    Red,
    /// Blue.
    Blue,
}

impl Team {
    /// Returns the other team.
    pub fn opponent(self) -> Self {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }

    /// Returns true for [`Team::Red`].
    pub fn is_red(self) -> bool {
        self == Team::Red
    }

    /// Maps the `isRed` flag used by the save format onto a team.
    pub fn from_is_red(is_red: bool) -> Self {
        if is_red { Team::Red } else { Team::Blue }
    }
}

/// The five kinds of piece.
///
/// The textual name of each kind is exactly its variant name; the save
/// format relies on that.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum PieceKind {
    /// Forward-only stepper that turns around at the board edge.
    Ram,
    /// L-shaped jumper.
    Biz,
    /// Orthogonal slider.
    Tor,
    /// Diagonal slider.
    Xor,
    /// Royal piece; capturing it wins the game.
    Sau,
}

impl PieceKind {
    /// Returns the kind a piece takes on during role alternation.
    pub fn swapped(self) -> Self {
        match self {
            PieceKind::Tor => PieceKind::Xor,
            PieceKind::Xor => PieceKind::Tor,
            other => other,
        }
    }

    /// Returns true for the kind whose capture ends the game.
    pub fn is_royal(self) -> bool {
        self == PieceKind::Sau
    }
}

/// Stable identity of a piece within one game state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("#{}", _0)]
pub struct PieceId(pub(crate) u16);

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub(crate) id: PieceId,
    pub(crate) kind: PieceKind,
    pub(crate) team: Team,
    pub(crate) square: Square,
    pub(crate) flipped: bool,
    pub(crate) reversed: bool,
}

impl Piece {
    /// Returns the piece's identity.
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Returns the current kind.
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the owning team.
    pub fn team(&self) -> Team {
        self.team
    }

    /// Returns the square the piece stands on.
    pub fn square(&self) -> Square {
        self.square
    }

    /// Returns the visual orientation flag.
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Returns true once a Ram has turned around at an edge row.
    ///
    /// A Ram that is not reversed steps toward row 0; a reversed Ram steps
    /// toward row 7. Meaningless for other kinds.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Returns a presentation snapshot of this piece.
    pub fn view(&self) -> PieceView {
        PieceView::new(
            self.kind,
            self.team,
            self.square.column,
            self.square.row,
            self.flipped,
            self.kind == PieceKind::Ram && self.reversed,
        )
    }
}

/// What the presentation layer needs to draw one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct PieceView {
    /// Piece kind.
    pub kind: PieceKind,
    /// Owning team.
    pub team: Team,
    /// Column in the current orientation.
    pub column: i32,
    /// Row in the current orientation.
    pub row: i32,
    /// Which of the two visual forms to draw.
    pub flipped: bool,
    /// True for a Ram that has turned around and is heading home.
    pub reversed: bool,
}

/// Read-only lookup of what stands on a square.
///
/// Movement rules consult the board only through this trait.
pub trait Occupancy {
    /// Returns the piece on the square, if any.
    fn piece_at(&self, square: Square) -> Option<&Piece>;

    /// Returns true if any piece stands on the square.
    fn is_occupied(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }
}

impl Occupancy for [Piece] {
    fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.iter().find(|piece| piece.square == square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in PieceKind::iter() {
            assert_eq!(PieceKind::from_str(kind.as_ref()), Ok(kind));
        }
        assert_eq!(PieceKind::Sau.to_string(), "Sau");
        assert!(PieceKind::from_str("Queen").is_err());
        assert!(PieceKind::from_str("ram").is_err());
    }

    #[test]
    fn test_swapped_only_touches_sliders() {
        assert_eq!(PieceKind::Tor.swapped(), PieceKind::Xor);
        assert_eq!(PieceKind::Xor.swapped(), PieceKind::Tor);
        assert_eq!(PieceKind::Ram.swapped(), PieceKind::Ram);
        assert_eq!(PieceKind::Biz.swapped(), PieceKind::Biz);
        assert_eq!(PieceKind::Sau.swapped(), PieceKind::Sau);
    }

    #[test]
    fn test_team_helpers() {
        assert_eq!(Team::Red.opponent(), Team::Blue);
        assert_eq!(Team::from_is_red(false), Team::Blue);
        assert!(Team::Red.is_red());
        assert_eq!(Team::Blue.to_string(), "Blue");
    }
}
