//! Movement rules for each piece kind.
//!
//! Rules are pure functions over a piece and a destination. They ignore
//! whose turn it is and what stands on the destination; those checks belong
//! to the move contracts.

pub mod path;
pub mod shape;

pub use path::is_path_blocked;
pub use shape::is_legal_shape;
