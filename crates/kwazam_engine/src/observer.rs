//! Notification channel from the engine to its presentation layer.

use crate::types::{PieceView, Team};
use tracing::{debug, instrument};

/// Receives game events.
///
/// `on_winner` fires after the board has been cleared and is followed by
/// `on_state_changed`.
pub trait Observer {
    /// The position changed and should be redrawn.
    fn on_state_changed(&mut self, pieces: &[PieceView]);

    /// A team captured the opposing Sau.
    fn on_winner(&mut self, winner: Team);
}

/// Handle returned by [`Observers::add`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("observer-{}", _0)]
pub struct ObserverId(u32);

/// Registered observers, notified in registration order.
#[derive(Default)]
pub struct Observers {
    entries: Vec<(ObserverId, Box<dyn Observer>)>,
    next_id: u32,
}

impl Observers {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer.
    #[instrument(skip_all)]
    pub fn add(&mut self, observer: Box<dyn Observer>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        debug!(%id, "Observer registered");
        id
    }

    /// Unregisters an observer; returns false if the id was unknown.
    #[instrument(skip(self))]
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Returns the number of registered observers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn state_changed(&mut self, pieces: &[PieceView]) {
        for (_, observer) in &mut self.entries {
            observer.on_state_changed(pieces);
        }
    }

    pub(crate) fn winner(&mut self, winner: Team) {
        for (_, observer) in &mut self.entries {
            observer.on_winner(winner);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
