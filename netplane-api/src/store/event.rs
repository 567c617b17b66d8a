//! Events emitted by committed store transactions.

use crate::model::Network;

/// Events emitted when state changes occur.
///
/// Events are dispatched via a broadcast channel after the transaction that
/// produced them has committed, in commit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A new network was created.
    NetworkCreated(Network),
    /// A network was deleted.
    NetworkDeleted { id: String },
}

impl Event {
    /// Get the resource type for this event.
    pub fn resource_type(&self) -> &'static str {
        match self {
            Event::NetworkCreated(_) | Event::NetworkDeleted { .. } => "network",
        }
    }

    /// Get the resource ID for this event.
    pub fn resource_id(&self) -> &str {
        match self {
            Event::NetworkCreated(n) => &n.id,
            Event::NetworkDeleted { id } => id,
        }
    }
}
