//! Store trait definitions.
//!
//! These traits abstract away the storage backend so the lifecycle service
//! only deals with transactions over domain objects.

use tokio::sync::broadcast;

use crate::model::Network;

use super::error::Result;
use super::event::Event;

/// Selects networks in [`ReadTx::find_networks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Every network.
    All,
    /// Networks whose name or ID starts with the query string.
    ByQuery(String),
}

impl Filter {
    /// Check whether a network passes this filter.
    pub fn matches(&self, network: &Network) -> bool {
        match self {
            Filter::All => true,
            Filter::ByQuery(query) => {
                network.name().starts_with(query.as_str()) || network.id.starts_with(query.as_str())
            }
        }
    }
}

/// Read access to a consistent snapshot.
pub trait ReadTx {
    /// Look up a network by ID.
    fn get_network(&self, id: &str) -> Option<Network>;

    /// List networks matching a filter.
    fn find_networks(&self, filter: &Filter) -> Result<Vec<Network>>;
}

/// Read-write access inside a transaction.
pub trait Tx: ReadTx {
    /// Insert a network. Fails with `Exists` if the ID is taken.
    fn create_network(&mut self, network: Network) -> Result<()>;

    /// Remove a network. Fails with `NotExist` if there is no such ID.
    fn delete_network(&mut self, id: &str) -> Result<()>;
}

/// Transactional object store.
///
/// Callbacks receive the transaction and pass results out through captured
/// variables, which keeps the trait usable as `dyn Store`.
pub trait Store: Send + Sync {
    /// Run `f` in a read-write transaction.
    ///
    /// Commits iff `f` returns `Ok`; otherwise every change made by `f` is
    /// discarded and the error is returned. Transactions are serializable.
    fn update(&self, f: &mut dyn FnMut(&mut dyn Tx) -> Result<()>) -> Result<()>;

    /// Run `f` against a point-in-time snapshot.
    fn view(&self, f: &mut dyn FnMut(&dyn ReadTx));

    /// Subscribe to committed changes.
    fn subscribe(&self) -> broadcast::Receiver<Event>;
}
