//! In-memory copy-on-write store.
//!
//! Committed state is an immutable map published through `ArcSwap`. Readers
//! load the current map and never block. Writers are serialized by a mutex,
//! work on a private copy and publish it with a single pointer swap on
//! commit.

use arc_swap::ArcSwap;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::broadcast;
use tracing::debug;

use crate::model::Network;

use super::error::{Result, StoreError};
use super::event::Event;
use super::traits::{Filter, ReadTx, Store, Tx};

/// Capacity of the event broadcast channel.
const EVENT_CHANNEL_CAPACITY: usize = 256;

type Networks = BTreeMap<String, Network>;

/// In-memory store. Enumeration order is ID order.
pub struct MemoryStore {
    committed: ArcSwap<Networks>,
    writer: Mutex<()>,
    events: broadcast::Sender<Event>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            committed: ArcSwap::from_pointee(Networks::new()),
            writer: Mutex::new(()),
            events,
        }
    }

    /// Number of committed networks.
    pub fn len(&self) -> usize {
        self.committed.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.load().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn get(networks: &Networks, id: &str) -> Option<Network> {
    networks.get(id).cloned()
}

fn find(networks: &Networks, filter: &Filter) -> Vec<Network> {
    networks
        .values()
        .filter(|n| filter.matches(n))
        .cloned()
        .collect()
}

/// Read-only view of one committed version.
struct Snapshot(Arc<Networks>);

impl ReadTx for Snapshot {
    fn get_network(&self, id: &str) -> Option<Network> {
        get(&self.0, id)
    }

    fn find_networks(&self, filter: &Filter) -> Result<Vec<Network>> {
        Ok(find(&self.0, filter))
    }
}

/// Private working copy of a write transaction.
struct WriteTx {
    networks: Networks,
    events: Vec<Event>,
}

impl ReadTx for WriteTx {
    fn get_network(&self, id: &str) -> Option<Network> {
        get(&self.networks, id)
    }

    fn find_networks(&self, filter: &Filter) -> Result<Vec<Network>> {
        Ok(find(&self.networks, filter))
    }
}

impl Tx for WriteTx {
    fn create_network(&mut self, network: Network) -> Result<()> {
        if network.id.is_empty() {
            return Err(StoreError::Internal("empty network id".to_string()));
        }
        match self.networks.entry(network.id.clone()) {
            Entry::Occupied(e) => Err(StoreError::Exists(e.key().clone())),
            Entry::Vacant(e) => {
                self.events.push(Event::NetworkCreated(network.clone()));
                e.insert(network);
                Ok(())
            }
        }
    }

    fn delete_network(&mut self, id: &str) -> Result<()> {
        self.networks
            .remove(id)
            .ok_or_else(|| StoreError::NotExist(id.to_string()))?;
        self.events.push(Event::NetworkDeleted { id: id.to_string() });
        Ok(())
    }
}

impl Store for MemoryStore {
    fn update(&self, f: &mut dyn FnMut(&mut dyn Tx) -> Result<()>) -> Result<()> {
        // The mutex guards no data. A panic inside `f` only loses the working
        // copy, so a poisoned lock is still safe to take.
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let mut tx = WriteTx {
            networks: Networks::clone(&self.committed.load()),
            events: Vec::new(),
        };
        f(&mut tx)?;

        self.committed.store(Arc::new(tx.networks));
        debug!(events = tx.events.len(), "Transaction committed");

        // Still holding the writer lock, so events go out in commit order.
        for event in tx.events {
            // No subscribers is fine.
            let _ = self.events.send(event);
        }
        Ok(())
    }

    fn view(&self, f: &mut dyn FnMut(&dyn ReadTx)) {
        let snapshot = Snapshot(self.committed.load_full());
        f(&snapshot);
    }

    fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }
}
