//! Transactional object store.
//!
//! Handlers never touch stored objects directly: reads go through
//! [`Store::view`] and writes through [`Store::update`].

pub mod error;
pub mod event;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use event::Event;
pub use memory::MemoryStore;
pub use traits::{Filter, ReadTx, Store, Tx};
