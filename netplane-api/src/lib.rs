pub mod error;
pub mod identity;
pub mod model;
pub mod rest;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{ApiError, ErrorKind};
pub use model::{Annotations, Driver, IpamConfiguration, IpamOptions, Network, NetworkSpec};
pub use service::NetworkService;
pub use store::{Event, MemoryStore, Store, StoreError};
