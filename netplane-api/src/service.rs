//! Network lifecycle service.
//!
//! Validates specs, assigns IDs and runs every store access in its own
//! transaction. Holds no state between calls besides the injected store.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::error::{ApiError, Result};
use crate::identity;
use crate::model::{Network, NetworkSpec};
use crate::store::{Filter, Store, StoreError};
use crate::validation::validate_network_spec;

/// Request to create a network.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateNetworkRequest {
    #[serde(default)]
    pub spec: Option<NetworkSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNetworkResponse {
    pub network: Network,
}

/// Request to get a network.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GetNetworkRequest {
    pub network_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GetNetworkResponse {
    pub network: Network,
}

/// Request to remove a network.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RemoveNetworkRequest {
    pub network_id: String,
}

/// Empty acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RemoveNetworkResponse {}

/// List options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ListOptions {
    /// Match networks whose name or ID starts with this string
    #[serde(default)]
    pub query: String,
}

/// Request to list networks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ListNetworksRequest {
    #[serde(default)]
    pub options: Option<ListOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListNetworksResponse {
    pub networks: Vec<Network>,
}

/// Produces fresh resource IDs.
pub type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// Network lifecycle service.
pub struct NetworkService {
    store: Arc<dyn Store>,
    new_id: IdGenerator,
}

impl NetworkService {
    /// Create a new NetworkService backed by `store`.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            new_id: Arc::new(identity::new_id),
        }
    }

    /// Replace the ID generator.
    pub fn with_id_generator(mut self, new_id: IdGenerator) -> Self {
        self.new_id = new_id;
        self
    }

    /// Create a network from a validated spec.
    ///
    /// - Returns `InvalidArgument` if the spec is missing or malformed.
    /// - Returns `AlreadyExists` if the store reports an ID collision.
    /// - Returns `Internal` for any other store failure.
    pub fn create_network(&self, request: CreateNetworkRequest) -> Result<CreateNetworkResponse> {
        let name = request
            .spec
            .as_ref()
            .map(|s| s.annotations.name.as_str())
            .unwrap_or_default();
        info!(name = %name, "CreateNetwork");

        if let Err(e) = validate_network_spec(request.spec.as_ref()) {
            warn!(name = %name, error = %e, "Rejected network spec");
            return Err(e.into());
        }
        let Some(spec) = request.spec else {
            return Err(ApiError::invalid_argument("spec required"));
        };

        let network = Network {
            id: (self.new_id)(),
            spec,
            created_at: Utc::now().to_rfc3339(),
        };

        self.store
            .update(&mut |tx| tx.create_network(network.clone()))
            .map_err(|e| {
                error!(id = %network.id, error = %e, "Failed to create network");
                ApiError::from(e)
            })?;

        info!(id = %network.id, name = %network.name(), "Network created");
        Ok(CreateNetworkResponse { network })
    }

    /// Get a network by ID.
    ///
    /// - Returns `InvalidArgument` if no ID is given.
    /// - Returns `NotFound` if there is no such network.
    pub fn get_network(&self, request: GetNetworkRequest) -> Result<GetNetworkResponse> {
        if request.network_id.is_empty() {
            return Err(ApiError::invalid_argument("network ID required"));
        }

        info!(id = %request.network_id, "GetNetwork");

        let mut network = None;
        self.store
            .view(&mut |tx| network = tx.get_network(&request.network_id));

        network
            .map(|network| GetNetworkResponse { network })
            .ok_or_else(|| network_not_found(&request.network_id))
    }

    /// Remove a network by ID.
    ///
    /// - Returns `InvalidArgument` if no ID is given.
    /// - Returns `NotFound` if there is no such network.
    /// - Returns `Internal` for any other store failure.
    pub fn remove_network(&self, request: RemoveNetworkRequest) -> Result<RemoveNetworkResponse> {
        if request.network_id.is_empty() {
            return Err(ApiError::invalid_argument("network ID required"));
        }

        info!(id = %request.network_id, "RemoveNetwork");

        match self
            .store
            .update(&mut |tx| tx.delete_network(&request.network_id))
        {
            Ok(()) => {
                info!(id = %request.network_id, "Network removed");
                Ok(RemoveNetworkResponse {})
            }
            Err(StoreError::NotExist(_)) => Err(network_not_found(&request.network_id)),
            Err(e) => {
                error!(id = %request.network_id, error = %e, "Failed to remove network");
                Err(e.into())
            }
        }
    }

    /// List networks, optionally filtered by a query string.
    pub fn list_networks(&self, request: ListNetworksRequest) -> Result<ListNetworksResponse> {
        info!(query = ?request.options, "ListNetworks");

        let filter = match request.options {
            Some(ListOptions { query }) if !query.is_empty() => Filter::ByQuery(query),
            _ => Filter::All,
        };

        let mut result = Ok(Vec::new());
        self.store.view(&mut |tx| result = tx.find_networks(&filter));

        let networks = result.map_err(|e| {
            error!(error = %e, "Failed to list networks");
            ApiError::from(e)
        })?;
        Ok(ListNetworksResponse { networks })
    }
}

fn network_not_found(id: &str) -> ApiError {
    ApiError::not_found(format!("network {} not found", id))
}
