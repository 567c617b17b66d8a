use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, ErrorKind};
use crate::model::Network;
use crate::service::{
    CreateNetworkRequest, GetNetworkRequest, ListNetworksRequest, ListNetworksResponse,
    ListOptions, NetworkService, RemoveNetworkRequest, RemoveNetworkResponse,
};

/// Shared application state
pub struct AppState {
    pub service: NetworkService,
}

/// API error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::AlreadyExists => StatusCode::CONFLICT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = status_for(self.kind);
        if status.is_server_error() {
            error!(kind = self.kind.as_str(), error = %self.message, "Request failed");
        } else {
            warn!(kind = self.kind.as_str(), error = %self.message, "Request rejected");
        }
        let body = ErrorResponse {
            error: self.message,
            code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

/// Version information
#[derive(Serialize, Deserialize, ToSchema)]
pub struct VersionInfo {
    pub version: String,
}

/// Get service version
#[utoipa::path(
    get,
    path = "/api/v1/version",
    responses(
        (status = 200, description = "Service version", body = VersionInfo)
    ),
    tag = "system"
)]
pub async fn get_version() -> Json<VersionInfo> {
    Json(VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create a new network
#[utoipa::path(
    post,
    path = "/api/v1/networks",
    request_body = CreateNetworkRequest,
    responses(
        (status = 200, description = "Network created", body = Network),
        (status = 400, description = "Invalid network spec", body = ErrorResponse),
        (status = 409, description = "Network ID already exists", body = ErrorResponse)
    ),
    tag = "networks"
)]
pub async fn create_network(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateNetworkRequest>,
) -> Result<Json<Network>, ApiError> {
    let resp = state.service.create_network(req)?;
    Ok(Json(resp.network))
}

/// Query parameters for listing networks
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListNetworksQuery {
    /// Only return networks whose name or ID starts with this string
    pub query: Option<String>,
}

/// List networks
#[utoipa::path(
    get,
    path = "/api/v1/networks",
    params(ListNetworksQuery),
    responses(
        (status = 200, description = "List of networks", body = ListNetworksResponse)
    ),
    tag = "networks"
)]
pub async fn list_networks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListNetworksQuery>,
) -> Result<Json<ListNetworksResponse>, ApiError> {
    let req = ListNetworksRequest {
        options: params.query.map(|query| ListOptions { query }),
    };
    Ok(Json(state.service.list_networks(req)?))
}

/// Get a network by ID
#[utoipa::path(
    get,
    path = "/api/v1/networks/{id}",
    params(
        ("id" = String, Path, description = "Network ID")
    ),
    responses(
        (status = 200, description = "Network found", body = Network),
        (status = 404, description = "Network not found", body = ErrorResponse)
    ),
    tag = "networks"
)]
pub async fn get_network(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Network>, ApiError> {
    let resp = state
        .service
        .get_network(GetNetworkRequest { network_id: id })?;
    Ok(Json(resp.network))
}

/// Remove a network
#[utoipa::path(
    delete,
    path = "/api/v1/networks/{id}",
    params(
        ("id" = String, Path, description = "Network ID")
    ),
    responses(
        (status = 200, description = "Network removed", body = RemoveNetworkResponse),
        (status = 404, description = "Network not found", body = ErrorResponse)
    ),
    tag = "networks"
)]
pub async fn remove_network(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RemoveNetworkResponse>, ApiError> {
    let resp = state
        .service
        .remove_network(RemoveNetworkRequest { network_id: id })?;
    Ok(Json(resp))
}
