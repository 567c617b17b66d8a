use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, AppState};
use crate::model;
use crate::service;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "netplane API Server",
        version = "0.1.0",
        description = "REST API for validating and managing virtual network resources.",
        license(name = "MIT")
    ),
    tags(
        (name = "system", description = "System information"),
        (name = "networks", description = "Network create, get, remove and list")
    ),
    paths(
        handlers::get_version,
        handlers::create_network,
        handlers::list_networks,
        handlers::get_network,
        handlers::remove_network,
    ),
    components(schemas(
        handlers::VersionInfo,
        handlers::ErrorResponse,
        model::Annotations,
        model::Driver,
        model::IpamConfiguration,
        model::IpamOptions,
        model::NetworkSpec,
        model::Network,
        service::CreateNetworkRequest,
        service::ListNetworksResponse,
        service::RemoveNetworkResponse,
    ))
)]
pub struct ApiDoc;

pub fn create_router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        // System
        .route("/version", get(handlers::get_version))
        // Networks
        .route(
            "/networks",
            get(handlers::list_networks).post(handlers::create_network),
        )
        .route(
            "/networks/{id}",
            get(handlers::get_network).delete(handlers::remove_network),
        );

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1", routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
