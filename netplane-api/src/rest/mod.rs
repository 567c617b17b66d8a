//! REST API for network management.

mod handlers;
mod routes;

pub use handlers::{AppState, ErrorResponse, VersionInfo};
pub use routes::{ApiDoc, create_router};
