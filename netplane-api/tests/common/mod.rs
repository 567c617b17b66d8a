//! Shared test utilities for netplane-api integration tests.

#![allow(dead_code)]

use netplane_api::rest::{AppState, create_router};
use netplane_api::{MemoryStore, NetworkService};
use reqwest::{Client, Response as ReqwestResponse};
use serde::Serialize;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Test server wrapper running the REST API over an in-memory store.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryStore>,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl TestServer {
    /// Spawn a test server on an ephemeral port.
    pub async fn spawn() -> Self {
        let store = Arc::new(MemoryStore::new());
        let app_state = Arc::new(AppState {
            service: NetworkService::new(store.clone()),
        });
        let router = create_router(app_state);

        // Port 0 lets the OS choose an available port
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let listener = TcpListener::bind(&addr).await.expect("Failed to bind");
        let actual_addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Server error");
        });

        Self {
            addr: actual_addr,
            client: Client::new(),
            store,
            shutdown_tx,
        }
    }

    /// Get base URL for the REST API.
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    /// Perform a GET request.
    pub async fn get(&self, path: &str) -> ReqwestResponse {
        self.client
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await
            .expect("Request failed")
    }

    /// Perform a POST request with JSON body.
    pub async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> ReqwestResponse {
        self.client
            .post(format!("{}{}", self.base_url(), path))
            .json(body)
            .send()
            .await
            .expect("Request failed")
    }

    /// Perform a DELETE request.
    pub async fn delete(&self, path: &str) -> ReqwestResponse {
        self.client
            .delete(format!("{}{}", self.base_url(), path))
            .send()
            .await
            .expect("Request failed")
    }

    /// Create a network and return its JSON representation.
    pub async fn create_network(&self, spec: Value) -> Value {
        let response = self.post_json("/networks", &json!({ "spec": spec })).await;
        assert_eq!(response.status(), 200);
        response.json().await.unwrap()
    }

    /// Shutdown the server.
    pub fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// A spec with a single IPAM configuration.
pub fn spec(name: &str, subnet: &str, range: &str, gateway: &str) -> Value {
    json!({
        "annotations": { "name": name, "labels": {} },
        "ipam": {
            "configurations": [
                { "subnet": subnet, "range": range, "gateway": gateway }
            ]
        }
    })
}
