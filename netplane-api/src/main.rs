use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use netplane_api::rest::{AppState, create_router};
use netplane_api::{Event, MemoryStore, NetworkService, Store};

#[derive(Parser)]
#[command(name = "netplane-api")]
#[command(about = "netplane API Server - network spec validation and lifecycle")]
struct Args {
    /// Listen address for the REST API
    #[arg(short, long, env = "NETPLANE_LISTEN", default_value = "[::]:8080")]
    listen: String,

    /// Log filter directive, combined with RUST_LOG
    #[arg(long, env = "NETPLANE_LOG", default_value = "netplane_api=info")]
    log_filter: String,
}

/// Log committed store changes until the store goes away.
async fn log_events(mut events: broadcast::Receiver<Event>) {
    loop {
        match events.recv().await {
            Ok(event) => info!(
                resource = event.resource_type(),
                id = event.resource_id(),
                event = ?event,
                "Store event"
            ),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Event listener lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(args.log_filter.parse()?))
        .init();

    let store = Arc::new(MemoryStore::new());
    tokio::spawn(log_events(store.subscribe()));

    let app_state = Arc::new(AppState {
        service: NetworkService::new(store),
    });
    let router = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    info!("REST API listening on {}", args.listen);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = signal::ctrl_c();
    let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, "Failed to install SIGTERM handler");
            let _ = ctrl_c.await;
            info!("Received SIGINT");
            return;
        }
    };

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = sigterm.recv() => info!("Received SIGTERM"),
    }
}
