// SPDX-License-Identifier: MIT

//! NIL-Sync API Server
//!
//! Exposes the internal trigger endpoints that reconcile athlete and
//! admin records from the Bomber partner system into local storage.
//! An external scheduler POSTs the triggers; this process holds no
//! schedule of its own.

use nil_sync::{
    config::Config,
    db::FirestoreDb,
    services::{BomberClient, SyncService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting NIL-Sync API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Initialize Bomber integration client.
    // Constructed once here and carried in state so tests can substitute
    // a client pointed at a fake server.
    let bomber = BomberClient::new(
        config.bomber_api_url.clone(),
        config.bomber_api_key.clone(),
    );
    tracing::info!(base_url = %config.bomber_api_url, "Bomber client initialized");

    let sync = SyncService::new(bomber, db.clone());

    // Build shared state
    let state = Arc::new(AppState { config: config.clone(), db, sync });

    // Build router
    let app = nil_sync::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nil_sync=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
