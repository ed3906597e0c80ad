// SPDX-License-Identifier: MIT

use nil_sync::config::Config;
use nil_sync::db::FirestoreDb;
use nil_sync::routes::create_router;
use nil_sync::services::{BomberClient, SyncService};
use nil_sync::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();

    let bomber = BomberClient::new(
        config.bomber_api_url.clone(),
        config.bomber_api_key.clone(),
    );
    let sync = SyncService::new(bomber, db.clone());

    let state = Arc::new(AppState { config, db, sync });

    (create_router(state.clone()), state)
}
