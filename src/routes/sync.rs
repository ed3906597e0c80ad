// SPDX-License-Identifier: MIT

//! Sync trigger routes.
//!
//! These endpoints are called by the external scheduler (or an
//! operator), not directly by users. A failed run surfaces as an error
//! response; retrying the whole run is the caller's decision.

use crate::error::Result;
use crate::services::SyncSummary;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;

/// Sync trigger routes (token-protected in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/internal/sync/athletes", post(sync_athletes))
        .route("/internal/sync/admins", post(sync_admins))
        .route("/internal/sync", post(sync_all))
}

/// Reconcile all NIL athletes from Bomber.
async fn sync_athletes(State(state): State<Arc<AppState>>) -> Result<Json<SyncSummary>> {
    tracing::info!("Athlete sync triggered");
    let summary = state.sync.sync_athletes().await?;
    Ok(Json(summary))
}

/// Reconcile all admin users from Bomber.
async fn sync_admins(State(state): State<Arc<AppState>>) -> Result<Json<SyncSummary>> {
    tracing::info!("Admin sync triggered");
    let summary = state.sync.sync_admins().await?;
    Ok(Json(summary))
}

/// Combined response for the one-shot full sync.
#[derive(Serialize)]
pub struct SyncAllResponse {
    pub athletes: usize,
    pub admins: usize,
}

/// Run both entity classes in one trigger, athletes first.
///
/// A failure in the athlete pass aborts before admins run, matching
/// the per-run abort-on-first-error contract.
async fn sync_all(State(state): State<Arc<AppState>>) -> Result<Json<SyncAllResponse>> {
    tracing::info!("Full sync triggered");

    let athletes = state.sync.sync_athletes().await?;
    let admins = state.sync.sync_admins().await?;

    Ok(Json(SyncAllResponse {
        athletes: athletes.count,
        admins: admins.count,
    }))
}
