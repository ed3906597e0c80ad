// SPDX-License-Identifier: MIT

//! NIL-Sync: reconciliation service for the Bomber partner system
//!
//! This crate provides the backend service that pulls NIL-eligible
//! athlete and admin records from the Bomber integration API and
//! reconciles them into local storage via idempotent upsert.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::SyncService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub sync: SyncService,
}
