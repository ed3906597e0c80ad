// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod bomber;
pub mod sync;

pub use bomber::BomberClient;
pub use sync::{SyncService, SyncSummary};
