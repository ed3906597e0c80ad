//! User model for storage.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User role within the marketplace.
///
/// Only the roles the sync can write; Bomber knows nothing about
/// brand-side accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Athlete,
    Admin,
}

/// User identity record stored in Firestore.
///
/// Keyed by `external_id` (the Bomber user id, also used as document
/// ID) so sync runs can upsert without a lookup table. At most one
/// user exists per external id; the sync never deletes users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// System-generated internal id, stable across syncs
    pub id: Uuid,
    /// Bomber user id (also used as document ID)
    pub external_id: String,
    /// Email, lower-cased and trimmed (empty when Bomber omits it)
    pub email: String,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// When the record was first created (RFC 3339)
    pub created_at: String,
    /// Last sync touch (RFC 3339)
    pub updated_at: String,
}
