//! Athlete profile and parent contact models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Denormalized athlete attributes, one-to-one with a [`super::User`].
///
/// Document ID is the owning user's internal id, which is what makes
/// the sync upsert keyed. Every mapped field is overwritten on each
/// sync pass: Bomber is the source of truth and last write wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// System-generated profile id, stable across syncs
    pub id: Uuid,
    /// Owning user's internal id (also used as document ID)
    pub user_id: Uuid,
    /// Full display name, "first last" trimmed
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub secondary_position: Option<String>,
    pub primary_position: Option<String>,
    pub team_name: Option<String>,
    /// Parsed from Bomber's textual jersey number; unset on parse failure
    pub jersey_number: Option<i64>,
    /// Parsed from Bomber's textual grad year; unset on parse failure
    pub class_year: Option<i64>,
    pub grad_year: Option<i64>,
    pub age_group: Option<String>,
    /// School name, from the college commitment when present
    pub school: Option<String>,
    /// Derived sport (see `services::sync::guess_sport`)
    pub sport: Option<String>,
    /// Reset to false on every sync touch
    pub profile_complete: bool,
    /// Formatted mailing address ("line1, line2, city, state zip")
    pub address: Option<String>,
    /// Formatted location ("city, state")
    pub location: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Parent contact, many-to-one with an [`AthleteProfile`].
///
/// The whole set for an athlete is deleted and recreated on every sync
/// pass, so these have no stable identity across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentContact {
    /// Generated per sync pass (also used as document ID)
    pub id: Uuid,
    /// Owning athlete profile id
    pub athlete_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Fixed literal "Parent" for records created by the sync
    pub relationship: String,
    pub created_at: String,
}
