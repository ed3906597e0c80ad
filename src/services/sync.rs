// SPDX-License-Identifier: MIT

//! Bomber reconciliation service.
//!
//! Handles the core sync workflow:
//! 1. Fetch athlete or admin records from Bomber
//! 2. Derive normalized local fields (name, address, numbers, sport)
//! 3. Upsert the local user keyed by Bomber external id
//! 4. Upsert the athlete profile keyed by user id
//! 5. Replace the athlete's parent contacts wholesale
//!
//! Runs are idempotent: re-running with an unchanged remote snapshot
//! produces the same local field values and the same contact set.
//! Processing is serial with no transaction spanning a record's
//! writes; the first storage error aborts the remainder of the run and
//! already-processed records keep their committed changes.

use crate::db::FirestoreDb;
use crate::error::Result;
use crate::models::{AthleteProfile, ParentContact, Role, User};
use crate::services::bomber::{BomberAddress, BomberAdmin, BomberAthlete, BomberTeam};
use crate::services::BomberClient;
use serde::Serialize;
use uuid::Uuid;

/// Sport assigned to every athlete with a team. Bomber is a baseball
/// organization, so the placeholder mapping is a single constant until
/// the partner exposes a real sport field.
const DEFAULT_SPORT: &str = "Baseball";

/// Relationship literal for contacts created by the sync.
const PARENT_RELATIONSHIP: &str = "Parent";

/// Summary returned by a trigger entry point.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SyncSummary {
    /// Remote records processed in this run
    pub count: usize,
}

/// Reconciles Bomber records into local storage.
#[derive(Clone)]
pub struct SyncService {
    bomber: BomberClient,
    db: FirestoreDb,
}

impl SyncService {
    pub fn new(bomber: BomberClient, db: FirestoreDb) -> Self {
        Self { bomber, db }
    }

    /// Sync all NIL-eligible athletes: fetch once, reconcile serially.
    pub async fn sync_athletes(&self) -> Result<SyncSummary> {
        let athletes = self.bomber.fetch_nil_athletes().await?;
        tracing::info!(fetched = athletes.len(), "Fetched NIL athletes from Bomber");

        let count = reconcile_athletes(&self.db, &athletes).await?;

        tracing::info!(count, "Athlete sync complete");
        Ok(SyncSummary { count })
    }

    /// Sync all admin users: fetch once, reconcile serially.
    pub async fn sync_admins(&self) -> Result<SyncSummary> {
        let admins = self.bomber.fetch_admins().await?;
        tracing::info!(fetched = admins.len(), "Fetched admins from Bomber");

        let count = reconcile_admins(&self.db, &admins).await?;

        tracing::info!(count, "Admin sync complete");
        Ok(SyncSummary { count })
    }
}

// ─── Athlete Reconciliation ──────────────────────────────────────────

/// Reconcile one snapshot of remote athlete records into storage.
///
/// Public so the integration suite can drive it with literal records
/// against the emulator, without a Bomber endpoint in the loop.
pub async fn reconcile_athletes(db: &FirestoreDb, athletes: &[BomberAthlete]) -> Result<usize> {
    for athlete in athletes {
        reconcile_athlete(db, athlete).await?;
    }
    Ok(athletes.len())
}

/// Reconcile a single athlete record: user, profile, parent contacts.
async fn reconcile_athlete(db: &FirestoreDb, athlete: &BomberAthlete) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    let email = normalize_email(athlete.user.email.as_deref());

    // Upsert user keyed by external id. An existing user only gets its
    // email refreshed; role and names are owned by other flows.
    let user = match db.get_user_by_external_id(&athlete.user.id).await? {
        Some(mut user) => {
            user.email = email;
            user.updated_at = now.clone();
            db.upsert_user(&user).await?;
            user
        }
        None => {
            let user = User {
                id: Uuid::new_v4(),
                external_id: athlete.user.id.clone(),
                email,
                role: Role::Athlete,
                first_name: None,
                last_name: None,
                created_at: now.clone(),
                updated_at: now.clone(),
            };
            db.upsert_user(&user).await?;
            user
        }
    };

    // Upsert profile keyed by the user id. Every mapped field is
    // overwritten; Bomber is the source of truth and last write wins.
    // That includes profile_complete, which resets to false on every
    // touch (matches the partner contract as it stands).
    let profile = match db.get_athlete_profile(user.id).await? {
        Some(existing) => AthleteProfile {
            id: existing.id,
            created_at: existing.created_at,
            ..athlete_fields(athlete, user.id, now.clone())
        },
        None => athlete_fields(athlete, user.id, now.clone()),
    };
    db.upsert_athlete_profile(&profile).await?;

    // Replace the parent contact set wholesale: delete everything for
    // this profile, then recreate from the remote list in source order.
    db.delete_parent_contacts(profile.id).await?;

    for parent in &athlete.parents {
        let contact = ParentContact {
            id: Uuid::new_v4(),
            athlete_id: profile.id,
            first_name: parent.user.first_name.clone(),
            last_name: parent.user.last_name.clone(),
            email: parent.user.email.clone(),
            phone: parent.user.phone.clone(),
            relationship: PARENT_RELATIONSHIP.to_string(),
            created_at: now.clone(),
        };
        db.create_parent_contact(&contact).await?;
    }

    tracing::debug!(
        external_id = %athlete.user.id,
        parents = athlete.parents.len(),
        "Reconciled athlete"
    );

    Ok(())
}

/// Map a remote athlete onto a fresh profile value with derived fields.
fn athlete_fields(athlete: &BomberAthlete, user_id: Uuid, now: String) -> AthleteProfile {
    let address = athlete.address.as_ref().and_then(format_address);
    let location = athlete.address.as_ref().and_then(format_location);

    AthleteProfile {
        id: Uuid::new_v4(),
        user_id,
        name: full_name(&athlete.user.first_name, &athlete.user.last_name),
        first_name: athlete.user.first_name.clone(),
        last_name: athlete.user.last_name.clone(),
        position: athlete.position1.clone(),
        secondary_position: athlete.position2.clone(),
        primary_position: athlete.position1.clone(),
        team_name: athlete.team.as_ref().and_then(|t| t.name.clone()),
        jersey_number: parse_number(athlete.jersey_num.as_deref()),
        class_year: parse_number(athlete.grad_year.as_deref()),
        grad_year: parse_number(athlete.grad_year.as_deref()),
        age_group: athlete.age_group.clone(),
        school: athlete.college.clone(),
        sport: guess_sport(athlete.team.as_ref()),
        profile_complete: false,
        address,
        location,
        created_at: now.clone(),
        updated_at: now,
    }
}

// ─── Admin Reconciliation ────────────────────────────────────────────

/// Reconcile one snapshot of remote admin records into storage.
pub async fn reconcile_admins(db: &FirestoreDb, admins: &[BomberAdmin]) -> Result<usize> {
    let now = chrono::Utc::now().to_rfc3339();

    for admin in admins {
        let email = normalize_email(Some(&admin.email));

        // Missing remote names overwrite to None rather than keeping a
        // prior value - Bomber owns these fields for admins.
        match db.get_user_by_external_id(&admin.id).await? {
            Some(mut user) => {
                user.email = email;
                user.role = Role::Admin;
                user.first_name = admin.first_name.clone();
                user.last_name = admin.last_name.clone();
                user.updated_at = now.clone();
                db.upsert_user(&user).await?;
            }
            None => {
                let user = User {
                    id: Uuid::new_v4(),
                    external_id: admin.id.clone(),
                    email,
                    role: Role::Admin,
                    first_name: admin.first_name.clone(),
                    last_name: admin.last_name.clone(),
                    created_at: now.clone(),
                    updated_at: now.clone(),
                };
                db.upsert_user(&user).await?;
            }
        }

        tracing::debug!(external_id = %admin.id, "Reconciled admin");
    }

    Ok(admins.len())
}

// ─── Field Derivation ────────────────────────────────────────────────

/// "first last" with surrounding whitespace trimmed.
fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first, last).trim().to_string()
}

/// Lower-cased, trimmed email; empty string when the remote omits it.
fn normalize_email(email: Option<&str>) -> String {
    email.map(|e| e.trim().to_lowercase()).unwrap_or_default()
}

/// Base-10 parse of a textual numeric field.
///
/// Parse failure means "unset", never an error - Bomber stores these
/// as free text and values like "N/A" are common.
fn parse_number(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse::<i64>().ok())
}

/// Comma-joined non-empty parts of [line1, line2, "city, state zip"].
fn format_address(address: &BomberAddress) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    if let Some(line1) = non_empty(address.address1.as_deref()) {
        parts.push(line1.to_string());
    }
    if let Some(line2) = non_empty(address.address2.as_deref()) {
        parts.push(line2.to_string());
    }

    // "city, state zip" from whichever pieces are present
    let mut locality = match (
        non_empty(address.city.as_deref()),
        non_empty(address.state.as_deref()),
    ) {
        (Some(city), Some(state)) => format!("{}, {}", city, state),
        (Some(city), None) => city.to_string(),
        (None, Some(state)) => state.to_string(),
        (None, None) => String::new(),
    };
    if let Some(zip) = non_empty(address.zip.as_deref()) {
        if locality.is_empty() {
            locality = zip.to_string();
        } else {
            locality = format!("{} {}", locality, zip);
        }
    }
    if !locality.is_empty() {
        parts.push(locality);
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// "city, state" when both are present, unset otherwise.
fn format_location(address: &BomberAddress) -> Option<String> {
    match (
        non_empty(address.city.as_deref()),
        non_empty(address.state.as_deref()),
    ) {
        (Some(city), Some(state)) => Some(format!("{}, {}", city, state)),
        _ => None,
    }
}

/// Placeholder sport derivation: a fixed constant whenever the athlete
/// has a team, unset otherwise. The reconciliation flow only calls
/// this one function, so a real mapping can replace it in place.
fn guess_sport(team: Option<&BomberTeam>) -> Option<String> {
    team.map(|_| DEFAULT_SPORT.to_string())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
