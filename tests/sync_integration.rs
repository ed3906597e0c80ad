// SPDX-License-Identifier: MIT

//! Reconciliation integration tests.
//!
//! These tests require the Firestore emulator to be running
//! (FIRESTORE_EMULATOR_HOST set); they drive the reconciler directly
//! with literal Bomber records, keeping the remote endpoint out of the
//! loop.

use nil_sync::models::Role;
use nil_sync::services::bomber::{
    BomberAddress, BomberAdmin, BomberAthlete, BomberParent, BomberParentUser, BomberTeam,
    BomberUser,
};
use nil_sync::services::sync::{reconcile_admins, reconcile_athletes};

mod common;
use common::test_db;

/// Generate a unique external id for test isolation.
fn unique_external_id(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}_{}", prefix, nanos)
}

/// One fully-populated athlete with the given parents.
fn test_athlete(external_id: &str, parents: Vec<BomberParent>) -> BomberAthlete {
    BomberAthlete {
        id: format!("ath_{}", external_id),
        jersey_num: Some("7".to_string()),
        position1: Some("SS".to_string()),
        position2: Some("2B".to_string()),
        age_group: Some("16U".to_string()),
        grad_year: Some("2027".to_string()),
        college: None,
        user: BomberUser {
            id: external_id.to_string(),
            email: Some("Kid@Example.com".to_string()),
            first_name: "Casey".to_string(),
            last_name: "Jones".to_string(),
        },
        team: Some(BomberTeam {
            id: "team_1".to_string(),
            name: Some("Bombers 16U".to_string()),
            age_group: Some("16U".to_string()),
            region: Some("South".to_string()),
            state: Some("TX".to_string()),
        }),
        address: Some(BomberAddress {
            id: "addr_1".to_string(),
            address1: Some("1 Main St".to_string()),
            address2: None,
            city: Some("Austin".to_string()),
            state: Some("TX".to_string()),
            zip: Some("78701".to_string()),
        }),
        parents,
    }
}

fn test_parent(id: &str, first: &str) -> BomberParent {
    BomberParent {
        id: id.to_string(),
        user: BomberParentUser {
            first_name: first.to_string(),
            last_name: "Jones".to_string(),
            email: Some(format!("{}@example.com", first.to_lowercase())),
            phone: Some("555-0100".to_string()),
        },
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ATHLETE SYNC
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_athlete_sync_creates_user_profile_and_contacts() {
    require_emulator!();

    let db = test_db().await;
    let external_id = unique_external_id("usr");
    let athlete = test_athlete(&external_id, vec![test_parent("par_1", "Pat"), test_parent("par_2", "Sam")]);

    let count = reconcile_athletes(&db, &[athlete]).await.unwrap();
    assert_eq!(count, 1);

    // User created with normalized email and athlete role
    let user = db
        .get_user_by_external_id(&external_id)
        .await
        .unwrap()
        .expect("User should exist after sync");
    assert_eq!(user.external_id, external_id);
    assert_eq!(user.email, "kid@example.com");
    assert_eq!(user.role, Role::Athlete);
    assert_eq!(user.first_name, None);

    // Profile created with derived fields
    let profile = db
        .get_athlete_profile(user.id)
        .await
        .unwrap()
        .expect("Profile should exist after sync");
    assert_eq!(profile.user_id, user.id);
    assert_eq!(profile.name, "Casey Jones");
    assert_eq!(profile.jersey_number, Some(7));
    assert_eq!(profile.grad_year, Some(2027));
    assert_eq!(profile.team_name.as_deref(), Some("Bombers 16U"));
    assert_eq!(profile.sport.as_deref(), Some("Baseball"));
    assert_eq!(profile.address.as_deref(), Some("1 Main St, Austin, TX 78701"));
    assert_eq!(profile.location.as_deref(), Some("Austin, TX"));
    assert!(!profile.profile_complete);

    // Both parents materialized with the fixed relationship
    let contacts = db.get_parent_contacts(profile.id).await.unwrap();
    assert_eq!(contacts.len(), 2);
    assert!(contacts.iter().all(|c| c.relationship == "Parent"));
    assert!(contacts.iter().all(|c| c.athlete_id == profile.id));
}

#[tokio::test]
async fn test_athlete_sync_is_idempotent() {
    require_emulator!();

    let db = test_db().await;
    let external_id = unique_external_id("usr");
    let athlete = test_athlete(&external_id, vec![test_parent("par_1", "Pat")]);

    reconcile_athletes(&db, &[athlete.clone()]).await.unwrap();

    let user_first = db
        .get_user_by_external_id(&external_id)
        .await
        .unwrap()
        .unwrap();
    let profile_first = db.get_athlete_profile(user_first.id).await.unwrap().unwrap();

    // Second run with an unchanged snapshot
    reconcile_athletes(&db, &[athlete]).await.unwrap();

    let user_second = db
        .get_user_by_external_id(&external_id)
        .await
        .unwrap()
        .unwrap();
    let profile_second = db
        .get_athlete_profile(user_second.id)
        .await
        .unwrap()
        .unwrap();

    // Same identities, same field values
    assert_eq!(user_second.id, user_first.id);
    assert_eq!(user_second.email, user_first.email);
    assert_eq!(user_second.created_at, user_first.created_at);
    assert_eq!(profile_second.id, profile_first.id);
    assert_eq!(profile_second.name, profile_first.name);
    assert_eq!(profile_second.jersey_number, profile_first.jersey_number);
    assert_eq!(profile_second.address, profile_first.address);
    assert_eq!(profile_second.created_at, profile_first.created_at);

    // Contact set is content-equal (ids may differ across runs)
    let contacts = db.get_parent_contacts(profile_second.id).await.unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].first_name, "Pat");
}

#[tokio::test]
async fn test_parent_replacement_follows_remote_shrink() {
    require_emulator!();

    let db = test_db().await;
    let external_id = unique_external_id("usr");

    // First run: two parents
    let athlete = test_athlete(&external_id, vec![test_parent("par_1", "Pat"), test_parent("par_2", "Sam")]);
    reconcile_athletes(&db, &[athlete]).await.unwrap();

    let user = db
        .get_user_by_external_id(&external_id)
        .await
        .unwrap()
        .unwrap();
    let profile = db.get_athlete_profile(user.id).await.unwrap().unwrap();
    assert_eq!(db.get_parent_contacts(profile.id).await.unwrap().len(), 2);

    // Second run: remote list trimmed to one
    let trimmed = test_athlete(&external_id, vec![test_parent("par_2", "Sam")]);
    reconcile_athletes(&db, &[trimmed]).await.unwrap();

    let contacts = db.get_parent_contacts(profile.id).await.unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].first_name, "Sam");
}

#[tokio::test]
async fn test_existing_user_keeps_non_email_fields() {
    require_emulator!();

    let db = test_db().await;
    let external_id = unique_external_id("usr");

    let athlete = test_athlete(&external_id, vec![]);
    reconcile_athletes(&db, &[athlete]).await.unwrap();

    // Simulate a name set outside the sync
    let mut user = db
        .get_user_by_external_id(&external_id)
        .await
        .unwrap()
        .unwrap();
    user.first_name = Some("Casey".to_string());
    db.upsert_user(&user).await.unwrap();

    // Re-sync with a changed email: only the email moves
    let mut updated = test_athlete(&external_id, vec![]);
    updated.user.email = Some("New@Example.com".to_string());
    reconcile_athletes(&db, &[updated]).await.unwrap();

    let after = db
        .get_user_by_external_id(&external_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.email, "new@example.com");
    assert_eq!(after.first_name.as_deref(), Some("Casey"));
    assert_eq!(after.role, Role::Athlete);
}

#[tokio::test]
async fn test_unparseable_jersey_number_is_unset() {
    require_emulator!();

    let db = test_db().await;
    let external_id = unique_external_id("usr");

    let mut athlete = test_athlete(&external_id, vec![]);
    athlete.jersey_num = Some("N/A".to_string());
    reconcile_athletes(&db, &[athlete]).await.unwrap();

    let user = db
        .get_user_by_external_id(&external_id)
        .await
        .unwrap()
        .unwrap();
    let profile = db.get_athlete_profile(user.id).await.unwrap().unwrap();
    assert_eq!(profile.jersey_number, None);
}

// ═══════════════════════════════════════════════════════════════════════════
// ADMIN SYNC
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_admin_sync_creates_admin_user() {
    require_emulator!();

    let db = test_db().await;
    let external_id = unique_external_id("adm");

    let admin = BomberAdmin {
        id: external_id.clone(),
        email: " Ops@Example.com ".to_string(),
        first_name: Some("Alex".to_string()),
        last_name: Some("Rivera".to_string()),
        phone: None,
        role: Some("SUPER_ADMIN".to_string()),
        email_verified: true,
    };

    let count = reconcile_admins(&db, &[admin]).await.unwrap();
    assert_eq!(count, 1);

    let user = db
        .get_user_by_external_id(&external_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.email, "ops@example.com");
    assert_eq!(user.role, Role::Admin);
    assert_eq!(user.first_name.as_deref(), Some("Alex"));
}

#[tokio::test]
async fn test_admin_sync_elevates_existing_user_in_place() {
    require_emulator!();

    let db = test_db().await;
    let external_id = unique_external_id("usr");

    // External id first appears as an athlete
    let athlete = test_athlete(&external_id, vec![]);
    reconcile_athletes(&db, &[athlete]).await.unwrap();

    let before = db
        .get_user_by_external_id(&external_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(before.role, Role::Athlete);

    // Same external id arrives in the admin feed, names absent
    let admin = BomberAdmin {
        id: external_id.clone(),
        email: "kid@example.com".to_string(),
        first_name: None,
        last_name: None,
        phone: None,
        role: Some("ADMIN".to_string()),
        email_verified: false,
    };
    reconcile_admins(&db, &[admin]).await.unwrap();

    let after = db
        .get_user_by_external_id(&external_id)
        .await
        .unwrap()
        .unwrap();
    // Elevated in place: same internal id, no duplicate record
    assert_eq!(after.id, before.id);
    assert_eq!(after.role, Role::Admin);
    // Missing remote names overwrite to absent, never keep stale values
    assert_eq!(after.first_name, None);
}

// ═══════════════════════════════════════════════════════════════════════════
// TWO-RUN SCENARIO
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_two_run_scenario_with_trimmed_parents() {
    require_emulator!();

    let db = test_db().await;
    let external_id = unique_external_id("usr");

    // Run 1: one athlete, two parents
    let athlete = test_athlete(&external_id, vec![test_parent("par_1", "Pat"), test_parent("par_2", "Sam")]);
    reconcile_athletes(&db, &[athlete]).await.unwrap();

    let user = db
        .get_user_by_external_id(&external_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.role, Role::Athlete);
    let profile = db.get_athlete_profile(user.id).await.unwrap().unwrap();
    assert_eq!(db.get_parent_contacts(profile.id).await.unwrap().len(), 2);

    // Run 2: same athlete, parents trimmed to one
    let trimmed = test_athlete(&external_id, vec![test_parent("par_1", "Pat")]);
    reconcile_athletes(&db, &[trimmed]).await.unwrap();

    let user_after = db
        .get_user_by_external_id(&external_id)
        .await
        .unwrap()
        .unwrap();
    let profile_after = db.get_athlete_profile(user_after.id).await.unwrap().unwrap();

    // Still one user, one profile, unchanged fields; now one contact
    assert_eq!(user_after.id, user.id);
    assert_eq!(profile_after.id, profile.id);
    assert_eq!(profile_after.name, profile.name);
    assert_eq!(profile_after.jersey_number, profile.jersey_number);
    assert_eq!(db.get_parent_contacts(profile_after.id).await.unwrap().len(), 1);
}
