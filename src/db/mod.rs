//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Athlete profiles (keyed by the owning user's internal id)
    pub const ATHLETE_PROFILES: &str = "athlete_profiles";
    pub const PARENT_CONTACTS: &str = "parent_contacts";
}
