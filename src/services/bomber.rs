// SPDX-License-Identifier: MIT

//! Bomber integration API client.
//!
//! Fetches the two record sets the sync reconciles:
//! - NIL-eligible athletes (with nested user, team, address, and
//!   parent sub-records)
//! - Admin users
//!
//! Every response arrives in a `{success, count, data}` envelope; the
//! client returns `data` unmodified. No retry happens at this layer -
//! fetch failures propagate to the caller.

use crate::error::AppError;
use serde::Deserialize;

/// Bomber integration API client.
///
/// Constructed once at startup with the base URL and integration key
/// and passed to the sync service, so tests can point it at a fake
/// server instead of patching module state.
#[derive(Clone)]
pub struct BomberClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl BomberClient {
    /// Create a new Bomber client with an integration API key.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Fetch all NIL-eligible athlete records.
    pub async fn fetch_nil_athletes(&self) -> Result<Vec<BomberAthlete>, AppError> {
        let url = format!("{}/integrations/nil-athletes", self.base_url);
        self.get_envelope(&url).await
    }

    /// Fetch all admin-user records.
    pub async fn fetch_admins(&self) -> Result<Vec<BomberAdmin>, AppError> {
        let url = format!("{}/integrations/admins", self.base_url);
        self.get_envelope(&url).await
    }

    /// Authenticated GET returning the `data` of a Bomber envelope.
    async fn get_envelope<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
    ) -> Result<Vec<T>, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::BomberApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::BomberApi(format!("HTTP {}: {}", status, body)));
        }

        let envelope: BomberEnvelope<T> = response
            .json()
            .await
            .map_err(|e| AppError::BomberApi(format!("JSON parse error: {}", e)))?;

        Ok(envelope.data)
    }
}

/// Response envelope wrapping every Bomber integration endpoint.
#[derive(Debug, Deserialize)]
pub struct BomberEnvelope<T> {
    pub success: bool,
    pub count: u32,
    pub data: Vec<T>,
}

/// NIL-eligible athlete record from Bomber.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomberAthlete {
    pub id: String,
    /// Jersey number as Bomber stores it: free text ("7", "N/A", ...)
    pub jersey_num: Option<String>,
    pub position1: Option<String>,
    pub position2: Option<String>,
    pub age_group: Option<String>,
    /// Grad year as free text
    pub grad_year: Option<String>,
    pub college: Option<String>,
    pub user: BomberUser,
    pub team: Option<BomberTeam>,
    pub address: Option<BomberAddress>,
    #[serde(default)]
    pub parents: Vec<BomberParent>,
}

/// Nested user sub-record on an athlete.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomberUser {
    pub id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Team sub-record on an athlete.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomberTeam {
    pub id: String,
    pub name: Option<String>,
    pub age_group: Option<String>,
    pub region: Option<String>,
    pub state: Option<String>,
}

/// Address sub-record on an athlete.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomberAddress {
    pub id: String,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

/// Parent sub-record on an athlete (ordered as Bomber returns them).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomberParent {
    pub id: String,
    pub user: BomberParentUser,
}

/// Nested user sub-record on a parent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomberParentUser {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Admin-user record from Bomber.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomberAdmin {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
}
