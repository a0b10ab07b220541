// Wire types for the session-level endpoints.
//
// Claim details are deliberately left untyped (`serde_json::Map`): the
// client edits them field by field and sends them back verbatim.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `GET /api-feature-flags/` -- flag name to enabled state.
pub type FeatureFlagsResponse = HashMap<String, bool>;

/// `GET /api/client-info/` -- geo information about the requesting client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfoResponse {
    /// ISO 3166-1 alpha-2 code, when the server could resolve one.
    #[serde(default)]
    pub country: Option<String>,
}

/// `GET /user-login/` -- the user attached to the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contributor_id: Option<u64>,
    #[serde(default)]
    pub is_superuser: bool,
}
