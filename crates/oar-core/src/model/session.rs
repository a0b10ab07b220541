//! Session-scoped data loaded at startup: feature flags, client geo info,
//! and the logged-in user.

use std::collections::HashMap;

use oar_api::{ClientInfoResponse, FeatureFlagsResponse, UserResponse};

/// Named capability toggles resolved by the server.
///
/// Unknown flags read as disabled, so gated routes stay closed until the
/// flags have loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFlags(HashMap<String, bool>);

impl FeatureFlags {
    pub fn is_enabled(&self, flag: &str) -> bool {
        self.0.get(flag).copied().unwrap_or(false)
    }

    /// Build from `(name, enabled)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<FeatureFlagsResponse> for FeatureFlags {
    fn from(flags: FeatureFlagsResponse) -> Self {
        Self(flags)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub country: Option<String>,
}

impl From<ClientInfoResponse> for ClientInfo {
    fn from(info: ClientInfoResponse) -> Self {
        Self {
            country: info.country,
        }
    }
}

/// The user attached to the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub name: Option<String>,
    pub contributor_id: Option<u64>,
}

impl From<UserResponse> for User {
    fn from(user: UserResponse) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            contributor_id: user.contributor_id,
        }
    }
}
