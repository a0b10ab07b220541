//! Application state slices, one per action family.

use crate::model::{ClaimDetails, ClientInfo, FeatureFlags, User};

/// Lifecycle of one async request.
///
/// `Idle → Pending → {Fulfilled | Failed}`; a clear action returns the
/// family to `Idle`. A fulfilled payload lives in its slice's data field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Failed(String),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFlagsState {
    pub request: RequestState,
    pub flags: FeatureFlags,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfoState {
    pub request: RequestState,
    pub info: Option<ClientInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub request: RequestState,
    pub user: Option<User>,
}

/// Claim detail record plus the state of its fetch and update requests.
///
/// `data` doubles as the edit buffer: field edits are merged into it and
/// an update sends it as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimedFacilityDetailsState {
    /// Claim the slice belongs to, set when a fetch starts.
    pub claim_id: Option<String>,
    pub fetch: RequestState,
    pub update: RequestState,
    pub data: Option<ClaimDetails>,
}

impl ClaimedFacilityDetailsState {
    pub fn is_for(&self, claim_id: &str) -> bool {
        self.claim_id.as_deref() == Some(claim_id)
    }
}

/// Everything the views render from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub feature_flags: FeatureFlagsState,
    pub client_info: ClientInfoState,
    pub session: SessionState,
    pub claimed_facility_details: ClaimedFacilityDetailsState,
}
