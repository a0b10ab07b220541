//! Every state transition is expressed as an `Action`.

use serde_json::Value;
use strum::IntoStaticStr;

use crate::model::{ClaimDetails, ClaimField, ClientInfo, FeatureFlags, User};

/// Events dispatched into the [`Store`](super::Store).
///
/// Each async family has a start / fail / complete triple. `fail`
/// variants carry the user-facing message.
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    // ── Feature flags ─────────────────────────────────────────────
    StartFetchFeatureFlags,
    FailFetchFeatureFlags(String),
    CompleteFetchFeatureFlags(FeatureFlags),

    // ── Client info ───────────────────────────────────────────────
    StartFetchClientInfo,
    FailFetchClientInfo(String),
    CompleteFetchClientInfo(ClientInfo),

    // ── Session ───────────────────────────────────────────────────
    StartSessionLogin,
    FailSessionLogin(String),
    CompleteSessionLogin(Option<User>),

    // ── Claimed facility details: fetch ───────────────────────────
    // Every request event names its claim; results for a claim other than
    // the one the slice belongs to are dropped by the reducer.
    StartFetchClaimedFacilityDetails {
        claim_id: String,
    },
    FailFetchClaimedFacilityDetails {
        claim_id: String,
        message: String,
    },
    CompleteFetchClaimedFacilityDetails {
        claim_id: String,
        details: ClaimDetails,
    },
    ClearClaimedFacilityDetails,

    // ── Claimed facility details: update ──────────────────────────
    StartUpdateClaimedFacilityDetails {
        claim_id: String,
    },
    FailUpdateClaimedFacilityDetails {
        claim_id: String,
        message: String,
    },
    CompleteUpdateClaimedFacilityDetails {
        claim_id: String,
        details: ClaimDetails,
    },

    // ── Claimed facility details: field edits ─────────────────────
    /// Set one field of the edit buffer. Not validated.
    UpdateClaimedFacilityField { field: ClaimField, value: Value },
}

impl Action {
    /// Redux-style action type, e.g. `START_FETCH_CLAIMED_FACILITY_DETAILS`.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// The user-facing message of a `Fail*` action.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::FailFetchFeatureFlags(msg)
            | Self::FailFetchClientInfo(msg)
            | Self::FailSessionLogin(msg)
            | Self::FailFetchClaimedFacilityDetails { message: msg, .. }
            | Self::FailUpdateClaimedFacilityDetails { message: msg, .. } => Some(msg),
            _ => None,
        }
    }
}
