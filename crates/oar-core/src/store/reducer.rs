// ── Reducer ──
//
// Pure state transition: `(state, action) → state`. The store is the only
// caller outside of tests.

use super::action::Action;
use super::state::{AppState, ClaimedFacilityDetailsState, RequestState};

/// Apply `action` to `state` in place.
pub fn reduce(state: &mut AppState, action: &Action) {
    match action {
        // ── Feature flags ────────────────────────────────────────────
        Action::StartFetchFeatureFlags => {
            state.feature_flags.request = RequestState::Pending;
        }
        Action::FailFetchFeatureFlags(msg) => {
            state.feature_flags.request = RequestState::Failed(msg.clone());
        }
        Action::CompleteFetchFeatureFlags(flags) => {
            state.feature_flags.request = RequestState::Fulfilled;
            state.feature_flags.flags = flags.clone();
        }

        // ── Client info ──────────────────────────────────────────────
        Action::StartFetchClientInfo => {
            state.client_info.request = RequestState::Pending;
        }
        Action::FailFetchClientInfo(msg) => {
            state.client_info.request = RequestState::Failed(msg.clone());
        }
        Action::CompleteFetchClientInfo(info) => {
            state.client_info.request = RequestState::Fulfilled;
            state.client_info.info = Some(info.clone());
        }

        // ── Session ──────────────────────────────────────────────────
        Action::StartSessionLogin => {
            state.session.request = RequestState::Pending;
        }
        Action::FailSessionLogin(msg) => {
            state.session.request = RequestState::Failed(msg.clone());
        }
        Action::CompleteSessionLogin(user) => {
            state.session.request = RequestState::Fulfilled;
            state.session.user.clone_from(user);
        }

        // ── Claimed facility details ─────────────────────────────────
        Action::StartFetchClaimedFacilityDetails { claim_id } => {
            let slice = &mut state.claimed_facility_details;
            if !slice.is_for(claim_id) {
                // Data of another claim must not show under this one.
                *slice = ClaimedFacilityDetailsState {
                    claim_id: Some(claim_id.clone()),
                    ..ClaimedFacilityDetailsState::default()
                };
            }
            slice.fetch = RequestState::Pending;
        }
        Action::FailFetchClaimedFacilityDetails { claim_id, message } => {
            let slice = &mut state.claimed_facility_details;
            if slice.is_for(claim_id) {
                slice.fetch = RequestState::Failed(message.clone());
            }
        }
        Action::CompleteFetchClaimedFacilityDetails { claim_id, details } => {
            let slice = &mut state.claimed_facility_details;
            if slice.is_for(claim_id) {
                slice.fetch = RequestState::Fulfilled;
                slice.data = Some(details.clone());
            }
        }
        Action::ClearClaimedFacilityDetails => {
            state.claimed_facility_details = ClaimedFacilityDetailsState::default();
        }
        Action::StartUpdateClaimedFacilityDetails { claim_id } => {
            let slice = &mut state.claimed_facility_details;
            if slice.is_for(claim_id) {
                slice.update = RequestState::Pending;
            }
        }
        Action::FailUpdateClaimedFacilityDetails { claim_id, message } => {
            let slice = &mut state.claimed_facility_details;
            if slice.is_for(claim_id) {
                slice.update = RequestState::Failed(message.clone());
            }
        }
        Action::CompleteUpdateClaimedFacilityDetails { claim_id, details } => {
            // The server's copy wins over whatever was edited locally.
            let slice = &mut state.claimed_facility_details;
            if slice.is_for(claim_id) {
                slice.update = RequestState::Fulfilled;
                slice.data = Some(details.clone());
            }
        }
        Action::UpdateClaimedFacilityField { field, value } => {
            if let Some(data) = state.claimed_facility_details.data.as_mut() {
                data.set(*field, value.clone());
            }
        }
    }
}
