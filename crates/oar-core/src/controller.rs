// ── Controller ──
//
// Owns the API client and the store, and runs every async action family:
// dispatch "start", await the call, then dispatch "complete" with the
// normalized payload or log the error and dispatch "fail".

use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use oar_api::{OarClient, TransportConfig};

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{ClaimField, normalize_nulls};
use crate::store::{Action, Store};

pub const FETCH_CLAIMED_FACILITY_DETAILS_ERROR: &str =
    "An error prevented fetching details about that claimed facility";
pub const UPDATE_CLAIMED_FACILITY_DETAILS_ERROR: &str =
    "An error prevented updating that facility claim's details";

const FETCH_FEATURE_FLAGS_ERROR: &str = "An error prevented fetching feature flags";
const FETCH_CLIENT_INFO_ERROR: &str = "An error prevented fetching client info";
const SESSION_LOGIN_ERROR: &str = "An error prevented resuming your session";

/// Entry point for the shell.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. Operations never return
/// errors to their caller; outcomes are observable through the store.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ClientConfig,
    client: OarClient,
    store: Arc<Store>,
}

impl Controller {
    /// Build the HTTP client described by `config`. Performs no I/O.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: (&config.tls).into(),
            timeout: config.timeout,
            ..TransportConfig::default()
        };
        let client = OarClient::new(config.url.clone(), &transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Use an already-built client (tests, shared sessions).
    pub fn with_client(config: ClientConfig, client: OarClient) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                config,
                client,
                store: Arc::new(Store::new()),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.inner.store
    }

    pub fn client(&self) -> &OarClient {
        &self.inner.client
    }

    // ── Startup ──────────────────────────────────────────────────

    /// Fire the three startup effects. Nothing waits on them.
    pub fn bootstrap(&self) -> Vec<JoinHandle<()>> {
        info!(url = %self.inner.config.url, "bootstrapping session");
        vec![
            self.fetch_feature_flags(),
            self.fetch_client_info(),
            self.session_login(),
        ]
    }

    pub fn fetch_feature_flags(&self) -> JoinHandle<()> {
        let store = Arc::clone(&self.inner.store);
        let client = self.inner.client.clone();
        store.dispatch(Action::StartFetchFeatureFlags);
        tokio::spawn(async move {
            match client.get_feature_flags().await {
                Ok(flags) => store.dispatch(Action::CompleteFetchFeatureFlags(flags.into())),
                Err(e) => {
                    let e = CoreError::from(e);
                    error!(error = %e, "feature flag fetch failed");
                    store.dispatch(Action::FailFetchFeatureFlags(
                        FETCH_FEATURE_FLAGS_ERROR.into(),
                    ));
                }
            }
        })
    }

    pub fn fetch_client_info(&self) -> JoinHandle<()> {
        let store = Arc::clone(&self.inner.store);
        let client = self.inner.client.clone();
        store.dispatch(Action::StartFetchClientInfo);
        tokio::spawn(async move {
            match client.get_client_info().await {
                Ok(info) => store.dispatch(Action::CompleteFetchClientInfo(info.into())),
                Err(e) => {
                    let e = CoreError::from(e);
                    error!(error = %e, "client info fetch failed");
                    store.dispatch(Action::FailFetchClientInfo(FETCH_CLIENT_INFO_ERROR.into()));
                }
            }
        })
    }

    /// Resume the server-side session. Not being logged in is a success
    /// with no user.
    pub fn session_login(&self) -> JoinHandle<()> {
        let store = Arc::clone(&self.inner.store);
        let client = self.inner.client.clone();
        store.dispatch(Action::StartSessionLogin);
        tokio::spawn(async move {
            match client.get_session_user().await {
                Ok(user) => {
                    debug!(logged_in = user.is_some(), "session resumed");
                    store.dispatch(Action::CompleteSessionLogin(user.map(Into::into)));
                }
                Err(e) => {
                    let e = CoreError::from(e);
                    error!(error = %e, "session login failed");
                    store.dispatch(Action::FailSessionLogin(SESSION_LOGIN_ERROR.into()));
                }
            }
        })
    }

    // ── Claimed facility details ─────────────────────────────────

    /// Load the detail record of an approved claim.
    ///
    /// Returns `None` without dispatching anything when `claim_id` is
    /// missing or empty. Overlapping calls are not de-duplicated; the last
    /// one to resolve wins.
    pub fn fetch_claimed_facility_details(&self, claim_id: Option<&str>) -> Option<JoinHandle<()>> {
        let claim_id = non_empty(claim_id)?;
        let store = Arc::clone(&self.inner.store);
        let client = self.inner.client.clone();

        store.dispatch(Action::StartFetchClaimedFacilityDetails {
            claim_id: claim_id.clone(),
        });
        Some(tokio::spawn(async move {
            match client.get_claimed_facility_details(&claim_id).await {
                Ok(details) => store.dispatch(Action::CompleteFetchClaimedFacilityDetails {
                    claim_id,
                    details: normalize_nulls(details),
                }),
                Err(e) => {
                    let e = CoreError::from(e);
                    error!(claim_id = %claim_id, error = %e, "claimed facility fetch failed");
                    store.dispatch(Action::FailFetchClaimedFacilityDetails {
                        claim_id,
                        message: FETCH_CLAIMED_FACILITY_DETAILS_ERROR.into(),
                    });
                }
            }
        }))
    }

    /// Send the edit buffer to the server.
    ///
    /// Returns `None` without dispatching anything when no details are
    /// loaded for `claim_id`, or `claim_id` is missing or empty. On success
    /// the server's copy replaces local edits.
    pub fn submit_claimed_facility_details_update(
        &self,
        claim_id: Option<&str>,
    ) -> Option<JoinHandle<()>> {
        let store = Arc::clone(&self.inner.store);
        let (loaded_for, details) = store.with_state(|s| {
            let slice = &s.claimed_facility_details;
            slice.data.clone().map(|data| (slice.claim_id.clone(), data))
        })?;
        let claim_id = non_empty(claim_id)?;
        if loaded_for.as_deref() != Some(claim_id.as_str()) {
            warn!(
                claim_id = %claim_id,
                loaded_for = ?loaded_for,
                "loaded details belong to another claim"
            );
            return None;
        }
        let client = self.inner.client.clone();

        store.dispatch(Action::StartUpdateClaimedFacilityDetails {
            claim_id: claim_id.clone(),
        });
        Some(tokio::spawn(async move {
            match client
                .update_claimed_facility_details(&claim_id, &details)
                .await
            {
                Ok(updated) => store.dispatch(Action::CompleteUpdateClaimedFacilityDetails {
                    claim_id,
                    details: normalize_nulls(updated),
                }),
                Err(e) => {
                    let e = CoreError::from(e);
                    error!(claim_id = %claim_id, error = %e, "claimed facility update failed");
                    store.dispatch(Action::FailUpdateClaimedFacilityDetails {
                        claim_id,
                        message: UPDATE_CLAIMED_FACILITY_DETAILS_ERROR.into(),
                    });
                }
            }
        }))
    }

    pub fn clear_claimed_facility_details(&self) {
        self.inner.store.dispatch(Action::ClearClaimedFacilityDetails);
    }

    /// Edit one field of the loaded details. Values are not validated.
    pub fn update_claimed_facility_field(&self, field: ClaimField, value: Value) {
        self.inner
            .store
            .dispatch(Action::UpdateClaimedFacilityField { field, value });
    }
}

fn non_empty(id: Option<&str>) -> Option<String> {
    id.filter(|id| !id.is_empty()).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ids_are_falsy() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("7")).as_deref(), Some("7"));
    }
}
