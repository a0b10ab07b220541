// ── Central reactive store ──
//
// Holds the single `AppState`. Dispatch runs the reducer under the watch
// channel's lock, then fans the action out to action subscribers.

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::debug;

use super::action::Action;
use super::reducer::reduce;
use super::state::AppState;

const ACTION_CHANNEL_CAPACITY: usize = 256;

/// Central store for application state.
///
/// State subscribers see coalesced snapshots through `watch`; action
/// subscribers see every dispatched action through `broadcast`.
pub struct Store {
    state: watch::Sender<AppState>,
    actions: broadcast::Sender<Arc<Action>>,
}

impl Store {
    pub fn new() -> Self {
        let (state, _) = watch::channel(AppState::default());
        let (actions, _) = broadcast::channel(ACTION_CHANNEL_CAPACITY);
        Self { state, actions }
    }

    /// Apply `action` and notify subscribers.
    pub fn dispatch(&self, action: Action) {
        debug!(action = action.name(), "dispatch");
        self.state.send_modify(|state| reduce(state, &action));
        // No receivers is fine; nobody is listening for actions yet.
        let _ = self.actions.send(Arc::new(action));
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Read the current state without cloning it.
    pub fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    pub fn subscribe_actions(&self) -> broadcast::Receiver<Arc<Action>> {
        self.actions.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::RequestState;

    #[tokio::test]
    async fn dispatch_updates_state_and_notifies() {
        let store = Store::new();
        let mut state_rx = store.subscribe();
        let mut action_rx = store.subscribe_actions();

        let start = Action::StartFetchClaimedFacilityDetails {
            claim_id: "7".into(),
        };
        store.dispatch(start.clone());

        assert!(state_rx.has_changed().unwrap());
        assert_eq!(
            state_rx.borrow_and_update().claimed_facility_details.fetch,
            RequestState::Pending
        );
        let action = action_rx.recv().await.unwrap();
        assert_eq!(*action, start);
    }

    #[test]
    fn dispatch_without_subscribers_is_fine() {
        let store = Store::default();
        store.dispatch(Action::StartSessionLogin);
        assert!(store.with_state(|s| s.session.request.is_pending()));
    }
}
