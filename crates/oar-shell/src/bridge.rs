//! Store bridge: forwards store changes into the TUI action loop.
//!
//! State snapshots become [`Action::StateChanged`]; failures, saves and
//! sign-ins become toasts.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use oar_core::{Action as StoreAction, Store};

use crate::action::{Action, Notification};

pub async fn spawn_store_bridge(
    store: Arc<Store>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut state_rx = store.subscribe();
    let mut store_actions = store.subscribe_actions();

    // Initial snapshot so views render whatever is already loaded.
    let initial = state_rx.borrow_and_update().clone();
    let _ = action_tx.send(Action::StateChanged(Arc::new(initial)));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Ok(()) = state_rx.changed() => {
                let snapshot = state_rx.borrow_and_update().clone();
                if action_tx.send(Action::StateChanged(Arc::new(snapshot))).is_err() {
                    break;
                }
            }
            received = store_actions.recv() => match received {
                Ok(store_action) => {
                    if let Some(notification) = notification_for(&store_action) {
                        let _ = action_tx.send(Action::Notify(notification));
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "store bridge lagged behind store actions");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    debug!("store bridge shut down");
}

/// Toast for a store action, if it deserves one.
fn notification_for(store_action: &StoreAction) -> Option<Notification> {
    if let Some(message) = store_action.failure_message() {
        return Some(Notification::error(message));
    }
    match store_action {
        StoreAction::CompleteUpdateClaimedFacilityDetails { .. } => {
            Some(Notification::success("Facility claim details saved"))
        }
        StoreAction::CompleteSessionLogin(Some(user)) => {
            Some(Notification::info(format!("Signed in as {}", user.email)))
        }
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::action::NotificationLevel;

    #[tokio::test]
    async fn forwards_state_and_failures() {
        let store = Arc::new(Store::new());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(spawn_store_bridge(
            Arc::clone(&store),
            tx,
            cancel.clone(),
        ));

        // Initial snapshot.
        assert!(matches!(rx.recv().await.unwrap(), Action::StateChanged(_)));

        store.dispatch(oar_core::Action::FailFetchClientInfo("geo down".into()));

        let mut notified = None;
        let mut saw_state = false;
        while notified.is_none() || !saw_state {
            match rx.recv().await.unwrap() {
                Action::StateChanged(state) => {
                    saw_state = true;
                    assert_eq!(state.client_info.request.error(), Some("geo down"));
                }
                Action::Notify(n) => notified = Some(n),
                other => panic!("unexpected action {other:?}"),
            }
        }
        let notified = notified.unwrap();
        assert_eq!(notified.level, NotificationLevel::Error);
        assert_eq!(notified.message, "geo down");

        cancel.cancel();
        handle.await.unwrap();
    }
}
