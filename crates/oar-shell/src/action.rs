//! UI actions. Every change to shell state goes through the app loop as
//! one of these.

use std::sync::Arc;

use serde_json::Value;

use oar_core::{AppState, ClaimField, Resolved};

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,

    // ── Navigation ────────────────────────────────────────────────
    /// Go to a path, pushing it onto the history.
    Navigate(String),
    GoBack,
    /// Sent to the active view after every route change.
    RouteChanged(Resolved),
    OpenPrompt,
    ClosePrompt,
    ToggleHelp,

    // ── Store ─────────────────────────────────────────────────────
    StateChanged(Arc<AppState>),

    // ── Claimed facility details ──────────────────────────────────
    FetchClaimedFacilityDetails(String),
    SubmitClaimedFacilityDetails(String),
    EditClaimField { field: ClaimField, value: Value },

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
}
