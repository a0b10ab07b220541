// oar-core: Application state, routing, and action orchestration between
// oar-api and the shell.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, TlsVerification};
pub use controller::{
    Controller, FETCH_CLAIMED_FACILITY_DETAILS_ERROR, UPDATE_CLAIMED_FACILITY_DETAILS_ERROR,
};
pub use error::CoreError;
pub use routes::{CLAIM_A_FACILITY, Resolved, RouteParams, View, resolve};
pub use store::{Action, AppState, RequestState, Store};

// Re-export model types at the crate root for ergonomics.
pub use model::{ClaimDetails, ClaimField, ClientInfo, FeatureFlags, User, normalize_nulls};
