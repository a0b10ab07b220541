// ── Application store ──
//
// One store per application. State changes only through dispatched
// actions; readers take snapshots or subscribe to changes.

mod action;
mod data_store;
mod reducer;
mod state;

pub use action::Action;
pub use data_store::Store;
pub use reducer::reduce;
pub use state::{
    AppState, ClaimedFacilityDetailsState, ClientInfoState, FeatureFlagsState, RequestState,
    SessionState,
};
