// ── Domain model ──
//
// Client-side views of the registry's records. Wire types live in
// oar-api; these are what the store holds and the shell renders.

pub mod claim;
pub mod session;

pub use claim::{ClaimDetails, ClaimField, normalize_nulls};
pub use session::{ClientInfo, FeatureFlags, User};
