// Approved facility claim endpoints
//
// A claim that has been approved exposes an editable detail record at
// `/api/facility-claims/{id}/claimed/`. GET reads it, PUT replaces it and
// returns the server's canonical copy.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::OarClient;
use crate::error::Error;

/// Path segments of the detail record for an approved claim.
fn approved_claim_segments(claim_id: &str) -> [&str; 4] {
    ["api", "facility-claims", claim_id, "claimed"]
}

impl OarClient {
    /// Fetch the detail record for an approved claim.
    ///
    /// `GET /api/facility-claims/{claim_id}/claimed/`
    pub async fn get_claimed_facility_details(
        &self,
        claim_id: &str,
    ) -> Result<Map<String, Value>, Error> {
        debug!(claim_id, "fetching claimed facility details");
        self.get(&approved_claim_segments(claim_id)).await
    }

    /// Replace the detail record for an approved claim.
    ///
    /// `PUT /api/facility-claims/{claim_id}/claimed/` -- the response is the
    /// server's (possibly transformed) copy of what was stored.
    pub async fn update_claimed_facility_details(
        &self,
        claim_id: &str,
        details: &impl Serialize,
    ) -> Result<Map<String, Value>, Error> {
        debug!(claim_id, "updating claimed facility details");
        self.put(&approved_claim_segments(claim_id), details).await
    }
}
