// Session-level endpoints used while the application boots:
// feature flags, client geo info, and the current login.

use tracing::debug;

use crate::client::OarClient;
use crate::error::Error;
use crate::models::{ClientInfoResponse, FeatureFlagsResponse, UserResponse};

impl OarClient {
    /// `GET /api-feature-flags/`
    pub async fn get_feature_flags(&self) -> Result<FeatureFlagsResponse, Error> {
        debug!("fetching feature flags");
        self.get(&["api-feature-flags"]).await
    }

    /// `GET /api/client-info/`
    pub async fn get_client_info(&self) -> Result<ClientInfoResponse, Error> {
        debug!("fetching client info");
        self.get(&["api", "client-info"]).await
    }

    /// Resume the browser session, if there is one.
    ///
    /// `GET /user-login/` -- returns `Ok(None)` when the server reports
    /// that nobody is logged in.
    pub async fn get_session_user(&self) -> Result<Option<UserResponse>, Error> {
        debug!("resuming session");
        match self.get(&["user-login"]).await {
            Ok(user) => Ok(Some(user)),
            Err(Error::Unauthenticated { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
