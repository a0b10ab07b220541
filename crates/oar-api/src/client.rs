// Registry API HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, CSRF header injection,
// and status/JSON handling. Endpoint groups (claims, session) are
// implemented as inherent methods in separate files to keep this module
// focused on transport mechanics.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::{ParseError, Url};

use crate::error::Error;
use crate::transport::TransportConfig;

/// Cookie the server sets with the anti-forgery token.
pub const CSRF_COOKIE: &str = "csrftoken";
/// Header the server expects the anti-forgery token in.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// HTTP client for the registry's JSON API.
///
/// Cheap to clone: the underlying `reqwest::Client` and cookie jar are
/// reference counted, so clones share one session.
#[derive(Clone)]
pub struct OarClient {
    http: reqwest::Client,
    base_url: Url,
    jar: Arc<Jar>,
}

impl std::fmt::Debug for OarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OarClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl OarClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is where the registry is served (e.g.
    /// `https://openapparel.org` or `https://host/oar/`); API paths are
    /// appended below its path.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            jar: Arc::clone(&transport.cookie_jar),
        })
    }

    /// The registry base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Store a `Set-Cookie` style string in the session jar for the base URL.
    pub fn add_cookie(&self, cookie: &str) {
        self.jar.add_cookie_str(cookie, &self.base_url);
    }

    /// The anti-forgery token currently held in the jar for `url`, if any.
    pub fn csrf_token(&self, url: &Url) -> Option<String> {
        let header = self.jar.cookies(url)?;
        let cookies = header.to_str().ok()?;
        cookies.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == CSRF_COOKIE).then(|| value.to_owned())
        })
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Append `segments` below the base URL's path, with a trailing slash.
    ///
    /// Each segment is percent-encoded as one path component. Empty, `.` and
    /// `..` segments are rejected.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(Error::InvalidPathSegment((*bad).to_owned()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Start a request with the CSRF header attached when a token is known.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let token = self.csrf_token(&url);
        let builder = self.http.request(method, url);
        match token {
            Some(token) => builder.header(CSRF_HEADER, token),
            None => builder,
        }
    }

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, Error> {
        let url = self.url(segments)?;
        debug!("GET {}", url);

        let resp = self.request(Method::GET, url).send().await?;
        Self::parse_json(resp).await
    }

    /// Send a PUT request with a JSON body and decode the JSON response.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &impl Serialize,
    ) -> Result<T, Error> {
        let url = self.url(segments)?;
        debug!("PUT {}", url);

        let resp = self.request(Method::PUT, url).json(body).send().await?;
        Self::parse_json(resp).await
    }

    /// Map the status line, then decode the body.
    async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Unauthenticated {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
