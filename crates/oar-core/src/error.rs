// ── Core error types ──
//
// Errors surfaced by oar-core. Action families never return these to
// their callers (failure is observable through store state only); they
// exist so the controller can log one consistent, user-readable shape.
// The `From<oar_api::Error>` impl translates transport-layer errors.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    #[error("Not authenticated (HTTP {status})")]
    NotAuthenticated { status: u16 },

    // ── Response errors ──────────────────────────────────────────────
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<oar_api::Error> for CoreError {
    fn from(err: oar_api::Error) -> Self {
        match err {
            oar_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            oar_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            oar_api::Error::InvalidPathSegment(segment) => CoreError::NotFound {
                message: format!("no resource at path segment {segment:?}"),
            },
            oar_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            oar_api::Error::Status { status: 404, body } => CoreError::NotFound { message: body },
            oar_api::Error::Status { status, body } => CoreError::Api {
                message: body,
                status: Some(status),
            },
            oar_api::Error::Unauthenticated { status } => CoreError::NotAuthenticated { status },
            oar_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_keep_their_code() {
        let err = CoreError::from(oar_api::Error::Status {
            status: 500,
            body: "boom".into(),
        });
        assert!(matches!(
            err,
            CoreError::Api {
                status: Some(500),
                ..
            }
        ));
    }

    #[test]
    fn forbidden_maps_to_not_authenticated() {
        let err = CoreError::from(oar_api::Error::Unauthenticated { status: 403 });
        assert_eq!(err.to_string(), "Not authenticated (HTTP 403)");
    }
}
