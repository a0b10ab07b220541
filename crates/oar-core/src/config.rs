// ── Runtime client configuration ──
//
// Describes *where* the registry lives and how to talk to it. Never
// touches disk: the shell (via oar-config) builds a `ClientConfig` and
// hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use oar_api::TlsMode;

/// Local development server address.
pub const DEFAULT_URL: &str = "http://localhost:8081";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (local development servers with self-signed certs).
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// Configuration for one registry deployment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Web root of the registry (e.g., `https://openapparel.org`).
    pub url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// HTTP client timeout. Requests carry no other deadline.
    pub timeout: Duration,
    /// Path the shell opens on start.
    pub initial_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.parse().expect("DEFAULT_URL is a valid URL"),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            initial_path: "/".into(),
        }
    }
}
