// oar-api: Async Rust client for the Open Apparel Registry web API

pub mod claims;
pub mod client;
pub mod error;
pub mod models;
pub mod session;
pub mod transport;

pub use client::OarClient;
pub use error::Error;
pub use models::{ClientInfoResponse, FeatureFlagsResponse, UserResponse};
pub use transport::{TlsMode, TransportConfig};
