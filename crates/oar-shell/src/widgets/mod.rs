//! Widgets shared across views.

pub mod error_boundary;
pub mod toast;

pub use error_boundary::ErrorBoundary;
pub use toast::Toasts;
