//! Errors raised at the platform capability seam.
//!
//! None of these escape the public facade: every entry point logs and
//! degrades to "nothing perceptible" instead.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The capability does not exist on this platform.
    #[error("capability unsupported")]
    Unsupported,
    /// The user agent or OS refused a programmatic trigger.
    #[error("platform denied request: {0}")]
    Denied(String),
    /// Persistent storage is unavailable or over quota.
    #[error("storage failure: {0}")]
    Storage(String),
    /// The underlying call threw.
    #[error("script error: {0}")]
    Script(String),
}

pub type Result<T> = std::result::Result<T, PlatformError>;
