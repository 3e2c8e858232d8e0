//! # Framework Errors
//!
//! Common error types for the data engine and the registry actor. Expected absence
//! (missing fixture, unknown id) is modelled as data, not as one of these errors.

/// Errors that can occur within the framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Blocking task failed: {0}")]
    TaskFailed(String),
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),
    #[error("Invalid record id: {0:?}")]
    InvalidId(String),
    #[error("Fixture error: {0}")]
    Fixture(#[from] serde_json::Error),
}
