//! Error types for the launcher data layer.
//!
//! This module defines the centralized error type [`LauncherError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! None of these errors are fatal. The service converts them into observable
//! state (an error message plus [`LoadState::Error`](crate::domain::LoadState))
//! or a log event, so callers of the public operations never handle them directly.

use std::time::Duration;
use thiserror::Error;

/// The main error type for launcher data operations.
///
/// # Examples
///
/// ```
/// use launchdeck::LauncherError;
/// use std::time::Duration;
///
/// let err = LauncherError::Timeout(Duration::from_secs(10));
/// assert!(err.to_string().contains("timed out"));
/// assert!(!err.is_transport());
/// ```
#[derive(Debug, Error)]
pub enum LauncherError {
    /// The backend did not answer the application-list call in time.
    #[error("backend timed out after {} seconds", .0.as_secs_f64())]
    Timeout(Duration),

    /// The backend answered with something that is not a list of application records.
    ///
    /// The string carries the parse failure or a description of the unexpected shape.
    #[error("{0}")]
    MalformedResponse(String),

    /// The backend call itself failed.
    #[error("backend call failed: {0}")]
    Transport(String),

    /// A catalog load was dropped before it resolved.
    #[error("catalog load cancelled")]
    Cancelled,

    /// No backend is bound to the service.
    ///
    /// Treated as a transport failure for classification purposes.
    #[error("backend not available")]
    BackendUnavailable,

    /// The favorites collaborator rejected a toggle.
    #[error("favorites error: {0}")]
    Favorites(String),

    /// Configuration is invalid or could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl LauncherError {
    /// Returns `true` for failures of the backend call itself, including a missing binding.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::BackendUnavailable)
    }
}

/// A specialized `Result` type for launcher operations.
pub type Result<T> = std::result::Result<T, LauncherError>;
