//! Application backend abstraction.
//!
//! This module defines the [`AppBackend`] trait, the statically declared capability
//! the data service uses to enumerate and launch applications. The backend lives
//! outside this crate (a desktop-entry indexer, an IPC bridge, a test double);
//! the service only ever talks to it through this trait.
//!
//! # Design Philosophy
//!
//! The trait is minimal and maps one-to-one onto the two calls the launcher needs.
//! It is injected at construction time rather than resolved per call, so tests can
//! substitute any implementation.

use crate::backend::payload::BackendPayload;
use crate::domain::error::Result;
use async_trait::async_trait;

/// Capability interface of the external application backend.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use launchdeck::backend::{AppBackend, BackendPayload};
///
/// struct StaticBackend;
///
/// #[async_trait]
/// impl AppBackend for StaticBackend {
///     async fn get_applications(&self) -> launchdeck::Result<BackendPayload> {
///         Ok(BackendPayload::Text(r#"[{"name":"xterm","exec":"xterm"}]"#.into()))
///     }
///
///     async fn launch_application(&self, _exec: &str) -> launchdeck::Result<()> {
///         Ok(())
///     }
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppBackend: Send + Sync {
    /// Returns the installed applications, either as JSON text or decoded data.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot enumerate applications.
    async fn get_applications(&self) -> Result<BackendPayload>;

    /// Starts the application identified by its exec command.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to spawn the application.
    async fn launch_application(&self, exec: &str) -> Result<()>;
}
