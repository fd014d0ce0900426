//! Favorites collaborator abstraction.
//!
//! Favorites have no persistence contract yet. The service forwards toggles to a
//! [`FavoritesPort`] so a real collaborator (local file, backend call) can be
//! plugged in later without touching the service. Until then [`NoopFavorites`]
//! accepts every toggle and does nothing.

use crate::domain::error::Result;

/// Receives favorite toggles for an application name.
#[cfg_attr(test, mockall::automock)]
pub trait FavoritesPort: Send + Sync {
    /// Flips the favorite flag of the application(s) named `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collaborator fails to record the change.
    fn toggle(&self, name: &str) -> Result<()>;
}

/// Favorites collaborator that accepts and discards every toggle.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFavorites;

impl FavoritesPort for NoopFavorites {
    fn toggle(&self, name: &str) -> Result<()> {
        tracing::debug!(app_name = %name, "favorite toggle ignored, no favorites collaborator");
        Ok(())
    }
}
