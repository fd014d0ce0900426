//! Capability ports toward the external application backend.
//!
//! The launcher's data layer never enumerates or spawns applications itself.
//! It calls out through the traits in this module, which are injected into the
//! [`AppService`](crate::service::AppService) at construction.
//!
//! # Modules
//!
//! - `port`: [`AppBackend`] trait for listing and launching applications
//! - `payload`: [`BackendPayload`] response shapes and catalog normalization
//! - `favorites`: [`FavoritesPort`] extension point and its no-op default

pub mod favorites;
pub mod payload;
pub mod port;

pub use favorites::{FavoritesPort, NoopFavorites};
pub use payload::BackendPayload;
pub use port::AppBackend;

#[cfg(test)]
pub use favorites::MockFavoritesPort;
#[cfg(test)]
pub use port::MockAppBackend;
