//! Data service layer.
//!
//! Owns the authoritative catalog, search query and load status, and talks to
//! the backend through the ports in [`crate::backend`].
//!
//! # Modules
//!
//! - [`app_service`]: [`AppService`] state container and its operations
//! - [`search`]: Pure catalog filtering used by both the service and the store

pub mod app_service;
pub mod search;

pub use app_service::{AppService, ServiceSnapshot};
pub use search::filter_catalog;
