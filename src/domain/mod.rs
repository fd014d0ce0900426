//! Domain layer for the launcher data layer.
//!
//! This module contains the core types shared by the backend ports, the data
//! service and the reactive store. It has no knowledge of how records are fetched
//! or how state is observed.
//!
//! # Organization
//!
//! - [`app`]: Application records, their wire form, and catalog load status
//! - [`error`]: Error types and result aliases
//!
//! # Examples
//!
//! ```
//! use launchdeck::domain::{AppRecord, LoadState};
//!
//! let app = AppRecord::new("Firefox", "firefox");
//! assert_eq!(app.exec_command, "firefox");
//! assert_eq!(LoadState::default(), LoadState::Initializing);
//! ```

pub mod app;
pub mod error;

pub use app::{AppRecord, AppRecordWire, LoadState};
pub use error::{LauncherError, Result};
