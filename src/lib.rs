//! Launchdeck: the client-side data layer of an application launcher.
//!
//! Launchdeck sits between a launcher UI and the process that knows which
//! applications are installed. It provides:
//! - Catalog loading from an injected backend, raced against a timeout
//! - A load-status state machine whose failures surface as state, never as errors
//! - Case-insensitive search over name, description, categories and exec command
//! - Observable stores with a derived, always-fresh filtered view
//! - Launch and favorite actions forwarded to external collaborators
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  UI layer (not part of this crate)                  │  ← Subscribes, calls actions
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Store Layer (store/)                               │  ← Observables
//! │  - Observable / Derived containers                  │
//! │  - AppStore adapter, republishes after each action  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Service Layer (service/)                           │  ← Source of truth
//! │  - Catalog, query, load state                       │
//! │  - Timeout race, payload normalization              │
//! │  - Search filtering                                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌───────────────────────────┐   ┌─────────────────────┐
//! │ Backend Ports (backend/)  │   │ Domain (domain/)    │
//! │ - AppBackend trait        │   │ - AppRecord         │
//! │ - FavoritesPort trait     │   │ - LoadState         │
//! │ - BackendPayload          │   │ - LauncherError     │
//! └───────────────────────────┘   └─────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing-subscriber with EnvFilter                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Application records, load status and errors
//! - [`backend`]: Capability traits toward the application backend
//! - [`service`]: [`AppService`], the authoritative state holder
//! - [`store`]: Observable containers and the [`AppStore`] adapter
//! - [`observability`]: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use launchdeck::backend::{AppBackend, BackendPayload};
//! use launchdeck::{initialize, Config, LoadState};
//! use std::sync::Arc;
//!
//! struct Fixed;
//!
//! #[async_trait]
//! impl AppBackend for Fixed {
//!     async fn get_applications(&self) -> launchdeck::Result<BackendPayload> {
//!         Ok(BackendPayload::Text(
//!             r#"[{"name":"Firefox","exec":"firefox","categories":"Network"},
//!                 {"name":"Files","exec":"nautilus","categories":"Utility"}]"#
//!                 .to_string(),
//!         ))
//!     }
//!
//!     async fn launch_application(&self, _exec: &str) -> launchdeck::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let store = initialize(&Config::default(), Arc::new(Fixed));
//! store.load_catalog().await;
//! assert_eq!(store.load_state(), LoadState::Loaded);
//!
//! store.set_search_query("fox");
//! assert_eq!(store.filtered_apps().len(), 1);
//! # });
//! ```
//!
//! # Key Design Decisions
//!
//! ## Failures Are State
//!
//! `load_catalog`, `launch_app` and `toggle_favorite` never return errors. Load
//! failures become an error message plus [`LoadState::Error`]; launch and
//! favorite failures are logged. The UI only ever observes state.
//!
//! ## Timeout by Cancellation
//!
//! The backend call is raced against a timer with `tokio::time::timeout`. The
//! losing backend future is dropped, so an answer arriving after the timeout
//! cannot mutate state.
//!
//! ## Explicit Instances
//!
//! There is no global service. Each [`AppStore`] owns an `Arc<AppService>`, so
//! any number of independent instances can coexist (tests rely on this).

pub mod backend;
pub mod domain;
pub mod observability;
pub mod service;
pub mod store;

pub use domain::{AppRecord, AppRecordWire, LauncherError, LoadState, Result};
pub use service::{AppService, ServiceSnapshot};
pub use store::{AppStore, Derived, Observable};

use backend::AppBackend;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// How long a catalog load waits for the backend before giving up.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Data layer configuration.
///
/// # Example
///
/// ```rust
/// use launchdeck::Config;
/// use std::time::Duration;
///
/// let config = Config::from_toml_str("load_timeout_ms = 2500\nlog_level = \"debug\"")?;
/// assert_eq!(config.load_timeout, Duration::from_millis(2500));
/// assert_eq!(config.log_level.as_deref(), Some("debug"));
/// # Ok::<(), launchdeck::LauncherError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Time allowed for the backend to return the application list.
    ///
    /// Default: 10 seconds.
    pub load_timeout: Duration,

    /// `tracing` filter directive, e.g. `"info"` or `"launchdeck=debug"`.
    ///
    /// Overridden by `RUST_LOG`. Default: `None` (info).
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            log_level: None,
        }
    }
}

/// On-disk / embedded TOML representation of [`Config`].
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    load_timeout_ms: Option<u64>,
    log_level: Option<String>,
}

impl Config {
    /// Parses configuration from a string key/value map.
    ///
    /// Host shells often hand plugin settings over as plain strings. Values
    /// that fail to parse fall back to their defaults.
    ///
    /// # Parsing Rules
    ///
    /// - `load_timeout_ms`: String → milliseconds (zero or invalid → 10 s)
    /// - `log_level`: String → `Option<String>` (blank → `None`)
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::time::Duration;
    /// use launchdeck::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("load_timeout_ms".to_string(), "3000".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.load_timeout, Duration::from_secs(3));
    /// assert_eq!(config.log_level, None);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let load_timeout = config
            .get("load_timeout_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map_or(DEFAULT_LOAD_TIMEOUT, Duration::from_millis);

        let log_level = config
            .get("log_level")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            load_timeout,
            log_level,
        }
    }

    /// Parses configuration from a TOML document.
    ///
    /// Recognized keys: `load_timeout_ms` (positive integer), `log_level`.
    /// Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LauncherError::Config`] if the document is not valid TOML,
    /// contains unknown keys, or sets `load_timeout_ms` to zero.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(toml_str).map_err(|e| LauncherError::Config(format!("failed to parse config TOML: {e}")))?;

        let load_timeout = match file.load_timeout_ms {
            Some(0) => {
                return Err(LauncherError::Config(
                    "load_timeout_ms must be greater than zero".to_string(),
                ))
            }
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_LOAD_TIMEOUT,
        };

        Ok(Self {
            load_timeout,
            log_level: file.log_level,
        })
    }
}

/// Builds a store over a fresh service bound to `backend`.
///
/// Tracing is not installed here; call
/// [`observability::init_tracing`] first if the host has no subscriber.
///
/// # Example
///
/// ```rust
/// use launchdeck::{initialize, Config, LoadState};
/// use launchdeck::backend::{AppBackend, BackendPayload};
/// # use async_trait::async_trait;
/// # struct Empty;
/// # #[async_trait]
/// # impl AppBackend for Empty {
/// #     async fn get_applications(&self) -> launchdeck::Result<BackendPayload> {
/// #         Ok(BackendPayload::Text("[]".into()))
/// #     }
/// #     async fn launch_application(&self, _exec: &str) -> launchdeck::Result<()> { Ok(()) }
/// # }
/// use std::sync::Arc;
///
/// let store = initialize(&Config::default(), Arc::new(Empty));
/// assert_eq!(store.load_state(), LoadState::Initializing);
/// ```
#[must_use]
pub fn initialize(config: &Config, backend: Arc<dyn AppBackend>) -> AppStore {
    tracing::debug!(load_timeout_ms = config.load_timeout.as_millis() as u64, "initializing launcher data layer");

    let service = AppService::new(backend).with_config(config);
    AppStore::new(Arc::new(service))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_ten_seconds() {
        assert_eq!(Config::default().load_timeout, Duration::from_secs(10));
    }

    #[test]
    fn map_values_fall_back_on_garbage() {
        let mut map = BTreeMap::new();
        map.insert("load_timeout_ms".to_string(), "soon".to_string());
        map.insert("log_level".to_string(), "   ".to_string());

        assert_eq!(Config::from_map(&map), Config::default());

        map.insert("load_timeout_ms".to_string(), "0".to_string());
        assert_eq!(Config::from_map(&map).load_timeout, DEFAULT_LOAD_TIMEOUT);
    }

    #[test]
    fn map_reads_log_level() {
        let mut map = BTreeMap::new();
        map.insert("log_level".to_string(), " debug ".to_string());
        assert_eq!(Config::from_map(&map).log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn empty_toml_yields_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn toml_rejects_zero_timeout_and_unknown_keys() {
        assert!(matches!(
            Config::from_toml_str("load_timeout_ms = 0"),
            Err(LauncherError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("theme = \"dark\""),
            Err(LauncherError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("load_timeout_ms = ["),
            Err(LauncherError::Config(_))
        ));
    }
}
