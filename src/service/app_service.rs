//! Authoritative catalog state and the operations that mutate it.
//!
//! This module defines [`AppService`], the single source of truth for the
//! application catalog, the search query, and the catalog load status. It
//! orchestrates calls to the injected [`AppBackend`] and turns every failure
//! into observable state instead of returning it to the caller.
//!
//! # Load State Machine
//!
//! ```text
//! initializing ──load_catalog──▶ loading ──ok──▶ loaded
//!                                  │   ▲            │
//!                                fail  └──reload────┤
//!                                  ▼                │
//!                                error ──reload─────┘
//! ```
//!
//! # Overlapping Loads
//!
//! Concurrent `load_catalog` calls are allowed to race. Each resolution is
//! applied under a single lock acquisition, so observers never see a catalog
//! from one attempt paired with the status of another, and the attempt that
//! resolves last determines the final state (last write wins).
//!
//! # Example
//!
//! ```rust
//! use launchdeck::service::AppService;
//! use launchdeck::LoadState;
//!
//! let service = AppService::detached();
//! assert_eq!(service.load_state(), LoadState::Initializing);
//!
//! service.set_search_query("fire");
//! assert!(service.filtered_apps().is_empty());
//! ```

use crate::backend::{AppBackend, FavoritesPort, NoopFavorites};
use crate::domain::error::{LauncherError, Result};
use crate::domain::{AppRecord, LoadState};
use crate::service::search::filter_catalog;
use crate::Config;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Mutable state guarded by the service lock.
#[derive(Debug, Default)]
struct ServiceState {
    apps: Vec<AppRecord>,
    search_query: String,
    load_state: LoadState,
    error: String,
    loaded_at: Option<i64>,
}

/// Consistent copy of the service state taken under one lock acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSnapshot {
    pub apps: Vec<AppRecord>,
    pub search_query: String,
    pub load_state: LoadState,
    pub error: String,
}

impl ServiceSnapshot {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.load_state.is_loading()
    }
}

/// Data service holding the application catalog.
///
/// Explicitly constructed and owned; share it through an `Arc` when several
/// components need it. The internal lock is never held across an `.await`.
pub struct AppService {
    backend: Option<Arc<dyn AppBackend>>,
    favorites: Arc<dyn FavoritesPort>,
    load_timeout: Duration,
    state: Mutex<ServiceState>,
}

impl std::fmt::Debug for AppService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppService")
            .field("has_backend", &self.backend.is_some())
            .field("load_timeout", &self.load_timeout)
            .field("state", &*self.state())
            .finish_non_exhaustive()
    }
}

impl AppService {
    /// Creates a service bound to `backend` with the default load timeout.
    #[must_use]
    pub fn new(backend: Arc<dyn AppBackend>) -> Self {
        Self::with_backend(Some(backend))
    }

    /// Creates a service with no backend bound.
    ///
    /// Every load fails with a "backend not available" error and every launch
    /// is logged and dropped.
    #[must_use]
    pub fn detached() -> Self {
        Self::with_backend(None)
    }

    fn with_backend(backend: Option<Arc<dyn AppBackend>>) -> Self {
        Self {
            backend,
            favorites: Arc::new(NoopFavorites),
            load_timeout: Config::default().load_timeout,
            state: Mutex::new(ServiceState::default()),
        }
    }

    /// Replaces the favorites collaborator.
    #[must_use]
    pub fn with_favorites(mut self, favorites: Arc<dyn FavoritesPort>) -> Self {
        self.favorites = favorites;
        self
    }

    /// Applies configuration values (currently the load timeout).
    #[must_use]
    pub fn with_config(mut self, config: &Config) -> Self {
        self.load_timeout = config.load_timeout;
        self
    }

    fn state(&self) -> MutexGuard<'_, ServiceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads the catalog from the backend, replacing it on success.
    ///
    /// The transition to [`LoadState::Loading`] (and clearing of the error
    /// message) happens when this method is called, before the returned future
    /// is first polled. The future always resolves; success or failure is only
    /// visible through the service state.
    ///
    /// The backend call races against the configured timeout. When the timeout
    /// wins, the backend future is dropped, so a late answer can never touch the
    /// state. On failure the catalog is left as it was.
    ///
    /// Dropping the returned future before it completes counts as a failed
    /// load: a state still at `Loading` moves to [`LoadState::Error`] with a
    /// "load cancelled" message.
    ///
    /// Overlapping calls are not coalesced. Each one writes its outcome when it
    /// resolves, so the first to resolve reports `Loaded` (or `Error`) and
    /// `is_loading() == false` while the others are still in flight; the last
    /// to resolve decides the final state.
    pub fn load_catalog(&self) -> impl Future<Output = ()> + Send + '_ {
        let pending = self.begin_load();

        async move {
            let outcome = self.fetch_catalog().await;
            pending.finish(outcome);
        }
    }

    fn begin_load(&self) -> PendingLoad<'_> {
        let mut state = self.state();
        tracing::debug!(previous = %state.load_state, "catalog load started");
        state.load_state = LoadState::Loading;
        state.error.clear();
        PendingLoad { service: Some(self) }
    }

    async fn fetch_catalog(&self) -> Result<Vec<AppRecord>> {
        let backend = self.backend.as_ref().ok_or(LauncherError::BackendUnavailable)?;

        let payload = tokio::time::timeout(self.load_timeout, backend.get_applications())
            .await
            .map_err(|_| LauncherError::Timeout(self.load_timeout))??;

        payload.into_catalog()
    }

    fn finish_load(&self, outcome: Result<Vec<AppRecord>>) {
        let mut state = self.state();
        match outcome {
            Ok(apps) => {
                tracing::info!(app_count = apps.len(), "catalog loaded");
                state.apps = apps;
                state.load_state = LoadState::Loaded;
                state.error.clear();
                state.loaded_at = Some(chrono::Utc::now().timestamp());
            }
            Err(e) => {
                tracing::error!(error = %e, transport = e.is_transport(), "failed to load catalog");
                state.error = format!("Failed to load applications: {e}");
                state.load_state = LoadState::Error;
            }
        }
    }

    fn abandon_load(&self) {
        let mut state = self.state();
        if state.load_state != LoadState::Loading {
            return;
        }
        tracing::warn!("catalog load dropped before completion");
        state.error = format!("Failed to load applications: {}", LauncherError::Cancelled);
        state.load_state = LoadState::Error;
    }

    /// Filters the current catalog by `query`. Pure; see [`filter_catalog`].
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<AppRecord> {
        filter_catalog(&self.state().apps, query)
    }

    /// Overwrites the current search query.
    pub fn set_search_query(&self, query: impl Into<String>) {
        self.state().search_query = query.into();
    }

    /// Forwards a favorite toggle to the favorites collaborator.
    ///
    /// Collaborator failures are logged, never returned. The catalog itself is
    /// not modified; it changes only through [`load_catalog`](Self::load_catalog).
    pub fn toggle_favorite(&self, name: &str) {
        if let Err(e) = self.favorites.toggle(name) {
            tracing::warn!(app_name = %name, error = %e, "failed to toggle favorite");
        }
    }

    /// Asks the backend to launch `exec`.
    ///
    /// A missing backend or a failed launch is logged and contained. No retry.
    pub async fn launch_app(&self, exec: &str) {
        let Some(backend) = self.backend.as_ref() else {
            tracing::error!(exec = %exec, "cannot launch application, backend not available");
            return;
        };

        match backend.launch_application(exec).await {
            Ok(()) => tracing::info!(exec = %exec, "application launched"),
            Err(e) => tracing::error!(exec = %exec, error = %e, "failed to launch application"),
        }
    }

    #[must_use]
    pub fn apps(&self) -> Vec<AppRecord> {
        self.state().apps.clone()
    }

    /// Current catalog filtered by the current search query.
    #[must_use]
    pub fn filtered_apps(&self) -> Vec<AppRecord> {
        let state = self.state();
        filter_catalog(&state.apps, &state.search_query)
    }

    /// Catalog records flagged as favorites, in catalog order.
    #[must_use]
    pub fn favorites(&self) -> Vec<AppRecord> {
        self.state()
            .apps
            .iter()
            .filter(|app| app.is_favorite)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn search_query(&self) -> String {
        self.state().search_query.clone()
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.state().load_state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state().load_state.is_loading()
    }

    /// Human-readable message of the last failed load, empty otherwise.
    #[must_use]
    pub fn error(&self) -> String {
        self.state().error.clone()
    }

    /// Unix timestamp of the last successful load.
    #[must_use]
    pub fn loaded_at(&self) -> Option<i64> {
        self.state().loaded_at
    }

    /// Returns how long ago the catalog was last loaded successfully.
    ///
    /// The format varies based on the time elapsed:
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago" (e.g., "5m ago")
    /// - Less than 1 day: "Xh ago" (e.g., "3h ago")
    /// - 1 day or more: "Xd ago" (e.g., "7d ago")
    ///
    /// Returns `None` if no load has succeeded yet.
    #[must_use]
    pub fn loaded_ago(&self) -> Option<String> {
        let loaded_at = self.loaded_at()?;
        Some(format_elapsed(chrono::Utc::now().timestamp() - loaded_at))
    }

    /// Copies every published field under one lock acquisition.
    #[must_use]
    pub fn snapshot(&self) -> ServiceSnapshot {
        let state = self.state();
        ServiceSnapshot {
            apps: state.apps.clone(),
            search_query: state.search_query.clone(),
            load_state: state.load_state,
            error: state.error.clone(),
        }
    }
}

/// An in-flight load; resolves the load as cancelled when dropped unfinished.
struct PendingLoad<'a> {
    service: Option<&'a AppService>,
}

impl PendingLoad<'_> {
    fn finish(mut self, outcome: Result<Vec<AppRecord>>) {
        if let Some(service) = self.service.take() {
            service.finish_load(outcome);
        }
    }
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        if let Some(service) = self.service.take() {
            service.abandon_load();
        }
    }
}

fn format_elapsed(diff: i64) -> String {
    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        let mins = diff / SECONDS_PER_MINUTE;
        format!("{mins}m ago")
    } else if diff < SECONDS_PER_DAY {
        let hours = diff / SECONDS_PER_HOUR;
        format!("{hours}h ago")
    } else {
        let days = diff / SECONDS_PER_DAY;
        format!("{days}d ago")
    }
}
