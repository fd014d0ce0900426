//! Reactive store adapter over the data service.
//!
//! [`AppStore`] mirrors the [`AppService`] state into observables so a UI can
//! subscribe instead of polling. Every action delegates to the service and then
//! republishes a full snapshot before returning, so no service mutation goes
//! unpublished.
//!
//! # Observables
//!
//! | Field           | Kind      | Value                                       |
//! |-----------------|-----------|---------------------------------------------|
//! | `apps`          | writable  | Full catalog                                |
//! | `search_query`  | writable  | Current query text                          |
//! | `is_loading`    | writable  | `load_state == Loading`                     |
//! | `error`         | writable  | Last load error message, empty otherwise    |
//! | `load_state`    | writable  | [`LoadState`]                               |
//! | `filtered_apps` | derived   | `filter_catalog(apps, search_query)`        |
//! | `favorite_apps` | derived   | Catalog records flagged as favorite         |
//!
//! The writable observables are only written by the store itself; UI code
//! should treat them as read-only and go through the actions.

use super::{Derived, Observable};
use crate::domain::{AppRecord, LoadState};
use crate::service::{filter_catalog, AppService};
use std::sync::Arc;

/// Observable view of an [`AppService`] plus the actions that mutate it.
///
/// # Example
///
/// ```rust
/// use launchdeck::service::AppService;
/// use launchdeck::store::AppStore;
/// use std::sync::Arc;
///
/// let store = AppStore::new(Arc::new(AppService::detached()));
/// store.set_search_query("term");
///
/// assert_eq!(store.search_query.get(), "term");
/// assert!(store.filtered_apps().is_empty());
/// ```
#[derive(Debug)]
pub struct AppStore {
    service: Arc<AppService>,
    pub apps: Observable<Vec<AppRecord>>,
    pub search_query: Observable<String>,
    pub is_loading: Observable<bool>,
    pub error: Observable<String>,
    pub load_state: Observable<LoadState>,
    pub filtered_apps: Derived<Vec<AppRecord>>,
    pub favorite_apps: Derived<Vec<AppRecord>>,
}

impl AppStore {
    /// Wraps `service`, seeding every observable from its current state.
    #[must_use]
    pub fn new(service: Arc<AppService>) -> Self {
        let snapshot = service.snapshot();

        let apps = Observable::new(snapshot.apps.clone());
        let search_query = Observable::new(snapshot.search_query.clone());
        let is_loading = Observable::new(snapshot.is_loading());
        let error = Observable::new(snapshot.error);
        let load_state = Observable::new(snapshot.load_state);

        let filtered_apps = {
            let (apps_src, query_src) = (apps.clone(), search_query.clone());
            Derived::new(&[&apps, &search_query], move || {
                filter_catalog(&apps_src.get(), &query_src.get())
            })
        };

        let favorite_apps = {
            let apps_src = apps.clone();
            Derived::new(&[&apps], move || {
                apps_src.get().into_iter().filter(|app| app.is_favorite).collect::<Vec<_>>()
            })
        };

        Self {
            service,
            apps,
            search_query,
            is_loading,
            error,
            load_state,
            filtered_apps,
            favorite_apps,
        }
    }

    /// The wrapped service.
    #[must_use]
    pub fn service(&self) -> &Arc<AppService> {
        &self.service
    }

    /// Copies the service state into the observables.
    ///
    /// Every observable is written before any callback runs, so a subscriber
    /// of one observable always reads the others at the same snapshot. Status
    /// callbacks fire before the catalog and query ones.
    fn publish(&self) {
        let snapshot = self.service.snapshot();
        let _span = tracing::trace_span!(
            "publish",
            app_count = snapshot.apps.len(),
            load_state = %snapshot.load_state
        )
        .entered();

        let is_loading = snapshot.is_loading();
        let pending = [
            self.load_state.stage(snapshot.load_state),
            self.is_loading.stage(is_loading),
            self.error.stage(snapshot.error),
            self.search_query.stage(snapshot.search_query),
            self.apps.stage(snapshot.apps),
        ];

        for notification in pending.into_iter().flatten() {
            notification.fire();
        }
    }

    /// Loads the catalog, publishing the loading transition and then the outcome.
    ///
    /// If this future is dropped before it completes, the service records the
    /// cancelled load and the store still publishes the result.
    pub async fn load_catalog(&self) {
        let _republish = PublishOnDrop(self);
        let load = self.service.load_catalog();
        self.publish();
        load.await;
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        self.service.set_search_query(query);
        self.publish();
    }

    pub async fn launch_app(&self, exec: &str) {
        self.service.launch_app(exec).await;
        self.publish();
    }

    pub fn toggle_favorite(&self, name: &str) {
        self.service.toggle_favorite(name);
        self.publish();
    }

    #[must_use]
    pub fn apps(&self) -> Vec<AppRecord> {
        self.apps.get()
    }

    #[must_use]
    pub fn filtered_apps(&self) -> Vec<AppRecord> {
        self.filtered_apps.get()
    }

    #[must_use]
    pub fn favorite_apps(&self) -> Vec<AppRecord> {
        self.favorite_apps.get()
    }

    #[must_use]
    pub fn search_query(&self) -> String {
        self.search_query.get()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }

    #[must_use]
    pub fn error(&self) -> String {
        self.error.get()
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.load_state.get()
    }
}

/// Publishes the service state when dropped, whether the load finished or not.
struct PublishOnDrop<'a>(&'a AppStore);

impl Drop for PublishOnDrop<'_> {
    fn drop(&mut self) {
        self.0.publish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendPayload, MockAppBackend};
    use crate::domain::LauncherError;
    use crate::service::app_service::tests::{Reply, ScriptedBackend, TWO_APPS};
    use std::sync::Mutex;
    use std::time::Duration;

    fn store_with(replies: impl IntoIterator<Item = Reply>) -> AppStore {
        AppStore::new(Arc::new(AppService::new(ScriptedBackend::new(replies))))
    }

    fn names(apps: &[AppRecord]) -> Vec<String> {
        apps.iter().map(|a| a.name.clone()).collect()
    }

    fn record<T: Clone + PartialEq + Send + Sync + 'static>(observable: &Observable<T>) -> Arc<Mutex<Vec<T>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        observable.subscribe(move |v: &T| sink.lock().unwrap().push(v.clone()));
        seen
    }

    #[test]
    fn initial_values_mirror_a_fresh_service() {
        let store = AppStore::new(Arc::new(AppService::detached()));

        assert!(store.apps().is_empty());
        assert!(store.filtered_apps().is_empty());
        assert_eq!(store.search_query(), "");
        assert!(!store.is_loading());
        assert_eq!(store.error(), "");
        assert_eq!(store.load_state(), LoadState::Initializing);
    }

    #[tokio::test]
    async fn load_publishes_loading_then_loaded() {
        let store = store_with([ScriptedBackend::text(TWO_APPS)]);
        let states = record(&store.load_state);
        let loading = record(&store.is_loading);

        store.load_catalog().await;

        assert_eq!(
            *states.lock().unwrap(),
            [LoadState::Initializing, LoadState::Loading, LoadState::Loaded]
        );
        assert_eq!(*loading.lock().unwrap(), [false, true, false]);
        assert_eq!(names(&store.apps()), ["Firefox", "Files"]);
        assert_eq!(store.error(), "");
    }

    #[tokio::test]
    async fn observers_never_see_catalog_without_matching_state() {
        let store = Arc::new(store_with([ScriptedBackend::text(TWO_APPS)]));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let (sink, view) = (Arc::clone(&seen), Arc::clone(&store));
        store.apps.subscribe(move |apps: &Vec<AppRecord>| {
            sink.lock()
                .unwrap()
                .push((apps.len(), view.load_state.get(), view.is_loading.get()));
        });

        store.load_catalog().await;

        assert_eq!(
            *seen.lock().unwrap(),
            [(0, LoadState::Initializing, false), (2, LoadState::Loaded, false)]
        );
    }

    #[tokio::test]
    async fn status_subscribers_see_the_catalog_that_came_with_it() {
        let store = Arc::new(store_with([ScriptedBackend::text(TWO_APPS)]));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let (sink, view) = (Arc::clone(&seen), Arc::clone(&store));
        store.load_state.subscribe(move |state: &LoadState| {
            sink.lock().unwrap().push((*state, view.apps.get().len()));
        });

        store.load_catalog().await;

        assert_eq!(
            *seen.lock().unwrap(),
            [(LoadState::Initializing, 0), (LoadState::Loading, 0), (LoadState::Loaded, 2)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_load_is_published_as_error() {
        let store = store_with([ScriptedBackend::text(TWO_APPS), Reply::Never]);
        store.load_catalog().await;

        let outcome = tokio::time::timeout(Duration::from_secs(1), store.load_catalog()).await;
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert!(outcome.is_err());
        assert_eq!(store.load_state(), LoadState::Error);
        assert!(!store.is_loading());
        assert!(store.error().contains("cancelled"), "{}", store.error());
        assert_eq!(names(&store.apps()), ["Firefox", "Files"]);
    }

    #[tokio::test]
    async fn filtered_view_follows_query_without_manual_recompute() {
        let store = store_with([ScriptedBackend::text(
            r#"[{"name":"Firefox","exec":"firefox","categories":"Network"},
                {"name":"Files","exec":"nautilus","categories":"Utility"},
                {"name":"Thunderbird","exec":"thunderbird","categories":"Network;Email"}]"#,
        )]);
        store.load_catalog().await;

        store.set_search_query("net");
        assert_eq!(names(&store.filtered_apps()), ["Firefox", "Thunderbird"]);

        store.set_search_query("fox");
        assert_eq!(names(&store.filtered_apps()), ["Firefox"]);

        store.set_search_query("   ");
        assert_eq!(names(&store.filtered_apps()), ["Firefox", "Files", "Thunderbird"]);
    }

    #[tokio::test]
    async fn filtered_view_refreshes_when_catalog_arrives() {
        let store = store_with([ScriptedBackend::text(TWO_APPS)]);
        store.set_search_query("fox");
        assert!(store.filtered_apps().is_empty());

        let filtered = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&filtered);
        store
            .filtered_apps
            .subscribe(move |apps: &Vec<AppRecord>| sink.lock().unwrap().push(apps.len()));

        store.load_catalog().await;

        assert_eq!(names(&store.filtered_apps()), ["Firefox"]);
        assert_eq!(*filtered.lock().unwrap(), [0, 1]);
    }

    #[tokio::test]
    async fn favorites_view_tracks_catalog() {
        let store = store_with([ScriptedBackend::text(TWO_APPS)]);
        store.load_catalog().await;
        assert_eq!(names(&store.favorite_apps()), ["Files"]);
    }

    #[tokio::test]
    async fn failed_load_publishes_error_and_keeps_catalog() {
        let store = store_with([
            ScriptedBackend::text(TWO_APPS),
            ScriptedBackend::text("not json"),
        ]);
        store.load_catalog().await;

        let errors = record(&store.error);
        store.load_catalog().await;

        assert_eq!(store.load_state(), LoadState::Error);
        assert!(!store.is_loading());
        assert!(store.error().contains("invalid JSON response"));
        assert_eq!(names(&store.apps()), ["Firefox", "Files"]);
        assert_eq!(errors.lock().unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_is_published() {
        let store = store_with([Reply::Never]);
        store.load_catalog().await;

        assert_eq!(store.load_state(), LoadState::Error);
        assert!(store.error().contains("timed out"));
        assert!(store.apps().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_store_loads_settle_on_last_resolution() {
        let store = store_with([
            Reply::After(
                Duration::from_secs(2),
                Ok(BackendPayload::Text(r#"[{"name":"Slow","exec":"slow"}]"#.into())),
            ),
            Reply::After(
                Duration::from_secs(1),
                Ok(BackendPayload::Text(r#"[{"name":"Fast","exec":"fast"}]"#.into())),
            ),
        ]);

        futures_util::future::join(store.load_catalog(), store.load_catalog()).await;

        assert_eq!(names(&store.apps()), ["Slow"]);
        assert_eq!(store.load_state(), LoadState::Loaded);
        assert_eq!(store.apps(), store.service().apps());
    }

    #[tokio::test]
    async fn launch_and_toggle_never_fail_without_backend() {
        let store = AppStore::new(Arc::new(AppService::detached()));

        store.launch_app("firefox").await;
        store.toggle_favorite("Firefox");

        assert_eq!(store.load_state(), LoadState::Initializing);
        assert_eq!(store.error(), "");
    }

    #[tokio::test]
    async fn launch_failure_is_contained() {
        let mut backend = MockAppBackend::new();
        backend
            .expect_launch_application()
            .times(1)
            .returning(|_| Err(LauncherError::Transport("exec format error".into())));
        let store = AppStore::new(Arc::new(AppService::new(Arc::new(backend))));

        store.launch_app("broken").await;

        assert_eq!(store.error(), "");
    }

    #[test]
    fn independent_stores_do_not_share_state() {
        let a = AppStore::new(Arc::new(AppService::detached()));
        let b = AppStore::new(Arc::new(AppService::detached()));

        a.set_search_query("alpha");

        assert_eq!(a.search_query(), "alpha");
        assert_eq!(b.search_query(), "");
    }
}
