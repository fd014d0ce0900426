//! Catalog search filtering.
//!
//! Search is a stable, case-insensitive substring filter over the catalog. It
//! never reorders records and never scores them: the filtered view is always a
//! subsequence of the catalog.

use crate::domain::AppRecord;

/// Filters `catalog` down to the records matching `query`.
///
/// The query is trimmed and lowercased first. A blank query returns the whole
/// catalog. Otherwise a record is kept if its name, description, categories or
/// exec command contains the query, ignoring case.
///
/// # Tracing
///
/// Creates a debug-level span with the catalog size and query length.
///
/// # Example
///
/// ```rust
/// use launchdeck::AppRecord;
/// use launchdeck::service::filter_catalog;
///
/// let catalog = vec![
///     AppRecord::new("Firefox", "firefox").with_categories("Network"),
///     AppRecord::new("Files", "nautilus").with_categories("Utility"),
/// ];
///
/// let hits = filter_catalog(&catalog, "fox");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].name, "Firefox");
/// assert_eq!(filter_catalog(&catalog, "   ").len(), 2);
/// ```
#[must_use]
pub fn filter_catalog(catalog: &[AppRecord], query: &str) -> Vec<AppRecord> {
    let _span = tracing::debug_span!(
        "filter_catalog",
        total_apps = catalog.len(),
        query_len = query.len()
    )
    .entered();

    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return catalog.to_vec();
    }

    let filtered: Vec<AppRecord> = catalog
        .iter()
        .filter(|app| app.matches(&needle))
        .cloned()
        .collect();

    tracing::debug!(filtered_count = filtered.len(), "search filter applied");

    filtered
}
