//! Application record model and catalog load status.
//!
//! This module defines [`AppRecord`], the immutable snapshot of an installed
//! application as delivered by the backend, its boundary representation
//! [`AppRecordWire`], and [`LoadState`], the status of the most recent catalog load.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An installed application known to the launcher.
///
/// Records are replaced wholesale on every successful catalog load and never
/// patched in place. Only `name` and `exec_command` are guaranteed to be present.
///
/// # Examples
///
/// ```
/// use launchdeck::AppRecord;
///
/// let app = AppRecord::new("Firefox", "firefox").with_categories("Network;WebBrowser");
/// assert!(app.matches("web"));
/// assert!(!app.matches("files"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppRecord {
    pub name: String,
    pub exec_command: String,
    pub icon_ref: Option<String>,
    pub description: Option<String>,
    pub categories: Option<String>,
    pub is_favorite: bool,
}

impl AppRecord {
    /// Creates a record with only the required fields set.
    pub fn new(name: impl Into<String>, exec_command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exec_command: exec_command.into(),
            icon_ref: None,
            description: None,
            categories: None,
            is_favorite: false,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_categories(mut self, categories: impl Into<String>) -> Self {
        self.categories = Some(categories.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon_ref: impl Into<String>) -> Self {
        self.icon_ref = Some(icon_ref.into());
        self
    }

    #[must_use]
    pub const fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    /// Returns `true` if any searchable field contains `needle`, ignoring case.
    ///
    /// `needle` must already be trimmed and lowercased. Searched fields, in order:
    /// name, description, categories, exec command. An empty needle matches
    /// every record.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }

        let contains = |field: &str| field.to_lowercase().contains(needle);

        contains(&self.name)
            || self.description.as_deref().is_some_and(contains)
            || self.categories.as_deref().is_some_and(contains)
            || contains(&self.exec_command)
    }
}

/// Boundary representation of an application record.
///
/// Field names follow the backend's JSON encoding (`exec`, `icon`, `comment`,
/// `isFavorite`). `name` and `exec` are required; a payload missing either is
/// rejected during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRecordWire {
    pub name: String,
    pub exec: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub categories: Option<String>,
    #[serde(rename = "isFavorite", default)]
    pub is_favorite: bool,
}

/// Trims a wire string, mapping blank values to `None`.
fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl From<AppRecordWire> for AppRecord {
    fn from(wire: AppRecordWire) -> Self {
        Self {
            name: wire.name.trim().to_string(),
            exec_command: wire.exec.trim().to_string(),
            icon_ref: normalize_optional(wire.icon),
            description: normalize_optional(wire.comment),
            categories: normalize_optional(wire.categories),
            is_favorite: wire.is_favorite,
        }
    }
}

impl From<&AppRecord> for AppRecordWire {
    fn from(record: &AppRecord) -> Self {
        Self {
            name: record.name.clone(),
            exec: record.exec_command.clone(),
            icon: record.icon_ref.clone(),
            comment: record.description.clone(),
            categories: record.categories.clone(),
            is_favorite: record.is_favorite,
        }
    }
}

/// Status of the most recent catalog load attempt.
///
/// ```text
/// Initializing ──load──▶ Loading ──ok──▶ Loaded
///                          │  ▲            │
///                        fail └────load────┤
///                          ▼               │
///                        Error ───load─────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// No load has been started yet.
    #[default]
    Initializing,
    /// A load is in flight.
    Loading,
    /// The last load succeeded.
    Loaded,
    /// The last load failed; see the service's error message.
    Error,
}

impl LoadState {
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
