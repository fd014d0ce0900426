//! Reactive store layer.
//!
//! Bridges the data service into observable containers so a UI layer can react
//! to changes without polling.
//!
//! # Architecture
//!
//! ```text
//! UI ── action ──▶ AppStore ── delegate ──▶ AppService ── port ──▶ Backend
//!  ▲                  │
//!  └── notify ── Observable / Derived ◀── publish snapshot
//! ```
//!
//! # Modules
//!
//! - [`observable`]: [`Observable`] containers and the [`Source`] trait
//! - [`derived`]: [`Derived`] values computed from N sources
//! - [`app_store`]: [`AppStore`], the launcher-specific adapter

pub mod app_store;
pub mod derived;
pub mod observable;

pub use app_store::AppStore;
pub use derived::Derived;
pub use observable::{Observable, Source, SubscriptionId};
