//! Structured logging setup.
//!
//! Every layer of the crate reports through `tracing` macros and spans. This
//! module installs the subscriber that turns them into human-readable log lines
//! on stderr. Installing it is optional: embedding applications that already run
//! their own subscriber simply skip [`init_tracing`].
//!
//! # Configuration
//!
//! Log level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `log_level` config option
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```rust
//! use launchdeck::observability::init_tracing;
//! use launchdeck::Config;
//!
//! init_tracing(&Config::default());
//!
//! tracing::debug!("launcher data layer initialized");
//! ```

mod init;

pub use init::init_tracing;
