//! Tracing initialization and subscriber setup.

use crate::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive when neither `RUST_LOG` nor the config sets one.
const DEFAULT_LEVEL: &str = "info";

/// Initializes the global tracing subscriber.
///
/// Sets up a registry with an [`EnvFilter`] and a formatting layer writing to
/// stderr. The filter comes from `RUST_LOG` when set, then from
/// `config.log_level`, then falls back to `"info"`. An invalid directive in the
/// config falls back to the default as well.
///
/// Idempotent: only the first call installs a subscriber; later calls (or a
/// subscriber installed by the host application) are left untouched.
///
/// # Example
///
/// ```rust
/// use launchdeck::observability::init_tracing;
/// use launchdeck::Config;
///
/// let config = Config {
///     log_level: Some("launchdeck=debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.log_level.as_deref().unwrap_or(DEFAULT_LEVEL);
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    if subscriber.try_init().is_ok() {
        tracing::debug!("tracing initialized");
    }
}
