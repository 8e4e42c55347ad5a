//! Tracing setup
//!
//! Logging starts at `info` before the configuration is read, so messages
//! from config loading are not lost. Once the configured level is known it
//! replaces the bootstrap filter, unless `RUST_LOG` was set.

use tracing::Subscriber;
use tracing_subscriber::{
    filter::EnvFilter,
    layer::SubscriberExt,
    reload::{self, Handle},
    Registry,
};

const BOOTSTRAP_LEVEL: &str = "info";

/// Filter directives for the workspace crates and request tracing
pub fn default_directives(level: &str) -> String {
    format!("momo_server={level},momo_mixer={level},momo_common={level},tower_http={level}")
}

/// Handle for swapping the active filter after startup
pub struct LogControl {
    handle: Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogControl {
    /// Switch to the configured level. No-op when `RUST_LOG` chose the filter.
    pub fn apply_level(&self, level: &str) -> Result<(), reload::Error> {
        if self.from_env {
            return Ok(());
        }
        self.handle.reload(EnvFilter::new(default_directives(level)))
    }
}

/// Subscriber with a reloadable filter. `env_filter` wins over the bootstrap level.
pub fn subscriber(
    env_filter: Option<EnvFilter>,
) -> (impl Subscriber + Send + Sync + 'static, LogControl) {
    let from_env = env_filter.is_some();
    let filter = env_filter.unwrap_or_else(|| EnvFilter::new(default_directives(BOOTSTRAP_LEVEL)));
    let (filter, handle) = reload::Layer::new(filter);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer());
    (subscriber, LogControl { handle, from_env })
}
