//! Tracing and logging configuration for the application
//!
//! Development gets pretty, human-readable output; production gets one JSON
//! object per event so log aggregators can index the request span fields.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Install the global subscriber for `env`.
///
/// `RUST_LOG` overrides the default directives
/// (e.g. `RUST_LOG=debug,tower_http=trace`). Fails if a subscriber is already set.
pub fn init_tracing(env: &Environment) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    let fmt_layer = if env.is_development() {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .pretty()
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .flatten_event(true)
            .with_target(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(env_filter))
        .try_init()?;

    tracing::info!(environment = ?env, "Tracing initialized");
    Ok(())
}

const fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Development => "debug,tower_http=debug,sqlx=warn",
        Environment::Production => "info,tower_http=info,sqlx=warn",
    }
}
