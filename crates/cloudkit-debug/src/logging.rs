//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout carries only the report. `RUST_LOG` takes
//! precedence over the verbosity flag; `CLOUDKIT_LOG_JSON=1` switches to JSON
//! lines.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Enables JSON log output when set to a truthy value
pub const LOG_JSON_ENV: &str = "CLOUDKIT_LOG_JSON";

/// Default filter directive for a verbosity count
#[must_use]
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn env_bool(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// Install the global subscriber; later calls are no-ops
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // try_init fails only when a subscriber is already installed
    if env_bool(LOG_JSON_ENV) {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init();
    } else {
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init();
    }
}
