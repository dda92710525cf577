//! Logging setup
//!
//! Events go to stderr so generated content printed on stdout stays clean.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingSettings};

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured filter.
///
/// # Example
///
/// ```rust,no_run
/// use layergen::config::LoggingSettings;
/// use layergen::observability;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// observability::init(&LoggingSettings::default())?;
/// tracing::info!("Generator started");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`TryInitError`] when a global subscriber is already installed.
pub fn init(settings: &LoggingSettings) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| build_filter(&settings.filter));

    let json = settings.format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().pretty().with_writer(std::io::stderr)))
        .try_init()
}

/// Parse filter directives, falling back to `info` when they are invalid
fn build_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
}
