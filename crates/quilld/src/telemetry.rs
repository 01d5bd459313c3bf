//! Structured telemetry initialisation for the daemon.
//!
//! Logs go to stderr so the framed transport on stdout stays clean. The
//! stderr sink reports errors only unless verbose mode raises it to info,
//! and an optional file sink captures debug-level events regardless of the
//! stderr filter.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::sync::Mutex;

use once_cell::sync::OnceCell;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{Config, LogFormat};

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Handle returned when telemetry has been initialised.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to open the log file for appending.
    #[error("failed to open log file: {0}")]
    LogFile(#[from] io::Error),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(TryInitError),
}

/// Configures the global tracing subscriber when invoked for the first time.
///
/// Repeated calls are idempotent: the first invocation installs the global
/// subscriber. Subsequent invocations detect the existing registration and
/// return a fresh [`TelemetryHandle`] without touching the global state again.
///
/// # Examples
///
/// ```rust
/// use quilld::Config;
/// use quilld::telemetry;
///
/// # fn main() -> Result<(), telemetry::TelemetryError> {
/// let config = Config::default();
/// let first = telemetry::initialise(&config)?;
/// let second = telemetry::initialise(&config)?;
///
/// // Both handles remain usable; only the first call installs
/// // telemetry.
/// drop(first);
/// drop(second);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter expression fails to parse, the
/// log file cannot be opened, or the subscriber cannot be installed.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install_subscriber(config))
        .map(|_| TelemetryHandle)
}

fn install_subscriber(config: &Config) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(config.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;

    let mut layers = vec![stderr_layer(config.log_format, filter)];
    if let Some(path) = &config.log_file {
        let file = File::options().create(true).append(true).open(path)?;
        layers.push(file_layer(file));
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

fn stderr_layer(format: LogFormat, filter: EnvFilter) -> BoxedLayer {
    let base = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(io::stderr)
        // No stray colour codes in non-TTY sinks.
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());
    match format {
        LogFormat::Json => base.json().flatten_event(true).with_filter(filter).boxed(),
        LogFormat::Compact => base.compact().with_filter(filter).boxed(),
    }
}

fn file_layer(file: File) -> BoxedLayer {
    fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(LevelFilter::DEBUG)
        .boxed()
}
