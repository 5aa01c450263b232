//! Subscriber setup.

use super::file_writer::RotatingFile;
use super::tracer;
use crate::domain::Result;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::Path;
use std::sync::Arc;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name recorded on every exported span.
pub const SERVICE_NAME: &str = "userdeck";

/// Span file inside the log directory.
pub const SPAN_FILE: &str = "userdeck-spans.jsonl";

/// Human-readable log file inside the log directory.
pub const LOG_FILE: &str = "userdeck.log";

/// Keeps the tracer provider alive. Dropping it shuts the exporter down.
#[derive(Debug)]
pub struct TracingGuard {
    provider: TracerProvider,
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        if let Err(e) = self.provider.shutdown() {
            eprintln!("userdeck: failed to shut down tracing: {e}");
        }
    }
}

/// Installs the global subscriber: an `EnvFilter`, an OpenTelemetry layer that
/// exports spans to [`SPAN_FILE`], and a plain-text `fmt` layer writing to
/// [`LOG_FILE`]. Both files live in `log_dir` and rotate by size.
///
/// `RUST_LOG` takes priority over `level` when set.
///
/// A second call leaves the first subscriber in place; its guard is still returned.
///
/// # Parameters
///
/// * `level` - Default filter directive, such as `info` or `userdeck=debug`
/// * `log_dir` - Directory for both files; created if missing
///
/// # Returns
///
/// A [`TracingGuard`] that flushes and shuts down the span exporter when dropped.
/// Keep it alive for the whole run.
///
/// # Errors
///
/// Returns [`DirectoryError::Io`](crate::domain::DirectoryError::Io) if the log
/// directory cannot be created.
///
/// # Example
///
/// ```rust,no_run
/// let dir = std::env::temp_dir().join("userdeck-logs");
/// let _guard = userdeck::observability::init_tracing("debug", &dir)?;
/// tracing::debug!("tracing is now active");
/// # Ok::<(), userdeck::domain::DirectoryError>(())
/// ```
pub fn init_tracing(level: &str, log_dir: &Path) -> Result<TracingGuard> {
    std::fs::create_dir_all(log_dir)?;

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(log_dir.join(SPAN_FILE), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let log_file = Arc::new(RotatingFile::new(log_dir.join(LOG_FILE)));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .with(fmt_layer)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }

    Ok(TracingGuard { provider })
}
