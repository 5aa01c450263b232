//! Tracing setup with file-based export.
//!
//! The dashboard owns the terminal, so nothing is logged to stdout or stderr.
//! Instead two files are written to the data directory:
//!
//! ```text
//! tracing ─┬─▶ tracing-opentelemetry ─▶ SDK ─▶ JsonLinesExporter ─▶ userdeck-spans.jsonl
//!          └─▶ fmt layer ─────────────────────────────────────────▶ userdeck.log
//! ```
//!
//! Both files rotate at 10 MB and keep three backups.
//!
//! # Configuration
//!
//! The filter comes from:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in the config file or `--trace-level`
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - `tracer`: OpenTelemetry provider with the JSON-lines exporter
//! - `span_formatter`: span to JSON conversion
//! - [`file_writer`]: rotating file writer

pub mod file_writer;
pub mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TracingGuard, LOG_FILE, SPAN_FILE};
