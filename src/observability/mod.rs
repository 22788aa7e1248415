//! Tracing pipeline that writes OpenTelemetry spans to a local file.
//!
//! The plugin runs in Zellij's wasm sandbox with no collector to talk to, so
//! spans are serialized as OTLP JSON and appended to a file on the host:
//!
//! ```text
//! tracing macros → tracing-opentelemetry → TracerProvider → FileSpanExporter → OTLP JSON lines
//! ```
//!
//! The file lives at `~/.local/share/zellij/recipe-browser/recipe-browser-otlp.json`
//! and is rotated at 10 MB, keeping three backups.
//!
//! The level filter comes from the `trace_level` plugin option and defaults
//! to `info`. Fetch spans carry their trace context through the host's
//! `web_request` context map (see [`crate::api::TraceContext`]), so the
//! handling of a response links back to the span that sent the request.
//!
//! ```rust
//! use recipe_browser::observability::init_tracing;
//! use recipe_browser::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("tracing ready");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
