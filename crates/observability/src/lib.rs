//! Tracing/logging setup shared by SafeCity binaries.

/// Initialize process-wide observability (tracing/logging).
///
/// JSON output unless `SAFECITY_LOG_FORMAT=pretty`. This is safe to call
/// multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use crate::tracing::LogFormat;
