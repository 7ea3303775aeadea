//! Tracing/logging setup shared by the service binary and tests.

/// Initialize process-wide tracing from the given settings.
///
/// Safe to call multiple times; only the first call installs a subscriber
/// and returns `true`.
pub fn init(settings: &LogSettings) -> bool {
    tracing::init(settings)
}

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::{LogFormat, LogSettings, UnknownLogFormat};
