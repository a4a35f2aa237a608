//! Tracing and logging (shared setup).

/// Tracing configuration (filters, output formats).
pub mod tracing;

pub use self::tracing::{LogFormat, ParseLogFormatError};

/// Initialize process-wide observability with the default (JSON) format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    self::tracing::init(LogFormat::default());
}

/// Initialize process-wide observability with an explicit output format.
pub fn init_with(format: LogFormat) {
    self::tracing::init(format);
}
