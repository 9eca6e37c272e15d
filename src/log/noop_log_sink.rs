use std::error::Error;

use crate::log::{log_level::LogLevel, log_sink::LogSink};

/// Discards every message. Handy as a placeholder sink or to benchmark dispatch.
#[derive(Debug, Clone, Default)]
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    #[inline]
    fn println(
        &self,
        _level: LogLevel,
        _tag: &str,
        _msg: &str,
        _error: Option<&(dyn Error + 'static)>,
    ) {
    }
}
