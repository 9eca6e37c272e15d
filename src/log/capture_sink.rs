use std::{
    error::Error,
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::log::{log_level::LogLevel, log_msg::LogMsg, log_sink::LogSink};

/// In-memory sink that records every message it receives, in arrival order.
///
/// Meant for tests and for hosts that want to show recent output somewhere
/// (a debug screen, a bug report). The buffer is unbounded; call
/// [`take`](Self::take) or [`clear`](Self::clear) to drain it.
#[derive(Debug, Default)]
pub struct CaptureSink {
    records: Mutex<Vec<LogMsg>>,
}

impl CaptureSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogMsg>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of every record received so far.
    #[must_use]
    pub fn records(&self) -> Vec<LogMsg> {
        self.lock().clone()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|m| m.text.clone()).collect()
    }

    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        self.lock().iter().map(|m| m.tag.clone()).collect()
    }

    #[must_use]
    pub fn levels(&self) -> Vec<LogLevel> {
        self.lock().iter().map(|m| m.level).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drains the buffer, returning what was recorded.
    pub fn take(&self) -> Vec<LogMsg> {
        std::mem::take(&mut *self.lock())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl LogSink for CaptureSink {
    fn println(
        &self,
        level: LogLevel,
        tag: &str,
        msg: &str,
        error: Option<&(dyn Error + 'static)>,
    ) {
        let record = LogMsg::new(level, tag, msg, error);
        self.lock().push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn records_in_arrival_order() {
        let sink = CaptureSink::new();
        sink.println(LogLevel::Debug, "A", "one", None);
        sink.println(LogLevel::Warn, "B", "two", None);

        assert_eq!(sink.messages(), vec!["one", "two"]);
        assert_eq!(sink.tags(), vec!["A", "B"]);
        assert_eq!(sink.levels(), vec![LogLevel::Debug, LogLevel::Warn]);
    }

    #[test]
    fn keeps_rendered_error() {
        let sink = CaptureSink::new();
        let err = io::Error::other("socket closed");
        sink.println(LogLevel::Error, "Net", "send failed", Some(&err));

        let recs = sink.records();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].error.as_deref(), Some("socket closed"));
    }

    #[test]
    fn take_drains_the_buffer() {
        let sink = CaptureSink::new();
        sink.println(LogLevel::Info, "T", "m", None);

        assert_eq!(sink.take().len(), 1);
        assert!(sink.is_empty());

        sink.println(LogLevel::Info, "T", "n", None);
        sink.clear();
        assert_eq!(sink.len(), 0);
    }
}
