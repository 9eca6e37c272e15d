use std::{
    any::Any,
    error::Error,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use crate::log::{
    log_level::LogLevel,
    log_sink::LogSink,
    registry::{self, SinkRegistry},
};

/// Lightweight, cloneable logging handle bound to a tag.
///
/// A `Logger` owns no sinks of its own by default: every emit reads the sink set
/// of its [`SinkRegistry`] at call time, so sinks registered after the logger was
/// built still receive its messages.
///
/// # Dispatch
/// Each emit call invokes, in this order:
/// 1. while the registry's default flag is on: the default console sink, then this
///    logger's local sinks (see [`with_local_sink`](Self::with_local_sink));
/// 2. every registered sink, in registration order.
///
/// A sink that panics is reported on stderr and skipped; the remaining sinks still
/// receive the message and the emit call returns normally.
///
/// # Examples
/// ```rust
/// use std::sync::Arc;
/// use jobcat::log::{CaptureSink, Logger, NoopLogSink, SinkRegistry};
///
/// let registry = Arc::new(SinkRegistry::new(Arc::new(NoopLogSink)));
/// let capture = Arc::new(CaptureSink::new());
/// registry.add_sink(capture.clone());
///
/// let log = Logger::with_registry("Scheduler", registry);
/// log.debug("hello");
/// log.warn("world");
///
/// assert_eq!(capture.messages(), vec!["hello", "world"]);
/// ```
#[derive(Clone)]
pub struct Logger {
    tag: Arc<str>,
    registry: Arc<SinkRegistry>,
    local_sinks: Vec<Arc<dyn LogSink>>,
    enabled: bool,
}

impl Logger {
    /// Creates a logger for `tag` that dispatches through the process-wide registry.
    pub fn new(tag: impl Into<Arc<str>>) -> Self {
        Self::with_registry(tag, Arc::clone(registry::global()))
    }

    /// Creates a logger that dispatches through `registry` instead of the global one.
    pub fn with_registry(tag: impl Into<Arc<str>>, registry: Arc<SinkRegistry>) -> Self {
        Self {
            tag: tag.into(),
            registry,
            local_sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Attaches a sink to this logger only.
    ///
    /// Local sinks stand in the console's place: they run right after the default
    /// sink and, like it, only while the registry's default flag is on. Adding the
    /// same `Arc` twice keeps a single entry.
    #[must_use]
    pub fn with_local_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        if !self.local_sinks.iter().any(|s| Arc::ptr_eq(s, &sink)) {
            self.local_sinks.push(sink);
        }
        self
    }

    /// A disabled logger drops every message before reaching any sink.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<SinkRegistry> {
        &self.registry
    }

    /// Delivers one message to every active sink.
    pub fn emit(&self, level: LogLevel, msg: &str, error: Option<&(dyn Error + 'static)>) {
        if !self.enabled {
            return;
        }

        if self.registry.is_default_enabled() {
            self.deliver(self.registry.default_sink(), level, msg, error);
            for sink in &self.local_sinks {
                self.deliver(sink, level, msg, error);
            }
        }

        for sink in &self.registry.active_sinks_snapshot() {
            self.deliver(sink, level, msg, error);
        }
    }

    /// Formats `args` once and emits the result. Used by the `cat_*!` macros.
    pub fn emit_fmt(
        &self,
        level: LogLevel,
        args: fmt::Arguments<'_>,
        error: Option<&(dyn Error + 'static)>,
    ) {
        if !self.enabled {
            return;
        }
        match args.as_str() {
            Some(s) => self.emit(level, s, error),
            None => self.emit(level, &args.to_string(), error),
        }
    }

    pub fn trace(&self, msg: &str) {
        self.emit(LogLevel::Trace, msg, None);
    }

    pub fn debug(&self, msg: &str) {
        self.emit(LogLevel::Debug, msg, None);
    }

    pub fn info(&self, msg: &str) {
        self.emit(LogLevel::Info, msg, None);
    }

    pub fn warn(&self, msg: &str) {
        self.emit(LogLevel::Warn, msg, None);
    }

    pub fn error(&self, msg: &str) {
        self.emit(LogLevel::Error, msg, None);
    }

    pub fn warn_with(&self, msg: &str, err: &(dyn Error + 'static)) {
        self.emit(LogLevel::Warn, msg, Some(err));
    }

    pub fn error_with(&self, msg: &str, err: &(dyn Error + 'static)) {
        self.emit(LogLevel::Error, msg, Some(err));
    }

    /// Logs `err` at error level, using its `Display` text as the message.
    pub fn error_cause(&self, err: &(dyn Error + 'static)) {
        if !self.enabled {
            return;
        }
        self.emit(LogLevel::Error, &err.to_string(), Some(err));
    }

    fn deliver(
        &self,
        sink: &Arc<dyn LogSink>,
        level: LogLevel,
        msg: &str,
        error: Option<&(dyn Error + 'static)>,
    ) {
        let res = panic::catch_unwind(AssertUnwindSafe(|| {
            sink.println(level, &self.tag, msg, error);
        }));
        if let Err(payload) = res {
            eprintln!(
                "[jobcat] sink panicked while logging for tag '{}': {}",
                self.tag,
                panic_message(payload.as_ref())
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("tag", &self.tag)
            .field("local_sinks", &self.local_sinks.len())
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::{capture_sink::CaptureSink, noop_log_sink::NoopLogSink};
    use std::{io, sync::Mutex};

    fn registry() -> Arc<SinkRegistry> {
        Arc::new(SinkRegistry::new(Arc::new(NoopLogSink)))
    }

    /// Records its own id into a shared journal, to observe call order across sinks.
    struct Journal {
        id: usize,
        log: Arc<Mutex<Vec<usize>>>,
    }

    impl LogSink for Journal {
        fn println(&self, _: LogLevel, _: &str, _: &str, _: Option<&(dyn Error + 'static)>) {
            self.log.lock().unwrap().push(self.id);
        }
    }

    struct Exploding;

    impl LogSink for Exploding {
        fn println(&self, _: LogLevel, _: &str, msg: &str, _: Option<&(dyn Error + 'static)>) {
            panic!("cannot print {msg}");
        }
    }

    #[test]
    fn debug_and_warn_reach_registered_sink() {
        let reg = registry();
        let capture = Arc::new(CaptureSink::new());
        reg.add_sink(capture.clone());

        let log = Logger::with_registry("Tag", Arc::clone(&reg));
        log.debug("hello");
        log.warn("world");

        assert_eq!(capture.messages(), vec!["hello", "world"]);
        assert_eq!(capture.tags(), vec!["Tag", "Tag"]);
        assert_eq!(capture.levels(), vec![LogLevel::Debug, LogLevel::Warn]);
    }

    #[test]
    fn sink_registered_after_logger_still_receives() {
        let reg = registry();
        let log = Logger::with_registry("Tag", Arc::clone(&reg));

        let capture = Arc::new(CaptureSink::new());
        reg.add_sink(capture.clone());
        log.info("late");

        assert_eq!(capture.messages(), vec!["late"]);
    }

    #[test]
    fn default_sink_runs_first_then_registration_order() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let sink = |id| -> Arc<dyn LogSink> {
            Arc::new(Journal {
                id,
                log: Arc::clone(&journal),
            })
        };

        let reg = Arc::new(SinkRegistry::new(sink(0)));
        reg.add_sink(sink(2));
        reg.add_sink(sink(3));
        let log = Logger::with_registry("Tag", reg).with_local_sink(sink(1));

        log.debug("x");

        assert_eq!(*journal.lock().unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn disabling_default_only_silences_default_and_local_sinks() {
        let console = Arc::new(CaptureSink::new());
        let local = Arc::new(CaptureSink::new());
        let global = Arc::new(CaptureSink::new());

        let reg = Arc::new(SinkRegistry::new(console.clone()));
        reg.add_sink(global.clone());
        let log = Logger::with_registry("Tag", Arc::clone(&reg)).with_local_sink(local.clone());

        log.debug("hello");
        reg.set_default_enabled(false);
        log.debug("world");

        assert_eq!(console.messages(), vec!["hello"]);
        assert_eq!(local.messages(), vec!["hello"]);
        assert_eq!(global.messages(), vec!["hello", "world"]);
    }

    #[test]
    fn panicking_sink_does_not_block_others() {
        let reg = registry();
        let before = Arc::new(CaptureSink::new());
        let after = Arc::new(CaptureSink::new());
        reg.add_sink(before.clone());
        reg.add_sink(Arc::new(Exploding));
        reg.add_sink(after.clone());

        let log = Logger::with_registry("Tag", reg);
        log.error("boom");
        log.error("again");

        assert_eq!(before.messages(), vec!["boom", "again"]);
        assert_eq!(after.messages(), vec!["boom", "again"]);
    }

    #[test]
    fn disabled_logger_reaches_nothing() {
        let console = Arc::new(CaptureSink::new());
        let reg = Arc::new(SinkRegistry::new(console.clone()));
        let capture = Arc::new(CaptureSink::new());
        reg.add_sink(capture.clone());

        let log = Logger::with_registry("Quiet", reg).with_enabled(false);
        log.error("nobody hears this");
        log.error_cause(&io::Error::other("nor this"));

        assert!(!log.is_enabled());
        assert!(console.is_empty());
        assert!(capture.is_empty());
    }

    #[test]
    fn error_variants_carry_the_error() {
        let reg = registry();
        let capture = Arc::new(CaptureSink::new());
        reg.add_sink(capture.clone());
        let log = Logger::with_registry("Net", reg);
        let err = io::Error::other("connection reset");

        log.warn_with("retrying", &err);
        log.error_cause(&err);

        let recs = capture.records();
        assert_eq!(recs[0].level, LogLevel::Warn);
        assert_eq!(recs[0].text, "retrying");
        assert_eq!(recs[0].error.as_deref(), Some("connection reset"));
        assert_eq!(recs[1].level, LogLevel::Error);
        assert_eq!(recs[1].text, "connection reset");
    }

    #[test]
    fn local_sink_is_deduplicated() {
        let local: Arc<dyn LogSink> = Arc::new(CaptureSink::new());
        let log = Logger::with_registry("Tag", registry())
            .with_local_sink(Arc::clone(&local))
            .with_local_sink(Arc::clone(&local));

        assert_eq!(log.local_sinks.len(), 1);
    }

    #[test]
    fn sink_may_register_another_sink_while_printing() {
        let reg = registry();
        let late = Arc::new(CaptureSink::new());
        let adder = {
            let reg = Arc::clone(&reg);
            let late = late.clone();
            crate::log::log_sink::FnSink::new(move |_, _, _, _| {
                reg.add_sink(late.clone());
            })
        };
        reg.add_sink(Arc::new(adder));

        let log = Logger::with_registry("Tag", Arc::clone(&reg));
        log.info("first");
        log.info("second");

        // Added during "first", so only later emits include it.
        assert_eq!(late.messages(), vec!["second"]);
    }

    #[test]
    fn emit_fmt_formats_arguments() {
        let reg = registry();
        let capture = Arc::new(CaptureSink::new());
        reg.add_sink(capture.clone());
        let log = Logger::with_registry("Tag", reg);

        log.emit_fmt(LogLevel::Info, format_args!("job {} took {}ms", 7, 12), None);
        log.emit_fmt(LogLevel::Info, format_args!("static"), None);

        assert_eq!(capture.messages(), vec!["job 7 took 12ms", "static"]);
    }
}
