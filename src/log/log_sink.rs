use std::{error::Error, fmt};

use crate::log::log_level::LogLevel;

/// A pluggable consumer of log messages.
///
/// Sinks are shared as `Arc<dyn LogSink>` and may be invoked from any thread,
/// concurrently. The registry identifies a sink by its `Arc` allocation, so two
/// separately allocated sinks with equal contents are distinct entries.
pub trait LogSink: Send + Sync {
    fn println(
        &self,
        level: LogLevel,
        tag: &str,
        msg: &str,
        error: Option<&(dyn Error + 'static)>,
    );
}

/// Adapts a closure into a [`LogSink`].
///
/// ```rust
/// use std::sync::Arc;
/// use jobcat::log::{FnSink, LogSink};
///
/// let sink: Arc<dyn LogSink> = Arc::new(FnSink::new(|level, tag, msg, _err| {
///     eprintln!("{level} {tag}: {msg}");
/// }));
/// # let _ = sink;
/// ```
pub struct FnSink<F> {
    f: F,
}

impl<F> FnSink<F>
where
    F: Fn(LogLevel, &str, &str, Option<&(dyn Error + 'static)>) + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> LogSink for FnSink<F>
where
    F: Fn(LogLevel, &str, &str, Option<&(dyn Error + 'static)>) + Send + Sync,
{
    #[inline]
    fn println(
        &self,
        level: LogLevel,
        tag: &str,
        msg: &str,
        error: Option<&(dyn Error + 'static)>,
    ) {
        (self.f)(level, tag, msg, error);
    }
}

impl<F> fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSink").finish_non_exhaustive()
    }
}
