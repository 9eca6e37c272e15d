use std::{error::Error, time::SystemTime};

use crate::log::log_level::LogLevel;

/// Represents a single log message event, as recorded by the buffering sinks.
///
/// This struct owns everything a sink received for one `println` call, so it can
/// outlive the call (captured in memory or sent across a channel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMsg {
    /// The severity level of the log.
    pub level: LogLevel,
    /// The timestamp of the log event in milliseconds since the UNIX epoch.
    pub ts_ms: u128,
    /// Tag of the logger that produced the message.
    pub tag: String,
    /// The actual content of the log message.
    pub text: String,
    /// Rendered error chain, if the message carried an error.
    pub error: Option<String>,
}

impl LogMsg {
    /// Creates a new `LogMsg` stamped with the current time.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jobcat::log::{LogLevel, LogMsg};
    ///
    /// let msg = LogMsg::new(LogLevel::Info, "Scheduler", "job started", None);
    /// assert_eq!(msg.tag, "Scheduler");
    /// assert!(msg.error.is_none());
    /// ```
    pub fn new(
        level: LogLevel,
        tag: impl Into<String>,
        text: impl Into<String>,
        error: Option<&(dyn Error + 'static)>,
    ) -> Self {
        Self {
            level,
            ts_ms: now_millis(),
            tag: tag.into(),
            text: text.into(),
            error: error.map(render_error_chain),
        }
    }
}

/// Milliseconds since the UNIX epoch; zero if the clock is before the epoch.
#[must_use]
pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Renders an error and its `source()` chain as `outer: inner: root`.
#[must_use]
pub fn render_error_chain(err: &(dyn Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut cur = err.source();
    while let Some(cause) = cur {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        cur = cause.source();
    }
    out
}
