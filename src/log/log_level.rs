use std::fmt;

/// Defines the severity levels for log messages.
///
/// Levels are forwarded to sinks untouched; nothing in the crate filters on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Designates very fine-grained informational events.
    Trace,
    /// Designates fine-grained informational events that are most useful to debug an application.
    Debug,
    /// Designates informational messages that highlight the progress of the application at coarse-grained level.
    Info,
    /// Designates potentially harmful situations.
    Warn,
    /// Designates error events that might still allow the application to continue running.
    Error,
}

impl LogLevel {
    /// Numeric priority as used by Android's logcat (`VERBOSE` = 2 .. `ERROR` = 6).
    #[must_use]
    pub const fn priority(self) -> i32 {
        match self {
            Self::Trace => 2,
            Self::Debug => 3,
            Self::Info => 4,
            Self::Warn => 5,
            Self::Error => 6,
        }
    }

    /// Single-letter code used by the console sink (`V`, `D`, `I`, `W`, `E`).
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Trace => 'V',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        };
        f.write_str(s)
    }
}
