//! Leveled formatting macros for [`Logger`](crate::log::Logger).
//!
//! Each macro formats its arguments once with `format_args!` and hands the result
//! to [`Logger::emit_fmt`](crate::log::Logger::emit_fmt). Nothing is filtered by
//! level; every message reaches the active sinks.
//!
//! ```rust
//! use jobcat::{cat_debug, cat_error, log::Logger};
//!
//! let log = Logger::new("Scheduler");
//! jobcat::log::global().set_default_enabled(false);
//! cat_debug!(log, "job {} scheduled in {}ms", 42, 1500);
//!
//! let err = std::io::Error::other("disk full");
//! cat_error!(log, err: &err; "could not persist job {}", 42);
//! ```

#[macro_export]
macro_rules! cat_log {
    ($logger:expr, $lvl:expr, err: $err:expr; $($arg:tt)+) => {{
        $logger.emit_fmt($lvl, format_args!($($arg)+), Some($err));
    }};
    ($logger:expr, $lvl:expr, $($arg:tt)+) => {{
        $logger.emit_fmt($lvl, format_args!($($arg)+), None);
    }};
}

#[macro_export]
macro_rules! cat_trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::cat_log!($logger, $crate::log::LogLevel::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! cat_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::cat_log!($logger, $crate::log::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! cat_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::cat_log!($logger, $crate::log::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! cat_warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::cat_log!($logger, $crate::log::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! cat_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::cat_log!($logger, $crate::log::LogLevel::Error, $($arg)+)
    };
}
