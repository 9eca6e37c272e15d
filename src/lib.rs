//! jobcat is a small, embeddable logging facility.
//!
//! A library logs through tagged [`log::Logger`] handles. Every message is fanned
//! out to a process-wide set of pluggable [`log::LogSink`]s, so host applications
//! can capture, redirect, or silence the output at runtime, including the
//! built-in console sink, which is switched off with
//! [`log::SinkRegistry::set_default_enabled`] rather than by unregistering it.
//!
//! ```rust
//! use std::sync::Arc;
//! use jobcat::log::{self, CaptureSink, Logger};
//!
//! let capture = Arc::new(CaptureSink::new());
//! log::global().add_sink(capture.clone());
//!
//! let cat = Logger::new("JobManager");
//! cat.debug("hello");
//! cat.warn("world");
//!
//! assert_eq!(capture.messages(), vec!["hello", "world"]);
//! log::global().remove_sink(&capture);
//! ```

/// Loading of INI-style configuration files and the typed logging settings.
pub mod config;
/// Loggers, sinks, and the process-wide sink registry.
pub mod log;
