//! Tagged loggers fanning out to a process-wide set of pluggable sinks.
//!
//! ```text
//!   Logger("Tag").debug(msg)
//!        │
//!        ├── default flag on? ──► ConsoleSink ──► logger-local sinks
//!        │
//!        └── SinkRegistry snapshot ──► sink 1 ──► sink 2 ──► ... (registration order)
//! ```

pub mod capture_sink;
pub mod channel_sink;
pub mod console_sink;
pub mod log_level;
pub mod log_macros;
pub mod log_msg;
pub mod log_sink;
pub mod logger;
pub mod noop_log_sink;
pub mod registry;

pub use capture_sink::CaptureSink;
pub use channel_sink::ChannelSink;
pub use console_sink::{ConsoleSink, ConsoleTarget};
pub use log_level::LogLevel;
pub use log_msg::LogMsg;
pub use log_sink::{FnSink, LogSink};
pub use logger::Logger;
pub use noop_log_sink::NoopLogSink;
pub use registry::{SinkRegistry, global, init_global};
