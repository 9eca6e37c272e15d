use std::{
    error::Error,
    fmt::Write as _,
    io::{self, Write},
};

use crate::log::{log_level::LogLevel, log_msg::now_millis, log_sink::LogSink};

/// Which standard stream the console sink writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConsoleTarget {
    #[default]
    Stderr,
    Stdout,
}

/// The built-in platform console sink.
///
/// Lines look like logcat output: `D/Scheduler: job 42 started`. Every error in
/// the attached error's `source()` chain gets its own indented `caused by:` line.
///
/// The registry owns one of these as its default sink; whether it is invoked is
/// controlled by [`SinkRegistry::set_default_enabled`](crate::log::SinkRegistry::set_default_enabled),
/// not by registry membership.
#[derive(Debug, Clone, Default)]
pub struct ConsoleSink {
    target: ConsoleTarget,
    timestamps: bool,
}

impl ConsoleSink {
    #[must_use]
    pub fn new(target: ConsoleTarget) -> Self {
        Self {
            target,
            timestamps: false,
        }
    }

    /// Prefix every line with epoch milliseconds.
    #[must_use]
    pub fn with_timestamps(mut self, on: bool) -> Self {
        self.timestamps = on;
        self
    }

    #[must_use]
    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    /// Renders one message into the exact text written to the stream (trailing newline included).
    #[must_use]
    pub fn format_line(
        &self,
        level: LogLevel,
        tag: &str,
        msg: &str,
        error: Option<&(dyn Error + 'static)>,
    ) -> String {
        let mut line = String::with_capacity(tag.len() + msg.len() + 8);
        if self.timestamps {
            let _ = write!(line, "{} ", now_millis());
        }
        let _ = writeln!(line, "{}/{}: {}", level.as_char(), tag, msg);

        let mut cur = error;
        while let Some(err) = cur {
            let _ = writeln!(line, "    caused by: {err}");
            cur = err.source();
        }
        line
    }
}

impl LogSink for ConsoleSink {
    fn println(
        &self,
        level: LogLevel,
        tag: &str,
        msg: &str,
        error: Option<&(dyn Error + 'static)>,
    ) {
        let line = self.format_line(level, tag, msg, error);
        // Write errors are dropped: there is nowhere left to report them.
        let _ = match self.target {
            ConsoleTarget::Stderr => io::stderr().lock().write_all(line.as_bytes()),
            ConsoleTarget::Stdout => io::stdout().lock().write_all(line.as_bytes()),
        };
    }
}
