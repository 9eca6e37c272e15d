use std::{
    error::Error,
    sync::{
        atomic::{AtomicU64, Ordering},
        mpsc,
    },
};

use crate::log::{log_level::LogLevel, log_msg::LogMsg, log_sink::LogSink};

/// Non-blocking sink that forwards messages into a bounded channel.
///
/// `ChannelSink` enqueues a [`LogMsg`] into a `SyncSender` with `try_send`, so a
/// slow consumer never stalls the emitting thread. When the queue is full (or the
/// receiver is gone) the message is dropped and counted.
///
/// Typical use is handing the receiver to a UI thread or a writer thread owned by
/// the host application.
///
/// # Examples
/// ```rust
/// use jobcat::log::{ChannelSink, LogLevel, LogSink};
///
/// let (sink, rx) = ChannelSink::bounded(16);
/// sink.println(LogLevel::Info, "Tag", "hello", None);
/// assert_eq!(rx.recv().map(|m| m.text).ok().as_deref(), Some("hello"));
/// ```
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::SyncSender<LogMsg>,
    dropped: AtomicU64,
}

impl ChannelSink {
    /// Creates a sink plus the receiving end of its queue. `cap` is clamped to at least 1.
    #[must_use]
    pub fn bounded(cap: usize) -> (Self, mpsc::Receiver<LogMsg>) {
        let (tx, rx) = mpsc::sync_channel::<LogMsg>(cap.max(1));
        (
            Self {
                tx,
                dropped: AtomicU64::new(0),
            },
            rx,
        )
    }

    /// Attempts to enqueue a message without blocking.
    ///
    /// # Errors
    /// Returns:
    /// - `Err(TrySendError::Full(_))` when the bounded queue is at capacity (message is not sent).
    /// - `Err(TrySendError::Disconnected(_))` when the receiver has been dropped.
    pub fn try_forward(&self, msg: LogMsg) -> Result<(), mpsc::TrySendError<LogMsg>> {
        self.tx.try_send(msg)
    }

    /// Number of messages dropped so far because the queue was full or closed.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl LogSink for ChannelSink {
    fn println(
        &self,
        level: LogLevel,
        tag: &str,
        msg: &str,
        error: Option<&(dyn Error + 'static)>,
    ) {
        if self.try_forward(LogMsg::new(level, tag, msg, error)).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}
