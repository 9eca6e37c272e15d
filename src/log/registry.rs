//! Process-wide set of active sinks plus the default-console switch.
//!
//! # Dispatch order
//! [`Logger`](crate::log::Logger) invokes, per emit call:
//! 1. the default console sink and any logger-local sinks, only while
//!    [`SinkRegistry::is_default_enabled`] is `true`;
//! 2. every registered sink, in registration order.
//!
//! # Concurrency
//! Registration takes a write lock; emitters copy the current sink list under a
//! read lock and release it before invoking anything. A sink may therefore add or
//! remove sinks from inside `println`; the change applies to later emits only.

use std::sync::{
    Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
    atomic::{AtomicBool, Ordering},
};

use indexmap::{IndexMap, map::Entry};

use crate::{
    config::LogConfig,
    log::{console_sink::ConsoleSink, log_sink::LogSink},
};

/// Identity of a sink: the address of its `Arc` allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct SinkId(usize);

impl SinkId {
    fn of<S: ?Sized>(sink: &Arc<S>) -> Self {
        Self(Arc::as_ptr(sink).cast::<()>() as usize)
    }
}

/// Ordered, identity-keyed registry of log sinks.
///
/// Most code uses the process-wide instance from [`global`]; separate instances
/// are useful to isolate a subsystem or a test.
pub struct SinkRegistry {
    sinks: RwLock<IndexMap<SinkId, Arc<dyn LogSink>>>,
    default_sink: Arc<dyn LogSink>,
    default_enabled: AtomicBool,
}

impl SinkRegistry {
    /// Creates an empty registry whose default sink is `default_sink`, enabled.
    #[must_use]
    pub fn new(default_sink: Arc<dyn LogSink>) -> Self {
        Self {
            sinks: RwLock::new(IndexMap::new()),
            default_sink,
            default_enabled: AtomicBool::new(true),
        }
    }

    /// Registry backed by a stderr [`ConsoleSink`].
    #[must_use]
    pub fn with_console() -> Self {
        Self::new(Arc::new(ConsoleSink::default()))
    }

    /// Builds the console sink and initial flag from a [`LogConfig`].
    #[must_use]
    pub fn from_config(config: &LogConfig) -> Self {
        let console =
            ConsoleSink::new(config.console_target).with_timestamps(config.console_timestamps);
        let reg = Self::new(Arc::new(console));
        reg.set_default_enabled(config.console_enabled);
        reg
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexMap<SinkId, Arc<dyn LogSink>>> {
        // No sink runs under this lock, so a poisoned lock still guards a consistent map.
        self.sinks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<SinkId, Arc<dyn LogSink>>> {
        self.sinks.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `sink` unless that same `Arc` is already registered.
    ///
    /// Returns `true` if it was inserted, `false` if it was already present. The
    /// default sink is never inserted: it stays under the default flag's control.
    pub fn add_sink(&self, sink: Arc<dyn LogSink>) -> bool {
        let id = SinkId::of(&sink);
        if id == SinkId::of(&self.default_sink) {
            return false;
        }
        match self.write().entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(sink);
                true
            }
        }
    }

    /// Removes `sink` if registered; the remaining sinks keep their relative order.
    ///
    /// Returns whether anything was removed. Removing an unknown sink, or the
    /// default sink, is a no-op.
    pub fn remove_sink<S: ?Sized>(&self, sink: &Arc<S>) -> bool {
        self.write().shift_remove(&SinkId::of(sink)).is_some()
    }

    /// Whether `sink` is registered. Always `false` for the default sink.
    #[must_use]
    pub fn contains<S: ?Sized>(&self, sink: &Arc<S>) -> bool {
        self.read().contains_key(&SinkId::of(sink))
    }

    /// Number of registered sinks, not counting the default sink.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Unregisters every sink. The default sink and its flag are untouched.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Copy of the registered sinks in registration order, excluding the default sink.
    #[must_use]
    pub fn active_sinks_snapshot(&self) -> Vec<Arc<dyn LogSink>> {
        self.read().values().cloned().collect()
    }

    pub fn set_default_enabled(&self, enabled: bool) {
        self.default_enabled.store(enabled, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_default_enabled(&self) -> bool {
        self.default_enabled.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn default_sink(&self) -> &Arc<dyn LogSink> {
        &self.default_sink
    }
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::with_console()
    }
}

impl std::fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkRegistry")
            .field("sinks", &self.len())
            .field("default_enabled", &self.is_default_enabled())
            .finish()
    }
}

static GLOBAL: OnceLock<Arc<SinkRegistry>> = OnceLock::new();

/// The process-wide registry, created with a stderr console sink on first use.
pub fn global() -> &'static Arc<SinkRegistry> {
    GLOBAL.get_or_init(|| Arc::new(SinkRegistry::with_console()))
}

/// Configures the process-wide registry from `config`.
///
/// The first call (if it precedes any use of [`global`]) builds the console sink
/// from `config` and returns `true`. Later calls can no longer replace the console
/// sink; they only apply `console_enabled` and return `false`.
pub fn init_global(config: &LogConfig) -> bool {
    let mut installed = false;
    let reg = GLOBAL.get_or_init(|| {
        installed = true;
        Arc::new(SinkRegistry::from_config(config))
    });
    if !installed {
        reg.set_default_enabled(config.console_enabled);
    }
    installed
}
