//! In-memory logger that records the exact message sequence of a run.
use std::sync::Mutex;

use super::types::Log;

/// A single recorded log call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// A stage header entry.
    Stage(String),
    /// An informational entry.
    Info(String),
    /// A debug entry.
    Debug(String),
    /// A warning entry.
    Warn(String),
    /// An error entry.
    Error(String),
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stage(msg) => write!(f, "==> {msg}"),
            Self::Info(msg) => write!(f, "    {msg}"),
            Self::Debug(msg) => write!(f, "    [debug] {msg}"),
            Self::Warn(msg) => write!(f, "    [warn] {msg}"),
            Self::Error(msg) => write!(f, "    [error] {msg}"),
        }
    }
}

/// Implement the methods of [`Log`] by pushing each message into
/// `self.entries` as the corresponding [`LogEntry`] variant.
macro_rules! record_log_methods {
    ($($method:ident => $variant:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                if let Ok(mut guard) = self.entries.lock() {
                    guard.push(LogEntry::$variant(msg.to_string()));
                }
            }
        )+
    };
}

/// Logger that keeps every entry in memory, in call order.
///
/// Nothing reaches the console; callers read the run back with
/// [`entries`](Self::entries).
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLog {
    /// Create an empty in-memory logger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// A copy of all recorded entries.
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }
}

impl Log for MemoryLog {
    record_log_methods! {
        stage => Stage,
        info  => Info,
        debug => Debug,
        warn  => Warn,
        error => Error,
    }
}
