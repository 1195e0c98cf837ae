//! The [`Log`] trait.

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) forwards to the global tracing
/// subscriber; [`MemoryLog`](super::memory::MemoryLog) records every call so
/// callers can inspect the exact message sequence of a run.  Apply code only
/// ever sees `&dyn Log`.
pub trait Log: Send + Sync + std::fmt::Debug {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
}
