//! Tracing-backed logger.
use super::types::Log;

/// Tracing target used for stage headers so the console formatter can
/// render them differently from ordinary `info` events.
pub const STAGE_TARGET: &str = "ignition_apply::stage";

/// Logger that emits every message as a [`tracing`] event.
///
/// Output formatting and level filtering are the subscriber's job; see
/// [`init_subscriber`](super::subscriber::init_subscriber).
#[derive(Debug, Default, Clone, Copy)]
pub struct Logger;

impl Logger {
    /// Create a new logger.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }
}
