//! Logging infrastructure: the [`Log`] sink trait, its tracing-backed and
//! in-memory implementations, and console subscriber setup.

mod logger;
mod memory;
mod subscriber;
mod types;

pub use logger::{Logger, STAGE_TARGET};
pub use memory::{LogEntry, MemoryLog};
pub use subscriber::init_subscriber;
pub use types::Log;
