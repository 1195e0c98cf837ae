//! The two ordered apply passes and the orchestrator that runs them.
//!
//! A run is: load and validate the document, write every file entry, then
//! install every unit entry.  The first error aborts the run; whatever was
//! completed before it stays on disk.
pub mod files;
pub mod units;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::config::ConfigDocument;
use crate::content::{ContentDecoder, DataUrlDecoder};
use crate::layout::Layout;
use crate::logging::Log;
use crate::resources::{Applicable, ResourceChange};

/// Shared, read-only context for one apply run.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// The validated document being applied.
    pub config: &'a ConfigDocument,
    /// Target paths derived from the root.
    pub layout: &'a Layout,
    /// Diagnostic sink.
    pub log: &'a dyn Log,
    /// Decoder for file content sources.
    pub decoder: &'a dyn ContentDecoder,
}

/// A named apply pass.
pub trait Task {
    /// Human-readable pass name, logged as the stage header.
    fn name(&self) -> &'static str;

    /// Execute the pass.
    ///
    /// # Errors
    ///
    /// Returns the first content or filesystem error encountered.
    fn run(&self, ctx: &Context<'_>) -> Result<TaskStats>;
}

/// Counters for a pass.
///
/// # Examples
///
/// ```
/// use ignition_apply::tasks::TaskStats;
///
/// let stats = TaskStats { changed: 3, already_ok: 1 };
/// assert_eq!(stats.summary(), "3 changed, 1 already ok");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of filesystem changes made.
    pub changed: u32,
    /// Number of items already in the desired state.
    pub already_ok: u32,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one resource outcome.
    pub const fn record(&mut self, change: ResourceChange) {
        match change {
            ResourceChange::Applied => self.changed += 1,
            ResourceChange::AlreadyCorrect => self.already_ok += 1,
        }
    }

    /// Format the summary string (e.g. "3 changed, 10 already ok").
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} changed, {} already ok", self.changed, self.already_ok)
    }
}

impl std::ops::AddAssign for TaskStats {
    fn add_assign(&mut self, other: Self) {
        self.changed += other.changed;
        self.already_ok += other.already_ok;
    }
}

/// Run one pass: stage header, the pass itself, then its summary.
///
/// A failure is logged as an error before it is returned.
///
/// # Errors
///
/// Propagates the pass error unchanged.
pub fn execute(task: &dyn Task, ctx: &Context<'_>) -> Result<TaskStats> {
    ctx.log.stage(task.name());
    let stats = task
        .run(ctx)
        .inspect_err(|e| ctx.log.error(&format!("{}: {e:#}", task.name())))?;
    ctx.log.debug(&stats.summary());
    Ok(stats)
}

/// Apply one resource and note the outcome at debug level.
fn apply_resource(ctx: &Context<'_>, resource: &dyn Applicable) -> Result<ResourceChange> {
    let change = resource.apply()?;
    note_change(ctx, resource, change);
    Ok(change)
}

/// Remove one resource and note the outcome at debug level.
fn remove_resource(ctx: &Context<'_>, resource: &dyn Applicable) -> Result<ResourceChange> {
    let change = resource.remove()?;
    note_change(ctx, resource, change);
    Ok(change)
}

fn note_change(ctx: &Context<'_>, resource: &dyn Applicable, change: ResourceChange) {
    match change {
        ResourceChange::Applied => ctx.log.debug(&format!("changed: {}", resource.description())),
        ResourceChange::AlreadyCorrect => ctx.log.debug(&format!("ok: {}", resource.description())),
    }
}

/// Outcome of a successful run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyReport {
    /// Files pass counters.
    pub files: TaskStats,
    /// Units pass counters.
    pub units: TaskStats,
}

/// Applies a config document to a target root.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use ignition_apply::logging::Logger;
/// use ignition_apply::tasks::Applier;
///
/// let report = Applier::new("/run/ignition.json", "/host", Arc::new(Logger::new())).apply()?;
/// println!("{}", report.files.summary());
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct Applier {
    config_path: PathBuf,
    layout: Layout,
    log: Arc<dyn Log>,
    decoder: Arc<dyn ContentDecoder>,
}

impl Applier {
    /// Create an applier for the document at `config_path`, targeting `root`.
    #[must_use]
    pub fn new(config_path: impl Into<PathBuf>, root: impl Into<PathBuf>, log: Arc<dyn Log>) -> Self {
        Self {
            config_path: config_path.into(),
            layout: Layout::new(root),
            log,
            decoder: Arc::new(DataUrlDecoder),
        }
    }

    /// Replace the content decoder.
    #[must_use]
    pub fn with_decoder(mut self, decoder: Arc<dyn ContentDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Load the document, then run the files pass and the units pass.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`](crate::error::ConfigError) if the document
    /// cannot be loaded (nothing is touched in that case, and the error is
    /// logged), otherwise the first error from
    /// [`apply_document`](Self::apply_document).
    pub fn apply(&self) -> Result<ApplyReport> {
        self.log
            .debug(&format!("Loading config {}", self.config_path.display()));
        let config = ConfigDocument::load(&self.config_path)
            .inspect_err(|e| self.log.error(&e.to_string()))?;
        self.apply_document(&config)
    }

    /// Run both passes over an already-loaded document.
    ///
    /// # Errors
    ///
    /// Returns the first content or filesystem error.  The typed cause is
    /// reachable through [`anyhow::Error::downcast_ref`].
    pub fn apply_document(&self, config: &ConfigDocument) -> Result<ApplyReport> {
        let ctx = Context {
            config,
            layout: &self.layout,
            log: &*self.log,
            decoder: &*self.decoder,
        };

        let files = execute(&files::MaterializeFiles, &ctx).context("files pass")?;
        let units = execute(&units::InstallUnits, &ctx).context("units pass")?;
        Ok(ApplyReport { files, units })
    }
}


#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::logging::{LogEntry, MemoryLog};

    #[test]
    fn stats_record_and_summary() {
        let mut stats = TaskStats::new();
        stats.record(ResourceChange::Applied);
        stats.record(ResourceChange::Applied);
        stats.record(ResourceChange::AlreadyCorrect);
        assert_eq!(stats.summary(), "2 changed, 1 already ok");
    }

    #[test]
    fn stats_add_assign() {
        let mut a = TaskStats {
            changed: 1,
            already_ok: 2,
        };
        a += TaskStats {
            changed: 3,
            already_ok: 4,
        };
        assert_eq!(
            a,
            TaskStats {
                changed: 4,
                already_ok: 6
            }
        );
    }

    #[test]
    fn empty_document_logs_both_stages_and_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(MemoryLog::new());
        let applier = Applier::new("unused.json", dir.path(), log.clone());

        let report = applier.apply_document(&ConfigDocument::default()).unwrap();
        assert_eq!(report, ApplyReport::default());

        let stages: Vec<_> = log
            .entries()
            .into_iter()
            .filter(|e| matches!(e, LogEntry::Stage(_)))
            .collect();
        assert_eq!(stages.len(), 2);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let applier = Applier::new(
            dir.path().join("absent.json"),
            dir.path().join("root"),
            Arc::new(MemoryLog::new()),
        );
        let err = applier.apply().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::NotFound { .. })
        ));
        assert!(!dir.path().join("root").exists());
    }

    #[test]
    fn load_failure_is_logged_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(MemoryLog::new());
        let applier = Applier::new(dir.path().join("absent.json"), dir.path(), log.clone());
        applier.apply().unwrap_err();

        match log.entries().last() {
            Some(LogEntry::Error(msg)) => assert!(msg.contains("config file not found"), "{msg}"),
            other => panic!("expected a trailing error entry, got {other:?}"),
        }
    }

    #[test]
    fn failed_pass_is_logged_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(MemoryLog::new());
        let applier = Applier::new("unused.json", dir.path(), log.clone());
        let config = ConfigDocument::parse(
            r#"{"storage": {"files": [{"path": "/etc/x", "mode": 420, "contents": {"source": "https://x"}}]}}"#,
        )
        .unwrap();

        let err = applier.apply_document(&config).unwrap_err();
        assert!(err.downcast_ref::<crate::error::ContentError>().is_some());

        match log.entries().last() {
            Some(LogEntry::Error(msg)) => {
                assert!(msg.starts_with("Writing files: file /etc/x: "), "{msg}");
                assert!(msg.contains("unsupported content source scheme"), "{msg}");
            }
            other => panic!("expected a trailing error entry, got {other:?}"),
        }
    }

    #[derive(Debug)]
    struct Literal;

    impl ContentDecoder for Literal {
        fn decode(&self, source: &str) -> Result<Vec<u8>, crate::error::ContentError> {
            Ok(source.as_bytes().to_vec())
        }
    }

    #[test]
    fn injected_decoder_is_used_for_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let applier = Applier::new("unused.json", dir.path(), Arc::new(MemoryLog::new()))
            .with_decoder(Arc::new(Literal));
        let config = ConfigDocument::parse(
            r#"{"storage": {"files": [{"path": "/etc/raw", "mode": 420, "contents": {"source": "as-is"}}]}}"#,
        )
        .unwrap();

        applier.apply_document(&config).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("etc/raw")).unwrap(),
            "as-is"
        );
    }
}
