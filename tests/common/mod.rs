// Shared helpers for integration tests.
//
// Provides a temporary directory holding a target root and a config
// document, plus a fluent builder for the document itself, so each test can
// set up an isolated run without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Value, json};

use ignition_apply::layout::Layout;
use ignition_apply::logging::{LogEntry, MemoryLog};
use ignition_apply::tasks::{Applier, ApplyReport};

/// An isolated run environment backed by a [`tempfile::TempDir`].
///
/// Layout inside the temp dir:
/// - `config.ign`  the document under test
/// - `root/`       the target root the document is applied to
pub struct TestEnv {
    /// Temporary directory containing the config and the root.
    pub dir: tempfile::TempDir,
    /// Log shared by every run made through this environment.
    pub log: Arc<MemoryLog>,
}

impl TestEnv {
    /// Create an environment with an empty root directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(dir.path().join("root")).expect("create root dir");
        Self {
            dir,
            log: Arc::new(MemoryLog::new()),
        }
    }

    /// The target root.
    pub fn root(&self) -> PathBuf {
        self.dir.path().join("root")
    }

    /// Target paths for this root.
    pub fn layout(&self) -> Layout {
        Layout::new(self.root())
    }

    /// Path the config document is written to.
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.ign")
    }

    /// Write `document` to [`config_path`](Self::config_path).
    pub fn write_config(&self, document: &str) -> PathBuf {
        let path = self.config_path();
        std::fs::write(&path, document).expect("write config");
        path
    }

    /// An applier for this environment's config and root.
    pub fn applier(&self) -> Applier {
        Applier::new(self.config_path(), self.root(), self.log.clone())
    }

    /// Write `document` and apply it.
    pub fn apply(&self, document: &str) -> anyhow::Result<ApplyReport> {
        self.write_config(document);
        self.applier().apply()
    }

    /// Every non-debug log entry, one per line, with the temp dir replaced
    /// by `<tmp>` so the output is stable across runs.
    pub fn rendered_log(&self) -> String {
        let tmp = self.dir.path().display().to_string();
        self.log
            .entries()
            .iter()
            .filter(|e| !matches!(e, LogEntry::Debug(_)))
            .map(|e| e.to_string().replace(&tmp, "<tmp>"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Names of all entries directly under `path`, sorted.
    pub fn list(&self, path: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(path)
            .expect("read dir")
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Fluent builder for a config document.
#[derive(Default)]
pub struct ConfigBuilder {
    files: Vec<Value>,
    units: Vec<Value>,
}

impl ConfigBuilder {
    /// Begin an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file entry with a `contents.source`.
    pub fn file(mut self, path: &str, mode: u32, source: &str) -> Self {
        self.files.push(json!({
            "filesystem": "root",
            "path": path,
            "mode": mode,
            "contents": { "source": source, "verification": {} },
        }));
        self
    }

    /// Add a unit entry verbatim.
    pub fn unit(mut self, unit: Value) -> Self {
        self.units.push(unit);
        self
    }

    /// Render the document as Ignition JSON.
    pub fn build(self) -> String {
        json!({
            "ignition": { "version": "2.2.0" },
            "storage": { "files": self.files },
            "systemd": { "units": self.units },
        })
        .to_string()
    }
}

/// The four-scenario document used by several tests: an empty proxy script,
/// an enabled unit, a masked unit, and a disabled unit with a drop-in.
pub fn provisioning_document() -> String {
    ConfigBuilder::new()
        .file(
            "/etc/profile.d/proxy.sh",
            0o600,
            "data:text/plain;charset=utf-8;base64,",
        )
        .unit(json!({
            "name": "foo.service",
            "contents": "[Unit]\nDescription=foo\n\n[Install]\nWantedBy=multi-user.target\n",
            "enabled": true,
        }))
        .unit(json!({
            "name": "bar.service",
            "mask": true,
            "enabled": true,
        }))
        .unit(json!({
            "name": "baz.service",
            "enabled": false,
            "dropins": [
                { "name": "override.conf", "contents": "[Service]\nRestart=always\n" },
            ],
        }))
        .build()
}
