//! `storage` section: files to materialize under the target root.
use serde::Deserialize;

use super::null_as_default;

/// The subset of Ignition's `storage` section that is applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    /// Files to write, in document order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<FileEntry>,
}

/// One file to write.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileEntry {
    /// Absolute path, interpreted relative to the target root.
    pub path: String,
    /// Permission bits, as a plain JSON integer (`384` is `0o600`).
    pub mode: u32,
    /// Encoded file body.
    #[serde(default, deserialize_with = "null_as_default")]
    pub contents: FileContents,
}

/// Ignition's `contents` object for a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileContents {
    /// Encoded content reference (a data URL).  `None` writes an empty file.
    #[serde(default)]
    pub source: Option<String>,
}

impl FileEntry {
    /// The content source, if the entry has one.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.contents.source.as_deref()
    }
}
