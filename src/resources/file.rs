//! Whole-file write resource.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::{Applicable, ResourceChange};

/// A regular file whose entire body is replaced on every apply.
#[derive(Debug, Clone)]
pub struct FileResource {
    /// Path to write.
    pub target: PathBuf,
    /// Bytes the file must contain afterwards.
    pub content: Vec<u8>,
}

impl FileResource {
    /// Create a new file resource.
    #[must_use]
    pub fn new(target: PathBuf, content: impl Into<Vec<u8>>) -> Self {
        Self {
            target,
            content: content.into(),
        }
    }
}

impl Applicable for FileResource {
    fn description(&self) -> String {
        format!("{} ({} bytes)", self.target.display(), self.content.len())
    }

    fn apply(&self) -> Result<ResourceChange> {
        super::helpers::fs::ensure_parent_dir(&self.target)?;
        std::fs::write(&self.target, &self.content)
            .with_context(|| format!("write file: {}", self.target.display()))?;
        Ok(ResourceChange::Applied)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn description_contains_path_and_size() {
        let resource = FileResource::new(PathBuf::from("/host/etc/motd"), "hello");
        assert!(resource.description().contains("/host/etc/motd"));
        assert!(resource.description().contains("5 bytes"));
    }

    #[test]
    fn apply_creates_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("etc").join("profile.d").join("proxy.sh");
        let resource = FileResource::new(target.clone(), "export X=1\n");

        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);
        assert_eq!(std::fs::read(&target).unwrap(), b"export X=1\n");
    }

    #[test]
    fn apply_truncates_longer_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("motd");
        std::fs::write(&target, "a much longer previous body").unwrap();

        FileResource::new(target.clone(), "short").apply().unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "short");
    }

    #[test]
    fn apply_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("empty");
        FileResource::new(target.clone(), Vec::new()).apply().unwrap();
        assert_eq!(std::fs::metadata(&target).unwrap().len(), 0);
    }

    #[test]
    fn apply_fails_when_target_is_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("occupied");
        std::fs::create_dir(&target).unwrap();

        let err = FileResource::new(target, "x").apply().unwrap_err();
        assert!(err.to_string().contains("write file"), "unexpected: {err}");
    }
}
