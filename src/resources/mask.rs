//! Unit masking: the unit path becomes a symlink to the null device.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::helpers::fs::{ensure_parent_dir, remove_any};
use super::{Applicable, Resource, ResourceChange, ResourceState};

/// A masked unit.
///
/// Whatever was at `unit_path` before (a unit file, a stale link, or a
/// directory tree for template units) is removed first.
#[derive(Debug, Clone)]
pub struct MaskResource {
    /// `<unit_dir>/<name>`.
    pub unit_path: PathBuf,
    /// Link target, normally `<root>/dev/null`.
    pub null_device: PathBuf,
}

impl MaskResource {
    /// Create a new mask resource.
    #[must_use]
    pub const fn new(unit_path: PathBuf, null_device: PathBuf) -> Self {
        Self {
            unit_path,
            null_device,
        }
    }
}

impl Applicable for MaskResource {
    fn description(&self) -> String {
        format!(
            "{} -> {}",
            self.unit_path.display(),
            self.null_device.display()
        )
    }

    fn apply(&self) -> Result<ResourceChange> {
        if self.current_state()? == ResourceState::Correct {
            return Ok(ResourceChange::AlreadyCorrect);
        }

        // Absent is fine: masking a unit that was never installed is a no-op removal.
        remove_any(&self.unit_path)?;
        ensure_parent_dir(&self.unit_path)?;
        std::os::unix::fs::symlink(&self.null_device, &self.unit_path).with_context(|| {
            format!(
                "creating symlink {} -> {}",
                self.unit_path.display(),
                self.null_device.display()
            )
        })?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for MaskResource {
    fn current_state(&self) -> Result<ResourceState> {
        let Ok(meta) = self.unit_path.symlink_metadata() else {
            return Ok(ResourceState::Missing);
        };

        if !meta.is_symlink() {
            let kind = if meta.is_dir() { "directory" } else { "file" };
            return Ok(ResourceState::Incorrect {
                current: format!("unit path is a {kind}"),
            });
        }

        let existing = std::fs::read_link(&self.unit_path)
            .with_context(|| format!("reading link: {}", self.unit_path.display()))?;
        if existing == self.null_device {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: format!("points to {}", existing.display()),
            })
        }
    }
}
