//! Unit activation via `multi-user.target.wants` symlinks.
//!
//! A unit is enabled exactly when something exists at its wants-directory
//! path.  Existence is checked without following links, so a dangling link
//! still counts as enabled and is never replaced.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::helpers::fs::{ensure_parent_dir, entry_exists};
use super::{Applicable, ResourceChange};

/// An activation link: `link` -> `unit_path`.
///
/// [`apply`](Applicable::apply) enables the unit and
/// [`remove`](Applicable::remove) disables it.
#[derive(Debug, Clone)]
pub struct ActivationLink {
    /// The installed unit file (what the link points to).
    pub unit_path: PathBuf,
    /// `<wants_dir>/<name>` (where the link lives).
    pub link: PathBuf,
}

impl ActivationLink {
    /// Create a new activation link resource.
    #[must_use]
    pub const fn new(unit_path: PathBuf, link: PathBuf) -> Self {
        Self { unit_path, link }
    }
}

impl Applicable for ActivationLink {
    fn description(&self) -> String {
        format!("{} -> {}", self.link.display(), self.unit_path.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        if entry_exists(&self.link) {
            return Ok(ResourceChange::AlreadyCorrect);
        }

        ensure_parent_dir(&self.link)?;
        std::os::unix::fs::symlink(&self.unit_path, &self.link).with_context(|| {
            format!(
                "creating symlink {} -> {}",
                self.link.display(),
                self.unit_path.display()
            )
        })?;
        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        if !entry_exists(&self.link) {
            return Ok(ResourceChange::AlreadyCorrect);
        }

        std::fs::remove_file(&self.link)
            .with_context(|| format!("removing link: {}", self.link.display()))?;
        Ok(ResourceChange::Applied)
    }
}
