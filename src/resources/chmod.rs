//! Exact permission bits for a written file.
use anyhow::{Context as _, Result};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use super::{Applicable, Resource, ResourceChange, ResourceState};

/// Permission bits of a single file, set exactly (no umask, no merging).
#[derive(Debug, Clone)]
pub struct ChmodResource {
    /// Target file path (absolute).
    pub target: PathBuf,
    /// Permission bits (e.g. `0o600`).
    pub mode: u32,
}

impl ChmodResource {
    /// Create a new chmod resource.
    #[must_use]
    pub const fn new(target: PathBuf, mode: u32) -> Self {
        Self { target, mode }
    }
}

impl Applicable for ChmodResource {
    fn description(&self) -> String {
        format!("{:o} {}", self.mode, self.target.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        if self.current_state()? == ResourceState::Correct {
            return Ok(ResourceChange::AlreadyCorrect);
        }

        std::fs::set_permissions(&self.target, std::fs::Permissions::from_mode(self.mode))
            .with_context(|| format!("set permissions: {}", self.target.display()))?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for ChmodResource {
    fn current_state(&self) -> Result<ResourceState> {
        let Ok(meta) = std::fs::metadata(&self.target) else {
            return Ok(ResourceState::Invalid {
                reason: format!("target does not exist: {}", self.target.display()),
            });
        };

        let current_mode = meta.permissions().mode() & 0o7777;
        if current_mode == self.mode {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: format!("{current_mode:o}"),
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn chmod_resource_description() {
        let resource = ChmodResource::new(PathBuf::from("/host/etc/profile.d/proxy.sh"), 0o600);
        assert!(resource.description().contains("600"));
        assert!(resource.description().contains("proxy.sh"));
    }

    #[test]
    fn chmod_resource_invalid_when_target_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let resource = ChmodResource::new(temp_dir.path().join("nonexistent"), 0o600);

        let state = resource.current_state().unwrap();
        assert!(matches!(state, ResourceState::Invalid { .. }));
    }

    #[test]
    fn chmod_resource_detects_correct_mode() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("test.txt");
        std::fs::write(&file, "test").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o644)).unwrap();

        let resource = ChmodResource::new(file, 0o644);
        assert_eq!(resource.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn chmod_resource_detects_incorrect_mode() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("test.txt");
        std::fs::write(&file, "test").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o644)).unwrap();

        let resource = ChmodResource::new(file, 0o600);
        match resource.current_state().unwrap() {
            ResourceState::Incorrect { current } => assert_eq!(current, "644"),
            other => panic!("Expected Incorrect state, got {other:?}"),
        }
    }

    #[test]
    fn chmod_resource_sets_exact_bits() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("test.txt");
        std::fs::write(&file, "test").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o777)).unwrap();

        let resource = ChmodResource::new(file.clone(), 0o600);
        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);

        let current_mode = std::fs::metadata(&file).unwrap().permissions().mode() & 0o7777;
        assert_eq!(current_mode, 0o600);
        assert_eq!(resource.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn chmod_resource_reapply_is_already_correct() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("test.txt");
        std::fs::write(&file, "test").unwrap();

        let resource = ChmodResource::new(file, 0o600);
        resource.apply().unwrap();
        assert_eq!(resource.apply().unwrap(), ResourceChange::AlreadyCorrect);
    }

    #[test]
    fn chmod_resource_apply_fails_for_missing_target() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = ChmodResource::new(temp_dir.path().join("gone"), 0o600)
            .apply()
            .unwrap_err();
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }
}
