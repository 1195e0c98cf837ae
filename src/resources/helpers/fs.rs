//! File-system resource helpers.
use anyhow::{Context as _, Result};
use std::path::Path;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Returns `true` if anything exists at `path`, without following symlinks.
///
/// A dangling symlink counts as present.
#[must_use]
pub fn entry_exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Returns `true` if `path` itself is a symlink, dangling or not.
#[must_use]
pub fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata().is_ok_and(|m| m.is_symlink())
}

/// Remove whatever exists at `path`: a file, a symlink (never its target),
/// or a whole directory tree.
///
/// Returns `false` without error if nothing was there.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_any(path: &Path) -> Result<bool> {
    let Ok(meta) = path.symlink_metadata() else {
        return Ok(false);
    };
    if meta.is_dir() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("remove directory tree: {}", path.display()))?;
    } else {
        std::fs::remove_file(path)
            .with_context(|| format!("remove existing: {}", path.display()))?;
    }
    Ok(true)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // ensure_parent_dir
    // -----------------------------------------------------------------------

    #[test]
    fn ensure_parent_dir_creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("file.txt");
        ensure_parent_dir(&nested).unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
    }

    #[test]
    fn ensure_parent_dir_noop_when_parent_exists() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        ensure_parent_dir(&file).unwrap();
        assert!(dir.path().exists());
    }

    #[test]
    fn ensure_parent_dir_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("etc"), "not a dir").unwrap();
        let err = ensure_parent_dir(&dir.path().join("etc").join("motd")).unwrap_err();
        assert!(err.to_string().contains("create parent"));
    }

    // -----------------------------------------------------------------------
    // entry_exists
    // -----------------------------------------------------------------------

    #[test]
    fn entry_exists_false_for_absent_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!entry_exists(&dir.path().join("nothing")));
    }

    #[test]
    fn entry_exists_true_for_dangling_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink("/nonexistent/target", &link).unwrap();
        assert!(!link.exists(), "exists() follows the link");
        assert!(entry_exists(&link));
    }

    // -----------------------------------------------------------------------
    // is_symlink
    // -----------------------------------------------------------------------

    #[test]
    fn is_symlink_distinguishes_links_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("unit.service");
        std::fs::write(&file, "[Unit]\n").unwrap();
        let link = dir.path().join("masked.service");
        std::os::unix::fs::symlink("/nonexistent/dev/null", &link).unwrap();

        assert!(!is_symlink(&file));
        assert!(is_symlink(&link));
        assert!(!is_symlink(&dir.path().join("absent")));
    }

    // -----------------------------------------------------------------------
    // remove_any
    // -----------------------------------------------------------------------

    #[test]
    fn remove_any_removes_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("target");
        std::fs::write(&file, "content").unwrap();
        assert!(remove_any(&file).unwrap());
        assert!(!entry_exists(&file));
    }

    #[test]
    fn remove_any_noop_when_path_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!remove_any(&dir.path().join("nonexistent")).unwrap());
    }

    #[test]
    fn remove_any_removes_directory_tree() {
        let dir = tempfile::tempdir().unwrap();
        let tree = dir.path().join("getty@.service");
        std::fs::create_dir_all(tree.join("nested")).unwrap();
        std::fs::write(tree.join("nested").join("f"), "x").unwrap();
        assert!(remove_any(&tree).unwrap());
        assert!(!entry_exists(&tree));
    }

    #[test]
    fn remove_any_removes_symlink_not_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), "x").unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        assert!(remove_any(&link).unwrap());
        assert!(!entry_exists(&link));
        assert!(target.join("keep").exists());
    }
}
