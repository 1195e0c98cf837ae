//! Target paths derived from the root directory.
use std::path::{Path, PathBuf};

/// Root used when none is given on the command line.
pub const DEFAULT_ROOT: &str = "/host";

/// Where systemd looks for locally administered units.
const UNIT_DIR: &str = "etc/systemd/system";

/// Symlink membership here decides which units start with the default target.
const WANTS_DIR: &str = "etc/systemd/system/multi-user.target.wants";

const NULL_DEVICE: &str = "dev/null";

/// Filesystem layout under a target root.
///
/// # Examples
///
/// ```
/// use ignition_apply::layout::Layout;
/// use std::path::Path;
///
/// let layout = Layout::new("/host");
/// assert_eq!(layout.unit_path("foo.service"), Path::new("/host/etc/systemd/system/foo.service"));
/// assert_eq!(layout.file_path("/etc/motd"), Path::new("/host/etc/motd"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
    unit_dir: PathBuf,
    wants_dir: PathBuf,
    null_device: PathBuf,
}

impl Layout {
    /// Build the layout for `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            unit_dir: root.join(UNIT_DIR),
            wants_dir: root.join(WANTS_DIR),
            null_device: root.join(NULL_DEVICE),
            root,
        }
    }

    /// `<root>/etc/systemd/system`.
    #[must_use]
    pub fn unit_dir(&self) -> &Path {
        &self.unit_dir
    }

    /// `<root>/etc/systemd/system/multi-user.target.wants`.
    #[must_use]
    pub fn wants_dir(&self) -> &Path {
        &self.wants_dir
    }

    /// `<root>/dev/null`, the target of masked units.
    #[must_use]
    pub fn null_device(&self) -> &Path {
        &self.null_device
    }

    /// Where a storage file entry lands.
    ///
    /// The entry path is appended to the root as a string, so `..`
    /// components are kept as-is rather than normalized.
    #[must_use]
    pub fn file_path(&self, entry_path: &str) -> PathBuf {
        let mut joined = self.root.clone().into_os_string();
        joined.push(entry_path);
        PathBuf::from(joined)
    }

    /// `<unit_dir>/<name>`.
    #[must_use]
    pub fn unit_path(&self, name: &str) -> PathBuf {
        self.unit_dir.join(name)
    }

    /// `<unit_dir>/<name>.d/<dropin>`.
    #[must_use]
    pub fn dropin_path(&self, unit: &str, dropin: &str) -> PathBuf {
        self.unit_dir.join(format!("{unit}.d")).join(dropin)
    }

    /// `<wants_dir>/<name>`.
    #[must_use]
    pub fn wants_link(&self, name: &str) -> PathBuf {
        self.wants_dir.join(name)
    }
}
