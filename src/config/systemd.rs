//! `systemd` section: units, drop-ins, and their activation flags.
use serde::Deserialize;

use super::null_as_default;

/// The subset of Ignition's `systemd` section that is applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Systemd {
    /// Units to install, in document order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub units: Vec<UnitEntry>,
}

/// One systemd unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UnitEntry {
    /// Unit file name (e.g. `"foo.service"`).
    pub name: String,
    /// Full unit definition.  Absent or empty leaves the unit file alone.
    #[serde(default)]
    pub contents: Option<String>,
    /// Replace the unit with a link to the null device.
    #[serde(default, deserialize_with = "null_as_default")]
    pub mask: bool,
    /// Link the unit into `multi-user.target.wants`; `false` removes the link.
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
    /// Drop-in overrides written to `<name>.d/`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub dropins: Vec<Dropin>,
}

/// A drop-in override for a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Dropin {
    /// File name inside the unit's `.d` directory (e.g. `"10-override.conf"`).
    pub name: String,
    /// Drop-in body, written verbatim.
    #[serde(default, deserialize_with = "null_as_default")]
    pub contents: String,
}

impl UnitEntry {
    /// The unit body to write, treating an empty string as absent.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.contents.as_deref().filter(|c| !c.is_empty())
    }
}
