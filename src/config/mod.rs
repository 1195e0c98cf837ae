//! Typed model of the Ignition config document.
//!
//! Only the parts the engine applies are modelled: `storage.files` and
//! `systemd.units` (with drop-ins and the `mask` / `enabled` flags).  Every
//! other key is ignored.  The document is parsed and validated once by
//! [`ConfigDocument::load`]; nothing downstream performs dynamic lookups.
pub mod storage;
pub mod systemd;
pub mod validation;

use serde::{Deserialize, Deserializer};
use std::path::Path;

use crate::error::ConfigError;

pub use storage::{FileContents, FileEntry};
pub use systemd::{Dropin, UnitEntry};

/// The parts of an Ignition document that the engine applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    /// Files from `storage.files`, in document order.
    pub files: Vec<FileEntry>,
    /// Units from `systemd.units`, in document order.
    pub units: Vec<UnitEntry>,
}

/// Top-level JSON shape; sections may be absent or `null`.
#[derive(Debug, Default, Deserialize)]
struct RawDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    storage: storage::Storage,
    #[serde(default, deserialize_with = "null_as_default")]
    systemd: systemd::Systemd,
}

impl ConfigDocument {
    /// Read, parse, and validate the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] or [`ConfigError::Io`] if the file
    /// cannot be read, [`ConfigError::Parse`] if it is not a valid document,
    /// and [`ConfigError::Invalid`] if an entry fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let document = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        validation::validate(&document)?;
        Ok(document)
    }

    /// Parse a JSON document without validating it.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error if `json` does not match the
    /// expected shape.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawDocument = serde_json::from_str(json)?;
        Ok(Self {
            files: raw.storage.files,
            units: raw.systemd.units,
        })
    }
}

/// Deserialize `null` the same as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
