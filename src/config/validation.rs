//! Load-time checks that keep every entry inside the paths it may touch.
use crate::error::ConfigError;

use super::ConfigDocument;

/// Highest permission value a file entry may request (setuid/setgid/sticky + rwx).
const MAX_MODE: u32 = 0o7777;

/// Validate every entry of `document`, failing on the first problem.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] naming the offending entry.
pub fn validate(document: &ConfigDocument) -> Result<(), ConfigError> {
    for (i, file) in document.files.iter().enumerate() {
        let item = format!("storage.files[{i}]");
        if !file.path.starts_with('/') {
            return Err(invalid(
                item,
                format!("path must be absolute: {:?}", file.path),
            ));
        }
        if file.mode > MAX_MODE {
            return Err(invalid(
                item,
                format!("mode {:o} exceeds {MAX_MODE:o}", file.mode),
            ));
        }
    }

    for (i, unit) in document.units.iter().enumerate() {
        check_component(&format!("systemd.units[{i}]"), "name", &unit.name)?;
        for (j, dropin) in unit.dropins.iter().enumerate() {
            check_component(
                &format!("systemd.units[{i}].dropins[{j}]"),
                "name",
                &dropin.name,
            )?;
        }
    }

    Ok(())
}

/// A unit or drop-in name must be exactly one path component.
fn check_component(item: &str, field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(invalid(item, format!("{field} must not be empty")));
    }
    if value.contains('/') || value == "." || value == ".." {
        return Err(invalid(
            item,
            format!("{field} must be a single path component: {value:?}"),
        ));
    }
    Ok(())
}

fn invalid(item: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        item: item.into(),
        message: message.into(),
    }
}
