//! Command-line surface.
use std::path::PathBuf;

use clap::Parser;

use crate::layout::DEFAULT_ROOT;

/// Version string: `IGNITION_APPLY_VERSION` from the build, else the
/// package version.
pub const VERSION: &str = match option_env!("IGNITION_APPLY_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// Apply an Ignition config's files and systemd units to a mounted root.
#[derive(Parser, Debug)]
#[command(name = "ignition-apply", version = VERSION)]
pub struct Cli {
    /// Path to the Ignition config (JSON)
    #[arg(value_parser = existing_file)]
    pub file: PathBuf,

    /// Root directory the config is applied to
    #[arg(long, alias = "base_dir", default_value = DEFAULT_ROOT)]
    pub base_dir: PathBuf,
}

/// Accept only paths that exist, so a typo fails before anything is touched.
fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("The file {value} does not exist!"))
    }
}
