//! `ignition-apply` binary: parses CLI arguments and runs the [`Applier`].

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use ignition_apply::cli::Cli;
use ignition_apply::logging::{self, Logger};
use ignition_apply::tasks::Applier;

fn main() -> Result<()> {
    logging::init_subscriber();
    let args = Cli::parse();

    Applier::new(args.file, args.base_dir, Arc::new(Logger::new())).apply()?;
    Ok(())
}
