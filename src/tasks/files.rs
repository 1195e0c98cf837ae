//! Files pass: write every `storage.files[]` entry under the root.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskStats, apply_resource};
use crate::config::FileEntry;
use crate::resources::chmod::ChmodResource;
use crate::resources::file::FileResource;
use crate::resources::helpers::fs::ensure_parent_dir;

/// Materialize all file entries of the document.
#[derive(Debug)]
pub struct MaterializeFiles;

impl Task for MaterializeFiles {
    fn name(&self) -> &'static str {
        "Writing files"
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskStats> {
        materialize(ctx, &ctx.config.files)
    }
}

/// Write each entry in order: parent directories, decoded content, then
/// exact permission bits.
///
/// # Errors
///
/// Stops at the first entry that fails to decode, write, or chmod.  Entries
/// before it stay written.
pub fn materialize(ctx: &Context<'_>, entries: &[FileEntry]) -> Result<TaskStats> {
    let mut stats = TaskStats::new();
    for entry in entries {
        stats += write_entry(ctx, entry).with_context(|| format!("file {}", entry.path))?;
    }
    Ok(stats)
}

fn write_entry(ctx: &Context<'_>, entry: &FileEntry) -> Result<TaskStats> {
    let target = ctx.layout.file_path(&entry.path);
    let mut stats = TaskStats::new();

    if let Some(parent) = target.parent() {
        ctx.log.info(&format!("Creating dir {}", parent.display()));
    }
    ensure_parent_dir(&target)?;

    let content = match entry.source() {
        Some(source) => ctx.decoder.decode(source)?,
        None => Vec::new(),
    };

    ctx.log.info(&format!("Writing file {}", target.display()));
    if !content.is_empty() {
        ctx.log.debug(&String::from_utf8_lossy(&content));
    }
    stats.record(apply_resource(ctx, &FileResource::new(target.clone(), content))?);

    ctx.log
        .info(&format!("Running chmod {:o} {}", entry.mode, target.display()));
    stats.record(apply_resource(ctx, &ChmodResource::new(target, entry.mode))?);

    Ok(stats)
}
