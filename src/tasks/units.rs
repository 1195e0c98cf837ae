//! Units pass: drop-ins, unit files, masking, and activation links.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskStats, apply_resource, remove_resource};
use crate::config::UnitEntry;
use crate::resources::ResourceChange;
use crate::resources::activation::ActivationLink;
use crate::resources::file::FileResource;
use crate::resources::helpers::fs::{is_symlink, remove_any};
use crate::resources::mask::MaskResource;

/// Install all unit entries of the document.
#[derive(Debug)]
pub struct InstallUnits;

impl Task for InstallUnits {
    fn name(&self) -> &'static str {
        "Installing units"
    }

    fn run(&self, ctx: &Context<'_>) -> Result<TaskStats> {
        install_units(ctx, &ctx.config.units)
    }
}

/// Install each unit in order.
///
/// Drop-ins are always written.  A masked unit is then linked to the null
/// device and nothing else happens to it; otherwise its body (if any) is
/// written and it is enabled or disabled.
///
/// # Errors
///
/// Stops at the first filesystem failure.  Units before it stay installed.
pub fn install_units(ctx: &Context<'_>, entries: &[UnitEntry]) -> Result<TaskStats> {
    let mut stats = TaskStats::new();
    for unit in entries {
        stats += install_unit(ctx, unit).with_context(|| format!("unit {}", unit.name))?;
    }
    Ok(stats)
}

fn install_unit(ctx: &Context<'_>, unit: &UnitEntry) -> Result<TaskStats> {
    let layout = ctx.layout;
    let unit_path = layout.unit_path(&unit.name);
    let mut stats = TaskStats::new();

    for dropin in &unit.dropins {
        let path = layout.dropin_path(&unit.name, &dropin.name);
        ctx.log.info(&format!("Writing drop-in {}", path.display()));
        stats.record(apply_resource(
            ctx,
            &FileResource::new(path, dropin.contents.as_bytes()),
        )?);
    }

    if unit.mask {
        ctx.log.info(&format!(
            "Masking unit {} -> {}",
            unit_path.display(),
            layout.null_device().display()
        ));
        let mask = MaskResource::new(unit_path, layout.null_device().to_path_buf());
        let change = apply_resource(ctx, &mask)?;
        if change == ResourceChange::AlreadyCorrect {
            ctx.log.info(&format!("{} is already masked", unit.name));
        }
        stats.record(change);
        return Ok(stats);
    }

    if let Some(body) = unit.body() {
        // A leftover mask link would redirect the write into the null device.
        if is_symlink(&unit_path) {
            ctx.log.warn(&format!(
                "Replacing symlink at {} with a unit file",
                unit_path.display()
            ));
            remove_any(&unit_path)?;
        }
        ctx.log.info(&format!("Writing unit {}", unit_path.display()));
        stats.record(apply_resource(
            ctx,
            &FileResource::new(unit_path.clone(), body.as_bytes()),
        )?);
    }

    let link = ActivationLink::new(unit_path, layout.wants_link(&unit.name));
    if unit.enabled {
        ctx.log.info(&format!("Enabling unit {}", unit.name));
        let change = apply_resource(ctx, &link)?;
        if change == ResourceChange::AlreadyCorrect {
            ctx.log.info(&format!(
                "{} already exists, not creating a new link",
                link.link.display()
            ));
        }
        stats.record(change);
    } else {
        ctx.log.info(&format!("Disabling unit {}", unit.name));
        let change = remove_resource(ctx, &link)?;
        if change == ResourceChange::AlreadyCorrect {
            ctx.log.info(&format!(
                "{} was not present, nothing to remove",
                link.link.display()
            ));
        }
        stats.record(change);
    }

    Ok(stats)
}
