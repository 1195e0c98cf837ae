//! Apply an Ignition config to a mounted target root.
//!
//! Only the parts of the document that matter for an offline root are
//! applied: `storage.files[]` (decoded content, exact permission bits) and
//! `systemd.units[]` (unit files, drop-ins, masking, and
//! `multi-user.target.wants` activation links).
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: parse and validate the JSON document
//! - **[`content`]**: decode `data:` URL content sources
//! - **[`resources`]**: idempotent `check + apply` filesystem primitives
//! - **[`tasks`]**: the files and units passes, and the [`Applier`](tasks::Applier) that runs them
//! - **[`logging`]**: the injected [`Log`](logging::Log) sink and subscriber setup
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod layout;
pub mod logging;
pub mod resources;
pub mod tasks;
