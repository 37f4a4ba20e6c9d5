//! Command implementations
//!
//! Each submodule hosts one subcommand's `run` entry point. Shared pipeline
//! plumbing (core build, link, manual-recovery output) lives in `helpers`.

pub mod completions;
pub mod create;
pub mod helpers;
pub mod update;
pub mod version;
