//! Linking a built core into a scaffolded extension project
//!
//! Stale dependency caches and lockfiles from either manager ecosystem are
//! removed first; mixing resolutions from bun and pnpm produces conflicts
//! that only show up at runtime. All steps are fatal on first error and the
//! caller prints the matching manual fallback commands.

use std::fs;
use std::path::Path;

use crate::build::BuildResult;
use crate::error::{BotforgeError, Result};
use crate::manager::PackageManager;
use crate::process::ProcessRunner;
use crate::progress::{finish_spinner, stage_spinner};

/// npm-ecosystem lockfile neither manager owns but either may choke on
const NPM_LOCKFILE: &str = "package-lock.json";

/// Stale state removed from the project before linking
pub fn stale_entries() -> Vec<&'static str> {
    let mut entries = vec!["node_modules", NPM_LOCKFILE];
    for manager in PackageManager::ALL {
        entries.extend(manager.lockfile_names());
    }
    entries
}

/// Install the built core into `project` as a forced local dev dependency,
/// then run a full dependency install for the project itself.
pub fn link(
    project: &Path,
    build: &BuildResult,
    manager: PackageManager,
    runner: &dyn ProcessRunner,
    verbose: bool,
) -> Result<()> {
    clean_stale_state(project)?;

    println!(
        "Linking corebot core {} into {}",
        build.version,
        project.display()
    );
    run_link_step(
        runner,
        manager,
        &manager.add_local_dep_args(&build.core_path),
        project,
        verbose,
        "add local core dependency",
    )?;

    println!("Installing project dependencies with {}...", manager);
    run_link_step(
        runner,
        manager,
        &manager.install_args(),
        project,
        verbose,
        "project dependency install",
    )?;

    Ok(())
}

/// Remove the dependency directory and any lockfile of either manager
fn clean_stale_state(project: &Path) -> Result<()> {
    for entry in stale_entries() {
        let path = project.join(entry);
        if path.is_dir() {
            fs::remove_dir_all(&path).map_err(|e| BotforgeError::LinkFailed {
                reason: format!("cannot remove {}: {}", path.display(), e),
            })?;
        } else if path.is_file() {
            fs::remove_file(&path).map_err(|e| BotforgeError::LinkFailed {
                reason: format!("cannot remove {}: {}", path.display(), e),
            })?;
        }
    }
    Ok(())
}

fn run_link_step(
    runner: &dyn ProcessRunner,
    manager: PackageManager,
    args: &[String],
    project: &Path,
    verbose: bool,
    step: &str,
) -> Result<()> {
    let pb = (!verbose).then(|| stage_spinner(step));
    let out = runner.run(manager.program(), args, project, verbose);
    if let Some(pb) = &pb {
        finish_spinner(pb);
    }
    let out = out.map_err(|e| BotforgeError::LinkFailed {
        reason: format!("{step}: {e}"),
    })?;
    if !out.success {
        return Err(BotforgeError::LinkFailed {
            reason: format!("{step}: {}", out.detail()),
        });
    }
    Ok(())
}
