//! Shared pipeline plumbing and manual-recovery output
//!
//! Build and link failures are not retried; the failed working directory is
//! kept and the exact commands to finish the job by hand are printed before
//! the error propagates. The printed commands mirror what the automated
//! stages would have run, same URL, same directory, same manager arguments.

use std::path::Path;

use console::style;

use crate::build::{self, ARCHIVE_NAME, BuildResult, CoreBuilder};
use crate::error::Result;
use crate::framework::{BRANCH, GITHUB_REPO};
use crate::link;
use crate::manager::PackageManager;
use crate::process::{SystemRunner, render_command};

/// Build the core in a fresh working directory under the user's build
/// cache. On failure the recovery commands are printed and the working
/// directory is left in place for inspection.
pub fn build_core(manager: PackageManager, verbose: bool) -> Result<BuildResult> {
    let cache_root = build::default_cache_root()?;
    let work_dir = build::create_working_dir(&cache_root)?;

    let runner = SystemRunner;
    let builder = CoreBuilder::new(manager, &runner).with_verbose(verbose);
    match builder.build(&work_dir) {
        Ok(result) => Ok(result),
        Err(e) => {
            eprintln!();
            eprintln!(
                "{}",
                style("The core build failed. To finish it by hand:")
                    .yellow()
                    .bold()
            );
            for line in build_recovery_lines(&work_dir, &builder.archive_url(), manager) {
                eprintln!("  {line}");
            }
            eprintln!("The working directory is kept: {}", work_dir.display());
            Err(e)
        }
    }
}

/// Link a built core into one project, printing the manual fallback
/// commands on failure.
pub fn link_project(
    project: &Path,
    built: &BuildResult,
    manager: PackageManager,
    verbose: bool,
) -> Result<()> {
    let runner = SystemRunner;
    match link::link(project, built, manager, &runner, verbose) {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!();
            eprintln!(
                "{}",
                style("Linking failed. To link by hand:").yellow().bold()
            );
            for line in link_recovery_lines(project, built, manager) {
                eprintln!("  {line}");
            }
            Err(e)
        }
    }
}

fn build_recovery_lines(work_dir: &Path, url: &str, manager: PackageManager) -> Vec<String> {
    vec![
        format!("cd {}", work_dir.display()),
        format!("curl -L {url} -o {ARCHIVE_NAME}"),
        format!("unzip -o {ARCHIVE_NAME}"),
        format!("cd {GITHUB_REPO}-{BRANCH}"),
        render_command(manager.program(), &manager.install_args()),
        render_command(manager.program(), &manager.build_args()),
    ]
}

fn link_recovery_lines(project: &Path, built: &BuildResult, manager: PackageManager) -> Vec<String> {
    vec![
        format!("cd {}", project.display()),
        format!("rm -rf {}", link::stale_entries().join(" ")),
        render_command(
            manager.program(),
            &manager.add_local_dep_args(&built.core_path),
        ),
        render_command(manager.program(), &manager.install_args()),
    ]
}
