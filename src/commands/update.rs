//! Update command implementation
//!
//! Rebuilds the framework core once, then relinks it into one or more
//! existing extension projects. Candidates are the children of an
//! `external/` directory carrying a manifest, or the current directory
//! itself. Linking stops at the first failing project.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use inquire::MultiSelect;

use crate::cli::UpdateArgs;
use crate::commands::helpers;
use crate::error::{BotforgeError, Result};
use crate::manager::probe;
use crate::manifest::MANIFEST_NAME;

/// Run the update command
pub fn run(args: UpdateArgs, verbose: bool) -> Result<()> {
    let cwd = env::current_dir()?;
    let candidates = discover_projects(&cwd)?;
    if candidates.is_empty() {
        return Err(BotforgeError::LinkFailed {
            reason: format!(
                "no extension projects found under {} (expected a package.json here or under external/)",
                cwd.display()
            ),
        });
    }

    let selected = select_projects(candidates, &args)?;
    if selected.is_empty() {
        println!("Nothing selected.");
        return Ok(());
    }

    let Some(manager) = probe::select_package_manager(true)? else {
        return Err(BotforgeError::NoPackageManager);
    };
    let built = helpers::build_core(manager, verbose)?;
    for project in &selected {
        helpers::link_project(project, &built, manager, verbose)?;
    }

    println!(
        "{} {} project(s) now use corebot core {}",
        style("Updated").green().bold(),
        selected.len(),
        built.version
    );
    Ok(())
}

/// Candidate projects, sorted by name: children of `external/` that carry a
/// manifest, falling back to the current directory itself when it has one.
fn discover_projects(cwd: &Path) -> Result<Vec<PathBuf>> {
    let external = cwd.join("external");
    if external.is_dir() {
        let mut found: Vec<PathBuf> = fs::read_dir(&external)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && path.join(MANIFEST_NAME).is_file())
            .collect();
        found.sort();
        if !found.is_empty() {
            return Ok(found);
        }
    }
    if cwd.join(MANIFEST_NAME).is_file() {
        return Ok(vec![cwd.to_path_buf()]);
    }
    Ok(Vec::new())
}

/// Narrow the candidates down to what the run should link: explicit targets
/// win, then `--all`, then a menu when there is a real choice to make.
fn select_projects(candidates: Vec<PathBuf>, args: &UpdateArgs) -> Result<Vec<PathBuf>> {
    if !args.targets.is_empty() {
        let mut selected = Vec::new();
        for target in &args.targets {
            match candidates
                .iter()
                .find(|path| path.file_name().is_some_and(|n| n == target.as_str()))
            {
                Some(path) => selected.push(path.clone()),
                None => {
                    return Err(BotforgeError::LinkFailed {
                        reason: format!("no project named '{target}' among discovered candidates"),
                    });
                }
            }
        }
        return Ok(selected);
    }

    if args.all || candidates.len() == 1 {
        return Ok(candidates);
    }

    let names: Vec<String> = candidates
        .iter()
        .map(|path| {
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        })
        .collect();
    let chosen = MultiSelect::new("Which projects should be relinked?", names).prompt()?;

    Ok(candidates
        .into_iter()
        .filter(|path| {
            path.file_name()
                .is_some_and(|n| chosen.iter().any(|c| n == c.as_str()))
        })
        .collect())
}
