//! Package manager detection and selection
//!
//! Availability is probed by invoking each tool's version command; the
//! absence of an error means available. The selected manager is returned to
//! the caller and threaded through the pipeline, never stored globally.

use std::path::Path;

use inquire::Select;

use crate::manager::{PackageManager, bootstrap};
use crate::process::{ProcessRunner, SystemRunner};

use crate::error::Result;

/// Check whether a manager is runnable on this host
pub fn is_available(manager: PackageManager) -> bool {
    probed_version(manager).is_some()
}

/// Probe a manager's installed version (`<tool> --version`), trimmed.
/// `None` when the tool is missing or the probe fails.
pub fn probed_version(manager: PackageManager) -> Option<String> {
    if which::which(manager.program()).is_err() {
        return None;
    }
    let runner = SystemRunner;
    let out = runner
        .run(
            manager.program(),
            &manager.version_args(),
            Path::new("."),
            false,
        )
        .ok()?;
    if !out.success {
        return None;
    }
    let version = out.stdout.trim().to_string();
    if version.is_empty() { None } else { Some(version) }
}

/// Select the package manager for this run.
///
/// - Both available: prompt, defaulting to bun (skipped when not
///   `interactive`, in which case bun wins).
/// - Exactly one available: use it without prompting.
/// - Neither available: offer to install bun (consent-gated); refusal or
///   failure yields `None`, which callers must treat as a hard stop for any
///   operation requiring a package manager.
pub fn select_package_manager(interactive: bool) -> Result<Option<PackageManager>> {
    let available: Vec<PackageManager> = PackageManager::ALL
        .into_iter()
        .filter(|m| is_available(*m))
        .collect();

    match available.as_slice() {
        [] => {
            if !interactive {
                return Ok(None);
            }
            if bootstrap::offer_bun_install()? {
                Ok(Some(PackageManager::Bun))
            } else {
                Ok(None)
            }
        }
        [only] => {
            println!("Using {} (only supported package manager found)", only);
            Ok(Some(*only))
        }
        _ => {
            if !interactive {
                return Ok(Some(PackageManager::Bun));
            }
            let choice = Select::new("Which package manager should botforge use?", available)
                .with_starting_cursor(0)
                .prompt()?;
            Ok(Some(choice))
        }
    }
}
