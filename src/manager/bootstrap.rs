//! Consent-gated bun installation for hosts with no package manager
//!
//! Two installation methods are tried in order: a global npm install (the
//! package manager of last resort) and bun's official shell-script
//! installer. The script installer appends PATH exports to shell rc files
//! and is not idempotent, so it is a second, separately confirmed opt-in
//! step rather than a silent fallback.

use std::path::Path;

use console::style;
use inquire::Confirm;

use crate::error::Result;
use crate::manager::{PackageManager, probe};
use crate::process::{ProcessRunner, RunOutput, SystemRunner};

const BUN_INSTALL_SCRIPT: &str = "https://bun.sh/install";

/// Ask for consent and try to install bun. Returns whether bun is usable
/// afterwards (verified by re-probing its version command).
pub fn offer_bun_install() -> Result<bool> {
    println!("Neither bun nor pnpm was found on this system.");
    let consent = Confirm::new("Install bun automatically?")
        .with_default(true)
        .with_help_message("bun is the recommended package manager for corebot extensions")
        .prompt()?;
    if !consent {
        return Ok(false);
    }

    if install_via_npm()? {
        return Ok(verify_bun());
    }

    println!(
        "{}",
        style("npm-based install failed or npm is unavailable.").yellow()
    );
    let script_consent = Confirm::new("Install bun with its official shell script instead?")
        .with_default(false)
        .with_help_message(
            "Runs `curl -fsSL https://bun.sh/install | bash`. This appends PATH \
             exports to your shell rc file (~/.bashrc or ~/.zshrc); re-running \
             it can append duplicate lines.",
        )
        .prompt()?;
    if !script_consent {
        return Ok(false);
    }

    if install_via_script()? {
        extend_path_with_bun_bin();
        return Ok(verify_bun());
    }

    Ok(false)
}

fn install_via_npm() -> Result<bool> {
    if which::which("npm").is_err() {
        return Ok(false);
    }
    println!("Installing bun via npm (npm install -g bun)...");
    let runner = SystemRunner;
    let out = runner.run(
        "npm",
        &["install".to_string(), "-g".to_string(), "bun".to_string()],
        Path::new("."),
        true,
    )?;
    Ok(out.success)
}

fn install_via_script() -> Result<bool> {
    println!("Installing bun via {}...", BUN_INSTALL_SCRIPT);
    let runner = SystemRunner;
    let out: RunOutput = runner.run(
        "bash",
        &[
            "-c".to_string(),
            format!("curl -fsSL {BUN_INSTALL_SCRIPT} | bash"),
        ],
        Path::new("."),
        true,
    )?;
    Ok(out.success)
}

/// The script installer puts bun under `~/.bun/bin`; make it reachable for
/// the rest of this process so the verification probe and the pipeline work
/// without a shell restart.
fn extend_path_with_bun_bin() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    let bun_bin = home.join(".bun").join("bin");
    let current = std::env::var_os("PATH").unwrap_or_default();
    let mut paths: Vec<_> = std::env::split_paths(&current).collect();
    if paths.contains(&bun_bin) {
        return;
    }
    paths.insert(0, bun_bin);
    if let Ok(joined) = std::env::join_paths(paths) {
        unsafe {
            std::env::set_var("PATH", joined);
        }
    }
}

fn verify_bun() -> bool {
    match probe::probed_version(PackageManager::Bun) {
        Some(version) => {
            println!("bun {} installed", version);
            true
        }
        None => {
            eprintln!("bun was installed but its version probe failed");
            false
        }
    }
}
