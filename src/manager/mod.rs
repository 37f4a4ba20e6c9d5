//! Supported package managers and their command tables
//!
//! The pipeline never branches on manager-specific command strings inline;
//! every manager exposes one strategy table here (program name, probe,
//! install, build, add-local-dependency) and the chosen variant is threaded
//! through the pipeline as an explicit parameter.

pub mod bootstrap;
pub mod probe;

use std::fmt;
use std::path::Path;

/// A supported JavaScript package manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    /// Primary manager (preferred default)
    Bun,
    /// Secondary manager
    Pnpm,
}

impl PackageManager {
    /// All supported managers, primary first
    pub const ALL: [PackageManager; 2] = [PackageManager::Bun, PackageManager::Pnpm];

    /// Executable name
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Bun => "bun",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// Arguments for the availability/version probe
    pub fn version_args(&self) -> Vec<String> {
        vec!["--version".to_string()]
    }

    /// Arguments for a full dependency install with engine-version checks
    /// relaxed (some corebot dependencies declare engines for the other
    /// manager's ecosystem and would hard-fail otherwise).
    pub fn install_args(&self) -> Vec<String> {
        match self {
            PackageManager::Bun => vec!["install".to_string()],
            PackageManager::Pnpm => vec![
                "install".to_string(),
                "--no-frozen-lockfile".to_string(),
                "--config.engine-strict=false".to_string(),
            ],
        }
    }

    /// Arguments for running the framework's build script
    pub fn build_args(&self) -> Vec<String> {
        vec!["run".to_string(), "build".to_string()]
    }

    /// Arguments for installing a local directory as a forced dev dependency
    pub fn add_local_dep_args(&self, path: &Path) -> Vec<String> {
        let spec = format!("file:{}", path.display());
        match self {
            PackageManager::Bun => vec![
                "add".to_string(),
                spec,
                "--dev".to_string(),
                "--force".to_string(),
            ],
            PackageManager::Pnpm => vec!["add".to_string(), spec, "--save-dev".to_string()],
        }
    }

    /// Value for the `packageManager` manifest pin, e.g. `bun@1.2.0`
    pub fn pin_value(&self, version: &str) -> String {
        format!("{}@{}", self.program(), version)
    }

    /// Lockfile names owned by this manager's ecosystem
    pub fn lockfile_names(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Bun => &["bun.lock", "bun.lockb"],
            PackageManager::Pnpm => &["pnpm-lock.yaml"],
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}
