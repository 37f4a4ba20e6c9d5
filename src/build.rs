//! Core build orchestration: fetch, extract, prepare, install, build, probe
//!
//! One `build` call runs the whole pipeline against a fresh working
//! directory and returns where the built core lives plus the version its own
//! manifest declares. Any stage failure aborts the run; working directories
//! are never cleaned up so a failed run can be inspected (and resumed by
//! hand with the recovery commands the caller prints).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::archive;
use crate::error::{BotforgeError, Result};
use crate::framework::{self, CORE_SUBDIR, ROOT_PREFIX};
use crate::manager::PackageManager;
use crate::manifest;
use crate::net;
use crate::process::ProcessRunner;
use crate::progress::{finish_spinner, stage_spinner};

/// Archive file name inside the working directory
pub const ARCHIVE_NAME: &str = "corebot.zip";

/// Location and version of a successfully built framework core
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// `<extracted root>/packages/core`
    pub core_path: PathBuf,
    /// Extracted snapshot root
    pub source_root: PathBuf,
    /// Version declared by the built core's own manifest
    pub version: String,
}

/// Default per-user build cache root (`~/.buildcache`)
pub fn default_cache_root() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| BotforgeError::IoError {
        message: "could not determine home directory".to_string(),
    })?;
    Ok(home.join(framework::BUILD_CACHE_DIR))
}

/// Create a working directory keyed by the current unix timestamp. Owned
/// exclusively by one pipeline run; a numeric suffix disambiguates when two
/// runs start within the same second.
pub fn create_working_dir(cache_root: &Path) -> Result<PathBuf> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| BotforgeError::IoError {
            message: e.to_string(),
        })?
        .as_secs();

    let mut candidate = cache_root.join(timestamp.to_string());
    let mut suffix = 1u32;
    while candidate.exists() {
        candidate = cache_root.join(format!("{timestamp}-{suffix}"));
        suffix += 1;
    }
    fs::create_dir_all(&candidate)?;
    Ok(candidate)
}

/// Builds the framework core from a branch snapshot
pub struct CoreBuilder<'a> {
    manager: PackageManager,
    mirror_base: String,
    runner: &'a dyn ProcessRunner,
    /// Pass child-process output through live instead of capturing it
    verbose: bool,
}

impl<'a> CoreBuilder<'a> {
    pub fn new(manager: PackageManager, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            manager,
            mirror_base: framework::mirror_base(),
            runner,
            verbose: false,
        }
    }

    pub fn with_mirror(mut self, mirror_base: impl Into<String>) -> Self {
        self.mirror_base = mirror_base.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// URL the snapshot is fetched from (also used for recovery text)
    pub fn archive_url(&self) -> String {
        framework::archive_url(&self.mirror_base)
    }

    /// Run all build stages inside `work_dir`. Fails fast at the first
    /// unrecoverable stage with that stage's context attached.
    pub fn build(&self, work_dir: &Path) -> Result<BuildResult> {
        let archive_path = work_dir.join(ARCHIVE_NAME);
        let url = self.archive_url();

        println!("Fetching corebot source from {}", url);
        net::download(&url, &archive_path)?;

        // Transport success with an empty payload is still a failed download
        let size = fs::metadata(&archive_path).map(|m| m.len()).unwrap_or(0);
        if size == 0 {
            return Err(BotforgeError::EmptyDownload {
                path: archive_path.display().to_string(),
            });
        }

        let root = self.extract_snapshot(&archive_path, work_dir)?;
        self.prepare_tree(&root)?;
        self.install_dependencies(&root)?;
        self.pin_manager(&root)?;
        self.run_build_script(&root)?;

        let core_path = root.join(CORE_SUBDIR);
        let version = manifest::read_version(&core_path.join(manifest::MANIFEST_NAME))?;

        println!("Built corebot core {} at {}", version, core_path.display());
        Ok(BuildResult {
            core_path,
            source_root: root,
            version,
        })
    }

    fn extract_snapshot(&self, archive_path: &Path, work_dir: &Path) -> Result<PathBuf> {
        let pb = stage_spinner("Extracting snapshot...");
        let result = archive::extract(archive_path, work_dir)
            .and_then(|()| archive::locate_extracted_root(work_dir, ROOT_PREFIX));
        finish_spinner(&pb);
        result
    }

    /// Stages 4-6: root manifest synthesis, lockfile placeholder, and (for
    /// the secondary manager) stripping stale manager pins across the tree.
    fn prepare_tree(&self, root: &Path) -> Result<()> {
        if manifest::ensure_root_manifest(root)
            .map_err(|e| BotforgeError::build_stage("workspace manifest", e))?
        {
            println!("Synthesized workspace manifest in extracted tree");
        }
        manifest::ensure_lockfile_placeholder(root)
            .map_err(|e| BotforgeError::build_stage("lockfile placeholder", e))?;

        if self.manager == PackageManager::Pnpm {
            let stripped = manifest::strip_manager_pins(root)
                .map_err(|e| BotforgeError::build_stage("manager pin strip", e))?;
            if stripped > 0 {
                println!("Stripped packageManager pin from {stripped} manifest(s)");
            }
        }
        Ok(())
    }

    fn install_dependencies(&self, root: &Path) -> Result<()> {
        self.run_stage(
            "dependency install",
            &format!("Installing dependencies with {}...", self.manager),
            &self.manager.install_args(),
            root,
        )
    }

    /// Re-add a manager pin reflecting the chosen manager's own installed
    /// version, to silence downstream workspace-tool warnings. The probe
    /// goes through the same runner as every other stage; a failed or empty
    /// probe skips the pin (the pin is cosmetic, the build is not).
    fn pin_manager(&self, root: &Path) -> Result<()> {
        let out = self
            .runner
            .run(
                self.manager.program(),
                &self.manager.version_args(),
                root,
                false,
            )
            .map_err(|e| BotforgeError::build_stage("manager pin", e))?;
        let version = out.stdout.trim();
        if !out.success || version.is_empty() {
            return Ok(());
        }
        manifest::ensure_manager_pin(
            &root.join(manifest::MANIFEST_NAME),
            &self.manager.pin_value(version),
        )
        .map_err(|e| BotforgeError::build_stage("manager pin", e))?;
        Ok(())
    }

    fn run_build_script(&self, root: &Path) -> Result<()> {
        self.run_stage(
            "compile",
            &format!("Building corebot with {}...", self.manager),
            &self.manager.build_args(),
            root,
        )
    }

    fn run_stage(&self, stage: &str, message: &str, args: &[String], cwd: &Path) -> Result<()> {
        println!("{message}");
        let pb = (!self.verbose).then(|| stage_spinner(message));
        let out = self
            .runner
            .run(self.manager.program(), args, cwd, self.verbose);
        if let Some(pb) = &pb {
            finish_spinner(pb);
        }
        let out = out.map_err(|e| BotforgeError::build_stage(stage, e))?;
        if !out.success {
            return Err(BotforgeError::build_stage(stage, out.detail()));
        }
        Ok(())
    }
}
