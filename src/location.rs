//! Host-location classification for freshly scaffolded projects
//!
//! Decides from pure path inspection whether a new extension already lives
//! inside the framework's own monorepo (no remote build needed, the
//! workspace tooling resolves the core locally) or in a recognized external
//! host project, or somewhere the pipeline should not touch.

use std::path::Path;

use crate::framework::CONFIG_FILE;
use crate::manifest::MANIFEST_NAME;

/// Where a new project sits relative to the framework's conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectLocation {
    /// Inside the framework monorepo itself (`packages/` convention);
    /// short-circuits the build/link pipeline
    pub inside_framework: bool,
    /// Any recognized host convention matched
    pub valid_host: bool,
}

/// Classify `project_path` against three independent filesystem signals:
/// the framework monorepo `packages/` convention, and the external-plugin
/// convention at two depths.
pub fn classify(project_path: &Path) -> ProjectLocation {
    let inside_framework = in_framework_monorepo(project_path);
    let valid_host =
        inside_framework || in_external_dir(project_path) || beside_host_config(project_path);

    ProjectLocation {
        inside_framework,
        valid_host,
    }
}

/// Grandparent named `packages` with a root manifest one level above it
fn in_framework_monorepo(path: &Path) -> bool {
    let Some(grandparent) = path.parent().and_then(Path::parent) else {
        return false;
    };
    if grandparent.file_name().is_none_or(|n| n != "packages") {
        return false;
    }
    grandparent
        .parent()
        .is_some_and(|root| root.join(MANIFEST_NAME).is_file())
}

/// Parent named `external` with the framework config beside it
fn in_external_dir(path: &Path) -> bool {
    let Some(parent) = path.parent() else {
        return false;
    };
    if parent.file_name().is_none_or(|n| n != "external") {
        return false;
    }
    parent
        .parent()
        .is_some_and(|host| host.join(CONFIG_FILE).is_file())
}

/// Framework config directly in the parent directory
fn beside_host_config(path: &Path) -> bool {
    path.parent()
        .is_some_and(|parent| parent.join(CONFIG_FILE).is_file())
}
