//! Zip archive extraction and extracted-root lookup
//!
//! The downloaded archive is a branch snapshot, so its single top-level
//! directory embeds the branch name (`corebot-dev`) rather than being fixed;
//! the root is located by name prefix after extraction.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{BotforgeError, Result};

/// Unpack `archive` fully into `destination`, overwriting existing entries.
/// Entry paths are sanitized so an archive cannot write outside the
/// destination.
pub fn extract(archive: &Path, destination: &Path) -> Result<()> {
    let file = File::open(archive).map_err(|e| BotforgeError::ExtractionFailed {
        path: archive.display().to_string(),
        reason: e.to_string(),
    })?;
    let mut zip = zip::ZipArchive::new(file).map_err(|e| BotforgeError::ExtractionFailed {
        path: archive.display().to_string(),
        reason: e.to_string(),
    })?;

    fs::create_dir_all(destination)?;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let raw = entry.name().replace('\\', "/");
        let Some(rel) = sanitize_entry_path(Path::new(&raw)) else {
            continue;
        };
        let out = destination.join(rel);
        if entry.is_dir() {
            fs::create_dir_all(&out)?;
            continue;
        }
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out_file = File::create(&out)?;
        io::copy(&mut entry, &mut out_file).map_err(|e| BotforgeError::ExtractionFailed {
            path: out.display().to_string(),
            reason: e.to_string(),
        })?;
    }

    Ok(())
}

/// Strip absolute/parent components from an archive entry path. `None` when
/// nothing safe remains.
fn sanitize_entry_path(path: &Path) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            Component::CurDir => {}
        }
    }
    if clean.as_os_str().is_empty() {
        None
    } else {
        Some(clean)
    }
}

/// Locate the extracted project root: the immediate child of `destination`
/// whose directory name starts with `prefix`. Fails listing every sibling
/// found, to aid diagnosis of unexpected archive layouts.
pub fn locate_extracted_root(destination: &Path, prefix: &str) -> Result<PathBuf> {
    let mut siblings = Vec::new();
    for entry in fs::read_dir(destination)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if entry.file_type()?.is_dir() && name.starts_with(prefix) {
            return Ok(entry.path());
        }
        siblings.push(name);
    }

    siblings.sort();
    Err(BotforgeError::ExtractedRootMissing {
        dir: destination.display().to_string(),
        prefix: prefix.to_string(),
        siblings: if siblings.is_empty() {
            "nothing".to_string()
        } else {
            siblings.join(", ")
        },
    })
}
