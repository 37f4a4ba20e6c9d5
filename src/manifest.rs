//! `package.json` reading, writing and targeted mutation
//!
//! The build pipeline edits manifests in three ways: synthesizing a minimal
//! root manifest for the extracted tree, stripping `packageManager` pins
//! across the whole tree, and re-adding a single pin for the chosen manager.
//! Scaffolding merges user answers into the generated manifest the same way
//! the templates expect (scalars replaced, scripts/keywords merged).

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use walkdir::WalkDir;

use crate::error::{BotforgeError, Result};

/// Manifest file name used across the JS ecosystem
pub const MANIFEST_NAME: &str = "package.json";

/// The `packageManager` pin field consumed by meta-build-runners
pub const MANAGER_PIN_FIELD: &str = "packageManager";

/// Alternate-manager lockfile created as an empty placeholder
pub const PNPM_LOCKFILE: &str = "pnpm-lock.yaml";

/// Read and parse a manifest
pub fn read(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path).map_err(|_| BotforgeError::ManifestNotFound {
        path: path.display().to_string(),
    })?;
    let value: Value =
        serde_json::from_str(&content).map_err(|e| BotforgeError::ManifestParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(BotforgeError::ManifestParseFailed {
            path: path.display().to_string(),
            reason: "top-level value is not an object".to_string(),
        }),
    }
}

/// Write a manifest with two-space indentation and a trailing newline
pub fn write(path: &Path, manifest: &Map<String, Value>) -> Result<()> {
    let mut content = serde_json::to_string_pretty(&Value::Object(manifest.clone()))?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

/// All manifests under `root`, lazily walked, skipping dependency and VCS
/// directories. Restartable by calling again.
pub fn find_manifests(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !(entry.file_type().is_dir() && (name == "node_modules" || name == ".git"))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == MANIFEST_NAME)
        .map(|entry| entry.into_path())
}

/// Synthesize a minimal root manifest declaring an empty workspace list when
/// none exists. This stops the build tool from treating the extracted
/// snapshot as a member of an enclosing multi-package workspace. Returns
/// whether a manifest was created.
pub fn ensure_root_manifest(root: &Path) -> Result<bool> {
    let path = root.join(MANIFEST_NAME);
    if path.exists() {
        return Ok(false);
    }
    let mut manifest = Map::new();
    manifest.insert("name".to_string(), json!("corebot-build-root"));
    manifest.insert("private".to_string(), json!(true));
    manifest.insert("workspaces".to_string(), json!([]));
    write(&path, &manifest)?;
    Ok(true)
}

/// Create an empty pnpm lockfile placeholder when absent, for
/// manager-compatibility of the extracted tree. Returns whether it was
/// created.
pub fn ensure_lockfile_placeholder(root: &Path) -> Result<bool> {
    let path = root.join(PNPM_LOCKFILE);
    if path.exists() {
        return Ok(false);
    }
    fs::write(&path, "")?;
    Ok(true)
}

/// Remove the `packageManager` pin from every manifest under `root`.
/// Primary/secondary pins are mutually exclusive; a stale pin makes
/// meta-build-runners invoke the wrong tool. Returns how many manifests
/// were modified.
pub fn strip_manager_pins(root: &Path) -> Result<usize> {
    let mut stripped = 0;
    for path in find_manifests(root) {
        let mut manifest = read(&path)?;
        if manifest.remove(MANAGER_PIN_FIELD).is_some() {
            write(&path, &manifest)?;
            stripped += 1;
        }
    }
    Ok(stripped)
}

/// Add a `packageManager` pin to `manifest_path` when none exists (an
/// existing pin is left untouched). Returns whether the pin was added.
pub fn ensure_manager_pin(manifest_path: &Path, pin: &str) -> Result<bool> {
    let mut manifest = read(manifest_path)?;
    if manifest.contains_key(MANAGER_PIN_FIELD) {
        return Ok(false);
    }
    manifest.insert(MANAGER_PIN_FIELD.to_string(), json!(pin));
    write(manifest_path, &manifest)?;
    Ok(true)
}

/// Read the `version` field of a manifest; a missing manifest or a
/// missing/empty field is an error, never a defaulted value.
pub fn read_version(manifest_path: &Path) -> Result<String> {
    let manifest = read(manifest_path)?;
    match manifest.get("version").and_then(Value::as_str) {
        Some(version) if !version.is_empty() => Ok(version.to_string()),
        _ => Err(BotforgeError::CoreVersionMissing {
            path: manifest_path.display().to_string(),
        }),
    }
}

/// Merge scaffold answers into a generated manifest: scalar fields are
/// replaced, `scripts` entries override existing keys, `keywords` are
/// appended without duplicates.
pub fn merge_scaffold_fields(
    manifest_path: &Path,
    name: &str,
    description: &str,
    scripts: &[(&str, &str)],
    keywords: &[&str],
) -> Result<()> {
    let mut manifest = read(manifest_path)?;
    manifest.insert("name".to_string(), json!(name));
    manifest.insert("description".to_string(), json!(description));

    let script_map = manifest
        .entry("scripts".to_string())
        .or_insert_with(|| json!({}));
    if let Value::Object(map) = script_map {
        for (key, value) in scripts {
            map.insert((*key).to_string(), json!(value));
        }
    }

    let keyword_list = manifest
        .entry("keywords".to_string())
        .or_insert_with(|| json!([]));
    if let Value::Array(list) = keyword_list {
        for keyword in keywords {
            let value = json!(keyword);
            if !list.contains(&value) {
                list.push(value);
            }
        }
    }

    write(manifest_path, &manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_raw(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_read_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_NAME);
        write_raw(&path, "[1, 2]");
        let err = read(&path).unwrap_err();
        assert!(matches!(err, BotforgeError::ManifestParseFailed { .. }));
    }

    #[test]
    fn test_ensure_root_manifest_only_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ensure_root_manifest(dir.path()).unwrap());
        let manifest = read(&dir.path().join(MANIFEST_NAME)).unwrap();
        assert_eq!(manifest.get("workspaces"), Some(&json!([])));
        assert_eq!(manifest.get("private"), Some(&json!(true)));

        // Second call is a no-op
        assert!(!ensure_root_manifest(dir.path()).unwrap());
    }

    #[test]
    fn test_ensure_lockfile_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ensure_lockfile_placeholder(dir.path()).unwrap());
        assert_eq!(
            fs::read_to_string(dir.path().join(PNPM_LOCKFILE)).unwrap(),
            ""
        );

        write_raw(&dir.path().join(PNPM_LOCKFILE), "lockfileVersion: 9");
        assert!(!ensure_lockfile_placeholder(dir.path()).unwrap());
        assert_eq!(
            fs::read_to_string(dir.path().join(PNPM_LOCKFILE)).unwrap(),
            "lockfileVersion: 9"
        );
    }

    #[test]
    fn test_find_manifests_skips_node_modules() {
        let dir = tempfile::tempdir().unwrap();
        write_raw(&dir.path().join("package.json"), "{}");
        write_raw(&dir.path().join("packages/core/package.json"), "{}");
        write_raw(&dir.path().join("node_modules/dep/package.json"), "{}");

        let found: Vec<_> = find_manifests(dir.path()).collect();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| !p.to_string_lossy().contains("node_modules")));
    }

    #[test]
    fn test_strip_manager_pins_recursive() {
        let dir = tempfile::tempdir().unwrap();
        write_raw(
            &dir.path().join("package.json"),
            r#"{"name":"root","packageManager":"pnpm@9.0.0"}"#,
        );
        write_raw(
            &dir.path().join("packages/core/package.json"),
            r#"{"name":"core","packageManager":"pnpm@9.0.0","version":"1.0.0"}"#,
        );
        write_raw(&dir.path().join("packages/other/package.json"), r#"{"name":"other"}"#);

        assert_eq!(strip_manager_pins(dir.path()).unwrap(), 2);
        let core = read(&dir.path().join("packages/core/package.json")).unwrap();
        assert!(!core.contains_key(MANAGER_PIN_FIELD));
        assert_eq!(core.get("version"), Some(&json!("1.0.0")));
    }

    #[test]
    fn test_strip_then_pin_is_idempotent() {
        use crate::manager::PackageManager;

        let dir = tempfile::tempdir().unwrap();
        let root_manifest = dir.path().join("package.json");
        write_raw(
            &root_manifest,
            r#"{"name":"root","packageManager":"pnpm@9.0.0"}"#,
        );

        let pin = PackageManager::Bun.pin_value("1.2.0");
        let run = || -> String {
            strip_manager_pins(dir.path()).unwrap();
            ensure_manager_pin(&root_manifest, &pin).unwrap();
            fs::read_to_string(&root_manifest).unwrap()
        };

        let once = run();
        let twice = run();
        assert_eq!(once, twice);
        assert!(once.contains("bun@1.2.0"));
        assert!(!once.contains("pnpm@9.0.0"));
    }

    #[test]
    fn test_ensure_manager_pin_keeps_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_NAME);
        write_raw(&path, r#"{"packageManager":"bun@1.0.0"}"#);
        assert!(!ensure_manager_pin(&path, "bun@1.2.0").unwrap());
        let manifest = read(&path).unwrap();
        assert_eq!(manifest.get(MANAGER_PIN_FIELD), Some(&json!("bun@1.0.0")));
    }

    #[test]
    fn test_read_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_NAME);
        write_raw(&path, r#"{"version":"2.3.1"}"#);
        assert_eq!(read_version(&path).unwrap(), "2.3.1");
    }

    #[test]
    fn test_read_version_missing_or_empty_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_NAME);

        write_raw(&path, r#"{"name":"core"}"#);
        assert!(matches!(
            read_version(&path).unwrap_err(),
            BotforgeError::CoreVersionMissing { .. }
        ));

        write_raw(&path, r#"{"version":""}"#);
        assert!(matches!(
            read_version(&path).unwrap_err(),
            BotforgeError::CoreVersionMissing { .. }
        ));

        assert!(matches!(
            read_version(&dir.path().join("absent.json")).unwrap_err(),
            BotforgeError::ManifestNotFound { .. }
        ));
    }

    #[test]
    fn test_merge_scaffold_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_NAME);
        write_raw(
            &path,
            r#"{"name":"template","scripts":{"lint":"eslint ."},"keywords":["corebot"]}"#,
        );

        merge_scaffold_fields(
            &path,
            "corebot-extension-weather",
            "Weather tools",
            &[("build", "tsc"), ("lint", "eslint . --ext .ts")],
            &["corebot", "extension"],
        )
        .unwrap();

        let manifest = read(&path).unwrap();
        assert_eq!(manifest.get("name"), Some(&json!("corebot-extension-weather")));
        let scripts = manifest.get("scripts").unwrap();
        assert_eq!(scripts.get("build"), Some(&json!("tsc")));
        // Update wins over the template value
        assert_eq!(scripts.get("lint"), Some(&json!("eslint . --ext .ts")));
        // Keywords merged without duplicates
        assert_eq!(manifest.get("keywords"), Some(&json!(["corebot", "extension"])));
    }
}
