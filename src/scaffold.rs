//! Project scaffolding from embedded templates
//!
//! Template trees are compiled into the binary; rendering copies one tree
//! into the destination and performs literal placeholder substitution for a
//! fixed set of variable names. Partially created project directories are
//! removed on failure; build working directories never are.

use std::fs;
use std::path::{Path, PathBuf};

use rust_embed::RustEmbed;

use crate::error::{BotforgeError, Result};
use crate::framework::EXTENSION_PREFIX;
use crate::manifest;

#[derive(RustEmbed)]
#[folder = "templates/"]
struct Templates;

/// Scripts merged into every scaffolded manifest
const SCAFFOLD_SCRIPTS: &[(&str, &str)] = &[
    ("build", "tsc && node esbuild.config.mjs"),
    ("dev", "tsc -w --preserveWatchOutput"),
    ("lint", "eslint . --ext .ts"),
    ("pack", "bun pm pack"),
    ("clean", "rm -rf lib .turbo tsconfig.tsbuildinfo *.tgz"),
];

const SCAFFOLD_KEYWORDS: &[&str] = &["corebot", "plugin", "extension"];

/// Variable bindings substituted into template files
#[derive(Debug, Clone)]
pub struct Bindings {
    /// kebab-case extension name
    pub name: String,
    /// Human-readable display name
    pub friendly_name: String,
    pub description: String,
    /// PascalCase class name derived from the display name
    pub class_name: String,
    /// Published package name (`corebot-extension-<name>`)
    pub full_package_name: String,
}

impl Bindings {
    pub fn new(name: &str, friendly_name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            friendly_name: friendly_name.to_string(),
            description: description.to_string(),
            class_name: pascal_case(friendly_name),
            full_package_name: format!("{EXTENSION_PREFIX}{name}"),
        }
    }

    fn apply(&self, input: &str) -> String {
        input
            .replace("{{name}}", &self.name)
            .replace("{{friendlyName}}", &self.friendly_name)
            .replace("{{description}}", &self.description)
            .replace("{{ClassName}}", &self.class_name)
            .replace("{{fullPackageName}}", &self.full_package_name)
    }
}

/// Whether a proposed extension name is kebab-case (lowercase letters,
/// digits, hyphens)
pub fn is_kebab_case(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Default display name derived from the kebab name (hyphens to spaces)
pub fn default_friendly_name(name: &str) -> String {
    name.replace('-', " ")
}

fn pascal_case(friendly_name: &str) -> String {
    friendly_name
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Render one embedded template tree (`base` or `extension`) into
/// `destination`, substituting placeholders in every file.
pub fn render(template: &str, destination: &Path, bindings: &Bindings) -> Result<()> {
    let prefix = format!("{template}/");
    let mut rendered = 0usize;

    for path in Templates::iter() {
        let Some(rel) = path.strip_prefix(&prefix) else {
            continue;
        };
        let Some(file) = Templates::get(&path) else {
            continue;
        };
        let out = destination.join(rel);
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = String::from_utf8_lossy(&file.data);
        fs::write(&out, bindings.apply(&content))?;
        rendered += 1;
    }

    if rendered == 0 {
        return Err(BotforgeError::TemplateMissing {
            name: template.to_string(),
        });
    }
    Ok(())
}

/// Create a new extension project under `parent`: base tree at the project
/// root, extension sources under `src/`, manifest finalized with the user's
/// answers. The target directory must not pre-exist; on any failure the
/// partially created directory is removed before the error propagates.
pub fn create_project(parent: &Path, bindings: &Bindings) -> Result<PathBuf> {
    let project = parent.join(&bindings.name);
    if project.exists() {
        return Err(BotforgeError::ProjectExists {
            name: bindings.name.clone(),
        });
    }

    fs::create_dir_all(&project)?;
    match populate_project(&project, bindings) {
        Ok(()) => Ok(project),
        Err(e) => {
            let _ = fs::remove_dir_all(&project);
            Err(e)
        }
    }
}

fn populate_project(project: &Path, bindings: &Bindings) -> Result<()> {
    render("base", project, bindings)?;
    render("extension", &project.join("src"), bindings)?;
    manifest::merge_scaffold_fields(
        &project.join(manifest::MANIFEST_NAME),
        &bindings.full_package_name,
        &bindings.description,
        SCAFFOLD_SCRIPTS,
        SCAFFOLD_KEYWORDS,
    )
}
