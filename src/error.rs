//! Error types and handling for Botforge
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! The taxonomy mirrors the pipeline stages: download, extraction, build,
//! link, environment (package manager availability) and scaffolding, plus
//! ambient IO/manifest conversions.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Botforge operations
#[derive(Error, Diagnostic, Debug)]
pub enum BotforgeError {
    // Download errors
    #[error("Failed to download {url}: {reason}")]
    #[diagnostic(
        code(botforge::download::failed),
        help("Check your network connection, or set BOTFORGE_MIRROR_URL to an alternate mirror")
    )]
    DownloadFailed { url: String, reason: String },

    #[error("Downloaded file is empty: {path}")]
    #[diagnostic(
        code(botforge::download::empty),
        help("The mirror returned a zero-byte payload. Try again or use a different mirror")
    )]
    EmptyDownload { path: String },

    // Extraction errors
    #[error("Failed to extract archive {path}: {reason}")]
    #[diagnostic(code(botforge::extract::failed))]
    ExtractionFailed { path: String, reason: String },

    #[error("No extracted directory matching '{prefix}*' under {dir} (found: {siblings})")]
    #[diagnostic(
        code(botforge::extract::root_missing),
        help("The archive layout is unexpected. Inspect the directory listed above")
    )]
    ExtractedRootMissing {
        dir: String,
        prefix: String,
        siblings: String,
    },

    // Build errors
    #[error("Build stage '{stage}' failed: {reason}")]
    #[diagnostic(code(botforge::build::stage_failed))]
    BuildStageFailed { stage: String, reason: String },

    #[error("Built core package has no version field: {path}")]
    #[diagnostic(
        code(botforge::build::version_missing),
        help("The core package.json is missing or its 'version' field is empty")
    )]
    CoreVersionMissing { path: String },

    // Link errors
    #[error("Failed to link core into project: {reason}")]
    #[diagnostic(code(botforge::link::failed))]
    LinkFailed { reason: String },

    // Environment errors
    #[error("No supported package manager available")]
    #[diagnostic(
        code(botforge::env::no_package_manager),
        help("Install bun (https://bun.sh) or pnpm (https://pnpm.io) and re-run")
    )]
    NoPackageManager,

    // Prompt cancellation (Esc/Ctrl-C); handled as a clean exit, never
    // printed as an error
    #[error("Operation cancelled")]
    #[diagnostic(code(botforge::prompt::cancelled))]
    Cancelled,

    // Scaffold errors
    #[error("Invalid extension name '{name}'")]
    #[diagnostic(
        code(botforge::scaffold::invalid_name),
        help("Extension names use kebab-case: lowercase letters, digits and hyphens")
    )]
    InvalidExtensionName { name: String },

    #[error("Directory '{name}' already exists")]
    #[diagnostic(
        code(botforge::scaffold::project_exists),
        help("Pick a different extension name or remove the existing directory")
    )]
    ProjectExists { name: String },

    #[error("Template '{name}' is missing from this build")]
    #[diagnostic(code(botforge::scaffold::template_missing))]
    TemplateMissing { name: String },

    // Manifest errors
    #[error("Failed to parse manifest {path}: {reason}")]
    #[diagnostic(code(botforge::manifest::parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    #[error("Manifest not found: {path}")]
    #[diagnostic(code(botforge::manifest::not_found))]
    ManifestNotFound { path: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(botforge::fs::io_error))]
    IoError { message: String },
}

impl BotforgeError {
    /// Wrap an error with build-stage context (every stage boundary attaches
    /// which stage failed).
    pub fn build_stage(stage: &str, err: impl std::fmt::Display) -> Self {
        BotforgeError::BuildStageFailed {
            stage: stage.to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for BotforgeError {
    fn from(err: std::io::Error) -> Self {
        BotforgeError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for BotforgeError {
    fn from(err: serde_json::Error) -> Self {
        BotforgeError::ManifestParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for BotforgeError {
    fn from(err: reqwest::Error) -> Self {
        BotforgeError::DownloadFailed {
            url: err
                .url()
                .map(|u| u.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            reason: err.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for BotforgeError {
    fn from(err: zip::result::ZipError) -> Self {
        BotforgeError::ExtractionFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for BotforgeError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => BotforgeError::Cancelled,
            other => BotforgeError::IoError {
                message: other.to_string(),
            },
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, BotforgeError>;
