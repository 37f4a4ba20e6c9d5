//! Common test utilities for Botforge integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A throwaway host directory for integration tests
#[allow(dead_code)]
pub struct TestHost {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to host root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestHost {
    /// Create a new empty host directory
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Mark the host as a corebot host project
    pub fn with_host_config(self) -> Self {
        self.write_file("corebot.yml", "");
        self
    }

    /// Create an external plugin directory with a minimal manifest
    pub fn create_external_plugin(&self, name: &str) -> PathBuf {
        let plugin = self.path.join("external").join(name);
        std::fs::create_dir_all(&plugin).expect("Failed to create plugin directory");
        std::fs::write(plugin.join("package.json"), "{}").expect("Failed to write manifest");
        plugin
    }

    /// Write a file in the host directory
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the host directory
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the host directory
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }
}

impl Default for TestHost {
    fn default() -> Self {
        Self::new()
    }
}
