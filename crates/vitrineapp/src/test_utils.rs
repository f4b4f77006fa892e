use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::catalog::fs::FileCatalog;
use crate::config::CONFIG_FILE;
use crate::init::PROJECT_DIR;

/// A scratch working directory with a `.vitrine/` project folder.
pub struct TestEnv {
    // Keeps the directory alive for the duration of the test
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        fs::create_dir_all(root.join(PROJECT_DIR)).expect("failed to create project dir");
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(PROJECT_DIR).join("catalog.json")
    }

    /// Writes the default project catalog and returns a store reading it.
    pub fn write_catalog(&self, json: &str) -> FileCatalog {
        let path = self.catalog_path();
        fs::write(&path, json).expect("failed to write catalog");
        FileCatalog::new(path)
    }

    pub fn write_config(&self, toml: &str) {
        fs::write(self.root.join(PROJECT_DIR).join(CONFIG_FILE), toml)
            .expect("failed to write config");
    }
}
