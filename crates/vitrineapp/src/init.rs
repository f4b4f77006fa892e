//! # Context Wiring
//!
//! [`initialize`] turns a working directory and optional overrides into a ready
//! [`VitrineContext`]: merged configuration plus an API over the catalog file.
//!
//! ## Directories
//!
//! - **Project**: `<cwd>/.vitrine/`, holding an optional `vitrine.toml` and the
//!   default `catalog.json`.
//! - **Global**: the OS config directory (via the `directories` crate), or
//!   `VITRINE_CONFIG_DIR` when set. Only `vitrine.toml` is read from here.
//!
//! Project configuration overrides global configuration key by key. A missing
//! or unreadable configuration falls back to the compiled defaults.

use std::path::{Path, PathBuf};

use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;

use crate::api::VitrineApi;
use crate::catalog::fs::FileCatalog;
use crate::config::{VitrineConfig, CONFIG_FILE};

pub const PROJECT_DIR: &str = ".vitrine";

pub struct VitrineContext {
    pub api: VitrineApi<FileCatalog>,
    pub config: VitrineConfig,
    pub catalog_path: PathBuf,
}

fn global_config_dir() -> Option<PathBuf> {
    std::env::var("VITRINE_CONFIG_DIR")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            ProjectDirs::from("com", "vitrine", "vitrine")
                .map(|dirs| dirs.config_dir().to_path_buf())
        })
}

pub fn load_config(search_dirs: Vec<PathBuf>) -> VitrineConfig {
    Clapfig::builder::<VitrineConfig>()
        .app_name("vitrine")
        .file_name(CONFIG_FILE)
        .search_paths(search_dirs.into_iter().map(SearchPath::Path).collect())
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load configuration, using defaults");
            VitrineConfig::default()
        })
}

/// Builds the context for `cwd`.
///
/// `catalog_override` wins over the configured catalog path; relative paths
/// resolve against `cwd`.
pub fn initialize(cwd: &Path, catalog_override: Option<PathBuf>) -> VitrineContext {
    let project_dir = cwd.join(PROJECT_DIR);

    let mut search_dirs: Vec<PathBuf> = global_config_dir().into_iter().collect();
    search_dirs.push(project_dir.clone());
    let config = load_config(search_dirs);

    let catalog_path = config.catalog_path(cwd, &project_dir, catalog_override);
    tracing::debug!(catalog = %catalog_path.display(), "context initialized");

    VitrineContext {
        api: VitrineApi::new(FileCatalog::new(&catalog_path)),
        config,
        catalog_path,
    }
}
