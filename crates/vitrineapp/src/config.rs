//! # Configuration
//!
//! Vitrine configuration is managed by [`clapfig`], which handles layered loading
//! from TOML files, environment variables, and programmatic overrides.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `VITRINE__PER_PAGE`, `VITRINE__DEFAULT_SORT`, etc.
//! 2. **Project Config**: `.vitrine/vitrine.toml` in the working directory.
//! 3. **Global Config**: OS-appropriate config directory (via `directories` crate).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `per_page` | `12` | Products per page for `browse` and `search` |
//! | `default_sort` | `best-matches` | Sort key used when none is given |
//! | `currency_symbol` | `₹` | Prefix for rendered prices |
//! | `catalog` | unset | Path to the catalog JSON document |

use std::path::{Path, PathBuf};

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::filters::SortKey;

pub const CONFIG_FILE: &str = "vitrine.toml";
pub const DEFAULT_CATALOG_FILE: &str = "catalog.json";

/// Configuration for vitrine, stored in `vitrine.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VitrineConfig {
    /// Products per page
    #[config(default = 12)]
    pub per_page: usize,

    /// Sort key used when none is given (e.g. "price-low-high")
    #[config(default = "best-matches")]
    pub default_sort: String,

    /// Prefix for rendered prices
    #[config(default = "₹")]
    pub currency_symbol: String,

    /// Catalog document. Relative paths resolve against the working directory.
    pub catalog: Option<PathBuf>,
}

impl Default for VitrineConfig {
    fn default() -> Self {
        Self {
            per_page: 12,
            default_sort: "best-matches".to_string(),
            currency_symbol: "₹".to_string(),
            catalog: None,
        }
    }
}

impl VitrineConfig {
    pub fn per_page(&self) -> usize {
        self.per_page.max(1)
    }

    pub fn sort_key(&self) -> SortKey {
        SortKey::from(self.default_sort.as_str())
    }

    /// Catalog path: explicit override, then the configured path, then
    /// `<project_dir>/catalog.json`.
    pub fn catalog_path(
        &self,
        cwd: &Path,
        project_dir: &Path,
        explicit: Option<PathBuf>,
    ) -> PathBuf {
        let chosen = explicit.or_else(|| self.catalog.clone());
        match chosen {
            Some(path) if path.is_absolute() => path,
            Some(path) => cwd.join(path),
            None => project_dir.join(DEFAULT_CATALOG_FILE),
        }
    }
}
