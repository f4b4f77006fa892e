use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use once_cell::unsync::OnceCell;

use super::document::{parse_document, CatalogDocument};
use super::{Catalog, CatalogStore};
use crate::error::{Result, VitrineError};
use crate::filters::FilterOptions;

/// Catalog backed by a JSON document on disk.
///
/// The document is read and parsed at most once per store; both products and
/// options come from the same parse.
pub struct FileCatalog {
    path: PathBuf,
    loaded: OnceCell<(Catalog, Option<FilterOptions>)>,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<&(Catalog, Option<FilterOptions>)> {
        self.loaded.get_or_try_init(|| {
            let raw = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
                ErrorKind::NotFound => VitrineError::Catalog(format!(
                    "Catalog file not found: {}",
                    self.path.display()
                )),
                _ => VitrineError::Io(e),
            })?;
            let CatalogDocument {
                products,
                filter_options,
            } = parse_document(&raw)?;
            tracing::info!(
                path = %self.path.display(),
                products = products.len(),
                "catalog loaded"
            );
            Ok((Catalog::new(products), filter_options))
        })
    }
}

impl CatalogStore for FileCatalog {
    fn load_catalog(&self) -> Result<Catalog> {
        self.load().map(|(catalog, _)| catalog.clone())
    }

    fn filter_options(&self) -> Result<FilterOptions> {
        self.load()
            .map(|(_, options)| options.clone().unwrap_or_default())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_reads_bare_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"[{"id": 1, "name": "Solitaire", "price": 45000, "material": "Platinum"}]"#,
        )
        .unwrap();

        let store = FileCatalog::new(&path);
        let catalog = store.load_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.products()[0].price, Some(45_000.0));
        assert_eq!(store.filter_options().unwrap(), FilterOptions::default());
    }

    #[test]
    fn test_document_options_override_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"{"products": [], "filterOptions": {"materials": ["Silver"], "subcategories": ["Anklets"]}}"#,
        )
        .unwrap();

        let options = FileCatalog::new(&path).filter_options().unwrap();
        assert_eq!(options.materials, vec!["Silver"]);
        assert_eq!(options.subcategories, vec!["Anklets"]);
        assert!(options.price_brackets.is_empty());
    }

    #[test]
    fn test_loads_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"[{"id": "a", "name": "A"}]"#).unwrap();

        let store = FileCatalog::new(&path);
        let first = store.load_catalog().unwrap();
        fs::remove_file(&path).unwrap();
        let second = store.load_catalog().unwrap();
        assert!(first.same_as(&second));
    }

    #[test]
    fn test_missing_file_is_catalog_error() {
        let dir = tempdir().unwrap();
        let store = FileCatalog::new(dir.path().join("missing.json"));
        match store.load_catalog() {
            Err(VitrineError::Catalog(msg)) => assert!(msg.contains("missing.json")),
            other => panic!("Expected Catalog error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_file_is_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileCatalog::new(&path).load_catalog(),
            Err(VitrineError::Serialization(_))
        ));
    }
}
