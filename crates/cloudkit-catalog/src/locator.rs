//! Collection lookup across configured search paths

use crate::collection::Collection;
use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use std::path::PathBuf;
use tracing::{debug, info};

/// Resolves collection names to directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionLocator {
    config: CatalogConfig,
}

impl CollectionLocator {
    /// Create a locator from configuration
    #[inline]
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    /// Search paths, in lookup order
    #[inline]
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.config.collections_paths
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Collection handle under `parent_path`, using the configured file names
    pub fn collection_at(&self, parent_path: impl Into<PathBuf>, name: &str) -> CatalogResult<Collection> {
        Ok(Collection::new(parent_path, name)?
            .with_metadata_file(self.config.metadata_file.clone())
            .with_argument_specs_file(self.config.argument_specs_file.clone()))
    }

    /// First search path that contains the collection
    pub fn locate(&self, name: &str) -> CatalogResult<Collection> {
        for parent in self.search_paths() {
            let collection = self.collection_at(parent.clone(), name)?;
            if collection.exists() {
                info!(collection = name, path = %collection.path().display(), "collection located");
                return Ok(collection);
            }
            debug!(collection = name, parent = %parent.display(), "collection not under search path");
        }
        Err(CatalogError::CollectionNotFound {
            name: name.to_string(),
            searched: self.search_paths().to_vec(),
        })
    }
}

impl Default for CollectionLocator {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_name_reported_before_lookup() {
        let locator = CollectionLocator::default();
        assert!(matches!(
            locator.locate("nodot"),
            Err(CatalogError::InvalidCollectionName(_))
        ));
    }

    #[test]
    fn not_found_lists_search_paths() {
        let config = CatalogConfig::new().with_collections_paths(vec![
            PathBuf::from("/nonexistent/a"),
            PathBuf::from("/nonexistent/b"),
        ]);
        let locator = CollectionLocator::new(config);
        match locator.locate("cloudkit.templates") {
            Err(CatalogError::CollectionNotFound { name, searched }) => {
                assert_eq!(name, "cloudkit.templates");
                assert_eq!(searched.len(), 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn collection_at_applies_file_names() {
        let locator = CollectionLocator::new(CatalogConfig::new().with_metadata_file("other.yaml"));
        let collection = locator.collection_at("p", "a.b").unwrap();
        assert!(collection
            .metadata_path(std::path::Path::new("r"))
            .ends_with("meta/other.yaml"));
    }
}
