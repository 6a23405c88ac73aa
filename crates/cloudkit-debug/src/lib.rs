//! CloudKit debug reports
//!
//! Inspection tooling for the template catalog. Runs from a checkout of the
//! automation repository and prints what the catalog sees:
//!
//! - `filters`: template records from the all/cluster/vm filters
//! - `metadata`: raw metadata files, then metadata read through the catalog

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod logging;
pub mod report;

pub use report::{FilterReport, ReportError, ReportResult};

use cloudkit_catalog::config::DEFAULT_COLLECTIONS_PATH;
use cloudkit_catalog::{
    CatalogConfig, CatalogError, Collection, CollectionLocator, TEMPLATES_COLLECTION,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

/// Options shared by both reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugOptions {
    /// Catalog configuration (search paths, file names)
    pub catalog: CatalogConfig,
    /// Collection to inspect
    pub collection: String,
    /// Base directory for relative metadata file paths
    pub base_dir: PathBuf,
    /// Metadata files for the raw part of the metadata report
    pub metadata_files: Vec<String>,
    /// Emit JSON from the filters report
    pub json: bool,
}

impl DebugOptions {
    /// Defaults with search paths from the environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            catalog: CatalogConfig::from_env(),
            ..Self::default()
        }
    }

    /// With collection name
    #[inline]
    #[must_use]
    pub fn with_collection(mut self, name: impl Into<String>) -> Self {
        self.collection = name.into();
        self
    }

    /// With base directory for metadata paths
    #[inline]
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    fn locator(&self) -> CollectionLocator {
        CollectionLocator::new(self.catalog.clone())
    }
}

impl Default for DebugOptions {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            collection: TEMPLATES_COLLECTION.to_string(),
            base_dir: PathBuf::from("."),
            metadata_files: report::DEFAULT_METADATA_FILES
                .iter()
                .map(ToString::to_string)
                .collect(),
            json: false,
        }
    }
}

/// Filters report for the configured collection
pub fn run_filters<W: Write>(options: &DebugOptions, out: &mut W) -> ReportResult<()> {
    let report = FilterReport::collect(&options.locator(), &[options.collection.as_str()])?;
    if options.json {
        report.write_json(out)
    } else {
        report.write_text(out)
    }
}

/// Metadata report: raw files first, then the collection's roles
pub fn run_metadata<W: Write>(options: &DebugOptions, out: &mut W) -> ReportResult<()> {
    let paths = report::resolve_paths(&options.base_dir, &options.metadata_files);
    report::write_metadata_files(out, &paths)?;

    let collection = metadata_collection(&options.locator(), &options.collection)?;
    report::write_collection_metadata(out, &collection)
}

/// Located collection, or the expected location under the first search path
/// when it is missing (the report then lists no roles)
fn metadata_collection(locator: &CollectionLocator, name: &str) -> ReportResult<Collection> {
    match locator.locate(name) {
        Ok(collection) => Ok(collection),
        Err(CatalogError::CollectionNotFound { .. }) => {
            let parent = locator
                .search_paths()
                .first()
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_COLLECTIONS_PATH));
            warn!(collection = name, parent = %parent.display(), "collection not found");
            Ok(locator.collection_at(parent, name)?)
        }
        Err(err) => Err(err.into()),
    }
}
