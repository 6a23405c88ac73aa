//! Catalog configuration
//!
//! Search paths follow Ansible's `ANSIBLE_COLLECTIONS_PATH` convention: each
//! entry may point either at an `ansible_collections` directory or at its
//! parent.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding collection search paths
pub const COLLECTIONS_PATH_ENV: &str = "ANSIBLE_COLLECTIONS_PATH";

/// Legacy plural spelling still honoured by Ansible
pub const LEGACY_COLLECTIONS_PATHS_ENV: &str = "ANSIBLE_COLLECTIONS_PATHS";

/// Default search path, relative to the working directory
pub const DEFAULT_COLLECTIONS_PATH: &str = "collections/ansible_collections";

/// Per-role metadata file under `meta/`
pub const DEFAULT_METADATA_FILE: &str = "cloudkit.yaml";

/// Per-role Ansible argument specs file under `meta/`
pub const DEFAULT_ARGUMENT_SPECS_FILE: &str = "argument_specs.yaml";

/// Configuration for collection lookup and metadata reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directories searched for `<namespace>/<collection>`, in order
    pub collections_paths: Vec<PathBuf>,
    /// Metadata file name inside each role's `meta/` directory
    pub metadata_file: String,
    /// Argument specs file name inside each role's `meta/` directory
    pub argument_specs_file: String,
}

impl CatalogConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with search paths taken from the environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`CatalogConfig::from_env`] with an injectable variable lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let raw = lookup(COLLECTIONS_PATH_ENV).or_else(|| lookup(LEGACY_COLLECTIONS_PATHS_ENV));
        if let Some(raw) = raw {
            let paths = expand_search_paths(&raw);
            if !paths.is_empty() {
                config.collections_paths = paths;
            }
        }
        config
    }

    /// Replace search paths
    #[inline]
    #[must_use]
    pub fn with_collections_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.collections_paths = paths;
        self
    }

    /// Append a search path
    #[inline]
    #[must_use]
    pub fn with_collections_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.collections_paths.push(path.into());
        self
    }

    /// With metadata file name
    #[inline]
    #[must_use]
    pub fn with_metadata_file(mut self, name: impl Into<String>) -> Self {
        self.metadata_file = name.into();
        self
    }

    /// With argument specs file name
    #[inline]
    #[must_use]
    pub fn with_argument_specs_file(mut self, name: impl Into<String>) -> Self {
        self.argument_specs_file = name.into();
        self
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            collections_paths: vec![PathBuf::from(DEFAULT_COLLECTIONS_PATH)],
            metadata_file: DEFAULT_METADATA_FILE.to_string(),
            argument_specs_file: DEFAULT_ARGUMENT_SPECS_FILE.to_string(),
        }
    }
}

/// Split a `:`-separated path list, adding the `ansible_collections` variant
/// of each entry right after it.
fn expand_search_paths(raw: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for entry in raw.split(':').map(str::trim).filter(|e| !e.is_empty()) {
        let base = PathBuf::from(entry);
        if base.ends_with("ansible_collections") {
            paths.push(base);
        } else {
            let nested = base.join("ansible_collections");
            paths.push(base);
            paths.push(nested);
        }
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = CatalogConfig::new();
        assert_eq!(
            config.collections_paths,
            vec![PathBuf::from("collections/ansible_collections")]
        );
        assert_eq!(config.metadata_file, "cloudkit.yaml");
        assert_eq!(config.argument_specs_file, "argument_specs.yaml");
    }

    #[test]
    fn env_replaces_default_paths() {
        let config = CatalogConfig::from_lookup(|key| {
            (key == COLLECTIONS_PATH_ENV).then(|| "/opt/a::/opt/b/ansible_collections".to_string())
        });
        assert_eq!(
            config.collections_paths,
            vec![
                PathBuf::from("/opt/a"),
                PathBuf::from("/opt/a/ansible_collections"),
                PathBuf::from("/opt/b/ansible_collections"),
            ]
        );
    }

    #[test]
    fn collections_dir_entry_not_nested_again() {
        assert_eq!(
            expand_search_paths("/usr/share/ansible/collections/ansible_collections"),
            vec![PathBuf::from("/usr/share/ansible/collections/ansible_collections")]
        );
    }

    #[test]
    fn legacy_env_used_as_fallback() {
        let config = CatalogConfig::from_lookup(|key| {
            (key == LEGACY_COLLECTIONS_PATHS_ENV).then(|| "/legacy".to_string())
        });
        assert_eq!(config.collections_paths[0], PathBuf::from("/legacy"));
    }

    #[test]
    fn blank_env_keeps_default() {
        let config = CatalogConfig::from_lookup(|_| Some(" : ".to_string()));
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn builders() {
        let config = CatalogConfig::new()
            .with_collections_paths(vec![])
            .with_collections_path("/x")
            .with_metadata_file("meta.yml")
            .with_argument_specs_file("specs.yml");
        assert_eq!(config.collections_paths, vec![PathBuf::from("/x")]);
        assert_eq!(config.metadata_file, "meta.yml");
        assert_eq!(config.argument_specs_file, "specs.yml");
    }
}
