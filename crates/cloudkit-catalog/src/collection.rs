//! Ansible collection on disk
//!
//! A collection named `namespace.name` lives at
//! `<parent_path>/<namespace>/<name>`, with one directory per role under
//! `roles/`. A role is a template when it has `meta/cloudkit.yaml`.

use crate::config::{DEFAULT_ARGUMENT_SPECS_FILE, DEFAULT_METADATA_FILE};
use crate::error::{CatalogError, CatalogResult};
use crate::metadata::TemplateMetadata;
use crate::parameters::{read_argument_specs, TemplateParameter};
use crate::record::TemplateRecord;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Role metadata directory
const META_DIR: &str = "meta";

/// Roles directory inside a collection
const ROLES_DIR: &str = "roles";

/// A named collection rooted under a parent directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    parent_path: PathBuf,
    name: String,
    namespace_len: usize,
    metadata_file: String,
    argument_specs_file: String,
}

impl Collection {
    /// Create a collection handle; `name` must be `namespace.collection`
    pub fn new(parent_path: impl Into<PathBuf>, name: impl Into<String>) -> CatalogResult<Self> {
        let name = name.into();
        let namespace_len = validate_name(&name)?;
        Ok(Self {
            parent_path: parent_path.into(),
            name,
            namespace_len,
            metadata_file: DEFAULT_METADATA_FILE.to_string(),
            argument_specs_file: DEFAULT_ARGUMENT_SPECS_FILE.to_string(),
        })
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

    /// Fully qualified collection name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace part of the name
    #[inline]
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.name[..self.namespace_len]
    }

    /// Collection part of the name
    #[inline]
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.name[self.namespace_len + 1..]
    }

    /// Directory the collection was resolved under
    #[inline]
    #[must_use]
    pub fn parent_path(&self) -> &Path {
        &self.parent_path
    }

    /// Collection root directory
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.parent_path.join(self.namespace()).join(self.collection())
    }

    /// Roles directory
    #[must_use]
    pub fn roles_path(&self) -> PathBuf {
        self.path().join(ROLES_DIR)
    }

    /// Whether the collection root exists
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path().is_dir()
    }

    /// Every role directory, sorted by name
    pub fn role_paths(&self) -> CatalogResult<Vec<PathBuf>> {
        let roles = self.roles_path();
        if !roles.is_dir() {
            warn!(collection = %self.name, path = %roles.display(), "roles directory missing");
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&roles).map_err(|e| CatalogError::io_error(&roles, e))?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CatalogError::io_error(&roles, e))?;
            let path = entry.path();
            if path.is_dir() {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(paths)
    }

    /// Metadata file location for a role
    #[must_use]
    pub fn metadata_path(&self, role_path: &Path) -> PathBuf {
        role_path.join(META_DIR).join(&self.metadata_file)
    }

    /// Argument specs file location for a role
    #[must_use]
    pub fn argument_specs_path(&self, role_path: &Path) -> PathBuf {
        role_path.join(META_DIR).join(&self.argument_specs_file)
    }

    /// Read a role's metadata; `None` when the role has no metadata file
    pub fn read_metadata_for_role(&self, role_path: &Path) -> CatalogResult<Option<TemplateMetadata>> {
        let path = self.metadata_path(role_path);
        if !path.is_file() {
            debug!(role = %role_path.display(), "no template metadata");
            return Ok(None);
        }
        debug!(path = %path.display(), "reading template metadata");
        TemplateMetadata::from_file(&path).map(Some)
    }

    /// Read a role's parameters; empty when there are no argument specs
    pub fn read_parameters_for_role(&self, role_path: &Path) -> CatalogResult<Vec<TemplateParameter>> {
        read_argument_specs(&self.argument_specs_path(role_path))
    }

    /// Build the template record for a role, if it is a template
    pub fn template_for_role(&self, role_path: &Path) -> CatalogResult<Option<TemplateRecord>> {
        let Some(metadata) = self.read_metadata_for_role(role_path)? else {
            return Ok(None);
        };
        let parameters = self.read_parameters_for_role(role_path)?;
        let role_name = role_name(role_path);
        Ok(Some(TemplateRecord::new(
            &self.name,
            &role_name,
            metadata,
            parameters,
        )))
    }

    /// Records for every template role, in role-name order
    pub fn find_template_roles(&self) -> CatalogResult<Vec<TemplateRecord>> {
        let mut records = Vec::new();
        for role_path in self.role_paths()? {
            if let Some(record) = self.template_for_role(&role_path)? {
                records.push(record);
            }
        }
        debug!(collection = %self.name, count = records.len(), "template roles found");
        Ok(records)
    }
}

/// Final path component of a role directory
#[must_use]
pub fn role_name(role_path: &Path) -> String {
    role_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Check `namespace.collection` and return the namespace length
fn validate_name(name: &str) -> CatalogResult<usize> {
    let invalid = || CatalogError::InvalidCollectionName(name.to_string());
    let (namespace, collection) = name.split_once('.').ok_or_else(invalid)?;
    let part_ok = |part: &str| {
        !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    };
    if part_ok(namespace) && part_ok(collection) {
        Ok(namespace.len())
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn name_parts_and_paths() {
        let collection = Collection::new("collections/ansible_collections", "cloudkit.templates").unwrap();
        assert_eq!(collection.namespace(), "cloudkit");
        assert_eq!(collection.collection(), "templates");
        assert_eq!(
            collection.path(),
            PathBuf::from("collections/ansible_collections/cloudkit/templates")
        );
        assert_eq!(
            collection.roles_path(),
            PathBuf::from("collections/ansible_collections/cloudkit/templates/roles")
        );
        assert_eq!(
            collection.metadata_path(Path::new("r")),
            PathBuf::from("r/meta/cloudkit.yaml")
        );
    }

    #[test]
    fn custom_file_names() {
        let collection = Collection::new("p", "a.b")
            .unwrap()
            .with_metadata_file("x.yml")
            .with_argument_specs_file("y.yml");
        assert_eq!(collection.metadata_path(Path::new("r")), PathBuf::from("r/meta/x.yml"));
        assert_eq!(
            collection.argument_specs_path(Path::new("r")),
            PathBuf::from("r/meta/y.yml")
        );
    }

    #[test]
    fn rejects_bad_names() {
        for name in ["cloudkit", ".templates", "cloudkit.", "a.b.c", "a-b.c", ""] {
            assert!(
                matches!(Collection::new("p", name), Err(CatalogError::InvalidCollectionName(_))),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn missing_roles_dir_is_empty() {
        let collection = Collection::new("/nonexistent", "cloudkit.templates").unwrap();
        assert!(!collection.exists());
        assert!(collection.role_paths().unwrap().is_empty());
        assert!(collection.find_template_roles().unwrap().is_empty());
    }

    #[test]
    fn role_name_of_path() {
        assert_eq!(role_name(Path::new("roles/ocp_virt_vm")), "ocp_virt_vm");
    }

    proptest! {
        #[test]
        fn valid_names_split_back(ns in "[a-z_][a-z0-9_]{0,10}", coll in "[a-z_][a-z0-9_]{0,10}") {
            let collection = Collection::new("p", format!("{ns}.{coll}")).unwrap();
            prop_assert_eq!(collection.namespace(), ns.as_str());
            prop_assert_eq!(collection.collection(), coll.as_str());
        }
    }
}
