//! Text reports for manual inspection of template roles
//!
//! Two reports:
//! - **filters**: every template, then cluster templates, then VM templates
//! - **metadata**: raw `cloudkit.yaml` files by path, then the catalog's view
//!   of every role in the collection
//!
//! Missing values and missing files never abort a report; they print
//! [`NOT_SET`], [`FILE_NOT_FOUND`] or [`NO_METADATA`] and move on.

use cloudkit_catalog::{
    find_cluster_template_roles_filter, find_template_roles_filter,
    find_vm_template_roles_filter, CatalogError, Collection, CollectionLocator, TemplateRecord,
    TemplateType,
};
use serde::Serialize;
use serde_yaml::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Printed for a value the metadata does not set
pub const NOT_SET: &str = "NOT SET";

/// Printed for a metadata path that does not exist
pub const FILE_NOT_FOUND: &str = "FILE NOT FOUND";

/// Printed for a role without metadata
pub const NO_METADATA: &str = "NO METADATA";

/// Metadata files inspected by default, relative to the checkout root
pub const DEFAULT_METADATA_FILES: [&str; 3] = [
    "collections/ansible_collections/cloudkit/templates/roles/ocp_4_17_small/meta/cloudkit.yaml",
    "collections/ansible_collections/cloudkit/templates/roles/ocp_4_17_small_github/meta/cloudkit.yaml",
    "collections/ansible_collections/cloudkit/templates/roles/ocp_virt_vm/meta/cloudkit.yaml",
];

/// Errors while producing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Catalog lookup or metadata parsing failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Writing the report failed
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failed
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for report operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Template records grouped the way the filters report prints them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterReport {
    /// Every template
    pub all: Vec<TemplateRecord>,
    /// Cluster templates, including untyped ones
    pub cluster: Vec<TemplateRecord>,
    /// VM templates
    pub vm: Vec<TemplateRecord>,
}

impl FilterReport {
    /// Run the three filters over the named collections
    pub fn collect<S: AsRef<str>>(
        locator: &CollectionLocator,
        collection_names: &[S],
    ) -> ReportResult<Self> {
        let all = find_template_roles_filter(locator, collection_names)?;
        let cluster = find_cluster_template_roles_filter(locator, collection_names)?;
        let vm = find_vm_template_roles_filter(locator, collection_names)?;
        debug!(all = all.len(), cluster = cluster.len(), vm = vm.len(), "filters evaluated");
        Ok(Self { all, cluster, vm })
    }

    /// Human-readable report
    pub fn write_text<W: Write>(&self, out: &mut W) -> ReportResult<()> {
        writeln!(out, "=== ALL TEMPLATES ===")?;
        for template in &self.all {
            writeln!(out, "ID: {}", template.id)?;
            writeln!(out, "Title: {}", template.title)?;
            writeln!(out, "Template Type: {}", display_type(template.template_type))?;
            writeln!(out, "---")?;
        }

        writeln!(out, "\n=== CLUSTER TEMPLATES ===")?;
        write_id_title(out, &self.cluster)?;

        writeln!(out, "\n=== VM TEMPLATES ===")?;
        write_id_title(out, &self.vm)?;
        Ok(())
    }

    /// Pretty-printed JSON object with `all`, `cluster` and `vm` arrays
    pub fn write_json<W: Write>(&self, out: &mut W) -> ReportResult<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

fn write_id_title<W: Write>(out: &mut W, templates: &[TemplateRecord]) -> ReportResult<()> {
    for template in templates {
        writeln!(out, "ID: {}", template.id)?;
        writeln!(out, "Title: {}", template.title)?;
        writeln!(out, "---")?;
    }
    Ok(())
}

fn display_type(template_type: Option<TemplateType>) -> &'static str {
    template_type.map_or(NOT_SET, TemplateType::as_str)
}

/// Print `template_type` and `title` straight from each metadata file.
///
/// Paths are printed as given. Missing files print [`FILE_NOT_FOUND`];
/// unparsable files abort the report.
pub fn write_metadata_files<W: Write>(
    out: &mut W,
    paths: &[(String, PathBuf)],
) -> ReportResult<()> {
    for (label, path) in paths {
        writeln!(out, "\n=== {label} ===")?;
        if !path.is_file() {
            writeln!(out, "{FILE_NOT_FOUND}")?;
            continue;
        }

        let raw = read_raw_metadata(path)?;
        writeln!(out, "template_type: {}", raw_field(&raw, "template_type"))?;
        writeln!(out, "title: {}", raw_field(&raw, "title"))?;
    }
    Ok(())
}

/// Print the catalog's metadata for every role directory in `collection`
pub fn write_collection_metadata<W: Write>(
    out: &mut W,
    collection: &Collection,
) -> ReportResult<()> {
    writeln!(out, "\n\n=== TESTING COLLECTION METADATA READING ===")?;
    for role_path in collection.role_paths()? {
        let name = cloudkit_catalog::collection::role_name(&role_path);
        writeln!(out, "\n--- {name} ---")?;
        match collection.read_metadata_for_role(&role_path)? {
            Some(metadata) => {
                writeln!(
                    out,
                    "metadata.template_type: {}",
                    display_type(metadata.template_type)
                )?;
                writeln!(
                    out,
                    "metadata.title: {}",
                    metadata.title.as_deref().unwrap_or(NOT_SET)
                )?;
            }
            None => writeln!(out, "{NO_METADATA}")?,
        }
    }
    Ok(())
}

/// Resolve metadata paths against a base directory, keeping the given text
/// as the label
#[must_use]
pub fn resolve_paths<S: AsRef<str>>(base: &Path, paths: &[S]) -> Vec<(String, PathBuf)> {
    paths
        .iter()
        .map(|p| (p.as_ref().to_string(), base.join(p.as_ref())))
        .collect()
}

fn read_raw_metadata(path: &Path) -> ReportResult<Value> {
    let content =
        std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;
    let Some(doc) = serde_yaml::Deserializer::from_str(&content).next() else {
        return Ok(Value::Null);
    };
    let value = <Value as serde::Deserialize>::deserialize(doc)
        .map_err(|e| CatalogError::invalid_metadata(path, e.to_string()))?;
    match value {
        document @ (Value::Null | Value::Mapping(_)) => Ok(document),
        _ => Err(CatalogError::invalid_metadata(path, "expected a mapping").into()),
    }
}

fn raw_field(document: &Value, key: &str) -> String {
    match document.get(key) {
        None | Some(Value::Null) => NOT_SET.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => serde_yaml::to_string(other)
            .map_or_else(|_| NOT_SET.to_string(), |s| s.trim_end().to_string()),
    }
}
