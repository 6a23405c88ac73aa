//! Per-role template metadata (`meta/cloudkit.yaml`)
//!
//! Every field is optional in the file. A role without the file is not a
//! template at all; a role whose file is empty is a template with no
//! metadata set.

use crate::error::{CatalogError, CatalogResult};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Kind of resource a template provisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    /// OpenShift cluster
    Cluster,
    /// Virtual machine
    Vm,
}

impl TemplateType {
    /// Lowercase name as written in metadata files
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cluster => "cluster",
            Self::Vm => "vm",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized template type name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown template type: '{0}' (expected 'cluster' or 'vm')")]
pub struct ParseTemplateTypeError(pub String);

impl FromStr for TemplateType {
    type Err = ParseTemplateTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cluster" => Ok(Self::Cluster),
            "vm" => Ok(Self::Vm),
            _ => Err(ParseTemplateTypeError(s.to_string())),
        }
    }
}

/// Default node pool requested by a cluster template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRequest {
    /// Host resource class
    pub resource_class: String,
    /// Number of nodes of that class
    pub number_of_nodes: u32,
}

/// Contents of a role's `cloudkit.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateMetadata {
    /// Human-readable title; scalar values are kept as text
    #[serde(deserialize_with = "scalar_text")]
    pub title: Option<String>,
    /// Longer description; scalar values are kept as text
    #[serde(deserialize_with = "scalar_text")]
    pub description: Option<String>,
    /// Declared template type
    pub template_type: Option<TemplateType>,
    /// Default node pools
    pub default_node_request: Vec<NodeRequest>,
}

impl TemplateMetadata {
    /// Parse metadata from YAML text; `path` is only used in errors
    pub fn from_yaml_str(content: &str, path: &Path) -> CatalogResult<Self> {
        let first = serde_yaml::Deserializer::from_str(content).next();
        let Some(doc) = first else {
            return Ok(Self::default());
        };

        let value = Value::deserialize(doc)
            .map_err(|e| CatalogError::invalid_metadata(path, e.to_string()))?;

        match value {
            Value::Null => Ok(Self::default()),
            mapping @ Value::Mapping(_) => serde_yaml::from_value(mapping)
                .map_err(|e| CatalogError::invalid_metadata(path, e.to_string())),
            other => Err(CatalogError::invalid_metadata(
                path,
                format!("expected a mapping, found {}", value_kind(&other)),
            )),
        }
    }

    /// Read and parse a metadata file
    pub fn from_file(path: &Path) -> CatalogResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;
        Self::from_yaml_str(&content, path)
    }

    /// Template type, with untyped (legacy) templates treated as clusters
    #[inline]
    #[must_use]
    pub fn effective_type(&self) -> TemplateType {
        self.template_type.unwrap_or(TemplateType::Cluster)
    }
}

/// Read a YAML scalar as text (`title: 4.17` is the title "4.17")
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar, found {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(content: &str) -> CatalogResult<TemplateMetadata> {
        TemplateMetadata::from_yaml_str(content, Path::new("meta/cloudkit.yaml"))
    }

    #[test]
    fn full_metadata() {
        let metadata = parse(
            r#"
title: OpenShift 4.17 small
description: Three node cluster
template_type: cluster
default_node_request:
  - resourceClass: fc430
    numberOfNodes: 3
"#,
        )
        .unwrap();

        assert_eq!(metadata.title.as_deref(), Some("OpenShift 4.17 small"));
        assert_eq!(metadata.description.as_deref(), Some("Three node cluster"));
        assert_eq!(metadata.template_type, Some(TemplateType::Cluster));
        assert_eq!(
            metadata.default_node_request,
            vec![NodeRequest {
                resource_class: "fc430".to_string(),
                number_of_nodes: 3,
            }]
        );
    }

    #[test]
    fn missing_fields_are_none() {
        let metadata = parse("title: Only a title\n").unwrap();
        assert_eq!(metadata.title.as_deref(), Some("Only a title"));
        assert_eq!(metadata.template_type, None);
        assert_eq!(metadata.effective_type(), TemplateType::Cluster);
    }

    #[test]
    fn unknown_keys_ignored() {
        let metadata = parse("title: t\nextra: 1\n").unwrap();
        assert_eq!(metadata.title.as_deref(), Some("t"));
    }

    #[test]
    fn empty_and_null_documents() {
        assert_eq!(parse("").unwrap(), TemplateMetadata::default());
        assert_eq!(parse("# just a comment\n").unwrap(), TemplateMetadata::default());
        assert_eq!(parse("~\n").unwrap(), TemplateMetadata::default());
    }

    #[test]
    fn scalar_title_and_description_kept_as_text() {
        let metadata = parse("title: 4.17\ndescription: true\n").unwrap();
        assert_eq!(metadata.title.as_deref(), Some("4.17"));
        assert_eq!(metadata.description.as_deref(), Some("true"));

        let metadata = parse("title: 7\ndescription: ~\n").unwrap();
        assert_eq!(metadata.title.as_deref(), Some("7"));
        assert_eq!(metadata.description, None);
    }

    #[test]
    fn structured_title_is_error() {
        let err = parse("title: [a, b]\n").unwrap_err();
        assert!(err.to_string().contains("expected a scalar, found a sequence"));
    }

    #[test]
    fn vm_type() {
        let metadata = parse("template_type: vm\n").unwrap();
        assert_eq!(metadata.effective_type(), TemplateType::Vm);
    }

    #[test]
    fn unknown_type_is_error() {
        let err = parse("template_type: container\n").unwrap_err();
        assert!(err.is_content_error());
    }

    #[test]
    fn non_mapping_is_error() {
        let err = parse("- a\n- b\n").unwrap_err();
        assert!(err.to_string().contains("expected a mapping, found a sequence"));
    }

    #[test]
    fn malformed_yaml_is_error() {
        assert!(parse("title: [unterminated\n").is_err());
    }

    #[test]
    fn template_type_display() {
        assert_eq!(TemplateType::Cluster.to_string(), "cluster");
        assert_eq!(TemplateType::Vm.to_string(), "vm");
    }

    proptest! {
        #[test]
        fn template_type_parse_ignores_case(upper in proptest::collection::vec(any::<bool>(), 7)) {
            let word: String = "cluster"
                .chars()
                .zip(upper.iter())
                .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert_eq!(word.parse::<TemplateType>(), Ok(TemplateType::Cluster));
        }

        #[test]
        fn template_type_rejects_other_words(s in "[a-z]{1,12}") {
            prop_assume!(s != "cluster" && s != "vm");
            prop_assert!(s.parse::<TemplateType>().is_err());
        }
    }
}
