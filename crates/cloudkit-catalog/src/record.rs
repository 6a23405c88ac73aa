//! Template records returned by the filters

use crate::metadata::{NodeRequest, TemplateMetadata, TemplateType};
use crate::parameters::TemplateParameter;
use serde::{Deserialize, Serialize};

/// Catalog entry for one template role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    /// Fully qualified role name, `<namespace>.<collection>.<role>`
    pub id: String,
    /// Metadata title, falling back to the role name
    pub title: String,
    /// Metadata description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared type; absent when the metadata does not set one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_type: Option<TemplateType>,
    /// Inputs from the role's argument specs
    #[serde(default)]
    pub parameters: Vec<TemplateParameter>,
    /// Default node pools
    #[serde(default)]
    pub default_node_request: Vec<NodeRequest>,
}

impl TemplateRecord {
    /// Build a record for `role_name` inside `collection_name`
    #[must_use]
    pub fn new(
        collection_name: &str,
        role_name: &str,
        metadata: TemplateMetadata,
        parameters: Vec<TemplateParameter>,
    ) -> Self {
        Self {
            id: format!("{collection_name}.{role_name}"),
            title: metadata.title.unwrap_or_else(|| role_name.to_string()),
            description: metadata.description,
            template_type: metadata.template_type,
            parameters,
            default_node_request: metadata.default_node_request,
        }
    }

    /// Declared type, or cluster for untyped templates
    #[inline]
    #[must_use]
    pub fn effective_type(&self) -> TemplateType {
        self.template_type.unwrap_or(TemplateType::Cluster)
    }

    /// Whether this record matches a filter on `kind`
    #[inline]
    #[must_use]
    pub fn is(&self, kind: TemplateType) -> bool {
        self.effective_type() == kind
    }
}
