//! Template parameters from a role's `meta/argument_specs.yaml`
//!
//! Only the `main` entry point is considered. Its `options` mapping lists the
//! inputs a template accepts.

use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::Path;

/// Entry point whose options describe the template inputs
pub const MAIN_ENTRY_POINT: &str = "main";

/// Ansible's implicit option type
const DEFAULT_TYPE: &str = "str";

/// One input accepted by a template role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateParameter {
    /// Option name
    pub name: String,
    /// Short label, if the option declares one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description; list-form descriptions are joined with spaces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the option must be supplied
    pub required: bool,
    /// Ansible type name (`str`, `int`, `bool`, ...)
    #[serde(rename = "type")]
    pub type_name: String,
    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Parse the `main` entry point options; `path` is only used in errors
pub fn parse_argument_specs(content: &str, path: &Path) -> CatalogResult<Vec<TemplateParameter>> {
    let root: Value = match serde_yaml::Deserializer::from_str(content).next() {
        Some(doc) => Value::deserialize(doc)
            .map_err(|e| CatalogError::invalid_argument_specs(path, e.to_string()))?,
        None => return Ok(Vec::new()),
    };

    let options = root
        .get("argument_specs")
        .and_then(|specs| specs.get(MAIN_ENTRY_POINT))
        .and_then(|main| main.get("options"));

    let Some(options) = options else {
        return Ok(Vec::new());
    };
    if options.is_null() {
        return Ok(Vec::new());
    }
    let Value::Mapping(options) = options else {
        return Err(CatalogError::invalid_argument_specs(
            path,
            "'options' must be a mapping",
        ));
    };

    let mut parameters = Vec::with_capacity(options.len());
    for (key, spec) in options {
        let name = key.as_str().ok_or_else(|| {
            CatalogError::invalid_argument_specs(path, "option names must be strings")
        })?;
        parameters.push(parameter_from_spec(name, spec, path)?);
    }
    parameters.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(parameters)
}

/// Read parameters from a file, or none if the file does not exist
pub fn read_argument_specs(path: &Path) -> CatalogResult<Vec<TemplateParameter>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::io_error(path, e))?;
    parse_argument_specs(&content, path)
}

fn parameter_from_spec(name: &str, spec: &Value, path: &Path) -> CatalogResult<TemplateParameter> {
    // bare `name:` is a plain optional string
    if spec.is_null() {
        return Ok(TemplateParameter {
            name: name.to_string(),
            title: None,
            description: None,
            required: false,
            type_name: DEFAULT_TYPE.to_string(),
            default: None,
        });
    }
    if !spec.is_mapping() {
        return Err(CatalogError::invalid_argument_specs(
            path,
            format!("option '{name}' must be a mapping"),
        ));
    }

    let required = match spec.get("required") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            return Err(CatalogError::invalid_argument_specs(
                path,
                format!("option '{name}': 'required' must be a boolean"),
            ))
        }
    };

    Ok(TemplateParameter {
        name: name.to_string(),
        title: spec.get("title").and_then(Value::as_str).map(str::to_string),
        description: spec.get("description").and_then(description_text),
        required,
        type_name: spec
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_TYPE)
            .to_string(),
        default: spec.get("default").filter(|v| !v.is_null()).cloned(),
    })
}

fn description_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Sequence(lines) => {
            let parts: Vec<&str> = lines.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        _ => None,
    }
}
