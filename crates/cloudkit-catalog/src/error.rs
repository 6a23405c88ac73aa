//! Error types for the template catalog
//!
//! Covers:
//! - Collection naming and lookup
//! - Filesystem access while scanning roles
//! - Malformed `cloudkit.yaml` and `argument_specs.yaml` files

use std::path::PathBuf;

/// Errors raised while locating collections or reading role metadata
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Collection name is not `namespace.collection`
    #[error("invalid collection name: '{0}' (expected 'namespace.collection')")]
    InvalidCollectionName(String),

    /// No search path contains the collection
    #[error("collection '{name}' not found in {} search path(s)", .searched.len())]
    CollectionNotFound {
        /// Requested collection name
        name: String,
        /// Paths that were searched, in order
        searched: Vec<PathBuf>,
    },

    /// IO error while reading the collection tree
    #[error("io error reading {path}: {source}")]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// `cloudkit.yaml` could not be parsed
    #[error("invalid metadata in {path}: {message}")]
    InvalidMetadata {
        /// Metadata file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// `argument_specs.yaml` could not be parsed
    #[error("invalid argument specs in {path}: {message}")]
    InvalidArgumentSpecs {
        /// Argument specs file
        path: PathBuf,
        /// Parser message
        message: String,
    },
}

impl CatalogError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create metadata error for path
    pub fn invalid_metadata(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidMetadata {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create argument specs error for path
    pub fn invalid_argument_specs(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidArgumentSpecs {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the error comes from file contents rather than the filesystem
    #[inline]
    #[must_use]
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMetadata { .. } | Self::InvalidArgumentSpecs { .. }
        )
    }
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_name_display() {
        let err = CatalogError::InvalidCollectionName("cloudkit".to_string());
        assert_eq!(
            err.to_string(),
            "invalid collection name: 'cloudkit' (expected 'namespace.collection')"
        );
    }

    #[test]
    fn not_found_display_counts_paths() {
        let err = CatalogError::CollectionNotFound {
            name: "cloudkit.templates".to_string(),
            searched: vec![PathBuf::from("a"), PathBuf::from("b")],
        };
        assert_eq!(
            err.to_string(),
            "collection 'cloudkit.templates' not found in 2 search path(s)"
        );
    }

    #[test]
    fn content_errors_are_classified() {
        let err = CatalogError::invalid_metadata("meta/cloudkit.yaml", "bad");
        assert!(err.is_content_error());
        assert!(err.to_string().contains("meta/cloudkit.yaml"));

        let io = CatalogError::io_error(
            "roles",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!io.is_content_error());
    }
}
