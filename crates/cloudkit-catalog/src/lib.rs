//! CloudKit template catalog
//!
//! Discovers template roles in the cloudkit Ansible collections and exposes
//! them as typed records.
//!
//! # Layout
//!
//! ```text
//! <search path>/<namespace>/<collection>/roles/<role>/meta/cloudkit.yaml
//!                                                      meta/argument_specs.yaml
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use cloudkit_catalog::prelude::*;
//!
//! # fn example() -> Result<(), CatalogError> {
//! let locator = CollectionLocator::new(CatalogConfig::from_env());
//! for template in find_vm_template_roles_filter(&locator, &["cloudkit.templates"])? {
//!     println!("{} ({})", template.id, template.title);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod collection;
pub mod config;
pub mod error;
pub mod filters;
pub mod locator;
pub mod metadata;
pub mod parameters;
pub mod record;

pub use collection::Collection;
pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use filters::{
    find_cluster_template_roles_filter, find_template_roles_filter, find_template_roles_of_type,
    find_vm_template_roles_filter,
};
pub use locator::CollectionLocator;
pub use metadata::{NodeRequest, TemplateMetadata, TemplateType};
pub use parameters::TemplateParameter;
pub use record::TemplateRecord;

/// Collection holding the cloudkit templates
pub const TEMPLATES_COLLECTION: &str = "cloudkit.templates";

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the catalog
    pub use crate::collection::Collection;
    pub use crate::config::CatalogConfig;
    pub use crate::error::{CatalogError, CatalogResult};
    pub use crate::filters::{
        find_cluster_template_roles_filter, find_template_roles_filter,
        find_vm_template_roles_filter,
    };
    pub use crate::locator::CollectionLocator;
    pub use crate::metadata::{TemplateMetadata, TemplateType};
    pub use crate::record::TemplateRecord;
    pub use crate::TEMPLATES_COLLECTION;
}
