//! Template filters
//!
//! Each filter takes a list of collection names and returns the template
//! records of those collections, concatenated in input order.

use crate::error::CatalogResult;
use crate::locator::CollectionLocator;
use crate::metadata::TemplateType;
use crate::record::TemplateRecord;

/// All template records of the named collections
pub fn find_template_roles_filter<S: AsRef<str>>(
    locator: &CollectionLocator,
    collection_names: &[S],
) -> CatalogResult<Vec<TemplateRecord>> {
    let mut records = Vec::new();
    for name in collection_names {
        let collection = locator.locate(name.as_ref())?;
        records.extend(collection.find_template_roles()?);
    }
    Ok(records)
}

/// Template records of the given effective type
pub fn find_template_roles_of_type<S: AsRef<str>>(
    locator: &CollectionLocator,
    collection_names: &[S],
    kind: TemplateType,
) -> CatalogResult<Vec<TemplateRecord>> {
    let mut records = find_template_roles_filter(locator, collection_names)?;
    records.retain(|record| record.is(kind));
    Ok(records)
}

/// Cluster templates, including templates with no declared type
pub fn find_cluster_template_roles_filter<S: AsRef<str>>(
    locator: &CollectionLocator,
    collection_names: &[S],
) -> CatalogResult<Vec<TemplateRecord>> {
    find_template_roles_of_type(locator, collection_names, TemplateType::Cluster)
}

/// VM templates
pub fn find_vm_template_roles_filter<S: AsRef<str>>(
    locator: &CollectionLocator,
    collection_names: &[S],
) -> CatalogResult<Vec<TemplateRecord>> {
    find_template_roles_of_type(locator, collection_names, TemplateType::Vm)
}
