//! Testing utilities for the cloudkit-templates workspace
//!
//! Lays out throwaway collection trees in a temporary directory, mirroring a
//! checkout of the automation repository:
//!
//! ```text
//! <root>/collections/ansible_collections/<namespace>/<collection>/roles/<role>/meta/...
//! ```

#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TEMPLATES: &str = "cloudkit.templates";

pub const SMALL_CLUSTER_METADATA: &str = "\
title: OpenShift 4.17 Small
description: Three node compact cluster
template_type: cluster
default_node_request:
  - resourceClass: fc430
    numberOfNodes: 3
";

pub const GITHUB_CLUSTER_METADATA: &str = "\
title: OpenShift 4.17 Small (GitHub auth)
description: Compact cluster with GitHub identity provider
";

pub const VM_METADATA: &str = "\
title: OpenShift Virtualization VM
template_type: vm
";

pub const SMALL_CLUSTER_ARGUMENT_SPECS: &str = "\
argument_specs:
  main:
    short_description: Small OpenShift cluster
    options:
      pull_secret:
        type: str
        required: true
        description: Pull secret for the release image
      node_count:
        type: int
        default: 3
";

/// Temporary checkout holding one or more collections
#[derive(Debug)]
pub struct CollectionFixture {
    dir: TempDir,
}

impl CollectionFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        fs::create_dir_all(dir.path().join("collections/ansible_collections"))
            .expect("create collections dir");
        Self { dir }
    }

    /// Checkout root, the working directory the debug scripts assume
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// The `ansible_collections` directory
    pub fn parent_path(&self) -> PathBuf {
        self.root().join("collections/ansible_collections")
    }

    pub fn collection_path(&self, collection: &str) -> PathBuf {
        let (namespace, name) = collection.split_once('.').expect("namespace.collection");
        self.parent_path().join(namespace).join(name)
    }

    pub fn role_path(&self, collection: &str, role: &str) -> PathBuf {
        self.collection_path(collection).join("roles").join(role)
    }

    /// Role directory with no metadata
    pub fn add_role(&self, collection: &str, role: &str) -> PathBuf {
        let path = self.role_path(collection, role);
        fs::create_dir_all(path.join("tasks")).expect("create role dir");
        fs::write(path.join("tasks/main.yml"), "---\n").expect("write tasks");
        path
    }

    /// Role directory with `meta/cloudkit.yaml`
    pub fn add_template(&self, collection: &str, role: &str, metadata: &str) -> PathBuf {
        let path = self.add_role(collection, role);
        write_file(&path.join("meta/cloudkit.yaml"), metadata);
        path
    }

    pub fn add_argument_specs(&self, collection: &str, role: &str, specs: &str) {
        let path = self.role_path(collection, role).join("meta/argument_specs.yaml");
        write_file(&path, specs);
    }

    /// Write a file relative to the checkout root
    pub fn add_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        write_file(&path, content);
        path
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, content).expect("write fixture file");
}

impl Default for CollectionFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The cloudkit.templates collection as the debug tools expect it:
/// a typed cluster, an untyped cluster, a VM, and a role without metadata.
pub fn cloudkit_templates() -> CollectionFixture {
    let fixture = CollectionFixture::new();
    fixture.add_template(TEMPLATES, "ocp_4_17_small", SMALL_CLUSTER_METADATA);
    fixture.add_argument_specs(TEMPLATES, "ocp_4_17_small", SMALL_CLUSTER_ARGUMENT_SPECS);
    fixture.add_template(TEMPLATES, "ocp_4_17_small_github", GITHUB_CLUSTER_METADATA);
    fixture.add_template(TEMPLATES, "ocp_virt_vm", VM_METADATA);
    fixture.add_role(TEMPLATES, "common");
    fixture.add_file(
        "collections/ansible_collections/cloudkit/templates/roles/README.md",
        "not a role\n",
    );
    fixture
}
