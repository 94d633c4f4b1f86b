//! # Devfile Library
//!
//! This library provides an in-memory model of a devfile: a declarative
//! description of a development environment made of components (containers,
//! volumes, Kubernetes resources), commands, projects, starter projects,
//! lifecycle events and top-level variables. It is designed to be used by
//! the `devfile` command-line tool but can also be embedded by any tool that
//! needs to read, query or rewrite devfiles.
//!
//! ## Quick Example
//!
//! ```
//! use devfile::devfile::DevfileData;
//! use devfile::filter::DevfileOptions;
//! use devfile::model::VolumeMount;
//!
//! let mut doc = devfile::parser::parse(r#"
//! schemaVersion: 2.2.0
//! components:
//!   - name: runtime
//!     container:
//!       image: node:18
//!   - name: cache
//!     volume:
//!       size: 1Gi
//! "#).unwrap();
//!
//! doc.add_volume_mounts("runtime", vec![VolumeMount::new("cache", "")]).unwrap();
//! assert_eq!(doc.get_volume_mount_paths("cache", "runtime").unwrap(), vec!["/cache"]);
//!
//! let volumes = doc.get_devfile_volume_components(&DevfileOptions::all()).unwrap();
//! assert_eq!(volumes.len(), 1);
//! ```
//!
//! ## Core Concepts
//!
//! - **Model (`model`)**: Typed entities. Component kinds, command kinds and
//!   project sources are closed enums.
//! - **Raw form (`raw`)**: The on-disk shape, where every union is a set of
//!   optional members. `variant` resolves a raw union to its single member.
//! - **Document (`devfile`)**: `DevfileV2` and the `DevfileData` trait, the
//!   query and mutation surface. Writes enforce uniqueness and volume mount
//!   path constraints; top-level variables and attributes are gated by the
//!   schema version (`schema`).
//! - **Filtering (`filter`)**: `DevfileOptions` narrows list queries by
//!   attributes and by union member.
//! - **Parsing and writing (`parser`, `writer`)**: YAML or JSON in and out.
//! - **Checks (`validation`, `variables`)**: Cross-reference validation and
//!   `{{variable}}` substitution.

pub mod defaults;
pub mod devfile;
pub mod error;
pub mod filter;
pub mod model;
pub mod output;
pub mod parser;
pub mod raw;
pub mod schema;
pub mod suggestions;
pub mod validation;
pub mod variables;
pub mod variant;
pub mod writer;

#[cfg(test)]
mod filter_proptest;
