//! # Devfile Parsing
//!
//! Reads devfile text (YAML, or JSON, which is valid YAML) into a
//! [`DevfileV2`].
//!
//! ## Process
//!
//! 1.  **Decoding**: The text is decoded into a `serde_yaml::Value` tree.
//! 2.  **Version lookup**: The `schemaVersion` field is read from the tree and
//!     resolved against a [`SchemaRegistry`].
//! 3.  **Construction**: The tree is handed to [`DevfileV2::from_raw`], which
//!     resolves every union into its typed form.
//!
//! [`parse_file_and_validate`] additionally substitutes top-level variables
//! and runs the semantic checks of [`crate::validation`].

use crate::devfile::DevfileV2;
use crate::error::{Error, Result};
use crate::schema::SchemaRegistry;
use crate::validation;
use crate::variables::{self, VariableWarning};
use serde_yaml::Value;
use std::path::Path;

/// Parse devfile text with the default schema registry.
///
/// ```
/// use devfile::devfile::DevfileData;
/// use devfile::filter::DevfileOptions;
///
/// let doc = devfile::parser::parse(r#"
/// schemaVersion: 2.2.0
/// metadata:
///   name: go-app
/// components:
///   - name: runtime
///     container:
///       image: golang:1.21
/// "#).unwrap();
///
/// assert_eq!(doc.get_schema_version(), "2.2.0");
/// assert_eq!(doc.get_components(&DevfileOptions::all()).unwrap().len(), 1);
/// ```
pub fn parse(text: &str) -> Result<DevfileV2> {
    parse_with_registry(text, &SchemaRegistry::default())
}

/// Parse devfile text, resolving its schema version against `registry`.
pub fn parse_with_registry(text: &str, registry: &SchemaRegistry) -> Result<DevfileV2> {
    let tree: Value = serde_yaml::from_str(text)?;
    let version = schema_version(&tree)?;
    log::debug!("Parsing devfile with schema version {}", version);
    DevfileV2::from_raw(tree, &version, registry)
}

/// Read and parse a devfile from a local path.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<DevfileV2> {
    let path = path.as_ref();
    log::debug!("Reading devfile from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Parse a devfile, substitute its top-level variables and validate it.
///
/// Variable warnings do not fail the parse; they are returned alongside the
/// document.
pub fn parse_file_and_validate<P: AsRef<Path>>(path: P) -> Result<(DevfileV2, VariableWarning)> {
    let mut doc = parse_file(path)?;
    let warning = variables::validate_and_replace(&mut doc)?;
    validation::validate_devfile_data(&doc)?;
    Ok((doc, warning))
}

fn schema_version(tree: &Value) -> Result<String> {
    if !tree.is_mapping() {
        return Err(Error::ConfigParse {
            message: "a devfile must be a mapping at the top level".to_string(),
            hint: None,
        });
    }
    match tree.get("schemaVersion") {
        Some(Value::String(version)) => Ok(version.clone()),
        Some(other) => Err(Error::ConfigParse {
            message: format!("schemaVersion must be a string, found {:?}", other),
            hint: Some("quote the version, e.g. schemaVersion: \"2.2.0\"".to_string()),
        }),
        None => Err(Error::ConfigParse {
            message: "missing schemaVersion".to_string(),
            hint: Some("add `schemaVersion: 2.2.0` at the top of the devfile".to_string()),
        }),
    }
}
