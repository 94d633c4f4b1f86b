//! Top-level attributes and variables, available from schema 2.1.0 on

use super::DevfileV2;
use crate::error::{Error, Result};
use crate::model::{Attributes, Variables};

fn unsupported(doc: &DevfileV2, feature: &str) -> Error {
    Error::UnsupportedBySchemaVersion {
        feature: feature.to_string(),
        version: doc.schema_version.clone(),
    }
}

pub(super) fn attributes(doc: &DevfileV2) -> Result<&Attributes> {
    if !doc.level.supports_top_level_attributes() {
        return Err(unsupported(doc, "top-level attributes"));
    }
    Ok(&doc.content.attributes)
}

pub(super) fn variables(doc: &DevfileV2) -> Result<&Variables> {
    if !doc.level.supports_top_level_variables() {
        return Err(unsupported(doc, "top-level variables"));
    }
    Ok(&doc.content.variables)
}

/// Merge `variables` into the document, overwriting existing keys.
pub(super) fn update_variables(doc: &mut DevfileV2, variables: Variables) -> Result<()> {
    if !doc.level.supports_top_level_variables() {
        return Err(unsupported(doc, "top-level variables"));
    }
    doc.content.variables.extend(variables);
    Ok(())
}
