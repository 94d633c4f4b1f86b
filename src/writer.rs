//! Serializing a document back to YAML or JSON

use crate::devfile::DevfileV2;
use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Render the document as YAML.
pub fn to_yaml_string(doc: &DevfileV2) -> Result<String> {
    Ok(serde_yaml::to_string(&doc.to_raw())?)
}

/// Render the document as pretty-printed JSON.
pub fn to_json_string(doc: &DevfileV2) -> Result<String> {
    Ok(serde_json::to_string_pretty(&doc.to_raw())?)
}

pub fn write_yaml<P: AsRef<Path>>(doc: &DevfileV2, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_yaml_string(doc)?).map_err(Error::Io)?;
    debug!("wrote YAML devfile to {}", path.display());
    Ok(())
}

pub fn write_json<P: AsRef<Path>>(doc: &DevfileV2, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_json_string(doc)?).map_err(Error::Io)?;
    debug!("wrote JSON devfile to {}", path.display());
    Ok(())
}
