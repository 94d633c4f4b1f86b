//! # Schema Versions
//!
//! A devfile declares its `schemaVersion` as a plain string. The crate maps
//! that string onto a [`SchemaLevel`], which decides the features available
//! to the document. The mapping is an explicit [`SchemaRegistry`] value that
//! callers pass to the constructors. There is no global registry.
//!
//! Registered versions are matched literally. Any other well-formed semantic
//! version at or above the oldest registered one resolves to
//! [`SchemaLevel::Extended`], so `"2.2.1"` loads while `"2.1"`, `"v2.1.0"` and
//! `"1.0.0"` do not. Only the literal `"2.0.0"` is [`SchemaLevel::Base`].

use crate::error::{Error, Result};
use log::debug;
use semver::Version;
use std::collections::BTreeMap;

/// Capability class of a schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SchemaLevel {
    /// The first 2.x schema, without top-level variables or attributes.
    Base,
    /// Schemas that add top-level variables and attributes.
    Extended,
}

impl SchemaLevel {
    pub fn supports_top_level_variables(&self) -> bool {
        matches!(self, SchemaLevel::Extended)
    }

    pub fn supports_top_level_attributes(&self) -> bool {
        matches!(self, SchemaLevel::Extended)
    }
}

/// Maps exact schema version strings to their level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRegistry {
    levels: BTreeMap<String, SchemaLevel>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("2.0.0", SchemaLevel::Base);
        registry.register("2.1.0", SchemaLevel::Extended);
        registry.register("2.2.0", SchemaLevel::Extended);
        registry
    }
}

impl SchemaRegistry {
    /// A registry with no versions at all.
    pub fn empty() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Register (or re-register) a version.
    pub fn register(&mut self, version: impl Into<String>, level: SchemaLevel) -> &mut Self {
        self.levels.insert(version.into(), level);
        self
    }

    /// Look up the level of `version`.
    pub fn resolve(&self, version: &str) -> Result<SchemaLevel> {
        if let Some(level) = self.levels.get(version) {
            return Ok(*level);
        }

        let Ok(parsed) = Version::parse(version) else {
            return Err(unsupported(
                version,
                format!(
                    "'{}' is not a valid semantic version; use a full version such as '2.2.0'",
                    version
                ),
            ));
        };
        if let Some((oldest, name)) = self.parsed().min_by(|a, b| a.0.cmp(&b.0)) {
            if parsed < oldest {
                return Err(unsupported(
                    version,
                    format!(
                        "Schema versions older than {} are not supported (registered: {})",
                        name,
                        self.versions().join(", ")
                    ),
                ));
            }
        }

        debug!("Schema version {} is not registered, treating it as extended", version);
        Ok(SchemaLevel::Extended)
    }

    /// Registered versions in ascending order.
    pub fn versions(&self) -> Vec<&str> {
        self.levels.keys().map(String::as_str).collect()
    }

    /// The highest registered version, compared as semver.
    pub fn latest(&self) -> Option<&str> {
        self.parsed()
            .max_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, v)| v)
    }

    fn parsed(&self) -> impl Iterator<Item = (Version, &str)> {
        self.levels
            .keys()
            .filter_map(|v| Version::parse(v).ok().map(|parsed| (parsed, v.as_str())))
    }
}

fn unsupported(version: &str, hint: String) -> Error {
    Error::UnsupportedSchemaVersion {
        version: version.to_string(),
        hint: Some(hint),
    }
}
