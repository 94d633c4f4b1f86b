//! # Error Handling
//!
//! This module defines the centralized error type for the `devfile` crate. It
//! uses the `thiserror` library to create an `Error` enum that covers every
//! failure mode of the document model, along with the ambient failures of the
//! parser, writer and validator.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant carries the entity name and the
//!   collection ("field") it belongs to where that makes sense, so that
//!   callers can match on the kind and still print a useful message.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The document model groups its errors as follows:
//!
//! - Uniqueness violations (`AlreadyExists`, `FieldAlreadyExists`).
//! - Missing keys on delete and lookup (`NotFound`, `NotMounted`).
//! - Malformed unions (`UnknownVariant`, `MultipleVariants`,
//!   `InvalidSourceType`).
//! - Git remote resolution (`AmbiguousRemote`, `RemoteNotFound`, `NoRemotes`).
//! - Volume mount path collisions (`PathConflict`).
//! - Schema gating (`UnsupportedBySchemaVersion`, `UnsupportedSchemaVersion`).
//!
//! None of these are retried inside the crate.

use thiserror::Error;

/// Main error type for devfile operations
#[derive(Error, Debug)]
pub enum Error {
    /// An entity with the same key already exists in its collection.
    #[error("{field} {name} already exists in devfile")]
    AlreadyExists { name: String, field: String },

    /// A single-valued field (such as an event slot) is already populated.
    #[error("{field} already exists in devfile")]
    FieldAlreadyExists { field: String },

    /// The requested entity does not exist.
    #[error("{field} {name} is not found in the devfile")]
    NotFound { name: String, field: String },

    /// A union has none of its members populated.
    #[error("unknown {entity} type for {name:?}: no variant is populated")]
    UnknownVariant { entity: String, name: String },

    /// A union has more than one member populated.
    #[error("{entity} {name:?} has more than one variant populated: {}", members.join(", "))]
    MultipleVariants {
        entity: String,
        name: String,
        members: Vec<String>,
    },

    /// A project was filtered but its source kind cannot be resolved.
    #[error("unknown project source type for project {name:?}")]
    InvalidSourceType { name: String },

    /// Several git remotes are defined but none is selected.
    #[error("there are multiple git remotes but no checkoutFrom remote")]
    AmbiguousRemote,

    /// The selected git remote is not one of the defined remotes.
    #[error("checkoutFrom remote {remote:?} is not defined in remotes")]
    RemoteNotFound { remote: String },

    /// A git-like project source has no remotes at all.
    #[error("no git remotes are defined")]
    NoRemotes,

    /// One or more requested volume mounts collide on path.
    #[error("errors while adding volume mounts:\n{}", conflicts.join("\n"))]
    PathConflict { conflicts: Vec<String> },

    /// The volume is not mounted on the container component.
    #[error("volume {volume} not mounted to component {component}")]
    NotMounted { volume: String, component: String },

    /// The feature is not available for the document's schema version.
    #[error("{feature} is not supported in devfile schema version {version}")]
    UnsupportedBySchemaVersion { feature: String, version: String },

    /// The schema version is not registered.
    #[error("unsupported devfile schema version {version:?}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    UnsupportedSchemaVersion {
        version: String,
        /// Optional hint for how to fix the version
        hint: Option<String>,
    },

    /// The raw tree does not have the expected shape.
    #[error("Devfile parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the document
        hint: Option<String>,
    },

    /// Semantic validation found one or more problems.
    #[error("devfile validation failed:\n{}", problems.join("\n"))]
    Validation { problems: Vec<String> },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A regular expression compilation error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    pub(crate) fn already_exists(name: impl Into<String>, field: impl Into<String>) -> Self {
        Error::AlreadyExists {
            name: name.into(),
            field: field.into(),
        }
    }

    pub(crate) fn not_found(name: impl Into<String>, field: impl Into<String>) -> Self {
        Error::NotFound {
            name: name.into(),
            field: field.into(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
