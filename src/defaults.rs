//! Default values for the devfile CLI.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// File name looked up in the current directory when no `-f/--file` is given.
pub const DEFAULT_DEVFILE_FILENAME: &str = "devfile.yaml";

/// Environment variable that overrides the devfile path.
pub const DEVFILE_PATH_ENV: &str = "DEVFILE_PATH";
