//! Common constants used throughout basta.

/// Default template configuration file, relative to the template root
pub const CONFIG_FILE: &str = "basta.yaml";

/// Prefix marking a comment line in ignore rules
pub const IGNORE_COMMENT: &str = "#";
