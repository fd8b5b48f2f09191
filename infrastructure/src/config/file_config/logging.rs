//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Also write diagnostic logs to this file
    pub file: Option<PathBuf>,
    /// Append run events as JSON lines to this file
    pub journal: Option<PathBuf>,
}
