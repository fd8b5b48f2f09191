//! Export configuration from TOML (`[export]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw export configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExportConfig {
    /// Export every ready package into this directory
    pub directory: Option<PathBuf>,
}
