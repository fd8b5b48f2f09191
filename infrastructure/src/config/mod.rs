//! Configuration file loading for tourgen
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TOURGEN_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./tourgen.toml` or `./.tourgen.toml`
//! 4. Global: `$XDG_CONFIG_HOME/tourgen/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FALLBACK_API_KEY_ENV, FileConfig, FileExportConfig, FileGeminiConfig,
    FileGenerationConfig, FileLoggingConfig, FileOutputConfig, FileOutputFormat,
};
pub use loader::ConfigLoader;
