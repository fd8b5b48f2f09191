//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "tourgen";
const PROJECT_FILES: [&str; 2] = ["tourgen.toml", ".tourgen.toml"];
const ENV_PREFIX: &str = "TOURGEN_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `TOURGEN_*` environment variables (`TOURGEN_GEMINI__TEXT_MODEL`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./tourgen.toml` or `./.tourgen.toml`
    /// 4. Global config: `$XDG_CONFIG_HOME/tourgen/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load a single file on top of the defaults
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/tourgen/config.toml if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = config_path {
            let marker = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{marker:^7}] Explicit: {}", path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [ FOUND ] Project: {}", path.display());
        } else {
            println!("  [       ] Project: ./tourgen.toml or ./.tourgen.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [ FOUND ] Global:  {}", path.display());
            } else {
                println!("  [       ] Global:  {}", path.display());
            }
        }

        println!("  [       ] Env:     {ENV_PREFIX}<SECTION>__<KEY>");
        println!("  [       ] Default: built-in defaults");
    }
}
