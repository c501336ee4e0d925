//! Configuration file handling for the CLI.
//!
//! Reads `$XDG_CONFIG_HOME/userdir/config.toml` (or the platform equivalent)
//! and layers it under environment variables and command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use userdir_business::BusinessConfig;

/// CLI configuration stored on disk.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the users API, e.g. `http://localhost:8080`.
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    pub items_per_page: Option<usize>,
}

impl Config {
    /// `$XDG_CONFIG_HOME/userdir/config.toml` on Linux.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("org", "usermanag", "userdir")
            .context("Failed to determine config directory")?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Load the config file, or defaults if there is none.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Defaults, then this file, then the environment, then `api_url_flag`.
    pub fn resolve<I, S>(&self, env: I, api_url_flag: Option<String>) -> Result<BusinessConfig>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut config = BusinessConfig::default();
        config.apply_overrides(self.api.base_url.clone(), self.view.items_per_page);

        let mut config = config
            .overlay_vars(env)
            .context("Failed to read USERDIR_* environment variables")?;
        config.apply_overrides(api_url_flag, None);

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}
