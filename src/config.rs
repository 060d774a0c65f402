use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const LOCAL_CONFIG: &str = "./.gh-semver.toml";
const USER_CONFIG: &str = "gh-semver.toml";

/// Represents the complete configuration for gh-semver.
///
/// Every setting can also be given on the command line, which takes precedence.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Tag-name prefix of the monorepo module being versioned
    #[serde(default)]
    pub prefix: Option<String>,

    /// Only commits touching files under this path are classified
    #[serde(default)]
    pub filter_path: Option<String>,

    /// Main line branch name; detected from the remote when unset
    #[serde(default)]
    pub main_branch: Option<String>,

    /// Remote whose HEAD names the main line branch
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub output: OutputConfig,
}

/// How the computed version is written.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Always print the release form (no branch/distance/hash suffix)
    #[serde(default)]
    pub release: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<version>` on its own line
    #[default]
    Plain,
    /// GitHub Actions output command named `version`
    Action,
}

fn default_remote() -> String {
    "origin".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prefix: None,
            filter_path: None,
            main_branch: None,
            remote: default_remote(),
            output: OutputConfig::default(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `.gh-semver.toml` in current directory
/// 3. `gh-semver.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG).exists() {
        fs::read_to_string(LOCAL_CONFIG)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
