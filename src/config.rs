use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::consts::{DEFAULT_BASE_URL, DEFAULT_DATA_FILE, DEFAULT_REMOTE, DEFAULT_SECRETS_FILE};
use crate::error::AppError;
use crate::utils::Timezone;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

/// On-disk configuration. Every field is optional; CLI flags win.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    #[serde(default)]
    pub(crate) data_file: Option<PathBuf>,
    #[serde(default)]
    pub(crate) secrets_file: Option<PathBuf>,
    #[serde(default)]
    pub(crate) repo_root: Option<PathBuf>,
    #[serde(default)]
    pub(crate) remote: Option<String>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) http_timeout_secs: Option<u64>,
    #[serde(default)]
    pub(crate) no_publish: bool,
    #[serde(default)]
    pub(crate) atomic_write: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) place: Option<u32>,
}

impl Config {
    /// Load the explicit config file if given, otherwise the first parseable
    /// file from the default search path.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        if let Some(path) = explicit {
            let content = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
            let config = Self::parse(&content, path)?;
            log::debug!("Loaded config from {}", path.display());
            return Ok(config);
        }

        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match Self::parse(&content, &path) {
                    Ok(config) => {
                        log::debug!("Loaded config from {}", path.display());
                        return Ok(config);
                    }
                    Err(e) => log::warn!("{e}"),
                }
            }
        }

        Ok(Self::default())
    }

    fn parse(content: &str, path: &Path) -> Result<Self, AppError> {
        toml::from_str::<Config>(content).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn get_config_paths() -> Vec<PathBuf> {
        // 1. Working directory: ./aforo.toml (next to the data checkout)
        let mut paths = vec![PathBuf::from("aforo.toml")];

        // 2. XDG config: ~/.config/aforo/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("aforo").join("config.toml"));
        }

        // 3. Platform config dir (macOS Application Support, Windows AppData)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("aforo").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 4. Home directory: ~/.aforo.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".aforo.toml"));
        }

        paths
    }
}

/// Resolved runtime settings handed to each component at construction.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) base_url: String,
    pub(crate) data_file: PathBuf,
    pub(crate) secrets_file: PathBuf,
    pub(crate) repo_root: PathBuf,
    pub(crate) remote: String,
    pub(crate) timezone: Timezone,
    pub(crate) http_timeout: Option<Duration>,
    pub(crate) atomic_write: bool,
    pub(crate) publish: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            secrets_file: PathBuf::from(DEFAULT_SECRETS_FILE),
            repo_root: PathBuf::from("."),
            remote: DEFAULT_REMOTE.to_string(),
            timezone: Timezone::Named(chrono_tz::Europe::Madrid),
            http_timeout: None,
            atomic_write: false,
            publish: true,
        }
    }
}
