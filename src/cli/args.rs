//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode, Settings};
use crate::consts::DEFAULT_TIMEZONE;
use crate::error::AppError;
use crate::utils::Timezone;

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Parser)]
#[command(name = "aforo")]
#[command(about = "Collect and summarize Sputnik Climbing gym occupancy", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Config file (default: ./aforo.toml, ~/.config/aforo/config.toml, ~/.aforo.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// History file
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) data_file: Option<PathBuf>,

    /// Secrets file holding GITHUB_TOKEN
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) secrets_file: Option<PathBuf>,

    /// Booking site base URL
    #[arg(long, global = true, value_name = "URL")]
    pub(crate) base_url: Option<String>,

    /// Repository root the git commands run in
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) repo_root: Option<PathBuf>,

    /// Git remote to push to
    #[arg(long, global = true, value_name = "NAME")]
    pub(crate) remote: Option<String>,

    /// Timezone for record timestamps (e.g., "Europe/Madrid", "UTC", "local")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// HTTP timeout in seconds (default: none)
    #[arg(long, global = true, value_name = "SECS")]
    pub(crate) http_timeout: Option<u64>,

    /// Skip committing and pushing the history file
    #[arg(long, global = true)]
    pub(crate) no_publish: bool,

    /// Write the history through a temporary file renamed into place
    #[arg(long, global = true)]
    pub(crate) atomic_write: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "debug")]
    pub(crate) quiet: bool,

    /// Default venue for `summary`, filled from config
    #[arg(skip)]
    pub(crate) default_place: Option<u32>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.no_publish && config.no_publish {
            self.no_publish = true;
        }
        if !self.atomic_write && config.atomic_write {
            self.atomic_write = true;
        }
        if !self.no_color && config.no_color {
            self.no_color = true;
        }

        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        // Optional values: only apply if CLI didn't set them
        if self.data_file.is_none() {
            self.data_file = config.data_file.clone();
        }
        if self.secrets_file.is_none() {
            self.secrets_file = config.secrets_file.clone();
        }
        if self.base_url.is_none() {
            self.base_url = config.base_url.clone();
        }
        if self.repo_root.is_none() {
            self.repo_root = config.repo_root.clone();
        }
        if self.remote.is_none() {
            self.remote = config.remote.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.http_timeout.is_none() {
            self.http_timeout = config.http_timeout_secs;
        }
        if self.default_place.is_none() {
            self.default_place = config.place;
        }

        self
    }

    /// Resolve runtime settings, falling back to the documented defaults
    pub(crate) fn settings(&self) -> Result<Settings, AppError> {
        let defaults = Settings::default();
        let timezone = Timezone::parse(Some(
            self.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE),
        ))?;

        Ok(Settings {
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            data_file: self.data_file.clone().unwrap_or(defaults.data_file),
            secrets_file: self.secrets_file.clone().unwrap_or(defaults.secrets_file),
            repo_root: self.repo_root.clone().unwrap_or(defaults.repo_root),
            remote: self.remote.clone().unwrap_or(defaults.remote),
            timezone,
            http_timeout: self.http_timeout.map(Duration::from_secs),
            atomic_write: self.atomic_write,
            publish: !self.no_publish,
        })
    }

    pub(crate) fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else if self.quiet {
            log::LevelFilter::Warn
        } else {
            log::LevelFilter::Info
        }
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}
