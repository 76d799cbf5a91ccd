//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use squash_core::{ConfigError, DisplayZone, SquashConfig};

use crate::Cli;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Minutes added to each timestamp to get its span start.
    pub pad_before_minutes: i64,

    /// Minutes added to each timestamp to get its span end.
    pub pad_after_minutes: i64,

    /// Largest gap in minutes that still merges two spans.
    pub margin_minutes: i64,

    /// Zone for day boundaries: `recorded` (default), `local`, `utc`, or `+HH:MM`.
    pub timezone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pad_before_minutes: -5,
            pad_after_minutes: 4,
            margin_minutes: 15,
            timezone: "recorded".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(dirs_config_path().as_deref(), config_path).extract()
    }

    fn figment(config_dir: Option<&Path>, config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = config_dir {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SQUASH_*)
        figment.merge(Env::prefixed("SQUASH_"))
    }

    /// Applies values given on the command line.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(minutes) = cli.pad_before {
            self.pad_before_minutes = minutes;
        }
        if let Some(minutes) = cli.pad_after {
            self.pad_after_minutes = minutes;
        }
        if let Some(minutes) = cli.margin {
            self.margin_minutes = minutes;
        }
        if let Some(zone) = &cli.timezone {
            self.timezone.clone_from(zone);
        }
    }

    /// Validated padding and margin.
    pub fn squash_config(&self) -> Result<SquashConfig, ConfigError> {
        SquashConfig::from_minutes(
            self.pad_before_minutes,
            self.pad_after_minutes,
            self.margin_minutes,
        )
    }

    pub fn display_zone(&self) -> Result<DisplayZone, ConfigError> {
        self.timezone.parse()
    }
}

/// Returns the platform-specific config directory for squash.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("squash"))
}
