//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees a validated
//! [`CarouselConfig`].
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `AUTOSLIDE_CAROUSEL__COOLDOWN_MS=3000`
//! 3. Config file (`--config FILE`, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use autoslide_core::domain::{CarouselConfig, CarouselConfigBuilder, DomainError};
use serde::{Deserialize, Serialize};

/// Local config file name used by `autoslide init --local`.
pub const LOCAL_CONFIG_FILE: &str = ".autoslide.toml";

const ENV_PREFIX: &str = "AUTOSLIDE";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Carousel timing.
    pub carousel: CarouselSettings,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSettings {
    pub tick_interval_ms: u64,
    pub cooldown_ms: u64,
    pub settle_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        let defaults = CarouselConfig::default();
        Self {
            tick_interval_ms: defaults.tick_interval().as_millis() as u64,
            cooldown_ms: defaults.cooldown().as_millis() as u64,
            settle_delay_ms: defaults.settle_delay().as_millis() as u64,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl CarouselSettings {
    /// Builder seeded from these settings, so CLI flags can override single
    /// fields before validation.
    pub fn builder(&self) -> CarouselConfigBuilder {
        CarouselConfig::builder()
            .tick_interval(Duration::from_millis(self.tick_interval_ms))
            .cooldown(Duration::from_millis(self.cooldown_ms))
            .settle_delay(Duration::from_millis(self.settle_delay_ms))
    }

    pub fn to_carousel_config(&self) -> Result<CarouselConfig, DomainError> {
        self.builder().build()
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = Self::active_path(config_file);

        let settings = config::Config::builder()
            .add_source(
                config::Config::try_from(&Self::default())
                    .context("Failed to seed configuration defaults")?,
            )
            .add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(config_file.is_some()),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.autoslide.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "autoslide", "autoslide")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The file this invocation reads: `--config` if given, else the default.
    pub fn active_path(config_file: Option<&PathBuf>) -> PathBuf {
        config_file.cloned().unwrap_or_else(Self::config_path)
    }
}
