use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    convert::{TimeConverter, fahrenheit_to_celsius},
    model::WeatherDocument,
};

/// Temperature unit used for display. The provider is always queried in
/// Fahrenheit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Fahrenheit,
    Celsius,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Fahrenheit => "fahrenheit",
            Units::Celsius => "celsius",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Units::Fahrenheit => "°F",
            Units::Celsius => "°C",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Fahrenheit, Units::Celsius]
    }

    /// Convert a Fahrenheit reading into this unit.
    pub fn convert(self, fahrenheit: f64) -> f64 {
        match self {
            Units::Fahrenheit => fahrenheit,
            Units::Celsius => fahrenheit_to_celsius(fahrenheit),
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "fahrenheit" | "f" | "us" => Ok(Units::Fahrenheit),
            "celsius" | "c" | "si" => Ok(Units::Celsius),
            _ => Err(anyhow!(
                "Unknown units '{value}'. Supported units: fahrenheit, celsius."
            )),
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Key for the Dark Sky compatible forecast API.
    pub api_key: Option<String>,

    /// Address used when none is given on the command line.
    pub default_address: Option<String>,

    #[serde(default)]
    pub units: Units,

    /// Fixed display offset, e.g. "-08:00". When unset, the document's own
    /// offset is used.
    pub utc_offset: Option<String>,

    /// Overrides for the service endpoints.
    pub forecast_url: Option<String>,
    pub geocoder_url: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            log::debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }

    /// The explicit address if given, else the configured default.
    pub fn resolve_address(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .or_else(|| self.default_address.clone())
            .filter(|address| !address.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No address given and no default address configured.\n\
                     Hint: pass an address or run `forecast configure` to set a default."
                )
            })
    }

    /// Pick the display clock: explicit override, then config, then the
    /// document's own offset, then UTC.
    pub fn time_converter(
        &self,
        explicit: Option<&str>,
        doc: &WeatherDocument,
    ) -> Result<TimeConverter> {
        if let Some(offset) = explicit.or(self.utc_offset.as_deref()) {
            return Ok(TimeConverter::parse_offset(offset)?);
        }

        match doc.offset {
            Some(hours) => Ok(TimeConverter::from_hours(hours)?),
            None => {
                log::warn!("weather document carries no UTC offset, formatting times in UTC");
                Ok(TimeConverter::utc())
            }
        }
    }
}
