//! TOML configuration for the service.
//!
//! Configuration lives in `cityclock.toml` under the XDG config directory
//! (`~/.config/cityclock/` by default) and can be redirected with
//! `--config <dir>`. A missing file is not an error: every field has a
//! documented default matching the original deployment (listen on all
//! interfaces, port 5000, Karachi as the main city).
//!
//! ```toml
//! listen = "0.0.0.0"        # Bind address for the HTTP listener
//! port = 5000               # Bind port
//! main_city = "Karachi"     # City shown in the main card on the index page
//! featured_cities = [       # Cities shown in the featured grid
//!     "London", "New York", "Tokyo", "Dubai", "Istanbul", "Sydney",
//! ]
//! ```
//!
//! Presentation choices (main city, featured set) must name cities that exist
//! in the registry; validation fails fatally before the listener binds.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::registry::CityRegistry;

pub const DEFAULT_LISTEN: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAIN_CITY: &str = "Karachi";
pub const DEFAULT_FEATURED: &[&str] =
    &["London", "New York", "Tokyo", "Dubai", "Istanbul", "Sydney"];

const CONFIG_FILE: &str = "cityclock.toml";

/// On-disk shape: every field optional so partial files work.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    listen: Option<String>,
    port: Option<u16>,
    main_city: Option<String>,
    featured_cities: Option<Vec<String>>,
}

/// Resolved service configuration with defaults applied.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen: String,
    pub port: u16,
    pub main_city: String,
    pub featured_cities: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            port: DEFAULT_PORT,
            main_city: DEFAULT_MAIN_CITY.to_string(),
            featured_cities: DEFAULT_FEATURED.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load configuration from `config_dir` (or the default location).
    ///
    /// A missing file yields the defaults; an unreadable or unparseable file
    /// is an error so typos do not silently fall back.
    pub fn load(config_dir: Option<&Path>) -> Result<Self> {
        let path = config_path(config_dir)?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse a TOML document, applying defaults for absent fields.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(contents).context("Invalid TOML")?;
        let defaults = Self::default();
        Ok(Self {
            listen: raw.listen.unwrap_or(defaults.listen),
            port: raw.port.unwrap_or(defaults.port),
            main_city: raw.main_city.unwrap_or(defaults.main_city),
            featured_cities: raw.featured_cities.unwrap_or(defaults.featured_cities),
        })
    }

    /// Check presentation choices against the registry.
    ///
    /// The main city and every featured city must be registry entries. This
    /// runs before the listener binds; a config naming an unknown city is a
    /// fatal startup error, the same class as a bad zone id in the table.
    pub fn validate(&self, registry: &CityRegistry) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("port must be nonzero");
        }
        if registry.lookup(&self.main_city).is_none() {
            anyhow::bail!("main_city {:?} is not in the city registry", self.main_city);
        }
        let unknown: Vec<&str> = self
            .featured_cities
            .iter()
            .filter(|name| registry.lookup(name).is_none())
            .map(|name| name.as_str())
            .collect();
        if !unknown.is_empty() {
            anyhow::bail!(
                "featured_cities entries not in the city registry: {}",
                unknown.join(", ")
            );
        }
        Ok(())
    }

    /// Socket address string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listen, self.port)
    }
}

/// Resolve the config file path, honoring an explicit directory override.
fn config_path(config_dir: Option<&Path>) -> Result<PathBuf> {
    match config_dir {
        Some(dir) => Ok(dir.join(CONFIG_FILE)),
        None => {
            let base = dirs::config_dir().context("Could not determine config directory")?;
            Ok(base.join("cityclock").join(CONFIG_FILE))
        }
    }
}
