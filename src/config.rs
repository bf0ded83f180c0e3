//! Server configuration from environment variables
//!
//! | Variable              | Default  | Meaning |
//! |-----------------------|----------|---------|
//! | `PORT`                | 3000     | listen port |
//! | `CROP_CATALOG`        | built-in | JSON catalog replacing the reference table |
//! | `SIMULATED_LATENCY`   | off      | `1`/`true` delays soil 700 ms and weather 500 ms |
//! | `SOIL_CACHE_TTL_SECS` | 300      | soil response cache lifetime |
//! | `PAIRED_WEATHER`      | off      | `1`/`true` draws weather description and icon together |

use crate::catalog::{CatalogError, CropCatalog};
use crate::weather::ConditionDraw;
use std::path::PathBuf;
use std::time::Duration;

pub const SOIL_LATENCY: Duration = Duration::from_millis(700);
pub const WEATHER_LATENCY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub catalog_path: Option<PathBuf>,
    pub simulate_latency: bool,
    pub soil_cache_ttl: Duration,
    pub weather_draw: ConditionDraw,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            catalog_path: None,
            simulate_latency: false,
            soil_cache_ttl: Duration::from_secs(300),
            weather_draw: ConditionDraw::Independent,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid PORT '{}', using {}", raw, defaults.port);
                defaults.port
            }),
            None => defaults.port,
        };

        let catalog_path = lookup("CROP_CATALOG")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let simulate_latency = lookup("SIMULATED_LATENCY")
            .map(|v| is_enabled(&v))
            .unwrap_or(defaults.simulate_latency);

        let weather_draw = match lookup("PAIRED_WEATHER") {
            Some(v) if is_enabled(&v) => ConditionDraw::Paired,
            _ => defaults.weather_draw,
        };

        let soil_cache_ttl = lookup("SOIL_CACHE_TTL_SECS")
            .and_then(|v| v.trim().parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.soil_cache_ttl);

        Self {
            port,
            catalog_path,
            simulate_latency,
            soil_cache_ttl,
            weather_draw,
        }
    }

    /// The configured catalog file, or the built-in reference catalog
    pub fn load_catalog(&self) -> Result<CropCatalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => CropCatalog::load(path),
            None => CropCatalog::reference(),
        }
    }

    pub fn soil_latency(&self) -> Duration {
        if self.simulate_latency { SOIL_LATENCY } else { Duration::ZERO }
    }

    pub fn weather_latency(&self) -> Duration {
        if self.simulate_latency { WEATHER_LATENCY } else { Duration::ZERO }
    }
}

fn is_enabled(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
