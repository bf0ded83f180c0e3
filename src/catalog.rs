//! Crop Catalog
//!
//! Static reference table of crop definitions. The table ships as JSON
//! (`data/crop_catalog.json`, embedded at compile time) and can be replaced
//! by a file at startup. Every entry is validated once, on load; scoring
//! never sees an invalid definition.
//!
//! Validation rules:
//! - `waterRequirement` must be Low, Medium or High
//! - `temperature.min` must be strictly below `temperature.max`
//! - `growthDays` must be positive
//! - `season` must be Kharif, Rabi, Zaid or Year-round

use crate::season::CropSeason;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

const REFERENCE_CATALOG: &str = include_str!("../data/crop_catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid crop definition '{crop}': {reason}")]
    InvalidCropDefinition { crop: String, reason: String },

    #[error("failed to parse crop catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read crop catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// Irrigation demand of a crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaterRequirement {
    Low,
    Medium,
    High,
}

impl WaterRequirement {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(WaterRequirement::Low),
            "Medium" => Some(WaterRequirement::Medium),
            "High" => Some(WaterRequirement::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WaterRequirement::Low => "Low",
            WaterRequirement::Medium => "Medium",
            WaterRequirement::High => "High",
        }
    }

    /// Whether ambient humidity covers this requirement.
    ///
    /// Bands overlap: 61-70% satisfies both Medium and High.
    pub fn satisfied_by(&self, humidity_pct: f64) -> bool {
        match self {
            WaterRequirement::Low => humidity_pct < 50.0,
            WaterRequirement::Medium => (40.0..=70.0).contains(&humidity_pct),
            WaterRequirement::High => humidity_pct > 60.0,
        }
    }
}

impl fmt::Display for WaterRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a temperature sits relative to a crop's band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BandFit {
    /// min <= t <= max
    Within,
    /// Outside the band but inside the tolerance margin
    Near,
    Outside,
}

/// Ideal growing temperature range (°C), min < max
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureBand {
    pub min: f64,
    pub max: f64,
}

impl TemperatureBand {
    pub fn contains(&self, temperature_c: f64) -> bool {
        temperature_c >= self.min && temperature_c <= self.max
    }

    /// Classify `temperature_c` against the band widened by `tolerance` on each side
    pub fn fit(&self, temperature_c: f64, tolerance: f64) -> BandFit {
        if self.contains(temperature_c) {
            BandFit::Within
        } else if temperature_c >= self.min - tolerance && temperature_c <= self.max + tolerance {
            BandFit::Near
        } else {
            BandFit::Outside
        }
    }
}

/// Validated catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropDefinition {
    pub name: String,
    pub growth_days: u32,
    pub expected_yield: String,
    pub description: String,
    pub water_requirement: WaterRequirement,
    pub temperature: TemperatureBand,
    pub profit_potential: String,
    pub ideal_soil_types: Vec<String>,
    pub season: CropSeason,
    pub image_url: String,
}

/// Catalog entry as written in JSON, before validation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCropDefinition {
    pub name: String,
    pub growth_days: i64,
    pub expected_yield: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub water_requirement: String,
    pub temperature: TemperatureBand,
    pub profit_potential: String,
    pub ideal_soil_types: Vec<String>,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub image_url: String,
}

impl RawCropDefinition {
    pub fn validate(self) -> Result<CropDefinition, CatalogError> {
        let invalid = |reason: String| CatalogError::InvalidCropDefinition {
            crop: self.name.clone(),
            reason,
        };

        let water_requirement = WaterRequirement::from_label(&self.water_requirement)
            .ok_or_else(|| invalid(format!("unknown water requirement '{}'", self.water_requirement)))?;

        // Negated form so NaN bounds are rejected too
        if !(self.temperature.min < self.temperature.max) {
            return Err(invalid(format!(
                "temperature band min {} is not below max {}",
                self.temperature.min, self.temperature.max
            )));
        }

        let growth_days = u32::try_from(self.growth_days)
            .ok()
            .filter(|days| *days > 0)
            .ok_or_else(|| invalid(format!("growth days must be positive, got {}", self.growth_days)))?;

        let season = CropSeason::from_label(&self.season)
            .ok_or_else(|| invalid(format!("unknown season '{}'", self.season)))?;

        Ok(CropDefinition {
            name: self.name,
            growth_days,
            expected_yield: self.expected_yield,
            description: self.description,
            water_requirement,
            temperature: self.temperature,
            profit_potential: self.profit_potential,
            ideal_soil_types: self.ideal_soil_types,
            season,
            image_url: self.image_url,
        })
    }
}

/// Read-only, validated crop table in catalog order
#[derive(Debug, Clone)]
pub struct CropCatalog {
    crops: Vec<CropDefinition>,
    by_name: FxHashMap<String, usize>,
}

impl CropCatalog {
    /// The built-in 8-crop reference catalog
    pub fn reference() -> Result<Self, CatalogError> {
        Self::from_json_str(REFERENCE_CATALOG)
    }

    /// Load and validate a catalog file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&contents)?;
        tracing::info!("Loaded {} crops from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawCropDefinition> = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Validate every entry; the first invalid one fails the whole catalog
    pub fn from_raw(raw: Vec<RawCropDefinition>) -> Result<Self, CatalogError> {
        let crops = raw
            .into_iter()
            .map(RawCropDefinition::validate)
            .collect::<Result<Vec<_>, _>>()?;

        let by_name = crops
            .iter()
            .enumerate()
            .map(|(idx, crop)| (crop.name.to_lowercase(), idx))
            .collect();

        Ok(Self { crops, by_name })
    }

    /// Case-insensitive lookup by crop name
    pub fn get(&self, name: &str) -> Option<&CropDefinition> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&idx| &self.crops[idx])
    }

    pub fn crops(&self) -> &[CropDefinition] {
        &self.crops
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CropDefinition> {
        self.crops.iter()
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}
