//! Soil Estimator
//!
//! Produces a synthetic soil profile for a coordinate pair. There is no soil
//! survey behind this: every field is a closed-form trig function of
//! latitude/longitude, so the same coordinates always yield the same profile.
//!
//! ## Formulas
//! - soil type: `floor(|lat * lng| mod 7)` into [`SoilType::ALL`]
//! - pH: `5.5 + |sin(lat + lng)| * 3`, always in [5.5, 8.5]
//! - nutrient levels: `floor((trig + 1) * 1.5)` into Low/Medium/High, where
//!   trig is `sin(lat)` (N), `cos(lng)` (P), `sin(lat + lng)` (K) and
//!   `cos(lat - lng)` (organic matter)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Soil classes the estimator can produce, in index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    Clay,
    Sandy,
    Loamy,
    Silty,
    Black,
    Red,
    Alluvial,
}

impl SoilType {
    /// Index order used by the estimator
    pub const ALL: [SoilType; 7] = [
        SoilType::Clay,
        SoilType::Sandy,
        SoilType::Loamy,
        SoilType::Silty,
        SoilType::Black,
        SoilType::Red,
        SoilType::Alluvial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Clay => "Clay",
            SoilType::Sandy => "Sandy",
            SoilType::Loamy => "Loamy",
            SoilType::Silty => "Silty",
            SoilType::Black => "Black",
            SoilType::Red => "Red",
            SoilType::Alluvial => "Alluvial",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse three-step nutrient rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NutrientLevel {
    Low,
    Medium,
    High,
}

impl NutrientLevel {
    const LEVELS: [NutrientLevel; 3] = [NutrientLevel::Low, NutrientLevel::Medium, NutrientLevel::High];

    /// Map a trig term in [-1, 1] to a level via `floor((trig + 1) * 1.5)`.
    ///
    /// The raw formula reaches index 3 when the term is exactly 1.0; that
    /// case is clamped to `High`.
    pub fn from_trig(term: f64) -> Self {
        let index = ((term + 1.0) * 1.5).floor() as usize;
        Self::LEVELS[index.min(Self::LEVELS.len() - 1)]
    }

    /// Gauge fill (0-100) used by soil displays
    pub fn gauge_value(&self) -> u8 {
        match self {
            NutrientLevel::Low => 25,
            NutrientLevel::Medium => 50,
            NutrientLevel::High => 90,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientLevel::Low => "Low",
            NutrientLevel::Medium => "Medium",
            NutrientLevel::High => "High",
        }
    }
}

impl fmt::Display for NutrientLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synthetic soil profile for one coordinate query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilProfile {
    #[serde(rename = "type")]
    pub soil_type: SoilType,
    pub ph: f64,
    pub nitrogen: NutrientLevel,
    pub phosphorus: NutrientLevel,
    pub potassium: NutrientLevel,
    pub organic_matter: NutrientLevel,
}

impl SoilProfile {
    /// pH gauge fill on a 4.0-14.0 scale: `(ph - 4) * 10`
    pub fn ph_gauge(&self) -> f64 {
        (self.ph - 4.0) * 10.0
    }
}

pub const MIN_PH: f64 = 5.5;
pub const PH_SPAN: f64 = 3.0;

/// Estimate the soil profile at `(lat, lng)`.
///
/// No range validation: out-of-range coordinates still produce a well-formed
/// profile.
pub fn estimate_soil(lat: f64, lng: f64) -> SoilProfile {
    let types = SoilType::ALL.len();
    let type_index = ((lat * lng).abs() % types as f64).floor() as usize;

    SoilProfile {
        soil_type: SoilType::ALL[type_index.min(types - 1)],
        ph: MIN_PH + (lat + lng).sin().abs() * PH_SPAN,
        nitrogen: NutrientLevel::from_trig(lat.sin()),
        phosphorus: NutrientLevel::from_trig(lng.cos()),
        potassium: NutrientLevel::from_trig((lat + lng).sin()),
        organic_matter: NutrientLevel::from_trig((lat - lng).cos()),
    }
}
