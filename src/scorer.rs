//! Suitability Scorer - ranks catalog crops for a set of growing conditions
//!
//! Additive score out of 100 per crop:
//!
//! | Component   | Points | Condition |
//! |-------------|--------|-----------|
//! | Soil        | 25     | an ideal soil label contains the soil type (case-insensitive) |
//! | Temperature | 25/10  | inside the band / within ±5 °C of it |
//! | Water       | 20     | humidity satisfies the crop's water requirement |
//! | Season      | 30     | season label matches, or the crop is year-round |
//!
//! Only crops scoring above 40 are kept, ordered by confidence (stable, so
//! ties keep catalog order) and cut to the top 5.
//!
//! Includes both sequential and parallel (Rayon) batch scoring.

use crate::catalog::{BandFit, CropCatalog, CropDefinition};
use crate::soil::SoilProfile;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub const SOIL_MATCH_POINTS: u32 = 25;
pub const TEMPERATURE_MATCH_POINTS: u32 = 25;
pub const TEMPERATURE_NEAR_POINTS: u32 = 10;
pub const TEMPERATURE_TOLERANCE_C: f64 = 5.0;
pub const WATER_MATCH_POINTS: u32 = 20;
pub const SEASON_MATCH_POINTS: u32 = 30;

/// Suggestions must score strictly above this
pub const MIN_CONFIDENCE: u8 = 40;
pub const MAX_SUGGESTIONS: usize = 5;

/// Inputs to one scoring call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowingConditions {
    pub soil: SoilProfile,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    /// Season label; anything other than the catalog labels earns no season points
    pub season: String,
}

impl GrowingConditions {
    pub fn new(soil: SoilProfile, temperature_c: f64, humidity_pct: f64, season: impl Into<String>) -> Self {
        Self {
            soil,
            temperature_c,
            humidity_pct,
            season: season.into(),
        }
    }
}

/// Catalog crop with its computed confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropSuggestion {
    #[serde(flatten)]
    pub crop: CropDefinition,
    /// 0-100
    pub confidence: u8,
}

/// Per-component points for one crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub soil: u32,
    pub temperature: u32,
    pub water: u32,
    pub season: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.soil + self.temperature + self.water + self.season
    }

    pub fn confidence(&self) -> u8 {
        self.total().min(100) as u8
    }
}

/// Main crop scorer
#[derive(Debug, Clone)]
pub struct SuitabilityScorer {
    catalog: CropCatalog,
}

impl SuitabilityScorer {
    pub fn new(catalog: CropCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    /// Score one crop component by component
    pub fn breakdown(&self, crop: &CropDefinition, conditions: &GrowingConditions) -> ScoreBreakdown {
        score_breakdown(crop, conditions)
    }

    /// Rank the catalog for `conditions`: at most 5 crops, confidence > 40, best first
    pub fn score(&self, conditions: &GrowingConditions) -> Vec<CropSuggestion> {
        rank_catalog(&self.catalog, conditions)
    }

    /// Score several condition sets sequentially
    pub fn score_batch(&self, batch: &[GrowingConditions]) -> Vec<Vec<CropSuggestion>> {
        batch.iter().map(|c| self.score(c)).collect()
    }

    /// Score several condition sets in parallel (Rayon); output keeps input order
    pub fn score_batch_parallel(&self, batch: &[GrowingConditions]) -> Vec<Vec<CropSuggestion>> {
        batch.par_iter().map(|c| self.score(c)).collect()
    }
}

/// Per-component points of `crop` under `conditions`
pub fn score_breakdown(crop: &CropDefinition, conditions: &GrowingConditions) -> ScoreBreakdown {
    let soil_type = conditions.soil.soil_type.as_str().to_lowercase();
    let soil = if crop
        .ideal_soil_types
        .iter()
        .any(|ideal| ideal.to_lowercase().contains(&soil_type))
    {
        SOIL_MATCH_POINTS
    } else {
        0
    };

    let temperature = match crop.temperature.fit(conditions.temperature_c, TEMPERATURE_TOLERANCE_C) {
        BandFit::Within => TEMPERATURE_MATCH_POINTS,
        BandFit::Near => TEMPERATURE_NEAR_POINTS,
        BandFit::Outside => 0,
    };

    let water = if crop.water_requirement.satisfied_by(conditions.humidity_pct) {
        WATER_MATCH_POINTS
    } else {
        0
    };

    let season = if crop.season.matches(&conditions.season) {
        SEASON_MATCH_POINTS
    } else {
        0
    };

    ScoreBreakdown {
        soil,
        temperature,
        water,
        season,
    }
}

/// Score every catalog entry, filter, stable-sort by confidence and truncate
pub fn rank_catalog(catalog: &CropCatalog, conditions: &GrowingConditions) -> Vec<CropSuggestion> {
    let mut suggestions: Vec<CropSuggestion> = catalog
        .iter()
        .map(|crop| CropSuggestion {
            confidence: score_breakdown(crop, conditions).confidence(),
            crop: crop.clone(),
        })
        .filter(|s| s.confidence > MIN_CONFIDENCE)
        .collect();

    // sort_by is stable: equal confidences keep catalog order
    suggestions.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// Rank `catalog` for one soil/temperature/humidity/season combination
pub fn score_crops(
    catalog: &CropCatalog,
    soil: &SoilProfile,
    temperature_c: f64,
    humidity_pct: f64,
    season: &str,
) -> Vec<CropSuggestion> {
    rank_catalog(catalog, &GrowingConditions::new(soil.clone(), temperature_c, humidity_pct, season))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::soil::{NutrientLevel, SoilType};

    fn soil(soil_type: SoilType) -> SoilProfile {
        SoilProfile {
            soil_type,
            ph: 6.8,
            nitrogen: NutrientLevel::Medium,
            phosphorus: NutrientLevel::Medium,
            potassium: NutrientLevel::Medium,
            organic_matter: NutrientLevel::Medium,
        }
    }

    fn scorer() -> SuitabilityScorer {
        SuitabilityScorer::new(CropCatalog::reference().unwrap())
    }

    fn names(suggestions: &[CropSuggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.crop.name.as_str()).collect()
    }

    #[test]
    fn test_maize_full_marks() {
        let scorer = scorer();
        let maize = scorer.catalog().get("Maize").unwrap();
        let conditions = GrowingConditions::new(soil(SoilType::Alluvial), 30.0, 55.0, "Kharif");
        let b = scorer.breakdown(maize, &conditions);
        assert_eq!(b, ScoreBreakdown { soil: 25, temperature: 25, water: 20, season: 30 });
        assert_eq!(b.confidence(), 100);
    }

    #[test]
    fn test_alluvial_kharif_ranking() {
        let conditions = GrowingConditions::new(soil(SoilType::Alluvial), 30.0, 55.0, "Kharif");
        let result = scorer().score(&conditions);

        // Cotton 100, Maize 100, Rice 80, Sugarcane 80, Tomato 75 (Groundnut 55 cut)
        assert_eq!(names(&result), ["Cotton", "Maize", "Rice", "Sugarcane", "Tomato"]);
        let confidences: Vec<u8> = result.iter().map(|s| s.confidence).collect();
        assert_eq!(confidences, [100, 100, 80, 80, 75]);
    }

    #[test]
    fn test_soil_substring_match() {
        let scorer = scorer();
        let wheat = scorer.catalog().get("Wheat").unwrap();
        // "Clay Loam" contains "clay"
        let clay = GrowingConditions::new(soil(SoilType::Clay), 0.0, 0.0, "");
        assert_eq!(scorer.breakdown(wheat, &clay).soil, 25);
        let red = GrowingConditions::new(soil(SoilType::Red), 0.0, 0.0, "");
        assert_eq!(scorer.breakdown(wheat, &red).soil, 0);
    }

    #[test]
    fn test_temperature_boundaries() {
        let scorer = scorer();
        let cotton = scorer.catalog().get("Cotton").unwrap(); // 20-35
        let points = |t: f64| {
            let c = GrowingConditions::new(soil(SoilType::Red), t, 0.0, "");
            scorer.breakdown(cotton, &c).temperature
        };
        assert_eq!(points(20.0), 25);
        assert_eq!(points(35.0), 25);
        assert_eq!(points(15.0), 10);
        assert_eq!(points(40.0), 10);
        assert_eq!(points(14.0), 0);
        assert_eq!(points(41.0), 0);
    }

    #[test]
    fn test_unknown_season_gets_no_bonus() {
        let scorer = scorer();
        let rice = scorer.catalog().get("Rice").unwrap();
        let tomato = scorer.catalog().get("Tomato").unwrap();
        let c = GrowingConditions::new(soil(SoilType::Clay), 30.0, 65.0, "Monsoon");
        assert_eq!(scorer.breakdown(rice, &c).season, 0);
        assert_eq!(scorer.breakdown(tomato, &c).season, 30);
    }

    #[test]
    fn test_empty_result() {
        // Freezing, bone dry, no season: nothing clears 40
        let c = GrowingConditions::new(soil(SoilType::Black), -20.0, 30.0, "None");
        let result = scorer().score(&c);
        assert!(result.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scorer = scorer();
        let batch: Vec<GrowingConditions> = SoilType::ALL
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let season = ["Kharif", "Rabi", "Zaid"][i % 3];
                GrowingConditions::new(soil(*t), 12.0 + i as f64 * 4.0, 35.0 + i as f64 * 6.0, season)
            })
            .collect();
        assert_eq!(scorer.score_batch(&batch), scorer.score_batch_parallel(&batch));
    }

    #[test]
    fn test_suggestion_json_is_flat() {
        let c = GrowingConditions::new(soil(SoilType::Alluvial), 30.0, 55.0, "Kharif");
        let result = scorer().score(&c);
        let json = serde_json::to_value(&result[0]).unwrap();
        assert_eq!(json["name"], "Cotton");
        assert_eq!(json["confidence"], 100);
        assert_eq!(json["growthDays"], 160);
    }
}
