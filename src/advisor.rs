//! Field advisor - composes the per-location view
//!
//! For one location: estimate weather and soil, resolve the season from the
//! supplied date, rank the catalog, and project calendar rows for the ranked
//! crops. All inputs that vary between calls (date, random source) come from
//! the caller.

use crate::calendar::{timeline_rows, TimelineRow};
use crate::catalog::CropCatalog;
use crate::locations::FieldLocation;
use crate::scorer::{CropSuggestion, GrowingConditions, SuitabilityScorer};
use crate::season::{current_season, Season};
use crate::soil::{estimate_soil, SoilProfile};
use crate::weather::{estimate_weather_with, ConditionDraw, WeatherReading};
use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;

/// Everything the location detail page shows
#[derive(Debug, Clone, Serialize)]
pub struct LocationReport {
    pub location: Option<FieldLocation>,
    pub weather: WeatherReading,
    pub soil: SoilProfile,
    pub season: Season,
    pub suggestions: Vec<CropSuggestion>,
    pub calendar: Vec<TimelineRow>,
}

#[derive(Debug, Clone)]
pub struct FieldAdvisor {
    scorer: SuitabilityScorer,
    draw: ConditionDraw,
}

impl FieldAdvisor {
    pub fn new(catalog: CropCatalog) -> Self {
        Self {
            scorer: SuitabilityScorer::new(catalog),
            draw: ConditionDraw::default(),
        }
    }

    pub fn with_draw(mut self, draw: ConditionDraw) -> Self {
        self.draw = draw;
        self
    }

    pub fn draw(&self) -> ConditionDraw {
        self.draw
    }

    pub fn scorer(&self) -> &SuitabilityScorer {
        &self.scorer
    }

    pub fn catalog(&self) -> &CropCatalog {
        self.scorer.catalog()
    }

    /// Rank crops for coordinates, given weather already known to the caller
    pub fn suggest_for_location(
        &self,
        lat: f64,
        lng: f64,
        temperature_c: f64,
        humidity_pct: f64,
        today: NaiveDate,
    ) -> Vec<CropSuggestion> {
        let soil = estimate_soil(lat, lng);
        let season = current_season(today);
        self.scorer.score(&GrowingConditions::new(
            soil,
            temperature_c,
            humidity_pct,
            season.label(),
        ))
    }

    /// Full report for raw coordinates
    pub fn report<R: Rng + ?Sized>(
        &self,
        lat: f64,
        lng: f64,
        today: NaiveDate,
        rng: &mut R,
    ) -> LocationReport {
        let weather = estimate_weather_with(lat, lng, self.draw, rng);
        let soil = estimate_soil(lat, lng);
        let season = current_season(today);

        let conditions = GrowingConditions::new(
            soil.clone(),
            weather.temperature_c,
            weather.humidity_pct,
            season.label(),
        );
        let suggestions = self.scorer.score(&conditions);
        let calendar = timeline_rows(suggestions.iter().map(|s| &s.crop), today);

        tracing::debug!(
            "Report for ({:.4}, {:.4}): {} soil, {:.1}°C, {:.0}% humidity, {} season, {} suggestions",
            lat,
            lng,
            soil.soil_type,
            weather.temperature_c,
            weather.humidity_pct,
            season,
            suggestions.len()
        );

        LocationReport {
            location: None,
            weather,
            soil,
            season,
            suggestions,
            calendar,
        }
    }

    /// Full report for one of the sample fields
    pub fn report_for_field<R: Rng + ?Sized>(
        &self,
        field: &FieldLocation,
        today: NaiveDate,
        rng: &mut R,
    ) -> LocationReport {
        let mut report = self.report(field.lat, field.lng, today, rng);
        report.location = Some(field.clone());
        report
    }
}
