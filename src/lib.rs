//! Crop Scorer Rust Implementation
//!
//! Location-aware crop suggestions for small farms.
//!
//! - `soil`, `weather`: deterministic soil and pseudo-random weather estimates per coordinate
//! - `catalog`: validated crop catalog (built-in reference table or a JSON file)
//! - `scorer`: additive suitability scoring and top-5 ranking (sequential + Rayon batch)
//! - `season`, `calendar`: Indian cropping seasons and 12-month planting timelines
//! - `advisor`: composes the per-location report
//! - `locations`, `session`, `transcription`: sample fields, interface state and speech input
//! - `api_server` (feature `api`): Axum REST server

pub mod advisor;
pub mod calendar;
pub mod catalog;
pub mod config;
pub mod locations;
pub mod scorer;
pub mod season;
pub mod session;
pub mod soil;
pub mod transcription;
pub mod weather;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use advisor::{FieldAdvisor, LocationReport};
pub use calendar::{project_timeline, CalendarPhase, Timeline, TimelineRow};
pub use catalog::{CatalogError, CropCatalog, CropDefinition, TemperatureBand, WaterRequirement};
pub use config::ServerConfig;
pub use locations::{sample_locations, FieldLocation, Language, LANGUAGES};
pub use scorer::{score_crops, CropSuggestion, GrowingConditions, ScoreBreakdown, SuitabilityScorer};
pub use season::{current_season, CropSeason, Season};
pub use soil::{estimate_soil, NutrientLevel, SoilProfile, SoilType};
pub use weather::{estimate_weather, ConditionDraw, WeatherReading};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
