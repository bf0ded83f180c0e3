//! Sample field locations and interface languages
//!
//! The location picker offers four hardcoded fields; the header offers three
//! interface languages.

use serde::{Deserialize, Serialize};

/// A named field the farmer can pick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldLocation {
    pub id: u32,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl FieldLocation {
    fn new(id: u32, name: &str, lat: f64, lng: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            lat,
            lng,
        }
    }

    /// Coordinates formatted for display, e.g. "28.70°, 77.10°"
    pub fn coordinates_label(&self) -> String {
        format!("{:.2}°, {:.2}°", self.lat, self.lng)
    }
}

// ============================================================================
// Hardcoded Sample Fields
// ============================================================================

/// North Field - Delhi plains
pub fn north_field() -> FieldLocation {
    FieldLocation::new(1, "North Field", 28.7041, 77.1025)
}

/// South Field - Mumbai coast
pub fn south_field() -> FieldLocation {
    FieldLocation::new(2, "South Field", 19.0760, 72.8777)
}

/// East Farm - Kolkata delta
pub fn east_farm() -> FieldLocation {
    FieldLocation::new(3, "East Farm", 22.5726, 88.3639)
}

/// West Plantation - Pune plateau
pub fn west_plantation() -> FieldLocation {
    FieldLocation::new(4, "West Plantation", 18.5204, 73.8567)
}

/// All sample fields in picker order
pub fn sample_locations() -> Vec<FieldLocation> {
    vec![north_field(), south_field(), east_farm(), west_plantation()]
}

pub fn find_location(id: u32) -> Option<FieldLocation> {
    sample_locations().into_iter().find(|loc| loc.id == id)
}

// ============================================================================
// Languages
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    /// ISO 639-1 code, also used as the transcription language code
    pub code: &'static str,
    /// Name in its own script
    pub name: &'static str,
    pub flag: &'static str,
}

pub const LANGUAGES: [Language; 3] = [
    Language { code: "en", name: "English", flag: "🌐" },
    Language { code: "hi", name: "हिंदी", flag: "🇮🇳" },
    Language { code: "te", name: "తెలుగు", flag: "🌾" },
];

/// Hindi, the default for speech input
pub const DEFAULT_SPEECH_LANGUAGE: &str = "hi";

pub fn find_language(code: &str) -> Option<Language> {
    LANGUAGES.iter().copied().find(|lang| lang.code == code)
}
