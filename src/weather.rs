//! Weather Estimator
//!
//! Synthetic weather for a coordinate pair. Temperature and humidity are
//! deterministic trig functions of the coordinates; the sky description and
//! icon code are random picks from fixed tables.
//!
//! By default the description and the icon are drawn independently, so a
//! reading can say "Light rain" with a clear-sky icon. [`ConditionDraw::Paired`]
//! uses one draw for both tables when matched output is wanted.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DESCRIPTIONS: [&str; 4] = ["Clear sky", "Partly cloudy", "Light rain", "Sunny"];
pub const ICON_CODES: [&str; 4] = ["01d", "02d", "10d", "01d"];

/// One weather observation for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    #[serde(rename = "location")]
    pub location_label: String,
    #[serde(rename = "temperature")]
    pub temperature_c: f64,
    #[serde(rename = "humidity")]
    pub humidity_pct: f64,
    pub description: String,
    #[serde(rename = "icon")]
    pub icon_code: String,
}

/// How description and icon are picked from their tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionDraw {
    /// Two unrelated uniform draws
    #[default]
    Independent,
    /// A single draw indexes both tables
    Paired,
}

pub fn temperature_at(lat: f64) -> f64 {
    25.0 + lat.sin() * 5.0
}

pub fn humidity_at(lng: f64) -> f64 {
    60.0 + lng.cos() * 10.0
}

pub fn location_label(lat: f64, lng: f64) -> String {
    format!("Farm at {:.2}, {:.2}", lat, lng)
}

/// Estimate weather at `(lat, lng)` using the thread-local RNG
pub fn estimate_weather(lat: f64, lng: f64) -> WeatherReading {
    estimate_weather_with(lat, lng, ConditionDraw::Independent, &mut rand::thread_rng())
}

/// Estimate weather with an explicit draw mode and random source
pub fn estimate_weather_with<R: Rng + ?Sized>(
    lat: f64,
    lng: f64,
    draw: ConditionDraw,
    rng: &mut R,
) -> WeatherReading {
    let (description_idx, icon_idx) = match draw {
        ConditionDraw::Independent => (
            rng.gen_range(0..DESCRIPTIONS.len()),
            rng.gen_range(0..ICON_CODES.len()),
        ),
        ConditionDraw::Paired => {
            let idx = rng.gen_range(0..DESCRIPTIONS.len());
            (idx, idx)
        }
    };

    WeatherReading {
        location_label: location_label(lat, lng),
        temperature_c: temperature_at(lat),
        humidity_pct: humidity_at(lng),
        description: DESCRIPTIONS[description_idx].to_string(),
        icon_code: ICON_CODES[icon_idx].to_string(),
    }
}

/// OpenWeatherMap image URL for an icon code
pub fn weather_icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/wn/{}@2x.png", icon)
}
