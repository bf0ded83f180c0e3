//! Indian agricultural seasons
//!
//! - Kharif: June to October (monsoon-sown)
//! - Rabi: November to March (winter-sown)
//! - Zaid: April to May (summer-sown)
//!
//! The resolver takes the date from the caller; nothing here reads the clock.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Growing season resolved from a calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Kharif,
    Rabi,
    Zaid,
}

impl Season {
    /// Resolve from a 0-indexed month (0 = January)
    pub fn from_month_index(month0: u32) -> Self {
        match month0 {
            5..=9 => Season::Kharif,
            3 | 4 => Season::Zaid,
            _ => Season::Rabi,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Zaid => "Zaid",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Season of `date`
pub fn current_season(date: NaiveDate) -> Season {
    Season::from_month_index(date.month0())
}

/// Season a catalog crop is grown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropSeason {
    Kharif,
    Rabi,
    Zaid,
    #[serde(rename = "Year-round")]
    YearRound,
}

impl CropSeason {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Kharif" => Some(CropSeason::Kharif),
            "Rabi" => Some(CropSeason::Rabi),
            "Zaid" => Some(CropSeason::Zaid),
            "Year-round" => Some(CropSeason::YearRound),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CropSeason::Kharif => "Kharif",
            CropSeason::Rabi => "Rabi",
            CropSeason::Zaid => "Zaid",
            CropSeason::YearRound => "Year-round",
        }
    }

    /// Exact label match, or any season for year-round crops.
    ///
    /// Unknown labels simply never match a seasonal crop.
    pub fn matches(&self, season: &str) -> bool {
        *self == CropSeason::YearRound || self.label() == season
    }
}

impl From<Season> for CropSeason {
    fn from(season: Season) -> Self {
        match season {
            Season::Kharif => CropSeason::Kharif,
            Season::Rabi => CropSeason::Rabi,
            Season::Zaid => CropSeason::Zaid,
        }
    }
}

impl fmt::Display for CropSeason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
