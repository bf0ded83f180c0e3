//! Crop calendar projection
//!
//! Turns a crop's season and growth period into a 12-month strip of
//! sowing / growing / harvest marks for timeline displays.
//!
//! Start months: Kharif June, Rabi November, Zaid April, year-round the
//! caller's current month. Duration is `ceil(growth_days / 30)` months,
//! capped at 6 for year-round crops.
//!
//! Kharif and Zaid windows stop at December (truncated). Rabi and year-round
//! windows wrap into the next year.

use crate::catalog::CropDefinition;
use crate::season::CropSeason;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const YEAR_ROUND_MAX_MONTHS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarPhase {
    #[default]
    None,
    Sowing,
    Growing,
    Harvest,
}

impl CalendarPhase {
    pub fn label(&self) -> &'static str {
        match self {
            CalendarPhase::None => "",
            CalendarPhase::Sowing => "Sowing",
            CalendarPhase::Growing => "Growing",
            CalendarPhase::Harvest => "Harvest",
        }
    }
}

/// Month strip indexed 0 = January
pub type Timeline = [CalendarPhase; 12];

/// One crop's row in a calendar view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineRow {
    pub crop: String,
    pub months: Timeline,
}

fn months_for(growth_days: u32) -> u32 {
    growth_days.div_ceil(30)
}

fn phase_at(i: u32, duration: u32) -> CalendarPhase {
    if i == 0 {
        CalendarPhase::Sowing
    } else if i + 1 == duration {
        CalendarPhase::Harvest
    } else {
        CalendarPhase::Growing
    }
}

/// Project the growing window of `crop`; `today` only matters for year-round crops
pub fn project_timeline(crop: &CropDefinition, today: NaiveDate) -> Timeline {
    let mut months = [CalendarPhase::None; 12];
    let duration = months_for(crop.growth_days);

    match crop.season {
        CropSeason::Kharif | CropSeason::Zaid => {
            let start = if crop.season == CropSeason::Kharif { 5 } else { 3 };
            for i in (0..duration).take_while(|i| i + start < 12) {
                months[(i + start) as usize] = phase_at(i, duration);
            }
        }
        CropSeason::Rabi | CropSeason::YearRound => {
            let (start, duration) = if crop.season == CropSeason::Rabi {
                (10, duration)
            } else {
                (today.month0(), duration.min(YEAR_ROUND_MAX_MONTHS))
            };
            // Windows longer than a year overwrite earlier marks
            for i in 0..duration {
                months[((i + start) % 12) as usize] = phase_at(i, duration);
            }
        }
    }

    months
}

/// Timeline rows for a list of crops, in the given order
pub fn timeline_rows<'a, I>(crops: I, today: NaiveDate) -> Vec<TimelineRow>
where
    I: IntoIterator<Item = &'a CropDefinition>,
{
    crops
        .into_iter()
        .map(|crop| TimelineRow {
            crop: crop.name.clone(),
            months: project_timeline(crop, today),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{TemperatureBand, WaterRequirement};
    use super::CalendarPhase::{Growing, Harvest, Sowing};

    fn crop(season: CropSeason, growth_days: u32) -> CropDefinition {
        CropDefinition {
            name: "Test".to_string(),
            growth_days,
            expected_yield: String::new(),
            description: String::new(),
            water_requirement: WaterRequirement::Medium,
            temperature: TemperatureBand { min: 10.0, max: 30.0 },
            profit_potential: String::new(),
            ideal_soil_types: vec![],
            season,
            image_url: String::new(),
        }
    }

    fn date(month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, 10).unwrap()
    }

    fn marked(timeline: &Timeline) -> Vec<(usize, CalendarPhase)> {
        timeline
            .iter()
            .enumerate()
            .filter(|(_, p)| **p != CalendarPhase::None)
            .map(|(i, p)| (i, *p))
            .collect()
    }

    #[test]
    fn test_rabi_wraps_year() {
        let t = project_timeline(&crop(CropSeason::Rabi, 90), date(1));
        assert_eq!(marked(&t), vec![(0, Harvest), (10, Sowing), (11, Growing)]);
    }

    #[test]
    fn test_kharif_window() {
        // 130 days -> 5 months, June..October
        let t = project_timeline(&crop(CropSeason::Kharif, 130), date(1));
        assert_eq!(
            marked(&t),
            vec![(5, Sowing), (6, Growing), (7, Growing), (8, Growing), (9, Harvest)]
        );
    }

    #[test]
    fn test_kharif_truncates_at_december() {
        // 365 days -> 13 months, only June..December kept, no harvest mark
        let t = project_timeline(&crop(CropSeason::Kharif, 365), date(1));
        let m = marked(&t);
        assert_eq!(m.len(), 7);
        assert_eq!(m[0], (5, Sowing));
        assert!(m[1..].iter().all(|(_, p)| *p == Growing));
        assert_eq!(t[0], CalendarPhase::None);
    }

    #[test]
    fn test_zaid_window() {
        let t = project_timeline(&crop(CropSeason::Zaid, 60), date(1));
        assert_eq!(marked(&t), vec![(3, Sowing), (4, Harvest)]);
    }

    #[test]
    fn test_year_round_uses_today_and_caps() {
        // Sugarcane-like: 365 days capped to 6 months starting in September
        let t = project_timeline(&crop(CropSeason::YearRound, 365), date(9));
        assert_eq!(
            marked(&t),
            vec![(0, Growing), (1, Harvest), (8, Sowing), (9, Growing), (10, Growing), (11, Growing)]
        );
    }

    #[test]
    fn test_single_month_is_sowing() {
        let t = project_timeline(&crop(CropSeason::Zaid, 20), date(1));
        assert_eq!(marked(&t), vec![(3, Sowing)]);
    }

    #[test]
    fn test_rows_keep_order() {
        let crops = [crop(CropSeason::Rabi, 90), crop(CropSeason::Zaid, 60)];
        let rows = timeline_rows(crops.iter(), date(1));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].months[3], Sowing);
    }
}
