//! Print the advisor report for every sample field
//!
//! Usage: field_report [YYYY-MM-DD] [seed]
//!
//! Without a date, today's local date is used. A seed makes the weather
//! draws reproducible. `CROP_CATALOG` swaps in a catalog file.

use anyhow::Context;
use chrono::NaiveDate;
use crop_scorer_rust::calendar::MONTH_LABELS;
use crop_scorer_rust::weather::weather_icon_url;
use crop_scorer_rust::{sample_locations, FieldAdvisor, GrowingConditions, ServerConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);

    let today = match args.next() {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw))?,
        None => chrono::Local::now().date_naive(),
    };

    let mut rng = match args.next() {
        Some(raw) => {
            let seed: u64 = raw
                .parse()
                .with_context(|| format!("Invalid seed '{}'", raw))?;
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let catalog = ServerConfig::from_env()
        .load_catalog()
        .context("Failed to load crop catalog")?;
    println!("Loaded {} crops\n", catalog.len());

    let advisor = FieldAdvisor::new(catalog);
    let start = Instant::now();

    for field in sample_locations() {
        let report = advisor.report_for_field(&field, today, &mut rng);

        println!("{}", "=".repeat(70));
        println!("{} ({})", field.name, field.coordinates_label());
        println!("{}", "=".repeat(70));
        println!(
            "Weather: {:.1}°C, {:.0}% humidity, {} [{}]",
            report.weather.temperature_c,
            report.weather.humidity_pct,
            report.weather.description,
            weather_icon_url(&report.weather.icon_code)
        );
        println!(
            "Soil:    {} (pH {:.1}) N:{} P:{} K:{} OM:{}",
            report.soil.soil_type,
            report.soil.ph,
            report.soil.nitrogen,
            report.soil.phosphorus,
            report.soil.potassium,
            report.soil.organic_matter
        );
        println!("Season:  {} ({})", report.season, today);

        let conditions = GrowingConditions::new(
            report.soil.clone(),
            report.weather.temperature_c,
            report.weather.humidity_pct,
            report.season.label(),
        );

        if report.suggestions.is_empty() {
            println!("\nNo crop scores above the confidence threshold.\n");
            continue;
        }

        println!("\n{:<12} {:>5}  {:>4} {:>4} {:>4} {:>4}", "Crop", "Conf", "Soil", "Temp", "Watr", "Seas");
        for suggestion in &report.suggestions {
            let points = advisor.scorer().breakdown(&suggestion.crop, &conditions);
            println!(
                "{:<12} {:>4}%  {:>4} {:>4} {:>4} {:>4}",
                suggestion.crop.name,
                suggestion.confidence,
                points.soil,
                points.temperature,
                points.water,
                points.season
            );
        }

        println!("\n{:<12} {}", "", MONTH_LABELS.join(" "));
        for row in &report.calendar {
            let cells: Vec<String> = row
                .months
                .iter()
                .map(|phase| format!("{:<3}", phase.label().chars().take(3).collect::<String>()))
                .collect();
            println!("{:<12} {}", row.crop, cells.join(" "));
        }
        println!();
    }

    println!("Reports generated in {:.2?}", start.elapsed());
    Ok(())
}
