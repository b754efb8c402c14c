use crate::utils::sample_records;
use class_statistics::{Field, FieldKey, Ratio, Record, StatisticsEngine, StatsError};
mod utils;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let records = sample_records()?;
    let engine = StatisticsEngine::new();

    // Gamma = (Ash * Hue) / Magnesium
    let gamma = engine.compute(&records, &FieldKey::new("Alcohol"), &Ratio::gamma())?;
    for (class, stats) in &gamma {
        println!(
            "Class {} => Gamma mean {} median {:?} mode {:?}",
            class, stats.mean, stats.median, stats.mode
        );
    }

    // Any closure works as an extractor
    let ash_per_hue =
        |r: &Record| -> Result<f64, StatsError> { Ok(r.numeric("Ash")? / r.numeric("Hue")?) };
    let ratio = engine.compute(&records, &FieldKey::new("Alcohol"), &ash_per_hue)?;
    println!("Ash/Hue: {:?}", ratio);

    let ash = engine.compute(&records, &FieldKey::new("Alcohol"), &Field::new("Ash"))?;
    println!("Ash: {:?}", ash);

    Ok(())
}
