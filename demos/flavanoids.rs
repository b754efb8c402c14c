use crate::utils::sample_records;
use class_statistics::{Measure, StatsQuery, transpose};
mod utils;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let records = sample_records()?;

    // Mean, median and mode of Flavanoids per wine class
    let stats = StatsQuery::new(&records)
        .group_by("Alcohol")
        .field("Flavanoids")
        .execute()?;

    // One row per measure, one column per class
    for (measure, row) in transpose(&stats) {
        let cells: Vec<String> = row
            .iter()
            .map(|(class, v)| match v {
                Some(v) => format!("Class {}: {}", class, v),
                None => format!("Class {}: N/A", class),
            })
            .collect();
        println!("Flavanoids {:<6} | {}", measure, cells.join(" | "));
    }

    let class_1 = &stats["1"];
    println!("Class 1 median: {:?}", class_1.get(Measure::Median));

    Ok(())
}
