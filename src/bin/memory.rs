use class_statistics::{Record, StatsQuery};

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

/// Deterministic wine-like rows, three classes
fn synthetic_records(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            let class = (i % 3 + 1) as i64;
            let step = (i % 97) as f64;
            Record::new()
                .with("Alcohol", class)
                .with("Flavanoids", 0.3 + step * 0.05)
                .with("Ash", 1.4 + (i % 13) as f64 * 0.1)
                .with("Hue", 0.5 + (i % 11) as f64 * 0.1)
                .with("Magnesium", 70 + (i % 90) as i64)
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let records = synthetic_records(1_000_000);

    let _profiler = dhat::Profiler::new_heap();

    let flavanoids = StatsQuery::new(&records)
        .group_by("Alcohol")
        .field("Flavanoids")
        .execute()?;
    let gamma = StatsQuery::new(&records).group_by("Alcohol").gamma().execute()?;

    println!("Flavanoids: {:?}", flavanoids);
    println!("Gamma: {:?}", gamma);
    println!("Memory benchmark finished. See dhat-heap.json for details");

    Ok(())
}
