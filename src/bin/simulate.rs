//! Batch Simulation Tool - headless matches for comparing controllers
//!
//! Run many matches without rendering and summarize wins and scores.
//!
//! Usage:
//!   cargo run --bin simulate -- --help
//!   cargo run --bin simulate -- --matches 50 --right legacy
//!   cargo run --bin simulate -- --matches 200 --parallel 8 --obstacles scattered:3
//!   cargo run --bin simulate -- --matches 20 --output-dir results

use std::path::Path;

use strikers::simulation::{MatchConfig, report_batch, run_batch};

fn main() {
    let mut config = MatchConfig::from_args();

    // --output-dir <DIR> writes a timestamped results file into DIR
    let args: Vec<String> = std::env::args().collect();
    if let Some(dir) = args
        .iter()
        .position(|a| a == "--output-dir")
        .and_then(|i| args.get(i + 1))
    {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Failed to create {}: {}", dir, e);
            std::process::exit(1);
        }
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string();
        let path = Path::new(dir).join(format!("batch_{}.json", timestamp));
        config.output_file = Some(path.to_string_lossy().to_string());
    }

    let results = run_batch(&config);
    if let Err(e) = report_batch(&results, &config) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
