//! Strikers - 2v2 arcade hockey/soccer simulation
//!
//! Main entry point: plays one headless match with logging and prints the
//! result as JSON.
//!
//! Usage:
//!   cargo run -- --help
//!   cargo run -- --mode legacy --duration 60
//!   cargo run -- --obstacles classic --seed 7 --output result.json

use strikers::simulation::{
    HeadlessAppBuilder, MatchConfig, base_seed, collect_result, output_result, run_to_full_time,
};

fn main() {
    let config = MatchConfig::from_args();
    let seed = base_seed(&config);

    let mut app = HeadlessAppBuilder::new(config.clone(), seed)
        .with_logging()
        .without_event_history()
        .build();
    run_to_full_time(&mut app, &config);

    let result = collect_result(app.world());
    if let Err(e) = output_result(&result, &config) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
