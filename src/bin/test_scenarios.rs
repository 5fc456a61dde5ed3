//! Scenario runner CLI
//!
//! Usage:
//!   cargo run --bin test-scenarios                  # Run all scenarios
//!   cargo run --bin test-scenarios -- shoot         # Run scenarios whose file name contains "shoot"
//!   cargo run --bin test-scenarios -- --verbose     # Show expected/actual on failure

use std::path::{Path, PathBuf};

use strikers::testing::{SCENARIOS_DIR, ScenarioResult, parse_scenario_file, run_scenario};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let filter = args.iter().find(|a| !a.starts_with('-')).cloned();

    let dir = Path::new(SCENARIOS_DIR);
    let files = match scenario_files(dir, filter.as_deref()) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    if files.is_empty() {
        println!("No scenarios matched in {}", dir.display());
        std::process::exit(1);
    }

    println!("Running {} scenarios from {}\n", files.len(), dir.display());

    let mut failures = 0;
    for path in &files {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let result = match parse_scenario_file(path) {
            Ok(scenario) => run_scenario(&scenario),
            Err(message) => ScenarioResult::Error { message },
        };
        if !result.is_pass() {
            failures += 1;
        }
        report(&name, &result, verbose);
    }

    println!(
        "\n{} passed, {} failed",
        files.len() - failures,
        failures
    );
    if failures > 0 {
        std::process::exit(1);
    }
}

/// `.toml` files directly under `dir`, sorted, optionally filtered by name
fn scenario_files(dir: &Path, filter: Option<&str>) -> Result<Vec<PathBuf>, String> {
    let entries =
        std::fs::read_dir(dir).map_err(|e| format!("Failed to read {}: {}", dir.display(), e))?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .filter(|path| match filter {
            Some(f) => path.file_name().is_some_and(|n| n.to_string_lossy().contains(f)),
            None => true,
        })
        .collect();
    files.sort();
    Ok(files)
}

fn report(name: &str, result: &ScenarioResult, verbose: bool) {
    match result {
        ScenarioResult::Pass { frames } => println!("  ok    {:<36} ({} frames)", name, frames),
        ScenarioResult::Fail { error } => {
            println!("  FAIL  {}", name);
            if verbose {
                println!("        {}", error);
            } else {
                println!("        {}", error.message);
            }
        }
        ScenarioResult::Error { message } => {
            println!("  ERROR {}", name);
            println!("        {}", message);
        }
    }
}
