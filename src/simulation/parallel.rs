//! Parallel simulation execution
//!
//! Uses Rayon to run multiple matches concurrently.
//! Each match runs in its own Bevy app with minimal threading
//! to avoid hitting OS thread limits.

use rayon::prelude::*;

use super::config::MatchConfig;
use super::metrics::MatchResult;
use super::runner::run_match;

/// Initialize the global Rayon pool with the given thread count.
/// Call this once at startup before running parallel simulations.
pub fn init_parallel(threads: usize) -> Result<(), String> {
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| format!("Failed to initialize Rayon thread pool: {}", e))?;
    }
    // If threads == 0, use Rayon's default (auto-detect)
    Ok(())
}

/// Run `count` matches in parallel
///
/// Match `i` uses seed `base_seed + i`, so results match a sequential run
/// and come back in the same order.
pub fn run_matches_parallel(config: &MatchConfig, count: u32, base_seed: u64) -> Vec<MatchResult> {
    let mut config = config.clone();
    // Forces minimal threads inside each app
    config.parallel = config.parallel.max(1);

    (0..count)
        .into_par_iter()
        .map(|i| run_match(&config, base_seed.wrapping_add(i as u64)))
        .collect()
}
