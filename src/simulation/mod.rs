//! Match simulation - the frame step, the headless match app and batch runs
//!
//! Runs matches without rendering, collecting per-team metrics.

pub mod app_builder;
pub mod config;
pub mod metrics;
pub mod parallel;
pub mod runner;
pub mod step;

pub use app_builder::HeadlessAppBuilder;
pub use config::{MATCH_SETTINGS_FILE, MATCH_SETTINGS_TEMPLATE, MatchConfig, game_mode};
pub use metrics::{BatchSummary, MatchMetrics, MatchResult, TeamStats};
pub use parallel::{init_parallel, run_matches_parallel};
pub use runner::{
    FrameGoal, MatchSetup, base_seed, collect_result, output_result, report_batch, run_batch,
    run_match, run_to_full_time,
};
pub use step::{MatchState, StepOutcome, resolve_contacts, step_frame};
