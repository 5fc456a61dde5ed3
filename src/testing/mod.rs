//! Scenario testing system for deterministic match testing
//!
//! Runs TOML-described situations through the headless match app and
//! checks event sequences and match state.

pub mod assertions;
pub mod parser;
pub mod runner;

pub use assertions::{AssertionError, check_sequence, check_state};
pub use parser::{
    AgentDef, BallDef, ExpectedEvent, FieldDef, FrameInput, ObstacleDef, PlayerDef,
    ScenarioDefinition, ScenarioExpectations, ScenarioSetup, StateAssertion, parse_scenario_file,
};
pub use runner::{ScenarioResult, build_match, run_scenario};

/// Default path for scenarios, relative to the crate root
pub const SCENARIOS_DIR: &str = "scenarios";
