//! Match configuration

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::ControlMode;
use crate::constants::*;
use crate::world::{Field, ObstacleLayout};

/// Configuration for a match or a batch of matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Match length in seconds (menu offers 60/120/180/300)
    pub duration_secs: f32,
    /// Who drives the left team
    pub left: ControlMode,
    /// Who drives the right team
    pub right: ControlMode,
    pub obstacles: ObstacleLayout,
    pub field_width: f32,
    pub field_height: f32,
    pub goal_height: f32,
    pub goal_depth: f32,
    /// Agent reaction speed multiplier
    pub reaction_speed: f32,
    /// RNG seed for obstacle generation (None = random)
    pub seed: Option<u64>,
    /// Headless frame rate
    pub fps: f32,
    /// Number of matches for batch runs
    pub matches: u32,
    /// Number of parallel threads (0 = sequential, N = N threads)
    pub parallel: usize,
    /// Output file path (None = stdout)
    pub output_file: Option<String>,
    /// Suppress progress output
    pub quiet: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_MATCH_DURATION,
            left: ControlMode::Agent,
            right: ControlMode::Agent,
            obstacles: ObstacleLayout::Empty,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            goal_height: GOAL_HEIGHT,
            goal_depth: GOAL_DEPTH,
            reaction_speed: AI_REACTION_SPEED,
            seed: None,
            fps: DEFAULT_SIM_FPS,
            matches: 1,
            parallel: 0,
            output_file: None,
            quiet: false,
        }
    }
}

/// Template match settings (checked into git)
pub const MATCH_SETTINGS_TEMPLATE: &str = "config/match_settings.template.json";
/// Local match settings (gitignored, user's custom settings)
pub const MATCH_SETTINGS_FILE: &str = "config/match_settings.json";

impl MatchConfig {
    /// Load configuration from a JSON settings file
    pub fn from_file(path: &str) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", path, e))
    }

    /// Write configuration as pretty JSON
    pub fn save(&self, path: &str) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("Failed to write {}: {}", path, e))
    }

    /// Load configuration from default config files
    /// Priority: local settings > template settings > built-in defaults
    pub fn from_config_files() -> Self {
        if let Ok(config) = Self::from_file(MATCH_SETTINGS_FILE) {
            return config;
        }
        if let Ok(config) = Self::from_file(MATCH_SETTINGS_TEMPLATE) {
            return config;
        }
        Self::default()
    }

    /// Parse configuration from the process command line
    pub fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        if args.iter().any(|a| a == "--help" || a == "-h") {
            print_help();
            std::process::exit(0);
        }
        let config = Self::from_arg_list(&args, Self::from_config_files());
        if let Some(path) = args.windows(2).find(|w| w[0] == "--save-settings").map(|w| &w[1]) {
            match config.save(path) {
                Ok(()) => info!("Saved settings to {}", path),
                Err(e) => warn!("{}", e),
            }
        }
        config
    }

    /// Apply `--settings` and then every command line override on top of `base`.
    /// `args[0]` is the program name.
    pub fn from_arg_list(args: &[String], base: Self) -> Self {
        let mut config = base;

        // Explicit settings file replaces the base before overrides
        let mut i = 1;
        while i < args.len() {
            if args[i] == "--settings" && i + 1 < args.len() {
                match Self::from_file(&args[i + 1]) {
                    Ok(loaded) => config = loaded,
                    Err(e) => warn!("{}", e),
                }
                break;
            }
            i += 1;
        }

        i = 1;
        while i < args.len() {
            let value = args.get(i + 1).map(String::as_str);
            match (args[i].as_str(), value) {
                ("--settings", Some(_)) => {
                    i += 1;
                }
                ("--duration", Some(v)) => {
                    match v.parse::<f32>() {
                        Ok(secs) if secs > 0.0 => {
                            if !MATCH_DURATION_CHOICES.contains(&secs) {
                                info!("Using non-standard match duration {}s", secs);
                            }
                            config.duration_secs = secs;
                        }
                        _ => warn!("Ignoring invalid duration '{}'", v),
                    }
                    i += 1;
                }
                ("--left", Some(v)) => {
                    match ControlMode::parse(v) {
                        Some(mode) => config.left = mode,
                        None => warn!("Unknown control mode '{}'", v),
                    }
                    i += 1;
                }
                ("--right", Some(v)) => {
                    match ControlMode::parse(v) {
                        Some(mode) => config.right = mode,
                        None => warn!("Unknown control mode '{}'", v),
                    }
                    i += 1;
                }
                ("--mode", Some(v)) => {
                    match game_mode(v) {
                        Some((left, right)) => {
                            config.left = left;
                            config.right = right;
                        }
                        None => warn!("Unknown game mode '{}'", v),
                    }
                    i += 1;
                }
                ("--obstacles", Some(v)) => {
                    match ObstacleLayout::parse(v) {
                        Some(layout) => config.obstacles = layout,
                        None => warn!("Unknown obstacle layout '{}'", v),
                    }
                    i += 1;
                }
                ("--seed", Some(v)) => {
                    config.seed = v.parse().ok();
                    i += 1;
                }
                ("--fps", Some(v)) => {
                    config.fps = v.parse().unwrap_or(DEFAULT_SIM_FPS).max(1.0);
                    i += 1;
                }
                ("--matches", Some(v)) => {
                    config.matches = v.parse::<u32>().unwrap_or(1).max(1);
                    i += 1;
                }
                ("--parallel", Some(v)) => {
                    config.parallel = v.parse().unwrap_or(0);
                    i += 1;
                }
                ("--output", Some(v)) => {
                    config.output_file = Some(v.to_string());
                    i += 1;
                }
                ("--save-settings", Some(_)) => {
                    i += 1;
                }
                ("--quiet" | "-q", _) => {
                    config.quiet = true;
                }
                _ => {}
            }
            i += 1;
        }

        config
    }

    /// Build the field, including the configured obstacle layout
    pub fn build_field(&self, seed: u64) -> Field {
        let mut field = Field::new(self.field_width, self.field_height)
            .with_goal(self.goal_height, self.goal_depth);
        for obstacle in self.obstacles.build(&field, seed) {
            field.add_obstacle(obstacle);
        }
        field
    }

    /// Fixed time step for headless runs
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps.max(1.0)
    }
}

/// Named game modes: (left, right) controllers
pub fn game_mode(name: &str) -> Option<(ControlMode, ControlMode)> {
    match name.trim().to_lowercase().as_str() {
        "vs-ai" | "play" => Some((ControlMode::Human, ControlMode::Agent)),
        "pvp" => Some((ControlMode::Human, ControlMode::Human)),
        "observer" | "watch" => Some((ControlMode::Agent, ControlMode::Agent)),
        "legacy" => Some((ControlMode::Agent, ControlMode::Legacy)),
        _ => None,
    }
}

fn print_help() {
    println!(
        r#"Strikers - headless arcade hockey/soccer simulation

USAGE:
    cargo run --bin strikers -- [OPTIONS]
    cargo run --bin simulate -- [OPTIONS]

OPTIONS:
    --settings <FILE>    Load settings from JSON file (CLI args override file settings)
    --duration <SECS>    Match length in seconds (60, 120, 180, 300; default: 120)
    --left <MODE>        Left team control: human, agent, legacy (default: agent)
    --right <MODE>       Right team control: human, agent, legacy (default: agent)
    --mode <NAME>        Game mode: vs-ai, pvp, observer, legacy
    --obstacles <LAYOUT> empty, classic, scattered[:N] (default: empty)
    --seed <N>           RNG seed for obstacle generation
    --fps <N>            Simulation frame rate (default: 60)
    --matches <N>        Number of matches (simulate only)
    --parallel <N>       Run matches in parallel with N threads (simulate only)
    --output <FILE>      Output JSON to file (default: stdout)
    --output-dir <DIR>   Write a timestamped batch file into DIR (simulate only)
    --save-settings <FILE> Write the effective settings (after overrides) as JSON
    --quiet, -q          Suppress progress output
    --help, -h           Show this help

SETTINGS FILE FORMAT (JSON):
    {{
      "duration_secs": 120.0,
      "left": "agent",
      "right": "legacy",
      "obstacles": "classic",
      "matches": 20,
      "parallel": 4
    }}
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("strikers")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_cli_overrides() {
        let config = MatchConfig::from_arg_list(
            &args(&[
                "--duration", "60", "--left", "human", "--right", "legacy",
                "--obstacles", "scattered:3", "--seed", "42", "-q",
            ]),
            MatchConfig::default(),
        );
        assert_eq!(config.duration_secs, 60.0);
        assert_eq!(config.left, ControlMode::Human);
        assert_eq!(config.right, ControlMode::Legacy);
        assert_eq!(config.obstacles, ObstacleLayout::Scattered { pairs: 3 });
        assert_eq!(config.seed, Some(42));
        assert!(config.quiet);
    }

    #[test]
    fn test_invalid_values_keep_base() {
        let config = MatchConfig::from_arg_list(
            &args(&["--duration", "-5", "--left", "robot", "--obstacles", "maze"]),
            MatchConfig::default(),
        );
        assert_eq!(config, MatchConfig::default());
    }

    #[test]
    fn test_game_mode_sets_both_sides() {
        let config = MatchConfig::from_arg_list(&args(&["--mode", "pvp"]), MatchConfig::default());
        assert_eq!(config.left, ControlMode::Human);
        assert_eq!(config.right, ControlMode::Human);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MatchConfig =
            serde_json::from_str(r#"{ "duration_secs": 180.0, "right": "legacy" }"#).unwrap();
        assert_eq!(config.duration_secs, 180.0);
        assert_eq!(config.right, ControlMode::Legacy);
        assert_eq!(config.left, ControlMode::Agent);
        assert_eq!(config.fps, DEFAULT_SIM_FPS);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = MatchConfig::from_file("does/not/exist.json").unwrap_err();
        assert!(err.starts_with("Failed to read"));
    }

    #[test]
    fn test_saved_settings_load_back() {
        let path = std::env::temp_dir().join(format!("strikers_settings_{}.json", std::process::id()));
        let path = path.to_string_lossy().to_string();
        let config = MatchConfig::from_arg_list(
            &args(&["--right", "legacy", "--obstacles", "classic", "--duration", "180", "--save-settings", "ignored.json"]),
            MatchConfig::default(),
        );

        config.save(&path).unwrap();
        let loaded = MatchConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
        assert_eq!(loaded.right, ControlMode::Legacy);
        assert_eq!(loaded.obstacles, ObstacleLayout::Classic);
    }

    #[test]
    fn test_build_field_with_classic_layout() {
        let config = MatchConfig {
            obstacles: ObstacleLayout::Classic,
            ..Default::default()
        };
        let field = config.build_field(0);
        assert_eq!(field.obstacles().len(), 2);
        assert_eq!(field.width, FIELD_WIDTH);
    }
}
