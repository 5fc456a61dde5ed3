//! TOML scenario file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::ai::ControlMode;
use crate::constants::*;
use crate::world::ObstacleLayout;

/// Complete scenario definition from a TOML file
#[derive(Debug, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,
    pub description: Option<String>,
    /// Simulation frames to run after setup
    #[serde(default = "default_frames")]
    pub frames: u64,
    /// Frame rate (each frame is `1 / fps` seconds, clamped to the max frame dt)
    #[serde(default = "default_fps")]
    pub fps: f32,
    #[serde(default)]
    pub setup: ScenarioSetup,
    #[serde(default)]
    pub input: Vec<FrameInput>,
    #[serde(default)]
    pub expect: ScenarioExpectations,
}

fn default_frames() -> u64 {
    60
}

fn default_fps() -> f32 {
    DEFAULT_SIM_FPS
}

/// Initial match state. Anything left out comes from a normal kickoff.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScenarioSetup {
    pub field: FieldDef,
    pub left: ControlMode,
    pub right: ControlMode,
    /// Generated layout, added before explicit obstacles
    pub layout: ObstacleLayout,
    pub seed: u64,
    pub obstacles: Vec<ObstacleDef>,
    pub ball: Option<BallDef>,
    pub players: Vec<PlayerDef>,
    pub left_agent: Option<AgentDef>,
    pub right_agent: Option<AgentDef>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FieldDef {
    pub width: f32,
    pub height: f32,
    pub goal_height: f32,
    pub goal_depth: f32,
}

impl Default for FieldDef {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            goal_height: GOAL_HEIGHT,
            goal_depth: GOAL_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObstacleDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BallDef {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub velocity_x: f32,
    #[serde(default)]
    pub velocity_y: f32,
}

/// Player placement. `id` defaults to `<team>_<index>` ("left_0").
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerDef {
    pub id: Option<String>,
    pub team: String,
    pub index: usize,
    pub x: f32,
    pub y: f32,
}

impl PlayerDef {
    pub fn id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("{}_{}", self.team, self.index))
    }
}

/// Agent memory overrides
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AgentDef {
    pub reaction_speed: Option<f32>,
    pub possession_timer: f32,
    pub pass_cooldown: f32,
    pub shot_cooldown: f32,
}

/// Input for one team, applied at `frame` and held until changed
#[derive(Debug, Clone, Deserialize)]
pub struct FrameInput {
    pub frame: u64,
    pub team: String,
    #[serde(default)]
    pub move_x: f32,
    #[serde(default)]
    pub move_y: f32,
    #[serde(default)]
    pub swap: bool,
}

/// Expected scenario outcomes
#[derive(Debug, Default, Deserialize)]
pub struct ScenarioExpectations {
    #[serde(default)]
    pub sequence: Vec<ExpectedEvent>,
    /// Multiple state assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
}

/// Expected event in sequence
#[derive(Debug, Deserialize)]
pub struct ExpectedEvent {
    pub event: String,
    pub team: Option<String>,
    pub frame_min: Option<u64>,
    pub frame_max: Option<u64>,
}

/// State assertion after a frame
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
}

/// Parse a scenario file from path
pub fn parse_scenario_file(path: &Path) -> Result<ScenarioDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let toml = r#"
name = "Test"
frames = 10

[setup]
right = "legacy"
layout = "classic"

[setup.ball]
x = 20.0
y = 10.0
velocity_x = 3.0

[[setup.players]]
team = "left"
index = 0
x = 12.0
y = 9.0

[setup.left_agent]
possession_timer = 1.0

[[input]]
frame = 2
team = "left"
move_x = 1.0

[[expect.state]]
after_frame = 10
checks = ["ball.x > 20"]
"#;
        let def: ScenarioDefinition = toml::from_str(toml).unwrap();
        assert_eq!(def.name, "Test");
        assert_eq!(def.frames, 10);
        assert_eq!(def.fps, DEFAULT_SIM_FPS);
        assert_eq!(def.setup.left, ControlMode::Agent);
        assert_eq!(def.setup.right, ControlMode::Legacy);
        assert_eq!(def.setup.layout, ObstacleLayout::Classic);
        assert_eq!(def.setup.field.width, FIELD_WIDTH);
        assert_eq!(def.setup.players[0].id(), "left_0");
        assert_eq!(def.setup.left_agent.as_ref().map(|a| a.possession_timer), Some(1.0));
        assert_eq!(def.input[0].move_x, 1.0);
        assert_eq!(def.expect.state[0].checks.len(), 1);
    }

    #[test]
    fn test_minimal_file() {
        let def: ScenarioDefinition = toml::from_str("name = \"Kickoff\"").unwrap();
        assert_eq!(def.frames, 60);
        assert!(def.setup.ball.is_none());
        assert!(def.expect.sequence.is_empty());
    }
}
