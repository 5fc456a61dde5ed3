//! Scenario execution engine

use bevy::prelude::*;
use std::collections::HashMap;

use crate::ai::TeamController;
use crate::constants::*;
use crate::events::EventBus;
use crate::input::PlayerInput;
use crate::player::TeamSide;
use crate::simulation::{HeadlessAppBuilder, MatchConfig, MatchState};
use crate::world::{Field, Obstacle};

use super::assertions::{
    AssertionError, BallState, CapturedEvent, PlayerState, TeamState, WorldState, check_sequence,
    check_state,
};
use super::parser::{AgentDef, FrameInput, ScenarioDefinition, ScenarioSetup};

/// Result of running a scenario
#[derive(Debug)]
pub enum ScenarioResult {
    Pass { frames: u64 },
    Fail { error: AssertionError },
    Error { message: String },
}

impl ScenarioResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, ScenarioResult::Pass { .. })
    }
}

fn parse_side(team: &str) -> Result<TeamSide, String> {
    match team.trim().to_lowercase().as_str() {
        "left" => Ok(TeamSide::Left),
        "right" => Ok(TeamSide::Right),
        other => Err(format!("Unknown team '{}' (expected left or right)", other)),
    }
}

fn controller(setup: &ScenarioSetup, side: TeamSide) -> TeamController {
    let (mode, agent) = match side {
        TeamSide::Left => (setup.left, setup.left_agent.as_ref()),
        TeamSide::Right => (setup.right, setup.right_agent.as_ref()),
    };
    let reaction = agent
        .and_then(|a| a.reaction_speed)
        .unwrap_or(AI_REACTION_SPEED);
    TeamController::from_mode(mode, reaction)
}

fn apply_agent_def(state: &mut MatchState, side: TeamSide, def: &AgentDef) -> Result<(), String> {
    let agent = state
        .controller_mut(side)
        .agent_mut()
        .ok_or_else(|| format!("{} team has no agent memory to set up", side))?;
    agent.state.possession_timer = def.possession_timer;
    agent.state.pass_cooldown = def.pass_cooldown;
    agent.state.shot_cooldown = def.shot_cooldown;
    Ok(())
}

/// Build the initial match from a scenario setup.
/// Returns the state and the scenario id of every player.
pub fn build_match(setup: &ScenarioSetup) -> Result<(MatchState, HashMap<String, (TeamSide, usize)>), String> {
    let def = &setup.field;
    let mut field = Field::new(def.width, def.height).with_goal(def.goal_height, def.goal_depth);
    for obstacle in setup.layout.build(&field, setup.seed) {
        field.add_obstacle(obstacle);
    }
    for obstacle in &setup.obstacles {
        field.add_obstacle(Obstacle::new(
            Vec2::new(obstacle.x, obstacle.y),
            obstacle.width,
            obstacle.height,
        ));
    }

    let mut state = MatchState::new(
        field,
        controller(setup, TeamSide::Left),
        controller(setup, TeamSide::Right),
    );

    if let Some(ball) = &setup.ball {
        state.ball.reset(
            Vec2::new(ball.x, ball.y),
            Vec2::new(ball.velocity_x, ball.velocity_y),
        );
    }

    let mut ids = HashMap::new();
    for side in TeamSide::BOTH {
        for index in 0..2 {
            ids.insert(format!("{}_{}", side, index), (side, index));
        }
    }
    for player in &setup.players {
        let side = parse_side(&player.team)?;
        if player.index > 1 {
            return Err(format!("Player index {} out of range (0 or 1)", player.index));
        }
        ids.retain(|_, slot| *slot != (side, player.index));
        ids.insert(player.id(), (side, player.index));
        state.team_mut(side).players[player.index].position = Vec2::new(player.x, player.y);
    }

    if let Some(def) = &setup.left_agent {
        apply_agent_def(&mut state, TeamSide::Left, def)?;
    }
    if let Some(def) = &setup.right_agent {
        apply_agent_def(&mut state, TeamSide::Right, def)?;
    }

    Ok((state, ids))
}

/// Held input per team, fed one frame at a time
struct ScriptedInputs {
    inputs: Vec<FrameInput>,
    directions: [Vec2; 2],
}

impl ScriptedInputs {
    fn new(inputs: &[FrameInput]) -> Result<Self, String> {
        for input in inputs {
            parse_side(&input.team)?;
        }
        Ok(Self {
            inputs: inputs.to_vec(),
            directions: [Vec2::ZERO; 2],
        })
    }

    fn apply(&mut self, frame: u64, input: &mut PlayerInput) {
        for scripted in self.inputs.iter().filter(|i| i.frame == frame) {
            let Ok(side) = parse_side(&scripted.team) else {
                continue;
            };
            self.directions[side.index()] = Vec2::new(scripted.move_x, scripted.move_y);
            if scripted.swap {
                input.press_swap(side);
            }
        }
        for side in TeamSide::BOTH {
            input.set_direction(side, self.directions[side.index()]);
        }
    }
}

/// Run a single scenario and return the result
pub fn run_scenario(scenario: &ScenarioDefinition) -> ScenarioResult {
    let (state, ids) = match build_match(&scenario.setup) {
        Ok(built) => built,
        Err(message) => return ScenarioResult::Error { message },
    };
    let mut scripted = match ScriptedInputs::new(&scenario.input) {
        Ok(scripted) => scripted,
        Err(message) => return ScenarioResult::Error { message },
    };

    let max_frame = scenario
        .expect
        .state
        .iter()
        .map(|s| s.after_frame)
        .fold(scenario.frames, u64::max);

    // Long enough that the clock never ends the scenario
    let config = MatchConfig {
        duration_secs: max_frame as f32 * MAX_FRAME_DT + 60.0,
        fps: scenario.fps,
        left: scenario.setup.left,
        right: scenario.setup.right,
        ..Default::default()
    };
    let mut app = HeadlessAppBuilder::new(config, scenario.setup.seed)
        .with_state(state)
        .build();

    let mut captured = Vec::new();
    let mut seen = 0;
    let mut frame = 0;
    while frame < max_frame {
        scripted.apply(frame + 1, &mut app.world_mut().resource_mut::<PlayerInput>());
        app.update();

        // Updates that only initialize time do not count as frames
        if app.world().resource::<Time>().delta_secs() > 0.0 {
            frame += 1;
        }

        let bus = app.world().resource::<EventBus>();
        captured.extend(
            bus.history()
                .skip(seen)
                .map(|e| CapturedEvent::from_game_event(frame, &e.event)),
        );
        seen = captured.len();

        let world_state = extract_world_state(app.world(), &ids);
        for assertion in scenario.expect.state.iter().filter(|s| s.after_frame == frame) {
            if let Err(error) = check_state(assertion, &world_state) {
                return ScenarioResult::Fail { error };
            }
        }
    }

    if let Err(error) = check_sequence(&scenario.expect.sequence, &captured) {
        return ScenarioResult::Fail { error };
    }

    ScenarioResult::Pass { frames: frame }
}

/// Extract world state for assertions
fn extract_world_state(world: &World, ids: &HashMap<String, (TeamSide, usize)>) -> WorldState {
    let state = world.resource::<MatchState>();

    let players = ids
        .iter()
        .map(|(id, (side, index))| {
            let position = state.team(*side).players[*index].position;
            (
                id.clone(),
                PlayerState {
                    x: position.x,
                    y: position.y,
                },
            )
        })
        .collect();

    let teams = TeamSide::BOTH
        .into_iter()
        .map(|side| {
            let agent = state.controller(side).agent().map(|a| a.state);
            let team = TeamState {
                active_index: state.team(side).active_index,
                active_state: agent.map(|a| format!("{:?}", a.active_behavior)),
                support_state: agent.map(|a| format!("{:?}", a.support_behavior)),
                just_shot: agent.map(|a| a.just_shot),
                just_passed: agent.map(|a| a.just_passed),
                shot_cooldown: agent.map(|a| a.shot_cooldown),
                pass_cooldown: agent.map(|a| a.pass_cooldown),
                shot_target_y: agent.map(|a| a.shot_target.y),
            };
            (side.to_string(), team)
        })
        .collect();

    let (score_left, score_right) = state.score();
    WorldState {
        players,
        ball: BallState {
            x: state.ball.position.x,
            y: state.ball.position.y,
            velocity_x: state.ball.velocity.x,
            velocity_y: state.ball.velocity.y,
        },
        teams,
        score_left,
        score_right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SCENARIOS_DIR;
    use crate::testing::parser::parse_scenario_file;
    use std::path::Path;

    fn scenario(toml: &str) -> ScenarioDefinition {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_unknown_team_is_an_error() {
        let def = scenario(
            r#"
name = "Bad team"
[[setup.players]]
team = "middle"
index = 0
x = 1.0
y = 1.0
"#,
        );
        assert!(matches!(run_scenario(&def), ScenarioResult::Error { .. }));
    }

    #[test]
    fn test_legacy_team_has_no_agent_memory() {
        let def = scenario(
            r#"
name = "Legacy memory"
[setup]
right = "legacy"
[setup.right_agent]
shot_cooldown = 1.0
"#,
        );
        assert!(matches!(run_scenario(&def), ScenarioResult::Error { .. }));
    }

    #[test]
    fn test_custom_player_id() {
        let def = scenario(
            r#"
name = "Ids"
[[setup.players]]
id = "striker"
team = "left"
index = 0
x = 3.0
y = 4.0
"#,
        );
        let (state, ids) = build_match(&def.setup).unwrap();
        assert_eq!(ids.get("striker"), Some(&(TeamSide::Left, 0)));
        assert!(!ids.contains_key("left_0"));
        assert!(ids.contains_key("right_1"));
        assert_eq!(state.team(TeamSide::Left).players[0].position, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_human_input_moves_active_player() {
        let def = scenario(
            r#"
name = "Human move"
frames = 10
[setup]
left = "human"
[[input]]
frame = 1
team = "left"
move_x = 1.0
[[expect.state]]
after_frame = 10
checks = ["left_0.x > 12", "left.active = 0"]
"#,
        );
        let result = run_scenario(&def);
        assert!(result.is_pass(), "{:?}", result);
    }

    #[test]
    fn test_swap_sequence() {
        let def = scenario(
            r#"
name = "Swap"
frames = 3
[setup]
right = "human"
[[input]]
frame = 2
team = "right"
swap = true
[[expect.sequence]]
event = "Swap"
team = "right"
frame_min = 2
frame_max = 2
[[expect.state]]
after_frame = 3
checks = ["right.active = 1"]
"#,
        );
        let result = run_scenario(&def);
        assert!(result.is_pass(), "{:?}", result);
    }

    #[test]
    fn test_all_scenarios_pass() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(SCENARIOS_DIR);
        let mut entries: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|e| e == "toml"))
            .collect();
        entries.sort();
        assert!(!entries.is_empty());

        for path in entries {
            let def = parse_scenario_file(&path).unwrap();
            let result = run_scenario(&def);
            assert!(result.is_pass(), "{}: {:?}", path.display(), result);
        }
    }
}
