//! Assertion checking for scenario expectations

use std::collections::HashMap;

use super::parser::{ExpectedEvent, StateAssertion};
use crate::events::GameEvent;

/// Error when an assertion fails
#[derive(Debug)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl AssertionError {
    fn new(message: String, expected: String, actual: String) -> Self {
        Self {
            message,
            expected,
            actual,
        }
    }
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// Captured event with timing info
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub frame: u64,
    pub event_type: String,
    pub team: Option<String>,
}

impl CapturedEvent {
    pub fn from_game_event(frame: u64, event: &GameEvent) -> Self {
        let event_type = match event {
            GameEvent::MatchStart { .. } => "MatchStart",
            GameEvent::Kickoff => "Kickoff",
            GameEvent::MatchEnd { .. } => "MatchEnd",
            GameEvent::Pass { .. } => "Pass",
            GameEvent::Shot { .. } => "Shot",
            GameEvent::Goal { .. } => "Goal",
            GameEvent::Swap { .. } => "Swap",
        };
        CapturedEvent {
            frame,
            event_type: event_type.to_string(),
            team: event.team().map(|side| side.to_string()),
        }
    }
}

impl ExpectedEvent {
    fn matches(&self, captured: &CapturedEvent) -> bool {
        captured.event_type == self.event
            && self.team.as_ref().is_none_or(|team| captured.team.as_ref() == Some(team))
    }

    fn frame_window_error(&self, position: usize, frame: u64) -> Option<AssertionError> {
        let label = format!("#{} {}", position + 1, self.event);
        match (self.frame_min, self.frame_max) {
            (Some(min), _) if frame < min => Some(AssertionError::new(
                format!("{} came before frame {}", label, min),
                format!("frame in [{}, ..]", min),
                format!("frame {}", frame),
            )),
            (_, Some(max)) if frame > max => Some(AssertionError::new(
                format!("{} came after frame {}", label, max),
                format!("frame in [.., {}]", max),
                format!("frame {}", frame),
            )),
            _ => None,
        }
    }
}

/// Expected events must appear in order; other events may be interleaved.
pub fn check_sequence(expected: &[ExpectedEvent], captured: &[CapturedEvent]) -> Result<(), AssertionError> {
    let mut remaining = captured.iter();

    for (position, exp) in expected.iter().enumerate() {
        let Some(hit) = remaining.by_ref().find(|cap| exp.matches(cap)) else {
            let team = exp.team.as_deref().map(|t| format!(" for {}", t)).unwrap_or_default();
            let seen: Vec<String> = captured
                .iter()
                .map(|c| format!("{}@{}", c.event_type, c.frame))
                .collect();
            return Err(AssertionError::new(
                format!("#{} {}{} never happened", position + 1, exp.event, team),
                format!("{} after the previous expected event", exp.event),
                seen.join(", "),
            ));
        };
        if let Some(err) = exp.frame_window_error(position, hit.frame) {
            return Err(err);
        }
    }

    Ok(())
}

/// World state for assertions
#[derive(Debug, Default)]
pub struct WorldState {
    /// Players by scenario id ("left_0", ...)
    pub players: HashMap<String, PlayerState>,
    pub ball: BallState,
    /// Keyed by "left" / "right"
    pub teams: HashMap<String, TeamState>,
    pub score_left: u32,
    pub score_right: u32,
}

#[derive(Debug, Default, Clone)]
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Default, Clone)]
pub struct BallState {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
}

/// Controller view of a team. Agent fields are `None` for controllers without agent memory.
#[derive(Debug, Default, Clone)]
pub struct TeamState {
    pub active_index: usize,
    pub active_state: Option<String>,
    pub support_state: Option<String>,
    pub just_shot: Option<bool>,
    pub just_passed: Option<bool>,
    pub shot_cooldown: Option<f32>,
    pub pass_cooldown: Option<f32>,
    pub shot_target_y: Option<f32>,
}

const OPERATORS: [&str; 6] = [">=", "<=", "!=", ">", "<", "="];

/// Split `"ball.x >= 3"` into `("ball.x", ">=", "3")`
fn split_check(check: &str) -> Option<(&str, &'static str, &str)> {
    let (idx, op) = check
        .char_indices()
        .find_map(|(i, _)| OPERATORS.iter().find(|op| check[i..].starts_with(**op)).map(|op| (i, *op)))?;
    Some((check[..idx].trim(), op, check[idx + op.len()..].trim()))
}

fn missing(path: &str, what: &str) -> AssertionError {
    AssertionError::new(format!("Unknown check path: {}", path), what.to_string(), path.to_string())
}

/// Evaluate every check of one `[[expect.state]]` block
pub fn check_state(assertion: &StateAssertion, state: &WorldState) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = split_check(check).ok_or_else(|| {
            AssertionError::new(
                format!("Malformed check '{}'", check),
                "<path> <op> <value>, op one of = != < <= > >=".to_string(),
                check.clone(),
            )
        })?;

        let Some((head, field)) = path.split_once('.').filter(|(_, f)| !f.contains('.')) else {
            return Err(missing(path, "'<entity>.<property>'"));
        };

        match head {
            "score" => {
                let actual = match field {
                    "left" => state.score_left,
                    "right" => state.score_right,
                    _ => return Err(missing(path, "score.left or score.right")),
                };
                check_float_comparison(path, actual as f32, operator, expected_value)?;
            }
            "ball" => {
                let ball = &state.ball;
                let actual = match field {
                    "x" => ball.x,
                    "y" => ball.y,
                    "velocity_x" => ball.velocity_x,
                    "velocity_y" => ball.velocity_y,
                    "speed" => (ball.velocity_x * ball.velocity_x + ball.velocity_y * ball.velocity_y).sqrt(),
                    _ => return Err(missing(path, "ball.x, ball.y, ball.velocity_x, ball.velocity_y or ball.speed")),
                };
                check_float_comparison(path, actual, operator, expected_value)?;
            }
            "left" | "right" => {
                let team = state.teams.get(head).ok_or_else(|| missing(path, "team state"))?;
                check_team(path, field, team, operator, expected_value)?;
            }
            entity_id => {
                let player = state.players.get(entity_id).ok_or_else(|| {
                    let mut known: Vec<&String> = state.players.keys().collect();
                    known.sort();
                    AssertionError::new(
                        format!("No player '{}' in scenario", entity_id),
                        format!("one of {:?}", known),
                        entity_id.to_string(),
                    )
                })?;
                let actual = match field {
                    "x" => player.x,
                    "y" => player.y,
                    _ => return Err(missing(path, "player x or y")),
                };
                check_float_comparison(path, actual, operator, expected_value)?;
            }
        }
    }

    Ok(())
}

fn check_team(path: &str, field: &str, team: &TeamState, operator: &str, expected: &str) -> Result<(), AssertionError> {
    let no_agent = || missing(path, "a team driven by the team agent");
    match field {
        "active" => check_float_comparison(path, team.active_index as f32, operator, expected),
        "active_state" => check_text(path, team.active_state.as_deref().ok_or_else(no_agent)?, operator, expected),
        "support_state" => check_text(path, team.support_state.as_deref().ok_or_else(no_agent)?, operator, expected),
        "just_shot" => check_bool(path, team.just_shot.ok_or_else(no_agent)?, operator, expected),
        "just_passed" => check_bool(path, team.just_passed.ok_or_else(no_agent)?, operator, expected),
        "shot_cooldown" => check_float_comparison(path, team.shot_cooldown.ok_or_else(no_agent)?, operator, expected),
        "pass_cooldown" => check_float_comparison(path, team.pass_cooldown.ok_or_else(no_agent)?, operator, expected),
        "shot_target_y" => check_float_comparison(path, team.shot_target_y.ok_or_else(no_agent)?, operator, expected),
        _ => Err(missing(path, "a team property")),
    }
}

fn check_text(path: &str, actual: &str, operator: &str, expected: &str) -> Result<(), AssertionError> {
    let expected = expected.trim_matches('"');
    let pass = match operator {
        "=" => actual == expected,
        "!=" => actual != expected,
        _ => false,
    };
    compared(pass, path, operator, expected, actual.to_string())
}

fn check_bool(path: &str, actual: bool, operator: &str, expected: &str) -> Result<(), AssertionError> {
    check_text(path, if actual { "true" } else { "false" }, operator, expected)
}

/// Numeric comparison; `=` and `!=` use a 0.1 tolerance
fn check_float_comparison(path: &str, actual: f32, operator: &str, expected: &str) -> Result<(), AssertionError> {
    let Ok(value) = expected.parse::<f32>() else {
        return Err(AssertionError::new(
            format!("{} needs a numeric value", path),
            "number".to_string(),
            expected.to_string(),
        ));
    };

    let close = (actual - value).abs() < FLOAT_TOLERANCE;
    let pass = match operator {
        "=" => close,
        "!=" => !close,
        ">" => actual > value,
        ">=" => actual >= value,
        "<" => actual < value,
        "<=" => actual <= value,
        _ => false,
    };
    compared(pass, path, operator, expected, format!("{:.2}", actual))
}

const FLOAT_TOLERANCE: f32 = 0.1;

fn compared(pass: bool, path: &str, operator: &str, expected: &str, actual: String) -> Result<(), AssertionError> {
    if pass {
        return Ok(());
    }
    Err(AssertionError::new(
        format!("{} {} {} does not hold", path, operator, expected),
        format!("{} {} {}", path, operator, expected),
        actual,
    ))
}
