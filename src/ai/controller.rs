//! Per-team controller: human input, team agent, or legacy agent

use serde::{Deserialize, Serialize};

use crate::ball::Ball;
use crate::input::TeamInput;
use crate::player::{Team, TeamSide, move_player};
use crate::world::Field;

use super::decision::TeamAgent;
use super::legacy::LegacyAgent;
use super::AgentSignals;

/// Who drives a team. Parsed from config and the command line.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    Human,
    #[default]
    Agent,
    Legacy,
}

impl ControlMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "human" | "player" => Some(Self::Human),
            "agent" | "ai" | "team" => Some(Self::Agent),
            "legacy" => Some(Self::Legacy),
            _ => None,
        }
    }
}

/// Result of one controller frame
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct ControlOutput {
    pub signals: AgentSignals,
    /// A human swap was applied this frame
    pub swapped: bool,
}

#[derive(Clone, Debug)]
pub enum TeamController {
    /// Active player follows input; the teammate is positioned by the agent
    Human { assist: TeamAgent },
    Agent(TeamAgent),
    /// Drives the active player only; the teammate holds position
    Legacy(LegacyAgent),
}

impl TeamController {
    pub fn from_mode(mode: ControlMode, reaction_speed: f32) -> Self {
        match mode {
            ControlMode::Human => TeamController::Human {
                assist: TeamAgent::new(reaction_speed),
            },
            ControlMode::Agent => TeamController::Agent(TeamAgent::new(reaction_speed)),
            ControlMode::Legacy => TeamController::Legacy(LegacyAgent::new(reaction_speed)),
        }
    }

    pub fn mode(&self) -> ControlMode {
        match self {
            TeamController::Human { .. } => ControlMode::Human,
            TeamController::Agent(_) => ControlMode::Agent,
            TeamController::Legacy(_) => ControlMode::Legacy,
        }
    }

    /// Team agent state, if this controller has one
    pub fn agent(&self) -> Option<&TeamAgent> {
        match self {
            TeamController::Human { assist } => Some(assist),
            TeamController::Agent(agent) => Some(agent),
            TeamController::Legacy(_) => None,
        }
    }

    pub fn agent_mut(&mut self) -> Option<&mut TeamAgent> {
        match self {
            TeamController::Human { assist } => Some(assist),
            TeamController::Agent(agent) => Some(agent),
            TeamController::Legacy(_) => None,
        }
    }

    /// Clear agent memory (kickoff)
    pub fn reset(&mut self) {
        if let Some(agent) = self.agent_mut() {
            agent.reset();
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        dt: f32,
        team: &mut Team,
        input: TeamInput,
        ball: &Ball,
        field: &Field,
        side: TeamSide,
        opponents: &Team,
    ) -> ControlOutput {
        match self {
            TeamController::Human { assist } => {
                if input.swap_pressed {
                    team.swap_active();
                }
                move_player(team.active_mut(), input.direction, dt, field);
                assist.assist(dt, team, ball, field, side, opponents);
                ControlOutput {
                    signals: AgentSignals::default(),
                    swapped: input.swap_pressed,
                }
            }
            TeamController::Agent(agent) => ControlOutput {
                signals: agent.update(dt, team, ball, field, side, opponents),
                swapped: false,
            },
            TeamController::Legacy(agent) => {
                agent.update(dt, team.active_mut(), ball, field, side);
                ControlOutput::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::Vec2;

    #[test]
    fn test_mode_parse() {
        assert_eq!(ControlMode::parse("Human"), Some(ControlMode::Human));
        assert_eq!(ControlMode::parse("ai"), Some(ControlMode::Agent));
        assert_eq!(ControlMode::parse("legacy"), Some(ControlMode::Legacy));
        assert_eq!(ControlMode::parse("robot"), None);
    }

    #[test]
    fn test_human_moves_active_and_swaps() {
        let field = Field::default();
        let ball = Ball::new(Vec2::new(20.0, 10.0), Vec2::ZERO);
        let opponents = Team::new(Vec2::new(30.0, 5.0), Vec2::new(30.0, 15.0));
        let mut team = Team::new(Vec2::new(10.0, 7.0), Vec2::new(10.0, 13.0));
        let mut controller = TeamController::from_mode(ControlMode::Human, 0.8);

        let input = TeamInput {
            direction: Vec2::new(1.0, 0.0),
            swap_pressed: true,
        };
        let out = controller.update(0.1, &mut team, input, &ball, &field, TeamSide::Left, &opponents);
        assert!(out.swapped);
        assert!(out.signals.is_empty());
        assert_eq!(team.active_index, 1);
        // Swapped-to player moved at full speed
        assert!((team.players[1].position.x - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_legacy_leaves_teammate_alone() {
        let field = Field::default();
        let ball = Ball::new(Vec2::new(15.0, 10.0), Vec2::ZERO);
        let opponents = Team::new(Vec2::new(30.0, 5.0), Vec2::new(30.0, 15.0));
        let mut team = Team::new(Vec2::new(10.0, 7.0), Vec2::new(10.0, 13.0));
        let mut controller = TeamController::from_mode(ControlMode::Legacy, 0.8);

        controller.update(0.1, &mut team, TeamInput::default(), &ball, &field, TeamSide::Left, &opponents);
        assert_ne!(team.players[0].position, Vec2::new(10.0, 7.0));
        assert_eq!(team.players[1].position, Vec2::new(10.0, 13.0));
        assert!(controller.agent().is_none());
    }
}
