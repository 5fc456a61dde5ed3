//! One simulation frame over the whole match graph
//!
//! Phase order is fixed: team updates (and the kicks they request), player
//! separation, ball integration, then three passes of ball-player,
//! obstacle and ball-boundary resolution.

use bevy::prelude::*;

use crate::ai::{AgentSignals, TeamController};
use crate::ball::{Ball, KickKind, apply_kick, handle_player_collision, integrate_ball};
use crate::constants::*;
use crate::events::GameEvent;
use crate::input::PlayerInput;
use crate::player::{Team, TeamSide, resolve_all_player_collisions};
use crate::scoring::{kickoff_positions, reset_to_kickoff};
use crate::world::{Field, GoalResult};

use super::config::MatchConfig;

/// Field, ball, both teams and their controllers. Owned by one system per tick.
#[derive(Resource, Clone, Debug)]
pub struct MatchState {
    pub field: Field,
    pub ball: Ball,
    pub teams: [Team; 2],
    pub controllers: [TeamController; 2],
}

impl MatchState {
    /// New match in kickoff formation
    pub fn new(field: Field, left: TeamController, right: TeamController) -> Self {
        let [l0, l1] = kickoff_positions(&field, TeamSide::Left);
        let [r0, r1] = kickoff_positions(&field, TeamSide::Right);
        Self {
            ball: Ball::new(field.center(), Vec2::ZERO),
            teams: [Team::new(l0, l1), Team::new(r0, r1)],
            controllers: [left, right],
            field,
        }
    }

    pub fn from_config(config: &MatchConfig, seed: u64) -> Self {
        Self::new(
            config.build_field(seed),
            TeamController::from_mode(config.left, config.reaction_speed),
            TeamController::from_mode(config.right, config.reaction_speed),
        )
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        &self.teams[side.index()]
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        &mut self.teams[side.index()]
    }

    pub fn controller(&self, side: TeamSide) -> &TeamController {
        &self.controllers[side.index()]
    }

    pub fn controller_mut(&mut self, side: TeamSide) -> &mut TeamController {
        &mut self.controllers[side.index()]
    }

    pub fn score(&self) -> (u32, u32) {
        (self.teams[0].score, self.teams[1].score)
    }

    /// Reset positions and agent memory for a kickoff
    pub fn kickoff(&mut self) {
        reset_to_kickoff(&self.field, &mut self.ball, &mut self.teams);
        for controller in self.controllers.iter_mut() {
            controller.reset();
        }
    }
}

/// What happened during a frame
#[derive(Debug, Clone, Default)]
pub struct StepOutcome {
    /// First goal detected across the collision passes
    pub goal: GoalResult,
    /// Pass, Shot and Swap events, in order
    pub events: Vec<GameEvent>,
}

/// Own team mutably, opponents read-only
fn split_teams(teams: &mut [Team; 2], side: TeamSide) -> (&mut Team, &Team) {
    let [left, right] = teams;
    match side {
        TeamSide::Left => (left, &*right),
        TeamSide::Right => (right, &*left),
    }
}

/// Advance the match by `dt` seconds (clamped to `MAX_FRAME_DT`).
/// Goal handling (score and kickoff) is left to the caller.
pub fn step_frame(state: &mut MatchState, input: &mut PlayerInput, dt: f32) -> StepOutcome {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    let mut outcome = StepOutcome::default();

    // 1. Team updates, then the kicks they asked for
    let mut signals = [AgentSignals::default(); 2];
    for side in TeamSide::BOTH {
        let i = side.index();
        let (team, opponents) = split_teams(&mut state.teams, side);
        let output = state.controllers[i].update(
            dt,
            team,
            input.take(side),
            &state.ball,
            &state.field,
            side,
            opponents,
        );
        if output.swapped {
            outcome.events.push(GameEvent::Swap {
                team: side,
                active_index: team.active_index,
            });
        }
        signals[i] = output.signals;
    }
    for side in TeamSide::BOTH {
        apply_signals(state, side, signals[side.index()], &mut outcome.events);
    }

    // 2. Player separation
    resolve_all_player_collisions(&mut state.teams);

    // 3. Ball motion
    integrate_ball(&mut state.ball, dt);

    // 4. Collision passes
    outcome.goal = resolve_contacts(state);

    outcome
}

/// Run the fixed `COLLISION_PASSES` contact passes. Returns the first goal seen.
pub fn resolve_contacts(state: &mut MatchState) -> GoalResult {
    let mut goal = GoalResult::None;
    for _ in 0..COLLISION_PASSES {
        let result = collision_pass(state);
        if !goal.is_goal() {
            goal = result;
        }
    }
    goal
}

/// Ball-player, player-obstacle, ball-obstacle, then walls and goals
fn collision_pass(state: &mut MatchState) -> GoalResult {
    for team in &state.teams {
        for player in &team.players {
            handle_player_collision(&mut state.ball, player);
        }
    }
    for team in state.teams.iter_mut() {
        for player in team.players.iter_mut() {
            for obstacle in state.field.obstacles() {
                obstacle.resolve_player(player);
            }
        }
    }
    for obstacle in state.field.obstacles() {
        obstacle.resolve_ball(&mut state.ball);
    }
    state.field.handle_ball_boundary(&mut state.ball)
}

fn apply_signals(state: &mut MatchState, side: TeamSide, signals: AgentSignals, events: &mut Vec<GameEvent>) {
    if let Some(pass) = signals.pass {
        let target = state.teams[side.index()].players[pass.receiver].position;
        apply_kick(&mut state.ball, target, KickKind::Pass);
        events.push(GameEvent::Pass {
            team: side,
            from: pass.passer,
            to: pass.receiver,
            target,
        });
    }
    if let Some((player, target)) = signals.shot {
        apply_kick(&mut state.ball, target, KickKind::Shot);
        events.push(GameEvent::Shot {
            team: side,
            player,
            target,
        });
    }
}
