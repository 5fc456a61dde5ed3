//! Team agent - assigns active/support roles each frame and drives both players
//!
//! The active player chases, dribbles, passes or shoots; the support player
//! looks for the best receiving point. Passes and shots are reported through
//! [`AgentSignals`] for the simulation step to turn into ball impulses.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ball::Ball;
use crate::constants::*;
use crate::helpers::Vec2Ext;
use crate::player::{Team, TeamSide, clamp_to_field};
use crate::world::Field;

use super::positioning::optimal_receiving_point;
use super::shot_quality::{best_shot_target, is_lane_clear, nearest_opponent_distance, shot_grade};
use super::steering::{chase_target, has_possession, seek_with_arrival};
use super::{ActiveBehavior, AgentSignals, AgentState, PassSignal, SupportBehavior};

/// Two-player team agent
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamAgent {
    pub reaction_speed: f32,
    pub state: AgentState,
}

impl Default for TeamAgent {
    fn default() -> Self {
        Self::new(AI_REACTION_SPEED)
    }
}

impl TeamAgent {
    pub fn new(reaction_speed: f32) -> Self {
        Self {
            reaction_speed,
            state: AgentState::default(),
        }
    }

    /// Forget behaviors, cooldowns and timers (kickoff)
    pub fn reset(&mut self) {
        self.state = AgentState::default();
    }

    /// Run one frame for both players of `team`
    pub fn update(
        &mut self,
        dt: f32,
        team: &mut Team,
        ball: &Ball,
        field: &Field,
        side: TeamSide,
        opponents: &Team,
    ) -> AgentSignals {
        self.tick_timers(dt);

        let (active, support) = assign_roles(team, ball);
        let signals = self.update_active(dt, team, active, support, ball, field, side, opponents);
        self.update_support(dt, team, support, active, ball, field, side, opponents);

        for player in team.players.iter_mut() {
            clamp_to_field(player, field);
        }
        signals
    }

    /// Support-only update for a team whose active player is human-driven.
    /// The teammate of `team.active_index` looks for space.
    pub fn assist(
        &mut self,
        dt: f32,
        team: &mut Team,
        ball: &Ball,
        field: &Field,
        side: TeamSide,
        opponents: &Team,
    ) {
        self.tick_timers(dt);
        let active = team.active_index;
        let support = team.inactive_index();
        self.update_support(dt, team, support, active, ball, field, side, opponents);
        clamp_to_field(&mut team.players[support], field);
    }

    pub fn just_passed(&self) -> bool {
        self.state.just_passed
    }

    pub fn just_shot(&self) -> bool {
        self.state.just_shot
    }

    pub fn shot_target(&self) -> Vec2 {
        self.state.shot_target
    }

    fn tick_timers(&mut self, dt: f32) {
        let state = &mut self.state;
        state.pass_cooldown = (state.pass_cooldown - dt).max(0.0);
        state.shot_cooldown = (state.shot_cooldown - dt).max(0.0);
        state.just_passed = false;
        state.just_shot = false;
    }

    #[allow(clippy::too_many_arguments)]
    fn update_active(
        &mut self,
        dt: f32,
        team: &mut Team,
        active: usize,
        support: usize,
        ball: &Ball,
        field: &Field,
        side: TeamSide,
        opponents: &Team,
    ) -> AgentSignals {
        let reaction = self.reaction_speed;
        let state = &mut self.state;
        let support_pos = team.players[support].position;
        let player = &mut team.players[active];

        if has_possession(player, ball) {
            state.possession_timer += dt;
        } else {
            state.possession_timer = 0.0;
            state.active_behavior = ActiveBehavior::ChaseBall;
            let target = chase_target(player, ball, side);
            seek_with_arrival(player, target, dt, reaction, CHASE_SLOW_RADIUS);
            return AgentSignals::default();
        }

        let pos = player.position;
        let under_pressure = nearest_opponent_distance(pos, opponents) < PRESSURE_RADIUS;

        // Shoot
        let target = best_shot_target(pos, field, side, opponents);
        let grade = shot_grade(pos, target, field, side, opponents);
        if grade.worth_taking(under_pressure)
            && state.shot_cooldown <= 0.0
            && state.possession_timer > SHOT_MIN_POSSESSION
        {
            state.active_behavior = ActiveBehavior::Shoot;
            state.just_shot = true;
            state.shot_target = target;
            state.shot_cooldown = SHOT_COOLDOWN;
            state.possession_timer = 0.0;
            debug!("{} team shoots at ({:.1}, {:.1})", side, target.x, target.y);
            return AgentSignals {
                shot: Some((active, target)),
                ..default()
            };
        }

        // Pass
        if state.pass_cooldown <= 0.0 && state.possession_timer > PASS_MIN_POSSESSION {
            let pass_dist = pos.distance(support_pos);
            let lane_clear = is_lane_clear(pos, support_pos, opponents, PASS_LANE_CLEARANCE);
            let support_ahead = (support_pos.x - pos.x) * side.attack_sign() > SUPPORT_AHEAD_MARGIN;

            if lane_clear
                && pass_dist > PASS_MIN_DISTANCE
                && pass_dist < PASS_MAX_DISTANCE
                && (support_ahead || (under_pressure && pass_dist > PASS_PRESSURE_MIN_DISTANCE))
            {
                state.active_behavior = ActiveBehavior::Pass;
                state.just_passed = true;
                state.pass_cooldown = PASS_COOLDOWN;
                state.possession_timer = 0.0;
                debug!("{} team passes {} -> {}", side, active, support);
                return AgentSignals {
                    pass: Some(PassSignal {
                        passer: active,
                        receiver: support,
                    }),
                    ..default()
                };
            }
        }

        // Dribble toward goal, easing toward the middle of the field
        state.active_behavior = ActiveBehavior::Dribble;
        let goal_y = field.height / 2.0;
        let target_y = goal_y * DRIBBLE_CENTER_PULL + pos.y * (1.0 - DRIBBLE_CENTER_PULL);
        let target_x = match side {
            TeamSide::Left => (pos.x + DRIBBLE_ADVANCE).min(field.width - DRIBBLE_WALL_MARGIN),
            TeamSide::Right => (pos.x - DRIBBLE_ADVANCE).max(DRIBBLE_WALL_MARGIN),
        };
        seek_with_arrival(player, Vec2::new(target_x, target_y), dt, reaction, CHASE_SLOW_RADIUS);
        AgentSignals::default()
    }

    #[allow(clippy::too_many_arguments)]
    fn update_support(
        &mut self,
        dt: f32,
        team: &mut Team,
        support: usize,
        active: usize,
        ball: &Ball,
        field: &Field,
        side: TeamSide,
        opponents: &Team,
    ) {
        let active_player = team.players[active];
        let player = &mut team.players[support];

        let target = optimal_receiving_point(player, &active_player, ball, field, side, opponents);
        if player.position.distance(target) > SUPPORT_ARRIVE_DISTANCE {
            self.state.support_behavior = SupportBehavior::FindSpace;
            seek_with_arrival(player, target, dt, self.reaction_speed, SUPPORT_SLOW_RADIUS);
        } else {
            self.state.support_behavior = SupportBehavior::WaitReceive;
            let to_ball = (ball.position - player.position).safe_normalize();
            player.position += to_ball * SUPPORT_DRIFT_SPEED * dt;
        }
    }
}

/// The player nearer the ball is active; index 0 wins ties
pub fn assign_roles(team: &Team, ball: &Ball) -> (usize, usize) {
    let d0 = team.players[0].position.distance(ball.position);
    let d1 = team.players[1].position.distance(ball.position);
    if d0 <= d1 { (0, 1) } else { (1, 0) }
}
