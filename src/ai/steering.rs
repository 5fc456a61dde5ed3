//! Steering primitives shared by the team agent and the legacy agent

use bevy::prelude::*;

use crate::ball::Ball;
use crate::constants::*;
use crate::helpers::Vec2Ext;
use crate::player::{Player, TeamSide};

/// Seek with arrival: full `speed * reaction` outside `slow_radius`,
/// scaled down linearly inside it, no movement within the arrival tolerance.
pub fn seek_with_arrival(player: &mut Player, target: Vec2, dt: f32, reaction: f32, slow_radius: f32) {
    let to_target = target - player.position;
    let dist = to_target.length();
    if dist < ARRIVAL_TOLERANCE {
        return;
    }

    let mut move_speed = player.speed * reaction;
    if dist < slow_radius {
        move_speed *= dist / slow_radius;
    }
    player.position += to_target.safe_normalize() * move_speed * dt;
}

/// Whether the player is close enough to the ball to control it
pub fn has_possession(player: &Player, ball: &Ball) -> bool {
    player.position.distance(ball.position) < player.radius + ball.radius + POSSESSION_MARGIN
}

/// Where to run to get behind the ball. Approaches a point offset toward our
/// own goal, switching to the ball itself once close or already behind it.
pub fn chase_target(player: &Player, ball: &Ball, side: TeamSide) -> Vec2 {
    let sign = side.attack_sign();
    let behind_ball = (ball.position.x - player.position.x) * sign > BEHIND_BALL_MARGIN;
    let dist = player.position.distance(ball.position);

    if behind_ball || dist < DIRECT_CHASE_DISTANCE {
        ball.position
    } else {
        Vec2::new(ball.position.x - sign * APPROACH_OFFSET, ball.position.y)
    }
}
