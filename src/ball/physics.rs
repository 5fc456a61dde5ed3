//! Ball physics: integration, player contact, and kick impulses

use bevy::prelude::*;

use crate::ball::components::Ball;
use crate::constants::*;
use crate::helpers::Vec2Ext;
use crate::player::Player;

/// Advance the ball by `dt` seconds (explicit Euler, per-frame friction).
pub fn integrate_ball(ball: &mut Ball, dt: f32) {
    ball.position += ball.velocity * dt;
    ball.velocity *= ball.friction;

    if ball.velocity.length() < BALL_STOP_SPEED {
        ball.velocity = Vec2::ZERO;
    }
}

/// Resolve ball-vs-player overlap. The player is immovable here: the ball is
/// pushed fully out, bounced with restitution, and guaranteed a minimum
/// outward speed so it never stays embedded. Returns true on contact.
pub fn handle_player_collision(ball: &mut Ball, player: &Player) -> bool {
    let diff = ball.position - player.position;
    let dist = diff.length();
    let min_dist = ball.radius + player.radius;

    if dist >= min_dist {
        return false;
    }

    // Coincident centers: fixed normal instead of NaN
    let normal = if dist > COINCIDENT_EPSILON {
        diff / dist
    } else {
        Vec2::Y
    };

    ball.position = player.position + normal * min_dist;

    let v_normal = ball.velocity.dot(normal);
    if v_normal < 0.0 {
        ball.velocity -= (1.0 + PLAYER_RESTITUTION) * v_normal * normal;
    }

    let outward = ball.velocity.dot(normal);
    if outward < MIN_SEPARATION_SPEED {
        ball.velocity += (MIN_SEPARATION_SPEED - outward) * normal;
    }

    true
}

/// Kind of kick the driver applies on behalf of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickKind {
    Pass,
    Shot,
}

impl KickKind {
    /// (distance factor, min speed, max speed)
    pub fn speed_profile(self) -> (f32, f32, f32) {
        match self {
            KickKind::Pass => (PASS_SPEED_FACTOR, PASS_SPEED_MIN, PASS_SPEED_MAX),
            KickKind::Shot => (SHOT_SPEED_FACTOR, SHOT_SPEED_MIN, SHOT_SPEED_MAX),
        }
    }
}

/// Overwrite the ball velocity with an impulse toward `target`.
/// Speed scales with distance and is clamped to the kick's range.
pub fn apply_kick(ball: &mut Ball, target: Vec2, kind: KickKind) {
    let (factor, min_speed, max_speed) = kind.speed_profile();
    let to_target = target - ball.position;
    let speed = (to_target.length() * factor).clamp(min_speed, max_speed);
    ball.velocity = to_target.safe_normalize() * speed;
}
