//! Legacy single-player agent: chase when the ball is close or on our half,
//! otherwise hold a home spot that tracks the ball vertically

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ball::Ball;
use crate::constants::*;
use crate::player::{Player, TeamSide, clamp_to_field};
use crate::world::Field;

use super::steering::{chase_target, seek_with_arrival};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LegacyAgent {
    pub reaction_speed: f32,
}

impl Default for LegacyAgent {
    fn default() -> Self {
        Self {
            reaction_speed: AI_REACTION_SPEED,
        }
    }
}

impl LegacyAgent {
    pub fn new(reaction_speed: f32) -> Self {
        Self { reaction_speed }
    }

    pub fn update(&self, dt: f32, player: &mut Player, ball: &Ball, field: &Field, side: TeamSide) {
        let target = self.target(player, ball, field, side);
        seek_with_arrival(player, target, dt, self.reaction_speed, CHASE_SLOW_RADIUS);
        clamp_to_field(player, field);
    }

    /// Where the player heads this frame
    pub fn target(&self, player: &Player, ball: &Ball, field: &Field, side: TeamSide) -> Vec2 {
        let home = self.home(field, side);
        let ball_on_our_half = match side {
            TeamSide::Left => ball.position.x < field.width / 2.0,
            TeamSide::Right => ball.position.x > field.width / 2.0,
        };

        if ball_on_our_half || player.position.distance(ball.position) < LEGACY_ENGAGE_DISTANCE {
            chase_target(player, ball, side)
        } else {
            Vec2::new(
                home.x,
                ball.position.y * LEGACY_TRACK_WEIGHT + home.y * (1.0 - LEGACY_TRACK_WEIGHT),
            )
        }
    }

    fn home(&self, field: &Field, side: TeamSide) -> Vec2 {
        let x = match side {
            TeamSide::Left => field.width * LEGACY_HOME_FRACTION,
            TeamSide::Right => field.width * (1.0 - LEGACY_HOME_FRACTION),
        };
        Vec2::new(x, field.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_home_when_ball_far_on_their_half() {
        let field = Field::default();
        let agent = LegacyAgent::default();
        let player = Player::new(Vec2::new(10.0, 10.0));
        let ball = Ball::new(Vec2::new(35.0, 4.0), Vec2::ZERO);

        let target = agent.target(&player, &ball, &field, TeamSide::Left);
        assert_eq!(target, Vec2::new(10.0, 7.0));
    }

    #[test]
    fn test_engages_ball_on_own_half() {
        let field = Field::default();
        let agent = LegacyAgent::default();
        let player = Player::new(Vec2::new(30.0, 10.0));
        let ball = Ball::new(Vec2::new(25.0, 4.0), Vec2::ZERO);

        // Right team, ball on its half, player already behind the ball
        let target = agent.target(&player, &ball, &field, TeamSide::Right);
        assert_eq!(target, ball.position);
    }

    #[test]
    fn test_engages_nearby_ball_anywhere() {
        let field = Field::default();
        let agent = LegacyAgent::default();
        let mut player = Player::new(Vec2::new(28.0, 10.0));
        let ball = Ball::new(Vec2::new(32.0, 10.0), Vec2::ZERO);

        agent.update(1.0 / 60.0, &mut player, &ball, &field, TeamSide::Left);
        assert!(player.position.x > 28.0);
    }
}
