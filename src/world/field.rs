//! Field geometry, wall bounces, and goal detection

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ball::Ball;
use crate::constants::*;
use crate::player::TeamSide;
use crate::world::obstacle::Obstacle;

/// Outcome of a boundary check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GoalResult {
    #[default]
    None,
    /// Ball went into the left goal (right team scores)
    LeftGoal,
    /// Ball went into the right goal (left team scores)
    RightGoal,
}

impl GoalResult {
    /// Numeric code: 0 = none, 1 = left goal, 2 = right goal
    pub fn code(self) -> u8 {
        match self {
            GoalResult::None => 0,
            GoalResult::LeftGoal => 1,
            GoalResult::RightGoal => 2,
        }
    }

    /// Team credited with the goal
    pub fn scoring_side(self) -> Option<TeamSide> {
        match self {
            GoalResult::None => None,
            GoalResult::LeftGoal => Some(TeamSide::Right),
            GoalResult::RightGoal => Some(TeamSide::Left),
        }
    }

    pub fn is_goal(self) -> bool {
        self != GoalResult::None
    }
}

/// Rectangular arena `[0, width] x [0, height]` with a goal opening centered
/// on each end wall. Only the obstacle list changes after construction, and
/// only during match setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
    pub goal_height: f32,
    pub goal_depth: f32,
    #[serde(default)]
    obstacles: Vec<Obstacle>,
}

impl Default for Field {
    fn default() -> Self {
        Self::new(FIELD_WIDTH, FIELD_HEIGHT)
    }
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            goal_height: GOAL_HEIGHT,
            goal_depth: GOAL_DEPTH,
            obstacles: Vec::new(),
        }
    }

    pub fn with_goal(mut self, goal_height: f32, goal_depth: f32) -> Self {
        self.goal_height = goal_height;
        self.goal_depth = goal_depth;
        self
    }

    pub fn goal_top(&self) -> f32 {
        self.height / 2.0 - self.goal_height / 2.0
    }

    pub fn goal_bottom(&self) -> f32 {
        self.height / 2.0 + self.goal_height / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// x of the goal line a side attacks
    pub fn attack_goal_x(&self, side: TeamSide) -> f32 {
        match side {
            TeamSide::Left => self.width,
            TeamSide::Right => 0.0,
        }
    }

    /// Center of the goal mouth a side attacks
    pub fn attack_goal_center(&self, side: TeamSide) -> Vec2 {
        Vec2::new(self.attack_goal_x(side), self.height / 2.0)
    }

    /// (top post, bottom post) of the goal a side attacks
    pub fn attack_goal_posts(&self, side: TeamSide) -> (Vec2, Vec2) {
        let x = self.attack_goal_x(side);
        (
            Vec2::new(x, self.goal_top()),
            Vec2::new(x, self.goal_bottom()),
        )
    }

    /// Whether a y-coordinate lies strictly inside the goal opening
    pub fn in_goal_opening(&self, y: f32) -> bool {
        y > self.goal_top() && y < self.goal_bottom()
    }

    /// Append an obstacle (setup only)
    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Bounce the ball off the walls and detect goals.
    ///
    /// Top/bottom walls are resolved first. On the end walls the ball may pass
    /// through the goal opening; behind the wall it is still held between the
    /// posts, and a goal counts once its edge is `goal_depth` past the line.
    pub fn handle_ball_boundary(&self, ball: &mut Ball) -> GoalResult {
        let r = ball.radius;

        if ball.position.y - r < 0.0 {
            ball.position.y = r;
            if ball.velocity.y < 0.0 {
                ball.velocity.y = -ball.velocity.y * WALL_RESTITUTION;
            }
        }
        if ball.position.y + r > self.height {
            ball.position.y = self.height - r;
            if ball.velocity.y > 0.0 {
                ball.velocity.y = -ball.velocity.y * WALL_RESTITUTION;
            }
        }

        // Left end
        if ball.position.x - r < 0.0 {
            if self.in_goal_opening(ball.position.y) {
                if ball.position.x < 0.0 {
                    self.bound_by_posts(ball);
                }
                if ball.position.x - r < -self.goal_depth {
                    return GoalResult::LeftGoal;
                }
            } else {
                ball.position.x = r;
                if ball.velocity.x < 0.0 {
                    ball.velocity.x = -ball.velocity.x * WALL_RESTITUTION;
                }
            }
        }

        // Right end
        if ball.position.x + r > self.width {
            if self.in_goal_opening(ball.position.y) {
                if ball.position.x > self.width {
                    self.bound_by_posts(ball);
                }
                if ball.position.x + r > self.width + self.goal_depth {
                    return GoalResult::RightGoal;
                }
            } else {
                ball.position.x = self.width - r;
                if ball.velocity.x > 0.0 {
                    ball.velocity.x = -ball.velocity.x * WALL_RESTITUTION;
                }
            }
        }

        GoalResult::None
    }

    /// Inside a goal box the side netting acts like a wall
    fn bound_by_posts(&self, ball: &mut Ball) {
        let r = ball.radius;
        let top = self.goal_top();
        let bottom = self.goal_bottom();

        if ball.position.y - r < top {
            ball.position.y = top + r;
            if ball.velocity.y < 0.0 {
                ball.velocity.y = -ball.velocity.y * WALL_RESTITUTION;
            }
        }
        if ball.position.y + r > bottom {
            ball.position.y = bottom - r;
            if ball.velocity.y > 0.0 {
                ball.velocity.y = -ball.velocity.y * WALL_RESTITUTION;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_goal_opening_bounds() {
        let field = Field::default();
        assert!(approx(field.goal_top(), 7.0));
        assert!(approx(field.goal_bottom(), 13.0));
        assert!(field.in_goal_opening(10.0));
        assert!(!field.in_goal_opening(7.0));
        assert!(!field.in_goal_opening(3.0));
    }

    #[test]
    fn test_solid_wall_reflection() {
        let field = Field::default();
        // Left wall, well away from the goal mouth
        let mut ball = Ball::new(Vec2::new(0.3, 3.0), Vec2::new(-10.0, 0.0));
        assert_eq!(field.handle_ball_boundary(&mut ball), GoalResult::None);
        assert!(approx(ball.position.x, ball.radius));
        assert!(approx(ball.velocity.x, 7.5));

        // Bottom wall
        let mut ball = Ball::new(Vec2::new(20.0, 19.8), Vec2::new(1.0, 8.0));
        field.handle_ball_boundary(&mut ball);
        assert!(approx(ball.position.y, field.height - ball.radius));
        assert!(approx(ball.velocity.y, -6.0));
        assert!(approx(ball.velocity.x, 1.0));
    }

    #[test]
    fn test_wall_does_not_reflect_outgoing_ball() {
        let field = Field::default();
        let mut ball = Ball::new(Vec2::new(39.8, 2.0), Vec2::new(-3.0, 0.0));
        field.handle_ball_boundary(&mut ball);
        assert!(approx(ball.position.x, field.width - ball.radius));
        assert!(approx(ball.velocity.x, -3.0));
    }

    #[test]
    fn test_goal_scoring_boundary() {
        let field = Field::default();

        let mut ball = Ball::new(Vec2::new(-2.0, 10.0), Vec2::new(-5.0, 0.0));
        assert_eq!(field.handle_ball_boundary(&mut ball).code(), 1);

        let mut ball = Ball::new(Vec2::new(-1.0, 10.0), Vec2::new(-5.0, 0.0));
        assert_eq!(field.handle_ball_boundary(&mut ball).code(), 0);

        let mut ball = Ball::new(Vec2::new(field.width + 2.0, 10.0), Vec2::new(5.0, 0.0));
        assert_eq!(field.handle_ball_boundary(&mut ball).code(), 2);

        let mut ball = Ball::new(Vec2::new(field.width + 1.0, 10.0), Vec2::new(5.0, 0.0));
        assert_eq!(field.handle_ball_boundary(&mut ball).code(), 0);
    }

    #[test]
    fn test_goal_mouth_lets_ball_through() {
        let field = Field::default();
        let mut ball = Ball::new(Vec2::new(0.2, 10.0), Vec2::new(-5.0, 0.0));
        field.handle_ball_boundary(&mut ball);
        // Not clamped back into the field
        assert!(approx(ball.position.x, 0.2));
        assert!(approx(ball.velocity.x, -5.0));
    }

    #[test]
    fn test_posts_bound_ball_inside_goal_box() {
        let field = Field::default();
        let mut ball = Ball::new(Vec2::new(-1.0, 7.2), Vec2::new(-2.0, -4.0));
        assert_eq!(field.handle_ball_boundary(&mut ball), GoalResult::None);
        assert!(approx(ball.position.y, field.goal_top() + ball.radius));
        assert!(approx(ball.velocity.y, 3.0));
    }

    #[test]
    fn test_scoring_side() {
        assert_eq!(GoalResult::LeftGoal.scoring_side(), Some(TeamSide::Right));
        assert_eq!(GoalResult::RightGoal.scoring_side(), Some(TeamSide::Left));
        assert_eq!(GoalResult::None.scoring_side(), None);
    }

    #[test]
    fn test_attack_goal_geometry() {
        let field = Field::default();
        assert_eq!(field.attack_goal_x(TeamSide::Left), field.width);
        let (top, bottom) = field.attack_goal_posts(TeamSide::Right);
        assert_eq!(top, Vec2::new(0.0, 7.0));
        assert_eq!(bottom, Vec2::new(0.0, 13.0));
    }
}
