//! Static rectangular obstacles and the layouts used to place them

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::ball::Ball;
use crate::constants::OBSTACLE_RESTITUTION;
use crate::helpers::nearest_point_in_rect;
use crate::player::Player;
use crate::world::field::Field;

/// Below this distance the circle center is treated as inside the rectangle
const INSIDE_EPSILON: f32 = 1e-6;

/// Axis-aligned rectangle, immutable once placed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - Vec2::new(self.width, self.height) / 2.0
    }

    pub fn max(&self) -> Vec2 {
        self.center + Vec2::new(self.width, self.height) / 2.0
    }

    /// Whether this rectangle, grown by `margin`, overlaps `other`
    pub fn overlaps(&self, other: &Obstacle, margin: f32) -> bool {
        let half = Vec2::new(self.width + other.width, self.height + other.height) / 2.0;
        let diff = (self.center - other.center).abs();
        diff.x < half.x + margin && diff.y < half.y + margin
    }

    /// Push the ball out of the rectangle and bounce it. Returns true on contact.
    pub fn resolve_ball(&self, ball: &mut Ball) -> bool {
        let nearest = nearest_point_in_rect(ball.position, self.min(), self.max());
        let offset = ball.position - nearest;
        if offset.length_squared() >= ball.radius * ball.radius {
            return false;
        }

        let dist = offset.length();
        let normal = if dist < INSIDE_EPSILON {
            Vec2::Y
        } else {
            offset / dist
        };

        ball.position = nearest + normal * ball.radius;

        let v_normal = ball.velocity.dot(normal);
        if v_normal < 0.0 {
            ball.velocity -= (1.0 + OBSTACLE_RESTITUTION) * v_normal * normal;
        }
        true
    }

    /// Push a player out by the shortfall. Players carry no velocity.
    pub fn resolve_player(&self, player: &mut Player) -> bool {
        let nearest = nearest_point_in_rect(player.position, self.min(), self.max());
        let offset = player.position - nearest;
        if offset.length_squared() >= player.radius * player.radius {
            return false;
        }

        let dist = offset.length();
        let normal = if dist < INSIDE_EPSILON {
            Vec2::Y
        } else {
            offset / dist
        };

        player.position += normal * (player.radius - dist);
        true
    }
}

/// How obstacles are placed at match setup
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleLayout {
    /// Open field
    #[default]
    Empty,
    /// Two pillars on the halfway line
    Classic,
    /// Seeded random pairs, point-symmetric about the center
    Scattered { pairs: u32 },
}

/// Keep generated obstacles away from the kickoff spot
const CENTER_CLEARANCE: f32 = 4.0;
/// Keep generated obstacles away from the end walls (goal areas)
const END_CLEARANCE: f32 = 6.0;
const PLACEMENT_ATTEMPTS: u32 = 32;

impl ObstacleLayout {
    /// Parse a layout name from the command line ("empty", "classic", "scattered:3")
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "empty" | "none" => Some(Self::Empty),
            "classic" => Some(Self::Classic),
            other => {
                let pairs = other.strip_prefix("scattered")?;
                let pairs = match pairs.strip_prefix(':') {
                    Some(n) => n.parse().ok()?,
                    None if pairs.is_empty() => 2,
                    None => return None,
                };
                Some(Self::Scattered { pairs })
            }
        }
    }

    /// Build the obstacle list for a field. Deterministic for a given seed.
    pub fn build(&self, field: &Field, seed: u64) -> Vec<Obstacle> {
        match *self {
            ObstacleLayout::Empty => Vec::new(),
            ObstacleLayout::Classic => vec![
                Obstacle::new(Vec2::new(field.width * 0.5, field.height * 0.25), 1.5, 3.0),
                Obstacle::new(Vec2::new(field.width * 0.5, field.height * 0.75), 1.5, 3.0),
            ],
            ObstacleLayout::Scattered { pairs } => scatter_pairs(field, pairs, seed),
        }
    }
}

fn scatter_pairs(field: &Field, pairs: u32, seed: u64) -> Vec<Obstacle> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut placed: Vec<Obstacle> = Vec::new();
    let center = field.center();

    for _ in 0..pairs {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let width = rng.gen_range(1.0..2.5);
            let height = rng.gen_range(1.0..3.0);
            let x = rng.gen_range(END_CLEARANCE..(field.width / 2.0 - 3.0).max(END_CLEARANCE + 0.1));
            let y = rng.gen_range(2.0..(field.height - 2.0).max(2.1));

            let candidate = Obstacle::new(Vec2::new(x, y), width, height);
            let mirror = Obstacle::new(2.0 * center - candidate.center, width, height);

            if candidate.center.distance(center) < CENTER_CLEARANCE {
                continue;
            }
            if placed
                .iter()
                .any(|o| o.overlaps(&candidate, 1.5) || o.overlaps(&mirror, 1.5))
            {
                continue;
            }

            placed.push(candidate);
            placed.push(mirror);
            break;
        }
    }

    placed
}
