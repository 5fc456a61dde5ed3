//! Ball state

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{BALL_FRICTION, BALL_RADIUS};

/// The puck. Modeled as a circle; reset in place on goals and restarts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Fraction of velocity retained each frame, in (0, 1]
    pub friction: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius: BALL_RADIUS,
            friction: BALL_FRICTION,
        }
    }
}

impl Ball {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            ..Default::default()
        }
    }

    /// Overwrite position and velocity (kickoff / restart)
    pub fn reset(&mut self, position: Vec2, velocity: Vec2) {
        self.position = position;
        self.velocity = velocity;
    }
}
