//! Player and team state

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::{PLAYER_RADIUS, PLAYER_SPEED};

/// A player body. Players carry no velocity: they move in discrete steps
/// driven by input or by an agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    pub radius: f32,
    /// Maximum movement rate (m/s)
    pub speed: f32,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

/// Which end a team defends. The left team attacks the right goal (x = width)
/// and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    Left,
    Right,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::Left, TeamSide::Right];

    pub fn index(self) -> usize {
        match self {
            TeamSide::Left => 0,
            TeamSide::Right => 1,
        }
    }

    pub fn opponent(self) -> TeamSide {
        match self {
            TeamSide::Left => TeamSide::Right,
            TeamSide::Right => TeamSide::Left,
        }
    }

    pub fn is_left(self) -> bool {
        self == TeamSide::Left
    }

    /// +1.0 when attacking toward increasing x, -1.0 otherwise
    pub fn attack_sign(self) -> f32 {
        match self {
            TeamSide::Left => 1.0,
            TeamSide::Right => -1.0,
        }
    }
}

impl std::fmt::Display for TeamSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamSide::Left => write!(f, "left"),
            TeamSide::Right => write!(f, "right"),
        }
    }
}

/// Two players and a score. Exactly one player is active at a time;
/// `active_index` only changes through `swap_active`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub players: [Player; 2],
    pub score: u32,
    pub active_index: usize,
}

impl Team {
    pub fn new(first: Vec2, second: Vec2) -> Self {
        Self {
            players: [Player::new(first), Player::new(second)],
            score: 0,
            active_index: 0,
        }
    }

    pub fn active(&self) -> &Player {
        &self.players[self.active_index]
    }

    pub fn active_mut(&mut self) -> &mut Player {
        &mut self.players[self.active_index]
    }

    pub fn inactive_index(&self) -> usize {
        1 - self.active_index
    }

    pub fn swap_active(&mut self) {
        self.active_index = 1 - self.active_index;
    }

    pub fn positions(&self) -> [Vec2; 2] {
        [self.players[0].position, self.players[1].position]
    }
}
