//! Input module - per-team human input state consumed by the simulation step

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::player::TeamSide;

/// One team's control input for the current frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamInput {
    /// Digital movement direction; normalized before use, zero = stand still
    pub direction: Vec2,
    /// Swap which player is controlled. Latched until consumed.
    pub swap_pressed: bool,
}

/// Buffered input for both teams, indexed by `TeamSide::index()`.
/// Only teams under human control read it.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub teams: [TeamInput; 2],
}

impl PlayerInput {
    pub fn get(&self, side: TeamSide) -> &TeamInput {
        &self.teams[side.index()]
    }

    pub fn set_direction(&mut self, side: TeamSide, direction: Vec2) {
        self.teams[side.index()].direction = direction;
    }

    pub fn press_swap(&mut self, side: TeamSide) {
        self.teams[side.index()].swap_pressed = true;
    }

    /// Take this frame's input for a team, clearing the latched swap
    pub fn take(&mut self, side: TeamSide) -> TeamInput {
        let input = &mut self.teams[side.index()];
        let taken = *input;
        input.swap_pressed = false;
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_is_consumed_once() {
        let mut input = PlayerInput::default();
        input.set_direction(TeamSide::Right, Vec2::new(-1.0, 0.0));
        input.press_swap(TeamSide::Right);

        let first = input.take(TeamSide::Right);
        assert!(first.swap_pressed);
        assert_eq!(first.direction, Vec2::new(-1.0, 0.0));

        let second = input.take(TeamSide::Right);
        assert!(!second.swap_pressed);
        // Direction is held until changed
        assert_eq!(second.direction, Vec2::new(-1.0, 0.0));
        assert_eq!(*input.get(TeamSide::Left), TeamInput::default());
    }
}
