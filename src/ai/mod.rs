//! AI module - team agent (active/support roles), legacy single-player
//! chaser, and the controllers that pick between them and human input

mod controller;
mod decision;
mod legacy;
mod positioning;
mod shot_quality;
mod steering;

pub use controller::*;
pub use decision::*;
pub use legacy::*;
pub use positioning::*;
pub use shot_quality::*;
pub use steering::*;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Behaviors of the player nearest the ball
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
pub enum ActiveBehavior {
    /// Move to the ball, approaching from behind
    #[default]
    ChaseBall,
    /// In possession, carrying the ball toward a better shooting position
    Dribble,
    /// Released a pass this frame
    Pass,
    /// Released a shot this frame
    Shoot,
    /// Declared for interface compatibility; the active-role flow never selects it
    Defend,
}

/// Behaviors of the other player
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
pub enum SupportBehavior {
    /// Moving toward the best receiving point
    #[default]
    FindSpace,
    /// At the receiving point, tracking the ball
    WaitReceive,
}

/// Everything the agent remembers between frames
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct AgentState {
    pub active_behavior: ActiveBehavior,
    pub support_behavior: SupportBehavior,
    pub just_passed: bool,
    pub just_shot: bool,
    pub shot_target: Vec2,
    pub pass_cooldown: f32,
    pub shot_cooldown: f32,
    pub possession_timer: f32,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            active_behavior: ActiveBehavior::ChaseBall,
            support_behavior: SupportBehavior::FindSpace,
            just_passed: false,
            just_shot: false,
            shot_target: Vec2::ZERO,
            pass_cooldown: 0.0,
            shot_cooldown: 0.0,
            possession_timer: 0.0,
        }
    }
}

/// A pass released this frame, by team player index
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PassSignal {
    pub passer: usize,
    pub receiver: usize,
}

/// One-frame outputs of a team update. The driver turns these into ball
/// impulses; the agent never touches the ball itself.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct AgentSignals {
    pub pass: Option<PassSignal>,
    /// (shooter index, target)
    pub shot: Option<(usize, Vec2)>,
}

impl AgentSignals {
    pub fn is_empty(&self) -> bool {
        self.pass.is_none() && self.shot.is_none()
    }
}
