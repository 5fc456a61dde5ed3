//! Event type definitions for the match event stream

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::ControlMode;
use crate::player::TeamSide;

/// All match events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // === Match Events ===
    /// Match started
    MatchStart {
        left: ControlMode,
        right: ControlMode,
        duration: f32,
        seed: u64,
    },
    /// Ball and players placed in kickoff formation
    Kickoff,
    /// Match ended
    MatchEnd {
        score_left: u32,
        score_right: u32,
        duration: f32,
    },

    // === Ball Events ===
    /// Agent released a pass
    Pass {
        team: TeamSide,
        from: usize,
        to: usize,
        target: Vec2,
    },
    /// Agent released a shot
    Shot { team: TeamSide, player: usize, target: Vec2 },

    // === Scoring Events ===
    /// Goal scored, credited to `team`
    Goal {
        team: TeamSide,
        score_left: u32,
        score_right: u32,
    },

    // === Control Events ===
    /// Human swapped the controlled player
    Swap { team: TeamSide, active_index: usize },
}

impl GameEvent {
    /// Short type code for compact log lines
    pub fn type_code(&self) -> &'static str {
        match self {
            GameEvent::MatchStart { .. } => "MS",
            GameEvent::Kickoff => "KO",
            GameEvent::MatchEnd { .. } => "ME",
            GameEvent::Pass { .. } => "P",
            GameEvent::Shot { .. } => "SH",
            GameEvent::Goal { .. } => "G",
            GameEvent::Swap { .. } => "SW",
        }
    }

    /// Team the event belongs to, if any
    pub fn team(&self) -> Option<TeamSide> {
        match self {
            GameEvent::Pass { team, .. }
            | GameEvent::Shot { team, .. }
            | GameEvent::Goal { team, .. }
            | GameEvent::Swap { team, .. } => Some(*team),
            _ => None,
        }
    }
}
