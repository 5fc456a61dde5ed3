//! Strikers - a 2v2 arcade hockey/soccer simulation built on Bevy
//!
//! This crate provides the match physics, the team and legacy agents, and
//! the headless match runners, organized into modules.

// Core modules
pub mod constants;
pub mod events;
pub mod helpers;
pub mod simulation;
pub mod testing;

// Game logic modules
pub mod ai;
pub mod ball;
pub mod input;
pub mod player;
pub mod scoring;
pub mod world;

// Re-export commonly used types for convenience
pub use ai::{
    ActiveBehavior, AgentSignals, AgentState, ControlMode, LegacyAgent, SupportBehavior,
    TeamAgent, TeamController,
};
pub use ball::{Ball, KickKind, apply_kick};
pub use constants::*;
pub use events::{BusEvent, EventBus, GameEvent};
pub use helpers::*;
pub use input::{PlayerInput, TeamInput};
pub use player::{Player, Team, TeamSide};
pub use scoring::MatchClock;
pub use simulation::{MatchConfig, MatchResult, MatchState, step_frame};
pub use world::{Field, GoalResult, Obstacle, ObstacleLayout};
