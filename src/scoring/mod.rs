//! Scoring module - goal awards, kickoff formation and the match clock

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ball::Ball;
use crate::constants::*;
use crate::player::{Team, TeamSide};
use crate::world::{Field, GoalResult};

/// Credit a goal to the scoring team. Returns the scoring side.
pub fn award_goal(teams: &mut [Team; 2], result: GoalResult) -> Option<TeamSide> {
    let side = result.scoring_side()?;
    teams[side.index()].score += 1;
    info!(
        "GOAL! Left: {} Right: {}",
        teams[TeamSide::Left.index()].score,
        teams[TeamSide::Right.index()].score
    );
    Some(side)
}

/// Kickoff spots for one team, mirrored for the right side
pub fn kickoff_positions(field: &Field, side: TeamSide) -> [Vec2; 2] {
    let x = match side {
        TeamSide::Left => field.width * KICKOFF_DEPTH,
        TeamSide::Right => field.width * (1.0 - KICKOFF_DEPTH),
    };
    let mid = field.height / 2.0;
    [
        Vec2::new(x, field.height * (0.5 - KICKOFF_SPREAD)),
        Vec2::new(x, mid + field.height * KICKOFF_SPREAD),
    ]
}

/// Ball to the center at rest, players to their kickoff spots.
/// Scores and `active_index` are kept.
pub fn reset_to_kickoff(field: &Field, ball: &mut Ball, teams: &mut [Team; 2]) {
    ball.reset(field.center(), Vec2::ZERO);
    for side in TeamSide::BOTH {
        let spots = kickoff_positions(field, side);
        for (player, spot) in teams[side.index()].players.iter_mut().zip(spots) {
            player.position = spot;
        }
    }
}

/// Which side won, `None` for a draw
pub fn winner(score_left: u32, score_right: u32) -> Option<TeamSide> {
    match score_left.cmp(&score_right) {
        std::cmp::Ordering::Greater => Some(TeamSide::Left),
        std::cmp::Ordering::Less => Some(TeamSide::Right),
        std::cmp::Ordering::Equal => None,
    }
}

/// Match countdown
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchClock {
    pub duration: f32,
    pub remaining: f32,
    pub finished: bool,
}

impl Default for MatchClock {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_DURATION)
    }
}

impl MatchClock {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: duration,
            finished: false,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.duration - self.remaining
    }

    /// Count down. Returns true on the frame the clock runs out.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.finished {
            return false;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        if self.remaining <= 0.0 {
            self.finished = true;
            return true;
        }
        false
    }
}
