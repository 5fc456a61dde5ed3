//! Metrics collection for headless matches

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::ControlMode;
use crate::events::GameEvent;
use crate::player::TeamSide;
use crate::scoring::winner;

/// Statistics for one team during a match
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub goals: u32,
    /// Shots released
    pub shots: u32,
    /// Passes released
    pub passes: u32,
    /// Human swaps
    pub swaps: u32,
    /// Time a player of this team was closest to the ball while touching distance
    pub possession_time: f32,
    /// Total distance covered by both players
    pub distance_traveled: f32,
    /// Goals per shot (finalized after match)
    pub conversion: f32,
}

impl TeamStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate derived statistics
    pub fn finalize(&mut self) {
        if self.shots > 0 {
            self.conversion = self.goals as f32 / self.shots as f32;
        }
    }

    /// Count a match event belonging to this team
    pub fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Shot { .. } => self.shots += 1,
            GameEvent::Pass { .. } => self.passes += 1,
            GameEvent::Swap { .. } => self.swaps += 1,
            GameEvent::Goal { .. } => self.goals += 1,
            _ => {}
        }
    }
}

/// Result of a single match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Match duration (seconds)
    pub duration: f32,
    pub score_left: u32,
    pub score_right: u32,
    /// Winner ("left", "right", or "tie")
    pub winner: String,
    pub left_control: ControlMode,
    pub right_control: ControlMode,
    pub left: TeamStats,
    pub right: TeamStats,
    /// Seed used for obstacle generation
    pub seed: u64,
}

impl MatchResult {
    pub fn determine_winner(&mut self) {
        self.winner = match winner(self.score_left, self.score_right) {
            Some(side) => side.to_string(),
            None => "tie".to_string(),
        };
    }
}

/// Per-match accumulator
#[derive(Resource, Debug, Clone, Default)]
pub struct MatchMetrics {
    pub left: TeamStats,
    pub right: TeamStats,
    pub elapsed: f32,
    /// Time since the last goal
    pub time_since_score: f32,
    /// Previous player positions, for distance tracking
    pub last_positions: Option<[[Vec2; 2]; 2]>,
}

impl MatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut TeamStats {
        match side {
            TeamSide::Left => &mut self.left,
            TeamSide::Right => &mut self.right,
        }
    }

    /// Route a bus event to the owning team's stats
    pub fn record_event(&mut self, event: &GameEvent) {
        if let Some(side) = event.team() {
            self.team_mut(side).record(event);
        }
        if matches!(event, GameEvent::Goal { .. }) {
            self.time_since_score = 0.0;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Aggregate over a batch of matches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub matches: u32,
    pub left_wins: u32,
    pub right_wins: u32,
    pub ties: u32,
    pub total_left: u32,
    pub total_right: u32,
    pub avg_left: f32,
    pub avg_right: f32,
    pub avg_shots: f32,
    pub avg_passes: f32,
}

impl BatchSummary {
    pub fn from_results(results: &[MatchResult]) -> Self {
        let mut summary = Self {
            matches: results.len() as u32,
            ..Default::default()
        };
        if results.is_empty() {
            return summary;
        }

        let mut shots = 0;
        let mut passes = 0;
        for result in results {
            match result.winner.as_str() {
                "left" => summary.left_wins += 1,
                "right" => summary.right_wins += 1,
                _ => summary.ties += 1,
            }
            summary.total_left += result.score_left;
            summary.total_right += result.score_right;
            shots += result.left.shots + result.right.shots;
            passes += result.left.passes + result.right.passes;
        }

        let n = results.len() as f32;
        summary.avg_left = summary.total_left as f32 / n;
        summary.avg_right = summary.total_right as f32 / n;
        summary.avg_shots = shots as f32 / n;
        summary.avg_passes = passes as f32 / n;
        summary
    }

    /// Short human-readable report
    pub fn format_table(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("\nResults over {} matches:\n\n", self.matches));
        output.push_str(&format!(
            "{:>8} | {:>8} | {:>8}\n",
            "Left", "Ties", "Right"
        ));
        output.push_str(&format!("{:-<8}-+-{:-<8}-+-{:-<8}\n", "", "", ""));
        output.push_str(&format!(
            "{:>8} | {:>8} | {:>8}\n",
            self.left_wins, self.ties, self.right_wins
        ));
        output.push_str(&format!(
            "\nTotal score: {} - {} (avg: {:.1} - {:.1})\n",
            self.total_left, self.total_right, self.avg_left, self.avg_right
        ));
        output.push_str(&format!(
            "Per match: {:.1} shots, {:.1} passes\n",
            self.avg_shots, self.avg_passes
        ));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score_left: u32, score_right: u32) -> MatchResult {
        let mut result = MatchResult {
            duration: 60.0,
            score_left,
            score_right,
            winner: String::new(),
            left_control: ControlMode::Agent,
            right_control: ControlMode::Legacy,
            left: TeamStats {
                shots: 4,
                passes: 2,
                ..Default::default()
            },
            right: TeamStats::new(),
            seed: 1,
        };
        result.determine_winner();
        result
    }

    #[test]
    fn test_winner_strings() {
        assert_eq!(result(2, 1).winner, "left");
        assert_eq!(result(0, 3).winner, "right");
        assert_eq!(result(1, 1).winner, "tie");
    }

    #[test]
    fn test_events_routed_to_team() {
        let mut metrics = MatchMetrics::new();
        metrics.time_since_score = 5.0;
        metrics.record_event(&GameEvent::Pass {
            team: TeamSide::Right,
            from: 0,
            to: 1,
            target: Vec2::ZERO,
        });
        metrics.record_event(&GameEvent::Goal {
            team: TeamSide::Left,
            score_left: 1,
            score_right: 0,
        });
        metrics.record_event(&GameEvent::Kickoff);

        assert_eq!(metrics.right.passes, 1);
        assert_eq!(metrics.left.goals, 1);
        assert_eq!(metrics.time_since_score, 0.0);
    }

    #[test]
    fn test_conversion() {
        let mut stats = TeamStats {
            goals: 1,
            shots: 4,
            ..Default::default()
        };
        stats.finalize();
        assert_eq!(stats.conversion, 0.25);
    }

    #[test]
    fn test_batch_summary() {
        let summary = BatchSummary::from_results(&[result(2, 1), result(0, 3), result(1, 1)]);
        assert_eq!(summary.matches, 3);
        assert_eq!((summary.left_wins, summary.ties, summary.right_wins), (1, 1, 1));
        assert_eq!(summary.total_left, 3);
        assert_eq!(summary.avg_right, 5.0 / 3.0);
        assert_eq!(summary.avg_shots, 4.0);
    }

    #[test]
    fn test_result_serializes() {
        let json = serde_json::to_string(&result(1, 0)).unwrap();
        assert!(json.contains("\"winner\":\"left\""));
        assert!(json.contains("\"right_control\":\"legacy\""));
    }
}
