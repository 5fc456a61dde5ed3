//! Shot and lane evaluation: visible goal angle, best aim point, lane checks

use bevy::prelude::*;

use crate::constants::*;
use crate::helpers::{point_segment_distance, subtended_angle};
use crate::player::{Team, TeamSide};
use crate::world::Field;

/// Angle the attacked goal mouth subtends from `position`, in [0, PI]
pub fn shooting_angle(position: Vec2, field: &Field, side: TeamSide) -> f32 {
    let (top, bottom) = field.attack_goal_posts(side);
    subtended_angle(position, top, bottom)
}

/// A segment is clear when every opponent is farther than `clearance` from it
pub fn is_lane_clear(from: Vec2, to: Vec2, opponents: &Team, clearance: f32) -> bool {
    opponents
        .players
        .iter()
        .all(|opp| point_segment_distance(opp.position, from, to) > clearance)
}

/// Distance from `position` to the closest opponent
pub fn nearest_opponent_distance(position: Vec2, opponents: &Team) -> f32 {
    opponents
        .players
        .iter()
        .map(|opp| opp.position.distance(position))
        .fold(f32::INFINITY, f32::min)
}

/// Sample points across the goal mouth and pick the one whose shooting lane
/// keeps the most clearance from opponents, favoring the middle of the goal.
/// Ties keep the first sample, counting from the top post.
pub fn best_shot_target(position: Vec2, field: &Field, side: TeamSide, opponents: &Team) -> Vec2 {
    let goal_x = field.attack_goal_x(side);
    let top = field.goal_top();
    let mid = (SHOT_SAMPLES - 1) as f32 / 2.0;

    let mut best = Vec2::new(goal_x, field.height / 2.0);
    let mut best_score = f32::NEG_INFINITY;

    for i in 0..SHOT_SAMPLES {
        let t = i as f32 / (SHOT_SAMPLES - 1) as f32;
        let target = Vec2::new(goal_x, top + t * field.goal_height);

        let clearance = opponents
            .players
            .iter()
            .map(|opp| point_segment_distance(opp.position, position, target))
            .fold(f32::INFINITY, f32::min);
        let center_bonus = (1.0 - (i as f32 - mid).abs() / mid) * SHOT_CENTER_BONUS;
        let score = clearance + center_bonus;

        if score > best_score {
            best_score = score;
            best = target;
        }
    }

    best
}

/// Grade a shot at `target`: "good" needs a clear line, some angle and range,
/// "great" a wider angle from closer in. Range is measured to the goal center.
pub fn shot_grade(position: Vec2, target: Vec2, field: &Field, side: TeamSide, opponents: &Team) -> ShotGrade {
    let angle = shooting_angle(position, field, side);
    let dist = position.distance(field.attack_goal_center(side));
    let clear = is_lane_clear(position, target, opponents, SHOT_CLEARANCE);

    if clear && angle > GREAT_SHOT_ANGLE && dist < GREAT_SHOT_RANGE {
        ShotGrade::Great
    } else if clear && angle > GOOD_SHOT_ANGLE && dist < GOOD_SHOT_RANGE {
        ShotGrade::Good
    } else {
        ShotGrade::None
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ShotGrade {
    None,
    Good,
    Great,
}

impl ShotGrade {
    /// Great shots are always taken, good ones only when pressed
    pub fn worth_taking(self, under_pressure: bool) -> bool {
        match self {
            ShotGrade::Great => true,
            ShotGrade::Good => under_pressure,
            ShotGrade::None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn far_opponents() -> Team {
        Team::new(Vec2::new(5.0, 5.0), Vec2::new(5.0, 15.0))
    }

    #[test]
    fn test_shooting_angle_grows_toward_goal() {
        let field = Field::default();
        let center_y = field.height / 2.0;
        let mut last = 0.0;
        for x in [10.0, 20.0, 30.0, 35.0, 38.0] {
            let angle = shooting_angle(Vec2::new(x, center_y), &field, TeamSide::Left);
            assert!(angle > last, "angle at x={x} should exceed {last}");
            assert!(angle <= std::f32::consts::PI);
            last = angle;
        }
    }

    #[test]
    fn test_shooting_angle_mirrors_for_right_team() {
        let field = Field::default();
        let left = shooting_angle(Vec2::new(30.0, 8.0), &field, TeamSide::Left);
        let right = shooting_angle(Vec2::new(10.0, 8.0), &field, TeamSide::Right);
        assert!((left - right).abs() < 1e-5);
    }

    #[test]
    fn test_best_target_centered_when_unmarked() {
        let field = Field::default();
        let target = best_shot_target(Vec2::new(39.0, 10.0), &field, TeamSide::Left, &far_opponents());
        assert_eq!(target, Vec2::new(field.width, 10.0));
    }

    #[test]
    fn test_best_target_avoids_defender() {
        let field = Field::default();
        // Defender sitting on the upper half of the mouth
        let opponents = Team::new(Vec2::new(38.0, 8.0), Vec2::new(5.0, 15.0));
        let target = best_shot_target(Vec2::new(32.0, 10.0), &field, TeamSide::Left, &opponents);
        assert_eq!(target.x, field.width);
        assert!(target.y > field.height / 2.0);
    }

    #[test]
    fn test_lane_blocked_by_opponent() {
        let opponents = Team::new(Vec2::new(15.0, 10.5), Vec2::new(5.0, 15.0));
        assert!(!is_lane_clear(Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0), &opponents, 2.5));
        assert!(is_lane_clear(Vec2::new(10.0, 2.0), Vec2::new(20.0, 2.0), &opponents, 2.5));
    }

    #[test]
    fn test_shot_grades() {
        let field = Field::default();
        let opponents = far_opponents();
        let grade = |pos: Vec2| {
            let target = best_shot_target(pos, &field, TeamSide::Left, &opponents);
            shot_grade(pos, target, &field, TeamSide::Left, &opponents)
        };
        assert_eq!(grade(Vec2::new(39.0, 10.0)), ShotGrade::Great);
        assert_eq!(grade(Vec2::new(25.0, 10.0)), ShotGrade::Good);
        assert_eq!(grade(Vec2::new(20.0, 10.0)), ShotGrade::None);
    }

    #[test]
    fn test_good_shot_needs_pressure() {
        assert!(ShotGrade::Great.worth_taking(false));
        assert!(ShotGrade::Good.worth_taking(true));
        assert!(!ShotGrade::Good.worth_taking(false));
        assert!(!ShotGrade::None.worth_taking(true));
    }
}
