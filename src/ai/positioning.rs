//! Support positioning - grid search for the best receiving point

use bevy::prelude::*;

use crate::ball::Ball;
use crate::constants::*;
use crate::player::{Player, Team, TeamSide};
use crate::world::Field;

use super::shot_quality::{is_lane_clear, shooting_angle};

/// Score every grid candidate and return the best one.
///
/// Grid runs from `SUPPORT_GRID_MARGIN` to `width/height - margin` in steps of
/// `SUPPORT_GRID_STEP`, x-major. Falls back to the support player's own
/// position when the grid is empty.
pub fn optimal_receiving_point(
    support: &Player,
    active: &Player,
    ball: &Ball,
    field: &Field,
    side: TeamSide,
    opponents: &Team,
) -> Vec2 {
    first_best(grid_candidates(field), |candidate| {
        score_candidate(candidate, active, ball, field, side, opponents)
    })
    .unwrap_or(support.position)
}

/// Candidate points in search order
fn grid_candidates(field: &Field) -> impl Iterator<Item = Vec2> {
    let max_x = field.width - SUPPORT_GRID_MARGIN;
    let max_y = field.height - SUPPORT_GRID_MARGIN;
    let steps = |max: f32| {
        std::iter::successors(Some(SUPPORT_GRID_MARGIN), |v| Some(v + SUPPORT_GRID_STEP))
            .take_while(move |v| *v <= max)
    };
    steps(max_x).flat_map(move |x| steps(max_y).map(move |y| Vec2::new(x, y)))
}

/// Highest-scoring point. Only a strictly greater score replaces the
/// current best, so ties keep the earliest point.
fn first_best(points: impl Iterator<Item = Vec2>, score: impl Fn(Vec2) -> f32) -> Option<Vec2> {
    let mut best: Option<(Vec2, f32)> = None;
    for point in points {
        let s = score(point);
        if best.is_none_or(|(_, best_score)| s > best_score) {
            best = Some((point, s));
        }
    }
    best.map(|(point, _)| point)
}

/// Sum of the receiving-point terms for one candidate
pub fn score_candidate(
    candidate: Vec2,
    active: &Player,
    ball: &Ball,
    field: &Field,
    side: TeamSide,
    opponents: &Team,
) -> f32 {
    // Room away from the nearest opponent
    let mut score = opponents
        .players
        .iter()
        .map(|o| candidate.distance(o.position))
        .fold(f32::INFINITY, f32::min);

    // Open passing lane from the ball
    score += if is_lane_clear(ball.position, candidate, opponents, RECEIVE_LANE_CLEARANCE) {
        LANE_CLEAR_SCORE
    } else {
        LANE_BLOCKED_SCORE
    };

    // Upfield
    let progress = match side {
        TeamSide::Left => candidate.x / field.width,
        TeamSide::Right => 1.0 - candidate.x / field.width,
    };
    score += progress * ADVANCE_WEIGHT;

    // Spread from the active player
    let to_active = candidate.distance(active.position);
    score += if to_active > SPREAD_DISTANCE {
        SPREAD_WEIGHT
    } else {
        to_active / SPREAD_DISTANCE * SPREAD_WEIGHT
    };

    // Reachable by a pass
    let to_ball = candidate.distance(ball.position);
    score += if to_ball < REACH_DISTANCE {
        REACH_BONUS
    } else {
        -REACH_PENALTY * (to_ball / field.width)
    };

    // Lined up with the goal
    let goal_y = field.height / 2.0;
    score += (1.0 - (candidate.y - goal_y).abs() / (field.height / 2.0)) * ALIGNMENT_WEIGHT;

    score += shooting_angle(candidate, field, side) * SHOT_ANGLE_WEIGHT;

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opponents_at(a: Vec2, b: Vec2) -> Team {
        Team::new(a, b)
    }

    #[test]
    fn test_receiving_point_is_upfield_and_on_grid() {
        let field = Field::default();
        let active = Player::new(Vec2::new(15.0, 10.0));
        let support = Player::new(Vec2::new(10.0, 5.0));
        let ball = Ball::new(Vec2::new(16.0, 10.0), Vec2::ZERO);
        let opponents = opponents_at(Vec2::new(3.0, 3.0), Vec2::new(3.0, 17.0));

        let point = optimal_receiving_point(&support, &active, &ball, &field, TeamSide::Left, &opponents);
        assert!(point.x > field.width / 2.0);
        assert_eq!((point.x - SUPPORT_GRID_MARGIN) % SUPPORT_GRID_STEP, 0.0);
        assert_eq!((point.y - SUPPORT_GRID_MARGIN) % SUPPORT_GRID_STEP, 0.0);
    }

    #[test]
    fn test_receiving_point_mirrors_for_right_team() {
        let field = Field::default();
        let active = Player::new(Vec2::new(25.0, 10.0));
        let support = Player::new(Vec2::new(30.0, 5.0));
        let ball = Ball::new(Vec2::new(24.0, 10.0), Vec2::ZERO);
        let opponents = opponents_at(Vec2::new(37.0, 3.0), Vec2::new(37.0, 17.0));

        let point = optimal_receiving_point(&support, &active, &ball, &field, TeamSide::Right, &opponents);
        assert!(point.x < field.width / 2.0);
    }

    #[test]
    fn test_blocked_lane_scores_lower() {
        let field = Field::default();
        let active = Player::new(Vec2::new(15.0, 10.0));
        let ball = Ball::new(Vec2::new(16.0, 10.0), Vec2::ZERO);
        let candidate = Vec2::new(26.0, 11.0);

        // Same nearest-opponent distance, only the lane differs
        let in_lane = Vec2::new(21.0, 10.5);
        let beside = Vec2::new(26.0, 11.0 + candidate.distance(in_lane));
        let blocking = opponents_at(in_lane, Vec2::new(3.0, 17.0));
        let open = opponents_at(beside, Vec2::new(3.0, 17.0));

        let clear = score_candidate(candidate, &active, &ball, &field, TeamSide::Left, &open);
        let blocked = score_candidate(candidate, &active, &ball, &field, TeamSide::Left, &blocking);
        assert!((clear - blocked - (LANE_CLEAR_SCORE - LANE_BLOCKED_SCORE)).abs() < 1e-3);
    }

    #[test]
    fn test_distant_opponent_scores_higher() {
        let field = Field::default();
        let active = Player::new(Vec2::new(15.0, 10.0));
        let ball = Ball::new(Vec2::new(16.0, 10.0), Vec2::ZERO);
        let candidate = Vec2::new(26.0, 11.0);
        let near = Vec2::new(29.0, 14.0);
        let far = Vec2::new(38.0, 18.0);

        let crowded = score_candidate(candidate, &active, &ball, &field, TeamSide::Left, &opponents_at(near, Vec2::new(3.0, 17.0)));
        let roomy = score_candidate(candidate, &active, &ball, &field, TeamSide::Left, &opponents_at(far, Vec2::new(3.0, 17.0)));

        let expected = candidate.distance(far) - candidate.distance(near);
        assert!((roomy - crowded - expected).abs() < 1e-3, "{} vs {}", roomy - crowded, expected);
    }

    #[test]
    fn test_grid_order_is_x_major() {
        let field = Field::new(9.0, 9.0);
        let points: Vec<Vec2> = grid_candidates(&field).collect();
        assert_eq!(
            points,
            vec![
                Vec2::new(2.0, 2.0),
                Vec2::new(2.0, 5.0),
                Vec2::new(5.0, 2.0),
                Vec2::new(5.0, 5.0),
            ]
        );
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        let field = Field::default();
        let flat = first_best(grid_candidates(&field), |_| 1.0);
        assert_eq!(flat, Some(Vec2::new(SUPPORT_GRID_MARGIN, SUPPORT_GRID_MARGIN)));

        // Rows 8 and 11 sit either side of y = 9.5 and score alike; 8 comes first
        let picked = first_best(grid_candidates(&field), |p| -(p.x - 20.0).abs() - (p.y - 9.5).abs());
        assert_eq!(picked, Some(Vec2::new(20.0, 8.0)));

        // A later, strictly better point still wins
        let later = first_best(grid_candidates(&field), |p| if p == Vec2::new(20.0, 11.0) { 1.5 } else { 1.0 });
        assert_eq!(later, Some(Vec2::new(20.0, 11.0)));
    }

    #[test]
    fn test_empty_grid_keeps_current_position() {
        // Too small for any grid point
        let field = Field::new(3.0, 3.0);
        let support = Player::new(Vec2::new(1.2, 1.4));
        let active = Player::new(Vec2::new(1.0, 1.0));
        let ball = Ball::new(Vec2::new(1.5, 1.5), Vec2::ZERO);
        let opponents = opponents_at(Vec2::new(2.0, 2.0), Vec2::new(2.0, 1.0));

        let point = optimal_receiving_point(&support, &active, &ball, &field, TeamSide::Left, &opponents);
        assert_eq!(point, support.position);
    }
}
