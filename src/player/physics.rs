//! Player movement and player-player collision

use bevy::prelude::*;

use crate::constants::COINCIDENT_EPSILON;
use crate::helpers::Vec2Ext;
use crate::player::components::*;
use crate::world::Field;

/// Keep a player's circle inside the field walls
pub fn clamp_to_field(player: &mut Player, field: &Field) {
    player.position.x = player
        .position
        .x
        .clamp(player.radius, field.width - player.radius);
    player.position.y = player
        .position
        .y
        .clamp(player.radius, field.height - player.radius);
}

/// Constant-speed movement in a digital direction (human control).
/// The direction does not need to be normalized; zero means stand still.
pub fn move_player(player: &mut Player, direction: Vec2, dt: f32, field: &Field) {
    let dir = direction.safe_normalize();
    player.position += dir * player.speed * dt;
    clamp_to_field(player, field);
}

/// Push two overlapping players apart by half the overlap each.
/// Positional correction only. Returns true on contact.
pub fn resolve_player_pair(a: &mut Player, b: &mut Player) -> bool {
    let diff = b.position - a.position;
    let dist = diff.length();
    let min_dist = a.radius + b.radius;

    if dist >= min_dist {
        return false;
    }

    let normal = if dist > COINCIDENT_EPSILON {
        diff / dist
    } else {
        Vec2::Y
    };
    let half_overlap = (min_dist - dist) * 0.5;
    a.position -= normal * half_overlap;
    b.position += normal * half_overlap;
    true
}

/// Resolve every unique pair among the four players: teammates first,
/// then each left player against each right player.
pub fn resolve_all_player_collisions(teams: &mut [Team; 2]) {
    let [left, right] = teams;

    {
        let [a, b] = &mut left.players;
        resolve_player_pair(a, b);
    }
    {
        let [a, b] = &mut right.players;
        resolve_player_pair(a, b);
    }
    for i in 0..2 {
        for j in 0..2 {
            resolve_player_pair(&mut left.players[i], &mut right.players[j]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PLAYER_RADIUS;

    #[test]
    fn test_pair_separates_symmetrically() {
        let mut a = Player::new(Vec2::new(10.0, 10.0));
        let mut b = Player::new(Vec2::new(11.0, 10.0));
        assert!(resolve_player_pair(&mut a, &mut b));

        let dist = a.position.distance(b.position);
        assert!((dist - 2.0 * PLAYER_RADIUS).abs() < 1e-5);
        // Each moved the same amount in opposite directions
        let moved_a = 10.0 - a.position.x;
        let moved_b = b.position.x - 11.0;
        assert!((moved_a - moved_b).abs() < 1e-6);
        assert!((moved_a - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_pair_coincident_is_finite() {
        let mut a = Player::new(Vec2::new(5.0, 5.0));
        let mut b = Player::new(Vec2::new(5.0, 5.0));
        assert!(resolve_player_pair(&mut a, &mut b));
        assert!(a.position.is_finite() && b.position.is_finite());
        assert!((a.position.distance(b.position) - 2.0 * PLAYER_RADIUS).abs() < 1e-5);
    }

    #[test]
    fn test_move_player_clamps_to_field() {
        let field = Field::default();
        let mut player = Player::new(Vec2::new(1.0, 10.0));
        move_player(&mut player, Vec2::new(-1.0, 0.0), 1.0, &field);
        assert_eq!(player.position.x, player.radius);

        // Diagonal input moves at the same speed as straight input
        let mut player = Player::new(Vec2::new(20.0, 10.0));
        move_player(&mut player, Vec2::new(1.0, 1.0), 0.1, &field);
        let moved = player.position.distance(Vec2::new(20.0, 10.0));
        assert!((moved - player.speed * 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_all_pairs_resolved() {
        let mut teams = [
            Team::new(Vec2::new(10.0, 10.0), Vec2::new(10.5, 10.0)),
            Team::new(Vec2::new(30.0, 10.0), Vec2::new(30.2, 10.3)),
        ];
        resolve_all_player_collisions(&mut teams);
        let [l0, l1] = teams[0].positions();
        let [r0, r1] = teams[1].positions();
        assert!(l0.distance(l1) >= 2.0 * PLAYER_RADIUS - 1e-4);
        assert!(r0.distance(r1) >= 2.0 * PLAYER_RADIUS - 1e-4);
    }
}
