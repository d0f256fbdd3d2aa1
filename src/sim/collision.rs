//! Circle-based collision checks
//!
//! Everything in the game is a circle for collision purposes: shots, the
//! ship's hitbox, and enemies. All checks are plain pairwise distance tests.

use glam::Vec2;

use crate::consts::*;

/// True if two points are closer than `radius`
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Player shot vs enemy: the enemy's hit circle is half its sprite size
/// plus a little slack so grazing shots still connect.
#[inline]
pub fn shot_hits_enemy(shot_pos: Vec2, enemy_pos: Vec2, enemy_size: f32) -> bool {
    within(shot_pos, enemy_pos, enemy_size / 2.0 + PROJECTILE_HIT_SLACK)
}

/// Enemy body vs the ship
#[inline]
pub fn enemy_hits_player(enemy_pos: Vec2, player_pos: Vec2) -> bool {
    within(enemy_pos, player_pos, PLAYER_ENEMY_HIT_RADIUS)
}

/// Virus shot vs the ship
#[inline]
pub fn shot_hits_player(shot_pos: Vec2, player_pos: Vec2) -> bool {
    within(shot_pos, player_pos, PLAYER_SHOT_HIT_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_boundary() {
        let a = Vec2::new(0.0, 0.0);
        assert!(within(a, Vec2::new(3.0, 4.0), 5.1));
        // Exactly at the radius is a miss (strict inequality)
        assert!(!within(a, Vec2::new(3.0, 4.0), 5.0));
    }

    #[test]
    fn test_shot_hits_enemy_uses_half_size_plus_slack() {
        let enemy = Vec2::new(100.0, 100.0);
        let size = 40.0;
        // 24 px away: inside 20 + 5
        assert!(shot_hits_enemy(Vec2::new(100.0, 124.0), enemy, size));
        // 26 px away: outside
        assert!(!shot_hits_enemy(Vec2::new(100.0, 126.0), enemy, size));
    }

    #[test]
    fn test_big_enemies_are_easier_to_hit() {
        let enemy = Vec2::new(0.0, 0.0);
        let shot = Vec2::new(0.0, 30.0);
        assert!(!shot_hits_enemy(shot, enemy, 40.0));
        assert!(shot_hits_enemy(shot, enemy, 60.0));
    }

    #[test]
    fn test_player_hit_radii() {
        let player = Vec2::new(400.0, 500.0);
        assert!(enemy_hits_player(Vec2::new(400.0, 461.0), player));
        assert!(!enemy_hits_player(Vec2::new(400.0, 459.0), player));

        assert!(shot_hits_player(Vec2::new(400.0, 481.0), player));
        assert!(!shot_hits_player(Vec2::new(400.0, 479.0), player));
    }
}
