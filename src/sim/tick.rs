//! Fixed timestep simulation tick
//!
//! The per-frame update loop: advances entity positions, runs the pairwise
//! collision checks, spawns enemies, and handles level progression.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::state::{Enemy, EnemyKind, GameEvent, GamePhase, GameState, ParticleColor, Projectile};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Held fire key
    pub fire: bool,
    /// Start a run from the menu (one-shot)
    pub start: bool,
    /// Restart after game over / victory (one-shot)
    pub restart: bool,
}

impl TickInput {
    /// Held directions as a unit-per-axis thrust vector
    pub fn thrust(&self) -> Vec2 {
        let mut t = Vec2::ZERO;
        if self.left {
            t.x -= 1.0;
        }
        if self.right {
            t.x += 1.0;
        }
        if self.up {
            t.y -= 1.0;
        }
        if self.down {
            t.y += 1.0;
        }
        t
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Shake decays in every phase
    state.screen_shake = (state.screen_shake - dt).max(0.0);

    // Particles keep animating over menus and end screens
    for p in state.particles.iter_mut() {
        p.pos += p.vel * dt;
        p.life -= dt;
    }
    state.particles.retain(|p| p.life > 0.0);

    // Phase transitions driven by one-shot inputs
    match state.phase {
        GamePhase::Menu if input.start => state.start(),
        GamePhase::GameOver | GamePhase::Victory if input.restart => state.start(),
        _ => {}
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    // Ship movement and shooting
    state.player.integrate(input.thrust(), state.arena, dt);
    state.player.shoot_cooldown = state.player.shoot_cooldown.saturating_sub(1);
    if input.fire && state.player.shoot_cooldown == 0 {
        state.shots.push(Projectile {
            pos: state.player.pos - Vec2::new(0.0, PROJECTILE_MUZZLE_OFFSET),
            vel: Vec2::new(0.0, -PROJECTILE_SPEED),
        });
        state.player.shoot_cooldown = SHOOT_COOLDOWN_TICKS;
        state.push_event(GameEvent::ShotFired);
    }

    // Player shots fly up and vanish above the arena
    for shot in state.shots.iter_mut() {
        shot.pos += shot.vel * dt;
    }
    state.shots.retain(|s| s.pos.y > -10.0);

    // Virus shots fly down; check ship hits with index walk so removal
    // doesn't skip the next shot
    let mut i = 0;
    while i < state.enemy_shots.len() {
        let shot = &mut state.enemy_shots[i];
        shot.pos += shot.vel * dt;
        let pos = shot.pos;

        if collision::shot_hits_player(pos, state.player.pos) {
            state.enemy_shots.remove(i);
            state.spawn_burst(pos, ParticleColor::Toxic);
            state.take_damage();
            continue;
        }
        if pos.y > state.arena.y {
            state.enemy_shots.remove(i);
            continue;
        }
        i += 1;
    }

    // Spawning
    state.spawn_timer += dt;
    if state.spawn_timer > state.level().spawn_interval {
        spawn_enemy(state);
        state.spawn_timer = 0.0;
    }

    // Enemy movement and virus fire
    let mut virus_muzzles: Vec<Vec2> = Vec::new();
    for enemy in state.enemies.iter_mut() {
        enemy.pos.y += enemy.speed * dt;

        if enemy.kind == EnemyKind::Virus {
            enemy.shoot_timer += 1;
            if enemy.shoot_timer >= VIRUS_SHOOT_INTERVAL_TICKS {
                virus_muzzles.push(enemy.pos + Vec2::new(0.0, VIRUS_MUZZLE_OFFSET));
                enemy.shoot_timer = 0;
            }
        }
    }
    for pos in virus_muzzles {
        state.enemy_shots.push(Projectile {
            pos,
            vel: Vec2::new(0.0, ENEMY_PROJECTILE_SPEED),
        });
    }

    // Enemy collisions: ship contact, shot hits, and off-screen culling
    let mut e = 0;
    while e < state.enemies.len() {
        let pos = state.enemies[e].pos;
        let size = state.enemies[e].size;
        let kind = state.enemies[e].kind;

        if collision::enemy_hits_player(pos, state.player.pos) {
            state.enemies.remove(e);
            state.spawn_burst(pos, ParticleColor::Hull);
            state.take_damage();
            continue;
        }

        if let Some(s) = state
            .shots
            .iter()
            .position(|shot| collision::shot_hits_enemy(shot.pos, pos, size))
        {
            state.shots.remove(s);
            state.enemies.remove(e);
            destroy_enemy(state, pos, kind);
            continue;
        }

        if pos.y > state.arena.y + ENEMY_DESPAWN_MARGIN {
            state.enemies.remove(e);
            continue;
        }

        e += 1;
    }
}

/// Spawn a single enemy just above the arena
fn spawn_enemy(state: &mut GameState) {
    // Arena too narrow to place an enemy (degenerate resize)
    if state.arena.x <= ENEMY_SPAWN_MARGIN * 2.0 {
        return;
    }

    let level = state.level();
    let x = state
        .rng
        .random_range(ENEMY_SPAWN_MARGIN..state.arena.x - ENEMY_SPAWN_MARGIN);
    let speed = ENEMY_BASE_SPEED
        + state.rng.random::<f32>() * ENEMY_SPEED_JITTER
        + state.level_index as f32 * ENEMY_LEVEL_SPEED_BONUS;
    let size = ENEMY_MIN_SIZE + state.rng.random::<f32>() * ENEMY_SIZE_JITTER;
    let kind = if state.rng.random::<f32>() < level.virus_chance {
        EnemyKind::Virus
    } else {
        EnemyKind::Cookie
    };
    // Stagger virus fire so a wave doesn't volley all at once
    let shoot_timer = state.rng.random_range(0..VIRUS_SHOOT_STAGGER_TICKS);

    state.enemies.push(Enemy {
        pos: Vec2::new(x, ENEMY_SPAWN_Y),
        speed,
        size,
        kind,
        shoot_timer,
    });
}

/// Score a kill: burst, event, and level progression
fn destroy_enemy(state: &mut GameState, pos: Vec2, kind: EnemyKind) {
    state.kills_this_level += 1;
    let color = match kind {
        EnemyKind::Virus => ParticleColor::Toxic,
        EnemyKind::Cookie => ParticleColor::Crumb,
    };
    state.spawn_burst(pos, color);
    state.push_event(GameEvent::EnemyDestroyed { kind });

    if state.kills_this_level >= KILLS_PER_LEVEL {
        state.kills_this_level = 0;
        if state.level_index as usize + 1 >= crate::tuning::LEVELS.len() {
            // Final level cleared
            state.phase = GamePhase::Victory;
            state.push_event(GameEvent::Victory);
        } else {
            state.level_index += 1;
            state.push_event(GameEvent::LevelUp {
                level: state.level_index,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning;

    fn playing_state() -> GameState {
        let mut s = GameState::new(42, 800.0, 600.0);
        s.start();
        s.take_events();
        s
    }

    fn run_ticks(state: &mut GameState, input: &TickInput, n: u32) {
        for _ in 0..n {
            tick(state, input, SIM_DT);
        }
    }

    fn cookie_at(pos: Vec2) -> Enemy {
        Enemy {
            pos,
            speed: 120.0,
            size: 40.0,
            kind: EnemyKind::Cookie,
            shoot_timer: 0,
        }
    }

    #[test]
    fn test_menu_phase_is_inert() {
        let mut s = GameState::new(42, 800.0, 600.0);
        run_ticks(&mut s, &TickInput::default(), 300);
        assert_eq!(s.phase, GamePhase::Menu);
        assert!(s.enemies.is_empty());
        assert_eq!(s.time_ticks, 0);
    }

    #[test]
    fn test_start_input_begins_run() {
        let mut s = GameState::new(42, 800.0, 600.0);
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut s, &input, SIM_DT);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_enemies_spawn_on_level_cadence() {
        let mut s = playing_state();
        // Level 1 spawns every 1.0 s; after 2 s of ticks we expect 1-2 enemies
        run_ticks(&mut s, &TickInput::default(), 120);
        assert!(!s.enemies.is_empty());
        assert!(s.enemies.len() <= 2);
        for e in &s.enemies {
            assert_eq!(e.kind, EnemyKind::Cookie, "level 1 is virus-free");
            assert!(e.size >= ENEMY_MIN_SIZE && e.size <= ENEMY_MIN_SIZE + ENEMY_SIZE_JITTER);
        }
    }

    #[test]
    fn test_held_fire_respects_cooldown() {
        let mut s = playing_state();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        run_ticks(&mut s, &input, 60);
        // One shot immediately, then every 15 ticks: ticks 1, 16, 31, 46
        let fired = s
            .take_events()
            .iter()
            .filter(|e| **e == GameEvent::ShotFired)
            .count();
        assert_eq!(fired, 4);
    }

    #[test]
    fn test_shots_despawn_above_arena() {
        let mut s = playing_state();
        s.shots.push(Projectile {
            pos: Vec2::new(400.0, 5.0),
            vel: Vec2::new(0.0, -PROJECTILE_SPEED),
        });
        run_ticks(&mut s, &TickInput::default(), 5);
        assert!(s.shots.is_empty());
    }

    #[test]
    fn test_shot_destroys_enemy() {
        let mut s = playing_state();
        s.enemies.push(cookie_at(Vec2::new(400.0, 300.0)));
        s.shots.push(Projectile {
            pos: Vec2::new(400.0, 310.0),
            vel: Vec2::ZERO,
        });

        tick(&mut s, &TickInput::default(), SIM_DT);

        assert!(s.enemies.is_empty());
        assert!(s.shots.is_empty());
        assert_eq!(s.kills_this_level, 1);
        assert_eq!(s.particles.len(), PARTICLES_PER_BURST);
        assert!(s.take_events().contains(&GameEvent::EnemyDestroyed {
            kind: EnemyKind::Cookie
        }));
    }

    #[test]
    fn test_enemy_contact_damages_player() {
        let mut s = playing_state();
        s.enemies.push(cookie_at(s.player.pos));

        tick(&mut s, &TickInput::default(), SIM_DT);

        assert!(s.enemies.is_empty());
        assert_eq!(s.lives, STARTING_LIVES - 1);
        assert!(s.screen_shake > 0.0);
        assert!(s.take_events().contains(&GameEvent::PlayerHit));
    }

    #[test]
    fn test_virus_fires_on_interval() {
        let mut s = playing_state();
        s.enemies.push(Enemy {
            pos: Vec2::new(100.0, 50.0),
            speed: 0.0,
            size: 40.0,
            kind: EnemyKind::Virus,
            shoot_timer: 0,
        });

        run_ticks(&mut s, &TickInput::default(), VIRUS_SHOOT_INTERVAL_TICKS);
        assert_eq!(s.enemy_shots.len(), 1);
        assert_eq!(
            s.enemy_shots[0].vel,
            Vec2::new(0.0, ENEMY_PROJECTILE_SPEED)
        );
    }

    #[test]
    fn test_virus_shot_hits_player() {
        let mut s = playing_state();
        s.enemy_shots.push(Projectile {
            pos: s.player.pos - Vec2::new(0.0, 10.0),
            vel: Vec2::ZERO,
        });

        tick(&mut s, &TickInput::default(), SIM_DT);

        assert!(s.enemy_shots.is_empty());
        assert_eq!(s.lives, STARTING_LIVES - 1);
    }

    #[test]
    fn test_simultaneous_hits_end_run_once() {
        // Virus shot and enemy body both land on the ship in the same tick
        // at one life: exactly one PlayerHit and one GameOver may come out
        let mut s = playing_state();
        s.lives = 1;
        s.enemy_shots.push(Projectile {
            pos: s.player.pos,
            vel: Vec2::ZERO,
        });
        s.enemies.push(cookie_at(s.player.pos));

        tick(&mut s, &TickInput::default(), SIM_DT);

        assert_eq!(s.lives, 0);
        assert_eq!(s.phase, GamePhase::GameOver);
        let events = s.take_events();
        let hits = events.iter().filter(|e| **e == GameEvent::PlayerHit).count();
        let overs = events.iter().filter(|e| **e == GameEvent::GameOver).count();
        assert_eq!(hits, 1);
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_enemies_cull_below_arena() {
        let mut s = playing_state();
        s.enemies
            .push(cookie_at(Vec2::new(100.0, 600.0 + ENEMY_DESPAWN_MARGIN + 1.0)));
        tick(&mut s, &TickInput::default(), SIM_DT);
        assert!(s.enemies.is_empty());
        // No kill credit and no damage for escapees
        assert_eq!(s.kills_this_level, 0);
        assert_eq!(s.lives, STARTING_LIVES);
    }

    #[test]
    fn test_level_up_after_kill_quota() {
        let mut s = playing_state();
        s.kills_this_level = KILLS_PER_LEVEL - 1;
        destroy_enemy(&mut s, Vec2::new(100.0, 100.0), EnemyKind::Cookie);

        assert_eq!(s.level_index, 1);
        assert_eq!(s.kills_this_level, 0);
        assert!(s.take_events().contains(&GameEvent::LevelUp { level: 1 }));
    }

    #[test]
    fn test_victory_on_final_level_clear() {
        let mut s = playing_state();
        s.level_index = (tuning::LEVELS.len() - 1) as u32;
        s.kills_this_level = KILLS_PER_LEVEL - 1;
        destroy_enemy(&mut s, Vec2::new(100.0, 100.0), EnemyKind::Virus);

        assert_eq!(s.phase, GamePhase::Victory);
        assert!(s.take_events().contains(&GameEvent::Victory));
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut s = playing_state();
        s.lives = 1;
        s.take_damage();
        assert_eq!(s.phase, GamePhase::GameOver);

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut s, &input, SIM_DT);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.lives, STARTING_LIVES);
    }

    #[test]
    fn test_particles_decay_everywhere() {
        let mut s = playing_state();
        s.spawn_burst(Vec2::new(100.0, 100.0), ParticleColor::Hull);
        s.lives = 1;
        s.take_damage(); // Game over; particles should still fade
        s.take_events();

        run_ticks(&mut s, &TickInput::default(), 40);
        assert!(s.particles.is_empty());
        assert_eq!(s.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let input = TickInput {
            fire: true,
            left: true,
            ..Default::default()
        };

        let mut a = playing_state();
        let mut b = playing_state();
        run_ticks(&mut a, &input, 600);
        run_ticks(&mut b, &input, 600);

        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.kind, eb.kind);
        }
        assert_eq!(a.kills_this_level, b.kills_this_level);
        assert_eq!(a.lives, b.lives);
    }
}
