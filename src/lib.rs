//! Cookie Invaders - a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `render`: Canvas2D rendering (starfield, sprites, screen shake)
//! - `audio`: Procedural Web Audio sound effects
//! - `tuning`: Data-driven level balance
//! - `settings`: Player preferences

pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod render;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the arcade feel)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Ship spawn height above the bottom edge
    pub const PLAYER_START_OFFSET_Y: f32 = 100.0;
    /// Thrust added to velocity while a direction is held (px/s, scaled by dt)
    pub const PLAYER_ACCEL: f32 = 480.0;
    /// Per-tick velocity damping
    pub const PLAYER_FRICTION: f32 = 0.85;
    /// Ship cannot leave this margin around the arena
    pub const PLAYER_MARGIN: f32 = 30.0;
    /// Ticks between shots while fire is held (250 ms at 60 Hz)
    pub const SHOOT_COOLDOWN_TICKS: u32 = 15;

    /// Player shot speed (px/s, upward)
    pub const PROJECTILE_SPEED: f32 = 600.0;
    /// Shots spawn this far above the ship's center
    pub const PROJECTILE_MUZZLE_OFFSET: f32 = 30.0;
    /// Extra slack added to the enemy radius for shot hits
    pub const PROJECTILE_HIT_SLACK: f32 = 5.0;
    /// Virus shot speed (px/s, downward)
    pub const ENEMY_PROJECTILE_SPEED: f32 = 300.0;

    /// Enemies spawn just above the visible arena
    pub const ENEMY_SPAWN_Y: f32 = -50.0;
    /// Enemies below arena bottom + margin are culled
    pub const ENEMY_DESPAWN_MARGIN: f32 = 50.0;
    pub const ENEMY_BASE_SPEED: f32 = 120.0;
    pub const ENEMY_SPEED_JITTER: f32 = 120.0;
    /// Extra fall speed per level index
    pub const ENEMY_LEVEL_SPEED_BONUS: f32 = 60.0;
    pub const ENEMY_MIN_SIZE: f32 = 40.0;
    pub const ENEMY_SIZE_JITTER: f32 = 20.0;
    /// Horizontal spawn margin from the arena edges
    pub const ENEMY_SPAWN_MARGIN: f32 = 20.0;
    /// Viruses fire every 2 seconds
    pub const VIRUS_SHOOT_INTERVAL_TICKS: u32 = 120;
    /// Initial shoot timers are staggered by up to 1 second
    pub const VIRUS_SHOOT_STAGGER_TICKS: u32 = 60;
    /// Enemy shots spawn this far below the virus center
    pub const VIRUS_MUZZLE_OFFSET: f32 = 20.0;

    /// Ship/enemy collision radius (circle distance check)
    pub const PLAYER_ENEMY_HIT_RADIUS: f32 = 40.0;
    /// Ship/enemy-shot collision radius
    pub const PLAYER_SHOT_HIT_RADIUS: f32 = 20.0;

    pub const STARTING_LIVES: u8 = 3;
    /// Kills required to clear a level
    pub const KILLS_PER_LEVEL: u32 = 15;

    pub const PARTICLES_PER_BURST: usize = 10;
    /// Particle lifetime in seconds
    pub const PARTICLE_LIFE: f32 = 0.5;
    /// Particle velocity range per axis (+/- px/s)
    pub const PARTICLE_SPEED: f32 = 300.0;
    /// Screen shake duration per hit (seconds)
    pub const SHAKE_DURATION: f32 = 0.2;
    /// Maximum shake offset in pixels
    pub const SHAKE_AMPLITUDE: f32 = 5.0;
}
