//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! Side effects (audio, overlays) are communicated via `GameEvent`s drained
//! by the frontend each frame.

pub mod collision;
pub mod state;
pub mod tick;

pub use state::{
    Enemy, EnemyKind, GameEvent, GamePhase, GameState, Particle, ParticleColor, Player, Projectile,
};
pub use tick::{TickInput, tick};
