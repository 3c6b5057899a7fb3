//! Neon Defender - A neon arena survival shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline plus scene/HUD builders
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (canvas units)
    pub const FIELD_WIDTH: f32 = 900.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Simulation rate the per-tick speeds were tuned for (one tick per frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Player ship defaults
    pub const PLAYER_RADIUS: f32 = 18.0;
    pub const PLAYER_SPEED: f32 = 4.0;
    /// Ticks between shots
    pub const SHOOT_COOLDOWN: u32 = 8;
    /// Distance from ship center to the muzzle
    pub const MUZZLE_OFFSET: f32 = 22.0;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 5.0;
    pub const BULLET_SPEED: f32 = 7.0;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 14.0;
    pub const ENEMY_MIN_SPEED: f32 = 1.2;
    pub const ENEMY_MAX_SPEED: f32 = 2.5;

    /// How far outside the field enemies spawn and bullets get culled
    pub const EDGE_MARGIN: f32 = 20.0;

    /// Explosion particles
    pub const PARTICLES_PER_EXPLOSION: usize = 20;
    pub const PARTICLE_LIFE: u32 = 60;
    pub const PARTICLE_MIN_SPEED: f32 = 1.0;
    pub const PARTICLE_MAX_SPEED: f32 = 3.0;

    /// Scoring
    pub const SCORE_PER_KILL: u32 = 10;
    pub const POINTS_PER_LEVEL: u32 = 100;

    /// Spawn curve: interval = max(floor, base - level * step)
    pub const SPAWN_BASE_TICKS: u32 = 120;
    pub const SPAWN_STEP_TICKS: u32 = 10;
    pub const SPAWN_MIN_TICKS: u32 = 25;
}
