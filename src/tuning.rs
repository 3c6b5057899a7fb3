//! Data-driven game balance
//!
//! Every gameplay number lives here so a run can be retuned from JSON
//! without touching the simulation. `Tuning::default()` is the stock game.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tuning errors
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value that would break the simulation
    #[error("Invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game balance parameters (all speeds are per tick, all durations in ticks)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Spawn offset and cull margin outside the field
    pub edge_margin: f32,

    // === Player ===
    pub player_radius: f32,
    pub player_speed: f32,
    pub shoot_cooldown: u32,
    pub muzzle_offset: f32,

    // === Bullets ===
    pub bullet_radius: f32,
    pub bullet_speed: f32,

    // === Enemies ===
    pub enemy_radius: f32,
    pub enemy_min_speed: f32,
    pub enemy_max_speed: f32,

    // === Explosions ===
    pub particles_per_explosion: usize,
    pub particle_life: u32,
    pub particle_min_speed: f32,
    pub particle_max_speed: f32,

    // === Scoring / difficulty ===
    pub score_per_kill: u32,
    pub points_per_level: u32,
    pub spawn_base_ticks: u32,
    pub spawn_step_ticks: u32,
    pub spawn_min_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            edge_margin: EDGE_MARGIN,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            shoot_cooldown: SHOOT_COOLDOWN,
            muzzle_offset: MUZZLE_OFFSET,

            bullet_radius: BULLET_RADIUS,
            bullet_speed: BULLET_SPEED,

            enemy_radius: ENEMY_RADIUS,
            enemy_min_speed: ENEMY_MIN_SPEED,
            enemy_max_speed: ENEMY_MAX_SPEED,

            particles_per_explosion: PARTICLES_PER_EXPLOSION,
            particle_life: PARTICLE_LIFE,
            particle_min_speed: PARTICLE_MIN_SPEED,
            particle_max_speed: PARTICLE_MAX_SPEED,

            score_per_kill: SCORE_PER_KILL,
            points_per_level: POINTS_PER_LEVEL,
            spawn_base_ticks: SPAWN_BASE_TICKS,
            spawn_step_ticks: SPAWN_STEP_TICKS,
            spawn_min_ticks: SPAWN_MIN_TICKS,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let contents = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&contents)?;
        log::info!("Loaded tuning from file");
        Ok(tuning)
    }

    /// Serialize to pretty JSON (handy as a template for custom tunings)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("player_radius", self.player_radius)?;
        positive("player_speed", self.player_speed)?;
        positive("bullet_radius", self.bullet_radius)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("enemy_radius", self.enemy_radius)?;
        positive("enemy_min_speed", self.enemy_min_speed)?;
        positive("particle_min_speed", self.particle_min_speed)?;

        if !(self.edge_margin.is_finite() && self.edge_margin >= 0.0) {
            return Err(TuningError::Invalid {
                field: "edge_margin",
                reason: "must be zero or positive",
            });
        }
        if self.player_radius * 2.0 > self.field_width.min(self.field_height) {
            return Err(TuningError::Invalid {
                field: "player_radius",
                reason: "ship does not fit inside the field",
            });
        }
        if !self.enemy_max_speed.is_finite() || self.enemy_max_speed <= self.enemy_min_speed {
            return Err(TuningError::Invalid {
                field: "enemy_max_speed",
                reason: "must be greater than enemy_min_speed",
            });
        }
        if !self.particle_max_speed.is_finite() || self.particle_max_speed <= self.particle_min_speed {
            return Err(TuningError::Invalid {
                field: "particle_max_speed",
                reason: "must be greater than particle_min_speed",
            });
        }
        if self.particle_life == 0 {
            return Err(TuningError::Invalid {
                field: "particle_life",
                reason: "must be at least one tick",
            });
        }
        if self.points_per_level == 0 {
            return Err(TuningError::Invalid {
                field: "points_per_level",
                reason: "must be non-zero",
            });
        }
        Ok(())
    }

    /// Level for a given score: one level per `points_per_level`, starting at 1
    #[inline]
    pub fn level_for_score(&self, score: u32) -> u32 {
        score / self.points_per_level + 1
    }

    /// Ticks between enemy spawns at a given level
    ///
    /// Shrinks linearly with level down to `spawn_min_ticks`.
    pub fn spawn_interval(&self, level: u32) -> u32 {
        self.spawn_base_ticks
            .saturating_sub(level.saturating_mul(self.spawn_step_ticks))
            .max(self.spawn_min_ticks)
    }
}
