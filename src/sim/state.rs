//! Game state and core simulation types
//!
//! The session aggregate (`GameState`) owns every entity; nothing outlives it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Circle, circles_overlap, clamp_inside, outside_field};
use super::tick::TickInput;
use super::vector::{angle_to, from_angle, random_unit};
use crate::tuning::{Tuning, TuningError};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for a start command
    Menu,
    /// Active gameplay
    Playing,
    /// Ship was hit; waiting for a restart command
    GameOver,
}

/// Screen edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Random point along this edge, `margin` units outside the field
    pub fn spawn_point<R: Rng + ?Sized>(self, rng: &mut R, size: Vec2, margin: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(rng.random_range(0.0..size.x), -margin),
            Edge::Right => Vec2::new(size.x + margin, rng.random_range(0.0..size.y)),
            Edge::Bottom => Vec2::new(rng.random_range(0.0..size.x), size.y + margin),
            Edge::Left => Vec2::new(-margin, rng.random_range(0.0..size.y)),
        }
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Units moved per tick on each held axis
    pub speed: f32,
    /// Aim direction toward the pointer (radians)
    pub aim_angle: f32,
    /// Ticks until the next shot is allowed
    pub shoot_cooldown: u32,
}

impl Player {
    /// New ship at the center of the field
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.field_width, tuning.field_height) / 2.0,
            radius: tuning.player_radius,
            speed: tuning.player_speed,
            aim_angle: 0.0,
            shoot_cooldown: 0,
        }
    }

    /// Move from held input, keep inside the field, re-aim, cool down
    ///
    /// Diagonals are not normalized; opposite keys cancel out.
    pub fn update(&mut self, input: &TickInput, tuning: &Tuning) {
        self.pos += input.move_axes() * self.speed;
        self.pos = clamp_inside(
            self.pos,
            self.radius,
            Vec2::new(tuning.field_width, tuning.field_height),
        );

        // Pointer right on the ship has no direction; keep the old aim
        if let Some(angle) = angle_to(self.pos, input.pointer) {
            self.aim_angle = angle;
        }

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    /// Fire a bullet from the muzzle if the cooldown allows it
    pub fn shoot(&mut self, tuning: &Tuning) -> Option<Bullet> {
        if self.shoot_cooldown > 0 {
            return None;
        }
        self.shoot_cooldown = tuning.shoot_cooldown;

        let dir = from_angle(self.aim_angle);
        Some(Bullet {
            pos: self.pos + dir * tuning.muzzle_offset,
            vel: dir * tuning.bullet_speed,
            radius: tuning.bullet_radius,
        })
    }
}

impl Circle for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A homing enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    /// Fixed for the enemy's lifetime
    pub speed: f32,
}

impl Enemy {
    /// Spawn just outside a random edge with a random speed
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> Self {
        let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
        let size = Vec2::new(tuning.field_width, tuning.field_height);
        Self {
            pos: edge.spawn_point(rng, size, tuning.edge_margin),
            radius: tuning.enemy_radius,
            speed: rng.random_range(tuning.enemy_min_speed..tuning.enemy_max_speed),
        }
    }

    /// Step straight toward `target`; stays put if already on it
    pub fn update(&mut self, target: Vec2) {
        if let Some(step) = super::vector::set_magnitude(target - self.pos, self.speed) {
            self.pos += step;
        }
    }

    #[inline]
    pub fn hits<C: Circle + ?Sized>(&self, other: &C) -> bool {
        circles_overlap(self, other)
    }
}

impl Circle for Enemy {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A projectile fired by the player
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Bullet {
    #[inline]
    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    /// Far enough outside the field to be culled
    #[inline]
    pub fn offscreen(&self, tuning: &Tuning) -> bool {
        outside_field(
            self.pos,
            Vec2::new(tuning.field_width, tuning.field_height),
            tuning.edge_margin,
        )
    }
}

impl Circle for Bullet {
    fn position(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// A particle for visual effects (not gameplay-affecting)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left to live
    pub life: u32,
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, pos: Vec2, tuning: &Tuning) -> Self {
        let speed = rng.random_range(tuning.particle_min_speed..tuning.particle_max_speed);
        Self {
            pos,
            vel: random_unit(rng) * speed,
            life: tuning.particle_life,
        }
    }

    #[inline]
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.life == 0
    }
}

/// Complete session state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    pub score: u32,
    /// Always `tuning.level_for_score(score)`
    pub level: u32,
    /// Ticks since the last enemy spawn
    pub spawn_timer: u32,
    /// Playing ticks in the current session
    pub time_ticks: u64,
    /// Enemies destroyed in the current session
    pub kills: u32,
    /// Balance parameters for this run
    pub tuning: Tuning,
    rng: Pcg32,
}

impl GameState {
    /// Create a new session in the menu with stock tuning
    pub fn new(seed: u64) -> Self {
        let tuning = Tuning::default();
        Self {
            seed,
            phase: GamePhase::Menu,
            player: Player::new(&tuning),
            enemies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            score: 0,
            level: tuning.level_for_score(0),
            spawn_timer: 0,
            time_ticks: 0,
            kills: 0,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Create a new session with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        let mut state = Self::new(seed);
        state.tuning = tuning;
        state.reset();
        Ok(state)
    }

    /// Fresh ship, empty field, zeroed score. The phase is left alone.
    pub fn reset(&mut self) {
        self.player = Player::new(&self.tuning);
        self.enemies.clear();
        self.bullets.clear();
        self.particles.clear();
        self.score = 0;
        self.level = self.tuning.level_for_score(0);
        self.spawn_timer = 0;
        self.time_ticks = 0;
        self.kills = 0;
    }

    /// Reset and enter Playing (from Menu or GameOver)
    pub fn start(&mut self) {
        let from = self.phase;
        self.reset();
        self.phase = GamePhase::Playing;
        log::info!("Session started ({:?} -> Playing)", from);
    }

    /// Play field size
    #[inline]
    pub fn field_size(&self) -> Vec2 {
        Vec2::new(self.tuning.field_width, self.tuning.field_height)
    }

    /// Ticks between spawns at the current level
    #[inline]
    pub fn spawn_interval(&self) -> u32 {
        self.tuning.spawn_interval(self.level)
    }

    /// Fire from the ship if off cooldown; returns whether a bullet was added
    pub fn fire(&mut self) -> bool {
        match self.player.shoot(&self.tuning) {
            Some(bullet) => {
                self.bullets.push(bullet);
                true
            }
            None => false,
        }
    }

    /// Add one enemy at a random edge
    pub fn spawn_enemy(&mut self) {
        let enemy = Enemy::spawn(&mut self.rng, &self.tuning);
        log::debug!(
            "Enemy spawned at ({:.0}, {:.0}) speed {:.2}",
            enemy.pos.x,
            enemy.pos.y,
            enemy.speed
        );
        self.enemies.push(enemy);
    }

    /// Burst of particles at `pos`
    pub fn explode(&mut self, pos: Vec2) {
        let count = self.tuning.particles_per_explosion;
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle::new(&mut self.rng, pos, &self.tuning);
            self.particles.push(particle);
        }
    }

    /// Score an enemy kill at `pos`: points, level, explosion
    pub fn award_kill(&mut self, pos: Vec2) {
        self.score = self.score.saturating_add(self.tuning.score_per_kill);
        self.kills = self.kills.saturating_add(1);

        let level = self.tuning.level_for_score(self.score);
        if level != self.level {
            log::info!("Level {} reached (score {})", level, self.score);
        }
        self.level = level;

        log::trace!("Enemy destroyed at ({:.0}, {:.0})", pos.x, pos.y);
        self.explode(pos);
    }

    /// Playing -> GameOver
    pub fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {}, level {}, kills {}",
            self.score,
            self.level,
            self.kills
        );
    }
}
