//! Fixed-step simulation tick
//!
//! Core game loop that advances the session by exactly one frame.

use glam::Vec2;

use super::state::{GamePhase, GameState};

/// Distance at which idle mode starts running away from an enemy
const IDLE_DANGER_RADIUS: f32 = 150.0;

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer position in field coordinates (aim target)
    pub pointer: Vec2,
    /// Start / restart the session (Enter, or click outside play)
    pub start: bool,
    /// Fire (Space, or click during play)
    pub shoot: bool,
    /// Idle/demo mode - the ship flies itself
    pub idle_mode: bool,
}

impl TickInput {
    pub fn request_start(&mut self) {
        self.start = true;
    }

    pub fn request_shoot(&mut self) {
        self.shoot = true;
    }

    /// Pointer button: fires during play, starts a session otherwise
    pub fn pointer_press(&mut self, phase: GamePhase) {
        if phase == GamePhase::Playing {
            self.request_shoot();
        } else {
            self.request_start();
        }
    }

    /// Clear one-shot commands after they were handed to a tick
    pub fn clear_commands(&mut self) {
        self.start = false;
        self.shoot = false;
    }

    /// Net movement direction from held keys, each axis in {-1, 0, 1}
    pub fn move_axes(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    let mut input = input.clone();
    if input.idle_mode {
        drive_idle(state, &mut input);
    }
    let input = &input;

    // Start/restart consumes the tick so the new session begins untouched
    if input.start && state.phase != GamePhase::Playing {
        state.start();
        return;
    }

    // Menu and GameOver are static
    if state.phase != GamePhase::Playing {
        return;
    }

    if input.shoot {
        state.fire();
    }

    state.time_ticks += 1;

    // Ship
    state.player.update(input, &state.tuning);

    // Spawning (difficulty curve)
    state.spawn_timer += 1;
    if state.spawn_timer > state.spawn_interval() {
        state.spawn_enemy();
        state.spawn_timer = 0;
    }

    // Bullets
    for bullet in &mut state.bullets {
        bullet.update();
    }
    state.bullets.retain(|b| !b.offscreen(&state.tuning));

    // Enemies chase the ship; first contact ends the run
    let target = state.player.pos;
    let mut ship_hit = false;
    for enemy in &mut state.enemies {
        enemy.update(target);
        if enemy.hits(&state.player) {
            ship_hit = true;
            break;
        }
    }
    if ship_hit {
        state.game_over();
        return;
    }

    resolve_bullet_hits(state);

    // Particles
    for particle in &mut state.particles {
        particle.update();
    }
    state.particles.retain(|p| !p.is_dead());
}

/// Bullet vs enemy resolution
///
/// Each enemy takes the first live bullet touching it. A bullet is consumed by
/// its first hit and cannot score again this tick.
fn resolve_bullet_hits(state: &mut GameState) {
    if state.enemies.is_empty() || state.bullets.is_empty() {
        return;
    }

    let mut consumed = vec![false; state.bullets.len()];
    let mut kills = Vec::new();

    state.enemies.retain(|enemy| {
        let hit = (0..state.bullets.len())
            .find(|&i| !consumed[i] && enemy.hits(&state.bullets[i]));

        match hit {
            Some(i) => {
                consumed[i] = true;
                kills.push(enemy.pos);
                false
            }
            None => true,
        }
    });

    let mut flags = consumed.into_iter();
    state
        .bullets
        .retain(|_| !flags.next().unwrap_or(false));

    for pos in kills {
        state.award_kill(pos);
    }
}

/// Idle/demo mode: fake the input a player would give
fn drive_idle(state: &GameState, input: &mut TickInput) {
    if state.phase != GamePhase::Playing {
        input.start = true;
        return;
    }

    let ship = state.player.pos;
    let nearest = state.enemies.iter().min_by(|a, b| {
        a.pos
            .distance_squared(ship)
            .partial_cmp(&b.pos.distance_squared(ship))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Flee anything close, otherwise drift back toward the middle
    let heading = match nearest {
        Some(enemy) => {
            input.pointer = enemy.pos;
            input.shoot = true;
            if ship.distance(enemy.pos) < IDLE_DANGER_RADIUS {
                ship - enemy.pos
            } else {
                state.field_size() / 2.0 - ship
            }
        }
        None => state.field_size() / 2.0 - ship,
    };

    let dead_zone = state.player.speed;
    input.left = heading.x < -dead_zone;
    input.right = heading.x > dead_zone;
    input.up = heading.y < -dead_zone;
    input.down = heading.y > dead_zone;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Bullet, Enemy};
    use proptest::prelude::*;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, y),
            radius: ENEMY_RADIUS,
            speed: 0.0,
        }
    }

    fn bullet_at(x: f32, y: f32) -> Bullet {
        Bullet {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius: BULLET_RADIUS,
        }
    }

    #[test]
    fn test_menu_is_static() {
        let mut state = GameState::new(1);
        let input = TickInput {
            right: true,
            shoot: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &input);
        }
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.is_empty());
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_start_from_menu() {
        let state = playing(1);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.player.pos, Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0));
    }

    #[test]
    fn test_start_ignored_while_playing() {
        let mut state = playing(1);
        state.score = 50;
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.score, 50);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = playing(1);
        state.score = 120;
        state.level = 2;
        state.enemies.push(enemy_at(10.0, 10.0));
        state.phase = GamePhase::GameOver;

        let mut input = TickInput::default();
        input.pointer_press(state.phase);
        assert!(input.start && !input.shoot);
        tick(&mut state, &input);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_pointer_press_shoots_while_playing() {
        let mut input = TickInput::default();
        input.pointer_press(GamePhase::Playing);
        assert!(input.shoot && !input.start);
        input.clear_commands();
        assert!(!input.shoot && !input.start);
    }

    #[test]
    fn test_shoot_rate_limit() {
        let shots_with_gap = |gap: usize| {
            let mut state = playing(2);
            let fire = TickInput {
                shoot: true,
                pointer: Vec2::new(FIELD_WIDTH / 2.0, 0.0),
                ..Default::default()
            };
            let idle = TickInput {
                pointer: fire.pointer,
                ..Default::default()
            };
            let mut fired = 0;
            let before = state.bullets.len();
            tick(&mut state, &fire);
            fired += state.bullets.len() - before;
            for _ in 1..gap {
                tick(&mut state, &idle);
            }
            let before = state.bullets.len();
            tick(&mut state, &fire);
            fired += state.bullets.len() - before;
            fired
        };

        assert_eq!(shots_with_gap(1), 1);
        assert_eq!(shots_with_gap(7), 1);
        assert_eq!(shots_with_gap(8), 2);
        assert_eq!(shots_with_gap(12), 2);
    }

    #[test]
    fn test_bullet_moves_on_fire_tick() {
        let mut state = playing(2);
        let input = TickInput {
            shoot: true,
            pointer: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT / 2.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.bullets.len(), 1);
        let expected = state.player.pos + Vec2::new(MUZZLE_OFFSET + BULLET_SPEED, 0.0);
        assert!((state.bullets[0].pos - expected).length() < 1e-3);
    }

    #[test]
    fn test_offscreen_bullets_culled() {
        let mut state = playing(3);
        state.bullets.push(Bullet {
            pos: Vec2::new(FIELD_WIDTH + 15.0, 100.0),
            vel: Vec2::new(7.0, 0.0),
            radius: BULLET_RADIUS,
        });
        state.bullets.push(Bullet {
            pos: Vec2::new(400.0, 100.0),
            vel: Vec2::new(7.0, 0.0),
            radius: BULLET_RADIUS,
        });
        tick(&mut state, &TickInput::default());
        assert_eq!(state.bullets.len(), 1);
        assert!(state.bullets.iter().all(|b| !b.offscreen(&state.tuning)));
    }

    #[test]
    fn test_bullet_kills_enemy() {
        let mut state = playing(4);
        state.enemies.push(enemy_at(100.0, 100.0));
        state.bullets.push(bullet_at(105.0, 100.0));

        tick(&mut state, &TickInput::default());

        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(state.kills, 1);
        assert_eq!(state.particles.len(), PARTICLES_PER_EXPLOSION);
    }

    #[test]
    fn test_bullet_consumed_by_first_hit() {
        let mut state = playing(4);
        // Two overlapping enemies, one bullet touching both
        state.enemies.push(enemy_at(100.0, 100.0));
        state.enemies.push(enemy_at(110.0, 100.0));
        state.bullets.push(bullet_at(105.0, 100.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.enemies.len(), 1);
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(state.particles.len(), PARTICLES_PER_EXPLOSION);
    }

    #[test]
    fn test_enemy_takes_one_bullet() {
        let mut state = playing(4);
        state.enemies.push(enemy_at(100.0, 100.0));
        state.bullets.push(bullet_at(103.0, 100.0));
        state.bullets.push(bullet_at(97.0, 100.0));

        tick(&mut state, &TickInput::default());

        assert!(state.enemies.is_empty());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_player_hit_ends_run_immediately() {
        let mut state = playing(5);
        let ship = state.player.pos;
        state.enemies.push(enemy_at(ship.x + 20.0, ship.y));
        // Would be a kill if collision resolution ran this tick
        state.enemies.push(enemy_at(100.0, 100.0));
        state.bullets.push(bullet_at(105.0, 100.0));
        state.explode(Vec2::new(200.0, 200.0));
        let life_before = state.particles[0].life;

        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.particles[0].life, life_before);

        // Frozen afterwards
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_spawn_timer() {
        let mut state = playing(6);
        let interval = state.spawn_interval();
        assert_eq!(interval, 110);

        for _ in 0..interval {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.enemies.is_empty());
        assert_eq!(state.spawn_timer, interval);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawn_timer, 0);
    }

    #[test]
    fn test_level_up_shortens_spawn_interval() {
        let mut state = playing(6);
        state.score = 90;
        state.enemies.push(enemy_at(100.0, 100.0));
        state.bullets.push(bullet_at(105.0, 100.0));

        // Kill lands after this tick's spawn check
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 100);
        assert_eq!(state.level, 2);
        assert_eq!(state.spawn_interval(), 100);
        assert_eq!(state.spawn_timer, 1);

        for _ in 1..100 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.enemies.is_empty());
        assert_eq!(state.spawn_timer, 100);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawn_timer, 0);
    }

    #[test]
    fn test_particles_expire_after_life() {
        let mut state = playing(7);
        state.explode(Vec2::new(450.0, 300.0));
        assert_eq!(state.particles.len(), PARTICLES_PER_EXPLOSION);

        for _ in 0..PARTICLE_LIFE - 1 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.particles.len(), PARTICLES_PER_EXPLOSION);
        assert!(state.particles.iter().all(|p| p.life == 1));

        tick(&mut state, &TickInput::default());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                start: true,
                ..Default::default()
            },
            TickInput {
                idle_mode: true,
                ..Default::default()
            },
        ];

        tick(&mut state1, &inputs[0]);
        tick(&mut state2, &inputs[0]);
        for _ in 0..2000 {
            tick(&mut state1, &inputs[1]);
            tick(&mut state2, &inputs[1]);
        }

        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.bullets.len(), state2.bullets.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    #[test]
    fn test_idle_mode_starts_and_plays() {
        let mut state = GameState::new(42);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);

        for _ in 0..600 {
            tick(&mut state, &input);
        }
        assert!(state.time_ticks > 0);
        assert_eq!(state.level, state.score / POINTS_PER_LEVEL + 1);
    }

    #[test]
    fn test_move_axes() {
        let input = TickInput {
            left: true,
            down: true,
            ..Default::default()
        };
        assert_eq!(input.move_axes(), Vec2::new(-1.0, 1.0));
        assert_eq!(TickInput::default().move_axes(), Vec2::ZERO);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_level_tracks_score(seed in any::<u64>(), ticks in 1usize..1500) {
            let mut state = GameState::new(seed);
            let input = TickInput { idle_mode: true, ..Default::default() };
            for _ in 0..ticks {
                tick(&mut state, &input);
                prop_assert_eq!(state.level, state.score / POINTS_PER_LEVEL + 1);
                prop_assert!(state.bullets.iter().all(|b| !b.offscreen(&state.tuning)));
                prop_assert!(state.player.pos.x >= PLAYER_RADIUS);
                prop_assert!(state.player.pos.x <= FIELD_WIDTH - PLAYER_RADIUS);
                prop_assert!(state.player.pos.y >= PLAYER_RADIUS);
                prop_assert!(state.player.pos.y <= FIELD_HEIGHT - PLAYER_RADIUS);
            }
        }

        #[test]
        fn prop_spawn_interval_monotonic(level in 1u32..1000) {
            let t = crate::Tuning::default();
            prop_assert!(t.spawn_interval(level + 1) <= t.spawn_interval(level));
            prop_assert!(t.spawn_interval(level) >= SPAWN_MIN_TICKS);
            prop_assert_eq!(
                t.spawn_interval(level),
                (SPAWN_BASE_TICKS as i64 - level as i64 * SPAWN_STEP_TICKS as i64)
                    .max(SPAWN_MIN_TICKS as i64) as u32
            );
        }
    }
}
