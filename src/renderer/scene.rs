//! Scene building: session state to a triangle list in field coordinates
//!
//! Pure and platform-free; the GPU side only uploads what this returns.

use glam::Vec2;

use super::shapes::{circle, to_world, triangle};
use super::vertex::{Vertex, colors};
use crate::sim::{GamePhase, GameState, Particle, Player};

const ENEMY_SEGMENTS: u32 = 24;
const BULLET_SEGMENTS: u32 = 12;
const SHIP_DETAIL_SEGMENTS: u32 = 12;
const PARTICLE_SEGMENTS: u32 = 6;
/// Drawn particle radius (diameter 4)
const PARTICLE_RADIUS: f32 = 2.0;

/// Vertices for the current frame. Menu and game-over screens draw no
/// entities; their text lives in the HUD overlay.
pub fn build(state: &GameState) -> Vec<Vertex> {
    if state.phase != GamePhase::Playing {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity(
        64 + state.enemies.len() * ENEMY_SEGMENTS as usize * 3
            + state.bullets.len() * BULLET_SEGMENTS as usize * 3
            + state.particles.len() * PARTICLE_SEGMENTS as usize * 3,
    );

    vertices.extend(ship(&state.player));

    for enemy in &state.enemies {
        vertices.extend(circle(enemy.pos, enemy.radius, colors::ENEMY, ENEMY_SEGMENTS));
    }

    for bullet in &state.bullets {
        vertices.extend(circle(bullet.pos, bullet.radius, colors::BULLET, BULLET_SEGMENTS));
    }

    for particle in &state.particles {
        vertices.extend(circle(
            particle.pos,
            PARTICLE_RADIUS,
            particle_color(particle),
            PARTICLE_SEGMENTS,
        ));
    }

    vertices
}

/// Ship: engine glow, arrowhead body, cockpit; oriented along the aim angle
pub fn ship(player: &Player) -> Vec<Vertex> {
    let heading = Vec2::from_angle(player.aim_angle);
    let at = |x: f32, y: f32| to_world(player.pos, heading, Vec2::new(x, y));

    let mut vertices = circle(at(-18.0, 0.0), 5.0, colors::SHIP_ENGINE, SHIP_DETAIL_SEGMENTS);
    vertices.extend(triangle(
        at(22.0, 0.0),
        at(-14.0, -12.0),
        at(-14.0, 12.0),
        colors::SHIP_BODY,
    ));
    vertices.extend(circle(at(2.0, 0.0), 3.0, colors::SHIP_COCKPIT, SHIP_DETAIL_SEGMENTS));
    vertices
}

/// White, fading with remaining life (alpha = life * 4 out of 255)
pub fn particle_color(particle: &Particle) -> [f32; 4] {
    let mut color = colors::PARTICLE;
    color[3] = (particle.life as f32 * 4.0 / 255.0).min(1.0);
    color
}
