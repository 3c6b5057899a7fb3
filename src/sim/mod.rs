//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Input arrives as an explicit `TickInput` snapshot
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::{Circle, circles_overlap, clamp_inside, outside_field};
pub use state::{Bullet, Edge, Enemy, GamePhase, GameState, Particle, Player};
pub use tick::{TickInput, tick};
