//! 2D vector helpers on top of `glam::Vec2`
//!
//! Add/subtract/scale come straight from glam's operators. The helpers here
//! cover the rest and make the zero-vector case explicit instead of letting
//! NaNs leak into positions.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Unit vector pointing along `theta` (radians, screen coordinates)
#[inline]
pub fn from_angle(theta: f32) -> Vec2 {
    Vec2::from_angle(theta)
}

/// Scale `v` to length `magnitude`, keeping its direction
///
/// Returns `None` for a zero-length (or non-finite) vector, which has no
/// direction to keep.
#[inline]
pub fn set_magnitude(v: Vec2, magnitude: f32) -> Option<Vec2> {
    v.try_normalize().map(|dir| dir * magnitude)
}

/// Heading in radians from `from` toward `to`, `None` if they coincide
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> Option<f32> {
    let delta = to - from;
    if delta == Vec2::ZERO {
        None
    } else {
        Some(delta.y.atan2(delta.x))
    }
}

/// Uniformly random direction on the unit circle
pub fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    from_angle(rng.random_range(0.0..TAU))
}
