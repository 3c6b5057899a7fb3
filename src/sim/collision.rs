//! Circle-overlap hit tests and field bounds checks
//!
//! Every collidable entity is a circle. Anything exposing a center and a
//! radius can be tested against anything else; there is no continuous
//! collision, so fast objects may tunnel between ticks.

use glam::Vec2;

/// A collidable circle
pub trait Circle {
    fn position(&self) -> Vec2;
    fn radius(&self) -> f32;
}

/// True if the two circles overlap (touching edges do not count)
#[inline]
pub fn circles_overlap<A: Circle + ?Sized, B: Circle + ?Sized>(a: &A, b: &B) -> bool {
    a.position().distance(b.position()) < a.radius() + b.radius()
}

/// True if `pos` lies more than `margin` outside the `size` rectangle at the origin
#[inline]
pub fn outside_field(pos: Vec2, size: Vec2, margin: f32) -> bool {
    pos.x < -margin || pos.x > size.x + margin || pos.y < -margin || pos.y > size.y + margin
}

/// Clamp a circle center so the whole circle stays inside the field
#[inline]
pub fn clamp_inside(pos: Vec2, radius: f32, size: Vec2) -> Vec2 {
    pos.clamp(Vec2::splat(radius), size - Vec2::splat(radius))
}
