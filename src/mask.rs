//! Headless lit-pixel mask
//!
//! Software stand-in for the GPU pass that draws the shapes. Each shape is
//! drawn inverting whatever is already underneath it, so a point is lit when
//! an odd number of shapes cover it. The simulation never calls this; the
//! platform layer samples it at the player's position and feeds the result
//! back through `TickInput::lit_under_player`.

use glam::Vec2;

use crate::sim::{Shape, ShapeKind};

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to a square of side `size`, rotated by `angle` around `center`
pub fn sd_square(p: Vec2, center: Vec2, size: f32, angle: f32) -> f32 {
    let local = Vec2::from_angle(-angle).rotate(p - center);
    let d = local.abs() - Vec2::splat(size / 2.0);
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

/// Signed distance from `p` to the outline of `shape`
pub fn sd_shape(p: Vec2, shape: &Shape) -> f32 {
    match shape.kind {
        ShapeKind::Quad => sd_square(p, shape.pos, shape.scale, shape.angle),
        ShapeKind::Disk => sd_circle(p, shape.pos, shape.scale),
    }
}

/// Whether `shape` covers `p` (edges count as covered)
#[inline]
pub fn covers(shape: &Shape, p: Vec2) -> bool {
    sd_shape(p, shape) <= 0.0
}

/// Lit-pixel query: odd coverage count means lit
pub fn is_lit<'a>(shapes: impl IntoIterator<Item = &'a Shape>, p: Vec2) -> bool {
    shapes.into_iter().filter(|s| covers(s, p)).count() % 2 == 1
}
