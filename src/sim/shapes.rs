//! Obstacle shapes and their spawner
//!
//! Shapes enter from a band outside the screen, aimed at a random point
//! inside it, travel in a straight line and are culled once they leave the
//! margin around the play area.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::config::{GameConfig, Span};
use crate::{heading, random_unit_vec2};

/// Visual primitive (both are drawn lit; the kind only changes the outline)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Square of side `scale`
    Quad,
    /// Circle of radius `scale`
    Disk,
}

/// A moving obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: u32,
    pub pos: Vec2,
    /// Render rotation (radians), does not affect motion
    pub angle: f32,
    pub scale: f32,
    /// Heading (radians)
    pub direction: f32,
    /// Units per second
    pub speed: f32,
    pub kind: ShapeKind,
}

impl Shape {
    pub fn update(&mut self, dt: f32) {
        self.pos += heading(self.direction) * self.speed * dt;
    }
}

/// Generates, moves and culls the live shape set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Live shapes, in spawn order
    pub shapes: Vec<Shape>,
    width: f32,
    height: f32,
    speed: Span,
    scale: Span,
    /// Spawn distance from screen center, in screen widths
    distance: Span,
    margin: f32,
    next_id: u32,
}

impl Spawner {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            shapes: Vec::new(),
            width: config.screen_width,
            height: config.screen_height,
            speed: config.shape_speed,
            scale: config.shape_scale,
            distance: config.spawn_distance,
            margin: config.cull_margin(),
            next_id: 1,
        }
    }

    fn next_shape_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Build one shape aimed across the screen
    fn make_shape<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Shape {
        let kind = if rng.random_bool(0.5) {
            ShapeKind::Quad
        } else {
            ShapeKind::Disk
        };

        let center = Vec2::new(self.width / 2.0, self.height / 2.0);
        let origin = center + random_unit_vec2(rng) * self.distance.sample(rng) * self.width;

        let target = Vec2::new(
            rng.random_range(0.0..self.width),
            rng.random_range(0.0..self.height),
        );
        let delta = target - origin;
        let direction = delta.y.atan2(delta.x);

        let speed = self.speed.sample(rng);
        let angle = rng.random_range(0.0..TAU);
        let scale = self.scale.sample(rng);

        Shape {
            id: self.next_shape_id(),
            pos: origin,
            angle,
            scale,
            direction,
            speed,
            kind,
        }
    }

    /// Add `n` new shapes to the live set
    pub fn generate<R: Rng + ?Sized>(&mut self, n: u32, rng: &mut R) {
        for _ in 0..n {
            let shape = self.make_shape(rng);
            log::trace!(
                "Spawned shape {} ({:?}) at ({:.0}, {:.0})",
                shape.id,
                shape.kind,
                shape.pos.x,
                shape.pos.y
            );
            self.shapes.push(shape);
        }
    }

    /// True once a shape has crossed the margin band on any side
    pub fn is_off_screen(&self, shape: &Shape) -> bool {
        let reach = self.margin + shape.scale;
        shape.pos.x < -reach
            || shape.pos.x > self.width + reach
            || shape.pos.y < -reach
            || shape.pos.y > self.height + reach
    }

    /// Remove shapes that left the play area; returns how many were removed
    pub fn cull(&mut self) -> usize {
        let mut shapes = std::mem::take(&mut self.shapes);
        let before = shapes.len();
        shapes.retain(|s| !self.is_off_screen(s));
        let removed = before - shapes.len();
        self.shapes = shapes;
        if removed > 0 {
            log::trace!("Culled {} shapes", removed);
        }
        removed
    }

    /// Advance every live shape
    pub fn update(&mut self, dt: f32) {
        for shape in &mut self.shapes {
            shape.update(dt);
        }
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
