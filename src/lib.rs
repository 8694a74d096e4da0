//! Duality Dash - survive in the dark while the light closes in
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, shapes, trail, session state machine)
//! - `input`: Key roles and keyboard-layout resolution
//! - `config`: Data-driven game tuning
//! - `mask`: Headless lit-pixel query (software stand-in for the GPU mask)
//! - `highscores`: In-process leaderboard of survival times

pub mod config;
pub mod error;
pub mod highscores;
pub mod input;
pub mod mask;
pub mod sim;

pub use config::{GameConfig, KeyboardLayout, Span};
pub use error::ConfigError;
pub use highscores::HighScores;

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default play area
    pub const SCREEN_WIDTH: f32 = 1920.0;
    pub const SCREEN_HEIGHT: f32 = 1080.0;

    /// Player defaults (speeds are per second: 4 px per frame at 60 Hz)
    pub const PLAYER_SPEED: f32 = 240.0;
    pub const PLAYER_DASH_MULTIPLIER: f32 = 2.2;
    pub const PLAYER_SCALE: f32 = 15.0;
    pub const MAX_DASH_COOLDOWN: f32 = 0.5;
    /// Stamina lost per tick while dashing
    pub const DASH_STAMINA_DRAIN: f32 = 0.012;
    /// Below this magnitude the velocity is left un-normalized
    pub const VELOCITY_EPSILON: f32 = 0.001;

    /// Shape defaults
    pub const SHAPE_SPEED_MIN: f32 = 54.0;
    pub const SHAPE_SPEED_MAX: f32 = 216.0;
    pub const SHAPE_SCALE_MIN: f32 = 200.0;
    /// Off-screen cull margin, as a fraction of screen width
    pub const CULL_MARGIN_FRACTION: f32 = 0.75;

    /// Spawn scheduling and difficulty ramp
    pub const INITIAL_MAX_SHAPES: u32 = 10;
    pub const SHAPE_GROWTH_COOLDOWN: f32 = 2.0;
    pub const NEXT_SHAPE_INTERVAL: f32 = 1.0;
    /// Attract mode (title screen) population
    pub const ATTRACT_MAX_SHAPES: u32 = 10;
    pub const ATTRACT_BATCH: u32 = 2;

    /// Dash trail
    pub const TRAIL_JITTER: f32 = 5.0;
    pub const PARTICLE_SPEED: f32 = 0.5;
    pub const PARTICLE_LIFETIME_MIN: f32 = 0.8;
    pub const PARTICLE_LIFETIME_MAX: f32 = 1.2;
}

/// Unit vector pointing along `angle` (radians)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::from_angle(angle)
}

/// Uniformly distributed unit vector
#[inline]
pub fn random_unit_vec2<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    heading(rng.random_range(0.0..std::f32::consts::TAU))
}

/// Linearly remap `value` from [min1, max1] into [min2, max2]
#[inline]
pub fn map_range(value: f32, min1: f32, max1: f32, min2: f32, max2: f32) -> f32 {
    min2 + (value - min1) * (max2 - min2) / (max1 - min1)
}
