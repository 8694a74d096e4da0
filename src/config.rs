//! Game tuning and preferences
//!
//! Every number the simulation uses lives here so a run can be rebuilt
//! from a JSON document. Missing fields fall back to the defaults.

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Physical keyboard layout used to resolve movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeyboardLayout {
    #[default]
    Qwerty,
    Azerty,
}

impl KeyboardLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyboardLayout::Qwerty => "qwerty",
            KeyboardLayout::Azerty => "azerty",
        }
    }
}

impl FromStr for KeyboardLayout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "qwerty" => Ok(KeyboardLayout::Qwerty),
            "azerty" => Ok(KeyboardLayout::Azerty),
            _ => Err(ConfigError::UnknownLayout(s.to_string())),
        }
    }
}

/// Half-open sampling interval `[min, max)`; `min == max` always yields `min`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draw a uniform sample from the span
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min < 0.0 || self.max < self.min {
            return Err(ConfigError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Complete tuning for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Play area ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Player ===
    /// Base movement speed (units per second)
    pub player_speed: f32,
    pub dash_multiplier: f32,
    pub player_scale: f32,
    /// Seconds before another dash can start once a dash ends
    pub max_dash_cooldown: f32,
    /// Stamina lost per tick while dashing
    pub dash_stamina_drain: f32,

    // === Shapes ===
    /// Speed range (units per second)
    pub shape_speed: Span,
    pub shape_scale: Span,
    /// Distance of spawn points from screen center, in screen widths
    pub spawn_distance: Span,
    /// Off-screen cull margin, as a fraction of screen width
    pub cull_margin_fraction: f32,

    // === Spawning / difficulty ===
    pub initial_max_shapes: u32,
    /// Seconds of play between `max_shapes` increments
    pub shape_growth_cooldown: f32,
    /// Seconds between spawns
    pub next_shape_interval: f32,
    /// Shapes per spawn while playing
    pub spawn_batch: u32,
    /// Population cap on the title screen
    pub attract_max_shapes: u32,
    /// Shapes per spawn on the title screen
    pub attract_batch: u32,

    // === Trail ===
    pub trail_jitter: f32,
    pub particle_speed: f32,
    pub particle_lifetime: Span,

    // === Input ===
    pub keyboard: KeyboardLayout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_speed: PLAYER_SPEED,
            dash_multiplier: PLAYER_DASH_MULTIPLIER,
            player_scale: PLAYER_SCALE,
            max_dash_cooldown: MAX_DASH_COOLDOWN,
            dash_stamina_drain: DASH_STAMINA_DRAIN,

            shape_speed: Span::new(SHAPE_SPEED_MIN, SHAPE_SPEED_MAX),
            shape_scale: Span::new(SHAPE_SCALE_MIN, SCREEN_WIDTH / 3.0),
            spawn_distance: Span::new(1.0, 1.0),
            cull_margin_fraction: CULL_MARGIN_FRACTION,

            initial_max_shapes: INITIAL_MAX_SHAPES,
            shape_growth_cooldown: SHAPE_GROWTH_COOLDOWN,
            next_shape_interval: NEXT_SHAPE_INTERVAL,
            spawn_batch: 1,
            attract_max_shapes: ATTRACT_MAX_SHAPES,
            attract_batch: ATTRACT_BATCH,

            trail_jitter: TRAIL_JITTER,
            particle_speed: PARTICLE_SPEED,
            particle_lifetime: Span::new(PARTICLE_LIFETIME_MIN, PARTICLE_LIFETIME_MAX),

            keyboard: KeyboardLayout::Qwerty,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document over the defaults and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tunings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (w, h) = (self.screen_width, self.screen_height);
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(ConfigError::InvalidScreen {
                width: w,
                height: h,
            });
        }
        if !(self.max_dash_cooldown > 0.0) {
            return Err(ConfigError::InvalidCooldown(self.max_dash_cooldown));
        }
        if !(self.dash_multiplier > 1.0) {
            return Err(ConfigError::InvalidDashMultiplier(self.dash_multiplier));
        }

        for (name, value) in [
            ("player_speed", self.player_speed),
            ("player_scale", self.player_scale),
            ("shape_growth_cooldown", self.shape_growth_cooldown),
            ("next_shape_interval", self.next_shape_interval),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        for (name, value) in [
            ("dash_stamina_drain", self.dash_stamina_drain),
            ("trail_jitter", self.trail_jitter),
            ("particle_speed", self.particle_speed),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::Negative { name, value });
            }
        }

        self.shape_speed.check("shape_speed")?;
        self.shape_scale.check("shape_scale")?;
        self.spawn_distance.check("spawn_distance")?;
        self.particle_lifetime.check("particle_lifetime")?;
        if self.particle_lifetime.min <= 0.0 {
            return Err(ConfigError::InvalidRange {
                name: "particle_lifetime",
                min: self.particle_lifetime.min,
                max: self.particle_lifetime.max,
            });
        }

        if self.spawn_batch == 0 {
            return Err(ConfigError::InvalidBatch { name: "spawn" });
        }
        if self.attract_batch == 0 {
            return Err(ConfigError::InvalidBatch { name: "attract" });
        }
        if !(self.cull_margin_fraction >= 0.0) {
            return Err(ConfigError::InvalidMargin(self.cull_margin_fraction));
        }

        Ok(())
    }

    /// Off-screen cull margin in world units
    pub fn cull_margin(&self) -> f32 {
        self.screen_width * self.cull_margin_fraction
    }
}
