//! Player movement and dash state machine

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::VELOCITY_EPSILON;
use crate::input::{KeyEdge, KeyEvent, KeyRole};

/// The player-controlled square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Unit direction (times dash multiplier while dashing)
    pub vel: Vec2,
    /// Base move speed (units per second)
    pub speed: f32,
    pub dash_multiplier: f32,
    /// Render footprint; not used for collision
    pub scale: f32,

    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,

    /// Dash key currently held
    pub dash_held: bool,
    /// Currently dashing (invulnerable to light)
    pub is_dashing: bool,
    /// Seconds until a dash may start, never negative
    pub dash_cooldown: f32,
    pub max_dash_cooldown: f32,
    /// Cosmetic 0-1 exertion gauge; does not gate dashing
    pub dash_stamina: f32,
    pub stamina_drain: f32,
}

impl Player {
    /// Spawn a fresh player at `pos` using the configured tuning
    pub fn new(pos: Vec2, config: &GameConfig) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            speed: config.player_speed,
            dash_multiplier: config.dash_multiplier,
            scale: config.player_scale,
            move_up: false,
            move_down: false,
            move_left: false,
            move_right: false,
            dash_held: false,
            is_dashing: false,
            dash_cooldown: config.max_dash_cooldown,
            max_dash_cooldown: config.max_dash_cooldown,
            dash_stamina: 1.0,
            stamina_drain: config.dash_stamina_drain,
        }
    }

    /// Apply a key transition. Repeated presses are idempotent.
    pub fn apply_key(&mut self, event: KeyEvent) {
        let down = event.edge == KeyEdge::Pressed;
        match event.role {
            KeyRole::Up => self.move_up = down,
            KeyRole::Down => self.move_down = down,
            KeyRole::Left => self.move_left = down,
            KeyRole::Right => self.move_right = down,
            KeyRole::Dash => self.dash_held = down,
        }
    }

    /// Direction requested by the movement keys (not normalized)
    pub fn intent(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.move_up {
            dir.y += 1.0;
        }
        if self.move_down {
            dir.y -= 1.0;
        }
        if self.move_left {
            dir.x -= 1.0;
        }
        if self.move_right {
            dir.x += 1.0;
        }
        dir
    }

    /// Advance the dash state machine and integrate position
    pub fn update(&mut self, dt: f32) {
        // A dash needs the key, a finished cooldown and motion from last tick
        if self.dash_held && self.dash_cooldown <= 0.0 && self.vel.length() > 0.0 {
            if !self.is_dashing {
                log::trace!("Dash start at ({:.1}, {:.1})", self.pos.x, self.pos.y);
            }
            self.is_dashing = true;
        }

        if self.is_dashing {
            // Cooldown stays charged for the whole dash
            self.dash_cooldown = self.max_dash_cooldown;
            self.dash_stamina = (self.dash_stamina - self.stamina_drain).max(0.0);
        } else {
            self.dash_stamina = 1.0;
            self.dash_cooldown = (self.dash_cooldown - dt).max(0.0);
        }

        if !self.dash_held && self.is_dashing {
            self.is_dashing = false;
        }

        // Dashing locks the heading
        if !self.is_dashing {
            self.vel = self.intent();
        }

        if self.vel.length() > VELOCITY_EPSILON {
            self.vel = self.vel.normalize();
        }

        if self.is_dashing {
            self.vel *= self.dash_multiplier;
        }

        self.pos += self.vel * self.speed * dt;
    }

    /// Remaining cooldown as a 0-1 bar (1 = ready)
    pub fn dash_ready_fraction(&self) -> f32 {
        crate::map_range(self.dash_cooldown, 0.0, self.max_dash_cooldown, 1.0, 0.0)
    }
}
