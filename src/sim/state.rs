//! Session state and run lifecycle
//!
//! A `GameSession` owns everything one window needs: the player, the trail,
//! the live shapes, the timers that drive spawning and the difficulty ramp,
//! and the seeded RNG all of them draw from.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particles::TrailSystem;
use super::player::Player;
use super::shapes::Spawner;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::highscores::{HighScoreEntry, HighScores};

/// Top-level game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Title screen: shapes drift by, the player is inert
    Start,
    /// Active run
    Playing,
    /// Run ended, waiting for restart
    Over,
}

/// RNG state for reproducible runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Bumped on every restart so each run gets its own sequence
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Complete simulation state for one window
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    pub rng_state: RngState,
    pub(crate) rng: Pcg32,
    pub state: SessionState,
    /// Seconds survived in the current run
    pub survival_time: f32,
    /// Current population cap while playing
    pub max_shapes: u32,
    /// Seconds until `max_shapes` grows again
    pub shape_growth_cooldown: f32,
    pub max_shape_growth_cooldown: f32,
    /// Seconds until the next spawn attempt
    pub next_shape_timer: f32,
    pub max_next_shape_interval: f32,
    pub player: Player,
    pub trail: TrailSystem,
    pub spawner: Spawner,
    /// Ticks simulated while playing
    pub time_ticks: u64,
    /// Survival time of the most recent finished run
    pub last_score: Option<f32>,
    pub highscores: HighScores,
}

impl GameSession {
    /// Validate `config` and build a session on the title screen
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng_state = RngState::new(seed);
        let session = Self {
            rng: rng_state.to_rng(),
            rng_state,
            state: SessionState::Start,
            survival_time: 0.0,
            max_shapes: config.initial_max_shapes,
            shape_growth_cooldown: config.shape_growth_cooldown,
            max_shape_growth_cooldown: config.shape_growth_cooldown,
            next_shape_timer: config.next_shape_interval,
            max_next_shape_interval: config.next_shape_interval,
            player: Player::new(screen_center(&config), &config),
            trail: TrailSystem::new(&config),
            spawner: Spawner::new(&config),
            time_ticks: 0,
            last_score: None,
            highscores: HighScores::new(),
            config,
        };
        log::info!(
            "Session created: {}x{}, seed {}",
            session.config.screen_width,
            session.config.screen_height,
            seed
        );
        Ok(session)
    }

    /// Center of the play area (player spawn point)
    pub fn center(&self) -> Vec2 {
        screen_center(&self.config)
    }

    /// Whether `pos` lies inside `[0, width] x [0, height]`
    pub fn in_play_area(&self, pos: Vec2) -> bool {
        (0.0..=self.config.screen_width).contains(&pos.x)
            && (0.0..=self.config.screen_height).contains(&pos.y)
    }

    /// Title screen -> run. The attract-mode shapes are discarded.
    pub fn begin(&mut self) {
        if self.state != SessionState::Start {
            return;
        }
        self.state = SessionState::Playing;
        self.spawner.clear();
        self.next_shape_timer = self.max_next_shape_interval;
        log::info!("Run {} started", self.rng_state.stream + 1);
    }

    /// End the current run and record its score
    pub fn game_over(&mut self) {
        if self.state != SessionState::Playing {
            return;
        }
        self.state = SessionState::Over;
        self.last_score = Some(self.survival_time);
        let rank = self.highscores.record(HighScoreEntry {
            survival_time: self.survival_time,
            max_shapes: self.max_shapes,
            run: self.rng_state.stream as u32 + 1,
        });
        log::info!(
            "Game over: survived {:.2}s, {} shapes max, rank {:?}",
            self.survival_time,
            self.max_shapes,
            rank
        );
    }

    /// Game over -> fresh title screen with a fresh player, shapes and timers
    pub fn restart(&mut self) {
        if self.state != SessionState::Over {
            return;
        }
        self.rng_state.stream += 1;
        self.rng = self.rng_state.to_rng();

        let config = &self.config;
        self.player = Player::new(screen_center(config), config);
        self.trail = TrailSystem::new(config);
        self.spawner = Spawner::new(config);
        self.survival_time = 0.0;
        self.max_shapes = config.initial_max_shapes;
        self.shape_growth_cooldown = self.max_shape_growth_cooldown;
        self.next_shape_timer = self.max_next_shape_interval;
        self.time_ticks = 0;
        self.state = SessionState::Start;
        log::info!("Session reset (stream {})", self.rng_state.stream);
    }

    /// On-screen tutorial line for the opening seconds of a run
    pub fn hint(&self) -> Option<&'static str> {
        if self.state != SessionState::Playing {
            return None;
        }
        match self.survival_time {
            t if t < 3.0 => Some("Light kills you :)"),
            t if t < 5.0 => Some(match self.config.keyboard {
                crate::KeyboardLayout::Qwerty => "WASD for moving, Space to dash",
                crate::KeyboardLayout::Azerty => "ZQSD for moving, Space to dash",
            }),
            t if t < 7.0 => Some("You are invincible while dashing"),
            _ => None,
        }
    }

    /// Best survival time recorded this session
    pub fn best_score(&self) -> Option<f32> {
        self.highscores.top_score()
    }
}

fn screen_center(config: &GameConfig) -> Vec2 {
    Vec2::new(config.screen_width / 2.0, config.screen_height / 2.0)
}
