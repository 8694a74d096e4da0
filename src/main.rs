//! Duality Dash headless driver
//!
//! Plays a few runs with a simple autopilot against the software lit mask,
//! standing in for the window/GPU layer. Usage: `duality-dash [SEED] [CONFIG]`.

use std::collections::HashSet;
use std::f32::consts::FRAC_1_SQRT_2;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use glam::Vec2;

use duality_dash::consts::*;
use duality_dash::input::{KeyRole, Keymap};
use duality_dash::mask;
use duality_dash::sim::{GameSession, SessionState, TickInput, tick};
use duality_dash::GameConfig;

#[derive(Parser)]
#[command(name = "duality-dash", about = "Headless Duality Dash runs with an autopilot")]
struct Cli {
    /// RNG seed for the session
    #[arg(default_value_t = 2022)]
    seed: u64,
    /// JSON file with tuning overrides
    config: Option<PathBuf>,
}

/// Runs to play before exiting
const RUNS: u32 = 3;
/// Give up on a run after this much simulated time (seconds)
const MAX_RUN_SECONDS: f32 = 180.0;
/// How far ahead the autopilot samples the mask
const LOOKAHEAD: f32 = 60.0;

const DIRECTIONS: [(Vec2, &[KeyRole]); 9] = [
    (Vec2::ZERO, &[]),
    (Vec2::new(0.0, 1.0), &[KeyRole::Up]),
    (Vec2::new(0.0, -1.0), &[KeyRole::Down]),
    (Vec2::new(-1.0, 0.0), &[KeyRole::Left]),
    (Vec2::new(1.0, 0.0), &[KeyRole::Right]),
    (Vec2::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2), &[KeyRole::Up, KeyRole::Left]),
    (Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2), &[KeyRole::Up, KeyRole::Right]),
    (Vec2::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2), &[KeyRole::Down, KeyRole::Left]),
    (Vec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2), &[KeyRole::Down, KeyRole::Right]),
];

/// Simulated keyboard: tracks which physical keys are down
struct Keyboard {
    keymap: Keymap,
    down: HashSet<char>,
}

impl Keyboard {
    fn new(keymap: Keymap) -> Self {
        Self {
            keymap,
            down: HashSet::new(),
        }
    }

    fn key_for(&self, role: KeyRole) -> char {
        use duality_dash::KeyboardLayout::*;
        match (self.keymap.layout(), role) {
            (_, KeyRole::Dash) => ' ',
            (Qwerty, KeyRole::Up) => 'w',
            (Azerty, KeyRole::Up) => 'z',
            (Qwerty, KeyRole::Left) => 'a',
            (Azerty, KeyRole::Left) => 'q',
            (_, KeyRole::Down) => 's',
            (_, KeyRole::Right) => 'd',
        }
    }

    /// Hold exactly `roles`, emitting press/release edges into `input`
    fn hold(&mut self, roles: &[KeyRole], input: &mut TickInput) {
        let wanted: HashSet<char> = roles.iter().map(|r| self.key_for(*r)).collect();

        let mut released: Vec<char> = self.down.difference(&wanted).copied().collect();
        released.sort_unstable();
        for key in released {
            input.events.extend(self.keymap.event(key, false));
        }

        let mut pressed: Vec<char> = wanted.difference(&self.down).copied().collect();
        pressed.sort_unstable();
        for key in pressed {
            input.events.extend(self.keymap.event(key, true));
        }

        self.down = wanted;
    }
}

/// Pick the keys to hold for the next tick
fn autopilot(session: &GameSession) -> Vec<KeyRole> {
    let shapes = &session.spawner.shapes;
    let player = &session.player;
    let center = session.center();

    let score = |dir: Vec2| -> f32 {
        let ahead = player.pos + dir * LOOKAHEAD;
        let mut cost = ahead.distance(center) * 0.01;
        if mask::is_lit(shapes, ahead) {
            cost += 100.0;
        }
        if !session.in_play_area(ahead) {
            cost += 1000.0;
        }
        cost
    };

    let (dir, roles) = DIRECTIONS
        .iter()
        .min_by(|a, b| score(a.0).total_cmp(&score(b.0)))
        .copied()
        .unwrap_or(DIRECTIONS[0]);

    let mut keys = roles.to_vec();
    let danger = mask::is_lit(shapes, player.pos) || mask::is_lit(shapes, player.pos + dir * LOOKAHEAD);
    if danger && dir != Vec2::ZERO {
        keys.push(KeyRole::Dash);
    }
    keys
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    GameConfig::from_json(&json).with_context(|| format!("loading config {}", path.display()))
}

fn run(seed: u64, config: GameConfig) -> anyhow::Result<()> {
    let keymap = Keymap::new(config.keyboard);
    let mut session = GameSession::new(config, seed).context("invalid configuration")?;
    let mut keyboard = Keyboard::new(keymap);

    let mut accumulator = 0.0;
    let mut lit = false;
    let mut runs_done = 0;
    let mut title_ticks = 0u32;

    while runs_done < RUNS {
        // One rendered frame
        accumulator += SIM_DT;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let mut input = TickInput {
                lit_under_player: lit,
                ..Default::default()
            };

            match session.state {
                SessionState::Start => {
                    // Let the title screen animate for a second, then tap dash
                    title_ticks += 1;
                    if title_ticks > 60 {
                        keyboard.hold(&[KeyRole::Dash], &mut input);
                        title_ticks = 0;
                    } else {
                        keyboard.hold(&[], &mut input);
                    }
                }
                SessionState::Playing => {
                    if session.survival_time >= MAX_RUN_SECONDS {
                        log::warn!("Run exceeded {}s, stopping", MAX_RUN_SECONDS);
                        return Ok(());
                    }
                    let keys = autopilot(&session);
                    keyboard.hold(&keys, &mut input);
                }
                SessionState::Over => {
                    // A fresh press is needed; let go first if dash is still down
                    if keyboard.down.contains(&' ') {
                        keyboard.hold(&[], &mut input);
                    } else {
                        keyboard.hold(&[KeyRole::Dash], &mut input);
                    }
                }
            }

            let before = session.state;
            tick(&mut session, &input, SIM_DT);
            if before == SessionState::Playing && session.state == SessionState::Over {
                runs_done += 1;
                println!(
                    "Run {}: survived {:.2}s",
                    runs_done,
                    session.last_score.unwrap_or(0.0)
                );
            }

            // Renderer feedback for the next tick
            lit = mask::is_lit(&session.spawner.shapes, session.player.pos);

            accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    for (rank, entry) in session.highscores.entries.iter().enumerate() {
        println!(
            "#{} run {}: {:.2}s (max shapes {})",
            rank + 1,
            entry.run,
            entry.survival_time,
            entry.max_shapes
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::init();

    let config = load_config(cli.config.as_deref())?;
    log::info!("Duality Dash (headless) starting with seed {}", cli.seed);
    run(cli.seed, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["duality-dash"]).expect("no args is valid");
        assert_eq!(cli.seed, 2022);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_seed_and_config() {
        let cli = Cli::try_parse_from(["duality-dash", "7", "tuning.json"]).expect("valid args");
        assert_eq!(cli.seed, 7);
        assert_eq!(cli.config, Some(PathBuf::from("tuning.json")));
    }

    #[test]
    fn test_cli_rejects_bad_seed() {
        assert!(Cli::try_parse_from(["duality-dash", "not-a-seed"]).is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/duality.json"))).is_err());
        assert!(load_config(None).is_ok());
    }
}
