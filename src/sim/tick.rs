//! Per-frame simulation step
//!
//! Order inside a playing tick is fixed: player, trail, shape cull, spawn
//! scheduling, shape motion, survival clock and difficulty ramp, then the
//! death check.

use super::state::{GameSession, SessionState};
use crate::input::{KeyEdge, KeyEvent, KeyRole};

/// Everything the platform layer feeds into one tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Resolved key transitions since the previous tick, in arrival order
    pub events: Vec<KeyEvent>,
    /// Leave the title screen (the dash key does this too)
    pub begin: bool,
    /// Restart after game over (the dash key does this too)
    pub restart: bool,
    /// Renderer report: the pixel under the player is lit
    pub lit_under_player: bool,
}

impl TickInput {
    pub fn with_events(events: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            ..Default::default()
        }
    }

    fn dash_pressed(&self) -> bool {
        self.events
            .iter()
            .any(|e| e.role == KeyRole::Dash && e.edge == KeyEdge::Pressed)
    }
}

/// Advance the session by `dt` seconds
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Ignoring tick with invalid dt {}", dt);
        return;
    }

    // Control signals apply before anything moves
    let mut began = false;
    match session.state {
        SessionState::Start if input.begin || input.dash_pressed() => {
            session.begin();
            began = true;
        }
        SessionState::Over if input.restart || input.dash_pressed() => session.restart(),
        _ => {}
    }

    for event in &input.events {
        session.player.apply_key(*event);
    }

    match session.state {
        SessionState::Start => attract_step(session, dt),
        // The lit report describes the title-screen frame, not this scene
        SessionState::Playing => play_step(session, input.lit_under_player && !began, dt),
        SessionState::Over => {}
    }
}

/// Title screen: shapes drift across as a backdrop, nothing else runs
fn attract_step(session: &mut GameSession, dt: f32) {
    session.spawner.cull();
    let (cap, batch) = (session.config.attract_max_shapes, session.config.attract_batch);
    schedule_spawns(session, dt, cap, batch);
    session.spawner.update(dt);
}

fn play_step(session: &mut GameSession, lit_under_player: bool, dt: f32) {
    session.time_ticks += 1;

    session.player.update(dt);

    if session.player.is_dashing {
        session.trail.spawn(session.player.pos, &mut session.rng);
    }
    session.trail.update(dt);

    session.spawner.cull();
    let (cap, batch) = (session.max_shapes, session.config.spawn_batch);
    schedule_spawns(session, dt, cap, batch);
    session.spawner.update(dt);

    session.survival_time += dt;
    ramp_difficulty(session, dt);

    if is_dead(session, lit_under_player) {
        session.game_over();
    }
}

/// Fixed-interval spawning gated by a population cap.
///
/// The timer only resets when a spawn actually happens, so a full screen
/// spawns again as soon as a slot frees up.
pub fn schedule_spawns(session: &mut GameSession, dt: f32, cap: u32, batch: u32) {
    session.next_shape_timer -= dt;
    if session.next_shape_timer > 0.0 {
        return;
    }

    let live = session.spawner.len() as u32;
    if live < cap {
        let n = batch.min(cap - live);
        session.spawner.generate(n, &mut session.rng);
        session.next_shape_timer = session.max_next_shape_interval;
    }
}

/// Raise the shape cap once per growth period of play time.
///
/// Every period boundary crossed by `dt` counts, so one long tick can
/// raise the cap several times.
fn ramp_difficulty(session: &mut GameSession, dt: f32) {
    session.shape_growth_cooldown -= dt;
    if session.shape_growth_cooldown > 0.0 {
        return;
    }

    let period = session.max_shape_growth_cooldown;
    let steps = (-session.shape_growth_cooldown / period).floor() + 1.0;
    // Float-to-int casts saturate
    session.max_shapes = session.max_shapes.saturating_add(steps as u32);
    // Same as adding `steps * period`, without the rounding at huge dt
    session.shape_growth_cooldown = period - (-session.shape_growth_cooldown % period);
    log::debug!(
        "Difficulty up: max shapes {} at {:.1}s",
        session.max_shapes,
        session.survival_time
    );
}

/// Light kills unless dashing; leaving the screen always kills
pub fn is_dead(session: &GameSession, lit_under_player: bool) -> bool {
    let player = &session.player;
    (!player.is_dashing && lit_under_player) || !session.in_play_area(player.pos)
}
