//! End-to-end gameplay scenarios driven through `tick`

use duality_dash::GameConfig;
use duality_dash::consts::SIM_DT;
use duality_dash::input::{KeyEvent, KeyRole};
use duality_dash::mask;
use duality_dash::sim::{GameSession, SessionState, TickInput, tick};
use glam::Vec2;

fn session_with(config: GameConfig, seed: u64) -> GameSession {
    GameSession::new(config, seed).expect("valid config")
}

fn begin(session: &mut GameSession, dt: f32) {
    let input = TickInput {
        begin: true,
        ..Default::default()
    };
    tick(session, &input, dt);
    assert_eq!(session.state, SessionState::Playing);
}

#[test]
fn dash_requires_existing_motion() {
    let config = GameConfig {
        player_speed: 4.0,
        ..Default::default()
    };
    let mut session = session_with(config, 1);
    begin(&mut session, SIM_DT);

    session.player.pos = Vec2::new(100.0, 100.0);
    session.player.vel = Vec2::ZERO;
    session.player.dash_cooldown = 0.0;

    let input = TickInput::with_events([KeyEvent::pressed(KeyRole::Dash)]);
    tick(&mut session, &input, SIM_DT);

    assert!(session.player.dash_held);
    assert!(!session.player.is_dashing);
    assert_eq!(session.player.pos, Vec2::new(100.0, 100.0));
    assert!(session.trail.is_empty());
}

#[test]
fn moving_right_integrates_speed_times_dt() {
    let config = GameConfig {
        player_speed: 4.0,
        ..Default::default()
    };
    let mut session = session_with(config, 1);
    begin(&mut session, SIM_DT);
    let start = session.player.pos;

    let press = TickInput::with_events([KeyEvent::pressed(KeyRole::Right)]);
    tick(&mut session, &press, SIM_DT);
    for _ in 0..9 {
        tick(&mut session, &TickInput::default(), SIM_DT);
    }

    let expected = start.x + 4.0 * (10.0 / 60.0);
    assert!((session.player.pos.x - expected).abs() < 1e-3);
    assert_eq!(session.player.pos.y, start.y);
    assert_eq!(session.state, SessionState::Playing);
}

#[test]
fn spawning_stops_at_the_cap() {
    let config = GameConfig {
        initial_max_shapes: 5,
        next_shape_interval: 1.0,
        // Keep the cap fixed for this scenario
        shape_growth_cooldown: 1000.0,
        ..Default::default()
    };
    let mut session = session_with(config, 99);
    begin(&mut session, 0.0);
    assert!(session.spawner.is_empty());

    tick(&mut session, &TickInput::default(), 1.0);
    assert_eq!(session.spawner.len(), 1);

    for _ in 0..4 {
        tick(&mut session, &TickInput::default(), 1.0);
    }
    assert_eq!(session.spawner.len(), 5);

    for _ in 0..3 {
        tick(&mut session, &TickInput::default(), 1.0);
        assert_eq!(session.spawner.len(), 5);
    }
    assert_eq!(session.state, SessionState::Playing);
}

#[test]
fn begin_clears_title_screen_shapes() {
    let mut session = session_with(GameConfig::default(), 4);
    for _ in 0..100 {
        tick(&mut session, &TickInput::default(), SIM_DT);
    }
    assert_eq!(session.state, SessionState::Start);
    assert!(!session.spawner.is_empty());

    let input = TickInput::with_events([KeyEvent::pressed(KeyRole::Dash)]);
    tick(&mut session, &input, SIM_DT);
    assert_eq!(session.state, SessionState::Playing);
    assert!(session.spawner.is_empty());
}

#[test]
fn begin_tick_runs_one_clean_step() {
    let mut session = session_with(GameConfig::default(), 4);
    for _ in 0..100 {
        tick(&mut session, &TickInput::default(), SIM_DT);
    }
    assert!(!session.spawner.is_empty());

    // The lit report was sampled from the title screen, which is gone now
    let mut press = TickInput::with_events([KeyEvent::pressed(KeyRole::Dash)]);
    press.lit_under_player = true;
    tick(&mut session, &press, SIM_DT);

    assert_eq!(session.state, SessionState::Playing);
    assert!(session.spawner.is_empty());
    assert_eq!(session.survival_time, SIM_DT);
    assert_eq!(session.max_shapes, 10);
    assert_eq!(session.player.pos, session.center());
    assert!(session.last_score.is_none());

    let lit = TickInput {
        lit_under_player: true,
        ..Default::default()
    };
    tick(&mut session, &lit, SIM_DT);
    assert_eq!(session.state, SessionState::Over);
}

#[test]
fn begin_with_mask_feedback_never_dies_on_the_first_tick() {
    for seed in 0..20 {
        let mut session = session_with(GameConfig::default(), seed);
        let mut lit = false;
        for _ in 0..600 {
            let input = TickInput {
                lit_under_player: lit,
                ..Default::default()
            };
            tick(&mut session, &input, SIM_DT);
            lit = mask::is_lit(&session.spawner.shapes, session.player.pos);
        }
        let mut press = TickInput::with_events([KeyEvent::pressed(KeyRole::Dash)]);
        press.lit_under_player = lit;
        tick(&mut session, &press, SIM_DT);
        assert_eq!(session.state, SessionState::Playing, "seed {seed}");
    }
}

#[test]
fn leaving_the_screen_ends_the_run() {
    for lit in [false, true] {
        let mut session = session_with(GameConfig::default(), 5);
        begin(&mut session, SIM_DT);
        session.player.pos = Vec2::new(1921.0, 500.0);

        let input = TickInput {
            lit_under_player: lit,
            ..Default::default()
        };
        tick(&mut session, &input, SIM_DT);
        assert_eq!(session.state, SessionState::Over);
    }
}

#[test]
fn run_without_pixel_feedback_still_dies_at_the_edge() {
    let mut session = session_with(GameConfig::default(), 6);
    begin(&mut session, SIM_DT);
    let press = TickInput::with_events([KeyEvent::pressed(KeyRole::Left)]);
    tick(&mut session, &press, SIM_DT);
    // 960 units at 240 units/s: four seconds and change
    for _ in 0..400 {
        if session.state == SessionState::Over {
            break;
        }
        tick(&mut session, &TickInput::default(), SIM_DT);
    }
    assert_eq!(session.state, SessionState::Over);
    let score = session.last_score.expect("score recorded");
    assert!(score > 3.9 && score < 4.2, "score {score}");
}

#[test]
fn seeded_sessions_are_bit_identical() {
    let script = |i: usize| -> TickInput {
        let mut input = TickInput::default();
        match i {
            10 => input.begin = true,
            20 => input.events.push(KeyEvent::pressed(KeyRole::Up)),
            40 => input.events.push(KeyEvent::pressed(KeyRole::Right)),
            80 => input.events.push(KeyEvent::pressed(KeyRole::Dash)),
            110 => input.events.push(KeyEvent::released(KeyRole::Dash)),
            130 => input.events.push(KeyEvent::released(KeyRole::Up)),
            _ => {}
        }
        input
    };

    let mut a = session_with(GameConfig::default(), 2022);
    let mut b = session_with(GameConfig::default(), 2022);
    for i in 0..600 {
        let mut input_a = script(i);
        let mut input_b = script(i);
        input_a.lit_under_player = mask::is_lit(&a.spawner.shapes, a.player.pos);
        input_b.lit_under_player = mask::is_lit(&b.spawner.shapes, b.player.pos);
        tick(&mut a, &input_a, SIM_DT);
        tick(&mut b, &input_b, SIM_DT);
        assert_eq!(a.snapshot(), b.snapshot(), "diverged at tick {i}");
    }
}

#[test]
fn restart_with_dash_key_returns_to_title() {
    let mut session = session_with(GameConfig::default(), 8);
    begin(&mut session, SIM_DT);
    for _ in 0..30 {
        tick(&mut session, &TickInput::default(), SIM_DT);
    }
    let lit = TickInput {
        lit_under_player: true,
        ..Default::default()
    };
    tick(&mut session, &lit, SIM_DT);
    assert_eq!(session.state, SessionState::Over);
    let score = session.last_score.expect("score recorded");

    let press = TickInput::with_events([KeyEvent::pressed(KeyRole::Dash)]);
    tick(&mut session, &press, SIM_DT);
    assert_eq!(session.state, SessionState::Start);
    assert_eq!(session.player.pos, session.center());
    assert!(session.spawner.is_empty());
    assert_eq!(session.best_score(), Some(score));

    // Same key again starts the next run
    let release = TickInput::with_events([KeyEvent::released(KeyRole::Dash)]);
    tick(&mut session, &release, SIM_DT);
    tick(&mut session, &press, SIM_DT);
    assert_eq!(session.state, SessionState::Playing);
}

#[test]
fn dash_through_light_with_trail() {
    let mut session = session_with(GameConfig::default(), 10);
    begin(&mut session, SIM_DT);
    session.player.dash_cooldown = 0.0;

    let go = TickInput::with_events([KeyEvent::pressed(KeyRole::Up)]);
    tick(&mut session, &go, SIM_DT);
    let dash = TickInput::with_events([KeyEvent::pressed(KeyRole::Dash)]);
    tick(&mut session, &dash, SIM_DT);
    assert!(session.player.is_dashing);

    let lit = TickInput {
        lit_under_player: true,
        ..Default::default()
    };
    for _ in 0..10 {
        tick(&mut session, &lit, SIM_DT);
        assert_eq!(session.state, SessionState::Playing);
    }
    assert_eq!(session.trail.len(), 11);

    // Dropping the dash in the light is fatal on that same tick
    let mut stop = TickInput::with_events([KeyEvent::released(KeyRole::Dash)]);
    stop.lit_under_player = true;
    tick(&mut session, &stop, SIM_DT);
    assert_eq!(session.state, SessionState::Over);
}
