//! Read-only view of a session for the renderer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shapes::ShapeKind;
use super::state::{GameSession, SessionState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub scale: f32,
    pub is_dashing: bool,
    pub dash_cooldown: f32,
    /// Cooldown bar fill, 1 = dash ready
    pub dash_ready: f32,
    pub dash_stamina: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeView {
    pub id: u32,
    pub pos: Vec2,
    pub angle: f32,
    pub scale: f32,
    pub kind: ShapeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub lifetime: f32,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: SessionState,
    pub survival_time: f32,
    /// Ticks simulated in the current run
    pub ticks: u64,
    pub max_shapes: u32,
    pub last_score: Option<f32>,
    pub best_score: Option<f32>,
    pub hint: Option<String>,
    pub player: PlayerView,
    pub shapes: Vec<ShapeView>,
    pub particles: Vec<ParticleView>,
}

impl GameSession {
    /// Capture the current frame state
    pub fn snapshot(&self) -> Snapshot {
        let player = &self.player;
        Snapshot {
            state: self.state,
            survival_time: self.survival_time,
            ticks: self.time_ticks,
            max_shapes: self.max_shapes,
            last_score: self.last_score,
            best_score: self.best_score(),
            hint: self.hint().map(str::to_string),
            player: PlayerView {
                pos: player.pos,
                scale: player.scale,
                is_dashing: player.is_dashing,
                dash_cooldown: player.dash_cooldown,
                dash_ready: player.dash_ready_fraction(),
                dash_stamina: player.dash_stamina,
            },
            shapes: self
                .spawner
                .shapes
                .iter()
                .map(|s| ShapeView {
                    id: s.id,
                    pos: s.pos,
                    angle: s.angle,
                    scale: s.scale,
                    kind: s.kind,
                })
                .collect(),
            particles: self
                .trail
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    lifetime: p.lifetime,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_snapshot_mirrors_session() {
        let mut session = GameSession::new(GameConfig::default(), 3).expect("valid config");
        session.spawner.generate(4, &mut session.rng);
        let snap = session.snapshot();
        assert_eq!(snap.state, SessionState::Start);
        assert_eq!(snap.shapes.len(), 4);
        assert_eq!(snap.player.pos, Vec2::new(960.0, 540.0));
        assert_eq!(snap.shapes[2].id, session.spawner.shapes[2].id);
        assert!(snap.particles.is_empty());
        assert_eq!(snap.ticks, 0);
        assert!(serde_json::to_string(&snap).is_ok());
    }

    #[test]
    fn test_snapshot_counts_play_ticks() {
        use crate::sim::{TickInput, tick};
        let mut session = GameSession::new(GameConfig::default(), 3).expect("valid config");
        // Title screen ticks do not count
        for _ in 0..5 {
            tick(&mut session, &TickInput::default(), 1.0 / 60.0);
        }
        session.begin();
        for _ in 0..7 {
            tick(&mut session, &TickInput::default(), 1.0 / 60.0);
        }
        assert_eq!(session.snapshot().ticks, 7);
    }
}
