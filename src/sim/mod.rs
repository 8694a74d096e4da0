//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (one `Pcg32` per session)
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies; the lit-pixel query arrives as input

pub mod particles;
pub mod player;
pub mod shapes;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use particles::{Particle, TrailSystem};
pub use player::Player;
pub use shapes::{Shape, ShapeKind, Spawner};
pub use snapshot::{ParticleView, PlayerView, ShapeView, Snapshot};
pub use state::{GameSession, RngState, SessionState};
pub use tick::{TickInput, is_dead, schedule_spawns, tick};
