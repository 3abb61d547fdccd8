//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven only by the elapsed time and input the host passes to `tick`
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies; collaborators read state
//!   snapshots and drained events

pub mod collision;
pub mod fleet;
pub mod shield;
pub mod sprites;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use fleet::{Fleet, FleetAdvance, FleetDirection, compute_step_tempo, step_size};
pub use shield::{CellVisual, SHIELD_COLS, SHIELD_ROWS, Shield};
pub use sprites::{Sprite, SpriteError};
pub use state::{
    Cannon, Enemy, EnemyKind, EnemyPhase, ExplosionAnim, FlyingBonus, GameEvent, GamePhase,
    GameState, Projectile, ShotDirection, TitleScene,
};
pub use tick::{TickInput, tick};
