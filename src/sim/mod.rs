//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied timestamps only
//! - Seeded RNG only
//! - Back-to-front iteration wherever entities are removed
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod combat;
pub mod motion;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{ClockTask, Due, Epoch, SimClock};
pub use collision::{Rect, intersects};
pub use combat::{HitOutcome, player_fire};
pub use spawn::spawn_tick;
pub use state::{
    BossHealth, Bullet, Enemy, EnemyBullet, EnemyKind, Explosion, GameEvent, GamePhase, GameState,
    OrbitalBoss, PlayArea, Player, StandardBoss,
};
pub use tick::{FrameInput, frame, tick};
