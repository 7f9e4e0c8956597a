//! Arcade Shooter - a vertical shooter with grunts and two boss variants
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, combat, session state)
//! - `platform`: Browser/native glue (input state, presenter, clock-driven runner)
//! - `settings`: Host-supplied configuration

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation step (entities, bullets, combat)
    pub const FIXED_TICK_MS: f64 = 50.0;
    /// Fixed step expressed in seconds, used by the rate-based motion models
    pub const TICK_SECS: f32 = 0.05;
    /// Spawner cadence
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;
    /// Largest continuous step; longer frames (tab suspend) are truncated
    pub const MAX_FRAME_DT: f32 = 0.033;
    /// Maximum fixed ticks run per pump before the backlog is dropped
    pub const MAX_CATCHUP_TICKS: u32 = 8;

    /// Default play area when the host does not provide one
    pub const DEFAULT_AREA_WIDTH: f32 = 480.0;
    pub const DEFAULT_AREA_HEIGHT: f32 = 640.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;
    /// Top speed (px/s)
    pub const PLAYER_SPEED: f32 = 360.0;
    /// px/s² while steering
    pub const PLAYER_ACCEL: f32 = 2200.0;
    /// px/s² while coasting to a stop
    pub const PLAYER_FRICTION: f32 = 2600.0;
    /// Minimum gap between accepted player shots
    pub const SHOOT_COOLDOWN_MS: f64 = 320.0;

    /// Projectiles
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    /// Pixels per fixed tick, both directions
    pub const BULLET_STEP: f32 = 5.0;
    pub const ENEMY_BULLET_STEP: f32 = 5.0;

    /// Enemies
    pub const GRUNT_SIZE: f32 = 40.0;
    pub const GRUNT_SPAWN_Y: f32 = -20.0;
    pub const BOSS_SIZE: f32 = 60.0;
    pub const BOSS_SPAWN_Y: f32 = -30.0;
    pub const ORBITAL_BOSS_SIZE: f32 = 96.0;
    pub const ORBITAL_CENTER_Y: f32 = -40.0;
    /// Vertical descent per fixed tick (grunt and standard boss)
    pub const DESCENT_STEP: f32 = 3.0;

    /// Every Nth spawn is a boss
    pub const BOSS_SPAWN_EVERY: u32 = 5;

    pub const BOSS_MAX_HP: u8 = 3;
    pub const BOSS_COOLDOWN_MS: f64 = 2000.0;
    /// Horizontal wander speed range (px/s)
    pub const BOSS_MIN_H_SPEED: f32 = 80.0;
    pub const BOSS_H_SPEED_SPREAD: f32 = 80.0;
    /// Distance at which a wander target counts as reached
    pub const BOSS_TARGET_EPSILON: f32 = 4.0;

    pub const ORBITAL_MAX_HP: u8 = 7;
    pub const ORBITAL_COOLDOWN_MS: f64 = 1000.0;
    pub const ORBITAL_MIN_RADIUS_X: f32 = 60.0;
    pub const ORBITAL_RADIUS_Y: f32 = 80.0;
    /// rad/s, applied clockwise
    pub const ORBITAL_ANGULAR_SPEED: f32 = 2.6;
    /// Centre drift per fixed tick
    pub const ORBITAL_DRIFT_Y: f32 = 1.5;

    /// Upward nudge on a boss hit, and the highest a boss can be pushed
    pub const KNOCKBACK: f32 = 12.0;
    pub const KNOCKBACK_CEILING: f32 = -120.0;

    /// Scoring
    pub const POINT_GRUNT: u32 = 1;
    pub const POINT_BOSS: u32 = 3;
    pub const POINT_ORBITAL_BOSS: u32 = 15;
    pub const CLEAR_SCORE: u32 = 100;

    /// Hit points
    pub const START_HIT_POINTS: u32 = 100;
    pub const ENEMY_BULLET_DAMAGE: u32 = 20;
    pub const CONTACT_DAMAGE: u32 = 10;

    /// Cosmetic explosion
    pub const EXPLOSION_SIZE: f32 = 20.0;
    pub const EXPLOSION_TTL_MS: f64 = 500.0;
}

/// Clamp a left edge so an entity of `width` stays inside `[0, area_width]`
#[inline]
pub fn clamp_to_area(x: f32, width: f32, area_width: f32) -> f32 {
    x.clamp(0.0, (area_width - width).max(0.0))
}
