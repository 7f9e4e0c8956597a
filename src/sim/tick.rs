//! The two simulation steps
//!
//! `tick` is the fixed 50 ms step (bullets, enemies, combat). `frame` is the
//! continuous step driven by the display refresh (player motion, held fire).

use super::combat::{advance_bullets, player_fire, resolve_enemies, resolve_enemy_bullets};
use super::motion::target_velocity;
use super::state::GameState;
use crate::consts::*;

/// Held input state sampled by the continuous step
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    /// Fire button held (repeats at the shot cooldown)
    pub fire: bool,
    /// Idle/demo mode - autopilot flies the ship
    pub idle_mode: bool,
}

/// Advance bullets, enemies and combat by one fixed step
pub fn tick(state: &mut GameState, now_ms: f64) {
    if !state.is_running() {
        return;
    }
    state.time_ticks += 1;
    expire_effects(state, now_ms);

    advance_bullets(state);
    resolve_enemy_bullets(state);
    if !state.is_running() {
        return;
    }
    resolve_enemies(state, now_ms);
}

/// Advance the player by `dt` seconds (capped at `MAX_FRAME_DT`)
pub fn frame(state: &mut GameState, input: &FrameInput, dt: f32, now_ms: f64) {
    if !state.is_running() {
        return;
    }
    let dt = dt.clamp(0.0, MAX_FRAME_DT);

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }

    let target = target_velocity(input.left, input.right);
    let area_width = state.area.width;
    state.player.steer(target, dt, area_width);

    if input.fire {
        player_fire(state, now_ms);
    }
}

/// Drop explosions whose display time is over
pub fn expire_effects(state: &mut GameState, now_ms: f64) {
    state.explosions.retain(|e| e.expires_at_ms > now_ms);
}

/// Chase the lowest enemy horizontally and keep the trigger down
fn autopilot(state: &GameState, input: &mut FrameInput) {
    input.fire = true;
    input.left = false;
    input.right = false;

    let Some(target) = state
        .enemies
        .iter()
        .filter(|e| e.rect().bottom() > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    else {
        return;
    };

    let offset = target.rect().center_x() - state.player.rect().center_x();
    // Dead zone keeps the ship from jittering around the target
    if offset < -8.0 {
        input.left = true;
    } else if offset > 8.0 {
        input.right = true;
    }
}
