//! Session lifecycle and the latched end conditions
//!
//! Idle -> Running on start; Running -> GameOver | GameClear when a check
//! trips; any phase -> Running again on restart (which rebuilds everything).

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Begin a fresh session, discarding whatever the previous one left behind
pub fn start(state: &mut GameState, seed: u64) {
    state.reset(seed);
    state.phase = GamePhase::Running;
    log::info!("Session started with seed: {}", seed);
    state.events.push(GameEvent::PhaseChanged(GamePhase::Running));
    state.push_stats();
}

/// Abandon the session and return to `Idle`
pub fn stop(state: &mut GameState) {
    let seed = state.seed;
    let was = state.phase;
    state.reset(seed);
    if was != GamePhase::Idle {
        log::info!("Session stopped (was {:?})", was);
        state.events.push(GameEvent::PhaseChanged(GamePhase::Idle));
    }
}

/// Trip GameOver once hit points are exhausted
pub fn check_game_over(state: &mut GameState) -> bool {
    if state.hit_points == 0 && state.phase == GamePhase::Running {
        state.phase = GamePhase::GameOver;
        log::info!("Game over (score {})", state.score);
        state.events.push(GameEvent::PhaseChanged(GamePhase::GameOver));
        return true;
    }
    false
}

/// Trip GameClear once the score target is met
pub fn check_game_clear(state: &mut GameState) -> bool {
    if state.score >= CLEAR_SCORE && state.phase == GamePhase::Running {
        state.phase = GamePhase::GameClear;
        log::info!("Game clear (hit points {})", state.hit_points);
        state.events.push(GameEvent::PhaseChanged(GamePhase::GameClear));
        return true;
    }
    false
}

/// Subtract hit points (floored at zero), notify, and check for GameOver
pub fn apply_damage(state: &mut GameState, amount: u32) {
    state.hit_points = state.hit_points.saturating_sub(amount);
    state.push_stats();
    check_game_over(state);
}

/// An enemy got past the bottom edge: hit points drop straight to zero
pub fn force_defeat(state: &mut GameState) {
    state.hit_points = 0;
    state.push_stats();
    check_game_over(state);
}

/// Add score, notify, and check for GameClear
pub fn award(state: &mut GameState, points: u32) {
    state.score += points;
    state.push_stats();
    check_game_clear(state);
}
