//! Combat resolution: bullets against entities, contact damage, scoring
//!
//! Lists are walked back to front so removing the current element never
//! disturbs the indices still to be visited. Resolution halts the moment the
//! session leaves `Running`.

use glam::Vec2;

use super::collision::intersects;
use super::session;
use super::state::{Bullet, Enemy, EnemyBullet, EnemyKind, Explosion, GameEvent, GameState};
use crate::consts::*;

/// Result of a player bullet landing on an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Enemy is gone
    Destroyed,
    /// Boss survived; `hits` absorbed so far
    Damaged { hits: u8 },
}

impl Enemy {
    /// Fire if the boss cooldown has elapsed; returns the bullet's position
    pub fn try_fire(&mut self, now_ms: f64) -> Option<Vec2> {
        let (cooldown_ms, last_shot_ms) = match &mut self.kind {
            EnemyKind::Grunt => return None,
            EnemyKind::StandardBoss(boss) => (boss.cooldown_ms, &mut boss.last_shot_ms),
            EnemyKind::OrbitalBoss(boss) => (boss.cooldown_ms, &mut boss.last_shot_ms),
        };
        if now_ms - *last_shot_ms < cooldown_ms {
            return None;
        }
        *last_shot_ms = now_ms;
        Some(Vec2::new(
            self.pos.x + self.size.x / 2.0 - BULLET_WIDTH / 2.0,
            self.pos.y + self.size.y + 2.0,
        ))
    }

    /// Apply one bullet's worth of damage (with knockback for bosses)
    pub fn take_hit(&mut self) -> HitOutcome {
        let health = match &mut self.kind {
            EnemyKind::Grunt => return HitOutcome::Destroyed,
            EnemyKind::StandardBoss(boss) => &mut boss.health,
            EnemyKind::OrbitalBoss(boss) => &mut boss.health,
        };
        health.hp = health.hp.saturating_sub(1);
        let (hp, hits) = (health.hp, health.hits());
        self.knockback();
        if hp == 0 {
            HitOutcome::Destroyed
        } else {
            HitOutcome::Damaged { hits }
        }
    }

    /// Nudge a boss upward, never above `KNOCKBACK_CEILING`
    pub fn knockback(&mut self) {
        if self.is_boss() {
            self.pos.y = (self.pos.y - KNOCKBACK).max(KNOCKBACK_CEILING);
        }
    }
}

/// Fire a player bullet unless the shot cooldown is still running
pub fn player_fire(state: &mut GameState, now_ms: f64) -> bool {
    if !state.is_running() {
        return false;
    }
    if let Some(last) = state.last_shot_ms {
        if now_ms - last < SHOOT_COOLDOWN_MS {
            return false;
        }
    }
    state.last_shot_ms = Some(now_ms);

    let player = state.player.rect();
    let id = state.next_entity_id();
    state.bullets.push(Bullet {
        id,
        // Bottom edge sits on the ship's top edge
        pos: Vec2::new(
            player.center_x() - BULLET_WIDTH / 2.0,
            player.top() - BULLET_HEIGHT,
        ),
    });
    true
}

/// Leave a short-lived explosion at an enemy's corner
pub fn spawn_explosion(state: &mut GameState, at: Vec2, now_ms: f64) {
    let id = state.next_entity_id();
    let pos = at - Vec2::splat(EXPLOSION_SIZE / 2.0);
    state.explosions.push(Explosion {
        id,
        pos,
        expires_at_ms: now_ms + EXPLOSION_TTL_MS,
    });
    state.events.push(GameEvent::Explosion { id, pos });
}

/// Move player bullets and drop the ones that left the top edge
pub fn advance_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.advance();
    }
    state.bullets.retain(|b| !b.is_out());
}

/// Move enemy bullets; those touching the player deal damage
pub fn resolve_enemy_bullets(state: &mut GameState) {
    let area = state.area;
    let mut i = state.enemy_bullets.len();
    while i > 0 {
        i -= 1;
        let Some(bullet) = state.enemy_bullets.get_mut(i) else {
            continue;
        };
        bullet.advance();

        if intersects(&bullet.rect(), &state.player.rect()) {
            state.enemy_bullets.remove(i);
            session::apply_damage(state, ENEMY_BULLET_DAMAGE);
            if !state.is_running() {
                return;
            }
            continue;
        }

        if bullet.is_out(&area) {
            state.enemy_bullets.remove(i);
        }
    }
}

/// Move every enemy, let bosses fire, and settle bullet and contact hits
pub fn resolve_enemies(state: &mut GameState, now_ms: f64) {
    let area = state.area;
    let mut i = state.enemies.len();
    while i > 0 {
        i -= 1;
        let Some(enemy) = state.enemies.get_mut(i) else {
            continue;
        };
        enemy.advance(&area, &mut state.rng);

        if let Some(pos) = enemy.try_fire(now_ms) {
            let id = state.next_entity_id();
            state.enemy_bullets.push(EnemyBullet { id, pos });
        }

        if resolve_bullet_hits(state, i, now_ms) {
            if !state.is_running() {
                return;
            }
            continue;
        }

        let enemy_rect = state.enemies[i].rect();
        if enemy_rect.top() > area.height {
            log::info!("Enemy {} reached the bottom", state.enemies[i].id);
            session::force_defeat(state);
            return;
        }

        if intersects(&state.player.rect(), &enemy_rect) {
            state.enemies.remove(i);
            session::apply_damage(state, CONTACT_DAMAGE);
            if !state.is_running() {
                return;
            }
        }
    }
}

/// Test player bullets against enemy `i`. Each landing bullet is consumed.
///
/// Returns true if the enemy was destroyed (and removed).
fn resolve_bullet_hits(state: &mut GameState, i: usize, now_ms: f64) -> bool {
    let mut j = state.bullets.len();
    while j > 0 {
        j -= 1;
        let (Some(bullet), Some(enemy)) = (state.bullets.get(j), state.enemies.get(i)) else {
            continue;
        };
        if !intersects(&bullet.rect(), &enemy.rect()) {
            continue;
        }

        state.bullets.remove(j);
        let enemy = &mut state.enemies[i];
        let outcome = enemy.take_hit();
        let (id, at) = (enemy.id, enemy.pos);
        spawn_explosion(state, at, now_ms);

        match outcome {
            HitOutcome::Damaged { hits } => {
                state.events.push(GameEvent::BossHit { id, hits });
            }
            HitOutcome::Destroyed => {
                let enemy = state.enemies.remove(i);
                let points = enemy.points();
                if enemy.is_boss() {
                    log::info!("Boss {} destroyed (+{})", id, points);
                }
                state.events.push(GameEvent::EnemyDestroyed { id, points });
                session::award(state, points);
                return true;
            }
        }
    }
    false
}
