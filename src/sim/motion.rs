//! Per-entity motion models
//!
//! Enemies and bullets move once per fixed tick with per-tick increments;
//! the player moves on the continuous frame step with a real `dt`.

use glam::Vec2;
use rand::Rng;

use super::state::{
    Bullet, Enemy, EnemyBullet, EnemyKind, OrbitalBoss, PlayArea, Player, StandardBoss,
};
use crate::clamp_to_area;
use crate::consts::*;

/// Sign that maps zero to zero
#[inline]
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Velocity the player wants given the held direction keys
pub fn target_velocity(left: bool, right: bool) -> f32 {
    let mut target = 0.0;
    if left {
        target -= PLAYER_SPEED;
    }
    if right {
        target += PLAYER_SPEED;
    }
    target
}

impl Player {
    /// Advance velocity toward `target_v` and integrate position.
    ///
    /// Velocity never overshoots the target within one step.
    pub fn steer(&mut self, target_v: f32, dt: f32, area_width: f32) {
        if target_v != 0.0 {
            let dv = PLAYER_ACCEL * dt * sign(target_v - self.vx);
            if (target_v - self.vx).abs() <= dv.abs() {
                self.vx = target_v;
            } else {
                self.vx += dv;
            }
        } else {
            let decel = PLAYER_FRICTION * dt;
            if self.vx.abs() <= decel {
                self.vx = 0.0;
            } else {
                self.vx -= sign(self.vx) * decel;
            }
        }

        self.pos.x = clamp_to_area(self.pos.x + self.vx * dt, self.size.x, area_width);
    }

    /// Centre the ship under the pointer, bypassing velocity
    pub fn place_at_pointer(&mut self, pointer_x: f32, area_width: f32) {
        self.pos.x = clamp_to_area(pointer_x - self.size.x / 2.0, self.size.x, area_width);
    }
}

impl Bullet {
    pub fn advance(&mut self) {
        self.pos.y -= BULLET_STEP;
    }

    /// Was already fully above the top edge before this tick's step
    pub fn is_out(&self) -> bool {
        self.rect().bottom() + BULLET_STEP < 0.0
    }
}

impl EnemyBullet {
    pub fn advance(&mut self) {
        self.pos.y += ENEMY_BULLET_STEP;
    }

    pub fn is_out(&self, area: &PlayArea) -> bool {
        self.pos.y > area.height
    }
}

impl StandardBoss {
    /// Pick a fresh wander target and speed
    pub fn reroll_wander(&mut self, max_x: f32, rng: &mut impl Rng) -> f32 {
        let target = rng.random::<f32>() * max_x;
        self.target_x = Some(target);
        self.h_speed = BOSS_MIN_H_SPEED + rng.random::<f32>() * BOSS_H_SPEED_SPREAD;
        target
    }
}

impl OrbitalBoss {
    /// Top-left corner for an entity of `size` at the current angle
    pub fn position(&self, size: Vec2) -> Vec2 {
        Vec2::new(
            self.center.x + self.angle.cos() * self.radii.x - size.x / 2.0,
            self.center.y + self.angle.sin() * self.radii.y - size.y / 2.0,
        )
    }
}

impl Enemy {
    /// Run this enemy's motion model for one fixed tick
    pub fn advance(&mut self, area: &PlayArea, rng: &mut impl Rng) {
        let size = self.size;
        match &mut self.kind {
            EnemyKind::Grunt => {
                self.pos.y += DESCENT_STEP;
            }
            EnemyKind::StandardBoss(boss) => {
                self.pos.y += DESCENT_STEP;

                let max_x = (area.width - size.x).max(0.0);
                let x = self.pos.x;
                // Step uses the speed in effect before any re-roll
                let step = boss.h_speed * TICK_SECS;
                let target = match boss.target_x {
                    Some(t) if (t - x).abs() >= BOSS_TARGET_EPSILON => t,
                    _ => boss.reroll_wander(max_x, rng),
                };
                self.pos.x = clamp_to_area(x + sign(target - x) * step, size.x, area.width);
            }
            EnemyKind::OrbitalBoss(boss) => {
                boss.center.y += boss.drift_y;
                boss.angle -= boss.angular_speed * TICK_SECS;
                let pos = boss.position(size);
                // y stays free so the boss can swing in from above
                self.pos = Vec2::new(clamp_to_area(pos.x, size.x, area.width), pos.y);
            }
        }
    }
}
