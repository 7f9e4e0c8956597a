//! Enemy spawner
//!
//! Called on its own cadence. Every `BOSS_SPAWN_EVERY`th call produces a
//! boss (coin flip between the two variants) instead of a grunt.

use glam::Vec2;
use rand::Rng;

use super::state::{BossHealth, Enemy, EnemyKind, GameState, OrbitalBoss, StandardBoss};
use crate::clamp_to_area;
use crate::consts::*;

/// Advance the spawn counter and create this cadence's enemy
pub fn spawn_tick(state: &mut GameState, now_ms: f64) {
    state.spawn_counter += 1;
    let enemy = if state.spawn_counter % BOSS_SPAWN_EVERY == 0 {
        if state.rng().random_bool(0.5) {
            spawn_standard_boss(state, now_ms)
        } else {
            spawn_orbital_boss(state, now_ms)
        }
    } else {
        spawn_grunt(state)
    };
    state.enemies.push(enemy);
}

fn spawn_grunt(state: &mut GameState) -> Enemy {
    let span = (state.area.width - GRUNT_SIZE).max(0.0);
    let x = state.rng().random::<f32>() * span;
    Enemy {
        id: state.next_entity_id(),
        pos: Vec2::new(x, GRUNT_SPAWN_Y),
        size: Vec2::splat(GRUNT_SIZE),
        kind: EnemyKind::Grunt,
    }
}

fn spawn_standard_boss(state: &mut GameState, now_ms: f64) -> Enemy {
    let span = (state.area.width - BOSS_SIZE).max(0.0);
    let rng = state.rng();
    let x = rng.random::<f32>() * span;
    let target_x = rng.random::<f32>() * span;
    let h_speed = BOSS_MIN_H_SPEED + rng.random::<f32>() * BOSS_H_SPEED_SPREAD;

    let id = state.next_entity_id();
    log::debug!("Standard boss {} spawned (spawn #{})", id, state.spawn_counter);
    Enemy {
        id,
        pos: Vec2::new(x, BOSS_SPAWN_Y),
        size: Vec2::splat(BOSS_SIZE),
        kind: EnemyKind::StandardBoss(StandardBoss {
            health: BossHealth::full(BOSS_MAX_HP),
            cooldown_ms: BOSS_COOLDOWN_MS,
            last_shot_ms: now_ms,
            target_x: Some(target_x),
            h_speed,
        }),
    }
}

fn spawn_orbital_boss(state: &mut GameState, now_ms: f64) -> Enemy {
    let size = Vec2::splat(ORBITAL_BOSS_SIZE);
    let area_width = state.area.width;
    let angle = state.rng().random::<f32>() * std::f32::consts::TAU;

    let boss = OrbitalBoss {
        health: BossHealth::full(ORBITAL_MAX_HP),
        cooldown_ms: ORBITAL_COOLDOWN_MS,
        last_shot_ms: now_ms,
        center: Vec2::new(area_width / 2.0, ORBITAL_CENTER_Y),
        // Reaches nearly edge to edge
        radii: Vec2::new(
            ORBITAL_MIN_RADIUS_X.max((area_width - size.x) / 2.0 - 10.0),
            ORBITAL_RADIUS_Y,
        ),
        angle,
        angular_speed: ORBITAL_ANGULAR_SPEED,
        drift_y: ORBITAL_DRIFT_Y,
    };
    let start = boss.position(size);

    let id = state.next_entity_id();
    log::debug!("Orbital boss {} spawned (spawn #{})", id, state.spawn_counter);
    Enemy {
        id,
        pos: Vec2::new(clamp_to_area(start.x, size.x, area_width), start.y),
        size,
        kind: EnemyKind::OrbitalBoss(boss),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PlayArea;

    fn state() -> GameState {
        GameState::new(4242, PlayArea { width: 400.0, height: 600.0 })
    }

    #[test]
    fn test_every_fifth_spawn_is_a_boss() {
        let mut state = state();
        for i in 1..=20u32 {
            let before = state.enemies.len();
            spawn_tick(&mut state, i as f64 * SPAWN_INTERVAL_MS);
            assert_eq!(state.enemies.len(), before + 1);
            let newest = state.enemies.last().expect("spawned");
            assert_eq!(newest.is_boss(), i % BOSS_SPAWN_EVERY == 0, "spawn #{}", i);
        }
        assert_eq!(state.spawn_counter, 20);
    }

    #[test]
    fn test_both_boss_kinds_appear() {
        let (mut standard, mut orbital) = (0, 0);
        for seed in 0..64 {
            let mut state = GameState::new(seed, PlayArea { width: 400.0, height: 600.0 });
            for _ in 0..BOSS_SPAWN_EVERY {
                spawn_tick(&mut state, 0.0);
            }
            match state.enemies.last().map(|e| &e.kind) {
                Some(EnemyKind::StandardBoss(_)) => standard += 1,
                Some(EnemyKind::OrbitalBoss(_)) => orbital += 1,
                other => panic!("fifth spawn was not a boss: {:?}", other),
            }
        }
        // A fair coin over 64 seeds lands well inside these bounds
        assert!(standard >= 8 && orbital >= 8, "standard {} orbital {}", standard, orbital);
    }

    #[test]
    fn test_grunt_spawns_at_top_inside_width() {
        let mut state = state();
        for _ in 0..4 {
            spawn_tick(&mut state, 0.0);
        }
        for grunt in &state.enemies {
            assert_eq!(grunt.pos.y, GRUNT_SPAWN_Y);
            assert!(grunt.pos.x >= 0.0 && grunt.pos.x <= 400.0 - GRUNT_SIZE);
        }
    }

    #[test]
    fn test_boss_initial_state() {
        let mut state = state();
        let standard = spawn_standard_boss(&mut state, 1234.0);
        let EnemyKind::StandardBoss(boss) = &standard.kind else {
            panic!("wrong kind");
        };
        assert_eq!(boss.health, BossHealth { hp: 3, max_hp: 3 });
        assert_eq!(boss.cooldown_ms, 2000.0);
        assert_eq!(boss.last_shot_ms, 1234.0);
        assert!((80.0..160.0).contains(&boss.h_speed));
        assert_eq!(standard.pos.y, BOSS_SPAWN_Y);

        let orbital = spawn_orbital_boss(&mut state, 99.0);
        let EnemyKind::OrbitalBoss(boss) = &orbital.kind else {
            panic!("wrong kind");
        };
        assert_eq!(boss.health, BossHealth { hp: 7, max_hp: 7 });
        assert_eq!(boss.cooldown_ms, 1000.0);
        assert_eq!(boss.center, Vec2::new(200.0, ORBITAL_CENTER_Y));
        assert_eq!(boss.radii, Vec2::new(142.0, 80.0));
        assert!((0.0..std::f32::consts::TAU).contains(&boss.angle));
        assert!(orbital.pos.x >= 0.0 && orbital.rect().right() <= 400.0);
    }

    #[test]
    fn test_narrow_area_uses_minimum_radius() {
        let mut state = GameState::new(1, PlayArea { width: 150.0, height: 600.0 });
        let orbital = spawn_orbital_boss(&mut state, 0.0);
        let EnemyKind::OrbitalBoss(boss) = &orbital.kind else {
            panic!("wrong kind");
        };
        assert_eq!(boss.radii.x, ORBITAL_MIN_RADIUS_X);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = state();
        let mut b = state();
        for _ in 0..15 {
            spawn_tick(&mut a, 0.0);
            spawn_tick(&mut b, 0.0);
        }
        let xs = |s: &GameState| {
            s.enemies
                .iter()
                .map(|e| (e.pos.x, e.is_boss()))
                .collect::<Vec<_>>()
        };
        assert_eq!(xs(&a), xs(&b));
    }
}
