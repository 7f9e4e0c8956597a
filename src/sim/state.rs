//! Game state and core simulation types
//!
//! The session (`GameState`) owns every entity list and counter. The two
//! step functions in `tick` borrow it mutably; nothing else holds on to it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Dimensions of the play area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            width: DEFAULT_AREA_WIDTH,
            height: DEFAULT_AREA_HEIGHT,
        }
    }
}

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start trigger
    Idle,
    /// Ticks are live
    Running,
    /// Hit points ran out
    GameOver,
    /// Score target reached
    GameClear,
}

impl GamePhase {
    /// GameOver and GameClear are latched until the next start
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::GameClear)
    }
}

/// Notifications for the presentation layer, drained by the host each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Score or hit points changed
    StatsChanged { score: u32, hit_points: u32 },
    /// Cosmetic explosion created (expires on its own)
    Explosion { id: u32, pos: Vec2 },
    /// A boss survived a hit; `hits` is the running hit count
    BossHit { id: u32, hits: u8 },
    /// An enemy was shot down and scored
    EnemyDestroyed { id: u32, points: u32 },
    /// Session phase transition
    PhaseChanged(GamePhase),
}

/// The player's ship. Only `x` moves; `y` is pinned to the bottom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Horizontal velocity (px/s)
    pub vx: f32,
    pub size: Vec2,
}

impl Player {
    /// Centred at the bottom of the play area, at rest
    pub fn new(area: &PlayArea) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            pos: Vec2::new(
                (area.width - size.x) / 2.0,
                area.height - size.y - PLAYER_BOTTOM_MARGIN,
            ),
            vx: 0.0,
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// A player-fired projectile travelling upward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }
}

/// A boss-fired projectile travelling downward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub id: u32,
    pub pos: Vec2,
}

impl EnemyBullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }
}

/// Remaining and maximum hit points of a boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossHealth {
    pub hp: u8,
    pub max_hp: u8,
}

impl BossHealth {
    pub fn full(max_hp: u8) -> Self {
        Self { hp: max_hp, max_hp }
    }

    /// Hits absorbed so far
    pub fn hits(&self) -> u8 {
        self.max_hp - self.hp
    }
}

/// Boss that descends while wandering between random horizontal targets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardBoss {
    pub health: BossHealth,
    pub cooldown_ms: f64,
    pub last_shot_ms: f64,
    /// Wander target; re-rolled on arrival
    pub target_x: Option<f32>,
    /// Wander speed (px/s)
    pub h_speed: f32,
}

/// Boss that circles clockwise on an ellipse whose centre sinks each tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitalBoss {
    pub health: BossHealth,
    pub cooldown_ms: f64,
    pub last_shot_ms: f64,
    pub center: Vec2,
    /// Ellipse radii (rx, ry)
    pub radii: Vec2,
    /// Current angle (radians), decreasing over time
    pub angle: f32,
    /// rad/s
    pub angular_speed: f32,
    /// Centre drift per tick (px)
    pub drift_y: f32,
}

/// Enemy variants with their kind-specific state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EnemyKind {
    Grunt,
    StandardBoss(StandardBoss),
    OrbitalBoss(OrbitalBoss),
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn is_boss(&self) -> bool {
        !matches!(self.kind, EnemyKind::Grunt)
    }

    /// Boss health, `None` for grunts
    pub fn health(&self) -> Option<BossHealth> {
        match &self.kind {
            EnemyKind::Grunt => None,
            EnemyKind::StandardBoss(boss) => Some(boss.health),
            EnemyKind::OrbitalBoss(boss) => Some(boss.health),
        }
    }

    /// Score awarded when this enemy is destroyed
    pub fn points(&self) -> u32 {
        match self.kind {
            EnemyKind::Grunt => POINT_GRUNT,
            EnemyKind::StandardBoss(_) => POINT_BOSS,
            EnemyKind::OrbitalBoss(_) => POINT_ORBITAL_BOSS,
        }
    }

    /// Cosmetic tint (CSS filter) reflecting how battered a boss is.
    ///
    /// Never affects gameplay.
    pub fn damage_tint(&self) -> Option<&'static str> {
        const STANDARD: [&str; 2] = [
            "hue-rotate(25deg) saturate(1.2)",
            "hue-rotate(50deg) saturate(1.4)",
        ];
        const ORBITAL: [&str; 6] = [
            "hue-rotate(20deg) saturate(1.1)",
            "hue-rotate(70deg) saturate(1.2)",
            "hue-rotate(140deg) saturate(1.25)",
            "hue-rotate(210deg) saturate(1.3)",
            "hue-rotate(260deg) saturate(1.35)",
            "hue-rotate(310deg) saturate(1.4)",
        ];
        let (palette, health) = match &self.kind {
            EnemyKind::Grunt => return None,
            EnemyKind::StandardBoss(boss) => (&STANDARD[..], boss.health),
            EnemyKind::OrbitalBoss(boss) => (&ORBITAL[..], boss.health),
        };
        if health.hp == 0 {
            return None;
        }
        let stage = usize::from(health.hits()).checked_sub(1)?;
        palette.get(stage).copied()
    }
}

/// A short-lived explosion effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub pos: Vec2,
    pub expires_at_ms: f64,
}

impl Explosion {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(EXPLOSION_SIZE))
    }
}

/// The game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the current session's RNG was built from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub area: PlayArea,
    pub phase: GamePhase,
    pub score: u32,
    pub hit_points: u32,
    /// Spawner calls this session; every `BOSS_SPAWN_EVERY`th is a boss
    pub spawn_counter: u32,
    /// Fixed ticks run this session
    pub time_ticks: u64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub enemies: Vec<Enemy>,
    /// Visual only
    pub explosions: Vec<Explosion>,
    /// Time of the last accepted player shot
    pub last_shot_ms: Option<f64>,
    /// Pending notifications for the presenter
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle session
    pub fn new(seed: u64, area: PlayArea) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            area,
            phase: GamePhase::Idle,
            score: 0,
            hit_points: START_HIT_POINTS,
            spawn_counter: 0,
            time_ticks: 0,
            player: Player::new(&area),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            last_shot_ms: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Tear down every entity and counter, returning to `Idle`.
    ///
    /// The last shot time carries over: the fire throttle spans sessions.
    pub fn reset(&mut self, seed: u64) {
        let (area, last_shot_ms) = (self.area, self.last_shot_ms);
        *self = Self::new(seed, area);
        self.last_shot_ms = last_shot_ms;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Session RNG
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Queue a stats notification with the current values
    pub fn push_stats(&mut self) {
        self.events.push(GameEvent::StatsChanged {
            score: self.score,
            hit_points: self.hit_points,
        });
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbital(hp: u8) -> Enemy {
        Enemy {
            id: 1,
            pos: Vec2::ZERO,
            size: Vec2::splat(ORBITAL_BOSS_SIZE),
            kind: EnemyKind::OrbitalBoss(OrbitalBoss {
                health: BossHealth { hp, max_hp: ORBITAL_MAX_HP },
                cooldown_ms: ORBITAL_COOLDOWN_MS,
                last_shot_ms: 0.0,
                center: Vec2::ZERO,
                radii: Vec2::new(100.0, ORBITAL_RADIUS_Y),
                angle: 0.0,
                angular_speed: ORBITAL_ANGULAR_SPEED,
                drift_y: ORBITAL_DRIFT_Y,
            }),
        }
    }

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let state = GameState::new(7, PlayArea::default());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.hit_points, START_HIT_POINTS);
        assert_eq!(state.score, 0);
        assert!(state.enemies.is_empty() && state.bullets.is_empty());
    }

    #[test]
    fn test_reset_keeps_last_shot_time() {
        let mut state = GameState::new(7, PlayArea::default());
        state.last_shot_ms = Some(1000.0);
        state.score = 9;
        state.reset(8);
        assert_eq!(state.last_shot_ms, Some(1000.0));
        assert_eq!((state.score, state.seed), (0, 8));
    }

    #[test]
    fn test_player_starts_centred_at_bottom() {
        let area = PlayArea { width: 400.0, height: 600.0 };
        let player = Player::new(&area);
        assert_eq!(player.pos.x, (400.0 - PLAYER_WIDTH) / 2.0);
        assert_eq!(player.rect().bottom(), 600.0 - PLAYER_BOTTOM_MARGIN);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(1, PlayArea::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_damage_tint_stages() {
        assert_eq!(orbital(7).damage_tint(), None);
        assert_eq!(orbital(6).damage_tint(), Some("hue-rotate(20deg) saturate(1.1)"));
        assert_eq!(orbital(1).damage_tint(), Some("hue-rotate(310deg) saturate(1.4)"));
        assert_eq!(orbital(0).damage_tint(), None);
    }

    #[test]
    fn test_points_by_kind() {
        let mut enemy = orbital(7);
        assert_eq!(enemy.points(), POINT_ORBITAL_BOSS);
        enemy.kind = EnemyKind::Grunt;
        assert_eq!(enemy.points(), POINT_GRUNT);
        assert!(!enemy.is_boss());
        assert!(enemy.health().is_none());
    }
}
