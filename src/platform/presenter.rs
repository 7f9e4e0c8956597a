//! Presentation seam
//!
//! The simulation knows nothing about pixels. Each frame the runner builds a
//! flat list of sprites keyed by entity id; a `Presenter` creates, moves and
//! removes its own visuals to match, and receives the label and modal
//! notifications.

use crate::Settings;
use crate::sim::{EnemyKind, GamePhase, GameState, Rect};

/// Id reserved for the player's ship (entity ids start at 1)
pub const PLAYER_SPRITE_ID: u32 = 0;

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    Bullet,
    EnemyBullet,
    Grunt,
    StandardBoss,
    OrbitalBoss,
    Explosion,
}

impl SpriteKind {
    /// CSS class used by the DOM host
    pub fn class_name(self) -> &'static str {
        match self {
            SpriteKind::Player => "player",
            SpriteKind::Bullet => "bullet",
            SpriteKind::EnemyBullet => "enemy-bullet",
            SpriteKind::Grunt => "enemy",
            SpriteKind::StandardBoss => "boss",
            SpriteKind::OrbitalBoss => "orbital-boss",
            SpriteKind::Explosion => "explosion",
        }
    }
}

/// One visual entity for this frame
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub id: u32,
    pub kind: SpriteKind,
    pub rect: Rect,
    /// CSS filter for battered bosses
    pub tint: Option<&'static str>,
}

/// External presentation layer
pub trait Presenter {
    /// Score / hit-points label sink
    fn set_stats(&mut self, score: u32, hit_points: u32);

    /// Show or hide the start control
    fn set_start_visible(&mut self, visible: bool);

    /// Blocking notification on GameOver / GameClear
    fn notify_terminal(&mut self, phase: GamePhase, score: u32);

    /// Bring visuals in line with `sprites`; ids not listed are gone
    fn render(&mut self, sprites: &[Sprite]);
}

/// Flatten the session into sprites, honouring the cosmetic settings
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Sprite> {
    let mut sprites = Vec::with_capacity(
        1 + state.bullets.len()
            + state.enemy_bullets.len()
            + state.enemies.len()
            + state.explosions.len(),
    );

    sprites.push(Sprite {
        id: PLAYER_SPRITE_ID,
        kind: SpriteKind::Player,
        rect: state.player.rect(),
        tint: None,
    });

    sprites.extend(state.bullets.iter().map(|b| Sprite {
        id: b.id,
        kind: SpriteKind::Bullet,
        rect: b.rect(),
        tint: None,
    }));

    sprites.extend(state.enemy_bullets.iter().map(|b| Sprite {
        id: b.id,
        kind: SpriteKind::EnemyBullet,
        rect: b.rect(),
        tint: None,
    }));

    sprites.extend(state.enemies.iter().map(|e| Sprite {
        id: e.id,
        kind: match e.kind {
            EnemyKind::Grunt => SpriteKind::Grunt,
            EnemyKind::StandardBoss(_) => SpriteKind::StandardBoss,
            EnemyKind::OrbitalBoss(_) => SpriteKind::OrbitalBoss,
        },
        rect: e.rect(),
        tint: if settings.damage_tint { e.damage_tint() } else { None },
    }));

    if settings.explosions {
        sprites.extend(state.explosions.iter().map(|x| Sprite {
            id: x.id,
            kind: SpriteKind::Explosion,
            rect: x.rect(),
            tint: None,
        }));
    }

    sprites
}

/// Presenter for headless runs: logs notifications, keeps the last frame
#[derive(Debug, Default)]
pub struct LogPresenter {
    pub stats: (u32, u32),
    pub start_visible: bool,
    pub terminal: Option<GamePhase>,
    pub frames: u64,
    pub last_sprite_count: usize,
}

impl Presenter for LogPresenter {
    fn set_stats(&mut self, score: u32, hit_points: u32) {
        if self.stats != (score, hit_points) {
            log::debug!("Score: {}  HP: {}", score, hit_points);
        }
        self.stats = (score, hit_points);
    }

    fn set_start_visible(&mut self, visible: bool) {
        self.start_visible = visible;
    }

    fn notify_terminal(&mut self, phase: GamePhase, score: u32) {
        match phase {
            GamePhase::GameClear => log::info!("Game Clear! Score: {}", score),
            _ => log::info!("Game Over! Score: {}", score),
        }
        self.terminal = Some(phase);
    }

    fn render(&mut self, sprites: &[Sprite]) {
        self.frames += 1;
        self.last_sprite_count = sprites.len();
    }
}
