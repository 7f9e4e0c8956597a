//! Game driver
//!
//! Owns the session, the clock, held input and a presenter. The host feeds
//! it input events and calls `pump` once per display frame with the current
//! timestamp; everything else (fixed steps, spawns, the continuous step,
//! halting on a terminal phase) happens in here.

use super::input::{InputState, Key};
use super::presenter::{Presenter, build_scene};
use crate::Settings;
use crate::sim::tick::expire_effects;
use crate::sim::{
    ClockTask, Epoch, GameEvent, GamePhase, GameState, PlayArea, SimClock, frame, player_fire,
    session, spawn_tick, tick,
};

pub struct Game<P: Presenter> {
    state: GameState,
    clock: SimClock,
    input: InputState,
    settings: Settings,
    presenter: P,
}

impl<P: Presenter> Game<P> {
    pub fn new(settings: Settings, area: PlayArea, mut presenter: P) -> Self {
        let state = GameState::new(settings.seed.unwrap_or_default(), area);
        presenter.set_stats(state.score, state.hit_points);
        presenter.set_start_visible(true);
        Self {
            state,
            clock: SimClock::new(),
            input: InputState::default(),
            settings,
            presenter,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running() && self.clock.is_running()
    }

    /// Start (or restart) a session at `now_ms`.
    ///
    /// The old session and its schedule are torn down before anything new
    /// is scheduled.
    pub fn start(&mut self, now_ms: f64) -> Epoch {
        self.clock.cancel();
        self.input.clear();

        let seed = self.settings.seed.unwrap_or_else(rand::random);
        session::start(&mut self.state, seed);
        let epoch = self.clock.start(now_ms);

        self.presenter.set_start_visible(false);
        self.flush_events();
        self.presenter.render(&build_scene(&self.state, &self.settings));
        epoch
    }

    /// Abandon the session and go back to idle
    pub fn stop(&mut self) {
        self.clock.cancel();
        self.input.clear();
        session::stop(&mut self.state);
        self.presenter.set_start_visible(true);
        self.flush_events();
        self.presenter.render(&build_scene(&self.state, &self.settings));
    }

    /// Key went down. Fire while not running begins a session instead.
    pub fn key_down(&mut self, key: Key, now_ms: f64) {
        if key == Key::Fire && !self.is_running() {
            self.start(now_ms);
            return;
        }
        self.input.press(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.release(key);
    }

    /// Discrete fire (click on the play area); begins a session when idle
    pub fn fire_once(&mut self, now_ms: f64) {
        if !self.is_running() {
            self.start(now_ms);
            return;
        }
        player_fire(&mut self.state, now_ms);
    }

    /// Pointer moved to `x` in play-area coordinates
    pub fn pointer_moved(&mut self, x: f32) {
        if !self.settings.mouse_control || !self.is_running() {
            return;
        }
        let width = self.state.area.width;
        self.state.player.place_at_pointer(x, width);
    }

    /// Run everything due at `now_ms`, then present the result
    pub fn pump(&mut self, now_ms: f64) {
        while let Some(due) = self.clock.poll(now_ms) {
            match due.task {
                ClockTask::Fixed => tick(&mut self.state, due.at_ms),
                ClockTask::Spawn => spawn_tick(&mut self.state, due.at_ms),
            }
            if !self.state.is_running() {
                break;
            }
        }

        if let Some(dt) = self.clock.frame_dt(now_ms) {
            let input = self.input.frame_input(self.settings.demo_mode);
            frame(&mut self.state, &input, dt, now_ms);
        }

        // Explosions fade even while halted
        expire_effects(&mut self.state, now_ms);
        self.flush_events();
        self.presenter.render(&build_scene(&self.state, &self.settings));
    }

    /// Forward queued events; halt everything on a terminal phase
    fn flush_events(&mut self) {
        let mut stats = None;
        let mut terminal = None;
        for event in self.state.drain_events() {
            match event {
                GameEvent::StatsChanged { score, hit_points } => stats = Some((score, hit_points)),
                GameEvent::PhaseChanged(phase) if phase.is_terminal() => terminal = Some(phase),
                GameEvent::EnemyDestroyed { id, points } => {
                    log::trace!("Enemy {} destroyed (+{})", id, points)
                }
                _ => {}
            }
        }

        if let Some((score, hit_points)) = stats {
            self.presenter.set_stats(score, hit_points);
        }
        if let Some(phase) = terminal {
            self.halt(phase);
        }
    }

    fn halt(&mut self, phase: GamePhase) {
        self.clock.cancel();
        self.input.clear();
        self.presenter.set_start_visible(true);
        self.presenter.notify_terminal(phase, self.state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::platform::presenter::{Sprite, SpriteKind};
    use crate::sim::state::{Enemy, EnemyKind};
    use glam::Vec2;

    /// Presenter that remembers every call
    #[derive(Debug, Default)]
    struct Recorder {
        stats: Vec<(u32, u32)>,
        start_visible: Vec<bool>,
        terminal: Vec<(GamePhase, u32)>,
        last_scene: Vec<Sprite>,
    }

    impl Presenter for Recorder {
        fn set_stats(&mut self, score: u32, hit_points: u32) {
            self.stats.push((score, hit_points));
        }

        fn set_start_visible(&mut self, visible: bool) {
            self.start_visible.push(visible);
        }

        fn notify_terminal(&mut self, phase: GamePhase, score: u32) {
            self.terminal.push((phase, score));
        }

        fn render(&mut self, sprites: &[Sprite]) {
            self.last_scene = sprites.to_vec();
        }
    }

    fn new_game(settings: Settings) -> Game<Recorder> {
        let settings = Settings {
            seed: Some(11),
            ..settings
        };
        Game::new(settings, PlayArea::default(), Recorder::default())
    }

    fn grunt(id: u32, pos: Vec2) -> Enemy {
        Enemy {
            id,
            pos,
            size: Vec2::splat(GRUNT_SIZE),
            kind: EnemyKind::Grunt,
        }
    }

    #[test]
    fn test_fire_key_starts_without_shooting() {
        let mut game = new_game(Settings::default());
        game.key_down(Key::Fire, 0.0);
        assert!(game.is_running());
        assert!(game.state().bullets.is_empty());
        assert_eq!(game.presenter().start_visible.last(), Some(&false));
        assert_eq!(game.presenter().stats.last(), Some(&(0, START_HIT_POINTS)));
    }

    #[test]
    fn test_click_fires_once_running() {
        let mut game = new_game(Settings::default());
        game.fire_once(0.0);
        assert!(game.state().bullets.is_empty());
        game.fire_once(10.0);
        assert_eq!(game.state().bullets.len(), 1);
        // Throttled
        game.fire_once(100.0);
        assert_eq!(game.state().bullets.len(), 1);
    }

    #[test]
    fn test_pump_runs_fixed_steps_and_spawns() {
        let mut game = new_game(Settings::default());
        game.start(0.0);
        let mut now = 0.0;
        while now < 1500.0 {
            now += 1000.0 / 60.0;
            game.pump(now);
        }
        assert_eq!(game.state().spawn_counter, 1);
        assert_eq!(game.state().enemies.len(), 1);
        assert!(game.state().time_ticks >= 29);
        assert!(
            game.presenter()
                .last_scene
                .iter()
                .any(|s| s.kind == SpriteKind::Grunt)
        );
    }

    #[test]
    fn test_held_keys_move_player() {
        let mut game = new_game(Settings::default());
        game.start(0.0);
        let x0 = game.state().player.pos.x;
        game.key_down(Key::Right, 0.0);
        for n in 1..=10 {
            game.pump(n as f64 * 16.0);
        }
        assert!(game.state().player.pos.x > x0);
        game.key_up(Key::Right);
        assert!(!game.input.right);
    }

    #[test]
    fn test_pointer_gated_by_settings() {
        let mut game = new_game(Settings {
            mouse_control: false,
            ..Default::default()
        });
        game.start(0.0);
        let x0 = game.state().player.pos.x;
        game.pointer_moved(10.0);
        assert_eq!(game.state().player.pos.x, x0);

        let mut game = new_game(Settings::default());
        game.start(0.0);
        game.pointer_moved(10.0);
        assert_eq!(game.state().player.pos.x, 0.0);
    }

    #[test]
    fn test_terminal_phase_halts_and_notifies() {
        let mut game = new_game(Settings::default());
        game.start(0.0);
        let area = game.state().area;
        game.state.enemies.push(grunt(900, Vec2::new(0.0, area.height - 1.0)));
        game.pump(50.0);

        assert_eq!(game.state().phase, GamePhase::GameOver);
        assert!(!game.is_running());
        assert_eq!(game.presenter().terminal, vec![(GamePhase::GameOver, 0)]);
        assert_eq!(game.presenter().start_visible.last(), Some(&true));

        // Nothing moves after the halt
        let ticks = game.state().time_ticks;
        game.pump(5000.0);
        assert_eq!(game.state().time_ticks, ticks);
        assert_eq!(game.presenter().terminal.len(), 1);
    }

    #[test]
    fn test_restart_mid_session_resets_everything() {
        let mut game = new_game(Settings::default());
        game.start(0.0);
        for n in 1..=200 {
            game.key_down(Key::Fire, n as f64 * 50.0);
            game.pump(n as f64 * 50.0);
        }
        assert!(!game.state().enemies.is_empty() || !game.state().bullets.is_empty());

        let old_epoch = game.clock.epoch();
        let epoch = game.start(10_000.0);
        assert_ne!(epoch, old_epoch);
        let state = game.state();
        assert!(state.enemies.is_empty() && state.bullets.is_empty());
        assert!(state.enemy_bullets.is_empty());
        assert_eq!((state.score, state.hit_points, state.spawn_counter), (0, START_HIT_POINTS, 0));

        // The old schedule does not leak into the new one
        game.pump(10_040.0);
        assert_eq!(game.state().time_ticks, 0);
        game.pump(10_050.0);
        assert_eq!(game.state().time_ticks, 1);
    }

    #[test]
    fn test_fire_throttle_survives_restart() {
        let mut game = new_game(Settings::default());
        game.start(0.0);
        game.fire_once(1000.0);
        assert_eq!(game.state().bullets.len(), 1);

        game.start(1050.0);
        assert!(game.state().bullets.is_empty());
        game.fire_once(1100.0);
        assert!(game.state().bullets.is_empty());
        game.fire_once(1000.0 + SHOOT_COOLDOWN_MS);
        assert_eq!(game.state().bullets.len(), 1);
    }

    #[test]
    fn test_stop_returns_to_idle() {
        let mut game = new_game(Settings::default());
        game.start(0.0);
        game.stop();
        assert_eq!(game.state().phase, GamePhase::Idle);
        assert!(!game.is_running());
        game.pump(1000.0);
        assert_eq!(game.state().time_ticks, 0);
    }

    #[test]
    fn test_explosions_hidden_when_disabled() {
        let mut game = new_game(Settings {
            explosions: false,
            ..Default::default()
        });
        game.start(0.0);
        let player = game.state().player.rect();
        game.state.enemies.push(grunt(900, Vec2::new(player.left(), player.top() - 80.0)));
        game.fire_once(0.0);
        let mut now = 0.0;
        while game.state().score == 0 && now < 2000.0 {
            now += FIXED_TICK_MS;
            game.pump(now);
        }
        assert_eq!(game.state().score, POINT_GRUNT);
        assert!(!game.state().explosions.is_empty());
        assert!(
            game.presenter()
                .last_scene
                .iter()
                .all(|s| s.kind != SpriteKind::Explosion)
        );
    }
}
