//! Arcade Shooter entry point
//!
//! On the web this wires the DOM to the game driver and runs the frame loop.
//! Natively it plays a headless demo session with the autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, KeyboardEvent, MouseEvent};

    use arcade_shooter::Settings;
    use arcade_shooter::platform::{Game, Key, Presenter, Sprite, SpriteKind};
    use arcade_shooter::sim::{GamePhase, PlayArea};

    /// Renders sprites as absolutely positioned divs inside `#game-area`
    struct DomPresenter {
        document: Document,
        area: HtmlElement,
        sprites: HashMap<u32, (SpriteKind, HtmlElement)>,
    }

    impl DomPresenter {
        fn new(document: Document, area: HtmlElement) -> Self {
            Self {
                document,
                area,
                sprites: HashMap::new(),
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        /// Existing element for `sprite`, or a freshly attached one
        fn element_for(&mut self, sprite: &Sprite) -> Option<HtmlElement> {
            if let Some((kind, el)) = self.sprites.get_mut(&sprite.id) {
                // Ids restart with every session
                if *kind != sprite.kind {
                    *kind = sprite.kind;
                    el.set_class_name(sprite.kind.class_name());
                }
                return Some(el.clone());
            }
            let el: HtmlElement = self.document.create_element("div").ok()?.dyn_into().ok()?;
            el.set_class_name(sprite.kind.class_name());
            let _ = el.style().set_property("position", "absolute");
            self.area.append_child(&el).ok()?;
            self.sprites.insert(sprite.id, (sprite.kind, el.clone()));
            Some(el)
        }
    }

    impl Presenter for DomPresenter {
        fn set_stats(&mut self, score: u32, hit_points: u32) {
            self.set_text("score", &score.to_string());
            self.set_text("hit-points", &hit_points.to_string());
        }

        fn set_start_visible(&mut self, visible: bool) {
            let button = self
                .document
                .get_element_by_id("start-button")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(button) = button {
                let display = if visible { "block" } else { "none" };
                let _ = button.style().set_property("display", display);
            }
        }

        fn notify_terminal(&mut self, phase: GamePhase, score: u32) {
            let message = match phase {
                GamePhase::GameClear => format!("Game Clear! Score: {}", score),
                _ => format!("Game Over! Score: {}", score),
            };
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&message);
            }
        }

        fn render(&mut self, sprites: &[Sprite]) {
            let live: HashSet<u32> = sprites.iter().map(|s| s.id).collect();
            self.sprites.retain(|id, (_, el)| {
                let keep = live.contains(id);
                if !keep {
                    el.remove();
                }
                keep
            });

            for sprite in sprites {
                let Some(el) = self.element_for(sprite) else {
                    continue;
                };
                let style = el.style();
                let _ = style.set_property("left", &format!("{}px", sprite.rect.min.x));
                let _ = style.set_property("top", &format!("{}px", sprite.rect.min.y));
                let _ = style.set_property("width", &format!("{}px", sprite.rect.size.x));
                let _ = style.set_property("height", &format!("{}px", sprite.rect.size.y));
                let _ = style.set_property("filter", sprite.tint.unwrap_or("none"));
            }
        }
    }

    type SharedGame = Rc<RefCell<Game<DomPresenter>>>;

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Arcade Shooter starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document; nothing to run in");
            return;
        };
        let Some(area_el) = document
            .get_element_by_id("game-area")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            log::error!("Missing #game-area element");
            return;
        };

        let area = match (area_el.client_width(), area_el.client_height()) {
            (w, h) if w > 0 && h > 0 => PlayArea {
                width: w as f32,
                height: h as f32,
            },
            _ => {
                log::warn!("#game-area has no size, using default play area");
                PlayArea::default()
            }
        };

        let settings = Settings::load();
        let presenter = DomPresenter::new(document, area_el.clone());
        let game: SharedGame = Rc::new(RefCell::new(Game::new(settings, area, presenter)));

        log::info!("Play area {}x{}", area.width, area.height);

        setup_keyboard(game.clone());
        setup_pointer(&area_el, game.clone());
        setup_start_button(game.clone());

        request_animation_frame(game);

        log::info!("Arcade Shooter ready");
    }

    fn setup_keyboard(game: SharedGame) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_dom(&event.key()) else {
                    return;
                };
                event.prevent_default();
                game.borrow_mut().key_down(key, now_ms());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    game.borrow_mut().key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pointer(area_el: &HtmlElement, game: SharedGame) {
        // Mouse move - ship follows the pointer horizontally
        {
            let game = game.clone();
            let area_clone = area_el.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = area_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                game.borrow_mut().pointer_moved(x);
            });
            let _ = area_el
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click - one shot
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().fire_once(now_ms());
            });
            let _ = area_el
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(game: SharedGame) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.stop_propagation();
                game.borrow_mut().start(now_ms());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No #start-button; press Space to start");
        }
    }

    fn request_animation_frame(game: SharedGame) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: SharedGame, time: f64) {
        game.borrow_mut().pump(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Longest headless demo before giving up (simulated time)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_LIMIT_MS: f64 = 10.0 * 60.0 * 1000.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use arcade_shooter::Settings;
    use arcade_shooter::platform::{Game, LogPresenter};
    use arcade_shooter::sim::PlayArea;

    env_logger::init();
    log::info!("Arcade Shooter (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play in the browser");

    let settings = Settings {
        demo_mode: true,
        ..Settings::load()
    };
    let mut game = Game::new(settings, PlayArea::default(), LogPresenter::default());

    let frame_ms = 1000.0 / 60.0;
    let mut now = 0.0;
    game.start(now);
    while game.is_running() && now < DEMO_LIMIT_MS {
        now += frame_ms;
        game.pump(now);
    }

    let state = game.state();
    println!(
        "Demo finished: {:?} after {:.1}s, score {}, hit points {}, seed {}",
        state.phase,
        now / 1000.0,
        state.score,
        state.hit_points,
        state.seed
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
