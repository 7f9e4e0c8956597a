//! Platform abstraction layer
//!
//! Handles the host side of the game:
//! - Input events (held keys, clicks, pointer)
//! - Presentation (sprites, labels, modal notifications)
//! - Driving the simulation clock from host timestamps

pub mod input;
pub mod presenter;
pub mod runner;

pub use input::{InputState, Key};
pub use presenter::{LogPresenter, PLAYER_SPRITE_ID, Presenter, Sprite, SpriteKind, build_scene};
pub use runner::Game;
