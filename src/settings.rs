//! Game settings
//!
//! Read once at startup and never written back. On the web the host page
//! may embed a JSON blob in a `#game-settings` element; natively the file
//! named by `ARCADE_SHOOTER_SETTINGS` is read. Anything missing or malformed
//! falls back to the defaults.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed session seed; a fresh random seed per session when unset
    pub seed: Option<u64>,

    // === Visual Effects ===
    /// Explosion markers on hits and kills
    pub explosions: bool,
    /// Damage tint on bosses
    pub damage_tint: bool,

    // === Input ===
    /// Ship follows the pointer horizontally
    pub mouse_control: bool,
    /// Autopilot flies the ship (attract/demo mode)
    pub demo_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            // Visual effects - all on by default
            explosions: true,
            damage_tint: true,

            mouse_control: true,
            demo_mode: false,
        }
    }
}

impl Settings {
    /// DOM element holding the settings JSON
    pub const ELEMENT_ID: &'static str = "game-settings";

    /// Environment variable naming the settings file
    pub const ENV_VAR: &'static str = "ARCADE_SHOOTER_SETTINGS";

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse, or warn and fall back to the defaults
    fn parse_or_default(json: &str, source: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", source);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings in {}: {}", source, e);
                Self::default()
            }
        }
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => {
                Self::parse_or_default(&json, &format!("#{}", Self::ELEMENT_ID))
            }
            _ => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from the file named by the environment (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::parse_or_default(&json, &path),
            Err(e) => {
                log::warn!("Could not read settings file {}: {}", path, e);
                Self::default()
            }
        }
    }
}
