// config.rs - Tuning constants, application state and startup options
//
// `Tuning` holds every gameplay constant with its shipped default.
// `AppState` replaces the engine-wide registry: it is built once at startup
// and handed to the controller.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geom::Size;
use crate::scene::{self, SceneError, SceneGraph};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tuning {
    /// Coordinate space obstacles are authored in
    pub design_width: f32,
    pub design_height: f32,

    /// Walk speed, px/s
    pub speed: f32,
    pub touch_speed_multiplier: f32,
    pub pointer_dead_zone: f32,

    pub exit_lock_ms: f64,
    pub edge_tolerance: f32,

    /// Player height at scale 1.0, design px
    pub base_character_height: f32,
    /// Collision box covers the widest squash frame
    pub collision_width_factor: f32,
    pub feet_fraction: f32,
    pub collision_padding: f32,
    pub push_step: f32,

    pub squash_x: f32,
    pub squash_y: f32,
    pub squash_lerp: f32,

    pub min_entry_pad_x: f32,
    pub min_entry_pad_y: f32,

    pub dialog_debounce_ms: f64,
    pub resize_epsilon: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            design_width: 1536.0,
            design_height: 1024.0,
            speed: 180.0,
            touch_speed_multiplier: 2.0,
            pointer_dead_zone: 10.0,
            exit_lock_ms: 800.0,
            edge_tolerance: 1.0,
            base_character_height: 240.0,
            collision_width_factor: 1.05,
            feet_fraction: 0.1,
            collision_padding: 5.0,
            push_step: 10.0,
            squash_x: 1.05,
            squash_y: 0.95,
            squash_lerp: 0.12,
            min_entry_pad_x: 48.0,
            min_entry_pad_y: 32.0,
            dialog_debounce_ms: 100.0,
            resize_epsilon: 0.001,
        }
    }
}

/// Process-wide settings chosen before play starts
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub selected_character: String,
    pub debug: bool,
    /// Source image sizes reported by the asset loader, by texture key
    pub sprite_sizes: HashMap<String, Size>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            selected_character: "boy1".into(),
            debug: false,
            sprite_sizes: HashMap::new(),
        }
    }
}

impl AppState {
    pub fn sprite_size(&self, key: &str) -> Option<Size> {
        self.sprite_sizes.get(key).copied().filter(|s| s.width > 0.0 && s.height > 0.0)
    }
}

#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("invalid options json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Scenes(#[from] SceneError),
    #[error("start scene '{0}' is not in the scene graph")]
    UnknownStart(String),
}

/// Startup options passed in from the page as JSON
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOptions {
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub debug: bool,
    /// `{ "boy1": [w, h], ... }`
    #[serde(default)]
    pub sprites: HashMap<String, (f32, f32)>,
    /// Replaces the built-in graph when present
    #[serde(default)]
    pub scenes: Option<serde_json::Value>,
    #[serde(default)]
    pub start_scene: Option<String>,
    #[serde(default)]
    pub tuning: Option<Tuning>,
}

/// Everything the controller needs, resolved from options
pub struct Setup {
    pub graph: SceneGraph,
    pub start: String,
    pub app: AppState,
    pub tuning: Tuning,
}

impl GameOptions {
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_setup(self) -> Result<Setup, OptionsError> {
        let graph = match self.scenes {
            Some(v) => SceneGraph::from_json(&v.to_string())?,
            None => scene::builtin(),
        };
        let start = self.start_scene.unwrap_or_else(|| scene::START_SCENE.to_string());
        if !graph.contains(&start) {
            return Err(OptionsError::UnknownStart(start));
        }

        let mut app = AppState { debug: self.debug, ..AppState::default() };
        if let Some(c) = self.character {
            app.selected_character = c;
        }
        app.sprite_sizes = self.sprites.into_iter()
            .map(|(k, (w, h))| (k, Size::new(w, h)))
            .collect();

        Ok(Setup { graph, start, app, tuning: self.tuning.unwrap_or_default() })
    }
}
