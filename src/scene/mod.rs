// scene/ - Static scene graph
//
// Each scene is plain data: background texture, obstacles in design
// coordinates, neighbors per screen edge, entry points and NPC placements.
// Nothing here has behavior beyond lookups; the navigation controller
// interprets it.
//
// - data.rs: built-in sample graph
// - load.rs: JSON loading + validation

mod data;
mod load;

pub use data::{builtin, START_SCENE};
pub use load::SceneError;

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Rect, Size};

/// Screen edge or obstacle side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Where the player enters a scene from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryDir {
    Start,
    FromLeft,
    FromRight,
    FromTop,
    FromBottom,
}

impl EntryDir {
    /// Entry used on the destination side when leaving through `edge`
    pub fn through(edge: Side) -> Self {
        match edge {
            Side::Right => EntryDir::FromLeft,
            Side::Left => EntryDir::FromRight,
            Side::Bottom => EntryDir::FromTop,
            Side::Top => EntryDir::FromBottom,
        }
    }
}

fn default_entry() -> EntryDir { EntryDir::FromTop }

/// What an event trigger does
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum TriggerAction {
    SwitchScene {
        #[serde(rename = "targetScene")]
        target_scene: String,
        #[serde(rename = "entryDir", default = "default_entry")]
        entry_dir: EntryDir,
    },
    Dialog {
        text: String,
    },
}

/// Trigger that fires when the player hits one specific side of an obstacle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventTrigger {
    pub side: Side,
    #[serde(flatten)]
    pub action: TriggerAction,
}

/// Obstacle rectangle in design coordinates
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(rename = "eventTrigger", default, skip_serializing_if = "Option::is_none")]
    pub event_trigger: Option<EventTrigger>,
}

impl Obstacle {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height, event_trigger: None }
    }

    pub fn with_trigger(mut self, side: Side, action: TriggerAction) -> Self {
        self.event_trigger = Some(EventTrigger { side, action });
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// One axis of an entry position, resolved against a world dimension
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Coord {
    /// Absolute pixels
    Fixed(f32),
    /// Fraction of the dimension, rounded to whole pixels
    Fraction(f32),
    /// Pixels back from the far edge
    FromEnd(f32),
}

impl Coord {
    pub fn resolve(self, dim: f32) -> f32 {
        match self {
            Coord::Fixed(v) => v,
            Coord::Fraction(f) => (dim * f).round(),
            Coord::FromEnd(v) => dim - v,
        }
    }
}

/// Entry point as a pure function of the world size
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryPosition {
    pub x: Coord,
    pub y: Coord,
}

impl EntryPosition {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    pub fn at(&self, w: f32, h: f32) -> Point {
        Point::new(self.x.resolve(w), self.y.resolve(h))
    }
}

/// Neighbor scene per edge; `None` means the edge is closed
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Neighbors {
    #[serde(default)]
    pub left: Option<String>,
    #[serde(default)]
    pub right: Option<String>,
    #[serde(default)]
    pub top: Option<String>,
    #[serde(default)]
    pub bottom: Option<String>,
}

impl Neighbors {
    pub fn get(&self, edge: Side) -> Option<&str> {
        match edge {
            Side::Left => self.left.as_deref(),
            Side::Right => self.right.as_deref(),
            Side::Top => self.top.as_deref(),
            Side::Bottom => self.bottom.as_deref(),
        }
    }
}

/// Source-texture crop in percent (0-100)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default = "full")]
    pub width: f32,
    #[serde(default = "full")]
    pub height: f32,
}

fn full() -> f32 { 100.0 }
fn one() -> f32 { 1.0 }

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NpcPlacement {
    pub key: String,
    pub x: f32,
    pub y: f32,
    #[serde(default = "one")]
    pub scale: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<Crop>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescriptor {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub texture: String,
    #[serde(default)]
    pub allowed_exits: Vec<Side>,
    #[serde(default)]
    pub neighbors: Neighbors,
    #[serde(default)]
    pub entry_positions: HashMap<EntryDir, EntryPosition>,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    /// Trigger-only zones: fire events, never block
    #[serde(default)]
    pub safe_obstacles: Vec<Obstacle>,
    #[serde(default = "one")]
    pub character_scale: f32,
    #[serde(default)]
    pub npcs: Vec<NpcPlacement>,
    /// World size override in design coordinates
    #[serde(default)]
    pub bounds: Option<Size>,
    #[serde(default)]
    pub entry_pad_x: Option<f32>,
    #[serde(default)]
    pub entry_pad_y: Option<f32>,
}

impl SceneDescriptor {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            texture: key.to_string(),
            allowed_exits: Vec::new(),
            neighbors: Neighbors::default(),
            entry_positions: HashMap::new(),
            obstacles: Vec::new(),
            safe_obstacles: Vec::new(),
            character_scale: 1.0,
            npcs: Vec::new(),
            bounds: None,
            entry_pad_x: None,
            entry_pad_y: None,
        }
    }

    pub fn neighbor(&self, edge: Side) -> Option<&str> {
        self.neighbors.get(edge)
    }
}

/// Immutable set of scenes keyed by scene key
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    scenes: BTreeMap<String, SceneDescriptor>,
}

impl SceneGraph {
    pub fn new(scenes: impl IntoIterator<Item = SceneDescriptor>) -> Self {
        Self {
            scenes: scenes.into_iter().map(|s| (s.key.clone(), s)).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SceneDescriptor> {
        self.scenes.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.scenes.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}
