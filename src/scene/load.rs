// load.rs - Scene graph from JSON
//
// Format is an object keyed by scene key, descriptor fields in camelCase:
//
//   { "grass": { "neighbors": { "right": "resort-outside" },
//                "obstacles": [ { "x": 0, "y": 0, "width": 520, "height": 369 } ] } }
//
// `key` and `texture` default to the map key.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::warn;

use super::{Obstacle, SceneDescriptor, SceneGraph, TriggerAction};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid scene json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scene graph is empty")]
    Empty,
    #[error("scene '{0}': characterScale must be > 0")]
    BadScale(String),
    #[error("scene '{scene}': obstacle {index} has a negative size")]
    NegativeSize { scene: String, index: usize },
}

impl SceneGraph {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let raw: BTreeMap<String, SceneDescriptor> = serde_json::from_str(json)?;
        let scenes = raw.into_iter().map(|(key, mut s)| {
            if s.key.is_empty() { s.key = key.clone(); }
            if s.texture.is_empty() { s.texture = key; }
            s
        });
        let graph = SceneGraph::new(scenes);
        graph.validate()?;
        Ok(graph)
    }

    /// Hard errors for malformed data; dangling scene references are only
    /// logged since transitions to them are no-ops
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.is_empty() {
            return Err(SceneError::Empty);
        }

        for key in self.keys() {
            let Some(s) = self.get(key) else { continue };
            if !(s.character_scale > 0.0) {
                return Err(SceneError::BadScale(key.to_string()));
            }
            let all = s.obstacles.iter().chain(&s.safe_obstacles);
            if let Some(index) = all.clone().position(|o| o.width < 0.0 || o.height < 0.0) {
                return Err(SceneError::NegativeSize { scene: key.to_string(), index });
            }

            let neighbors = [&s.neighbors.left, &s.neighbors.right, &s.neighbors.top, &s.neighbors.bottom];
            for n in neighbors.into_iter().flatten() {
                if !self.contains(n) {
                    warn!(scene = key, neighbor = %n, "neighbor scene does not exist");
                }
            }
            for target in all.filter_map(switch_target) {
                if !self.contains(target) {
                    warn!(scene = key, to = target, "trigger targets unknown scene");
                }
            }
        }
        Ok(())
    }
}

fn switch_target(o: &Obstacle) -> Option<&str> {
    match &o.event_trigger.as_ref()?.action {
        TriggerAction::SwitchScene { target_scene, .. } => Some(target_scene),
        TriggerAction::Dialog { .. } => None,
    }
}
