// npc.rs - NPC placement for the current scene and viewport

use serde::Serialize;
use tracing::debug;

use crate::geom::{Point, Rect, Size};
use crate::scene::{Crop, NpcPlacement};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NpcSprite {
    pub key: String,
    pub pos: Point,
    /// `None` when the texture size is unknown; draw at native size
    pub size: Option<Size>,
    /// Crop in source-texture pixels
    pub crop: Option<Rect>,
    pub dialog: Option<String>,
}

/// Display size for a sprite `character_height` tall, keeping the source aspect
pub fn base_size(src: Size, character_height: f32) -> Size {
    Size::new(src.width * character_height / src.height, character_height)
}

fn crop_px(c: &Crop, src: Size) -> Rect {
    Rect::new(
        (c.x / 100.0 * src.width).round(),
        (c.y / 100.0 * src.height).round(),
        (c.width / 100.0 * src.width).round(),
        (c.height / 100.0 * src.height).round(),
    )
}

/// Lay out `npcs` at `scale`. NPCs share the scene's character scale
/// with the player, then apply their own.
pub fn place(
    npcs: &[NpcPlacement],
    scale: f32,
    character_height: f32,
    character_scale: f32,
    sprite_size: impl Fn(&str) -> Option<Size>,
) -> Vec<NpcSprite> {
    npcs.iter()
        .filter(|n| !n.key.is_empty())
        .map(|n| {
            let src = sprite_size(&n.key);
            if src.is_none() {
                debug!(npc = %n.key, "no texture size, using native size");
            }
            let size = src.map(|s| {
                let b = base_size(s, character_height);
                let k = character_scale * n.scale;
                Size::new((b.width * k).round(), (b.height * k).round())
            });
            let crop = n.crop.as_ref().zip(src).map(|(c, s)| crop_px(c, s));
            NpcSprite {
                key: n.key.clone(),
                pos: Point::new(n.x * scale, n.y * scale),
                size,
                crop,
                dialog: n.dialog.clone(),
            }
        })
        .collect()
}
