// render.rs - Encode navigation state to the draw list
//
// The page reads the list straight out of wasm memory as a Float32Array.
// One record per drawable, six floats each:
//
//   [tag, x, y, w, h, extra]
//
// x/y are the top-left corner in viewport px. Tags:
//   1 = player       (extra = 1 when flipped)
//   2 = npc          (w/h = 0 when the texture size is unknown; x/y is then the centre)
//   3 = obstacle     (debug only; extra = 1 for trigger-only zones)
//   4 = collision box (debug only)
//   5 = display box  (debug only)
//   6 = dialog box   (extra = font px)
// Records are written back to front.

use crate::geom::Rect;
use crate::nav::NavigationController;

pub const RECORD_LEN: usize = 6;

pub const TAG_PLAYER: f32 = 1.0;
pub const TAG_NPC: f32 = 2.0;
pub const TAG_OBSTACLE: f32 = 3.0;
pub const TAG_COLLISION: f32 = 4.0;
pub const TAG_DISPLAY: f32 = 5.0;
pub const TAG_DIALOG: f32 = 6.0;

#[derive(Default)]
pub struct Encoder {
    out: Vec<f32>,
}

impl Encoder {
    pub fn new() -> Self {
        Self { out: Vec::with_capacity(RECORD_LEN * 32) }
    }

    pub fn clear(&mut self) {
        self.out.clear();
    }

    pub fn ptr(&self) -> *const f32 {
        self.out.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.out
    }

    #[cfg(test)]
    pub fn records(&self) -> impl Iterator<Item = &[f32]> {
        self.out.chunks_exact(RECORD_LEN)
    }

    #[inline]
    fn put(&mut self, tag: f32, r: Rect, extra: f32) {
        self.out.extend_from_slice(&[tag, r.x, r.y, r.width, r.height, extra]);
    }

    /// Rebuild the list for the current frame
    pub fn encode(&mut self, nav: &NavigationController) {
        self.clear();
        let debug = nav.app().debug;
        if debug {
            self.encode_obstacles(nav);
        }
        self.encode_npcs(nav);
        self.encode_player(nav);
        if debug {
            self.put(TAG_COLLISION, nav.player().collision_box(), 0.0);
            self.put(TAG_DISPLAY, nav.player().display_box(), 0.0);
        }
        self.encode_dialog(nav);
    }

    fn encode_obstacles(&mut self, nav: &NavigationController) {
        for o in nav.obstacles() {
            self.put(TAG_OBSTACLE, o.rect, 0.0);
        }
        for o in nav.safe_obstacles() {
            self.put(TAG_OBSTACLE, o.rect, 1.0);
        }
    }

    fn encode_npcs(&mut self, nav: &NavigationController) {
        for n in nav.npcs() {
            let r = match n.size {
                Some(s) => Rect::centered(n.pos, s),
                None => Rect::new(n.pos.x, n.pos.y, 0.0, 0.0),
            };
            self.put(TAG_NPC, r, 0.0);
        }
    }

    fn encode_player(&mut self, nav: &NavigationController) {
        let p = nav.player();
        self.put(TAG_PLAYER, p.display_box(), if p.flip { 1.0 } else { 0.0 });
    }

    fn encode_dialog(&mut self, nav: &NavigationController) {
        let Some(l) = nav.dialog_layout() else { return };
        let r = Rect::new(l.center_x - l.width * 0.5, l.center_y - l.height * 0.5, l.width, l.height);
        self.put(TAG_DIALOG, r, l.font_px);
    }
}
