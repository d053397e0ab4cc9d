// input.rs - Per-tick input sample and movement intent
//
// Engine callbacks (keys, pointer, resize) are folded into one InputFrame
// that the controller reads exactly once per tick.

use std::f32::consts::FRAC_1_SQRT_2;

use crate::geom::Point;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Keys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Keys {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Pointer in viewport coordinates; the camera never scrolls so these
/// are also world coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
    pub down: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputFrame {
    pub keys: Keys,
    pub pointer: Pointer,
    /// A key or pointer press happened since the last tick
    pub pressed: bool,
    /// Latest viewport size if a resize was reported since the last tick
    pub resize: Option<(f32, f32)>,
}

/// Direction of travel for this tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Intent {
    /// Unit length, or zero
    pub dir: Point,
    /// Pointer-driven movement runs faster than keyboard
    pub touch: bool,
}

impl Intent {
    pub fn is_moving(&self) -> bool {
        self.dir.x != 0.0 || self.dir.y != 0.0
    }
}

/// Keyboard wins; the pointer only steers when no direction key is held
pub fn intent(keys: &Keys, pointer: &Pointer, player: Point, dead_zone: f32) -> Intent {
    let mut vx = 0.0;
    let mut vy = 0.0;
    if keys.left { vx = -1.0; } else if keys.right { vx = 1.0; }
    if keys.up { vy = -1.0; } else if keys.down { vy = 1.0; }

    if vx != 0.0 && vy != 0.0 {
        vx *= FRAC_1_SQRT_2;
        vy *= FRAC_1_SQRT_2;
    }
    if vx != 0.0 || vy != 0.0 {
        return Intent { dir: Point::new(vx, vy), touch: false };
    }

    if pointer.down {
        let dx = pointer.x - player.x;
        let dy = pointer.y - player.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist > dead_zone {
            return Intent { dir: Point::new(dx / dist, dy / dist), touch: true };
        }
    }

    Intent::default()
}
