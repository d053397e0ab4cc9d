// player.rs - Player position, sizes and cosmetic squash
//
// The collision box is fixed per scene/viewport and independent of the
// animated display scale, so squash/stretch never changes what collides.

use crate::geom::{lerp, Point, Rect, Size};

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Sprite centre, viewport px
    pub pos: Point,
    /// Position at the start of the current tick
    pub prev: Point,

    /// Display size before the scene's character scale
    base: Size,
    scene_scale: f32,
    width_factor: f32,
    display: Size,
    collision: Size,

    /// Live squash/stretch multipliers and their target
    pub scale_x: f32,
    pub scale_y: f32,
    target_x: f32,
    target_y: f32,

    pub flip: bool,
}

impl Player {
    pub fn new(pos: Point, base: Size, scene_scale: f32, width_factor: f32) -> Self {
        let mut p = Self {
            pos,
            prev: pos,
            base,
            scene_scale,
            width_factor,
            display: Size::default(),
            collision: Size::default(),
            scale_x: 1.0,
            scale_y: 1.0,
            target_x: 1.0,
            target_y: 1.0,
            flip: false,
        };
        p.resize();
        p
    }

    pub fn display(&self) -> Size { self.display }
    pub fn collision(&self) -> Size { self.collision }
    pub fn scene_scale(&self) -> f32 { self.scene_scale }

    /// New base size after a viewport change
    pub fn set_base(&mut self, base: Size) {
        self.base = base;
        self.resize();
    }

    pub fn set_scene_scale(&mut self, s: f32) {
        self.scene_scale = s;
        self.resize();
    }

    // Display and collision sizes always change together
    fn resize(&mut self) {
        self.display = Size::new(
            (self.base.width * self.scene_scale).round(),
            (self.base.height * self.scene_scale).round(),
        );
        self.collision = Size::new(self.display.width * self.width_factor, self.display.height);
        self.scale_x = 1.0;
        self.scale_y = 1.0;
        self.target_x = 1.0;
        self.target_y = 1.0;
    }

    pub fn collision_box(&self) -> Rect {
        Rect::centered(self.pos, self.collision)
    }

    /// Animated sprite bounds
    pub fn display_box(&self) -> Rect {
        let s = Size::new(self.display.width * self.scale_x, self.display.height * self.scale_y);
        Rect::centered(self.pos, s)
    }

    /// Nearest centre that keeps the collision box inside `world`
    pub fn clamp_center(&self, p: Point, world: Size) -> Point {
        let hw = self.collision.width * 0.5;
        let hh = self.collision.height * 0.5;
        Point::new(
            p.x.min(world.width - hw).max(hw),
            p.y.min(world.height - hh).max(hh),
        )
    }

    pub fn face(&mut self, vx: f32) {
        if vx < 0.0 {
            self.flip = true;
        } else if vx > 0.0 {
            self.flip = false;
        }
    }

    /// One tick of squash/stretch easing
    pub fn animate(&mut self, moving: bool, squash: (f32, f32), t: f32) {
        (self.target_x, self.target_y) = if moving { squash } else { (1.0, 1.0) };
        self.scale_x = lerp(self.scale_x, self.target_x, t);
        self.scale_y = lerp(self.scale_y, self.target_y, t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(Point::new(100.0, 100.0), Size::new(120.0, 240.0), 1.0, 1.05)
    }

    #[test]
    fn test_sizes_follow_scene_scale() {
        let mut p = player();
        assert_eq!(p.display(), Size::new(120.0, 240.0));
        assert!((p.collision().width - 126.0).abs() < 1e-4);

        p.set_scene_scale(0.6);
        assert_eq!(p.display(), Size::new(72.0, 144.0));
        assert!((p.collision().width - 75.6).abs() < 1e-4);
        assert_eq!(p.collision().height, 144.0);
    }

    #[test]
    fn test_clamp_center() {
        let p = player();
        let world = Size::new(1000.0, 500.0);
        let c = p.clamp_center(Point::new(-50.0, 900.0), world);
        assert!((c.x - 63.0).abs() < 1e-4);
        assert_eq!(c.y, 380.0);
        let inside = Point::new(500.0, 250.0);
        assert_eq!(p.clamp_center(inside, world), inside);
    }

    #[test]
    fn test_squash_is_cosmetic() {
        let mut p = player();
        let before = p.collision_box();
        p.animate(true, (1.05, 0.95), 0.12);
        assert!((p.scale_x - 1.006).abs() < 1e-6);
        assert!((p.scale_y - 0.994).abs() < 1e-6);
        assert_eq!(p.collision_box(), before);
        assert!(p.display_box().width > 120.0);

        for _ in 0..200 { p.animate(false, (1.05, 0.95), 0.12); }
        assert!((p.scale_x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_facing_keeps_last_direction() {
        let mut p = player();
        p.face(-1.0);
        assert!(p.flip);
        p.face(0.0);
        assert!(p.flip);
        p.face(0.5);
        assert!(!p.flip);
    }
}
