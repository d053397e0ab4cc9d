// body.rs - Optional physics collaborator
//
// With a body attached, movement goes through its velocity and every
// positional correction zeroes it so the next step does not push back into
// what was just resolved. Without one the controller integrates by hand.

use crate::geom::Point;

pub trait Body {
    fn set_velocity(&mut self, v: Point);
    fn velocity(&self) -> Point;
    /// Advance `pos` by `dt` seconds
    fn step(&mut self, pos: Point, dt: f32) -> Point;

    fn stop(&mut self) {
        self.set_velocity(Point::default());
    }
}

/// Plain velocity body: no drag, no gravity
#[derive(Clone, Debug, Default)]
pub struct ArcadeBody {
    velocity: Point,
}

impl Body for ArcadeBody {
    fn set_velocity(&mut self, v: Point) {
        self.velocity = v;
    }

    fn velocity(&self) -> Point {
        self.velocity
    }

    fn step(&mut self, pos: Point, dt: f32) -> Point {
        Point::new(pos.x + self.velocity.x * dt, pos.y + self.velocity.y * dt)
    }
}
