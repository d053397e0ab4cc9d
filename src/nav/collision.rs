// collision.rs - Feet-rectangle collision against scaled obstacles
//
// Only the bottom slice of the collision box ("feet") is tested, so the
// player can overlap the upper part of scenery while walking in front of it.
// Obstacles are grown by a fixed padding before testing; side detection uses
// the unpadded edges.

use crate::geom::{Point, Rect, Size};
use crate::scene::{EventTrigger, Obstacle, Side, TriggerAction};

/// Obstacle in viewport coordinates, rebuilt on scene switch and resize
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledObstacle {
    pub rect: Rect,
    pub trigger: Option<EventTrigger>,
}

impl ScaledObstacle {
    /// Action to run when hit on `side`
    pub fn trigger_on(&self, side: Side) -> Option<&TriggerAction> {
        self.trigger.as_ref().filter(|t| t.side == side).map(|t| &t.action)
    }
}

pub fn scale_obstacles(src: &[Obstacle], scale: f32) -> Vec<ScaledObstacle> {
    src.iter()
        .map(|o| ScaledObstacle { rect: o.rect().scaled(scale), trigger: o.event_trigger.clone() })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub index: usize,
    pub side: Side,
}

/// Collision queries for one player size against one obstacle list
pub struct Collider<'a> {
    pub obstacles: &'a [ScaledObstacle],
    pub size: Size,
    pub world: Size,
    pub feet_fraction: f32,
    pub padding: f32,
}

impl Collider<'_> {
    pub fn feet_at(&self, p: Point) -> Rect {
        let feet_h = self.size.height * self.feet_fraction;
        let bottom = p.y + self.size.height * 0.5;
        Rect::new(p.x - self.size.width * 0.5, bottom - feet_h, self.size.width, feet_h)
    }

    /// First obstacle in list order whose padded rect overlaps the feet
    pub fn hit_at(&self, p: Point) -> Option<Hit> {
        let feet = self.feet_at(p);
        self.obstacles.iter().enumerate().find_map(|(index, o)| {
            feet.overlaps(&o.rect.expanded(self.padding))
                .then(|| Hit { index, side: hit_side(&feet, &o.rect) })
        })
    }

    /// Colliding, or the collision box would leave the world
    fn blocked_at(&self, p: Point) -> bool {
        !Rect::centered(p, self.size).inside(self.world.width, self.world.height)
            || self.hit_at(p).is_some()
    }

    /// Step a stationary, overlapping player out of an obstacle.
    ///
    /// Tries the axis pointing furthest away from the obstacle centre, then
    /// the perpendicular axis, then every cardinal direction. Returns `None`
    /// when all candidates still collide.
    pub fn escape(&self, p: Point, from: Point, step: f32) -> Option<Point> {
        let dx = p.x - from.x;
        let dy = p.y - from.y;
        let push_x = Point::new(p.x + if dx > 0.0 { step } else { -step }, p.y);
        let push_y = Point::new(p.x, p.y + if dy > 0.0 { step } else { -step });
        let (first, second) = if dx.abs() > dy.abs() { (push_x, push_y) } else { (push_y, push_x) };

        let cardinals = [
            Point::new(p.x + step, p.y),
            Point::new(p.x - step, p.y),
            Point::new(p.x, p.y + step),
            Point::new(p.x, p.y - step),
        ];

        [first, second].into_iter()
            .chain(cardinals)
            .find(|c| !self.blocked_at(*c))
    }
}

/// Closest unpadded obstacle edge to the feet; ties go top, bottom, left, right
pub fn hit_side(feet: &Rect, obs: &Rect) -> Side {
    let candidates = [
        (Side::Top, (feet.bottom() - obs.top()).abs()),
        (Side::Bottom, (feet.top() - obs.bottom()).abs()),
        (Side::Left, (feet.right() - obs.left()).abs()),
        (Side::Right, (feet.left() - obs.right()).abs()),
    ];
    let mut best = candidates[0];
    for c in &candidates[1..] {
        if c.1 < best.1 {
            best = *c;
        }
    }
    best.0
}
