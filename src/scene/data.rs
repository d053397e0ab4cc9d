// data.rs - Built-in scene graph
//
// Obstacles come from extract runs against the 1536x1024 masks.
// Entry positions receive the world size (scaled), so absolute values
// are only exact at design width.

use super::{
    Coord, Crop, EntryDir, EntryPosition, NpcPlacement, Obstacle, SceneDescriptor, SceneGraph,
    Side, TriggerAction,
};
use Coord::{Fixed, Fraction, FromEnd};

pub const START_SCENE: &str = "grass";

const RECEPTION_GREETING: &str = "Hello! Welcome to the Flingo Resort reception!";

fn entries(list: [(EntryDir, EntryPosition); 4]) -> std::collections::HashMap<EntryDir, EntryPosition> {
    list.into_iter().collect()
}

fn grass() -> SceneDescriptor {
    let mut s = SceneDescriptor::new("grass");
    s.allowed_exits = vec![Side::Right];
    s.neighbors.right = Some("resort-outside".into());
    s.entry_positions = entries([
        (EntryDir::FromLeft, EntryPosition::new(Fixed(16.0), Fraction(0.5))),
        (EntryDir::FromRight, EntryPosition::new(FromEnd(16.0), Fraction(0.55))),
        (EntryDir::FromTop, EntryPosition::new(Fraction(0.5), Fixed(16.0))),
        // under the third obstacle, coming back from the reception
        (EntryDir::FromBottom, EntryPosition::new(Fixed(768.0), Fixed(479.0 + 16.0))),
    ]);
    s.obstacles = vec![
        Obstacle::new(0.0, 0.0, 520.0, 369.0),
        Obstacle::new(523.0, 0.0, 366.0, 158.0),
        Obstacle::new(893.0, 0.0, 643.0, 395.0),
        Obstacle::new(1154.0, 686.0, 382.0, 338.0),
        Obstacle::new(0.0, 736.0, 293.0, 288.0),
    ];
    s
}

fn resort_outside() -> SceneDescriptor {
    let mut s = SceneDescriptor::new("resort-outside");
    s.allowed_exits = vec![Side::Left];
    s.neighbors.left = Some("grass".into());
    s.entry_positions = entries([
        (EntryDir::FromLeft, EntryPosition::new(Fixed(16.0), Fraction(0.5))),
        (EntryDir::FromRight, EntryPosition::new(FromEnd(16.0), Fraction(0.6))),
        (EntryDir::FromTop, EntryPosition::new(Fraction(0.5), Fixed(479.0))),
        (EntryDir::FromBottom, EntryPosition::new(Fraction(0.5), FromEnd(16.0))),
    ]);
    s.obstacles = vec![
        Obstacle::new(0.0, 0.0, 206.0, 464.0),
        Obstacle::new(215.0, 0.0, 475.0, 585.0),
        Obstacle::new(695.0, 0.0, 146.0, 479.0).with_trigger(
            Side::Bottom,
            TriggerAction::SwitchScene {
                target_scene: "resort-reception".into(),
                entry_dir: EntryDir::FromTop,
            },
        ),
        Obstacle::new(846.0, 0.0, 690.0, 586.0),
        Obstacle::new(1226.0, 696.0, 310.0, 269.0),
        Obstacle::new(0.0, 711.0, 493.0, 313.0),
    ];
    s.character_scale = 0.6;
    s
}

fn resort_reception() -> SceneDescriptor {
    let mut s = SceneDescriptor::new("resort-reception");
    s.allowed_exits = vec![Side::Bottom];
    s.neighbors.right = Some("resort-pool".into());
    s.neighbors.bottom = Some("resort-outside".into());
    s.entry_positions = entries([
        (EntryDir::FromLeft, EntryPosition::new(Fixed(16.0), Fraction(0.5))),
        (EntryDir::FromRight, EntryPosition::new(FromEnd(16.0), Fraction(0.55))),
        // arriving from resort-outside puts the player at the bottom
        (EntryDir::FromTop, EntryPosition::new(Fixed(768.0), FromEnd(16.0))),
        (EntryDir::FromBottom, EntryPosition::new(Fraction(0.5), FromEnd(16.0))),
    ]);
    s.obstacles = vec![
        Obstacle::new(0.0, 3.0, 1536.0, 477.0).with_trigger(
            Side::Bottom,
            TriggerAction::Dialog { text: RECEPTION_GREETING.into() },
        ),
        Obstacle::new(1029.0, 488.0, 507.0, 186.0),
        Obstacle::new(0.0, 494.0, 521.0, 530.0),
        Obstacle::new(1029.0, 783.0, 507.0, 241.0),
    ];
    s.character_scale = 1.5;
    s.npcs = vec![NpcPlacement {
        key: "flingo".into(),
        x: 768.0,
        y: 310.0,
        scale: 0.7,
        dialog: Some(RECEPTION_GREETING.into()),
        crop: Some(Crop { x: 0.0, y: 0.0, width: 100.0, height: 75.0 }),
    }];
    s
}

fn resort_pool() -> SceneDescriptor {
    let mut s = SceneDescriptor::new("resort-pool");
    s.allowed_exits = vec![Side::Left];
    s.neighbors.left = Some("resort-reception".into());
    s.entry_positions = entries([
        (EntryDir::FromLeft, EntryPosition::new(Fixed(16.0), Fraction(0.5))),
        (EntryDir::FromRight, EntryPosition::new(FromEnd(16.0), Fraction(0.6))),
        (EntryDir::FromTop, EntryPosition::new(Fraction(0.5), FromEnd(16.0))),
        (EntryDir::FromBottom, EntryPosition::new(Fraction(0.5), Fixed(16.0))),
    ]);
    s
}

/// The shipped four-scene resort graph
pub fn builtin() -> SceneGraph {
    SceneGraph::new([grass(), resort_outside(), resort_reception(), resort_pool()])
}
