// tests.rs - NavigationController scenarios against the built-in graph
//
// All scenarios run at design width (scale 1.0) with a 100x200 boy1 sprite:
// base display 120x240, collision 126x240 before the scene scale.

use super::*;
use crate::scene::{self, Obstacle};

const FRAME: f64 = 16.67;

fn app() -> AppState {
    let mut app = AppState::default();
    app.sprite_sizes.insert("boy1".into(), Size::new(100.0, 200.0));
    app.sprite_sizes.insert("flingo".into(), Size::new(200.0, 400.0));
    app
}

fn nav_in(graph: SceneGraph, start: &str) -> NavigationController {
    NavigationController::new(graph, start, app(), Tuning::default(), Size::new(1536.0, 864.0), 0.0)
        .unwrap()
}

fn builtin_nav() -> NavigationController {
    nav_in(scene::builtin(), "grass")
}

fn place(nav: &mut NavigationController, x: f32, y: f32) {
    nav.player.pos = Point::new(x, y);
    nav.player.prev = nav.player.pos;
}

fn held(keys: Keys) -> InputFrame {
    InputFrame { keys, ..InputFrame::default() }
}

fn left() -> Keys { Keys { left: true, ..Keys::default() } }
fn right() -> Keys { Keys { right: true, ..Keys::default() } }
fn up() -> Keys { Keys { up: true, ..Keys::default() } }
fn down() -> Keys { Keys { down: true, ..Keys::default() } }

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn switched(events: &[NavEvent]) -> Option<(&str, &str, EntryDir)> {
    events.iter().find_map(|e| match e {
        NavEvent::SceneSwitched { from, scene, entry } => Some((from.as_str(), scene.as_str(), *entry)),
        _ => None,
    })
}

#[test]
fn test_new_places_player_in_start_scene() {
    let nav = builtin_nav();
    assert_eq!(nav.scene(), "grass");
    assert_eq!(nav.world(), Size::new(1536.0, 1024.0));
    assert_eq!(nav.player().pos, Point::new(768.0, 552.0));
    assert_eq!(nav.player().display(), Size::new(120.0, 240.0));
    assert!(approx(nav.player().collision().width, 126.0));
    assert_eq!(nav.obstacles().len(), 5);
    assert!(nav.is_exit_locked(799.0));
    assert!(!nav.is_exit_locked(800.0));
}

#[test]
fn test_new_rejects_unknown_start() {
    let r = NavigationController::new(
        scene::builtin(), "moon", app(), Tuning::default(), Size::new(1536.0, 864.0), 0.0,
    );
    assert!(matches!(r, Err(NavError::UnknownStart(_))));
}

#[test]
fn test_edge_switch_and_exit_lock() {
    let mut nav = builtin_nav();
    place(&mut nav, 1470.0, 500.0);

    let ev = nav.tick(&held(right()), 1000.0, FRAME);
    assert_eq!(switched(&ev), Some(("grass", "resort-outside", EntryDir::FromLeft)));
    assert_eq!(nav.scene(), "resort-outside");
    assert_eq!(nav.player().display(), Size::new(72.0, 144.0));
    // (16, 512) pulled in so the 75.6px box stays inside
    assert!(approx(nav.player().pos.x, 37.8));
    assert_eq!(nav.player().pos.y, 512.0);
    assert_eq!(nav.exit_locked_until(), 1800.0);

    // left edge is already touched but the lock holds
    let ev = nav.tick(&held(left()), 1100.0, FRAME);
    assert!(ev.is_empty());
    assert_eq!(nav.scene(), "resort-outside");
    assert!(approx(nav.player().pos.x, 37.8));

    let ev = nav.tick(&held(left()), 1900.0, FRAME);
    assert_eq!(switched(&ev), Some(("resort-outside", "grass", EntryDir::FromRight)));
    // (1520, 563) clamped to the right wall
    assert!(approx(nav.player().pos.x, 1473.0));
    assert_eq!(nav.player().pos.y, 563.0);
}

#[test]
fn test_edge_without_neighbor_just_clamps() {
    let mut nav = builtin_nav();
    place(&mut nav, 64.0, 552.0);
    let ev = nav.tick(&held(left()), 1000.0, FRAME);
    assert!(ev.is_empty());
    assert_eq!(nav.scene(), "grass");
    assert!(approx(nav.player().collision_box().left(), 0.0));
}

#[test]
fn test_obstacle_trigger_switches_scene() {
    let mut nav = builtin_nav();
    assert!(nav.transition("resort-outside", EntryDir::Start, 0.0));
    nav.events.clear();
    place(&mut nav, 768.0, 428.4);
    assert!(nav.is_exit_locked(100.0));

    // feet top crosses the padded bottom of the door obstacle
    let ev = nav.tick(&held(up()), 100.0, FRAME);
    assert_eq!(switched(&ev), Some(("resort-outside", "resort-reception", EntryDir::FromTop)));
    assert_eq!(nav.player().display(), Size::new(180.0, 360.0));
    assert!(approx(nav.player().collision().width, 189.0));
    // (768, 1008) clamped to the floor
    assert_eq!(nav.player().pos, Point::new(768.0, 844.0));
    assert_eq!(nav.npcs().len(), 1);
}

#[test]
fn test_dialog_trigger_blocks_and_debounces() {
    let mut nav = builtin_nav();
    nav.transition("resort-reception", EntryDir::Start, 0.0);
    nav.events.clear();
    place(&mut nav, 768.0, 343.0);

    let ev = nav.tick(&held(up()), 5000.0, FRAME);
    assert_eq!(ev, vec![NavEvent::DialogOpened {
        text: "Hello! Welcome to the Flingo Resort reception!".into(),
    }]);
    assert_eq!(nav.player().pos, Point::new(768.0, 343.0));
    assert!(nav.dialog_layout().is_some());

    // walking into it again does not reopen
    let ev = nav.tick(&held(up()), 5016.0, FRAME);
    assert!(ev.is_empty());
    assert!(nav.dialog().is_open());

    let press = InputFrame { pressed: true, ..InputFrame::default() };
    assert!(nav.tick(&press, 5050.0, FRAME).is_empty());
    assert!(nav.dialog().is_open());
    assert_eq!(nav.tick(&press, 5200.0, FRAME), vec![NavEvent::DialogClosed]);
    assert!(nav.dialog_layout().is_none());
}

#[test]
fn test_moving_into_obstacle_reverts() {
    let mut nav = builtin_nav();
    place(&mut nav, 1085.0, 700.0);
    let ev = nav.tick(&held(right()), 1000.0, FRAME);
    assert!(ev.is_empty());
    assert_eq!(nav.player().pos, Point::new(1085.0, 700.0));
    assert_eq!(nav.last_hit(), Some(Rect::new(1154.0, 686.0, 382.0, 338.0)));
}

#[test]
fn test_moving_away_from_obstacle_is_allowed() {
    let mut nav = builtin_nav();
    // feet overlap the lower-right obstacle before and after the step
    place(&mut nav, 1092.0, 700.0);
    nav.tick(&held(left()), 1000.0, FRAME);
    assert!(approx(nav.player().pos.x, 1089.0));
}

#[test]
fn test_stationary_overlap_is_pushed_out() {
    let mut s = SceneDescriptor::new("bar");
    s.obstacles = vec![Obstacle::new(700.0, 640.0, 200.0, 8.0)];
    let mut nav = nav_in(SceneGraph::new([s]), "bar");
    place(&mut nav, 768.0, 554.0);

    nav.tick(&InputFrame::default(), 1000.0, FRAME);
    // up and sideways still overlap the bar; only the downward probe clears
    assert_eq!(nav.player().pos, Point::new(768.0, 564.0));
}

#[test]
fn test_safe_obstacle_triggers_without_blocking() {
    let mut s = SceneDescriptor::new("sign");
    s.safe_obstacles = vec![Obstacle::new(600.0, 700.0, 300.0, 100.0)
        .with_trigger(Side::Top, TriggerAction::Dialog { text: "keep off the grass".into() })];
    let mut nav = nav_in(SceneGraph::new([s]), "sign");
    place(&mut nav, 768.0, 575.0);

    let ev = nav.tick(&held(down()), 1000.0, 100.0);
    assert_eq!(ev, vec![NavEvent::DialogOpened { text: "keep off the grass".into() }]);
    assert!(approx(nav.player().pos.y, 593.0));
}

#[test]
fn test_transition_to_unknown_scene_is_noop() {
    let mut nav = builtin_nav();
    let before = nav.player().pos;
    assert!(!nav.transition("moon", EntryDir::FromLeft, 0.0));
    assert_eq!(nav.scene(), "grass");
    assert_eq!(nav.player().pos, before);
    assert!(nav.tick(&InputFrame::default(), 1000.0, FRAME).is_empty());
}

#[test]
fn test_edge_to_missing_neighbor_stays() {
    let mut s = SceneDescriptor::new("a");
    s.neighbors.right = Some("nowhere".into());
    let mut nav = nav_in(SceneGraph::new([s]), "a");
    place(&mut nav, 1470.0, 552.0);
    let ev = nav.tick(&held(right()), 1000.0, FRAME);
    assert!(ev.is_empty());
    assert_eq!(nav.scene(), "a");
}

#[test]
fn test_fallback_entry_from_edges() {
    let a = SceneDescriptor::new("a");
    let b = SceneDescriptor::new("b");
    let mut padded = SceneDescriptor::new("c");
    padded.entry_pad_x = Some(10.0);
    let mut nav = nav_in(SceneGraph::new([a, b, padded]), "a");

    nav.transition("b", EntryDir::FromLeft, 0.0);
    // pad max(60, 48) plus half the display width
    assert_eq!(nav.player().pos, Point::new(120.0, 552.0));

    nav.transition("c", EntryDir::FromLeft, 0.0);
    assert_eq!(nav.player().pos.x, 70.0);

    nav.transition("b", EntryDir::FromBottom, 0.0);
    assert_eq!(nav.player().pos.y, 1024.0 - 120.0 - 120.0);
}

#[test]
fn test_resize_rescales_world_and_player() {
    let mut nav = builtin_nav();
    nav.open_dialog("Welcome!", 0.0);
    assert!(nav.resize(768.0, 432.0));
    assert_eq!(nav.scale_factor(), 0.5);
    assert_eq!(nav.world(), Size::new(768.0, 512.0));
    assert_eq!(nav.player().display(), Size::new(60.0, 120.0));
    assert!(approx(nav.player().collision().width, 63.0));
    assert_eq!(nav.player().pos, Point::new(384.0, 276.0));
    assert_eq!(nav.obstacles()[3].rect, Rect::new(577.0, 343.0, 191.0, 169.0));
    assert_eq!(nav.scene(), "grass");
    assert_eq!(nav.exit_locked_until(), 800.0);
    assert_eq!(nav.dialog().text(), Some("Welcome!"));
    assert_eq!(nav.dialog_layout().map(|l| l.wrap_width), Some(576.0));

    // below the epsilon: viewport recorded, nothing rebuilt
    assert!(!nav.resize(768.5, 432.0));
    assert_eq!(nav.viewport(), Size::new(768.5, 432.0));
    assert_eq!(nav.scale_factor(), 0.5);
}

#[test]
fn test_resize_through_input_frame() {
    let mut nav = builtin_nav();
    let frame = InputFrame { resize: Some((768.0, 432.0)), ..InputFrame::default() };
    nav.tick(&frame, 1000.0, FRAME);
    assert_eq!(nav.world(), Size::new(768.0, 512.0));
}

#[test]
fn test_touch_moves_faster_than_keys() {
    let mut nav = builtin_nav();
    nav.tick(&held(right()), 1000.0, 100.0);
    assert!(approx(nav.player().pos.x, 786.0));

    let mut nav = builtin_nav();
    let touch = InputFrame {
        pointer: Pointer { x: 1200.0, y: 552.0, down: true },
        ..InputFrame::default()
    };
    nav.tick(&touch, 1000.0, 100.0);
    assert!(approx(nav.player().pos.x, 804.0));
    assert_eq!(nav.player().pos.y, 552.0);
}

#[test]
fn test_body_is_stopped_on_collision() {
    let mut nav = builtin_nav().with_body(Box::new(ArcadeBody::default()));
    nav.tick(&held(right()), 1000.0, FRAME);
    assert_eq!(nav.body_velocity(), Some(Point::new(180.0, 0.0)));

    place(&mut nav, 1085.0, 700.0);
    nav.tick(&held(right()), 1100.0, FRAME);
    assert_eq!(nav.player().pos.x, 1085.0);
    assert_eq!(nav.body_velocity(), Some(Point::default()));
}

#[test]
fn test_facing_and_squash() {
    let mut nav = builtin_nav();
    nav.tick(&held(left()), 1000.0, FRAME);
    assert!(nav.player().flip);
    assert!(nav.player().scale_x > 1.0);
    assert!(nav.player().scale_y < 1.0);

    nav.tick(&InputFrame::default(), 1016.0, FRAME);
    assert!(nav.player().flip);
}

#[test]
fn test_collision_box_stays_in_world() {
    let mut nav = builtin_nav();
    let pattern = [right(), up(), left(), down(), Keys { up: true, left: true, ..Keys::default() }];
    let mut now = 0.0;
    for i in 0..600 {
        now += 50.0;
        nav.tick(&held(pattern[(i / 40) % pattern.len()]), now, 50.0);
        let b = nav.player().collision_box();
        let w = nav.world();
        assert!(b.left() >= -1e-3 && b.top() >= -1e-3, "{b:?}");
        assert!(b.right() <= w.width + 1e-3 && b.bottom() <= w.height + 1e-3, "{b:?}");
    }
}

#[test]
fn test_missing_sprite_size_falls_back() {
    let nav = NavigationController::new(
        scene::builtin(), "grass", AppState::default(), Tuning::default(), Size::new(1536.0, 864.0), 0.0,
    )
    .unwrap();
    assert_eq!(nav.player().display(), Size::new(120.0, 240.0));
}

#[test]
fn test_debug_lines() {
    let nav = builtin_nav();
    assert!(nav.debug_lines().is_none());

    let mut app = app();
    app.debug = true;
    let nav = NavigationController::new(
        scene::builtin(), "grass", app, Tuning::default(), Size::new(1536.0, 864.0), 0.0,
    )
    .unwrap();
    let lines = nav.debug_lines().unwrap();
    assert_eq!(lines[0], "scene:grass");
    assert_eq!(lines[1], "pos:768,552");
}

#[test]
fn test_event_json_shape() {
    let ev = NavEvent::SceneSwitched {
        from: "grass".into(),
        scene: "resort-outside".into(),
        entry: EntryDir::FromLeft,
    };
    let v = serde_json::to_value(&ev).unwrap();
    assert_eq!(v["type"], "sceneSwitched");
    assert_eq!(v["scene"], "resort-outside");
    assert_eq!(v["entry"], "fromLeft");
    assert_eq!(serde_json::to_value(NavEvent::DialogClosed).unwrap()["type"], "dialogClosed");
}
