// nav/ - Scene navigation and collision
//
// NavigationController owns all mutable game state: current scene, player,
// the scaled obstacle cache, NPC layout, dialog and the exit lock. An
// external loop calls `tick` once per frame with the sampled input and the
// current time; everything else is derived inside the tick.
//
// Tick order:
//   resize -> dialog dismissal -> intent -> integrate -> clamp
//   -> collisions -> edge transitions (unless exit-locked) -> facing/squash

mod body;
mod collision;
mod dialog;
mod input;
mod npc;
mod player;

#[cfg(test)]
mod tests;

pub use body::{ArcadeBody, Body};
pub use collision::{hit_side, scale_obstacles, Collider, Hit, ScaledObstacle};
pub use dialog::{Dialog, DialogLayout};
pub use input::{intent, InputFrame, Intent, Keys, Pointer};
pub use npc::{base_size, NpcSprite};
pub use player::Player;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{AppState, Tuning};
use crate::geom::{Point, Rect, Size};
use crate::scene::{EntryDir, SceneDescriptor, SceneGraph, Side, TriggerAction};

/// Requests for the rendering / UI side
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NavEvent {
    SceneSwitched { from: String, scene: String, entry: EntryDir },
    DialogOpened { text: String },
    DialogClosed,
}

#[derive(Debug, Error)]
pub enum NavError {
    #[error("start scene '{0}' is not in the scene graph")]
    UnknownStart(String),
    #[error("viewport must have a positive width, got {0}")]
    BadViewport(f32),
}

pub struct NavigationController {
    graph: SceneGraph,
    app: AppState,
    tuning: Tuning,
    body: Option<Box<dyn Body>>,

    viewport: Size,
    scale: f32,
    world: Size,

    scene: String,
    obstacles: Vec<ScaledObstacle>,
    safe: Vec<ScaledObstacle>,
    npcs: Vec<NpcSprite>,

    player: Player,
    exit_locked_until: f64,
    dialog: Dialog,
    last_hit: Option<Rect>,

    events: Vec<NavEvent>,
}

impl NavigationController {
    /// Place the player in `start` for a `viewport`-sized canvas. `now` arms
    /// the initial exit lock.
    pub fn new(
        graph: SceneGraph,
        start: &str,
        app: AppState,
        tuning: Tuning,
        viewport: Size,
        now: f64,
    ) -> Result<Self, NavError> {
        if !(viewport.width > 0.0) {
            return Err(NavError::BadViewport(viewport.width));
        }
        let Some(cfg) = graph.get(start) else {
            return Err(NavError::UnknownStart(start.to_string()));
        };

        let scale = viewport.width / tuning.design_width;
        let world = world_size(cfg, &tuning, scale);
        let base = player_base(&app, &tuning, scale);
        let spawn = Point::new(world.width * 0.5, world.height * 0.5 + 40.0);
        let player = Player::new(spawn, base, cfg.character_scale, tuning.collision_width_factor);

        let mut nav = Self {
            graph,
            app,
            tuning,
            body: None,
            viewport,
            scale,
            world,
            scene: start.to_string(),
            obstacles: Vec::new(),
            safe: Vec::new(),
            npcs: Vec::new(),
            player,
            exit_locked_until: 0.0,
            dialog: Dialog::default(),
            last_hit: None,
            events: Vec::new(),
        };
        nav.transition(start, EntryDir::Start, now);
        // the initial placement is not a switch anyone needs to hear about
        nav.events.clear();
        Ok(nav)
    }

    /// Route movement through a physics body instead of manual integration
    pub fn with_body(mut self, body: Box<dyn Body>) -> Self {
        self.body = Some(body);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn scene(&self) -> &str { &self.scene }
    pub fn descriptor(&self) -> Option<&SceneDescriptor> { self.graph.get(&self.scene) }
    pub fn player(&self) -> &Player { &self.player }
    pub fn world(&self) -> Size { self.world }
    pub fn viewport(&self) -> Size { self.viewport }
    pub fn scale_factor(&self) -> f32 { self.scale }
    pub fn obstacles(&self) -> &[ScaledObstacle] { &self.obstacles }
    pub fn safe_obstacles(&self) -> &[ScaledObstacle] { &self.safe }
    pub fn npcs(&self) -> &[NpcSprite] { &self.npcs }
    pub fn dialog(&self) -> &Dialog { &self.dialog }
    pub fn app(&self) -> &AppState { &self.app }
    pub fn exit_locked_until(&self) -> f64 { self.exit_locked_until }
    pub fn last_hit(&self) -> Option<Rect> { self.last_hit }

    pub fn is_exit_locked(&self, now: f64) -> bool {
        now < self.exit_locked_until
    }

    pub fn dialog_layout(&self) -> Option<DialogLayout> {
        self.dialog.is_open().then(|| DialogLayout::for_viewport(self.viewport))
    }

    pub fn body_velocity(&self) -> Option<Point> {
        self.body.as_ref().map(|b| b.velocity())
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advance one frame. `now` and `dt_ms` come from the host's monotonic clock.
    pub fn tick(&mut self, input: &InputFrame, now: f64, dt_ms: f64) -> Vec<NavEvent> {
        if let Some((w, h)) = input.resize {
            self.resize(w, h);
        }
        if self.dialog.update(input.pressed, now) {
            self.events.push(NavEvent::DialogClosed);
        }

        self.player.prev = self.player.pos;

        let intent = input::intent(&input.keys, &input.pointer, self.player.pos, self.tuning.pointer_dead_zone);
        let speed = if intent.touch {
            self.tuning.speed * self.tuning.touch_speed_multiplier
        } else {
            self.tuning.speed
        };
        let vel = Point::new(intent.dir.x * speed, intent.dir.y * speed);
        let dt = (dt_ms / 1000.0) as f32;
        let pos = self.player.pos;
        self.player.pos = match self.body.as_mut() {
            Some(b) => {
                b.set_velocity(vel);
                b.step(pos, dt)
            }
            None => Point::new(pos.x + vel.x * dt, pos.y + vel.y * dt),
        };

        let clamped = self.player.clamp_center(self.player.pos, self.world);
        if clamped != self.player.pos {
            self.player.pos = clamped;
            self.stop_body();
        }

        self.resolve_collisions(now);

        if !self.is_exit_locked(now) {
            self.check_edges(now);
        }

        self.player.face(intent.dir.x);
        self.player.animate(
            intent.is_moving(),
            (self.tuning.squash_x, self.tuning.squash_y),
            self.tuning.squash_lerp,
        );

        std::mem::take(&mut self.events)
    }

    fn stop_body(&mut self) {
        if let Some(b) = self.body.as_mut() {
            b.stop();
        }
    }

    fn collider<'a>(&self, obstacles: &'a [ScaledObstacle]) -> Collider<'a> {
        Collider {
            obstacles,
            size: self.player.collision(),
            world: self.world,
            feet_fraction: self.tuning.feet_fraction,
            padding: self.tuning.collision_padding,
        }
    }

    // ========================================================================
    // Collision resolution
    // ========================================================================

    fn resolve_collisions(&mut self, now: f64) {
        if self.resolve_blocking(now) {
            return;
        }
        self.resolve_safe(now);
    }

    /// Returns true when a trigger switched scenes
    fn resolve_blocking(&mut self, now: f64) -> bool {
        let pos = self.player.pos;
        let Some(hit) = self.collider(&self.obstacles).hit_at(pos) else {
            return false;
        };
        let obs = self.obstacles[hit.index].clone();
        self.last_hit = Some(obs.rect);

        if let Some(action) = obs.trigger_on(hit.side) {
            if self.run_trigger(action, hit.side, now) {
                return true;
            }
        }

        let center = obs.rect.center();
        let prev = self.player.prev;
        let mv = Point::new(pos.x - prev.x, pos.y - prev.y);

        let corrected = if mv.x == 0.0 && mv.y == 0.0 {
            let escaped = self.collider(&self.obstacles).escape(pos, center, self.tuning.push_step);
            match escaped {
                Some(p) => {
                    debug!(from = ?pos, to = ?p, "pushed out of obstacle");
                    self.player.pos = p;
                    true
                }
                None => {
                    warn!(scene = %self.scene, pos = ?pos, "player stuck in obstacle");
                    false
                }
            }
        } else if mv.x * (center.x - pos.x) > 0.0 || mv.y * (center.y - pos.y) > 0.0 {
            debug!(side = ?hit.side, "blocked");
            self.player.pos = prev;
            true
        } else {
            debug!(side = ?hit.side, "moving away, allowed");
            false
        };

        if corrected {
            self.stop_body();
        }
        false
    }

    /// Trigger-only zones fire events and never block
    fn resolve_safe(&mut self, now: f64) {
        let Some(hit) = self.collider(&self.safe).hit_at(self.player.pos) else {
            return;
        };
        let obs = self.safe[hit.index].clone();
        if let Some(action) = obs.trigger_on(hit.side) {
            self.run_trigger(action, hit.side, now);
        }
    }

    /// Returns true when the trigger switched scenes
    fn run_trigger(&mut self, action: &TriggerAction, side: Side, now: f64) -> bool {
        match action {
            TriggerAction::SwitchScene { target_scene, entry_dir } => {
                if !self.graph.contains(target_scene) {
                    warn!(to = %target_scene, "trigger points at unknown scene");
                    return false;
                }
                info!(side = ?side, to = %target_scene, "obstacle trigger");
                self.transition(target_scene, *entry_dir, now)
            }
            TriggerAction::Dialog { text } => {
                self.open_dialog(text, now);
                false
            }
        }
    }

    pub fn open_dialog(&mut self, text: &str, now: f64) {
        if self.dialog.open(text, now, self.tuning.dialog_debounce_ms) {
            self.events.push(NavEvent::DialogOpened { text: text.to_string() });
        }
    }

    pub fn close_dialog(&mut self) {
        if self.dialog.close() {
            self.events.push(NavEvent::DialogClosed);
        }
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Right, left, bottom, top; the first crossed edge with a neighbor wins
    fn check_edges(&mut self, now: f64) {
        let b = self.player.collision_box();
        let tol = self.tuning.edge_tolerance;
        let crossed = [
            (Side::Right, b.right() >= self.world.width - tol),
            (Side::Left, b.left() <= tol),
            (Side::Bottom, b.bottom() >= self.world.height - tol),
            (Side::Top, b.top() <= tol),
        ];

        let Some(cfg) = self.graph.get(&self.scene) else { return };
        let dest = crossed.into_iter()
            .filter(|(_, hit)| *hit)
            .find_map(|(edge, _)| cfg.neighbor(edge).map(|d| (edge, d.to_string())));

        if let Some((edge, dest)) = dest {
            info!(edge = ?edge, box_ = ?b, "edge crossed");
            self.transition(&dest, EntryDir::through(edge), now);
        }
    }

    /// Switch to `key`, placing the player by `entry`. Unknown keys are a
    /// logged no-op. Returns whether the switch happened.
    pub fn transition(&mut self, key: &str, entry: EntryDir, now: f64) -> bool {
        let Some(cfg) = self.graph.get(key) else {
            warn!(scene = key, "transition to unknown scene ignored");
            return false;
        };

        let from = std::mem::replace(&mut self.scene, key.to_string());
        self.world = world_size(cfg, &self.tuning, self.scale);
        self.obstacles = scale_obstacles(&cfg.obstacles, self.scale);
        self.safe = scale_obstacles(&cfg.safe_obstacles, self.scale);

        if self.player.scene_scale() != cfg.character_scale {
            self.player.set_scene_scale(cfg.character_scale);
        }

        let intended = match cfg.entry_positions.get(&entry) {
            Some(p) => p.at(self.world.width, self.world.height),
            None => self.fallback_entry(cfg, entry),
        };
        self.player.pos = self.player.clamp_center(intended, self.world);
        self.player.prev = self.player.pos;

        self.npcs = npc::place(
            &cfg.npcs,
            self.scale,
            self.tuning.base_character_height * self.scale,
            cfg.character_scale,
            |k| self.app.sprite_size(k),
        );

        self.exit_locked_until = now + self.tuning.exit_lock_ms;
        self.last_hit = None;

        info!(from = %from, to = key, entry = ?entry, pos = ?self.player.pos, "scene switch");
        self.events.push(NavEvent::SceneSwitched { from, scene: key.to_string(), entry });
        true
    }

    /// Edge-relative spawn when the scene has no entry position for `entry`
    fn fallback_entry(&self, cfg: &SceneDescriptor, entry: EntryDir) -> Point {
        let d = self.player.display();
        let pad_x = cfg.entry_pad_x
            .map(|p| p * self.scale)
            .unwrap_or_else(|| (d.width * 0.5).round().max(self.tuning.min_entry_pad_x));
        let pad_y = cfg.entry_pad_y
            .map(|p| p * self.scale)
            .unwrap_or_else(|| (d.height * 0.5).round().max(self.tuning.min_entry_pad_y));

        let mut p = self.player.pos;
        match entry {
            EntryDir::FromLeft => p.x = pad_x + d.width * 0.5,
            EntryDir::FromRight => p.x = self.world.width - pad_x - d.width * 0.5,
            EntryDir::FromTop => p.y = pad_y + d.height * 0.5,
            EntryDir::FromBottom => p.y = self.world.height - pad_y - d.height * 0.5,
            EntryDir::Start => {}
        }
        p
    }

    // ========================================================================
    // Resize
    // ========================================================================

    /// Rescale everything to a new viewport. Scene, exit lock and dialog
    /// state are kept; the player keeps its relative world position.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !(width > 0.0) {
            warn!(width, height, "ignoring resize to empty viewport");
            return false;
        }
        self.viewport = Size::new(width, height);

        let scale = width / self.tuning.design_width;
        if (scale - self.scale).abs() <= self.tuning.resize_epsilon {
            return false;
        }
        let Some(cfg) = self.graph.get(&self.scene) else { return false };

        let ratio = scale / self.scale;
        self.scale = scale;
        self.world = world_size(cfg, &self.tuning, scale);
        self.obstacles = scale_obstacles(&cfg.obstacles, scale);
        self.safe = scale_obstacles(&cfg.safe_obstacles, scale);

        self.player.set_base(player_base(&self.app, &self.tuning, scale));
        let p = self.player.pos;
        self.player.pos = self.player.clamp_center(Point::new(p.x * ratio, p.y * ratio), self.world);
        self.player.prev = self.player.pos;

        self.npcs = npc::place(
            &cfg.npcs,
            scale,
            self.tuning.base_character_height * scale,
            cfg.character_scale,
            |k| self.app.sprite_size(k),
        );
        self.last_hit = self.last_hit.map(|r| r.scaled(ratio));

        info!(width, height, scale, "resized");
        true
    }

    // ========================================================================
    // Debug
    // ========================================================================

    /// Overlay text; `None` unless the debug flag is set
    pub fn debug_lines(&self) -> Option<Vec<String>> {
        if !self.app.debug {
            return None;
        }
        let c = self.player.collision_box();
        let d = self.player.display_box();
        let mut lines = vec![
            format!("scene:{}", self.scene),
            format!("pos:{},{}", self.player.pos.x.round(), self.player.pos.y.round()),
            format!(
                "collisionBox:{},{}-{},{}",
                c.left().round(), c.top().round(), c.right().round(), c.bottom().round()
            ),
            format!(
                "displayBox:{},{}-{},{}",
                d.left().round(), d.top().round(), d.right().round(), d.bottom().round()
            ),
        ];
        if let Some(h) = self.last_hit {
            lines.push(format!("hitObstacle:{},{}", h.x.round(), h.y.round()));
            lines.push(format!("obstacleSize:{}x{}", h.width.round(), h.height.round()));
        }
        Some(lines)
    }
}

fn world_size(cfg: &SceneDescriptor, t: &Tuning, scale: f32) -> Size {
    let b = cfg.bounds.unwrap_or(Size::new(t.design_width, t.design_height));
    Size::new(b.width * scale, b.height * scale)
}

fn player_base(app: &AppState, t: &Tuning, scale: f32) -> Size {
    let h = t.base_character_height * scale;
    match app.sprite_size(&app.selected_character) {
        Some(src) => base_size(src, h),
        None => {
            warn!(character = %app.selected_character, "no sprite size, assuming 1:2");
            Size::new(h * 0.5, h)
        }
    }
}
