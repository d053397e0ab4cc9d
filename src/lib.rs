use wasm_bindgen::prelude::*;

// ============================================================================
// SCENE NAV - Top-down scene navigation with obstacle collision
// ============================================================================
//
// The page owns the canvas, textures and the frame loop. Each frame it feeds
// input into `Game`, calls `tick`, then reads the draw list out of wasm
// memory (see render.rs for the record layout).

pub mod config;
pub mod geom;
pub mod nav;
pub mod render;
pub mod scene;

use config::{GameOptions, Setup};
use geom::Size;
use nav::{InputFrame, NavError, NavEvent, NavigationController};
use render::Encoder;
use serde::Serialize;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Dir { Left, Right, Up, Down }

/// `KeyboardEvent.code` to movement direction
fn key_dir(code: &str) -> Option<Dir> {
    match code {
        "ArrowLeft" | "KeyA" => Some(Dir::Left),
        "ArrowRight" | "KeyD" => Some(Dir::Right),
        "ArrowUp" | "KeyW" => Some(Dir::Up),
        "ArrowDown" | "KeyS" => Some(Dir::Down),
        _ => None,
    }
}

#[wasm_bindgen]
pub struct Game {
    nav: NavigationController,
    input: InputFrame,
    draw: Encoder,
}

#[wasm_bindgen]
impl Game {
    /// `options` is a GameOptions JSON string; empty means defaults
    #[wasm_bindgen(constructor)]
    pub fn new(w: f32, h: f32, options: &str) -> Result<Game, JsError> {
        let setup = GameOptions::from_json(options)?.into_setup()?;
        Ok(Self::from_setup(setup, w, h)?)
    }

    pub fn key_down(&mut self, code: &str) {
        self.input.pressed = true;
        self.set_key(code, true);
    }

    pub fn key_up(&mut self, code: &str) {
        self.set_key(code, false);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.input.pointer.x = x;
        self.input.pointer.y = y;
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.pointer_move(x, y);
        self.input.pointer.down = true;
        self.input.pressed = true;
    }

    pub fn pointer_up(&mut self) {
        self.input.pointer.down = false;
    }

    /// Applied at the start of the next tick
    pub fn resize(&mut self, w: f32, h: f32) {
        self.input.resize = Some((w, h));
    }

    /// Advance one frame; returns the events as an array of plain objects
    pub fn tick(&mut self, now: f64, dt: f64) -> Result<JsValue, JsError> {
        let events = self.step(now, dt);
        to_js(&events)
    }

    /// NPC sprites in the current scene: key, pos, size, crop, dialog.
    /// Draw records only carry the boxes.
    pub fn npcs(&self) -> Result<JsValue, JsError> {
        to_js(self.nav.npcs())
    }

    /// Dialog box placement and wrap width, or null with no dialog open
    pub fn dialog_layout(&self) -> Result<JsValue, JsError> {
        to_js(&self.nav.dialog_layout())
    }

    pub fn draw_ptr(&self) -> *const f32 { self.draw.ptr() }
    pub fn draw_len(&self) -> usize { self.draw.len() }

    /// Copy of the draw list, for callers that don't read memory directly
    pub fn draw_list(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(self.draw.as_slice())
    }

    pub fn player_x(&self) -> f32 { self.nav.player().pos.x }
    pub fn player_y(&self) -> f32 { self.nav.player().pos.y }
    pub fn current_scene(&self) -> String { self.nav.scene().to_string() }

    /// Background texture key for the current scene
    pub fn current_texture(&self) -> String {
        self.nav.descriptor().map(|d| d.texture.clone()).unwrap_or_default()
    }

    pub fn dialog_text(&self) -> Option<String> {
        self.nav.dialog().text().map(str::to_string)
    }

    /// Newline-separated overlay text, only in debug mode
    pub fn debug_text(&self) -> Option<String> {
        self.nav.debug_lines().map(|l| l.join("\n"))
    }
}

impl Game {
    pub fn from_setup(setup: Setup, w: f32, h: f32) -> Result<Self, NavError> {
        let Setup { graph, start, app, tuning } = setup;
        let nav = NavigationController::new(graph, &start, app, tuning, Size::new(w, h), 0.0)?;
        let mut draw = Encoder::new();
        draw.encode(&nav);
        Ok(Self { nav, input: InputFrame::default(), draw })
    }

    pub fn nav(&self) -> &NavigationController { &self.nav }

    /// Run the controller on the buffered input and rebuild the draw list.
    /// Edge-triggered input (press, resize) is consumed.
    pub fn step(&mut self, now: f64, dt: f64) -> Vec<NavEvent> {
        let events = self.nav.tick(&self.input, now, dt);
        self.input.pressed = false;
        self.input.resize = None;
        self.draw.encode(&self.nav);
        events
    }

    fn set_key(&mut self, code: &str, held: bool) {
        let keys = &mut self.input.keys;
        match key_dir(code) {
            Some(Dir::Left) => keys.left = held,
            Some(Dir::Right) => keys.right = held,
            Some(Dir::Up) => keys.up = held,
            Some(Dir::Down) => keys.down = held,
            None => {}
        }
    }
}
