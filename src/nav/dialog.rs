// dialog.rs - Modal dialog state
//
// Opening is idempotent. A short debounce keeps the press that walked the
// player into a trigger from also dismissing the dialog.

use serde::Serialize;

use crate::geom::Size;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dialog {
    text: Option<String>,
    dismiss_after: f64,
}

impl Dialog {
    pub fn is_open(&self) -> bool {
        self.text.is_some()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns false if a dialog was already showing
    pub fn open(&mut self, text: &str, now: f64, debounce_ms: f64) -> bool {
        if self.is_open() {
            return false;
        }
        self.text = Some(text.to_string());
        self.dismiss_after = now + debounce_ms;
        true
    }

    pub fn close(&mut self) -> bool {
        self.text.take().is_some()
    }

    /// Close on a press once the debounce window has passed
    pub fn update(&mut self, pressed: bool, now: f64) -> bool {
        if pressed && self.is_open() && now >= self.dismiss_after {
            return self.close();
        }
        false
    }
}

/// Screen-space placement of the dialog box
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogLayout {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
    pub font_px: f32,
    pub wrap_width: f32,
}

impl DialogLayout {
    pub fn for_viewport(v: Size) -> Self {
        Self {
            center_x: v.width * 0.5,
            center_y: v.height * 0.75,
            width: v.width * 0.8,
            height: 200.0,
            font_px: (v.width * 0.04).round(),
            wrap_width: v.width * 0.75,
        }
    }
}
