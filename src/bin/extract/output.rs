// output.rs - Human-readable listing and scene JSON snippet
//
// The listing goes to stdout so it can be piped or copied; the trailing
// snippet pastes straight into a scene descriptor's JSON.

use std::io::{self, Write};

use scene_nav::scene::Obstacle;
use serde_json::json;

use crate::components::{BBox, Extraction};

pub struct Report<'a> {
    pub path: &'a str,
    pub scene: &'a str,
    pub source: (u32, u32),
    pub target: (u32, u32),
    pub blocking: &'a Extraction,
    pub trigger_only: &'a Extraction,
}

fn list(out: &mut impl Write, title: &str, boxes: &[BBox]) -> io::Result<()> {
    writeln!(out, "\n{} ({}):", title, boxes.len())?;
    for (i, b) in boxes.iter().enumerate() {
        writeln!(out, "[{}] x: {}, y: {}, width: {}, height: {}", i, b.x, b.y, b.width, b.height)?;
    }
    Ok(())
}

fn class(out: &mut impl Write, name: &str, ex: &Extraction) -> io::Result<()> {
    list(out, &format!("Raw {} rectangles from flood-fill", name), &ex.raw)?;
    list(out, &format!("Cleaned {} rectangles", name), &ex.cleaned)?;
    list(out, &format!("Final {} rectangles", name), &ex.cleaned)
}

pub fn obstacles(boxes: &[BBox]) -> Vec<Obstacle> {
    boxes.iter()
        .map(|b| Obstacle::new(b.x as f32, b.y as f32, b.width as f32, b.height as f32))
        .collect()
}

/// `{ "obstacles": [...], "safeObstacles": [...] }`
pub fn snippet(r: &Report) -> serde_json::Result<String> {
    let v = json!({
        "obstacles": obstacles(&r.blocking.cleaned),
        "safeObstacles": obstacles(&r.trigger_only.cleaned),
    });
    serde_json::to_string_pretty(&v)
}

pub fn write(out: &mut impl Write, r: &Report) -> io::Result<()> {
    let (sw, sh) = r.source;
    let (tw, th) = r.target;
    writeln!(out, "\nAnalyzing {} ({}x{})", r.path, sw, sh)?;
    writeln!(out, "Scene: {}, Game viewport: {}x{}", r.scene, tw, th)?;
    if r.source != r.target {
        writeln!(out, "Scaling from {}x{} to {}x{}...", sw, sh, tw, th)?;
    }

    class(out, "blocking", r.blocking)?;
    class(out, "trigger-only", r.trigger_only)?;

    writeln!(out, "\nFor the '{}' scene descriptor:\n", r.scene)?;
    writeln!(out, "{}", snippet(r)?)?;
    writeln!(out, "\n---")
}
