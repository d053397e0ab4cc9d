// components.rs - Connected components and bounding boxes
//
// 4-connected BFS flood fill per color class. Components are reported as
// their bounding box; L-shaped regions come out as the enclosing rectangle.

use std::collections::VecDeque;

use crate::mask::{Class, Mask};

/// Speckle thresholds, in target-resolution pixels
pub const MIN_AREA: u64 = 500;
pub const MIN_HEIGHT: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BBox {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_noise(&self) -> bool {
        self.area() < MIN_AREA || self.height < MIN_HEIGHT
    }
}

/// One color class: every component, then the ones that survive filtering
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    pub raw: Vec<BBox>,
    pub cleaned: Vec<BBox>,
}

/// Reading order: top to bottom, then left to right
fn sort(boxes: &mut [BBox]) {
    boxes.sort_by_key(|b| (b.y, b.x));
}

/// Blocking first, then trigger-only over the pixels red did not claim
pub fn extract(mask: &Mask) -> (Extraction, Extraction) {
    let mut visited = vec![false; mask.width() as usize * mask.height() as usize];
    let red = extract_class(mask, Class::Blocking, &mut visited);
    let green = extract_class(mask, Class::TriggerOnly, &mut visited);
    (red, green)
}

fn extract_class(mask: &Mask, class: Class, visited: &mut [bool]) -> Extraction {
    let mut raw = components(mask, class, visited);
    sort(&mut raw);
    let cleaned = raw.iter().copied().filter(|b| !b.is_noise()).collect();
    Extraction { raw, cleaned }
}

pub fn components(mask: &Mask, class: Class, visited: &mut [bool]) -> Vec<BBox> {
    let w = mask.width();
    let mut out = Vec::new();
    for y in 0..mask.height() {
        for x in 0..w {
            let i = (y * w + x) as usize;
            if !visited[i] && mask.is(x, y, class) {
                out.push(flood(mask, class, visited, x, y));
            }
        }
    }
    out
}

fn flood(mask: &Mask, class: Class, visited: &mut [bool], sx: u32, sy: u32) -> BBox {
    let (w, h) = (mask.width(), mask.height());
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (sx, sx, sy, sy);

    let mut queue = VecDeque::new();
    visited[(sy * w + sx) as usize] = true;
    queue.push_back((sx, sy));

    while let Some((x, y)) = queue.pop_front() {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);

        let neighbors = [
            (x.checked_add(1).filter(|&nx| nx < w), Some(y)),
            (x.checked_sub(1), Some(y)),
            (Some(x), y.checked_add(1).filter(|&ny| ny < h)),
            (Some(x), y.checked_sub(1)),
        ];
        for (nx, ny) in neighbors {
            let (Some(nx), Some(ny)) = (nx, ny) else { continue };
            let i = (ny * w + nx) as usize;
            if !visited[i] && mask.is(nx, ny, class) {
                visited[i] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    BBox { x: min_x, y: min_y, width: max_x - min_x + 1, height: max_y - min_y + 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    const RED: Rgb<u8> = Rgb([237, 28, 35]);
    const GREEN: Rgb<u8> = Rgb([33, 176, 76]);

    fn paint(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, c: Rgb<u8>) {
        for py in y..y + h {
            for px in x..x + w {
                img.put_pixel(px, py, c);
            }
        }
    }

    fn mask(img: RgbImage) -> Mask {
        let (w, h) = img.dimensions();
        Mask::from_image(DynamicImage::ImageRgb8(img), w, h)
    }

    #[test]
    fn test_bbox_and_order() {
        let mut img = RgbImage::from_pixel(200, 100, Rgb([0, 0, 0]));
        paint(&mut img, 120, 10, 40, 40, RED);
        paint(&mut img, 10, 10, 50, 40, RED);
        paint(&mut img, 10, 5, 20, 1, RED);
        let (red, green) = extract(&mask(img));

        assert_eq!(red.raw.len(), 3);
        assert_eq!(red.raw[0], BBox { x: 10, y: 5, width: 20, height: 1 });
        assert_eq!(red.cleaned, vec![
            BBox { x: 10, y: 10, width: 50, height: 40 },
            BBox { x: 120, y: 10, width: 40, height: 40 },
        ]);
        assert!(green.raw.is_empty());
    }

    #[test]
    fn test_l_shape_is_one_box() {
        let mut img = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
        paint(&mut img, 10, 10, 10, 60, RED);
        paint(&mut img, 10, 60, 60, 10, RED);
        let (red, _) = extract(&mask(img));
        assert_eq!(red.cleaned, vec![BBox { x: 10, y: 10, width: 60, height: 60 }]);
    }

    #[test]
    fn test_diagonal_pixels_are_separate() {
        let mut img = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        img.put_pixel(2, 2, RED);
        img.put_pixel(3, 3, RED);
        let (red, _) = extract(&mask(img));
        assert_eq!(red.raw.len(), 2);
        assert!(red.cleaned.is_empty());
    }

    #[test]
    fn test_filter_invariant() {
        let mut img = RgbImage::from_pixel(300, 200, Rgb([255, 255, 255]));
        // wide but short: area 1000, height 10
        paint(&mut img, 0, 0, 100, 10, RED);
        // tall enough but area 400
        paint(&mut img, 150, 20, 10, 40, RED);
        // exactly on both thresholds
        paint(&mut img, 200, 100, 17, 30, GREEN);
        paint(&mut img, 10, 100, 80, 80, GREEN);
        let (red, green) = extract(&mask(img));

        assert_eq!(red.raw.len(), 2);
        assert!(red.cleaned.is_empty());
        assert_eq!(green.cleaned.len(), 2);
        for b in red.cleaned.iter().chain(&green.cleaned) {
            assert!(b.area() >= MIN_AREA && b.height >= MIN_HEIGHT, "{b:?}");
        }
    }

    #[test]
    fn test_rerun_is_identical() {
        let mut img = RgbImage::from_pixel(256, 256, Rgb([0, 0, 0]));
        paint(&mut img, 30, 40, 50, 60, RED);
        paint(&mut img, 100, 40, 50, 60, GREEN);
        paint(&mut img, 30, 150, 200, 40, RED);
        let m = mask(img);
        assert_eq!(extract(&m), extract(&m));
    }

    #[test]
    fn test_empty_mask() {
        let img = RgbImage::from_pixel(64, 64, Rgb([255, 255, 255]));
        let (red, green) = extract(&mask(img));
        assert_eq!(red, Extraction::default());
        assert_eq!(green, Extraction::default());
    }
}
