//! Per-category shape rasterizers
//!
//! Circles are filled analytically; every other category is a polygon in a
//! unit coordinate space, rotated and scaled into the cell, then filled with
//! an even-odd scanline pass.

use crate::layout::ShapeCategory;
use crate::rendering::RasterImage;

const SQUARE: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];

const TRIANGLE: [[f32; 2]; 3] = [[0.0, -1.0], [0.866, 0.5], [-0.866, 0.5]];

const DIAMOND: [[f32; 2]; 4] = [[0.0, -1.0], [1.0, 0.0], [0.0, 1.0], [-1.0, 0.0]];

// Plus sign with arm half-width 0.35, traced clockwise from the top-left arm.
const CROSS: [[f32; 2]; 12] = [
    [-0.35, -1.0],
    [0.35, -1.0],
    [0.35, -0.35],
    [1.0, -0.35],
    [1.0, 0.35],
    [0.35, 0.35],
    [0.35, 1.0],
    [-0.35, 1.0],
    [-0.35, 0.35],
    [-1.0, 0.35],
    [-1.0, -0.35],
    [-0.35, -0.35],
];

/// Draw one shape centered at `(cx, cy)` with half-extent `half` pixels.
pub(crate) fn draw(
    img: &mut RasterImage,
    category: ShapeCategory,
    cx: f32,
    cy: f32,
    half: f32,
    rotation: f32,
    rgb: [u8; 3],
) {
    let unit: &[[f32; 2]] = match category {
        ShapeCategory::Circle => {
            fill_circle(img, cx, cy, half, rgb);
            return;
        }
        ShapeCategory::Square => &SQUARE,
        ShapeCategory::Triangle => &TRIANGLE,
        ShapeCategory::Diamond => &DIAMOND,
        ShapeCategory::Cross => &CROSS,
    };

    let (sin, cos) = rotation.sin_cos();
    let pts: Vec<[f32; 2]> = unit
        .iter()
        .map(|[x, y]| {
            [
                cx + half * (x * cos - y * sin),
                cy + half * (x * sin + y * cos),
            ]
        })
        .collect();
    fill_polygon(img, &pts, rgb);
}

fn fill_circle(img: &mut RasterImage, cx: f32, cy: f32, radius: f32, rgb: [u8; 3]) {
    let r2 = radius * radius;
    let y0 = (cy - radius).floor() as i32;
    let y1 = (cy + radius).ceil() as i32;
    for y in y0..=y1 {
        let x0 = (cx - radius).floor() as i32;
        let x1 = (cx + radius).ceil() as i32;
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(x, y, rgb);
            }
        }
    }
}

/// Even-odd scanline fill. Samples each row at its pixel-center height so
/// vertices landing exactly on a scanline do not double-count.
fn fill_polygon(img: &mut RasterImage, pts: &[[f32; 2]], rgb: [u8; 3]) {
    let y0 = pts.iter().map(|p| p[1]).fold(f32::INFINITY, f32::min).floor() as i32;
    let y1 = pts.iter().map(|p| p[1]).fold(f32::NEG_INFINITY, f32::max).ceil() as i32;

    let mut xs: Vec<f32> = Vec::with_capacity(pts.len());
    for y in y0..=y1 {
        let sy = y as f32 + 0.5;
        xs.clear();
        for i in 0..pts.len() {
            let a = pts[i];
            let b = pts[(i + 1) % pts.len()];
            if (a[1] <= sy && b[1] > sy) || (b[1] <= sy && a[1] > sy) {
                let t = (sy - a[1]) / (b[1] - a[1]);
                xs.push(a[0] + t * (b[0] - a[0]));
            }
        }
        xs.sort_by(|p, q| p.total_cmp(q));
        for span in xs.chunks_exact(2) {
            for x in span[0].round() as i32..=span[1].round() as i32 {
                img.put_pixel(x, y, rgb);
            }
        }
    }
}
