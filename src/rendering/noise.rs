//! Background clutter overlay
//!
//! Scattered single-pixel dots and short line segments drawn over the grid to
//! degrade naive template matching. Density is linear in the noise level and
//! the segment length is capped at half a cell so no shape is buried.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::layout::Layout;
use crate::rendering::RasterImage;

const OVERLAY_COLOR: [u8; 3] = [150, 150, 150];
const DOTS_PER_LEVEL: u32 = 220;

pub(crate) fn apply_overlay(img: &mut RasterImage, layout: &Layout) {
    if layout.noise_level == 0 {
        return;
    }
    let mut rng = StdRng::seed_from_u64(layout.overlay_seed);
    let level = layout.noise_level as u32;
    let side = img.width;

    for _ in 0..level * DOTS_PER_LEVEL {
        let x = rng.gen_range(0..side) as i32;
        let y = rng.gen_range(0..side) as i32;
        img.put_pixel(x, y, OVERLAY_COLOR);
    }

    let max_len = (layout.spec.cell_px / 2).max(4);
    for _ in 0..level * layout.spec.dimension {
        let x = rng.gen_range(0..side) as f32;
        let y = rng.gen_range(0..side) as f32;
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let len = rng.gen_range(3..=max_len);
        let (sin, cos) = angle.sin_cos();
        for step in 0..len {
            let px = (x + cos * step as f32).round() as i32;
            let py = (y + sin * step as f32).round() as i32;
            img.put_pixel(px, py, OVERLAY_COLOR);
        }
    }
}
