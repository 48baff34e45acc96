//! Layout planning: grid dimensions, target selection, decoy placement, jitter
//!
//! The planner produces an abstract [`Layout`] that the renderer turns into
//! pixels. All randomness is drawn from the caller-supplied rng so that a
//! planned layout is reproducible in tests.

use rand::rngs::StdRng;
use rand::{seq::index, Rng};

use crate::error::{Error, Result};
use crate::rendering::PALETTE;

/// Smallest supported grid side length
pub const MIN_DIMENSION: u32 = 2;
/// Largest supported grid side length
pub const MAX_DIMENSION: u32 = 32;
/// Largest supported noise level
pub const MAX_NOISE_LEVEL: u8 = 5;

/// Nominal canvas side length in pixels. The rendered image is
/// `cell_px * dimension` per side, which rounds this down so every cell is the
/// same integer size.
pub const CANVAS_SIZE: u32 = 480;

/// Half-extent of a shape at scale 1.0, as a fraction of the cell size. Sized
/// so that the worst case (maximum scale jitter, a rotated square's corner
/// reach of sqrt(2), maximum position offset) stays inside the cell.
pub(crate) const SHAPE_HALF_FRACTION: f32 = 0.2;

/// The closed set of shape categories a challenge can ask about.
///
/// The answer string of every challenge is the [`name`](Self::name) of one of
/// these variants, which makes the "answer is always a member of this set"
/// invariant hold by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeCategory {
    Square,
    Circle,
    Triangle,
    Cross,
    Diamond,
}

impl ShapeCategory {
    /// Every category, in a fixed order
    pub const ALL: [ShapeCategory; 5] = [
        ShapeCategory::Square,
        ShapeCategory::Circle,
        ShapeCategory::Triangle,
        ShapeCategory::Cross,
        ShapeCategory::Diamond,
    ];

    /// Canonical name used as the challenge answer
    pub fn name(self) -> &'static str {
        match self {
            ShapeCategory::Square => "square",
            ShapeCategory::Circle => "circle",
            ShapeCategory::Triangle => "triangle",
            ShapeCategory::Cross => "cross",
            ShapeCategory::Diamond => "diamond",
        }
    }
}

impl std::fmt::Display for ShapeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Validated grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    /// Cells per side
    pub dimension: u32,
    /// Side length of one cell in pixels
    pub cell_px: u32,
}

impl GridSpec {
    pub fn new(dimension: u32) -> Result<Self> {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&dimension) {
            return Err(Error::InvalidParameter(format!(
                "grid dimension {} outside supported range {}..={}",
                dimension, MIN_DIMENSION, MAX_DIMENSION
            )));
        }
        Ok(Self {
            dimension,
            cell_px: CANVAS_SIZE / dimension,
        })
    }
}

/// Per-cell render-time perturbation, sampled at plan time.
///
/// All magnitudes scale linearly with the noise level and are zero at noise 0.
#[derive(Debug, Clone, Copy)]
pub struct Jitter {
    /// Position offset in pixels, per axis
    pub dx: f32,
    pub dy: f32,
    /// Multiplier on the base shape size
    pub scale: f32,
    /// Rotation in radians (ignored by circles)
    pub rotation: f32,
    /// Per-channel offset applied to the palette color
    pub color_shift: [i16; 3],
}

impl Jitter {
    pub fn none() -> Self {
        Self {
            dx: 0.0,
            dy: 0.0,
            scale: 1.0,
            rotation: 0.0,
            color_shift: [0; 3],
        }
    }

    /// Maximum per-axis position offset in pixels for a given noise level
    pub(crate) fn max_offset(noise_level: u8, cell_px: u32) -> f32 {
        0.03 * noise_level as f32 * cell_px as f32
    }

    fn sample(rng: &mut StdRng, noise_level: u8, cell_px: u32) -> Self {
        if noise_level == 0 {
            return Self::none();
        }
        let n = noise_level as f32;
        let max_offset = Self::max_offset(noise_level, cell_px);
        let max_scale = 0.04 * n;
        let max_rot = 0.09 * n;
        let max_shift = 8 * noise_level as i16;
        Self {
            dx: rng.gen_range(-max_offset..=max_offset),
            dy: rng.gen_range(-max_offset..=max_offset),
            scale: 1.0 + rng.gen_range(-max_scale..=max_scale),
            rotation: rng.gen_range(-max_rot..=max_rot),
            color_shift: [
                rng.gen_range(-max_shift..=max_shift),
                rng.gen_range(-max_shift..=max_shift),
                rng.gen_range(-max_shift..=max_shift),
            ],
        }
    }
}

/// One grid cell
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    /// The shape drawn in this cell, if any
    pub occupant: Option<ShapeCategory>,
    /// Index into the shared palette
    pub color_index: usize,
    pub jitter: Jitter,
}

/// The abstract challenge layout produced by [`plan`]
#[derive(Debug, Clone)]
pub struct Layout {
    pub spec: GridSpec,
    pub noise_level: u8,
    /// Row-major, `dimension * dimension` entries
    pub cells: Vec<Cell>,
    /// The category the answer names
    pub target: ShapeCategory,
    /// Number of cells holding the target category, always >= 1
    pub target_count: usize,
    /// Seed for the renderer's background overlay, making `render`
    /// deterministic for a given layout
    pub overlay_seed: u64,
}

impl Layout {
    /// The ground-truth answer for this challenge
    pub fn answer(&self) -> &'static str {
        self.target.name()
    }

    pub fn cell(&self, row: u32, col: u32) -> &Cell {
        &self.cells[(row * self.spec.dimension + col) as usize]
    }

    /// Number of occupied non-target cells
    pub fn decoy_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.occupant.is_some_and(|s| s != self.target))
            .count()
    }
}

/// Per-cell probability of placing a decoy shape at a given noise level.
/// Linear in the noise level: 0.0 at noise 0, 0.75 at the maximum.
pub(crate) fn decoy_probability(noise_level: u8) -> f64 {
    0.15 * noise_level as f64
}

/// Plan a challenge layout.
///
/// Picks a target category uniformly, places between 1 and 3 target cells
/// (exactly 1 at noise 0), and fills some of the remaining cells with decoys
/// at a rate that grows with `noise_level`. No cell other than a designated
/// target cell ever receives the target category, so the rendered grid has an
/// unambiguous answer.
pub fn plan(dimension: u32, noise_level: u8, rng: &mut StdRng) -> Result<Layout> {
    let spec = GridSpec::new(dimension)?;
    if noise_level > MAX_NOISE_LEVEL {
        return Err(Error::InvalidParameter(format!(
            "noise level {} outside supported range 0..={}",
            noise_level, MAX_NOISE_LEVEL
        )));
    }

    let target = ShapeCategory::ALL[rng.gen_range(0..ShapeCategory::ALL.len())];
    let decoys: Vec<ShapeCategory> = ShapeCategory::ALL
        .into_iter()
        .filter(|s| *s != target)
        .collect();

    let total = (dimension * dimension) as usize;
    // 1..=3 target cells, scaling with noise, always leaving at least one
    // non-target cell so decoy placement stays meaningful at dimension 2.
    let extra = 2usize.min(noise_level as usize);
    let target_count = (1 + rng.gen_range(0..=extra)).min(total - 1);
    let target_cells: Vec<usize> = index::sample(rng, total, target_count).into_vec();

    let decoy_p = decoy_probability(noise_level);
    let mut cells = Vec::with_capacity(total);
    for idx in 0..total {
        let occupant = if target_cells.contains(&idx) {
            Some(target)
        } else if decoy_p > 0.0 && rng.gen_bool(decoy_p) {
            Some(decoys[rng.gen_range(0..decoys.len())])
        } else {
            None
        };
        cells.push(Cell {
            row: idx as u32 / dimension,
            col: idx as u32 % dimension,
            occupant,
            color_index: rng.gen_range(0..PALETTE.len()),
            jitter: Jitter::sample(rng, noise_level, spec.cell_px),
        });
    }

    Ok(Layout {
        spec,
        noise_level,
        cells,
        target,
        target_count,
        overlay_seed: rng.gen(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn rejects_out_of_range_dimension() {
        for dim in [0, 1, 33, 1000] {
            let err = plan(dim, 3, &mut rng(1)).unwrap_err();
            assert!(matches!(err, Error::InvalidParameter(_)), "dim {dim}: {err:?}");
        }
    }

    #[test]
    fn rejects_out_of_range_noise() {
        let err = plan(6, MAX_NOISE_LEVEL + 1, &mut rng(1)).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn noise_zero_places_exactly_one_target_and_no_decoys() {
        for seed in 0..20 {
            let layout = plan(4, 0, &mut rng(seed)).unwrap();
            assert_eq!(layout.target_count, 1);
            assert_eq!(layout.decoy_count(), 0);
            let occupied: Vec<_> = layout
                .cells
                .iter()
                .filter_map(|c| c.occupant)
                .collect();
            assert_eq!(occupied, vec![layout.target]);
        }
    }

    #[test]
    fn no_non_target_cell_holds_target_category() {
        for seed in 0..30 {
            for noise in 0..=MAX_NOISE_LEVEL {
                let layout = plan(8, noise, &mut rng(seed)).unwrap();
                let target_occupied = layout
                    .cells
                    .iter()
                    .filter(|c| c.occupant == Some(layout.target))
                    .count();
                assert_eq!(target_occupied, layout.target_count);
                assert!(layout.target_count >= 1);
                assert!(layout.target_count <= 3);
            }
        }
    }

    #[test]
    fn answer_names_a_fixed_category() {
        let layout = plan(5, 2, &mut rng(7)).unwrap();
        assert!(ShapeCategory::ALL.iter().any(|s| s.name() == layout.answer()));
    }

    #[test]
    fn minimum_dimension_still_plans() {
        let layout = plan(MIN_DIMENSION, MAX_NOISE_LEVEL, &mut rng(3)).unwrap();
        assert!(layout.target_count >= 1);
        // At least one cell must remain available for non-target content.
        assert!(layout.target_count < layout.cells.len());
    }

    #[test]
    fn decoy_probability_is_monotonic() {
        for noise in 1..=MAX_NOISE_LEVEL {
            assert!(decoy_probability(noise) > decoy_probability(noise - 1));
        }
        assert_eq!(decoy_probability(0), 0.0);
    }

    #[test]
    fn decoy_count_grows_with_noise_in_expectation() {
        let sum_decoys = |noise: u8| -> usize {
            (0..40).map(|seed| plan(8, noise, &mut rng(seed)).unwrap().decoy_count()).sum()
        };
        assert!(sum_decoys(5) > sum_decoys(1));
        assert_eq!(sum_decoys(0), 0);
    }

    #[test]
    fn jitter_stays_within_bounds() {
        for seed in 0..10 {
            let layout = plan(6, MAX_NOISE_LEVEL, &mut rng(seed)).unwrap();
            let max_offset = Jitter::max_offset(MAX_NOISE_LEVEL, layout.spec.cell_px);
            for cell in &layout.cells {
                let j = cell.jitter;
                assert!(j.dx.abs() <= max_offset && j.dy.abs() <= max_offset);
                assert!((0.8..=1.2).contains(&j.scale));
                assert!(j.rotation.abs() <= 0.09 * MAX_NOISE_LEVEL as f32);
                for shift in j.color_shift {
                    assert!(shift.abs() <= 8 * MAX_NOISE_LEVEL as i16);
                }
            }
        }
    }

    #[test]
    fn noise_zero_jitter_is_identity() {
        let layout = plan(4, 0, &mut rng(11)).unwrap();
        for cell in &layout.cells {
            assert_eq!(cell.jitter.dx, 0.0);
            assert_eq!(cell.jitter.dy, 0.0);
            assert_eq!(cell.jitter.scale, 1.0);
            assert_eq!(cell.jitter.rotation, 0.0);
        }
    }
}
