//! Grid-image CAPTCHA generator
//!
//! Renders a `dimension x dimension` grid of cells, hides a target shape
//! category among decoys and visual noise, and pairs the bitmap with the
//! ground-truth answer string. Every generation call is independent and
//! stateless: there is no challenge store, no shared rng, and no verification
//! step (matching a submitted answer against an issued challenge is the
//! caller's job).
//!
//! # Example
//!
//! ```
//! use gridcaptcha::{generate_captcha, Challenge, ReturnMode};
//!
//! # fn main() -> gridcaptcha::Result<()> {
//! match generate_captcha(6, 3, ReturnMode::Transport)? {
//!     Challenge::Transport(enc) => {
//!         // `enc.captcha_image` is a base64 PNG, `enc.answer` the shape name
//!         assert!(!enc.captcha_image.is_empty());
//!     }
//!     Challenge::Direct { .. } => unreachable!("transport was requested"),
//! }
//! # Ok(())
//! # }
//! ```

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod error;
pub use error::{Error, Result};

pub mod layout;
pub mod package;
pub mod rendering;

// HTTP collaborator (feature-gated)
#[cfg(feature = "server")]
pub mod server;

pub use layout::{
    plan, Layout, ShapeCategory, CANVAS_SIZE, MAX_DIMENSION, MAX_NOISE_LEVEL, MIN_DIMENSION,
};
pub use package::{package, Challenge, EncodedChallenge, ReturnMode};
pub use rendering::{render, RasterImage};

/// Generate one challenge: plan the grid, render it, package the result.
///
/// Fails with [`Error::InvalidParameter`] when `dimension` is outside
/// `2..=32` or `noise_level` exceeds 5; out-of-range values are rejected, not
/// clamped. Randomness is freshly seeded per call, so concurrent callers
/// never share generator state.
pub fn generate_captcha(dimension: u32, noise_level: u8, mode: ReturnMode) -> Result<Challenge> {
    let mut rng = StdRng::from_entropy();
    generate_captcha_with_rng(dimension, noise_level, mode, &mut rng)
}

/// Like [`generate_captcha`], but driven by a caller-supplied rng. Useful for
/// reproducible output in tests and benchmarks.
pub fn generate_captcha_with_rng(
    dimension: u32,
    noise_level: u8,
    mode: ReturnMode,
    rng: &mut StdRng,
) -> Result<Challenge> {
    let layout = layout::plan(dimension, noise_level, rng)?;
    debug!(
        "planned {}x{} grid: target={} count={} decoys={}",
        dimension,
        dimension,
        layout.target,
        layout.target_count,
        layout.decoy_count()
    );
    let image = rendering::render(&layout)?;
    package::package(image, layout.answer(), mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_independent_challenges() {
        let a = generate_captcha(6, 3, ReturnMode::Transport).unwrap();
        let b = generate_captcha(6, 3, ReturnMode::Transport).unwrap();
        assert!(ShapeCategory::ALL.iter().any(|s| s.name() == a.answer()));
        assert!(ShapeCategory::ALL.iter().any(|s| s.name() == b.answer()));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let mut r1 = StdRng::seed_from_u64(42);
        let mut r2 = StdRng::seed_from_u64(42);
        let a = generate_captcha_with_rng(5, 2, ReturnMode::Transport, &mut r1).unwrap();
        let b = generate_captcha_with_rng(5, 2, ReturnMode::Transport, &mut r2).unwrap();
        match (a, b) {
            (Challenge::Transport(a), Challenge::Transport(b)) => {
                assert_eq!(a.captcha_image, b.captcha_image);
                assert_eq!(a.answer, b.answer);
            }
            other => panic!("expected two transport challenges, got {other:?}"),
        }
    }

    #[test]
    fn invalid_parameters_produce_no_artifact() {
        assert!(generate_captcha(0, 3, ReturnMode::Direct).is_err());
        assert!(generate_captcha(6, 9, ReturnMode::Direct).is_err());
    }
}
