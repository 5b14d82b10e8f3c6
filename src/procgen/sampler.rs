//! Range-bounded random draws shared by every generator.
//!
//! All helpers take `&mut impl Rng` so callers decide whether the source is
//! seeded (tests, reproducible captures) or drawn from entropy.

use bevy::prelude::*;
use rand::Rng;

/// Neon palette shared by buildings, windows, particles, cars and signs.
pub const NEON_PALETTE: [Color; 6] = [
    Color::srgb(0.0, 0.961, 1.0),   // #00f5ff cyan
    Color::srgb(1.0, 0.0, 1.0),     // #ff00ff magenta
    Color::srgb(0.0, 1.0, 0.533),   // #00ff88 green
    Color::srgb(1.0, 0.4, 0.0),     // #ff6600 orange
    Color::srgb(1.0, 1.0, 0.0),     // #ffff00 yellow
    Color::srgb(0.0, 0.502, 1.0),   // #0080ff blue
];

/// Uniform value in `[min, min + span)`.
///
/// A zero or negative span collapses to `min`.
pub fn sample_range(rng: &mut impl Rng, min: f32, span: f32) -> f32 {
    if span <= 0.0 {
        return min;
    }
    min + rng.gen::<f32>() * span
}

/// Uniform value in `[-half_extent, half_extent)`.
pub fn sample_centered(rng: &mut impl Rng, half_extent: f32) -> f32 {
    sample_range(rng, -half_extent, half_extent * 2.0)
}

/// Pick one palette entry uniformly.
pub fn sample_palette(rng: &mut impl Rng, palette: &[Color]) -> Color {
    if palette.is_empty() {
        return Color::WHITE;
    }
    palette[rng.gen_range(0..palette.len())]
}

/// `+1.0` or `-1.0` with equal probability.
pub fn sample_sign(rng: &mut impl Rng) -> f32 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

/// Bernoulli trial; `probability` is clamped to `[0, 1]`.
pub fn chance(rng: &mut impl Rng, probability: f32) -> bool {
    rng.gen_bool(probability.clamp(0.0, 1.0) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn range_stays_half_open() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10_000 {
            let v = sample_range(&mut rng, 10.0, 40.0);
            assert!((10.0..50.0).contains(&v), "{v} escaped [10, 50)");
        }
    }

    #[test]
    fn empty_span_returns_min() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(sample_range(&mut rng, 4.0, 0.0), 4.0);
    }

    #[test]
    fn palette_draws_only_palette_colors() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let color = sample_palette(&mut rng, &NEON_PALETTE);
            assert!(NEON_PALETTE.contains(&color));
        }
    }

    #[test]
    fn sign_is_unit() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = (false, false);
        for _ in 0..200 {
            let s = sample_sign(&mut rng);
            assert!(s == 1.0 || s == -1.0);
            if s > 0.0 {
                seen.0 = true;
            } else {
                seen.1 = true;
            }
        }
        assert!(seen.0 && seen.1);
    }

    #[test]
    fn chance_extremes_are_certain() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            assert!(chance(&mut rng, 1.0));
            assert!(!chance(&mut rng, 0.0));
            assert!(chance(&mut rng, 7.0));
        }
    }
}
