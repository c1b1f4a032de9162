//! Noise field for terrain generation.
//!
//! The field is seeded once from a phrase and never reseeded, so every
//! terrain built from the same field is bit-reproducible.

use noise::{NoiseFn, OpenSimplex};

/// A deterministic 2D scalar field producing values in `[-1, 1]`.
///
/// Closures implement this too, so tests can inject known sequences.
pub trait NoiseSource {
    fn sample(&self, x: f32, y: f32) -> f32;
}

impl<F> NoiseSource for F
where
    F: Fn(f32, f32) -> f32,
{
    fn sample(&self, x: f32, y: f32) -> f32 {
        self(x, y)
    }
}

/// OpenSimplex noise seeded from a phrase
pub struct NoiseField {
    simplex: OpenSimplex,
    seed: u32,
}

impl NoiseField {
    /// Create a field from a numeric seed
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: OpenSimplex::new(seed),
            seed,
        }
    }

    /// Create a field from a seed phrase (hashed with xxh32)
    pub fn from_phrase(phrase: &str) -> Self {
        Self::new(phrase_to_seed(phrase))
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseSource for NoiseField {
    /// Sample 2D simplex noise, clamped to [-1, 1]
    fn sample(&self, x: f32, y: f32) -> f32 {
        (self.simplex.get([x as f64, y as f64]) as f32).clamp(-1.0, 1.0)
    }
}

/// Hash a seed phrase to a 32-bit noise seed
pub fn phrase_to_seed(phrase: &str) -> u32 {
    xxhash_rust::xxh32::xxh32(phrase.as_bytes(), 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_phrase_same_field() {
        let a = NoiseField::from_phrase("flamengo");
        let b = NoiseField::from_phrase("flamengo");

        assert_eq!(a.seed(), b.seed());
        for i in 0..50 {
            let x = i as f32 * 0.37 - 4.0;
            let y = i as f32 * -0.21 + 2.5;
            assert_eq!(a.sample(x, y).to_bits(), b.sample(x, y).to_bits());
        }
    }

    #[test]
    fn test_different_phrases_differ() {
        assert_ne!(phrase_to_seed("flamengo"), phrase_to_seed("copacabana"));
    }

    #[test]
    fn test_output_range() {
        let field = NoiseField::new(7);
        for i in 0..200 {
            let v = field.sample(i as f32 * 0.13, i as f32 * 0.29);
            assert!((-1.0..=1.0).contains(&v), "sample {} out of range", v);
        }
    }

    #[test]
    fn test_closure_is_noise_source() {
        let constant = |_x: f32, _y: f32| 0.25;
        assert_eq!(constant.sample(10.0, -3.0), 0.25);
    }
}
