//! White-noise input texture for line integral convolution.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::seeds::RANDOM_DENOM;

/// Square grid of 8-bit intensities, row-major (row `i` along y, column `j` along x).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoiseTexture {
    resolution: usize,
    data: Vec<u8>,
}

impl NoiseTexture {
    /// Uniform white noise: `floor(255 * d / 32768)` with `d` drawn from `[0, 32768]`.
    pub fn generate<R: Rng + ?Sized>(resolution: usize, rng: &mut R) -> Self {
        let denom = f64::from(RANDOM_DENOM);
        let data = (0..resolution * resolution)
            .map(|_| (255.0 * f64::from(rng.gen_range(0..=RANDOM_DENOM)) / denom) as u8)
            .collect();
        Self { resolution, data }
    }

    /// [`NoiseTexture::generate`] with a `StdRng` seeded from `seed`.
    pub fn from_seed(resolution: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate(resolution, &mut rng)
    }

    /// Texture whose cell `(i, j)` is `f(i, j)`.
    pub fn from_fn<F: Fn(usize, usize) -> u8>(resolution: usize, f: F) -> Self {
        let mut data = Vec::with_capacity(resolution * resolution);
        for i in 0..resolution {
            for j in 0..resolution {
                data.push(f(i, j));
            }
        }
        Self { resolution, data }
    }

    /// Side length in pixels.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Intensity at row `i`, column `j`. Panics when out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u8 {
        self.data[i * self.resolution + j]
    }

    /// Row-major intensities.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}
