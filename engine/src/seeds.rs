//! Streamline seed placement inside planar bounds.
//!
//! Two strategies produce `k x k` points:
//! - uniform: a deterministic regular lattice spanning the bounds corner to corner
//! - random: independent pseudo-random positions drawn on a 1/32768 lattice
//!
//! A seeding line is also provided for rakes across a region of interest.

use flowtex_geo::{lerp, Bounds, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

/// Denominator of the random draw: values are `d / RANDOM_DENOM` with `d` in `[0, RANDOM_DENOM]`.
pub const RANDOM_DENOM: u32 = 32_768;

/// Errors from seed generation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeedError {
    /// A seed count of zero was requested.
    #[error("seed count must be at least 1")]
    ZeroCount,
}

/// Ordered seed points (z = 0). Duplicates are allowed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeedSet {
    /// Seed positions in generation order
    pub points: Vec<Vec3>,
}

impl SeedSet {
    /// Number of seeds.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when there are no seeds.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Seeds in generation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Vec3> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a SeedSet {
    type Item = &'a Vec3;
    type IntoIter = std::slice::Iter<'a, Vec3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Seeding strategy selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedStrategy {
    /// Regular lattice, see [`uniform`].
    #[default]
    Uniform,
    /// Pseudo-random positions, see [`random`].
    Random,
}

impl SeedStrategy {
    /// Generate `k x k` seeds; `rng_seed` only affects [`SeedStrategy::Random`].
    pub fn generate(self, k: usize, bounds: &Bounds, rng_seed: u64) -> Result<SeedSet, SeedError> {
        match self {
            SeedStrategy::Uniform => uniform(k, bounds),
            SeedStrategy::Random => random_seeded(k, bounds, rng_seed),
        }
    }
}

impl std::str::FromStr for SeedStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" | "grid" => Ok(SeedStrategy::Uniform),
            "random" => Ok(SeedStrategy::Random),
            other => Err(format!("unknown seeding strategy '{other}' (expected uniform or random)")),
        }
    }
}

/// Regular `k x k` lattice with fractional positions `i / (k - 1)` in each axis.
///
/// Points are emitted with the x index outermost. `k == 1` yields the lower corner.
pub fn uniform(k: usize, bounds: &Bounds) -> Result<SeedSet, SeedError> {
    if k == 0 {
        return Err(SeedError::ZeroCount);
    }
    if k == 1 {
        return Ok(SeedSet { points: vec![Vec3::planar(bounds.xmin, bounds.ymin)] });
    }
    let step = 1.0 / (k - 1) as f64;
    let mut points = Vec::with_capacity(k * k);
    for i in 0..k {
        for j in 0..k {
            points.push(place(bounds, i as f64 * step, j as f64 * step));
        }
    }
    Ok(SeedSet { points })
}

/// `k x k` pseudo-random points drawn from `rng`.
pub fn random<R: Rng + ?Sized>(k: usize, bounds: &Bounds, rng: &mut R) -> Result<SeedSet, SeedError> {
    if k == 0 {
        return Err(SeedError::ZeroCount);
    }
    let denom = f64::from(RANDOM_DENOM);
    let mut points = Vec::with_capacity(k * k);
    for _ in 0..k * k {
        let u = f64::from(rng.gen_range(0..=RANDOM_DENOM)) / denom;
        let v = f64::from(rng.gen_range(0..=RANDOM_DENOM)) / denom;
        points.push(place(bounds, u, v));
    }
    Ok(SeedSet { points })
}

/// [`random`] with a `StdRng` seeded from `seed`.
pub fn random_seeded(k: usize, bounds: &Bounds, seed: u64) -> Result<SeedSet, SeedError> {
    let mut rng = StdRng::seed_from_u64(seed);
    random(k, bounds, &mut rng)
}

/// `n` points evenly spaced from `from` to `to` inclusive.
pub fn line(from: Vec3, to: Vec3, n: usize) -> Result<SeedSet, SeedError> {
    match n {
        0 => Err(SeedError::ZeroCount),
        1 => Ok(SeedSet { points: vec![from] }),
        _ => {
            let step = 1.0 / (n - 1) as f64;
            let points = (0..n)
                .map(|i| {
                    let t = i as f64 * step;
                    Vec3::new(lerp(from.x, to.x, t), lerp(from.y, to.y, t), lerp(from.z, to.z, t))
                })
                .collect();
            Ok(SeedSet { points })
        }
    }
}

#[inline]
fn place(bounds: &Bounds, u: f64, v: f64) -> Vec3 {
    // Clamp guards the last lattice point against rounding past the far edge.
    Vec3::planar(
        lerp(bounds.xmin, bounds.xmax, u).max(bounds.xmin).min(bounds.xmax),
        lerp(bounds.ymin, bounds.ymax, v).max(bounds.ymin).min(bounds.ymax),
    )
}
