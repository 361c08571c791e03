//! Arrow glyph placement: random point masking and scale-by-vector arrows.

use flowtex_geo::Vec3;
use rand::seq::index;
use rand::Rng;

use crate::field::VectorField;

/// Default cap on arrows drawn over a field.
pub const DEFAULT_MAX_POINTS: usize = 500;
/// Default arrow length per unit speed.
pub const DEFAULT_ARROW_SCALE: f64 = 0.03;

/// One arrow glyph from `tail` to `head`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrow {
    /// Sample point
    pub tail: Vec3,
    /// Tip, offset by the scaled velocity
    pub head: Vec3,
}

impl Arrow {
    /// Distance from tail to head.
    pub fn length(&self) -> f64 {
        self.head.sub(self.tail).length()
    }
}

/// Random subset of at most `max_points` points, without replacement, original order kept.
pub fn mask_points<R: Rng + ?Sized>(points: &[Vec3], max_points: usize, rng: &mut R) -> Vec<Vec3> {
    if points.len() <= max_points {
        return points.to_vec();
    }
    let mut picked = index::sample(rng, points.len(), max_points).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| points[i]).collect()
}

/// Arrows at `points` with head `p + scale * v(p)`. Points outside the field are skipped.
pub fn arrows(field: &dyn VectorField, points: &[Vec3], scale: f64) -> Vec<Arrow> {
    points
        .iter()
        .filter_map(|&p| field.sample(p).map(|v| Arrow { tail: p, head: p.add(v.mul(scale)) }))
        .collect()
}
