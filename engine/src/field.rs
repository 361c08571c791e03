//! Field sources: vector and scalar attributes over planar bounds.
//!
//! The traits are the seam to whatever loads or simulates the data. Reference
//! sources are provided for analytic flows and for regular sample grids with
//! bilinear interpolation.

use flowtex_geo::{Bounds, Vec3};

use crate::scalar::ScalarRange;

/// A velocity field queried at world positions.
pub trait VectorField: Send + Sync {
    /// Axis-aligned domain of the field.
    fn bounds(&self) -> Bounds;
    /// Velocity at `p`, or `None` when `p` lies outside the domain.
    fn sample(&self, p: Vec3) -> Option<Vec3>;
}

/// A point-associated scalar attribute.
pub trait ScalarField: Send + Sync {
    /// Scalar at `p`, or `None` outside the domain.
    fn sample_scalar(&self, p: Vec3) -> Option<f64>;
    /// Range of the attribute over its samples.
    fn scalar_range(&self) -> ScalarRange;
}

/// Constant velocity everywhere inside `bounds`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformField {
    /// Domain of the field
    pub bounds: Bounds,
    /// Velocity at every point
    pub velocity: Vec3,
}

impl UniformField {
    /// Constant `velocity` over `bounds`.
    pub fn new(bounds: Bounds, velocity: Vec3) -> Self {
        Self { bounds, velocity }
    }

    /// A stagnant field.
    pub fn zero(bounds: Bounds) -> Self {
        Self { bounds, velocity: Vec3::ZERO }
    }
}

impl VectorField for UniformField {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn sample(&self, p: Vec3) -> Option<Vec3> {
        self.bounds.contains_xy(p).then_some(self.velocity)
    }
}

/// Solid-body rotation about `center` (counter-clockwise for positive `omega`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VortexField {
    /// Domain of the field
    pub bounds: Bounds,
    /// Rotation centre
    pub center: Vec3,
    /// Angular rate
    pub omega: f64,
}

impl VortexField {
    /// Unit-rate vortex centred in `bounds`.
    pub fn centered(bounds: Bounds) -> Self {
        let center = bounds.lerp_xy(0.5, 0.5);
        Self { bounds, center, omega: 1.0 }
    }
}

impl VectorField for VortexField {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn sample(&self, p: Vec3) -> Option<Vec3> {
        if !self.bounds.contains_xy(p) {
            return None;
        }
        let d = p.sub(self.center);
        Some(Vec3::planar(-self.omega * d.y, self.omega * d.x))
    }
}

/// Hyperbolic saddle: outflow along x, inflow along y through `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SaddleField {
    /// Domain of the field
    pub bounds: Bounds,
    /// Stagnation point
    pub center: Vec3,
}

impl SaddleField {
    /// Saddle with its stagnation point centred in `bounds`.
    pub fn centered(bounds: Bounds) -> Self {
        Self { bounds, center: bounds.lerp_xy(0.5, 0.5) }
    }
}

impl VectorField for SaddleField {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn sample(&self, p: Vec3) -> Option<Vec3> {
        if !self.bounds.contains_xy(p) {
            return None;
        }
        let d = p.sub(self.center);
        Some(Vec3::planar(d.x, -d.y))
    }
}

/// Errors when assembling a [`GridField`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GridFieldError {
    /// Fewer than two samples along an axis.
    #[error("grid needs at least 2x2 samples, got {0}x{1}")]
    TooSmall(usize, usize),
    /// Sample buffer does not match the grid dimensions.
    #[error("expected {expected} samples, got {got}")]
    BadLength {
        /// `nx * ny`
        expected: usize,
        /// Length supplied
        got: usize,
    },
    /// Bounds are empty or not finite.
    #[error("grid bounds must have positive finite extent")]
    DegenerateBounds,
}

/// Vectors and scalars sampled on a regular `nx x ny` lattice spanning `bounds`.
///
/// Samples are row-major with rows along y. Queries interpolate bilinearly.
#[derive(Clone, Debug, PartialEq)]
pub struct GridField {
    bounds: Bounds,
    nx: usize,
    ny: usize,
    vectors: Vec<Vec3>,
    scalars: Vec<f64>,
    range: ScalarRange,
}

impl GridField {
    /// Build from explicit vectors; the scalar attribute defaults to the speed.
    pub fn new(bounds: Bounds, nx: usize, ny: usize, vectors: Vec<Vec3>) -> Result<Self, GridFieldError> {
        if nx < 2 || ny < 2 {
            return Err(GridFieldError::TooSmall(nx, ny));
        }
        if !bounds.has_area() {
            return Err(GridFieldError::DegenerateBounds);
        }
        if vectors.len() != nx * ny {
            return Err(GridFieldError::BadLength { expected: nx * ny, got: vectors.len() });
        }
        let scalars: Vec<f64> = vectors.iter().map(|v| v.length()).collect();
        let range = ScalarRange::from_values(scalars.iter().copied()).unwrap_or(ScalarRange::new(0.0, 0.0));
        Ok(Self { bounds, nx, ny, vectors, scalars, range })
    }

    /// Sample `f` at every lattice node.
    pub fn from_fn<F>(bounds: Bounds, nx: usize, ny: usize, f: F) -> Result<Self, GridFieldError>
    where
        F: Fn(Vec3) -> Vec3,
    {
        if nx < 2 || ny < 2 {
            return Err(GridFieldError::TooSmall(nx, ny));
        }
        let mut vectors = Vec::with_capacity(nx * ny);
        for r in 0..ny {
            for c in 0..nx {
                let p = bounds.lerp_xy(c as f64 / (nx - 1) as f64, r as f64 / (ny - 1) as f64);
                vectors.push(f(p));
            }
        }
        Self::new(bounds, nx, ny, vectors)
    }

    /// Resample an analytic field onto a lattice.
    pub fn resample(field: &dyn VectorField, nx: usize, ny: usize) -> Result<Self, GridFieldError> {
        Self::from_fn(field.bounds(), nx, ny, |p| field.sample(p).unwrap_or(Vec3::ZERO))
    }

    /// Replace the scalar attribute.
    pub fn with_scalars(mut self, scalars: Vec<f64>) -> Result<Self, GridFieldError> {
        if scalars.len() != self.nx * self.ny {
            return Err(GridFieldError::BadLength { expected: self.nx * self.ny, got: scalars.len() });
        }
        self.range = ScalarRange::from_values(scalars.iter().copied()).unwrap_or(ScalarRange::new(0.0, 0.0));
        self.scalars = scalars;
        Ok(self)
    }

    /// Lattice size `(nx, ny)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Vector samples, row-major with rows along y.
    pub fn vectors(&self) -> &[Vec3] {
        &self.vectors
    }

    /// Scalar samples in the same order as [`GridField::vectors`].
    pub fn scalars(&self) -> &[f64] {
        &self.scalars
    }

    /// Cell index and bilinear weights for `p`, or `None` outside the bounds.
    fn locate(&self, p: Vec3) -> Option<(usize, usize, f64, f64)> {
        if !self.bounds.contains_xy(p) {
            return None;
        }
        let fx = (p.x - self.bounds.xmin) / self.bounds.width() * (self.nx - 1) as f64;
        let fy = (p.y - self.bounds.ymin) / self.bounds.height() * (self.ny - 1) as f64;
        let c = (fx.floor() as usize).min(self.nx - 2);
        let r = (fy.floor() as usize).min(self.ny - 2);
        Some((c, r, fx - c as f64, fy - r as f64))
    }

    fn bilerp<T, F>(&self, p: Vec3, get: F) -> Option<T>
    where
        F: Fn(usize) -> T,
        T: Blend,
    {
        let (c, r, tx, ty) = self.locate(p)?;
        let i00 = r * self.nx + c;
        let i10 = i00 + 1;
        let i01 = i00 + self.nx;
        let i11 = i01 + 1;
        let bottom = get(i00).blend(get(i10), tx);
        let top = get(i01).blend(get(i11), tx);
        Some(bottom.blend(top, ty))
    }
}

trait Blend: Copy {
    fn blend(self, other: Self, t: f64) -> Self;
}

impl Blend for f64 {
    fn blend(self, other: Self, t: f64) -> Self {
        self + t * (other - self)
    }
}

impl Blend for Vec3 {
    fn blend(self, other: Self, t: f64) -> Self {
        self.add(other.sub(self).mul(t))
    }
}

impl VectorField for GridField {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn sample(&self, p: Vec3) -> Option<Vec3> {
        self.bilerp(p, |i| self.vectors[i])
    }
}

impl ScalarField for GridField {
    fn sample_scalar(&self, p: Vec3) -> Option<f64> {
        self.bilerp(p, |i| self.scalars[i])
    }

    fn scalar_range(&self) -> ScalarRange {
        self.range
    }
}
